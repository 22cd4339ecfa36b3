//! Repair for binary payloads that some transports wrap as JSON.
//!
//! A file sent through such a transport arrives labelled `application/json`
//! with a body like `{"type":"Buffer","data":[137,80,78,71,...]}`. Writing that
//! body verbatim would persist the JSON text instead of the file.

use bytes::Bytes;
use cardbot_core::{CardBotError, Result};
use serde_json::Value;

/// Turn a JSON-labelled payload into the bytes that should be persisted.
///
/// A top-level `{type: "Buffer", data: [...]}` object is rebuilt into its raw
/// bytes. Any other JSON document is kept as received. Bodies that are not
/// valid JSON, or Buffer objects whose `data` holds anything but bytes, are
/// errors.
pub fn repair_json_payload(raw: &[u8]) -> Result<Bytes> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| CardBotError::BufferRepair(format!("invalid JSON body: {e}")))?;

    match buffer_bytes(&value)? {
        Some(bytes) => Ok(Bytes::from(bytes)),
        None => Ok(Bytes::copy_from_slice(raw)),
    }
}

/// Returns the reconstructed bytes if `value` has the Buffer shape.
fn buffer_bytes(value: &Value) -> Result<Option<Vec<u8>>> {
    let Some(obj) = value.as_object() else {
        return Ok(None);
    };
    if obj.get("type").and_then(Value::as_str) != Some("Buffer") {
        return Ok(None);
    }
    let Some(data) = obj.get("data").and_then(Value::as_array) else {
        return Ok(None);
    };

    data.iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| {
                    CardBotError::BufferRepair(format!("data[{i}] is not a byte: {v}"))
                })
        })
        .collect::<Result<Vec<u8>>>()
        .map(Some)
}
