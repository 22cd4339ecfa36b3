pub mod recognition;

pub use recognition::{fields_from_json, RecognitionClient};
