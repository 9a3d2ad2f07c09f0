pub mod text_recognizer;
pub mod vision_client;

pub use text_recognizer::TextRecognizer;
pub use vision_client::{Credentials, VisionClient};
