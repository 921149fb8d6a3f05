mod client;
mod types;

pub use client::{FALLBACK_RESPONSE, OllamaClient, VisionClient};
pub use types::{GenerateRequest, GenerateResponse};
