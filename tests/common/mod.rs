pub mod mocks;

pub use mocks::MockVisionClient;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use vision_describe::config::LlmConfig;

pub fn test_llm_config() -> LlmConfig {
    LlmConfig {
        base_url: "http://localhost:11434".to_string(),
        model: "llava".to_string(),
        analysis_prompt: None,
    }
}

/// PNG bytes of a small solid-color image, as an upload would deliver them.
pub fn png_upload(color: [u8; 3]) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb(color)));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}
