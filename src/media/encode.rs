use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Base64 text of JPEG-compressed image bytes, ready to embed in a JSON
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn from_base64(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.0)
            .map_err(|e| Error::media(format!("invalid base64 image payload: {e}")))
    }
}

/// JPEG-compresses the image into an in-memory buffer and base64-encodes
/// the result. Always JPEG, no resizing. Alpha is dropped first since the
/// JPEG encoder rejects it.
pub fn encode_image(image: &DynamicImage) -> Result<EncodedImage> {
    let mut jpeg_bytes = Vec::new();
    image
        .to_rgb8()
        .write_to(&mut Cursor::new(&mut jpeg_bytes), ImageFormat::Jpeg)?;
    Ok(EncodedImage::from_bytes(&jpeg_bytes))
}
