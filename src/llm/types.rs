use crate::media::EncodedImage;
use serde::{Deserialize, Serialize};

/// Body of a `POST /api/generate` call. The `images` key is left out
/// entirely for text-only turns; Ollama treats an explicit empty list
/// differently from an absent one for some models.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<EncodedImage>>,
    pub stream: bool,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            images: None,
            stream: false,
        }
    }

    pub fn with_image(mut self, image: EncodedImage) -> Self {
        self.images = Some(vec![image]);
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serialization_without_image() {
        let request = GenerateRequest::new("llava", "Describe this.");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "llava");
        assert_eq!(json["prompt"], "Describe this.");
        assert_eq!(json["stream"], false);
        assert!(json.get("images").is_none());
    }

    #[test]
    fn test_request_serialization_with_image() {
        let request = GenerateRequest::new("llava", "Describe this.")
            .with_image(EncodedImage::from_base64("aGVsbG8="));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["images"], serde_json::json!(["aGVsbG8="]));
    }

    #[test]
    fn test_response_missing_field_deserializes_to_none() {
        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(body.response.is_none());

        let body: GenerateResponse =
            serde_json::from_str(r#"{"model": "llava", "done": true}"#).unwrap();
        assert!(body.response.is_none());
    }

    #[test]
    fn test_response_field_deserializes() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"response": "A red square."}"#).unwrap();
        assert_eq!(body.response.as_deref(), Some("A red square."));
    }
}
