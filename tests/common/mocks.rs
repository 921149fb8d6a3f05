use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vision_describe::{
    Error, Result,
    llm::{GenerateRequest, VisionClient},
};

/// Mock inference client for testing. Records every request it receives
/// and replays scripted responses in order.
#[derive(Debug)]
pub struct MockVisionClient {
    pub responses: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<GenerateRequest>>>,
    pub error: Option<String>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_responses(self, responses: Vec<&str>) -> Self {
        *self.responses.lock().unwrap() = responses.into_iter().map(String::from).collect();
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    /// Handle onto the recorded requests, usable after the mock has been
    /// boxed into a controller.
    pub fn request_log(&self) -> Arc<Mutex<Vec<GenerateRequest>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}
