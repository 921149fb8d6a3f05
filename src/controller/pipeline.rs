use super::state::{ControllerEvent, ControllerState};
use crate::{
    Result,
    config::LlmConfig,
    llm::{GenerateRequest, OllamaClient, VisionClient},
    media,
    session::{ConversationTurn, SessionContext},
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Instruction sent with every analyzed upload. The output format is
/// requested, not enforced; the model's text is returned verbatim.
const DEFAULT_ANALYSIS_PROMPT: &str = "You are a visual content analyzer. You will be given an image or a video frame.\n\
If the content has a clear main subject (like a product, person, or object in focus), center your output around it.\n\
Otherwise, describe the scene in general.\n\n\
Your output should strictly follow this format:\n\n\
Title: <one short line summarizing the main subject>\n\
Description: <Must have 2 or 3 sentences marketing-style description highlighting what is being shown.>\n\
Features:\n\
- <bullet point 1>\n\
- <bullet point 2>\n\
- <bullet point 3>\n\n\
(Must have 3 feature points. Include more points if it is highly relevant. Be concise and accurate.)\
IMPORTANT RULES: Description must have at least 2 sentences. Features must have at least 3 bullet points";

pub const UPLOAD_PROMPT: &str = "Please upload an image or a video.";
pub const FRAME_EXTRACTION_FAILED: &str = "Failed to extract frame";
pub const IMAGE_DECODE_FAILED: &str = "Failed to read image";
pub const ASK_BEFORE_UPLOAD: &str =
    "Please upload an image or video first before asking questions.";

/// An analyze request as it arrives from the upload surface. When both are
/// present the image wins.
#[derive(Debug, Default)]
pub struct AnalyzeUpload {
    /// Raw bytes of an uploaded image file, any format the decoder knows.
    pub image: Option<Vec<u8>>,
    /// Path to an uploaded video file on local disk.
    pub video: Option<PathBuf>,
}

pub struct Controller {
    client: Box<dyn VisionClient>,
    model: String,
    analysis_prompt: String,
}

impl Controller {
    pub fn new(config: &LlmConfig) -> Self {
        Self::with_client(Box::new(OllamaClient::new(config)), config)
    }

    pub fn with_client(client: Box<dyn VisionClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            analysis_prompt: config
                .analysis_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_ANALYSIS_PROMPT.to_string()),
        }
    }

    /// Turns an upload into a stored encoded image plus a generated
    /// description. Input problems come back as plain text in the output
    /// channel; only transport faults surface as errors.
    pub async fn analyze(
        &self,
        session: &mut SessionContext,
        upload: AnalyzeUpload,
    ) -> Result<String> {
        let state = ControllerState::of(session);

        let image = if let Some(bytes) = upload.image {
            match image::load_from_memory(&bytes) {
                Ok(img) => img,
                Err(e) => {
                    debug!("Uploaded image did not decode: {}", e);
                    state.apply(ControllerEvent::AnalysisRejected);
                    return Ok(IMAGE_DECODE_FAILED.to_string());
                }
            }
        } else if let Some(path) = upload.video {
            match media::extract_frame(&path).await? {
                Some(frame) => frame,
                None => {
                    state.apply(ControllerEvent::AnalysisRejected);
                    return Ok(FRAME_EXTRACTION_FAILED.to_string());
                }
            }
        } else {
            state.apply(ControllerEvent::AnalysisRejected);
            return Ok(UPLOAD_PROMPT.to_string());
        };

        let encoded = media::encode_image(&image)?;
        session.store_image(encoded.clone());
        state.apply(ControllerEvent::ImageAnalyzed);

        info!(
            "Analyzing {}x{} upload with model {}",
            image.width(),
            image.height(),
            self.model
        );

        let request = GenerateRequest::new(&self.model, &self.analysis_prompt).with_image(encoded);
        self.client.generate(request).await
    }

    /// Answers a follow-up question about the image currently in the
    /// session slot, appending the new turn to the visible log.
    pub async fn ask(&self, session: &mut SessionContext, question: &str) -> Result<String> {
        let state = ControllerState::of(session);

        // The slot may have been overwritten by a re-analysis since the
        // conversation started; the current image is always the one sent.
        let Some(image) = session.image().cloned() else {
            // Idle: deflect without any network call.
            state.apply(ControllerEvent::Asked);
            return Ok(ASK_BEFORE_UPLOAD.to_string());
        };

        let prompt = build_chat_prompt(session.turns(), question);
        debug!(
            "Asking follow-up with {} prior turns in context",
            session.turns().len()
        );

        let request = GenerateRequest::new(&self.model, prompt).with_image(image);
        let answer = self.client.generate(request).await?;

        session.push_turn(ConversationTurn::new(question.to_string(), answer.clone()));
        state.apply(ControllerEvent::Asked);

        Ok(answer)
    }

    /// Resets the visible log. The image slot is deliberately kept so the
    /// conversation can restart over the same upload.
    pub fn clear(&self, session: &mut SessionContext) {
        let state = ControllerState::of(session);
        session.clear_turns();
        state.apply(ControllerEvent::LogCleared);
        info!("Conversation log cleared");
    }
}

fn build_chat_prompt(turns: &[ConversationTurn], question: &str) -> String {
    let chat_history = turns
        .iter()
        .map(|turn| format!("User: {}\nAssistant: {}", turn.question, turn.answer))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful question/answer assistant.\n\
Based on the image shared, please answer the following question:\n\n\
Previous conversation:\n\
{chat_history}\n\n\
New question: {question}\n\n\
Please answer specifically about what you see in the image."
    )
}
