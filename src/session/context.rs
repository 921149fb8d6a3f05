use super::ConversationTurn;
use crate::media::EncodedImage;

/// What a session remembers between requests: the single encoded-image
/// slot and the visible conversation log.
///
/// The slot holds at most one image. Every successful analyze overwrites
/// it; clearing the log leaves it in place so follow-up questions keep
/// referencing the last upload.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    image: Option<EncodedImage>,
    turns: Vec<ConversationTurn>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional overwrite; prior content is never compared.
    pub fn store_image(&mut self, image: EncodedImage) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }

    pub fn push_turn(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Resets the visible log only. The image slot survives.
    pub fn clear_turns(&mut self) {
        self.turns.clear();
    }
}
