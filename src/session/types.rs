use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question/answer pair in the visible chat log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            question,
            answer,
            created_at: Utc::now(),
        }
    }
}
