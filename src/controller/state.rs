use crate::session::SessionContext;
use tracing::{debug, info};

/// Interaction phases. Chat is enabled once an upload has been analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// An upload was encoded and stored in the session slot.
    ImageAnalyzed,
    /// An analyze request carried no usable input; the slot is untouched.
    AnalysisRejected,
    /// A follow-up question was handled (or deflected while Idle).
    Asked,
    /// The visible log was reset. Does not touch the image slot.
    LogCleared,
}

impl ControllerState {
    /// The phase is fully determined by whether the session slot is
    /// occupied.
    pub fn of(session: &SessionContext) -> Self {
        if session.image().is_some() {
            Self::Ready
        } else {
            Self::Idle
        }
    }

    pub fn chat_enabled(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Every event is legal in every state; only a successful analyze
    /// moves Idle to Ready, and nothing moves Ready back.
    pub fn apply(self, event: ControllerEvent) -> Self {
        let next = match (self, event) {
            (Self::Idle, ControllerEvent::ImageAnalyzed) => Self::Ready,
            (Self::Idle, _) => Self::Idle,
            (Self::Ready, _) => Self::Ready,
        };

        if self != next {
            info!("Controller state transition: {:?} -> {:?} (event: {:?})", self, next, event);
        } else {
            debug!("Controller staying in state {:?} after event {:?}", self, event);
        }

        next
    }
}
