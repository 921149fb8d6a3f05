mod pipeline;
pub mod state;

pub use pipeline::{
    ASK_BEFORE_UPLOAD, AnalyzeUpload, Controller, FRAME_EXTRACTION_FAILED, IMAGE_DECODE_FAILED,
    UPLOAD_PROMPT,
};
pub use state::{ControllerEvent, ControllerState};
