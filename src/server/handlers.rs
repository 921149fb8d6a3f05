use super::types::{ActionResponse, AskRequest, ClearRequest, ErrorResponse};
use crate::{
    controller::{AnalyzeUpload, Controller},
    session::SessionContext,
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
    pub sessions: Arc<Mutex<HashMap<String, SessionContext>>>,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: Arc::new(controller),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(msg: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: msg.into() }),
    )
}

fn internal_error(e: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Processing error: {e}"),
        }),
    )
}

/// Accepts a multipart upload with an `image` and/or `video` file part and
/// an optional `session_id` text part; answers with the generated
/// description. Input problems (nothing uploaded, no decodable frame)
/// come back as text in `output`, not as an error status.
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ActionResponse>, HandlerError> {
    let mut upload = AnalyzeUpload::default();
    let mut session_id = None;

    // The uploaded video has to live on disk for the frame decoder; the
    // guard keeps the file alive for the duration of the request and
    // reclaims it on every exit path.
    let mut video_file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read image part: {e}")))?;
                upload.image = Some(bytes.to_vec());
            }
            Some("video") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read video part: {e}")))?;
                let file = tempfile::NamedTempFile::with_suffix(".mp4")
                    .map_err(internal_error)?;
                tokio::fs::write(file.path(), &bytes)
                    .await
                    .map_err(internal_error)?;
                upload.video = Some(file.path().to_path_buf());
                video_file = Some(file);
            }
            Some("session_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read session_id part: {e}")))?;
                session_id = Some(text);
            }
            _ => {}
        }
    }

    let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    info!("Received analyze request for session: {}", session_id);

    let mut sessions = state.sessions.lock().await;
    let session = sessions.entry(session_id.clone()).or_default();

    let result = state.controller.analyze(session, upload).await;
    drop(video_file);

    match result {
        Ok(output) => {
            info!("Analyze completed for session: {}", session_id);
            Ok(Json(ActionResponse { session_id, output }))
        }
        Err(e) => {
            error!("Analyze failed for session {}: {}", session_id, e);
            Err(internal_error(e))
        }
    }
}

/// Answers a follow-up question about the session's current image. Asking
/// before any upload returns guidance text in `output`.
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<ActionResponse>, HandlerError> {
    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    info!("Received ask request for session: {}", session_id);

    let mut sessions = state.sessions.lock().await;
    let session = sessions.entry(session_id.clone()).or_default();

    match state.controller.ask(session, &request.question).await {
        Ok(output) => Ok(Json(ActionResponse { session_id, output })),
        Err(e) => {
            error!("Ask failed for session {}: {}", session_id, e);
            Err(internal_error(e))
        }
    }
}

/// Resets the session's visible conversation log. The analyzed image is
/// kept, so follow-up questions continue to work.
pub async fn clear(
    State(state): State<AppState>,
    Json(request): Json<ClearRequest>,
) -> Result<Json<ActionResponse>, HandlerError> {
    let session_id = request.session_id;
    info!("Received clear request for session: {}", session_id);

    let mut sessions = state.sessions.lock().await;
    if let Some(session) = sessions.get_mut(&session_id) {
        state.controller.clear(session);
    }

    Ok(Json(ActionResponse {
        session_id,
        output: String::new(),
    }))
}
