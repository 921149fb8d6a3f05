use crate::{Error, Result};
use image::DynamicImage;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Decodes the first frame of the video at `path`, converted to RGB.
///
/// Returns `Ok(None)` when the source yields no decodable frame (empty or
/// corrupt file). Only an unusable environment (ffmpeg binary missing,
/// spawn failure) is an error. The decoder child process is fully reaped
/// before returning; no streaming, no seeking.
pub async fn extract_frame(path: &Path) -> Result<Option<DynamicImage>> {
    let output = Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args(["-frames:v", "1", "-f", "image2pipe", "-c:v", "mjpeg", "pipe:1"])
        .output()
        .await
        .map_err(|e| Error::media(format!("failed to run ffmpeg: {e}")))?;

    if !output.status.success() || output.stdout.is_empty() {
        debug!(
            "No decodable frame in {} (ffmpeg status: {})",
            path.display(),
            output.status
        );
        return Ok(None);
    }

    match image::load_from_memory(&output.stdout) {
        Ok(frame) => Ok(Some(DynamicImage::ImageRgb8(frame.to_rgb8()))),
        Err(e) => {
            debug!("ffmpeg output for {} did not decode: {}", path.display(), e);
            Ok(None)
        }
    }
}
