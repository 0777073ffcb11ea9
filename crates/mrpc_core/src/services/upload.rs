//! Icon upload flow.
//!
//! One invocation per file selection:
//! read → encode as data URI → derive name → submit → interpret → update list.
//! Invocations are serialized; the list is only touched on success.

use crate::error::MrpcError;
use crate::models::{
    derive_icon_name, Notification, UploadHandle, UploadOutcome, UploadPhase, UploadRequest,
};
use crate::services::encoding;
use crate::state::MrpcState;

use std::path::Path;
use uuid::Uuid;

/// What one upload invocation did.
#[derive(Debug, Clone)]
pub struct UploadReport {
    /// Invocation identifier
    pub upload_id: Uuid,
    /// Name of the selected file
    pub file_name: String,
    /// Icon name sent to the service
    pub name: String,
    /// Interpreted result
    pub outcome: UploadOutcome,
    /// Whether the icon list grew
    pub appended: bool,
    /// Notification to present
    pub notification: Notification,
}

/// Runs the upload flow.
pub struct UploadService;

impl UploadService {
    /// Upload one file and update the icon list on success.
    ///
    /// Never returns an error: every failure becomes an
    /// [`UploadOutcome::Failed`]. The caller presents the notification.
    pub async fn upload(state: &MrpcState, path: &Path) -> UploadReport {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = derive_icon_name(&file_name);

        // Wait for earlier uploads to finish
        let queued = state.upload_queue().lock().await;

        let handle = state.register_upload(UploadHandle::new(file_name.clone()));
        let upload_id = handle.id();

        tracing::debug!(
            upload_id = %upload_id,
            file = handle.file_name(),
            path = %path.display(),
            started_at = %handle.started_at(),
            name = %name,
            "Starting upload"
        );

        let (outcome, appended) = match Self::run(state, &handle, path, &name).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(upload_id = %upload_id, error = %e, "Upload aborted");
                (UploadOutcome::failed(e.to_string()), false)
            }
        };

        let elapsed_ms = handle.elapsed_ms();
        state.unregister_upload(&upload_id);
        drop(queued);

        match &outcome {
            UploadOutcome::Succeeded(record) => {
                tracing::info!(upload_id = %upload_id, icon_id = %record.id, elapsed_ms, "Icon uploaded")
            }
            UploadOutcome::RejectedBySize => {
                tracing::warn!(upload_id = %upload_id, elapsed_ms, "Upload rejected, no icon id returned")
            }
            UploadOutcome::Failed { reason } => {
                tracing::warn!(upload_id = %upload_id, reason = %reason, elapsed_ms, "Upload failed")
            }
        }

        let notification = outcome.notification();
        UploadReport { upload_id, file_name, name, outcome, appended, notification }
    }

    /// Drive one invocation through its phases.
    async fn run(
        state: &MrpcState,
        handle: &UploadHandle,
        path: &Path,
        name: &str,
    ) -> Result<(UploadOutcome, bool), MrpcError> {
        handle.advance(UploadPhase::Reading)?;
        let image = match encoding::read_data_uri(path).await {
            Ok(image) => image,
            Err(e) => {
                handle.advance(UploadPhase::Failed)?;
                return Ok((UploadOutcome::failed(e.to_string()), false));
            }
        };
        handle.advance(UploadPhase::Encoded)?;

        let request = UploadRequest::new(image, name);

        handle.advance(UploadPhase::Submitting)?;
        let outcome = match state.api().upload_icon(&request).await {
            Ok(response) => UploadOutcome::from_response(&response),
            Err(e) => UploadOutcome::failed(e.to_string()),
        };

        let appended = match &outcome {
            UploadOutcome::Succeeded(record) => state.append_icon(record.clone()),
            _ => false,
        };

        handle.advance(outcome.phase())?;
        Ok((outcome, appended))
    }
}
