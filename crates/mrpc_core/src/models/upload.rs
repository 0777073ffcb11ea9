//! Upload models: request body, per-invocation state machine, outcome.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::icon::{IconRecord, STATIC_IMAGE_KIND};
use super::notification::Notification;
use crate::error::MrpcError;

/// Body of an upload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Image encoded as a data URI
    pub image: String,
    /// Display name derived from the file name
    pub name: String,
    /// Kind tag (`type` on the wire)
    #[serde(rename = "type")]
    pub kind: String,
}

impl UploadRequest {
    /// Create a static-image upload request.
    pub fn new(image: impl Into<String>, name: impl Into<String>) -> Self {
        Self { image: image.into(), name: name.into(), kind: STATIC_IMAGE_KIND.to_string() }
    }
}

/// Derive the icon display name from a file name.
///
/// Strips the extension (the last `.` followed by at least one character that
/// is neither `.` nor `/`, at the end) and replaces every remaining `.` with `_`.
pub fn derive_icon_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(dot) => {
            let extension = &file_name[dot + 1..];
            if !extension.is_empty() && !extension.contains('/') {
                &file_name[..dot]
            } else {
                file_name
            }
        }
        None => file_name,
    };
    stem.replace('.', "_")
}

/// Phase of one upload invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPhase {
    /// Nothing in flight
    Idle,
    /// Reading the selected file
    Reading,
    /// File content encoded as a data URI
    Encoded,
    /// Request sent, waiting for the response
    Submitting,
    /// Icon accepted and appended to the list
    Succeeded,
    /// Service answered without an id (image too small)
    RejectedBySize,
    /// Transport, server or local read failure
    Failed,
}

impl UploadPhase {
    /// Check if this phase ends an invocation.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::RejectedBySize | Self::Failed)
    }

    /// Check if moving from `self` to `next` is allowed.
    pub fn can_advance_to(self, next: UploadPhase) -> bool {
        use UploadPhase::*;
        matches!(
            (self, next),
            (Idle, Reading)
                | (Reading, Encoded)
                | (Reading, Failed)
                | (Encoded, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, RejectedBySize)
                | (Submitting, Failed)
        )
    }
}

/// Handle for tracking one upload invocation.
pub struct UploadHandle {
    /// Unique invocation identifier
    id: Uuid,
    /// Name of the selected file
    file_name: String,
    /// Current phase
    phase: RwLock<UploadPhase>,
    /// Selection time
    started_at: DateTime<Utc>,
}

impl UploadHandle {
    /// Create a new handle in the `Idle` phase.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            phase: RwLock::new(UploadPhase::Idle),
            started_at: Utc::now(),
        }
    }

    /// Get the unique invocation identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the selected file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the current phase.
    pub fn phase(&self) -> UploadPhase {
        *self.phase.read()
    }

    /// Get when the upload was started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Milliseconds since the upload was started.
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }

    /// Move to the next phase, rejecting illegal transitions.
    pub fn advance(&self, next: UploadPhase) -> Result<(), MrpcError> {
        let mut phase = self.phase.write();
        let current = *phase;
        if !current.can_advance_to(next) {
            return Err(MrpcError::internal(format!(
                "Illegal upload transition {current:?} -> {next:?}"
            )));
        }
        tracing::trace!(upload_id = %self.id, from = ?current, to = ?next, "Upload phase");
        *phase = next;
        Ok(())
    }
}

/// Raw response of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

/// Interpreted result of one upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Service accepted the icon
    Succeeded(IconRecord),
    /// Service answered 200 without an id
    RejectedBySize,
    /// Anything else
    Failed {
        /// Short description for logs
        reason: String,
    },
}

impl UploadOutcome {
    /// Create a failed outcome.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed { reason: reason.into() }
    }

    /// Interpret a response by status and payload shape.
    ///
    /// A 200 whose JSON object carries an `id` key is a success whatever the
    /// value of that key; the payload becomes the appended record.
    pub fn from_response(response: &UploadResponse) -> Self {
        if response.status != 200 {
            return Self::failed(format!("HTTP status {}", response.status));
        }

        let payload: Value = match serde_json::from_slice(&response.body) {
            Ok(payload) => payload,
            Err(e) => return Self::failed(format!("Invalid JSON response: {e}")),
        };

        if payload.get("id").is_none() {
            return Self::RejectedBySize;
        }

        match serde_json::from_value::<IconRecord>(payload) {
            Ok(record) => Self::Succeeded(record),
            Err(e) => Self::failed(format!("Unexpected icon record: {e}")),
        }
    }

    /// Terminal phase for this outcome.
    pub fn phase(&self) -> UploadPhase {
        match self {
            Self::Succeeded(_) => UploadPhase::Succeeded,
            Self::RejectedBySize => UploadPhase::RejectedBySize,
            Self::Failed { .. } => UploadPhase::Failed,
        }
    }

    /// Check if the icon was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Notification presented for this outcome.
    pub fn notification(&self) -> Notification {
        match self {
            Self::Succeeded(_) => Notification::upload_succeeded(),
            Self::RejectedBySize => Notification::icon_too_small(),
            Self::Failed { .. } => Notification::upload_failed(),
        }
    }
}
