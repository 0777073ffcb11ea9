//! User-facing notifications.
//!
//! Two presentations exist: a toast (transient, non-blocking, auto-dismissing,
//! pinned to the top-end corner) and a modal (blocking until the user dismisses
//! it). Front ends decide how to draw them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message shown when an upload succeeds.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Upload success";

/// Message shown when the service accepted the request but returned no id.
pub const ICON_TOO_SMALL_MESSAGE: &str = "Something went wrong. Minimal icon size is 512x512px.";

/// Message shown when the upload request failed.
pub const UPLOAD_FAILED_MESSAGE: &str = "Error uploading icon";

/// Message shown when the icon listing could not be loaded.
pub const LISTING_FAILED_MESSAGE: &str = "Could not load icons";

/// Default toast lifetime.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Severity levels for styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Informational message.
    #[default]
    Info,
    /// Success message.
    Success,
    /// Error message.
    Error,
}

/// How a notification is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Non-blocking, pinned to the top-end corner, dismisses itself after
    /// `duration`.
    Toast {
        /// Time before auto-dismiss.
        duration: Duration,
    },
    /// Blocking until the user confirms.
    Modal {
        /// Label of the dismiss button.
        confirm_label: String,
    },
}

/// A notification emitted by the gallery loader or the upload flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity for styling.
    pub severity: Severity,
    /// Toast or modal.
    pub presentation: Presentation,
}

impl Notification {
    /// Create a toast with the default lifetime.
    pub fn toast(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            presentation: Presentation::Toast { duration: DEFAULT_TOAST_DURATION },
        }
    }

    /// Create a modal with an "OK" button.
    pub fn modal(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            presentation: Presentation::Modal { confirm_label: "OK".to_string() },
        }
    }

    /// Toast for an accepted upload.
    pub fn upload_succeeded() -> Self {
        Self::toast("Success", UPLOAD_SUCCESS_MESSAGE, Severity::Success)
    }

    /// Modal for an upload the service rejected without an id.
    pub fn icon_too_small() -> Self {
        Self::modal("Error", ICON_TOO_SMALL_MESSAGE, Severity::Error)
    }

    /// Modal for a failed upload.
    pub fn upload_failed() -> Self {
        Self::modal("Error", UPLOAD_FAILED_MESSAGE, Severity::Error)
    }

    /// Toast for a failed gallery load.
    pub fn listing_failed(hint: Option<&str>) -> Self {
        let message = match hint {
            Some(hint) => format!("{LISTING_FAILED_MESSAGE}. {hint}"),
            None => LISTING_FAILED_MESSAGE.to_string(),
        };
        Self::toast("Error", message, Severity::Error)
    }

    /// Check if the notification blocks until dismissed.
    pub fn is_blocking(&self) -> bool {
        matches!(self.presentation, Presentation::Modal { .. })
    }
}
