//! Data models for the MRPC icon manager.
//!
//! This module contains all core data structures:
//! - `icon` - IconRecord, IconList
//! - `upload` - UploadRequest, UploadPhase, UploadHandle, UploadOutcome
//! - `notification` - Notification, Presentation, Severity

pub mod icon;
pub mod notification;
pub mod upload;

pub use icon::{IconList, IconRecord, STATIC_IMAGE_KIND};
pub use notification::{Notification, Presentation, Severity};
pub use upload::{
    derive_icon_name, UploadHandle, UploadOutcome, UploadPhase, UploadRequest, UploadResponse,
};
