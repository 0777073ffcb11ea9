//! Services for the MRPC icon manager.
//!
//! This module contains the service layer:
//! - `api` - Remote listing and upload endpoints behind the `IconApi` trait
//! - `encoding` - Data URI encoding of local image files
//! - `gallery` - Startup loading of the icon list
//! - `notifier` - Notification delivery
//! - `upload` - The upload flow

pub mod api;
pub mod encoding;
pub mod gallery;
pub mod notifier;
pub mod upload;

pub use api::{HttpIconApi, IconApi};
pub use gallery::{GalleryLoad, GalleryService};
pub use notifier::{Notifier, TracingNotifier};
pub use upload::{UploadReport, UploadService};
