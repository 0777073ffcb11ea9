//! Core types and services for the MRPC icon manager.
//!
//! This crate provides everything below the presentation layer:
//!
//! - **config**: Application id and endpoint configuration
//! - **error**: Error handling with user-facing hints
//! - **models**: Icon records, the icon list, upload and notification models
//! - **services**: Remote API, gallery loading, the upload flow
//! - **state**: Interface state owning the icon list
//! - **logging**: Structured logging setup

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;


pub use config::AppConfig;
pub use error::{ErrorInfo, MrpcError};
pub use models::{
    IconList, IconRecord, Notification, Presentation, Severity, UploadOutcome, UploadPhase,
    UploadRequest,
};
pub use services::{
    GalleryLoad, GalleryService, HttpIconApi, IconApi, Notifier, TracingNotifier, UploadReport,
    UploadService,
};
pub use state::MrpcState;
