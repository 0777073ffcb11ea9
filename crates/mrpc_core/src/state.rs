//! Interface state.
//!
//! One [`MrpcState`] exists per interface instance. It owns the icon list (the
//! only mutable data the interface has), the remote API, the notifier and the
//! bookkeeping for in-flight uploads.

use crate::config::AppConfig;
use crate::error::MrpcError;
use crate::models::{IconList, IconRecord, Notification, UploadHandle};
use crate::services::{
    GalleryLoad, GalleryService, HttpIconApi, IconApi, Notifier, TracingNotifier, UploadReport,
    UploadService,
};

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Central interface state.
///
/// Thread-safe via `parking_lot::RwLock`; uploads are serialized through an
/// async FIFO mutex.
pub struct MrpcState {
    /// Resolved configuration
    config: AppConfig,
    /// Remote listing and upload services
    api: Arc<dyn IconApi>,
    /// Where notifications go
    notifier: Arc<dyn Notifier>,
    /// Displayed icons
    icons: RwLock<IconList>,
    /// Set once the startup gallery load has run
    gallery_loaded: AtomicBool,
    /// Serializes upload invocations
    upload_queue: tokio::sync::Mutex<()>,
    /// Uploads currently in flight
    active_uploads: RwLock<HashMap<Uuid, Arc<UploadHandle>>>,
}

impl MrpcState {
    /// Create state talking to the configured HTTP endpoints.
    ///
    /// Notifications are only logged until a notifier is attached with
    /// [`MrpcState::with_notifier`].
    pub fn new(config: AppConfig) -> Result<Self, MrpcError> {
        let api = HttpIconApi::new(&config)?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Create state with a custom API backend.
    pub fn with_api(config: AppConfig, api: Arc<dyn IconApi>) -> Self {
        tracing::info!(client_id = %config.client_id, backend = api.name(), "MrpcState initialized");

        Self {
            config,
            api,
            notifier: Arc::new(TracingNotifier),
            icons: RwLock::new(IconList::new()),
            gallery_loaded: AtomicBool::new(false),
            upload_queue: tokio::sync::Mutex::new(()),
            active_uploads: RwLock::new(HashMap::new()),
        }
    }

    /// Attach the notifier used by the front end.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    // ========== Icon List ==========

    /// Snapshot of the displayed icons.
    pub fn icons(&self) -> Vec<IconRecord> {
        self.icons.read().to_vec()
    }

    /// Number of displayed icons.
    pub fn icon_count(&self) -> usize {
        self.icons.read().len()
    }

    /// Replace all icons. Returns the new count.
    pub fn replace_icons(&self, records: Vec<IconRecord>) -> usize {
        self.icons.write().replace(records)
    }

    /// Append one icon. Returns false if its id is already listed.
    pub fn append_icon(&self, record: IconRecord) -> bool {
        self.icons.write().append(record)
    }

    /// CDN URL of an icon image.
    pub fn icon_url(&self, icon: &IconRecord) -> String {
        self.config.cdn_url(&icon.id)
    }

    // ========== Gallery ==========

    /// Run the startup gallery load (at most once per state).
    pub async fn start(&self) -> GalleryLoad {
        GalleryService::load_once(self).await
    }

    /// Mark the startup load as done. Returns true if it already was.
    pub(crate) fn mark_gallery_loaded(&self) -> bool {
        self.gallery_loaded.swap(true, Ordering::SeqCst)
    }

    /// Check if the startup load has run.
    pub fn is_gallery_loaded(&self) -> bool {
        self.gallery_loaded.load(Ordering::SeqCst)
    }

    // ========== Uploads ==========

    /// Handle a file-picker selection.
    ///
    /// Only the first file is uploaded. An empty selection does nothing and
    /// returns `None`.
    pub async fn select_files(&self, files: &[PathBuf]) -> Option<UploadReport> {
        let Some(path) = files.first() else {
            tracing::debug!("Empty file selection, nothing to upload");
            return None;
        };
        if files.len() > 1 {
            tracing::debug!(ignored = files.len() - 1, "Only the first selected file is uploaded");
        }

        let report = UploadService::upload(self, path).await;
        self.notify(report.notification.clone()).await;
        Some(report)
    }

    /// Register an upload for tracking.
    pub fn register_upload(&self, handle: UploadHandle) -> Arc<UploadHandle> {
        let id = handle.id();
        let handle = Arc::new(handle);
        self.active_uploads.write().insert(id, handle.clone());
        tracing::trace!(upload_id = %id, "Upload registered");
        handle
    }

    /// Unregister a finished upload.
    pub fn unregister_upload(&self, id: &Uuid) -> Option<Arc<UploadHandle>> {
        let handle = self.active_uploads.write().remove(id);
        if handle.is_some() {
            tracing::trace!(upload_id = %id, "Upload unregistered");
        }
        handle
    }

    /// Get an in-flight upload by id.
    pub fn get_upload(&self, id: &Uuid) -> Option<Arc<UploadHandle>> {
        self.active_uploads.read().get(id).cloned()
    }

    /// Ids of all in-flight uploads.
    pub fn active_upload_ids(&self) -> Vec<Uuid> {
        self.active_uploads.read().keys().copied().collect()
    }

    /// Queue that serializes uploads.
    pub(crate) fn upload_queue(&self) -> &tokio::sync::Mutex<()> {
        &self.upload_queue
    }

    // ========== Service Accessors ==========

    /// Present a notification.
    pub async fn notify(&self, notification: Notification) {
        self.notifier.notify(notification).await;
    }

    /// Get the remote API.
    pub fn api(&self) -> &dyn IconApi {
        self.api.as_ref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
