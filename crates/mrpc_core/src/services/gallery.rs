//! Icon gallery loading.

use crate::error::MrpcError;
use crate::models::Notification;
use crate::state::MrpcState;

/// Result of the startup gallery load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryLoad {
    /// Listing replaced the icon list; holds the icon count.
    Loaded(usize),
    /// Listing failed; the list was left untouched.
    Failed,
    /// The startup load had already run.
    AlreadyLoaded,
}

/// Loads the icon list from the asset-listing endpoint.
pub struct GalleryService;

impl GalleryService {
    /// Fetch the listing and replace the icon list with it.
    ///
    /// Returns the number of icons listed. On error the list is unchanged.
    pub async fn load(state: &MrpcState) -> Result<usize, MrpcError> {
        tracing::debug!(backend = state.api().name(), "Loading icon gallery");

        let records = state.api().list_icons().await?;
        let count = state.replace_icons(records);

        tracing::info!(count, "Icon gallery loaded");
        Ok(count)
    }

    /// Startup load. Runs at most once per state.
    ///
    /// Failures are logged and surfaced as a non-blocking toast.
    pub async fn load_once(state: &MrpcState) -> GalleryLoad {
        if state.mark_gallery_loaded() {
            tracing::debug!("Icon gallery already loaded, skipping");
            return GalleryLoad::AlreadyLoaded;
        }

        match Self::load(state).await {
            Ok(count) => GalleryLoad::Loaded(count),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    category = e.category(),
                    status = ?e.status_code(),
                    "Failed to load icon gallery"
                );
                state.notify(Notification::listing_failed(e.hint())).await;
                GalleryLoad::Failed
            }
        }
    }
}
