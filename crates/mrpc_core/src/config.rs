//! Runtime configuration.
//!
//! Values come from environment variables and can be overridden by the
//! front end (CLI flags). The application id is the only required value.

use crate::error::MrpcError;

use std::path::PathBuf;

/// Environment variable holding the target application id.
pub const CLIENT_ID_ENV: &str = "MRPC_CLIENT_ID";

/// Environment variable overriding the asset-listing API base.
pub const API_BASE_ENV: &str = "MRPC_API_BASE";

/// Environment variable overriding the upload endpoint.
pub const UPLOAD_URL_ENV: &str = "MRPC_UPLOAD_URL";

/// Environment variable overriding the CDN base.
pub const CDN_BASE_ENV: &str = "MRPC_CDN_BASE";

/// Default asset-listing API base.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v9";

/// Default upload endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "https://mrpc-server.exzork.me/upload";

/// Default CDN base for icon images.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.discordapp.com";

/// Resolved configuration for one interface instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Application whose icons are listed and displayed.
    pub client_id: String,
    /// Base URL of the asset-listing API (no trailing slash).
    pub api_base: String,
    /// Full URL of the upload endpoint.
    pub upload_url: String,
    /// Base URL of the image CDN (no trailing slash).
    pub cdn_base: String,
}

impl AppConfig {
    /// Create a configuration for `client_id` with default endpoints.
    pub fn new(client_id: impl Into<String>) -> Result<Self, MrpcError> {
        let client_id = client_id.into().trim().to_string();
        if client_id.is_empty() {
            return Err(missing_client_id());
        }

        Ok(Self {
            client_id,
            api_base: DEFAULT_API_BASE.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
        })
    }

    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, MrpcError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MrpcError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(CLIENT_ID_ENV).unwrap_or_default();
        let mut config = Self::new(client_id)?;

        if let Some(api_base) = non_blank(lookup(API_BASE_ENV)) {
            config = config.with_api_base(api_base);
        }
        if let Some(upload_url) = non_blank(lookup(UPLOAD_URL_ENV)) {
            config = config.with_upload_url(upload_url);
        }
        if let Some(cdn_base) = non_blank(lookup(CDN_BASE_ENV)) {
            config = config.with_cdn_base(cdn_base);
        }

        Ok(config)
    }

    /// Override the asset-listing API base.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = trim_base(api_base.into());
        self
    }

    /// Override the upload endpoint.
    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = upload_url.into().trim().to_string();
        self
    }

    /// Override the CDN base.
    pub fn with_cdn_base(mut self, cdn_base: impl Into<String>) -> Self {
        self.cdn_base = trim_base(cdn_base.into());
        self
    }

    /// URL of the asset-listing endpoint for the configured application.
    pub fn listing_url(&self) -> String {
        format!("{}/oauth2/applications/{}/assets", self.api_base, self.client_id)
    }

    /// CDN URL of the image for `icon_id`.
    pub fn cdn_url(&self, icon_id: &str) -> String {
        format!("{}/app-assets/{}/{}.png", self.cdn_base, self.client_id, icon_id)
    }
}

fn missing_client_id() -> MrpcError {
    MrpcError::config_with_hint(
        "Application id is not configured",
        format!("Set {CLIENT_ID_ENV} or pass --client-id"),
    )
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn trim_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// Get the default application data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(std::env::temp_dir).join("mrpc")
}
