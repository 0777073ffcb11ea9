//! Command-line arguments.

use clap::{Parser, Subcommand};
use mrpc_core::config::{API_BASE_ENV, CDN_BASE_ENV, CLIENT_ID_ENV, UPLOAD_URL_ENV};
use mrpc_core::{AppConfig, MrpcError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mrpc", version, about = "MRPC icon list", long_about = None)]
pub struct Cli {
    /// Application id whose icons are managed [env: MRPC_CLIENT_ID]
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// Asset-listing API base URL [env: MRPC_API_BASE]
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Upload endpoint URL [env: MRPC_UPLOAD_URL]
    #[arg(long, global = true)]
    pub upload_url: Option<String>,

    /// Image CDN base URL [env: MRPC_CDN_BASE]
    #[arg(long, global = true)]
    pub cdn_base: Option<String>,

    /// Log filter directive, e.g. "mrpc_core=debug" [env: MRPC_LOG]
    #[arg(long, global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the icons registered for the application
    List,
    /// Upload icon files, one selection per file, then show the icons
    Upload {
        /// Image files to upload, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Cli {
    /// Resolve configuration: flags first, then environment.
    pub fn config(&self) -> Result<AppConfig, MrpcError> {
        AppConfig::from_lookup(|key| self.flag_for(key).or_else(|| std::env::var(key).ok()))
    }

    fn flag_for(&self, key: &str) -> Option<String> {
        let flag = match key {
            CLIENT_ID_ENV => &self.client_id,
            API_BASE_ENV => &self.api_base,
            UPLOAD_URL_ENV => &self.upload_url,
            CDN_BASE_ENV => &self.cdn_base,
            _ => return None,
        };
        flag.clone()
    }
}
