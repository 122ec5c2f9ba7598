//! Command line argument parsing and validation.
//!
//! Every flag has an environment fallback so the tool runs unchanged in CI.

use crate::config::{PublishRequest, ReleaseStatus};
use crate::play::PlayClient;
use clap::Parser;
use std::path::PathBuf;

/// Publish Android release builds to Google Play
#[derive(Parser, Debug, Clone)]
#[command(
    name = "play_publish",
    version,
    about = "Publish Android release builds to Google Play",
    long_about = "Upload APKs or app bundles to a Google Play track and commit the edit,
or share them through internal app sharing.

Usage:
  play_publish --package-name com.example.app --release-files 'app/build/**/*.aab' --track beta
  play_publish --package-name com.example.app --release-files app.apk --track internalsharing"
)]
pub struct Args {
    /// Application package name
    #[arg(long, env = "PLAY_PACKAGE_NAME")]
    pub package_name: String,

    /// Release files as comma-separated glob patterns
    #[arg(long, env = "PLAY_RELEASE_FILES", value_delimiter = ',', required = true)]
    pub release_files: Vec<String>,

    /// Release name shown in the Play Console
    #[arg(long, env = "PLAY_RELEASE_NAME")]
    pub release_name: Option<String>,

    /// Target track; `internalsharing` uploads for internal app sharing
    #[arg(long, env = "PLAY_TRACK", default_value = "production")]
    pub track: String,

    /// In-app update priority (0-5)
    #[arg(long, env = "PLAY_IN_APP_UPDATE_PRIORITY", default_value_t = 0)]
    pub in_app_update_priority: u8,

    /// Fraction of users for a staged rollout (0.0-1.0)
    #[arg(long, env = "PLAY_USER_FRACTION")]
    pub user_fraction: Option<f64>,

    /// Release status: completed, draft, halted or inProgress
    #[arg(long, env = "PLAY_STATUS")]
    pub status: Option<ReleaseStatus>,

    /// Directory of whatsnew-<locale> release notes files
    #[arg(long, env = "PLAY_WHATS_NEW_DIRECTORY")]
    pub whats_new_directory: Option<PathBuf>,

    /// ProGuard/R8 mapping file
    #[arg(long, env = "PLAY_MAPPING_FILE")]
    pub mapping_file: Option<PathBuf>,

    /// Native debug symbols file or directory
    #[arg(long, env = "PLAY_DEBUG_SYMBOLS")]
    pub debug_symbols: Option<PathBuf>,

    /// Commit without sending the changes for review
    #[arg(long, env = "PLAY_CHANGES_NOT_SENT_FOR_REVIEW")]
    pub changes_not_sent_for_review: bool,

    /// Continue an existing edit instead of opening a new one
    #[arg(long, env = "PLAY_EXISTING_EDIT_ID")]
    pub existing_edit_id: Option<String>,

    /// OAuth access token for the Google Play Developer API
    #[arg(long, env = "GOOGLE_PLAY_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// API endpoint override
    #[arg(long, env = "PLAY_API_BASE_URL", default_value = PlayClient::DEFAULT_BASE_URL, hide = true)]
    pub api_base_url: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.package_name.trim().is_empty() {
            return Err("Package name must not be empty".to_string());
        }
        if self.track.trim().is_empty() {
            return Err("Track must not be empty".to_string());
        }
        if self.access_token.trim().is_empty() {
            return Err("Access token must not be empty".to_string());
        }
        if self.release_files.iter().all(|p| p.trim().is_empty()) {
            return Err("At least one release file pattern is required".to_string());
        }
        Ok(())
    }

    /// Build the publish request from already-resolved release files
    pub fn to_request(&self, release_files: Vec<PathBuf>) -> PublishRequest {
        PublishRequest {
            package_name: self.package_name.clone(),
            release_files,
            release_name: self.release_name.clone(),
            track: self.track.clone(),
            in_app_update_priority: self.in_app_update_priority,
            user_fraction: self.user_fraction,
            status: self.status,
            whats_new_directory: self.whats_new_directory.clone(),
            mapping_file: self.mapping_file.clone(),
            debug_symbols: self.debug_symbols.clone(),
            changes_not_sent_for_review: self.changes_not_sent_for_review,
            existing_edit_id: self.existing_edit_id.clone(),
        }
    }
}
