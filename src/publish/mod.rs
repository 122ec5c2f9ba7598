//! Publish workflow.
//!
//! The `internalsharing` track uploads each artifact for internal app
//! sharing and returns download links. Any other track runs the edit flow:
//!
//! 1. validate the request (no remote call yet)
//! 2. load release notes and prepare debug symbols from disk
//! 3. open or reuse an edit, then check the track exists
//! 4. upload each artifact with its attachments, in order
//! 5. assign the version codes to the track
//! 6. commit the edit
//!
//! The first error ends the run. Nothing is retried.

mod edit;
mod sharing;
mod track;
mod uploader;

pub use edit::{CommittedEdit, EditSession};
pub use sharing::share_artifacts;
pub use track::{assign_track, build_release};
pub use uploader::ReleaseUploader;

use crate::config::PublishRequest;
use crate::error::{LocalIoError, Result};
use crate::notes::load_release_notes;
use crate::play::PlayApi;
use crate::symbols::prepare_debug_symbols;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// Artifacts were released to a track through a committed edit
    Committed {
        /// Committed edit id
        edit_id: String,
        /// Track the release was assigned to
        track: String,
        /// Version codes in artifact order
        version_codes: Vec<i64>,
    },
    /// Artifacts were uploaded for internal app sharing
    Shared {
        /// Download URLs in artifact order
        download_urls: Vec<String>,
    },
}

impl PublishOutcome {
    /// Version codes of a committed release; empty for internal sharing
    pub fn version_codes(&self) -> &[i64] {
        match self {
            PublishOutcome::Committed { version_codes, .. } => version_codes,
            PublishOutcome::Shared { .. } => &[],
        }
    }

    /// Internal sharing download URLs; empty for a committed release
    pub fn download_urls(&self) -> &[String] {
        match self {
            PublishOutcome::Committed { .. } => &[],
            PublishOutcome::Shared { download_urls } => download_urls,
        }
    }

    /// Download URL of the last shared artifact
    pub fn last_download_url(&self) -> Option<&str> {
        self.download_urls().last().map(String::as_str)
    }
}

/// Runs publish workflows against one store API handle
#[derive(Debug)]
pub struct Publisher<P: PlayApi> {
    api: P,
}

impl<P: PlayApi> Publisher<P> {
    /// Create a publisher over an authenticated API handle
    pub fn new(api: P) -> Self {
        Self { api }
    }

    /// Underlying API handle
    pub fn api(&self) -> &P {
        &self.api
    }

    /// Run one publish workflow
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome> {
        request.validate()?;

        if request.is_internal_sharing() {
            log::info!(
                "Uploading {} artifact(s) for internal sharing",
                request.release_files.len()
            );
            let download_urls =
                share_artifacts(&self.api, &request.package_name, &request.release_files).await?;
            return Ok(PublishOutcome::Shared { download_urls });
        }

        self.publish_to_track(request).await
    }

    async fn publish_to_track(&self, request: &PublishRequest) -> Result<PublishOutcome> {
        if let Some(mapping_file) = &request.mapping_file
            && !tokio::fs::try_exists(mapping_file)
                .await
                .map_err(|e| LocalIoError::read(mapping_file, e))?
        {
            return Err(LocalIoError::MissingFile {
                path: mapping_file.clone(),
            }
            .into());
        }
        let release_notes = load_release_notes(request.whats_new_directory.as_deref()).await?;
        let debug_symbols = match &request.debug_symbols {
            Some(path) => Some(prepare_debug_symbols(path).await?),
            None => None,
        };

        let edit = EditSession::obtain_or_reuse(
            &self.api,
            &request.package_name,
            request.existing_edit_id.as_deref(),
        )
        .await?;
        edit.validate_track(&request.track).await?;

        let version_codes = ReleaseUploader::new(&edit)
            .with_mapping_file(request.mapping_file.as_deref())
            .with_debug_symbols(debug_symbols)
            .upload_all(&request.release_files)
            .await?;

        let track = assign_track(&edit, request, &version_codes, release_notes).await?;
        log::debug!("Track after update: {:?}", track);

        let committed = edit.commit(request.changes_not_sent_for_review).await?;

        Ok(PublishOutcome::Committed {
            edit_id: committed.id,
            track: request.track.clone(),
            version_codes,
        })
    }
}
