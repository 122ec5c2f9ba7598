//! Google Play Developer API access.
//!
//! [`PlayApi`] is the seam between the publish workflow and the store. The
//! workflow only ever talks to this trait; [`PlayClient`] is the HTTP
//! implementation and tests substitute their own.

mod client;
pub mod types;

pub use client::PlayClient;
pub use types::{
    Apk, AppEdit, Bundle, DeobfuscationFileType, InternalAppSharingArtifact, LocalizedText, Track,
    TrackRelease,
};

use crate::error::Result;
use bytes::Bytes;
use std::path::PathBuf;

/// Content of a media upload
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// Streamed from disk when the request is sent
    File(PathBuf),
    /// Already in memory, e.g. a freshly built archive
    Memory {
        /// Label for logs and errors
        name: String,
        /// Payload
        bytes: Bytes,
    },
}

impl UploadSource {
    /// Human-readable label
    pub fn describe(&self) -> String {
        match self {
            UploadSource::File(path) => path.display().to_string(),
            UploadSource::Memory { name, bytes } => format!("{name} ({} bytes)", bytes.len()),
        }
    }
}

/// Remote operations used by the publish workflow
///
/// Implementations report transport failures and non-success statuses as
/// errors. They return bodies as received; checking for missing identifiers,
/// version codes or URLs is the caller's job.
#[allow(async_fn_in_trait)]
pub trait PlayApi {
    /// Open a new edit
    async fn create_edit(&self, package_name: &str) -> Result<AppEdit>;

    /// List every track known for the application
    async fn list_tracks(&self, package_name: &str, edit_id: &str) -> Result<Vec<Track>>;

    /// Replace the releases on a track
    async fn update_track(&self, package_name: &str, edit_id: &str, track: &Track)
    -> Result<Track>;

    /// Commit an edit
    async fn commit_edit(
        &self,
        package_name: &str,
        edit_id: &str,
        changes_not_sent_for_review: bool,
    ) -> Result<AppEdit>;

    /// Upload an APK into an edit
    async fn upload_apk(&self, package_name: &str, edit_id: &str, source: UploadSource)
    -> Result<Apk>;

    /// Upload an app bundle into an edit
    async fn upload_bundle(
        &self,
        package_name: &str,
        edit_id: &str,
        source: UploadSource,
    ) -> Result<Bundle>;

    /// Attach a deobfuscation file to an uploaded version code
    async fn upload_deobfuscation_file(
        &self,
        package_name: &str,
        edit_id: &str,
        version_code: i64,
        file_type: DeobfuscationFileType,
        source: UploadSource,
    ) -> Result<()>;

    /// Upload an APK for internal app sharing
    async fn share_apk(
        &self,
        package_name: &str,
        source: UploadSource,
    ) -> Result<InternalAppSharingArtifact>;

    /// Upload an app bundle for internal app sharing
    async fn share_bundle(
        &self,
        package_name: &str,
        source: UploadSource,
    ) -> Result<InternalAppSharingArtifact>;
}
