//! Internal app sharing uploads.
//!
//! Each artifact gets its own download link. No edit is involved.

use crate::artifact::{self, ArtifactKind};
use crate::error::{RemoteError, Result};
use crate::play::{PlayApi, UploadSource};
use std::path::PathBuf;

/// Upload every file for internal sharing, returning download URLs in order
pub async fn share_artifacts<P: PlayApi>(
    api: &P,
    package_name: &str,
    files: &[PathBuf],
) -> Result<Vec<String>> {
    let mut download_urls = Vec::with_capacity(files.len());

    for file in files {
        let source = UploadSource::File(file.clone());
        let (operation, artifact) = match ArtifactKind::of(file) {
            ArtifactKind::Apk => (
                "internal-sharing-upload-apk",
                api.share_apk(package_name, source).await?,
            ),
            ArtifactKind::Bundle => (
                "internal-sharing-upload-bundle",
                api.share_bundle(package_name, source).await?,
            ),
            ArtifactKind::Unsupported => return Err(artifact::unsupported(file)),
        };

        let url = artifact
            .download_url
            .filter(|url| !url.is_empty())
            .ok_or(RemoteError::IncompleteResponse {
                operation,
                missing: "download URL",
            })?;
        log::info!("Shared {}: {}", file.display(), url);
        download_urls.push(url);
    }

    Ok(download_urls)
}
