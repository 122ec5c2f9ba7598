//! Per-artifact upload into an edit.

use super::edit::EditSession;
use crate::artifact::{self, ArtifactKind};
use crate::error::{RemoteError, Result};
use crate::play::{DeobfuscationFileType, PlayApi, UploadSource};
use std::path::{Path, PathBuf};

/// Uploads release files into an edit, one at a time
///
/// Each file's attachments are addressed by the version code its upload
/// returned, so a file is fully processed before the next one starts.
pub struct ReleaseUploader<'s, 'a, P: PlayApi> {
    edit: &'s EditSession<'a, P>,
    mapping_file: Option<PathBuf>,
    debug_symbols: Option<UploadSource>,
}

impl<'s, 'a, P: PlayApi> ReleaseUploader<'s, 'a, P> {
    /// Uploader without attachments
    pub fn new(edit: &'s EditSession<'a, P>) -> Self {
        Self {
            edit,
            mapping_file: None,
            debug_symbols: None,
        }
    }

    /// Attach this mapping file to every uploaded version code
    pub fn with_mapping_file(mut self, path: Option<&Path>) -> Self {
        self.mapping_file = path.map(Path::to_path_buf);
        self
    }

    /// Attach these prepared debug symbols to every uploaded version code
    pub fn with_debug_symbols(mut self, symbols: Option<UploadSource>) -> Self {
        self.debug_symbols = symbols;
        self
    }

    /// Upload every file in order, returning version codes in the same order
    pub async fn upload_all(&self, files: &[PathBuf]) -> Result<Vec<i64>> {
        let mut version_codes = Vec::with_capacity(files.len());
        for file in files {
            version_codes.push(self.upload_one(file).await?);
        }
        Ok(version_codes)
    }

    /// Upload one file and its attachments
    pub async fn upload_one(&self, file: &Path) -> Result<i64> {
        let api = self.edit.api();
        let package_name = self.edit.package_name();
        let edit_id = self.edit.id();
        let source = UploadSource::File(file.to_path_buf());

        let (operation, version_code) = match ArtifactKind::of(file) {
            ArtifactKind::Apk => (
                "upload-apk",
                api.upload_apk(package_name, edit_id, source).await?.version_code,
            ),
            ArtifactKind::Bundle => (
                "upload-bundle",
                api.upload_bundle(package_name, edit_id, source)
                    .await?
                    .version_code,
            ),
            ArtifactKind::Unsupported => return Err(artifact::unsupported(file)),
        };

        let version_code = version_code
            .filter(|code| *code > 0)
            .ok_or(RemoteError::IncompleteResponse {
                operation,
                missing: "version code",
            })?;
        log::info!("Uploaded {} as version code {}", file.display(), version_code);

        self.attach_mapping_file(version_code).await?;
        self.attach_debug_symbols(version_code).await?;

        Ok(version_code)
    }

    async fn attach_mapping_file(&self, version_code: i64) -> Result<()> {
        let Some(mapping_file) = &self.mapping_file else {
            return Ok(());
        };

        self.edit
            .api()
            .upload_deobfuscation_file(
                self.edit.package_name(),
                self.edit.id(),
                version_code,
                DeobfuscationFileType::Proguard,
                UploadSource::File(mapping_file.clone()),
            )
            .await?;
        log::info!("Attached mapping file to version code {}", version_code);
        Ok(())
    }

    async fn attach_debug_symbols(&self, version_code: i64) -> Result<()> {
        let Some(symbols) = &self.debug_symbols else {
            return Ok(());
        };

        self.edit
            .api()
            .upload_deobfuscation_file(
                self.edit.package_name(),
                self.edit.id(),
                version_code,
                DeobfuscationFileType::NativeCode,
                symbols.clone(),
            )
            .await?;
        log::info!("Attached debug symbols to version code {}", version_code);
        Ok(())
    }
}
