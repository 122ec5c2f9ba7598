//! In-memory Play API that records every call.

#![allow(dead_code)]

use play_publish::error::{RemoteError, Result};
use play_publish::play::types::{
    Apk, AppEdit, Bundle, DeobfuscationFileType, InternalAppSharingArtifact, Track,
};
use play_publish::{PlayApi, UploadSource};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Scripted store double
pub struct FakePlay {
    calls: Mutex<Vec<String>>,
    tracks: Vec<String>,
    edit_id: Option<String>,
    commit_id: Option<String>,
    version_codes: Mutex<VecDeque<Option<i64>>>,
    next_version_code: Mutex<i64>,
    download_url: Option<String>,
    reject: Option<(&'static str, u16)>,
    updated_tracks: Mutex<Vec<Track>>,
    attachments: Mutex<Vec<(i64, DeobfuscationFileType, String)>>,
}

impl FakePlay {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            tracks: ["production", "beta", "alpha", "internal"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            edit_id: Some("edit-1".to_string()),
            commit_id: Some("edit-1".to_string()),
            version_codes: Mutex::new(VecDeque::new()),
            next_version_code: Mutex::new(100),
            download_url: Some("https://play.google.com/apps/test/share".to_string()),
            reject: None,
            updated_tracks: Mutex::new(Vec::new()),
            attachments: Mutex::new(Vec::new()),
        }
    }

    /// Return these version codes from successive uploads
    pub fn with_version_codes(self, codes: Vec<Option<i64>>) -> Self {
        *self.version_codes.lock().unwrap() = codes.into();
        self
    }

    pub fn with_edit_id(mut self, id: Option<&str>) -> Self {
        self.edit_id = id.map(str::to_string);
        self
    }

    pub fn with_commit_id(mut self, id: Option<&str>) -> Self {
        self.commit_id = id.map(str::to_string);
        self
    }

    pub fn with_download_url(mut self, url: Option<&str>) -> Self {
        self.download_url = url.map(str::to_string);
        self
    }

    /// Fail the named operation with this HTTP status
    pub fn rejecting(mut self, operation: &'static str, status: u16) -> Self {
        self.reject = Some((operation, status));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| *c == operation).count()
    }

    pub fn updated_tracks(&self) -> Vec<Track> {
        self.updated_tracks.lock().unwrap().clone()
    }

    pub fn attachments(&self) -> Vec<(i64, DeobfuscationFileType, String)> {
        self.attachments.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        match self.reject {
            Some((rejected, status)) if rejected == operation => Err(RemoteError::Rejected {
                operation,
                status,
                body: format!("{operation} refused"),
            }
            .into()),
            _ => Ok(()),
        }
    }

    fn next_code(&self) -> Option<i64> {
        if let Some(scripted) = self.version_codes.lock().unwrap().pop_front() {
            return scripted;
        }
        let mut next = self.next_version_code.lock().unwrap();
        *next += 1;
        Some(*next)
    }

    fn share(&self, source: &UploadSource) -> InternalAppSharingArtifact {
        let name = match source {
            UploadSource::File(path) => file_name(path),
            UploadSource::Memory { name, .. } => name.clone(),
        };
        InternalAppSharingArtifact {
            download_url: self
                .download_url
                .as_ref()
                .map(|base| if base.is_empty() { String::new() } else { format!("{base}/{name}") }),
            ..Default::default()
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl PlayApi for FakePlay {
    async fn create_edit(&self, _package_name: &str) -> Result<AppEdit> {
        self.record("create-edit")?;
        Ok(AppEdit {
            id: self.edit_id.clone(),
            expiry_time_seconds: Some("1900000000".to_string()),
        })
    }

    async fn list_tracks(&self, _package_name: &str, _edit_id: &str) -> Result<Vec<Track>> {
        self.record("list-tracks")?;
        Ok(self
            .tracks
            .iter()
            .map(|t| Track {
                track: t.clone(),
                releases: Vec::new(),
            })
            .collect())
    }

    async fn update_track(&self, _package_name: &str, _edit_id: &str, track: &Track) -> Result<Track> {
        self.record("update-track")?;
        self.updated_tracks.lock().unwrap().push(track.clone());
        Ok(track.clone())
    }

    async fn commit_edit(
        &self,
        _package_name: &str,
        _edit_id: &str,
        _changes_not_sent_for_review: bool,
    ) -> Result<AppEdit> {
        self.record("commit-edit")?;
        Ok(AppEdit {
            id: self.commit_id.clone(),
            expiry_time_seconds: None,
        })
    }

    async fn upload_apk(&self, _package_name: &str, _edit_id: &str, _source: UploadSource) -> Result<Apk> {
        self.record("upload-apk")?;
        Ok(Apk {
            version_code: self.next_code(),
        })
    }

    async fn upload_bundle(
        &self,
        _package_name: &str,
        _edit_id: &str,
        _source: UploadSource,
    ) -> Result<Bundle> {
        self.record("upload-bundle")?;
        Ok(Bundle {
            version_code: self.next_code(),
            sha256: None,
        })
    }

    async fn upload_deobfuscation_file(
        &self,
        _package_name: &str,
        _edit_id: &str,
        version_code: i64,
        file_type: DeobfuscationFileType,
        source: UploadSource,
    ) -> Result<()> {
        let operation = match file_type {
            DeobfuscationFileType::Proguard => "upload-mapping-file",
            DeobfuscationFileType::NativeCode => "upload-debug-symbols",
        };
        self.record(operation)?;
        self.attachments
            .lock()
            .unwrap()
            .push((version_code, file_type, source.describe()));
        Ok(())
    }

    async fn share_apk(
        &self,
        _package_name: &str,
        source: UploadSource,
    ) -> Result<InternalAppSharingArtifact> {
        self.record("internal-sharing-upload-apk")?;
        Ok(self.share(&source))
    }

    async fn share_bundle(
        &self,
        _package_name: &str,
        source: UploadSource,
    ) -> Result<InternalAppSharingArtifact> {
        self.record("internal-sharing-upload-bundle")?;
        Ok(self.share(&source))
    }
}

/// Create empty files with the given names
pub fn artifacts(dir: &TempDir, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.path().join(name);
            std::fs::write(&path, name.as_bytes()).expect("failed to write artifact");
            path
        })
        .collect()
}
