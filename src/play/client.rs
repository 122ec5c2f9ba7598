//! HTTP implementation of [`PlayApi`] for the Android Publisher v3 API.

use super::types::{
    Apk, AppEdit, Bundle, DeobfuscationFileType, InternalAppSharingArtifact, Track,
    TracksListResponse,
};
use super::{PlayApi, UploadSource};
use crate::error::{LocalIoError, RemoteError, Result};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio_util::io::ReaderStream;
use url::Url;

const API_PREFIX: &str = "androidpublisher/v3/applications";
const UPLOAD_PREFIX: &str = "upload/androidpublisher/v3/applications";

/// Authenticated Android Publisher client
///
/// Holds a bearer token obtained elsewhere; no token refresh is attempted.
#[derive(Clone)]
pub struct PlayClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl std::fmt::Debug for PlayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayClient")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl PlayClient {
    /// Production endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://androidpublisher.googleapis.com/";

    /// Create a client for the production endpoint
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(access_token, Self::DEFAULT_BASE_URL)
    }

    /// Create a client for a custom endpoint
    pub fn with_base_url(access_token: impl Into<String>, base_url: &str) -> Result<Self> {
        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|e| RemoteError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| RemoteError::Transport {
                operation: "client-init",
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            access_token: access_token.into(),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            RemoteError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn media_endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().append_pair("uploadType", "media");
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        self.http.request(method, url).bearer_auth(&self.access_token)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|source| RemoteError::Transport { operation, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| RemoteError::Transport { operation, source })?;

        if !status.is_success() {
            return Err(RemoteError::Rejected {
                operation,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body)
            .map_err(|source| RemoteError::InvalidResponse { operation, source }.into())
    }

    async fn upload<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
        source: UploadSource,
    ) -> Result<T> {
        log::debug!("{}: sending {}", operation, source.describe());
        let (body, length) = media_body(source).await?;
        let request = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, length)
            .body(body);
        self.send(operation, request).await
    }
}

/// Build a request body; files are streamed and closed with the request
async fn media_body(source: UploadSource) -> Result<(Body, u64)> {
    match source {
        UploadSource::File(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .map_err(|e| LocalIoError::read(&path, e))?;
            let length = file
                .metadata()
                .await
                .map_err(|e| LocalIoError::read(&path, e))?
                .len();
            Ok((Body::wrap_stream(ReaderStream::new(file)), length))
        }
        UploadSource::Memory { bytes, .. } => {
            let length = bytes.len() as u64;
            Ok((Body::from(bytes), length))
        }
    }
}

impl PlayApi for PlayClient {
    async fn create_edit(&self, package_name: &str) -> Result<AppEdit> {
        let url = self.endpoint(&format!("{API_PREFIX}/{package_name}/edits"))?;
        let request = self.request(Method::POST, url).json(&serde_json::json!({}));
        self.send("create-edit", request).await
    }

    async fn list_tracks(&self, package_name: &str, edit_id: &str) -> Result<Vec<Track>> {
        let url = self.endpoint(&format!("{API_PREFIX}/{package_name}/edits/{edit_id}/tracks"))?;
        let response: TracksListResponse = self
            .send("list-tracks", self.request(Method::GET, url))
            .await?;
        Ok(response.tracks)
    }

    async fn update_track(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &Track,
    ) -> Result<Track> {
        let url = self.endpoint(&format!(
            "{API_PREFIX}/{package_name}/edits/{edit_id}/tracks/{}",
            track.track
        ))?;
        let request = self.request(Method::PUT, url).json(track);
        self.send("update-track", request).await
    }

    async fn commit_edit(
        &self,
        package_name: &str,
        edit_id: &str,
        changes_not_sent_for_review: bool,
    ) -> Result<AppEdit> {
        let mut url = self.endpoint(&format!("{API_PREFIX}/{package_name}/edits/{edit_id}:commit"))?;
        url.query_pairs_mut().append_pair(
            "changesNotSentForReview",
            if changes_not_sent_for_review { "true" } else { "false" },
        );
        let request = self
            .request(Method::POST, url)
            .header(CONTENT_LENGTH, 0);
        self.send("commit-edit", request).await
    }

    async fn upload_apk(
        &self,
        package_name: &str,
        edit_id: &str,
        source: UploadSource,
    ) -> Result<Apk> {
        let url = self.media_endpoint(&format!("{UPLOAD_PREFIX}/{package_name}/edits/{edit_id}/apks"))?;
        self.upload("upload-apk", url, source).await
    }

    async fn upload_bundle(
        &self,
        package_name: &str,
        edit_id: &str,
        source: UploadSource,
    ) -> Result<Bundle> {
        let url =
            self.media_endpoint(&format!("{UPLOAD_PREFIX}/{package_name}/edits/{edit_id}/bundles"))?;
        self.upload("upload-bundle", url, source).await
    }

    async fn upload_deobfuscation_file(
        &self,
        package_name: &str,
        edit_id: &str,
        version_code: i64,
        file_type: DeobfuscationFileType,
        source: UploadSource,
    ) -> Result<()> {
        let url = self.media_endpoint(&format!(
            "{UPLOAD_PREFIX}/{package_name}/edits/{edit_id}/apks/{version_code}/deobfuscationFiles/{}",
            file_type.as_str()
        ))?;
        let operation = match file_type {
            DeobfuscationFileType::Proguard => "upload-mapping-file",
            DeobfuscationFileType::NativeCode => "upload-debug-symbols",
        };
        let _: serde_json::Value = self.upload(operation, url, source).await?;
        Ok(())
    }

    async fn share_apk(
        &self,
        package_name: &str,
        source: UploadSource,
    ) -> Result<InternalAppSharingArtifact> {
        let url = self.media_endpoint(&format!(
            "{UPLOAD_PREFIX}/internalappsharing/{package_name}/artifacts/apk"
        ))?;
        self.upload("internal-sharing-upload-apk", url, source).await
    }

    async fn share_bundle(
        &self,
        package_name: &str,
        source: UploadSource,
    ) -> Result<InternalAppSharingArtifact> {
        let url = self.media_endpoint(&format!(
            "{UPLOAD_PREFIX}/internalappsharing/{package_name}/artifacts/bundle"
        ))?;
        self.upload("internal-sharing-upload-bundle", url, source).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = PlayClient::with_base_url("token", "http://127.0.0.1:9000/prefix").unwrap();
        let url = client
            .endpoint("androidpublisher/v3/applications/com.example/edits")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/prefix/androidpublisher/v3/applications/com.example/edits"
        );
    }

    #[test]
    fn test_media_endpoint_sets_upload_type() {
        let client = PlayClient::new("token").unwrap();
        let url = client.media_endpoint("upload/x").unwrap();
        assert_eq!(url.query(), Some("uploadType=media"));
    }

    #[test]
    fn test_commit_path_keeps_colon_suffix() {
        let client = PlayClient::new("token").unwrap();
        let url = client
            .endpoint("androidpublisher/v3/applications/com.example/edits/e1:commit")
            .unwrap();
        assert!(url.path().ends_with("/edits/e1:commit"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(PlayClient::with_base_url("token", "not a url").is_err());
    }
}
