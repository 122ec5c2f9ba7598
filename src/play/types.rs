//! Android Publisher v3 wire models.
//!
//! Only the fields this tool reads or writes are modelled. Response fields
//! are optional because the store may omit them; callers decide which
//! omissions are failures.

use crate::config::ReleaseStatus;
use serde::{Deserialize, Serialize};

/// A pending edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEdit {
    /// Edit identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Expiry as seconds since the epoch, encoded as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time_seconds: Option<String>,
}

impl AppEdit {
    /// Identifier, treating an empty string as absent
    pub fn edit_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Expiry time, when present and well-formed
    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let seconds = self.expiry_time_seconds.as_deref()?.parse::<i64>().ok()?;
        chrono::DateTime::from_timestamp(seconds, 0)
    }
}

/// Response of the track listing call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracksListResponse {
    /// Tracks configured for the application
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// A distribution track and its releases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Track name
    #[serde(default)]
    pub track: String,
    /// Releases on the track
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub releases: Vec<TrackRelease>,
}

/// One release on a track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRelease {
    /// Release name shown in the console
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Version codes, as decimal strings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub version_codes: Vec<String>,
    /// Rollout status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReleaseStatus>,
    /// Staged rollout fraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fraction: Option<f64>,
    /// Per-locale release notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub release_notes: Vec<LocalizedText>,
    /// In-app update priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_app_update_priority: Option<u8>,
}

/// Text in one locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    /// BCP-47 locale tag, e.g. `en-US`
    pub language: String,
    /// Text content
    pub text: String,
}

/// Result of an APK upload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apk {
    /// Version code assigned by the store
    #[serde(default)]
    pub version_code: Option<i64>,
}

/// Result of an app bundle upload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Version code assigned by the store
    #[serde(default)]
    pub version_code: Option<i64>,
    /// SHA-256 of the uploaded bundle
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Result of an internal app sharing upload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAppSharingArtifact {
    /// Direct download link
    #[serde(default)]
    pub download_url: Option<String>,
    /// Signing certificate fingerprint
    #[serde(default)]
    pub certificate_fingerprint: Option<String>,
    /// SHA-256 of the uploaded artifact
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Kind of deobfuscation file attached to a version code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeobfuscationFileType {
    /// ProGuard/R8 mapping
    Proguard,
    /// Native debug symbols
    NativeCode,
}

impl DeobfuscationFileType {
    /// Path segment used by the upload endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            DeobfuscationFileType::Proguard => "proguard",
            DeobfuscationFileType::NativeCode => "nativeCode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_release_wire_shape() {
        let release = TrackRelease {
            name: Some("1.2.0".to_string()),
            version_codes: vec!["42".to_string()],
            status: Some(ReleaseStatus::InProgress),
            user_fraction: Some(0.1),
            release_notes: vec![LocalizedText {
                language: "en-US".to_string(),
                text: "Fixes".to_string(),
            }],
            in_app_update_priority: Some(3),
        };
        let json = serde_json::to_value(&release).unwrap();
        assert_eq!(json["versionCodes"][0], "42");
        assert_eq!(json["status"], "inProgress");
        assert_eq!(json["userFraction"], 0.1);
        assert_eq!(json["inAppUpdatePriority"], 3);
        assert_eq!(json["releaseNotes"][0]["language"], "en-US");
    }

    #[test]
    fn test_absent_fields_are_not_sent() {
        let json = serde_json::to_value(TrackRelease::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_edit_expiry() {
        let edit: AppEdit =
            serde_json::from_str(r#"{"id":"abc","expiryTimeSeconds":"1700000000"}"#).unwrap();
        assert_eq!(edit.edit_id(), Some("abc"));
        assert_eq!(edit.expires_at().map(|t| t.timestamp()), Some(1_700_000_000));

        let empty: AppEdit = serde_json::from_str(r#"{"id":""}"#).unwrap();
        assert_eq!(empty.edit_id(), None);
        assert_eq!(empty.expires_at(), None);
    }
}
