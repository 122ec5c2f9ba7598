//! Publish request configuration and pre-flight validation.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Track name that selects internal app sharing instead of an edit
pub const INTERNAL_SHARING_TRACK: &str = "internalsharing";

/// Highest accepted in-app update priority
pub const MAX_IN_APP_UPDATE_PRIORITY: u8 = 5;

/// Release status on a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseStatus {
    /// Fully rolled out
    Completed,
    /// Not yet available to users
    Draft,
    /// Partial rollout, paused
    Halted,
    /// Partial rollout, active
    InProgress,
}

impl ReleaseStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Completed => "completed",
            ReleaseStatus::Draft => "draft",
            ReleaseStatus::Halted => "halted",
            ReleaseStatus::InProgress => "inProgress",
        }
    }

    /// Whether this status describes a staged rollout to a fraction of users
    pub fn is_partial_rollout(&self) -> bool {
        matches!(self, ReleaseStatus::Halted | ReleaseStatus::InProgress)
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseStatus {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "completed" => Ok(ReleaseStatus::Completed),
            "draft" => Ok(ReleaseStatus::Draft),
            "halted" => Ok(ReleaseStatus::Halted),
            "inProgress" => Ok(ReleaseStatus::InProgress),
            other => Err(ConfigError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Everything one publish run needs, fixed for the duration of the run
#[derive(Debug, Clone, Default)]
pub struct PublishRequest {
    /// Application package name, e.g. `com.example.app`
    pub package_name: String,
    /// Release files in upload order
    pub release_files: Vec<PathBuf>,
    /// Human-readable release name
    pub release_name: Option<String>,
    /// Target track
    pub track: String,
    /// In-app update priority, 0..=5
    pub in_app_update_priority: u8,
    /// Fraction of users receiving a staged rollout
    pub user_fraction: Option<f64>,
    /// Explicit release status
    pub status: Option<ReleaseStatus>,
    /// Directory holding `whatsnew-<locale>` files
    pub whats_new_directory: Option<PathBuf>,
    /// ProGuard/R8 mapping file
    pub mapping_file: Option<PathBuf>,
    /// Native debug symbols, a file or a directory
    pub debug_symbols: Option<PathBuf>,
    /// Commit without sending changes for review
    pub changes_not_sent_for_review: bool,
    /// Resume this edit instead of opening a new one
    pub existing_edit_id: Option<String>,
}

impl PublishRequest {
    /// Create a request with the required fields; everything else defaults
    pub fn new(
        package_name: impl Into<String>,
        track: impl Into<String>,
        release_files: Vec<PathBuf>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            track: track.into(),
            release_files,
            ..Self::default()
        }
    }

    /// Whether this run uses internal app sharing
    pub fn is_internal_sharing(&self) -> bool {
        self.track == INTERNAL_SHARING_TRACK
    }

    /// Status to put on the track release
    ///
    /// Falls back to `inProgress` when a fraction is set, `completed` otherwise.
    pub fn effective_status(&self) -> ReleaseStatus {
        match (self.status, self.user_fraction) {
            (Some(status), _) => status,
            (None, Some(_)) => ReleaseStatus::InProgress,
            (None, None) => ReleaseStatus::Completed,
        }
    }

    /// Reject invalid combinations before anything touches the network
    pub fn validate(&self) -> Result<()> {
        if self.release_files.is_empty() {
            return Err(ConfigError::NoReleaseFiles.into());
        }
        crate::artifact::ensure_all_supported(&self.release_files)?;

        if self.in_app_update_priority > MAX_IN_APP_UPDATE_PRIORITY {
            return Err(ConfigError::PriorityOutOfRange {
                priority: self.in_app_update_priority,
            }
            .into());
        }

        if let Some(fraction) = self.user_fraction
            && !(0.0..=1.0).contains(&fraction)
        {
            return Err(ConfigError::FractionOutOfRange { fraction }.into());
        }

        if let Some(status) = self.status {
            match (status.is_partial_rollout(), self.user_fraction) {
                (true, None) => {
                    return Err(ConfigError::FractionRequired {
                        status: status.to_string(),
                    }
                    .into());
                }
                (false, Some(fraction)) => {
                    return Err(ConfigError::FractionNotAllowed {
                        status: status.to_string(),
                        fraction,
                    }
                    .into());
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;

    fn request(status: Option<ReleaseStatus>, fraction: Option<f64>) -> PublishRequest {
        PublishRequest {
            status,
            user_fraction: fraction,
            ..PublishRequest::new("com.example.app", "production", vec!["app.aab".into()])
        }
    }

    #[test]
    fn test_fraction_status_matrix() {
        let statuses = [
            ReleaseStatus::Completed,
            ReleaseStatus::Draft,
            ReleaseStatus::Halted,
            ReleaseStatus::InProgress,
        ];
        for status in statuses {
            for fraction in [None, Some(0.25)] {
                let rejected = request(Some(status), fraction).validate().is_err();
                let expected = match status {
                    ReleaseStatus::Completed | ReleaseStatus::Draft => fraction.is_some(),
                    ReleaseStatus::Halted | ReleaseStatus::InProgress => fraction.is_none(),
                };
                assert_eq!(rejected, expected, "status {status} fraction {fraction:?}");
            }
        }
    }

    #[test]
    fn test_no_status_accepts_either_fraction() {
        assert!(request(None, None).validate().is_ok());
        assert!(request(None, Some(0.1)).validate().is_ok());
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(request(None, Some(0.0)).validate().is_ok());
        assert!(request(None, Some(1.0)).validate().is_ok());
        for bad in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                request(None, Some(bad)).validate(),
                Err(PublishError::Config(ConfigError::FractionOutOfRange { .. }))
            ));
        }
    }

    #[test]
    fn test_priority_bounds() {
        let mut req = request(None, None);
        req.in_app_update_priority = 5;
        assert!(req.validate().is_ok());
        req.in_app_update_priority = 6;
        assert!(matches!(
            req.validate(),
            Err(PublishError::Config(ConfigError::PriorityOutOfRange { priority: 6 }))
        ));
    }

    #[test]
    fn test_empty_release_files_rejected() {
        let req = PublishRequest::new("com.example.app", "production", Vec::new());
        assert!(matches!(
            req.validate(),
            Err(PublishError::Config(ConfigError::NoReleaseFiles))
        ));
    }

    #[test]
    fn test_effective_status() {
        assert_eq!(request(None, None).effective_status(), ReleaseStatus::Completed);
        assert_eq!(request(None, Some(0.5)).effective_status(), ReleaseStatus::InProgress);
        assert_eq!(
            request(Some(ReleaseStatus::Halted), Some(0.5)).effective_status(),
            ReleaseStatus::Halted
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("inProgress".parse::<ReleaseStatus>().unwrap(), ReleaseStatus::InProgress);
        assert_eq!("draft".parse::<ReleaseStatus>().unwrap(), ReleaseStatus::Draft);
        assert!("in-progress".parse::<ReleaseStatus>().is_err());
    }

    #[test]
    fn test_internal_sharing_detection() {
        let req = PublishRequest::new("com.example.app", "internalsharing", vec!["a.apk".into()]);
        assert!(req.is_internal_sharing());
        assert!(!request(None, None).is_internal_sharing());
    }
}
