//! Track release assignment.

use super::edit::EditSession;
use crate::config::PublishRequest;
use crate::error::Result;
use crate::play::{LocalizedText, PlayApi, Track, TrackRelease};

/// Describe the release for the configured track
///
/// Zero version codes mark failed uploads and are never sent.
pub fn build_release(
    request: &PublishRequest,
    version_codes: &[i64],
    release_notes: Vec<LocalizedText>,
) -> TrackRelease {
    TrackRelease {
        name: request.release_name.clone(),
        version_codes: version_codes
            .iter()
            .filter(|code| **code != 0)
            .map(i64::to_string)
            .collect(),
        status: Some(request.effective_status()),
        user_fraction: request.user_fraction,
        release_notes,
        in_app_update_priority: Some(request.in_app_update_priority),
    }
}

/// Put the release on the request's track
///
/// The returned track is what the store reports back, for logging only.
pub async fn assign_track<P: PlayApi>(
    edit: &EditSession<'_, P>,
    request: &PublishRequest,
    version_codes: &[i64],
    release_notes: Vec<LocalizedText>,
) -> Result<Track> {
    let release = build_release(request, version_codes, release_notes);
    log::info!(
        "Assigning version code(s) [{}] to track '{}' with status {}",
        release.version_codes.join(", "),
        request.track,
        request.effective_status()
    );

    let track = Track {
        track: request.track.clone(),
        releases: vec![release],
    };
    edit.api()
        .update_track(edit.package_name(), edit.id(), &track)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseStatus;

    #[test]
    fn test_zero_version_codes_filtered() {
        let request = PublishRequest::new("com.example", "beta", vec!["a.aab".into()]);
        let release = build_release(&request, &[0, 12, 0, 13], Vec::new());
        assert_eq!(release.version_codes, vec!["12", "13"]);
    }

    #[test]
    fn test_defaults_to_completed_without_fraction() {
        let request = PublishRequest::new("com.example", "beta", vec!["a.aab".into()]);
        let release = build_release(&request, &[1], Vec::new());
        assert_eq!(release.status, Some(ReleaseStatus::Completed));
        assert_eq!(release.user_fraction, None);
        assert_eq!(release.in_app_update_priority, Some(0));
    }

    #[test]
    fn test_defaults_to_in_progress_with_fraction() {
        let request = PublishRequest {
            user_fraction: Some(0.2),
            release_name: Some("2.0 staged".to_string()),
            in_app_update_priority: 4,
            ..PublishRequest::new("com.example", "production", vec!["a.aab".into()])
        };
        let release = build_release(&request, &[7], Vec::new());
        assert_eq!(release.status, Some(ReleaseStatus::InProgress));
        assert_eq!(release.user_fraction, Some(0.2));
        assert_eq!(release.name.as_deref(), Some("2.0 staged"));
        assert_eq!(release.in_app_update_priority, Some(4));
    }
}
