//! Edit (changeset) lifecycle.
//!
//! An [`EditSession`] is a pending edit. Committing consumes it, so no
//! operation can be issued against an edit after its commit.

use crate::error::{RemoteError, Result};
use crate::play::PlayApi;

/// A pending edit on one application
#[derive(Debug)]
pub struct EditSession<'a, P: PlayApi> {
    api: &'a P,
    package_name: &'a str,
    id: String,
}

/// An edit that has been committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEdit {
    /// Identifier returned by the commit call
    pub id: String,
}

impl<'a, P: PlayApi> EditSession<'a, P> {
    /// Reuse `existing_id` when given, otherwise open a new edit
    ///
    /// Creation is not retried: a blind retry could leave a second pending
    /// edit behind.
    pub async fn obtain_or_reuse(
        api: &'a P,
        package_name: &'a str,
        existing_id: Option<&str>,
    ) -> Result<Self> {
        if let Some(id) = existing_id.filter(|id| !id.is_empty()) {
            log::info!("Reusing edit {} for {}", id, package_name);
            return Ok(Self {
                api,
                package_name,
                id: id.to_string(),
            });
        }

        let edit = api.create_edit(package_name).await?;
        let id = edit
            .edit_id()
            .ok_or(RemoteError::IncompleteResponse {
                operation: "create-edit",
                missing: "edit id",
            })?
            .to_string();

        match edit.expires_at() {
            Some(expiry) => log::info!("Created edit {} (expires {})", id, expiry.to_rfc3339()),
            None => log::info!("Created edit {}", id),
        }

        Ok(Self {
            api,
            package_name,
            id,
        })
    }

    /// Edit identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Application the edit belongs to
    pub fn package_name(&self) -> &'a str {
        self.package_name
    }

    pub(crate) fn api(&self) -> &'a P {
        self.api
    }

    /// Fail unless `track` is one of the application's tracks
    pub async fn validate_track(&self, track: &str) -> Result<()> {
        let tracks = self.api.list_tracks(self.package_name, &self.id).await?;
        if tracks.iter().any(|t| t.track == track) {
            log::info!("Track '{}' found among {} track(s)", track, tracks.len());
            return Ok(());
        }

        Err(RemoteError::UnknownTrack {
            track: track.to_string(),
            available: tracks.into_iter().map(|t| t.track).collect(),
        }
        .into())
    }

    /// Commit the edit
    ///
    /// A success response without an edit id counts as a failed commit.
    pub async fn commit(self, changes_not_sent_for_review: bool) -> Result<CommittedEdit> {
        let edit = self
            .api
            .commit_edit(self.package_name, &self.id, changes_not_sent_for_review)
            .await?;
        let id = edit
            .edit_id()
            .ok_or(RemoteError::IncompleteResponse {
                operation: "commit-edit",
                missing: "edit id",
            })?
            .to_string();

        log::info!("Committed edit {}", id);
        Ok(CommittedEdit { id })
    }
}
