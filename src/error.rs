//! Error types for play_publish operations.
//!
//! Every failure is fatal for the run. Errors are grouped by where they are
//! detected: before any remote call (configuration), at the store (remote),
//! or on the local filesystem. Each carries the most specific diagnostic
//! available so the operator can act on it directly.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for play_publish operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Main error type for all play_publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// Invalid request configuration, detected without any remote call
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store rejected a call or answered with an incomplete body
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Local file access failures
    #[error("Local I/O error: {0}")]
    LocalIo(#[from] LocalIoError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),
}

/// Request configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A rollout fraction was given for a terminal status
    #[error("Status '{status}' does not accept a user fraction (got {fraction})")]
    FractionNotAllowed {
        /// Configured status
        status: String,
        /// Configured fraction
        fraction: f64,
    },

    /// A partial rollout status was given without a rollout fraction
    #[error("Status '{status}' requires a user fraction")]
    FractionRequired {
        /// Configured status
        status: String,
    },

    /// Rollout fraction outside [0.0, 1.0]
    #[error("User fraction must be between 0.0 and 1.0, got {fraction}")]
    FractionOutOfRange {
        /// Configured fraction
        fraction: f64,
    },

    /// In-app update priority outside 0..=5
    #[error("In-app update priority must be between 0 and 5, got {priority}")]
    PriorityOutOfRange {
        /// Configured priority
        priority: u8,
    },

    /// Status string not recognized
    #[error("Unknown release status '{value}'. Expected one of: completed, draft, halted, inProgress")]
    UnknownStatus {
        /// Raw value
        value: String,
    },

    /// Artifact name has neither the package nor the bundle suffix
    #[error("Unsupported release file '{path}': expected a .apk or .aab file")]
    UnclassifiableArtifact {
        /// Offending file
        path: PathBuf,
    },

    /// No release files were supplied
    #[error("No release files were provided")]
    NoReleaseFiles,

    /// Two release-notes files resolve to the same locale
    #[error("Duplicate release notes for locale '{locale}': {first} and {second}")]
    DuplicateReleaseNotesLocale {
        /// Locale tag
        locale: String,
        /// File seen first
        first: PathBuf,
        /// File seen second
        second: PathBuf,
    },
}

/// Remote store errors
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Non-success HTTP status
    #[error("{operation} failed with status {status}: {body}")]
    Rejected {
        /// Remote operation name
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Response text as returned by the store
        body: String,
    },

    /// Success status but the body lacks a required field
    #[error("{operation} returned no {missing}")]
    IncompleteResponse {
        /// Remote operation name
        operation: &'static str,
        /// Missing field description
        missing: &'static str,
    },

    /// Requested track is not known for the application
    #[error("Track '{track}' not found. Available tracks: {}", available.join(", "))]
    UnknownTrack {
        /// Requested track
        track: String,
        /// Tracks returned by the store
        available: Vec<String>,
    },

    /// Request never produced a response
    #[error("{operation} transport failure: {source}")]
    Transport {
        /// Remote operation name
        operation: &'static str,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be decoded
    #[error("{operation} returned an unreadable body: {source}")]
    InvalidResponse {
        /// Remote operation name
        operation: &'static str,
        /// Decoding error
        #[source]
        source: serde_json::Error,
    },

    /// Base URL could not be combined with an endpoint path
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl {
        /// URL that failed to parse
        url: String,
        /// Parser message
        reason: String,
    },
}

/// Local filesystem errors
#[derive(Error, Debug)]
pub enum LocalIoError {
    /// Release file pattern matched nothing
    #[error("Release file pattern '{pattern}' did not match any file")]
    NoGlobMatch {
        /// Glob pattern
        pattern: String,
    },

    /// Release file pattern is malformed
    #[error("Invalid release file pattern '{pattern}': {reason}")]
    InvalidGlob {
        /// Glob pattern
        pattern: String,
        /// Parser message
        reason: String,
    },

    /// Configured file does not exist
    #[error("File not found: {path}")]
    MissingFile {
        /// Expected path
        path: PathBuf,
    },

    /// File or directory could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Failed to walk {path}: {source}")]
    Walk {
        /// Directory being walked
        path: PathBuf,
        /// Underlying error
        #[source]
        source: walkdir::Error,
    },

    /// Archive creation failed
    #[error("Failed to archive {path}: {source}")]
    Archive {
        /// Directory being archived
        path: PathBuf,
        /// Underlying error
        #[source]
        source: zip::result::ZipError,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl LocalIoError {
    /// Wrap an I/O error with the path it concerns
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

impl PublishError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::Config(ConfigError::FractionRequired { .. }) => vec![
                "Set --user-fraction to a value between 0.0 and 1.0".to_string(),
                "Or use --status completed / draft for a full release".to_string(),
            ],
            PublishError::Config(ConfigError::FractionNotAllowed { .. }) => vec![
                "Remove --user-fraction, or use --status inProgress / halted".to_string(),
            ],
            PublishError::Config(ConfigError::UnclassifiableArtifact { .. }) => vec![
                "Only .apk and .aab files can be uploaded".to_string(),
                "Tighten --release-files so it matches build outputs only".to_string(),
            ],
            PublishError::Remote(RemoteError::UnknownTrack { available, .. }) => vec![
                format!("Use one of: {}", available.join(", ")),
                "Custom tracks must be created in the Play Console first".to_string(),
            ],
            PublishError::Remote(RemoteError::Rejected { status: 401 | 403, .. }) => vec![
                "Verify the access token is valid and not expired".to_string(),
                "Ensure the service account has release permissions for this app".to_string(),
            ],
            PublishError::Remote(RemoteError::Rejected { status: 404, .. }) => vec![
                "Check --package-name matches an app in your Play Console".to_string(),
                "An --existing-edit-id may have expired; omit it to open a new edit".to_string(),
            ],
            PublishError::LocalIo(LocalIoError::NoGlobMatch { .. }) => vec![
                "Check the build produced the expected artifacts".to_string(),
                "Patterns are resolved relative to the working directory".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_track_lists_available() {
        let err = PublishError::from(RemoteError::UnknownTrack {
            track: "beta2".to_string(),
            available: vec!["production".to_string(), "beta".to_string()],
        });
        let message = err.to_string();
        assert!(message.contains("beta2"));
        assert!(message.contains("production, beta"));
        assert!(err.recovery_suggestions()[0].contains("production, beta"));
    }

    #[test]
    fn test_rejection_surfaces_remote_text() {
        let err = PublishError::from(RemoteError::Rejected {
            operation: "commit-edit",
            status: 400,
            body: "{\"error\":\"edit expired\"}".to_string(),
        });
        assert!(err.to_string().contains("edit expired"));
    }
}
