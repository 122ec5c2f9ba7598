//! # Play Publish
//!
//! Publish Android release builds to Google Play.
//!
//! One run performs one publish workflow: open (or resume) an edit, upload
//! every APK or app bundle with optional mapping files and native debug
//! symbols, assign the resulting version codes to a track with a rollout
//! policy, and commit. The `internalsharing` track instead uploads each
//! artifact for internal app sharing and returns download links.
//!
//! ## Usage
//!
//! ```bash
//! play_publish --package-name com.example.app --release-files 'build/*.aab' --track beta
//! play_publish --package-name com.example.app --release-files app.apk --track internalsharing
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod notes;
pub mod play;
pub mod publish;
pub mod symbols;

pub use artifact::ArtifactKind;
pub use config::{INTERNAL_SHARING_TRACK, PublishRequest, ReleaseStatus};
pub use error::{CliError, ConfigError, LocalIoError, PublishError, RemoteError, Result};
pub use play::{PlayApi, PlayClient, UploadSource};
pub use publish::{PublishOutcome, Publisher};
