//! Release artifact classification.
//!
//! The store exposes separate endpoints for APKs and app bundles, so every
//! upload site matches on [`ArtifactKind`] to pick one.

use crate::error::{ConfigError, Result};
use std::fmt;
use std::path::Path;

/// Upload format of a release file, decided by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Android package (`.apk`)
    Apk,
    /// Android app bundle (`.aab`)
    Bundle,
    /// Anything else; never uploaded
    Unsupported,
}

impl ArtifactKind {
    /// Classify a release file by its suffix
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("apk") => ArtifactKind::Apk,
            Some("aab") => ArtifactKind::Bundle,
            _ => ArtifactKind::Unsupported,
        }
    }

    /// Short name used in logs
    pub fn short_name(&self) -> &'static str {
        match self {
            ArtifactKind::Apk => "apk",
            ArtifactKind::Bundle => "bundle",
            ArtifactKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Error for a file that cannot be uploaded
pub(crate) fn unsupported(path: &Path) -> crate::error::PublishError {
    ConfigError::UnclassifiableArtifact {
        path: path.to_path_buf(),
    }
    .into()
}

/// Check every file up front so a bad name fails before the first upload
pub fn ensure_all_supported(paths: &[impl AsRef<Path>]) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        if ArtifactKind::of(path) == ArtifactKind::Unsupported {
            return Err(unsupported(path));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;
    use std::path::PathBuf;

    #[test]
    fn test_classification_by_suffix() {
        assert_eq!(ArtifactKind::of(Path::new("out/app-release.apk")), ArtifactKind::Apk);
        assert_eq!(ArtifactKind::of(Path::new("out/app-release.aab")), ArtifactKind::Bundle);
        assert_eq!(ArtifactKind::of(Path::new("out/app-release.zip")), ArtifactKind::Unsupported);
        assert_eq!(ArtifactKind::of(Path::new("apk")), ArtifactKind::Unsupported);
        assert_eq!(ArtifactKind::of(Path::new("app.apk.bak")), ArtifactKind::Unsupported);
    }

    #[test]
    fn test_unsupported_names_the_file() {
        let files = vec![PathBuf::from("a.aab"), PathBuf::from("notes.txt")];
        match ensure_all_supported(&files) {
            Err(PublishError::Config(ConfigError::UnclassifiableArtifact { path })) => {
                assert_eq!(path, PathBuf::from("notes.txt"));
            }
            other => panic!("expected UnclassifiableArtifact, got {other:?}"),
        }
    }
}
