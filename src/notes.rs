//! Localized release notes ("what's new") discovery.
//!
//! A notes directory holds one file per locale named `whatsnew-<locale>`,
//! optionally with a `.txt` suffix. Other entries are ignored.

use crate::error::{ConfigError, LocalIoError, Result};
use crate::play::LocalizedText;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name prefix of a release notes file
pub const WHATS_NEW_PREFIX: &str = "whatsnew-";

/// Extract the locale from a release notes file name
pub fn locale_from_file_name(name: &str) -> Option<&str> {
    let locale = name.strip_prefix(WHATS_NEW_PREFIX)?;
    let locale = locale.strip_suffix(".txt").unwrap_or(locale);
    (!locale.is_empty()).then_some(locale)
}

/// Load every release notes file from `dir`, sorted by locale
///
/// No directory means no notes. Two files for the same locale are rejected.
pub async fn load_release_notes(dir: Option<&Path>) -> Result<Vec<LocalizedText>> {
    let Some(dir) = dir else {
        return Ok(Vec::new());
    };

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| LocalIoError::read(dir, e))?;
    let mut notes: BTreeMap<String, (PathBuf, String)> = BTreeMap::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| LocalIoError::read(dir, e))?
    {
        let path = entry.path();
        let file_name = entry.file_name();
        let Some(locale) = file_name.to_str().and_then(locale_from_file_name) else {
            log::debug!("Ignoring {} (not a release notes file)", path.display());
            continue;
        };

        let is_file = tokio::fs::metadata(&path)
            .await
            .map_err(|e| LocalIoError::read(&path, e))?
            .is_file();
        if !is_file {
            log::debug!("Ignoring {} (not a regular file)", path.display());
            continue;
        }

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LocalIoError::read(&path, e))?;

        if let Some((first, _)) = notes.get(locale) {
            return Err(ConfigError::DuplicateReleaseNotesLocale {
                locale: locale.to_string(),
                first: first.clone(),
                second: path,
            }
            .into());
        }
        log::debug!("Release notes for {} from {}", locale, path.display());
        notes.insert(locale.to_string(), (path, text));
    }

    Ok(notes
        .into_iter()
        .map(|(language, (_, text))| LocalizedText { language, text })
        .collect())
}
