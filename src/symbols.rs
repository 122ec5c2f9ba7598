//! Native debug symbol packaging.
//!
//! Symbols may be configured as a single file, uploaded as-is, or as a
//! directory, which is zipped in memory with paths relative to the directory.

use crate::error::{LocalIoError, Result};
use crate::play::UploadSource;
use bytes::Bytes;
use std::io::Cursor;
use std::path::Path;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Turn the configured symbols path into an upload payload
pub async fn prepare_debug_symbols(path: &Path) -> Result<UploadSource> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| LocalIoError::read(path, e))?;

    if !metadata.is_dir() {
        return Ok(UploadSource::File(path.to_path_buf()));
    }

    let root = path.to_path_buf();
    let archive = tokio::task::spawn_blocking(move || archive_directory(&root))
        .await
        .map_err(|e| LocalIoError::read(path, std::io::Error::other(e.to_string())))??;

    log::info!(
        "Packaged debug symbols from {} ({} bytes)",
        path.display(),
        archive.len()
    );

    Ok(UploadSource::Memory {
        name: format!("{}.zip", archive_label(path)),
        bytes: archive,
    })
}

/// Zip a directory tree into memory
///
/// Children of `root` land at the archive root. A symbolic link to a file
/// is archived with the target's content. Linked directories are never
/// descended into, so link cycles cannot cause unbounded work.
pub fn archive_directory(root: &Path) -> Result<Bytes> {
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let archive_err = |source| LocalIoError::Archive {
        path: root.to_path_buf(),
        source,
    };

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|source| LocalIoError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let name = archive_name(relative);
        let file_type = entry.file_type();
        let is_file = file_type.is_file()
            || (file_type.is_symlink()
                && entry.path().metadata().is_ok_and(|meta| meta.is_file()));

        if file_type.is_dir() {
            log::debug!("archive folder: {}/", name);
            writer.add_directory(name, options).map_err(archive_err)?;
        } else if is_file {
            log::debug!("archive file: {}", name);
            writer.start_file(name, options).map_err(archive_err)?;
            let mut file =
                std::fs::File::open(entry.path()).map_err(|e| LocalIoError::read(entry.path(), e))?;
            std::io::copy(&mut file, &mut writer).map_err(|e| LocalIoError::read(entry.path(), e))?;
        } else {
            log::warn!("Skipping {} (linked directory or special file)", entry.path().display());
        }
    }

    let cursor = writer.finish().map_err(archive_err)?;
    Ok(Bytes::from(cursor.into_inner()))
}

/// Archive member name with `/` separators on every platform
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn archive_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "symbols".to_string())
}
