//! Durable storage for uploaded project files.
//!
//! Uploaded annotation and guidelines files are written under the configured
//! upload directory with a UUID prefix so colliding client filenames never
//! overwrite each other. The stored path is what gets persisted on the
//! project record and re-read by the workset and export views.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Reduce a client-supplied filename to its final component.
///
/// Strips directory parts so a crafted filename cannot escape the upload
/// directory; falls back to a fixed name when nothing usable remains.
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    if base.is_empty() {
        "upload".to_string()
    } else {
        base
    }
}

/// Persist uploaded bytes under `dir`, returning the stored path.
///
/// A write failure here is fatal to the calling operation; no partial
/// project may become visible on top of a missing file.
pub async fn save_upload(dir: &Path, original_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let filename = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
    let path = dir.join(filename);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

/// Remove a stored file.
///
/// An already-missing file is treated as removed; any other failure is
/// surfaced so the caller can abort (project deletion must not proceed past
/// a file it could not remove).
pub async fn remove_stored(path: &str) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
