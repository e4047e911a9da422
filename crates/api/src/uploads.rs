//! Product image storage on local disk.
//!
//! Uploaded images get a random UUID filename (the client-supplied name is
//! never trusted) and are served back under `/uploads/`. Deletion is
//! best-effort: a missing or locked file is logged and ignored, never
//! surfaced to the client.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Maximum accepted image size in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix uploaded files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Map an accepted image MIME type to its file extension.
///
/// Returns `None` for anything outside the JPEG/PNG/WebP whitelist.
pub fn extension_for(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Generate a random filename with the given extension.
pub fn unique_filename(extension: &str) -> String {
    format!("{}.{extension}", Uuid::new_v4())
}

/// The public URL path for a stored filename.
pub fn public_url(filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{filename}")
}

/// Resolve a stored `image_url` back to its on-disk path.
///
/// Only the final path segment is used, so a corrupted or hostile URL can
/// never escape the upload directory.
pub fn disk_path(upload_dir: &Path, image_url: &str) -> Option<PathBuf> {
    let basename = image_url.rsplit('/').next()?;
    if !is_plain_filename(basename) {
        return None;
    }
    Some(upload_dir.join(basename))
}

/// A plain filename: non-empty, no separators, no leading dot.
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

/// Write image bytes to the upload directory, returning the public URL.
pub async fn save_image(
    upload_dir: &Path,
    extension: &str,
    data: &[u8],
) -> std::io::Result<String> {
    let filename = unique_filename(extension);
    tokio::fs::write(upload_dir.join(&filename), data).await?;
    Ok(public_url(&filename))
}

/// Best-effort removal of a previously stored image.
///
/// Failures (already gone, permissions) are logged and swallowed -- the
/// record update has already happened and must not be rolled back over a
/// stray file.
pub async fn delete_image(upload_dir: &Path, image_url: &str) {
    let Some(path) = disk_path(upload_dir, image_url) else {
        tracing::warn!(image_url, "Refusing to delete suspicious image path");
        return;
    };
    if let Err(err) = tokio::fs::remove_file(&path).await {
        tracing::warn!(path = %path.display(), error = %err, "Failed to delete old image");
    }
}
