use std::path::{Path, PathBuf};

use chrono::Utc;

/// Extensions accepted for signed contracts and images.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Build the unique storage path for an upload:
/// `<uploads_dir>/<subfolder>/<stem>_<timestamp>.<ext>`.
pub fn storage_path(
    uploads_dir: &str,
    subfolder: &str,
    original_name: &str,
) -> Result<PathBuf, String> {
    let original = Path::new(original_name);

    let ext = original
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| "File has no extension".to_string())?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(format!("File type .{ext} is not accepted"));
    }

    let stem = original
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    // Strip anything path-like or surprising from the client-supplied name.
    let stem: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    let timestamp = Utc::now().format("%Y%m%d%H%M%S%3f");
    Ok(Path::new(uploads_dir)
        .join(subfolder)
        .join(format!("{stem}_{timestamp}.{ext}")))
}

/// Persist upload bytes and return the stored path as a string for the
/// owning record.
pub async fn save(
    uploads_dir: &str,
    subfolder: &str,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, String> {
    let path = storage_path(uploads_dir, subfolder, original_name)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create upload directory: {e}"))?;
    }

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| format!("Failed to store upload: {e}"))?;

    Ok(path.to_string_lossy().replace('\\', "/"))
}
