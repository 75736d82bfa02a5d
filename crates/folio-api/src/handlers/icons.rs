//! Icon picker listing handler.

use std::path::Path;

use axum::extract::State;
use axum::Json;
use tokio::fs;

use crate::{ApiError, AppState};
use folio_core::defaults::IMAGE_EXTENSIONS;

/// List the image files available in the icon picker directory.
///
/// Hidden files and non-image extensions are excluded; the listing is
/// sorted for a stable picker order.
///
/// # Returns
/// - 200 OK `{icons: [filename, ...]}`
/// - 500 on directory read failure
pub async fn list_icons(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dir = state.config.icons_dir();
    let mut entries = fs::read_dir(&dir).await.map_err(|e| {
        ApiError::Internal(format!(
            "Failed to read icons directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut icons = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read icons directory: {}", e)))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to read icons directory: {}", e)))?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_listable_icon(&name) {
            icons.push(name);
        }
    }
    icons.sort();

    Ok(Json(serde_json::json!({ "icons": icons })))
}

/// True for visible files with a recognized image extension.
fn is_listable_icon(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
