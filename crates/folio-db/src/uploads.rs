//! Public upload storage.
//!
//! Uploaded images live under `{public_root}/uploads` and are addressed
//! by public paths (`/uploads/...`). Files are named to avoid collision
//! and never overwritten; deletion happens only as reconciler cleanup
//! and is best-effort.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use folio_core::defaults::UPLOADS_SUBDIR;
use folio_core::image::{extension_for_mime, sniff_mime};
use folio_core::Result;

/// Filesystem store for public upload files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    public_root: PathBuf,
}

impl UploadStore {
    /// Create a new upload store rooted at the public assets directory.
    pub fn new(public_root: impl Into<PathBuf>) -> Self {
        Self {
            public_root: public_root.into(),
        }
    }

    /// The public assets root.
    pub fn public_root(&self) -> &Path {
        &self.public_root
    }

    /// Store a dashboard upload under `/uploads`, returning its public path.
    ///
    /// The name combines the current time, a random component, and the
    /// sanitized original filename.
    pub async fn store_upload(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let filename = format!(
            "{}-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            rand::random::<u32>(),
            sanitize_name(original_name),
        );
        self.write_public(UPLOADS_SUBDIR, &filename, data).await?;
        Ok(format!("/{}/{}", UPLOADS_SUBDIR, filename))
    }

    /// Persist a decoded inline payload for a collection item (save-time
    /// conversion), named from the item's slug with a sniffed extension.
    pub async fn store_item_image(&self, subdir: &str, slug: &str, data: &[u8]) -> Result<String> {
        let ext = extension_for_mime(sniff_mime(data));
        let filename = format!(
            "{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            slug,
            ext
        );
        let rel_dir = format!("{}/{}", UPLOADS_SUBDIR, subdir);
        self.write_public(&rel_dir, &filename, data).await?;
        Ok(format!("/{}/{}", rel_dir, filename))
    }

    /// Delete a stored upload by its public path.
    ///
    /// Only paths under `/uploads` are touched; shared assets (the icon
    /// picker directory) are never deleted. A path that no longer exists
    /// is not an error.
    pub async fn remove_public(&self, public_path: &str) -> Result<()> {
        let Some(relative) = public_path
            .strip_prefix('/')
            .filter(|p| p.starts_with(UPLOADS_SUBDIR))
        else {
            debug!(path = %public_path, "skipping delete outside uploads directory");
            return Ok(());
        };
        // Reject traversal out of the public root.
        if relative.split('/').any(|seg| seg == "..") {
            debug!(path = %public_path, "skipping delete with traversal segments");
            return Ok(());
        }

        let full_path = self.public_root.join(relative);
        if fs::try_exists(&full_path).await? {
            fs::remove_file(&full_path).await?;
            debug!(path = %full_path.display(), "deleted stored upload");
        }
        Ok(())
    }

    /// Write bytes under the public root, creating directories as needed.
    ///
    /// Writes go through a temp file + rename so a failed write never
    /// leaves a half-written file at the final path.
    async fn write_public(&self, rel_dir: &str, filename: &str, data: &[u8]) -> Result<()> {
        let dir = self.public_root.join(rel_dir);
        fs::create_dir_all(&dir).await.map_err(|e| {
            warn!(dir = %dir.display(), error = %e, "uploads: create_dir_all failed");
            e
        })?;

        let full_path = dir.join(filename);
        let temp_path = full_path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, &full_path).await?;

        debug!(path = %full_path.display(), size = data.len(), "uploads: wrote file");
        Ok(())
    }
}

/// Sanitize an uploaded filename: strip path components, collapse
/// whitespace to underscores, and replace characters unsafe in names.
pub fn sanitize_name(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let mut sanitized = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => sanitized.push('_'),
            c if c.is_control() => sanitized.push('_'),
            c => sanitized.push(c),
        }
    }

    if sanitized.is_empty() {
        return "unnamed_file".to_string();
    }
    sanitized
}

/// Slug for save-time image filenames: lowercased, whitespace to dashes.
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}
