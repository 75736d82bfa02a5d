//! File-mode portfolio store.
//!
//! The whole document lives in one JSON file; images are public files
//! referenced by path. A save first converts any inline image references
//! into stored files, then rewrites the document.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use folio_core::defaults::{PROJECT_IMAGES_SUBDIR, TOOL_IMAGES_SUBDIR};
use folio_core::image::decode_inline;
use folio_core::{Error, PortfolioDocument, PortfolioStore, Result};

use crate::uploads::{slugify, UploadStore};

/// JSON-file implementation of the portfolio store.
pub struct JsonFileStore {
    data_file: PathBuf,
    uploads: UploadStore,
}

impl JsonFileStore {
    /// Create a store over the given document path and upload store.
    pub fn new(data_file: impl Into<PathBuf>, uploads: UploadStore) -> Self {
        Self {
            data_file: data_file.into(),
            uploads,
        }
    }
}

#[async_trait]
impl PortfolioStore for JsonFileStore {
    async fn load(&self) -> Result<PortfolioDocument> {
        let content = match fs::read_to_string(&self.data_file).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(format!(
                    "portfolio data file {}",
                    self.data_file.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, mut document: PortfolioDocument) -> Result<()> {
        for tool in &mut document.tools {
            if let Some(bytes) = decode_inline(&tool.icon) {
                tool.icon = self
                    .uploads
                    .store_item_image(TOOL_IMAGES_SUBDIR, &slugify(&tool.name), &bytes)
                    .await?;
            }
        }
        for project in &mut document.projects {
            if let Some(bytes) = decode_inline(&project.img_src) {
                project.img_src = self
                    .uploads
                    .store_item_image(PROJECT_IMAGES_SUBDIR, &slugify(&project.title), &bytes)
                    .await?;
            }
        }

        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Atomic write: temp file + rename.
        let content = serde_json::to_string_pretty(&document)?;
        let temp_path = self.data_file.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, &self.data_file).await?;

        Ok(())
    }
}
