//! Application configuration resolved once at startup.
//!
//! The original deployment selected its persistence mode implicitly by
//! code path; here both the persistence mode and the image storage form
//! are explicit enums read from the environment.

use std::path::PathBuf;

use crate::defaults;
use crate::error::{Error, Result};

/// Where the portfolio document is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// One JSON document at a fixed path; images stored as public files.
    File,
    /// Relational tables (settings/tool/project) behind a connection pool.
    Database,
}

impl StorageMode {
    /// Parse mode from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Some(Self::File),
            "database" | "db" | "postgres" => Some(Self::Database),
            _ => None,
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Database => write!(f, "database"),
        }
    }
}

/// How image payloads are stored in database mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// New uploads are written under the public root; rows hold the path.
    FilesystemPath,
    /// Rows hold the raw payload; reads re-encode it as an inline reference.
    InlineBlob,
}

impl ImageMode {
    /// Parse mode from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "path" | "filesystem" => Some(Self::FilesystemPath),
            "inline" | "blob" => Some(Self::InlineBlob),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FilesystemPath => write!(f, "path"),
            Self::InlineBlob => write!(f, "inline"),
        }
    }
}

/// Application configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Persistence mode for the portfolio document.
    pub storage_mode: StorageMode,
    /// Image storage form (database mode only; file mode always uses paths).
    pub image_mode: ImageMode,
    /// Path of the file-mode JSON document.
    pub data_file: PathBuf,
    /// Public assets root (uploads and icons live underneath).
    pub public_dir: PathBuf,
    /// Postgres connection URL (database mode).
    pub database_url: String,
    /// HTTP bind host.
    pub host: String,
    /// HTTP bind port.
    pub port: u16,
    /// GitHub account the stats endpoint describes.
    pub github_username: Option<String>,
    /// Optional GitHub API token.
    pub github_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::File,
            image_mode: ImageMode::FilesystemPath,
            data_file: PathBuf::from(defaults::DATA_FILE),
            public_dir: PathBuf::from(defaults::PUBLIC_DIR),
            database_url: defaults::DATABASE_URL.to_string(),
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            github_username: None,
            github_token: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to
    /// defaults. An unparseable mode value is an error, not a silent
    /// default.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var(defaults::ENV_STORAGE_MODE) {
            config.storage_mode = StorageMode::from_str_loose(&val).ok_or_else(|| {
                Error::Config(format!("invalid {}: {:?}", defaults::ENV_STORAGE_MODE, val))
            })?;
        }

        if let Ok(val) = std::env::var(defaults::ENV_IMAGE_MODE) {
            config.image_mode = ImageMode::from_str_loose(&val).ok_or_else(|| {
                Error::Config(format!("invalid {}: {:?}", defaults::ENV_IMAGE_MODE, val))
            })?;
        }

        if let Ok(val) = std::env::var(defaults::ENV_DATA_FILE) {
            config.data_file = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(defaults::ENV_PUBLIC_DIR) {
            config.public_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("DATABASE_URL") {
            config.database_url = val;
        }

        if let Ok(val) = std::env::var("HOST") {
            config.host = val;
        }

        if let Ok(val) = std::env::var("PORT") {
            match val.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid PORT, using default");
                }
            }
        }

        config.github_username = std::env::var(defaults::ENV_GITHUB_USERNAME)
            .ok()
            .filter(|v| !v.trim().is_empty());
        config.github_token = std::env::var(defaults::ENV_GITHUB_TOKEN)
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(config)
    }

    /// Uploads directory on disk.
    pub fn uploads_dir(&self) -> PathBuf {
        self.public_dir.join(defaults::UPLOADS_SUBDIR)
    }

    /// Icon picker directory on disk.
    pub fn icons_dir(&self) -> PathBuf {
        self.public_dir.join(defaults::ICONS_SUBDIR)
    }
}
