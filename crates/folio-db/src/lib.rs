//! # folio-db
//!
//! Storage layer for the folio portfolio backend.
//!
//! This crate provides:
//! - Connection pool management
//! - Repositories for the settings, tool, and project tables
//! - Collection reconciliation (diff-and-apply of submitted lists)
//! - The database-mode and file-mode portfolio stores
//! - Public upload file storage
//!
//! ## Example
//!
//! ```rust,ignore
//! use folio_db::{Database, PgPortfolioStore, UploadStore};
//! use folio_core::{ImageMode, PortfolioStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/folio").await?;
//!     let store = PgPortfolioStore::new(db, UploadStore::new("public"), ImageMode::FilesystemPath);
//!     let document = store.load().await?;
//!     println!("{} tools", document.tools.len());
//!     Ok(())
//! }
//! ```

pub mod file_store;
pub mod pool;
pub mod projects;
pub mod reconcile;
pub mod settings;
pub mod store;
pub mod tools;
pub mod uploads;

#[cfg(test)]
mod tests;

// Re-export core types
pub use folio_core::*;

// Re-export repository and store implementations
pub use file_store::JsonFileStore;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use projects::{PgProjectRepository, ProjectRow};
pub use settings::PgSettingsRepository;
pub use store::{Database, PgPortfolioStore};
pub use tools::{PgToolRepository, ToolRow};
pub use uploads::{sanitize_name, slugify, UploadStore};
