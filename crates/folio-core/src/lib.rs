//! # folio-core
//!
//! Core types, traits, and abstractions for the folio portfolio backend.
//!
//! This crate provides the portfolio document model, the inline image
//! codec, configuration, and the store trait that the storage crates
//! implement.

pub mod config;
pub mod defaults;
pub mod error;
pub mod image;
pub mod models;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use config::{AppConfig, ImageMode, StorageMode};
pub use error::{Error, Result};
pub use image::{decode_inline, encode_inline, is_inline, sniff_mime};
pub use models::{Education, GithubStats, PortfolioDocument, Project, Tool};
pub use tags::{join_tech, split_tech};
pub use traits::PortfolioStore;
