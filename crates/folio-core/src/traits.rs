//! Store trait implemented by both persistence modes.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PortfolioDocument;

/// Read and write the portfolio document.
///
/// `load` must tolerate an empty or uninitialized store (empty strings
/// and empty lists, not an error). `save` is all-or-nothing per call:
/// a failure leaves the prior state intact.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Assemble the full document from the store.
    async fn load(&self) -> Result<PortfolioDocument>;

    /// Persist the submitted document so the store exactly matches it.
    async fn save(&self, document: PortfolioDocument) -> Result<()>;
}
