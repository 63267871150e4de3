#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Opportunity persistence.
//!
//! [`OpportunityStore`] is the persistence seam for ranking results: rows
//! are upserted keyed by `(region, category)` so re-analyzing a region
//! refreshes its scores without duplicating rows. [`memory::MemoryStore`]
//! is the bundled implementation; it serializes concurrent upserts behind
//! an async `RwLock`.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use opportunity_map_analysis_models::RegionRankingResult;
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_store_models::{
    AnalysisSummary, OpportunityQuery, StoredOpportunity, TopOpportunities,
};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A ranking result could not be converted into rows.
    #[error("Cannot store result for region '{region}': {message}")]
    Rejected {
        /// Region of the rejected result.
        region: String,
        /// Description of what went wrong.
        message: String,
    },
}

/// Trait that all opportunity stores must implement.
#[async_trait]
pub trait OpportunityStore: Send + Sync {
    /// Upserts every opportunity of a successful ranking result.
    ///
    /// Results with a `no_data` or `error` status store nothing and return
    /// `0`. Otherwise returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the result cannot be stored.
    async fn upsert_region(&self, result: &RegionRankingResult) -> Result<usize, StoreError>;

    /// Returns rows matching `query`, best score first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    async fn query(&self, query: &OpportunityQuery) -> Result<Vec<StoredOpportunity>, StoreError>;

    /// Returns the row for exactly `region` and `category`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    async fn get(
        &self,
        region: &str,
        category: BusinessCategory,
    ) -> Result<Option<StoredOpportunity>, StoreError>;

    /// Returns up to `limit` rows scoring at least 50, grouped by region.
    ///
    /// `region` filters by case-insensitive substring.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    async fn top_opportunities(
        &self,
        region: Option<&str>,
        limit: usize,
    ) -> Result<TopOpportunities, StoreError>;

    /// Returns store-wide statistics.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    async fn summary(&self) -> Result<AnalysisSummary, StoreError>;
}
