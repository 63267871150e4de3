#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report assembly over stored opportunity analyses.
//!
//! The builders in [`executive`], [`detailed`] and [`comparison`] are pure
//! functions over already-loaded rows. [`ReportGenerator`] wires them to an
//! [`OpportunityStore`].

pub mod comparison;
pub mod detailed;
pub mod executive;

use std::sync::Arc;

use chrono::Utc;
use opportunity_map_analysis::ScoringConfig;
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_report_models::{
    ComparisonReport, DetailedReport, ExecutiveReport, ReportOutcome,
};
use opportunity_map_store::{OpportunityStore, StoreError};
use opportunity_map_store_models::OpportunityQuery;

/// Errors that can occur while assembling a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A comparison needs at least two regions.
    #[error("At least 2 regions are required for comparison, got {count}")]
    NotEnoughRegions {
        /// Number of regions supplied.
        count: usize,
    },
}

/// Assembles reports from an opportunity store.
#[derive(Clone)]
pub struct ReportGenerator {
    store: Arc<dyn OpportunityStore>,
    config: Arc<ScoringConfig>,
}

impl std::fmt::Debug for ReportGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportGenerator").finish_non_exhaustive()
    }
}

impl ReportGenerator {
    /// Creates a generator reading from `store`. `config` supplies the
    /// per-category financial estimates.
    #[must_use]
    pub fn new(store: Arc<dyn OpportunityStore>, config: Arc<ScoringConfig>) -> Self {
        Self { store, config }
    }

    /// Builds the executive report for regions matching `region`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Store`] if the store cannot be read.
    pub async fn executive(
        &self,
        region: &str,
        category: Option<BusinessCategory>,
    ) -> Result<ReportOutcome<ExecutiveReport>, ReportError> {
        log::info!("Generating executive report for '{region}'");

        let query = OpportunityQuery {
            business_type: category,
            ..OpportunityQuery::for_region(region)
        };
        let rows = self.store.query(&query).await?;

        if rows.is_empty() {
            return Ok(ReportOutcome::NoData {
                message: format!("No opportunities found for '{region}'"),
            });
        }

        let report = executive::build(region, category, &rows, Utc::now());
        Ok(ReportOutcome::Success { report })
    }

    /// Builds the detailed report for `category` in regions matching
    /// `region`, using the best-scoring matching row.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Store`] if the store cannot be read.
    pub async fn detailed(
        &self,
        region: &str,
        category: BusinessCategory,
    ) -> Result<ReportOutcome<DetailedReport>, ReportError> {
        log::info!("Generating detailed report for {category} in '{region}'");

        let query = OpportunityQuery {
            business_type: Some(category),
            limit: 1,
            ..OpportunityQuery::for_region(region)
        };
        let Some(row) = self.store.query(&query).await?.into_iter().next() else {
            return Ok(ReportOutcome::NoData {
                message: format!("No analysis found for {category} in '{region}'"),
            });
        };

        let financials = self.config.financials(category);
        let report = detailed::build(region, &row, &financials, Utc::now());
        Ok(ReportOutcome::Success { report })
    }

    /// Builds a comparison of `regions`, optionally restricted to one
    /// `category` in every region.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotEnoughRegions`] for fewer than two regions,
    /// or [`ReportError::Store`] if the store cannot be read.
    pub async fn comparison<S: AsRef<str> + Sync>(
        &self,
        regions: &[S],
        category: Option<BusinessCategory>,
    ) -> Result<ComparisonReport, ReportError> {
        if regions.len() < comparison::MIN_REGIONS {
            return Err(ReportError::NotEnoughRegions {
                count: regions.len(),
            });
        }
        log::info!("Generating comparison report for {} regions", regions.len());

        let mut per_region = Vec::with_capacity(regions.len());
        for region in regions {
            let region = region.as_ref();
            let query = OpportunityQuery {
                business_type: category,
                ..OpportunityQuery::for_region(region)
            };
            let rows = self.store.query(&query).await?;
            per_region.push((region.to_string(), rows));
        }

        Ok(comparison::build(&per_region, category, Utc::now()))
    }
}
