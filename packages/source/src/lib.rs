#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region data providers.
//!
//! Each provider implements the [`InputProvider`] trait to supply the four
//! per-region datasets the scoring engine consumes. Two implementations
//! ship today: [`synthetic::SyntheticProvider`], which derives stable
//! pseudo-random data from the region name, and
//! [`static_data::StaticProvider`], which serves datasets loaded from JSON.

pub mod static_data;
pub mod synthetic;

use opportunity_map_source_models::{
    BusinessObservation, DemographicSnapshot, RegionDatasets, RentalSnapshot, SocialObservation,
};

/// Errors that can occur while fetching region data.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider could not produce a dataset for the region.
    #[error("Data unavailable for region '{region}': {message}")]
    Unavailable {
        /// Region that was requested.
        region: String,
        /// Description of what went wrong.
        message: String,
    },
}

/// Trait that all region data providers must implement.
///
/// Implementations must be `Send + Sync` so that a single provider can be
/// shared behind an `Arc` by concurrent analyses.
pub trait InputProvider: Send + Sync {
    /// Returns the demographic snapshot for `region`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the data cannot be fetched.
    fn demographic_snapshot(&self, region: &str)
    -> Result<Option<DemographicSnapshot>, ProviderError>;

    /// Returns per-category establishment observations for `region`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the data cannot be fetched.
    fn business_observations(&self, region: &str)
    -> Result<Vec<BusinessObservation>, ProviderError>;

    /// Returns per-category social sentiment observations for `region`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the data cannot be fetched.
    fn social_observations(&self, region: &str) -> Result<Vec<SocialObservation>, ProviderError>;

    /// Returns the rental market snapshot for `region`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the data cannot be fetched.
    fn rental_snapshot(&self, region: &str) -> Result<Option<RentalSnapshot>, ProviderError>;

    /// Fetches all four datasets for `region`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProviderError`] raised by any dataset fetch.
    fn fetch_all(&self, region: &str) -> Result<RegionDatasets, ProviderError> {
        Ok(RegionDatasets {
            demographic: self.demographic_snapshot(region)?,
            businesses: self.business_observations(region)?,
            social: self.social_observations(region)?,
            rental: self.rental_snapshot(region)?,
        })
    }
}
