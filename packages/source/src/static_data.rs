//! File-backed provider serving pre-collected region datasets.
//!
//! The JSON document maps region names to [`RegionDatasets`]:
//!
//! ```json
//! {
//!   "Pinheiros": {
//!     "demographic": { "population": 65000, "density": 8100.0 },
//!     "businesses": [],
//!     "social": [],
//!     "rental": null
//!   }
//! }
//! ```
//!
//! Regions absent from the document yield empty datasets.

use std::collections::BTreeMap;
use std::path::Path;

use opportunity_map_source_models::{
    BusinessObservation, DemographicSnapshot, RegionDatasets, RentalSnapshot, SocialObservation,
};

use crate::{InputProvider, ProviderError};

/// Provider backed by an in-memory map of region datasets.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    regions: BTreeMap<String, RegionDatasets>,
}

impl StaticProvider {
    /// Creates a provider from an existing region map.
    #[must_use]
    pub const fn new(regions: BTreeMap<String, RegionDatasets>) -> Self {
        Self { regions }
    }

    /// Parses a provider from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Json`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ProviderError> {
        let regions: BTreeMap<String, RegionDatasets> = serde_json::from_str(json)?;
        log::debug!("Loaded datasets for {} region(s)", regions.len());
        Ok(Self::new(regions))
    }

    /// Loads a provider from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ProviderError> {
        log::info!("Loading region datasets from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Adds or replaces the datasets for `region`.
    pub fn insert(&mut self, region: impl Into<String>, datasets: RegionDatasets) {
        self.regions.insert(region.into(), datasets);
    }

    fn datasets(&self, region: &str) -> Option<&RegionDatasets> {
        let found = self.regions.get(region);
        if found.is_none() {
            log::debug!("No stored datasets for region '{region}'");
        }
        found
    }
}

impl InputProvider for StaticProvider {
    fn demographic_snapshot(
        &self,
        region: &str,
    ) -> Result<Option<DemographicSnapshot>, ProviderError> {
        Ok(self.datasets(region).and_then(|d| d.demographic))
    }

    fn business_observations(
        &self,
        region: &str,
    ) -> Result<Vec<BusinessObservation>, ProviderError> {
        Ok(self
            .datasets(region)
            .map(|d| d.businesses.clone())
            .unwrap_or_default())
    }

    fn social_observations(&self, region: &str) -> Result<Vec<SocialObservation>, ProviderError> {
        Ok(self
            .datasets(region)
            .map(|d| d.social.clone())
            .unwrap_or_default())
    }

    fn rental_snapshot(&self, region: &str) -> Result<Option<RentalSnapshot>, ProviderError> {
        Ok(self.datasets(region).and_then(|d| d.rental))
    }

    fn fetch_all(&self, region: &str) -> Result<RegionDatasets, ProviderError> {
        Ok(self.datasets(region).cloned().unwrap_or_default())
    }
}
