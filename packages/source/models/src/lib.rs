#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input provider contract types.
//!
//! Every data provider (synthetic generator today, real feeds later)
//! produces these four per-region datasets. The scoring engine treats them
//! as opaque data and never assumes how they were produced.

use opportunity_map_category_models::BusinessCategory;
use serde::{Deserialize, Serialize};

/// Demographic aggregate for a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicSnapshot {
    /// Resident population.
    pub population: u64,
    /// Residents per square kilometer.
    pub density: f64,
}

/// Commercial establishment counts for one category in a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessObservation {
    /// Category label (matched case-insensitively against the catalog).
    pub category: String,
    /// Number of active establishments.
    pub establishment_count: u64,
    /// Establishments per 100,000 residents.
    pub density_per_100k: f64,
    /// Year-over-year growth in establishments, as a percentage. May be
    /// negative.
    pub growth_rate_last_year: f64,
}

/// Social-media sentiment metrics for one category in a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialObservation {
    /// Category label (matched case-insensitively against the catalog).
    pub category: String,
    /// Total number of mentions sampled.
    pub total_mentions: u64,
    /// Raw sentiment score, roughly in `-100..=100`.
    pub sentiment_score_raw: f64,
    /// Most frequent complaints (zero to three labels).
    pub main_complaints: Vec<String>,
}

/// Commercial rental market aggregate for a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalSnapshot {
    /// Average monthly commercial rent.
    pub avg_commercial_rent: f64,
    /// Vacant commercial units, as a percentage (0-100).
    pub vacancy_rate: f64,
}

/// The four datasets fetched for one region in a single analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegionDatasets {
    /// Demographic snapshot, if the provider has one.
    pub demographic: Option<DemographicSnapshot>,
    /// Per-category establishment observations.
    pub businesses: Vec<BusinessObservation>,
    /// Per-category social sentiment observations.
    pub social: Vec<SocialObservation>,
    /// Rental snapshot, if the provider has one.
    pub rental: Option<RentalSnapshot>,
}

impl RegionDatasets {
    /// Returns `true` when all four datasets are missing or empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.demographic.is_none()
            && self.businesses.is_empty()
            && self.social.is_empty()
            && self.rental.is_none()
    }
}

/// A per-category record that carries a category label.
pub trait CategoryRecord {
    /// Returns the category label as supplied by the provider.
    fn category_label(&self) -> &str;
}

impl CategoryRecord for BusinessObservation {
    fn category_label(&self) -> &str {
        &self.category
    }
}

impl CategoryRecord for SocialObservation {
    fn category_label(&self) -> &str {
        &self.category
    }
}

/// Finds the first record whose label matches `category`, ignoring case.
#[must_use]
pub fn find_for_category<T: CategoryRecord>(
    records: &[T],
    category: BusinessCategory,
) -> Option<&T> {
    records
        .iter()
        .find(|record| category.matches_label(record.category_label()))
}

/// Rounds `value` to `places` decimal places.
///
/// Ties round to even on the exact binary value, so e.g. `2.675` (stored as
/// `2.67499...`) rounds to `2.67`. Non-finite values pass through.
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}
