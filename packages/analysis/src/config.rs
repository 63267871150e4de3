//! Scoring configuration: aggregation weights and per-category profiles.
//!
//! The default configuration is embedded from `config/scoring.toml` at
//! compile time. Alternate configurations can be loaded from a TOML string
//! or file and are validated before use. Callers share one immutable
//! instance (typically behind an `Arc`) across every analysis run.

use std::collections::BTreeSet;
use std::path::Path;

use opportunity_map_category_models::BusinessCategory;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Embedded default configuration.
const DEFAULT_SCORING_TOML: &str = include_str!("../config/scoring.toml");

/// Weights used to combine analyzer sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the (capped) density gap percentage.
    pub density_gap: f64,
    /// Weight of the demand score.
    pub demand_potential: f64,
    /// Weight of the competition score.
    pub competition_level: f64,
    /// Weight of the economic indicator (currently the demand score again).
    pub economic_indicators: f64,
    /// Weight of the sentiment score.
    pub sentiment_score: f64,
}

impl ScoreWeights {
    fn values(&self) -> [(&'static str, f64); 5] {
        [
            ("density_gap", self.density_gap),
            ("demand_potential", self.demand_potential),
            ("competition_level", self.competition_level),
            ("economic_indicators", self.economic_indicators),
            ("sentiment_score", self.sentiment_score),
        ]
    }
}

/// Divisors that turn region metrics into demand factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandDivisors {
    /// Population at which the population factor saturates.
    pub population_divisor: f64,
    /// Density at which the density factor saturates.
    pub density_divisor: f64,
    /// Rent at which the rent factor reaches zero.
    pub rent_divisor: f64,
}

/// Revenue and investment estimates used for financial projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Average spend per customer visit.
    pub average_ticket: f64,
    /// Up-front investment needed to open.
    pub initial_investment: f64,
}

/// Settings applied to categories without an entry of their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultProfile {
    /// Residents needed to support one establishment.
    pub population_threshold: u64,
    /// Demand divisors.
    pub demand: DemandDivisors,
    /// Financial estimates.
    pub financials: FinancialMetrics,
}

/// Per-category settings. Missing tables fall back to [`DefaultProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    /// Category this profile applies to.
    pub category: BusinessCategory,
    /// Residents needed to support one establishment.
    pub population_threshold: u64,
    /// Category-specific demand divisors.
    #[serde(default)]
    pub demand: Option<DemandDivisors>,
    /// Category-specific financial estimates.
    #[serde(default)]
    pub financials: Option<FinancialMetrics>,
}

/// Complete scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Aggregation weights.
    pub weights: ScoreWeights,
    /// Fallback profile.
    pub default_profile: DefaultProfile,
    /// Analyzed categories, in catalog order.
    pub categories: Vec<CategoryProfile>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::embedded()
    }
}

impl ScoringConfig {
    /// Returns the embedded default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML fails to parse or validate. Since it is
    /// a compile-time constant, a failure indicates a development error
    /// and is caught by tests.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml_str(DEFAULT_SCORING_TOML)
            .unwrap_or_else(|e| panic!("Failed to load embedded scoring config: {e}"))
    }

    /// Parses and validates a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document does not match the
    /// schema, or [`ConfigError::Invalid`] if it fails validation.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading scoring config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks the configuration's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in self.weights.values() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid(format!(
                    "weight '{name}' must be a non-negative number, got {weight}"
                )));
            }
        }

        let total: f64 = self.weights.values().iter().map(|(_, w)| w).sum();
        if (total - 1.0).abs() > 1e-6 {
            log::warn!("Scoring weights sum to {total}, scores may exceed 0-100");
        }

        if self.categories.is_empty() {
            return Err(invalid("at least one category must be configured".into()));
        }

        validate_profile(
            "default profile",
            self.default_profile.population_threshold,
            Some(&self.default_profile.demand),
            Some(&self.default_profile.financials),
        )?;

        let mut seen = BTreeSet::new();
        for profile in &self.categories {
            if !seen.insert(profile.category) {
                return Err(invalid(format!(
                    "category '{}' is configured more than once",
                    profile.category
                )));
            }
            validate_profile(
                profile.category.label(),
                profile.population_threshold,
                profile.demand.as_ref(),
                profile.financials.as_ref(),
            )?;
        }

        Ok(())
    }

    /// Iterates the configured categories in catalog order.
    pub fn catalog(&self) -> impl Iterator<Item = BusinessCategory> + '_ {
        self.categories.iter().map(|p| p.category)
    }

    /// Returns the profile for `category`, if it is configured.
    #[must_use]
    pub fn profile(&self, category: BusinessCategory) -> Option<&CategoryProfile> {
        self.categories.iter().find(|p| p.category == category)
    }

    /// Residents needed to support one establishment of `category`.
    #[must_use]
    pub fn population_threshold(&self, category: BusinessCategory) -> u64 {
        self.profile(category).map_or(
            self.default_profile.population_threshold,
            |p| p.population_threshold,
        )
    }

    /// Demand divisors for `category`.
    #[must_use]
    pub fn demand_divisors(&self, category: BusinessCategory) -> DemandDivisors {
        self.profile(category)
            .and_then(|p| p.demand)
            .unwrap_or(self.default_profile.demand)
    }

    /// Financial estimates for `category`.
    #[must_use]
    pub fn financials(&self, category: BusinessCategory) -> FinancialMetrics {
        self.profile(category)
            .and_then(|p| p.financials)
            .unwrap_or(self.default_profile.financials)
    }
}

const fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid { message }
}

fn validate_profile(
    name: &str,
    population_threshold: u64,
    demand: Option<&DemandDivisors>,
    financials: Option<&FinancialMetrics>,
) -> Result<(), ConfigError> {
    if population_threshold == 0 {
        return Err(invalid(format!(
            "{name}: population_threshold must be positive"
        )));
    }

    if let Some(demand) = demand {
        let divisors = [
            ("population_divisor", demand.population_divisor),
            ("density_divisor", demand.density_divisor),
            ("rent_divisor", demand.rent_divisor),
        ];
        for (field, value) in divisors {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!(
                    "{name}: {field} must be positive, got {value}"
                )));
            }
        }
    }

    if let Some(financials) = financials {
        if !financials.average_ticket.is_finite() || financials.average_ticket < 0.0 {
            return Err(invalid(format!(
                "{name}: average_ticket must be non-negative"
            )));
        }
        if !financials.initial_investment.is_finite() || financials.initial_investment <= 0.0 {
            return Err(invalid(format!(
                "{name}: initial_investment must be positive"
            )));
        }
    }

    Ok(())
}
