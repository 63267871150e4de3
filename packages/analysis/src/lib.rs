#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Opportunity scoring engine.
//!
//! Four analyzers each turn one slice of region data into a sub-score:
//!
//! - [`density`]: establishment count vs. the population-ideal count
//! - [`demand`]: population, density and rent factors adjusted for vacancy
//! - [`competition`]: saturation relative to a national average
//! - [`sentiment`]: normalized social sentiment and complaint-driven
//!   opportunities
//!
//! [`score`] combines them into a 0-100 opportunity score and
//! recommendation tier, and [`ranker::RegionRanker`] runs the whole
//! pipeline for every catalog category of a region.
//!
//! Analyzers never fail. Malformed inputs degrade to the analyzer's
//! neutral output and are reported through `log`.

pub mod competition;
pub mod config;
pub mod demand;
pub mod density;
pub mod ranker;
pub mod score;
pub mod sentiment;

pub use config::ScoringConfig;
pub use opportunity_map_source_models::round_to;
pub use ranker::RegionRanker;

use thiserror::Error;

/// Errors that can occur while loading a scoring configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML for the expected schema.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration parsed but violates a constraint.
    #[error("Invalid scoring configuration: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}
