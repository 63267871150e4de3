#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Opportunity analysis result types.
//!
//! Defines the output of each of the four analyzers (density, demand,
//! competition, sentiment), the per-category [`AnalysisResult`] that
//! combines them, and the region-wide [`RegionRankingResult`] consumed by
//! the store and report crates. Every type serializes to a plain JSON
//! document with finite numbers only.

use chrono::{DateTime, Utc};
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_source_models::RegionDatasets;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Region-level aggregate used by an analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSnapshot {
    /// Resident population (0 when no demographic data was supplied).
    pub population: u64,
    /// Residents per square kilometer.
    pub density: f64,
    /// Average monthly commercial rent.
    pub avg_commercial_rent: f64,
    /// Commercial vacancy rate, as a percentage.
    pub vacancy_rate: f64,
}

impl RegionSnapshot {
    /// Builds the snapshot from raw datasets, defaulting absent values to 0.
    #[must_use]
    pub fn from_datasets(datasets: &RegionDatasets) -> Self {
        let (population, density) = datasets
            .demographic
            .map_or((0, 0.0), |d| (d.population, d.density));
        let (avg_commercial_rent, vacancy_rate) = datasets
            .rental
            .map_or((0.0, 0.0), |r| (r.avg_commercial_rent, r.vacancy_rate));

        Self {
            population,
            density,
            avg_commercial_rent,
            vacancy_rate,
        }
    }
}

/// Market-density gap for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityAnalysis {
    /// Establishments currently operating.
    pub current_count: u64,
    /// Establishments the population would support (1dp).
    pub ideal_count: f64,
    /// Establishments per 1,000 residents (2dp).
    pub density_per_1000: f64,
    /// Establishments per 10,000 residents (2dp).
    pub density_per_10000: f64,
    /// Shortfall of current vs. ideal count, as a percentage (1dp).
    pub gap_percentage: f64,
    /// Whether the gap exceeds 20%.
    pub has_opportunity: bool,
}

/// Demand potential for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandAnalysis {
    /// Vacancy-adjusted demand score, 0-100 (1dp).
    pub demand_score: f64,
    /// Population factor in `[0, 1]` (2dp).
    pub population_factor: f64,
    /// Density factor in `[0, 1]` (2dp).
    pub density_factor: f64,
    /// Rent affordability factor in `[0, 1]` (2dp).
    pub rent_factor: f64,
    /// Vacancy multiplier in `[0, 1]` (2dp).
    pub vacancy_adjustment: f64,
    /// Rough monthly customer estimate.
    pub estimated_monthly_customers: u64,
}

/// Competitive saturation band.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CompetitionLevel {
    /// Saturation below half the national average
    Low,
    /// Saturation below the national average
    Medium,
    /// Saturation below 1.5x the national average
    High,
    /// Saturation at or above 1.5x the national average
    VeryHigh,
    /// No observation for the category
    Unknown,
}

/// Competitive saturation for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionAnalysis {
    /// Saturation band.
    pub competition_level: CompetitionLevel,
    /// Competition score, 0-100; higher means less competition (1dp).
    pub competition_score: f64,
    /// Observed density relative to the national average (2dp).
    pub market_saturation: f64,
    /// Year-over-year establishment growth, as reported.
    pub growth_trend: f64,
    /// Establishments currently operating.
    pub establishment_count: u64,
    /// Establishments per 100,000 residents.
    pub density_per_100k: f64,
}

impl CompetitionAnalysis {
    /// The neutral result used when no observation exists.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            competition_level: CompetitionLevel::Unknown,
            competition_score: 50.0,
            market_saturation: 0.0,
            growth_trend: 0.0,
            establishment_count: 0,
            density_per_100k: 0.0,
        }
    }
}

impl Default for CompetitionAnalysis {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Qualitative social sentiment label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SentimentImpact {
    /// Raw sentiment above 20
    Positive,
    /// Raw sentiment in `(-20, 20]`
    Neutral,
    /// Raw sentiment at or below -20
    Negative,
}

/// Social sentiment impact for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    /// Sentiment normalized to 0-100 (1dp).
    pub sentiment_score: f64,
    /// Qualitative label.
    pub sentiment_impact: SentimentImpact,
    /// Complaints as reported by the provider.
    pub main_complaints: Vec<String>,
    /// Opportunities derived from recognized complaints.
    pub opportunity_indicators: Vec<String>,
    /// Total mentions sampled.
    pub total_mentions: u64,
    /// Raw provider score.
    pub raw_sentiment_score: f64,
}

impl SentimentAnalysis {
    /// The neutral result used when no observation exists.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            sentiment_score: 50.0,
            sentiment_impact: SentimentImpact::Neutral,
            main_complaints: Vec::new(),
            opportunity_indicators: Vec::new(),
            total_mentions: 0,
            raw_sentiment_score: 0.0,
        }
    }
}

impl Default for SentimentAnalysis {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Recommendation band derived from an opportunity score.
///
/// Lower bounds are inclusive: exactly 80.0 is [`Self::Excellent`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationTier {
    /// Score >= 80
    Excellent,
    /// Score in `[65, 80)`
    Good,
    /// Score in `[50, 65)`
    Moderate,
    /// Score in `[35, 50)`
    Low,
    /// Score < 35
    NotRecommended,
}

impl RecommendationTier {
    /// Maps an opportunity score to its tier.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 65.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Moderate
        } else if score >= 35.0 {
            Self::Low
        } else {
            Self::NotRecommended
        }
    }

    /// Returns the tier name as shown to users (e.g. `"NOT RECOMMENDED"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Moderate => "MODERATE",
            Self::Low => "LOW",
            Self::NotRecommended => "NOT RECOMMENDED",
        }
    }

    /// Returns the fixed recommendation message for this tier.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => {
                "EXCELLENT OPPORTUNITY: High demand, low competition and good market acceptance."
            }
            Self::Good => "GOOD OPPORTUNITY: Promising market with growth potential.",
            Self::Moderate => {
                "MODERATE OPPORTUNITY: Requires more detailed analysis and a differentiated strategy."
            }
            Self::Low => "LOW OPPORTUNITY: Saturated market or low demand.",
            Self::NotRecommended => {
                "NOT RECOMMENDED: High risk due to market saturation or low demand."
            }
        }
    }

    /// Returns the short classification used in detailed reports.
    #[must_use]
    pub const fn classification(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::NotRecommended => "Not Recommended",
        }
    }
}

/// The complete analysis of one business category in one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Category analyzed.
    pub business_type: BusinessCategory,
    /// Weighted opportunity score, 0-100 (1dp).
    pub opportunity_score: f64,
    /// Recommendation band.
    pub tier: RecommendationTier,
    /// Recommendation message for the band.
    pub recommendation: String,
    /// Market-density gap.
    pub density_analysis: DensityAnalysis,
    /// Demand potential.
    pub demand_analysis: DemandAnalysis,
    /// Competitive saturation.
    pub competition_analysis: CompetitionAnalysis,
    /// Social sentiment impact.
    pub sentiment_analysis: SentimentAnalysis,
}

/// Outcome discriminator of a region ranking run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RankingStatus {
    /// All categories were analyzed
    Success,
    /// The provider returned no data for the region
    NoData,
    /// The run failed before producing results
    Error,
}

/// Ranked opportunities for a region after a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOpportunities {
    /// When the analysis ran.
    pub analysis_timestamp: DateTime<Utc>,
    /// Number of categories analyzed.
    pub total_opportunities: usize,
    /// The highest-scoring categories.
    pub top_opportunities: Vec<AnalysisResult>,
    /// Every category, sorted by descending score (ties in catalog order).
    pub all_opportunities: Vec<AnalysisResult>,
    /// Region aggregate the analysis used.
    pub region_summary: RegionSnapshot,
}

/// Status-specific payload of a [`RegionRankingResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankingOutcome {
    /// Every category was analyzed and ranked.
    Success(RankedOpportunities),
    /// No input data existed for the region.
    NoData {
        /// Human-readable explanation.
        message: String,
    },
    /// The run failed.
    Error {
        /// The captured error message.
        error: String,
    },
}

/// Result of ranking every category for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRankingResult {
    /// Region name as requested.
    pub region: String,
    /// Status and payload.
    #[serde(flatten)]
    pub outcome: RankingOutcome,
}

impl RegionRankingResult {
    /// Returns the status discriminator.
    #[must_use]
    pub const fn status(&self) -> RankingStatus {
        match self.outcome {
            RankingOutcome::Success(_) => RankingStatus::Success,
            RankingOutcome::NoData { .. } => RankingStatus::NoData,
            RankingOutcome::Error { .. } => RankingStatus::Error,
        }
    }

    /// Returns the ranked payload for successful runs.
    #[must_use]
    pub const fn ranked(&self) -> Option<&RankedOpportunities> {
        match &self.outcome {
            RankingOutcome::Success(ranked) => Some(ranked),
            RankingOutcome::NoData { .. } | RankingOutcome::Error { .. } => None,
        }
    }

    /// Returns every ranked result, or an empty slice for non-success runs.
    #[must_use]
    pub fn all_opportunities(&self) -> &[AnalysisResult] {
        self.ranked()
            .map(|ranked| ranked.all_opportunities.as_slice())
            .unwrap_or_default()
    }

    /// Returns the top results, or an empty slice for non-success runs.
    #[must_use]
    pub fn top_opportunities(&self) -> &[AnalysisResult] {
        self.ranked()
            .map(|ranked| ranked.top_opportunities.as_slice())
            .unwrap_or_default()
    }
}
