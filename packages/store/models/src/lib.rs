#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Persisted opportunity rows and query parameter definitions.
//!
//! These types represent analysis results as stored and retrieved from an
//! opportunity store, keyed by `(region, category)`. They are distinct from
//! the per-run [`AnalysisResult`] documents produced by the ranker, which
//! they embed.

use chrono::{DateTime, Utc};
use opportunity_map_analysis_models::{AnalysisResult, CompetitionLevel};
use opportunity_map_category_models::BusinessCategory;
use serde::{Deserialize, Serialize};

/// Default maximum number of rows returned by a query.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Default maximum number of rows considered for top opportunities.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Minimum score for a row to count as a top opportunity.
pub const TOP_OPPORTUNITY_MIN_SCORE: f64 = 50.0;

/// One stored analysis for a `(region, category)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOpportunity {
    /// Store-assigned identifier, stable across upserts.
    pub id: u64,
    /// Region name as analyzed.
    pub region: String,
    /// Category analyzed.
    pub business_type: BusinessCategory,
    /// Opportunity score from the latest analysis.
    pub opportunity_score: f64,
    /// Region population density when the row was first created.
    pub population_density: f64,
    /// Competition level from the latest analysis.
    pub competition_level: CompetitionLevel,
    /// Estimated monthly customers from the latest analysis.
    pub estimated_demand: u64,
    /// Full latest analysis.
    pub analysis: AnalysisResult,
    /// When the row was first stored.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl StoredOpportunity {
    /// Recommendation message of the latest analysis.
    #[must_use]
    pub fn recommendation(&self) -> &str {
        &self.analysis.recommendation
    }
}

/// Filters for querying stored opportunities.
///
/// Every `None` filter matches all rows. Results are sorted by score
/// descending and truncated to `limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpportunityQuery {
    /// Case-insensitive substring of the region name.
    pub region: Option<String>,
    /// Exact category.
    pub business_type: Option<BusinessCategory>,
    /// Inclusive minimum score.
    pub min_score: Option<f64>,
    /// Inclusive maximum score.
    pub max_score: Option<f64>,
    /// Exact competition level.
    pub competition_level: Option<CompetitionLevel>,
    /// Maximum number of rows returned.
    pub limit: usize,
}

impl Default for OpportunityQuery {
    fn default() -> Self {
        Self {
            region: None,
            business_type: None,
            min_score: None,
            max_score: None,
            competition_level: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl OpportunityQuery {
    /// Query matching every row of regions containing `region`.
    #[must_use]
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            limit: usize::MAX,
            ..Self::default()
        }
    }

    /// Returns `true` if `row` passes every filter (ignores `limit`).
    #[must_use]
    pub fn matches(&self, row: &StoredOpportunity) -> bool {
        self.region
            .as_deref()
            .is_none_or(|region| region_contains(&row.region, region))
            && self
                .business_type
                .is_none_or(|category| row.business_type == category)
            && self
                .min_score
                .is_none_or(|min| row.opportunity_score >= min)
            && self
                .max_score
                .is_none_or(|max| row.opportunity_score <= max)
            && self
                .competition_level
                .is_none_or(|level| row.competition_level == level)
    }
}

/// Case-insensitive substring match on region names.
#[must_use]
pub fn region_contains(region: &str, needle: &str) -> bool {
    region.to_lowercase().contains(&needle.to_lowercase())
}

/// Condensed view of a top opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopOpportunity {
    /// Category.
    pub business_type: BusinessCategory,
    /// Opportunity score.
    pub opportunity_score: f64,
    /// Competition level.
    pub competition_level: CompetitionLevel,
    /// Estimated monthly customers.
    pub estimated_demand: u64,
    /// Recommendation message.
    pub recommendation: String,
}

impl From<&StoredOpportunity> for TopOpportunity {
    fn from(row: &StoredOpportunity) -> Self {
        Self {
            business_type: row.business_type,
            opportunity_score: row.opportunity_score,
            competition_level: row.competition_level,
            estimated_demand: row.estimated_demand,
            recommendation: row.recommendation().to_string(),
        }
    }
}

/// Top opportunities of one region, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTopOpportunities {
    /// Region name.
    pub region: String,
    /// Opportunities in score order.
    pub opportunities: Vec<TopOpportunity>,
}

/// Top opportunities grouped by region.
///
/// Regions appear in the order of their best opportunity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopOpportunities {
    /// Number of regions with at least one top opportunity.
    pub total_regions: usize,
    /// Per-region groups.
    pub opportunities_by_region: Vec<RegionTopOpportunities>,
}

/// Count of opportunities per score band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDistribution {
    /// Score >= 80.
    pub excellent: usize,
    /// Score in `[65, 80)`.
    pub good: usize,
    /// Score in `[50, 65)`.
    pub moderate: usize,
    /// Score < 50.
    pub low: usize,
}

impl ScoreDistribution {
    /// Tallies `scores` into bands.
    #[must_use]
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut distribution = Self::default();
        for score in scores {
            distribution.record(score);
        }
        distribution
    }

    /// Adds one score to its band.
    pub fn record(&mut self, score: f64) {
        if score >= 80.0 {
            self.excellent += 1;
        } else if score >= 65.0 {
            self.good += 1;
        } else if score >= 50.0 {
            self.moderate += 1;
        } else {
            self.low += 1;
        }
    }

    /// Total number of scores recorded.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.excellent + self.good + self.moderate + self.low
    }
}

/// Count and average score for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// Category.
    pub business_type: BusinessCategory,
    /// Stored rows.
    pub count: usize,
    /// Average score (1dp).
    pub avg_score: f64,
}

/// Count and average score for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStats {
    /// Region name.
    pub region: String,
    /// Stored rows.
    pub count: usize,
    /// Average score (1dp).
    pub avg_score: f64,
}

/// Store-wide statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Total stored rows.
    pub total_opportunities: usize,
    /// Rows per score band.
    pub score_distribution: ScoreDistribution,
    /// Per-category statistics, in catalog order.
    pub business_type_stats: Vec<CategoryStats>,
    /// Per-region statistics, sorted by region name.
    pub region_stats: Vec<RegionStats>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use opportunity_map_analysis_models::{
        CompetitionAnalysis, DemandAnalysis, DensityAnalysis, RecommendationTier,
        SentimentAnalysis,
    };

    fn row(region: &str, category: BusinessCategory, score: f64) -> StoredOpportunity {
        let tier = RecommendationTier::from_score(score);
        let now = Utc::now();
        StoredOpportunity {
            id: 1,
            region: region.to_string(),
            business_type: category,
            opportunity_score: score,
            population_density: 0.0,
            competition_level: CompetitionLevel::Medium,
            estimated_demand: 100,
            analysis: AnalysisResult {
                business_type: category,
                opportunity_score: score,
                tier,
                recommendation: tier.message().to_string(),
                density_analysis: DensityAnalysis::default(),
                demand_analysis: DemandAnalysis::default(),
                competition_analysis: CompetitionAnalysis::unknown(),
                sentiment_analysis: SentimentAnalysis::neutral(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn default_query_matches_everything() {
        let query = OpportunityQuery::default();
        assert_eq!(query.limit, DEFAULT_QUERY_LIMIT);
        assert!(query.matches(&row("Moema", BusinessCategory::Gym, 12.0)));
    }

    #[test]
    fn region_filter_is_case_insensitive_substring() {
        let query = OpportunityQuery::for_region("são paulo");
        assert!(query.matches(&row("São Paulo - Centro", BusinessCategory::Gym, 50.0)));
        assert!(!query.matches(&row("Rio de Janeiro", BusinessCategory::Gym, 50.0)));
    }

    #[test]
    fn score_bounds_are_inclusive() {
        let query = OpportunityQuery {
            min_score: Some(50.0),
            max_score: Some(65.0),
            ..OpportunityQuery::default()
        };
        assert!(query.matches(&row("A", BusinessCategory::Bank, 50.0)));
        assert!(query.matches(&row("A", BusinessCategory::Bank, 65.0)));
        assert!(!query.matches(&row("A", BusinessCategory::Bank, 65.1)));
        assert!(!query.matches(&row("A", BusinessCategory::Bank, 49.9)));
    }

    #[test]
    fn category_and_competition_filters() {
        let query = OpportunityQuery {
            business_type: Some(BusinessCategory::Bakery),
            competition_level: Some(CompetitionLevel::Medium),
            ..OpportunityQuery::default()
        };
        assert!(query.matches(&row("A", BusinessCategory::Bakery, 70.0)));
        assert!(!query.matches(&row("A", BusinessCategory::Pharmacy, 70.0)));

        let low_only = OpportunityQuery {
            competition_level: Some(CompetitionLevel::Low),
            ..OpportunityQuery::default()
        };
        assert!(!low_only.matches(&row("A", BusinessCategory::Bakery, 70.0)));
    }

    #[test]
    fn distribution_bands() {
        let distribution = ScoreDistribution::from_scores([80.0, 79.9, 65.0, 64.9, 50.0, 49.9, 0.0]);
        assert_eq!(
            distribution,
            ScoreDistribution {
                excellent: 1,
                good: 2,
                moderate: 2,
                low: 2,
            }
        );
        assert_eq!(distribution.total(), 7);
    }

    #[test]
    fn query_deserializes_with_defaults() {
        let query: OpportunityQuery =
            serde_json::from_str(r#"{"region":"Lapa","minScore":60.0}"#).unwrap();
        assert_eq!(query.region.as_deref(), Some("Lapa"));
        assert_eq!(query.min_score, Some(60.0));
        assert_eq!(query.limit, DEFAULT_QUERY_LIMIT);
    }
}
