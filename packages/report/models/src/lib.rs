#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report document types.
//!
//! Reports are structured documents assembled from stored opportunity
//! analyses. Rendering them (Markdown, PDF) is left to consumers; every
//! type serializes to plain JSON.

use chrono::{DateTime, Utc};
use opportunity_map_analysis_models::{
    CompetitionAnalysis, DemandAnalysis, DensityAnalysis, SentimentAnalysis,
};
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_store_models::{ScoreDistribution, TopOpportunity};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Kind of report.
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
pub enum ReportType {
    /// Region-wide overview
    ExecutiveSummary,
    /// Single category deep dive
    DetailedAnalysis,
    /// Side-by-side regions
    MarketComparison,
}

/// Report outcome: either a report or an explanation of why none exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome<T> {
    /// The report was assembled.
    Success {
        /// The report document.
        report: T,
    },
    /// Nothing is stored for the requested scope.
    NoData {
        /// Human-readable explanation.
        message: String,
    },
}

impl<T> ReportOutcome<T> {
    /// Returns the report, if one was assembled.
    #[must_use]
    pub const fn report(&self) -> Option<&T> {
        match self {
            Self::Success { report } => Some(report),
            Self::NoData { .. } => None,
        }
    }
}

/// Common report header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Kind of report.
    pub report_type: ReportType,
    /// Region filter the report was built for.
    pub region: String,
    /// Category filter, if any.
    pub business_type: Option<BusinessCategory>,
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
}

// Executive report

/// Headline numbers for a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionOverview {
    /// Opportunities included.
    pub total_opportunities: usize,
    /// Average score (1dp).
    pub average_score: f64,
    /// Opportunities per score band.
    pub score_distribution: ScoreDistribution,
}

/// Per-category breakdown inside an executive report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// Category.
    pub business_type: BusinessCategory,
    /// Opportunities of this category.
    pub count: usize,
    /// Average score (1dp).
    pub avg_score: f64,
    /// Best score.
    pub best_score: f64,
}

/// Summary section of an executive report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    /// Headline numbers.
    pub region_overview: RegionOverview,
    /// Best opportunities, best first.
    pub top_opportunities: Vec<TopOpportunity>,
    /// Per-category breakdown, in score order of first appearance.
    pub categories_analysis: Vec<CategoryBreakdown>,
    /// Observations about the region.
    pub key_insights: Vec<String>,
    /// Suggested strategy.
    pub strategic_recommendations: Vec<String>,
}

/// Market findings section of an executive report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFindings {
    /// Categories with a large density gap.
    pub market_gaps: Vec<String>,
    /// Categories grouped by competition level.
    pub competition_landscape: Vec<String>,
    /// High-demand categories.
    pub demand_patterns: Vec<String>,
    /// Region-level risks.
    pub risk_assessment: Vec<String>,
}

/// Region-wide executive report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveReport {
    /// Header.
    pub metadata: ReportMetadata,
    /// Summary.
    pub executive_summary: ExecutiveSummary,
    /// Market findings.
    pub detailed_analysis: MarketFindings,
    /// Ranked investment priorities.
    pub investment_priorities: Vec<String>,
    /// Suggested next steps.
    pub next_steps: Vec<String>,
}

// Detailed report

/// Opening section of a detailed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityOverview {
    /// Category.
    pub business_type: BusinessCategory,
    /// Stored region name.
    pub region: String,
    /// Opportunity score.
    pub opportunity_score: f64,
    /// Short classification (e.g. `"Good"`).
    pub classification: String,
    /// Recommendation message.
    pub recommendation: String,
}

/// The four analyses behind a detailed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    /// Density gap.
    pub density_analysis: DensityAnalysis,
    /// Demand potential.
    pub demand_analysis: DemandAnalysis,
    /// Competitive saturation.
    pub competition_analysis: CompetitionAnalysis,
    /// Social sentiment.
    pub sentiment_analysis: SentimentAnalysis,
}

/// Rough revenue and return estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProjections {
    /// Up-front investment.
    pub initial_investment: f64,
    /// Estimated monthly revenue.
    pub monthly_revenue: f64,
    /// Estimated annual revenue.
    pub annual_revenue: f64,
    /// Months to recover the investment (0 when there is no revenue).
    pub payback_months: u64,
    /// First-year return on investment, as a whole percentage.
    pub annual_roi: i64,
}

/// One step of an implementation plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationPhase {
    /// Phase name.
    pub name: String,
    /// Expected duration.
    pub duration: String,
    /// What happens in the phase.
    pub description: String,
}

/// Ordered implementation phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationPlan {
    /// Phases in order.
    pub phases: Vec<ImplementationPhase>,
}

/// Deep dive on one category in one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReport {
    /// Header.
    pub metadata: ReportMetadata,
    /// Score and recommendation.
    pub opportunity_overview: OpportunityOverview,
    /// Underlying analyses.
    pub market_analysis: MarketAnalysis,
    /// Revenue and return estimates.
    pub financial_projections: FinancialProjections,
    /// Launch plan.
    pub implementation_plan: ImplementationPlan,
    /// Risk mitigation actions.
    pub risk_mitigation: Vec<String>,
    /// Critical success factors.
    pub success_factors: Vec<String>,
}

// Comparison report

/// One region's figures in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionComparison {
    /// Region filter as requested.
    pub region: String,
    /// Stored opportunities.
    pub total_opportunities: usize,
    /// Average score (1dp), 0 when nothing is stored.
    pub average_score: f64,
    /// Best stored opportunity.
    pub best_opportunity: Option<TopOpportunity>,
    /// Opportunities per score band.
    pub score_distribution: ScoreDistribution,
}

/// Overall comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    /// Region with the highest average score.
    pub best_region: String,
    /// Number of regions compared.
    pub regions_compared: usize,
    /// Average over every stored opportunity of the compared regions (1dp).
    pub overall_average: f64,
}

/// Side-by-side comparison of regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Kind of report.
    pub report_type: ReportType,
    /// Category filter applied to every region, if any.
    pub business_type: Option<BusinessCategory>,
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
    /// Regions sorted by average score, best first.
    pub regions: Vec<RegionComparison>,
    /// Overall result.
    pub summary: ComparisonSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_status_tag() {
        let no_data: ReportOutcome<ImplementationPlan> = ReportOutcome::NoData {
            message: "nothing stored".to_string(),
        };
        let json = serde_json::to_value(&no_data).unwrap();
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["message"], "nothing stored");
        assert!(no_data.report().is_none());

        let success = ReportOutcome::Success {
            report: ImplementationPlan::default(),
        };
        let json = serde_json::to_value(&success).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json["report"]["phases"].is_array());
        assert!(success.report().is_some());
    }

    #[test]
    fn report_type_names() {
        assert_eq!(ReportType::ExecutiveSummary.to_string(), "executive_summary");
        assert_eq!(
            serde_json::to_value(ReportType::MarketComparison).unwrap(),
            "market_comparison"
        );
    }
}
