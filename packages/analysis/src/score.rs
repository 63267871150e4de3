//! Weighted aggregation of analyzer outputs into an opportunity score.
//!
//! The demand score feeds two weight terms: `demand_potential` and
//! `economic_indicators`. Sub-scores are weighted as produced; only the
//! density gap is capped at 100.

use opportunity_map_analysis_models::{
    AnalysisResult, CompetitionAnalysis, DemandAnalysis, DensityAnalysis, RecommendationTier,
    SentimentAnalysis,
};
use opportunity_map_category_models::BusinessCategory;

use crate::config::ScoreWeights;
use crate::round_to;

/// Maximum density gap that contributes to the score.
const MAX_GAP_CONTRIBUTION: f64 = 100.0;

/// Combines sub-scores into an opportunity score rounded to 1dp.
///
/// Never fails: a non-finite weighted sum yields `0.0` and an error log
/// line.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn opportunity_score(
    weights: &ScoreWeights,
    density: &DensityAnalysis,
    demand: &DemandAnalysis,
    competition: &CompetitionAnalysis,
    sentiment: &SentimentAnalysis,
) -> f64 {
    let score = density.gap_percentage.min(MAX_GAP_CONTRIBUTION) * weights.density_gap
        + demand.demand_score * weights.demand_potential
        + competition.competition_score * weights.competition_level
        + demand.demand_score * weights.economic_indicators
        + sentiment.sentiment_score * weights.sentiment_score;

    if !score.is_finite() {
        log::error!("Opportunity score aggregation produced {score}, using 0.0");
        return 0.0;
    }

    round_to(score, 1)
}

/// Scores the four analyses for `category` and attaches its recommendation.
#[must_use]
pub fn build_result(
    category: BusinessCategory,
    weights: &ScoreWeights,
    density_analysis: DensityAnalysis,
    demand_analysis: DemandAnalysis,
    competition_analysis: CompetitionAnalysis,
    sentiment_analysis: SentimentAnalysis,
) -> AnalysisResult {
    let opportunity_score = opportunity_score(
        weights,
        &density_analysis,
        &demand_analysis,
        &competition_analysis,
        &sentiment_analysis,
    );
    let tier = RecommendationTier::from_score(opportunity_score);

    AnalysisResult {
        business_type: category,
        opportunity_score,
        tier,
        recommendation: tier.message().to_string(),
        density_analysis,
        demand_analysis,
        competition_analysis,
        sentiment_analysis,
    }
}
