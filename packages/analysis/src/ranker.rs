//! Region-wide opportunity ranking.
//!
//! [`RegionRanker`] fetches a region's datasets from an [`InputProvider`],
//! scores every configured category and sorts the results. It always
//! returns a well-formed [`RegionRankingResult`]: provider failures become
//! an `error` outcome and a region with no data at all becomes `no_data`.

use std::sync::Arc;

use chrono::Utc;
use opportunity_map_analysis_models::{
    AnalysisResult, RankedOpportunities, RankingOutcome, RegionRankingResult, RegionSnapshot,
};
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_source::InputProvider;
use opportunity_map_source_models::RegionDatasets;

use crate::competition::analyze_competition;
use crate::config::ScoringConfig;
use crate::demand::analyze_demand;
use crate::density::analyze_density;
use crate::score::build_result;
use crate::sentiment::analyze_sentiment;

/// Number of results reported as top opportunities.
pub const DEFAULT_TOP_N: usize = 5;

/// Population the density analyzer assumes when no demographic data exists.
pub const FALLBACK_DENSITY_POPULATION: u64 = 50_000;

/// Scores all catalog categories for a region.
#[derive(Clone)]
pub struct RegionRanker {
    config: Arc<ScoringConfig>,
    provider: Arc<dyn InputProvider>,
    top_n: usize,
}

impl std::fmt::Debug for RegionRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionRanker")
            .field("categories", &self.config.categories.len())
            .field("top_n", &self.top_n)
            .finish_non_exhaustive()
    }
}

impl RegionRanker {
    /// Creates a ranker reporting the top [`DEFAULT_TOP_N`] results.
    #[must_use]
    pub fn new(config: Arc<ScoringConfig>, provider: Arc<dyn InputProvider>) -> Self {
        Self {
            config,
            provider,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Overrides how many results are reported as top opportunities.
    #[must_use]
    pub const fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Returns the scoring configuration in use.
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Fetches and ranks all categories for `region`.
    #[must_use]
    pub fn analyze_region(&self, region: &str) -> RegionRankingResult {
        log::info!("Analyzing opportunities for region '{region}'");

        let outcome = match self.provider.fetch_all(region) {
            Ok(datasets) => self.rank_datasets(region, &datasets),
            Err(e) => {
                log::error!("Failed to fetch datasets for region '{region}': {e}");
                RankingOutcome::Error {
                    error: e.to_string(),
                }
            }
        };

        RegionRankingResult {
            region: region.to_string(),
            outcome,
        }
    }

    /// Ranks each region in order.
    #[must_use]
    pub fn analyze_regions<S: AsRef<str>>(&self, regions: &[S]) -> Vec<RegionRankingResult> {
        regions
            .iter()
            .map(|region| self.analyze_region(region.as_ref()))
            .collect()
    }

    /// Ranks already-fetched datasets.
    #[must_use]
    pub fn rank_datasets(&self, region: &str, datasets: &RegionDatasets) -> RankingOutcome {
        if datasets.is_empty() {
            log::warn!("No data available for region '{region}'");
            return RankingOutcome::NoData {
                message: format!("No data available for region '{region}'"),
            };
        }

        let region_summary = RegionSnapshot::from_datasets(datasets);

        let mut all_opportunities: Vec<AnalysisResult> = self
            .config
            .catalog()
            .map(|category| self.analyze_category(category, datasets, &region_summary))
            .collect();

        // Stable, so equal scores keep catalog order.
        all_opportunities.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));

        let top_opportunities: Vec<AnalysisResult> = all_opportunities
            .iter()
            .take(self.top_n)
            .cloned()
            .collect();

        log::info!(
            "Ranked {} categories for '{region}', best: {}",
            all_opportunities.len(),
            top_opportunities.first().map_or_else(
                || "none".to_string(),
                |r| format!("{} ({:.1})", r.business_type, r.opportunity_score)
            ),
        );

        RankingOutcome::Success(RankedOpportunities {
            analysis_timestamp: Utc::now(),
            total_opportunities: all_opportunities.len(),
            top_opportunities,
            all_opportunities,
            region_summary,
        })
    }

    /// Runs the four analyzers and the aggregator for one category.
    #[must_use]
    pub fn analyze_category(
        &self,
        category: BusinessCategory,
        datasets: &RegionDatasets,
        region_summary: &RegionSnapshot,
    ) -> AnalysisResult {
        let density_population = datasets
            .demographic
            .map_or(FALLBACK_DENSITY_POPULATION, |d| d.population);

        let density = analyze_density(
            &datasets.businesses,
            density_population,
            category,
            self.config.population_threshold(category),
        );
        let demand = analyze_demand(region_summary, &self.config.demand_divisors(category));
        let competition = analyze_competition(&datasets.businesses, category);
        let sentiment = analyze_sentiment(&datasets.social, category);

        let result = build_result(
            category,
            &self.config.weights,
            density,
            demand,
            competition,
            sentiment,
        );
        log::debug!(
            "{category}: score {:.1} ({})",
            result.opportunity_score,
            result.tier.label()
        );
        result
    }
}
