//! Comparison report: regions side by side.

use chrono::{DateTime, Utc};
use opportunity_map_analysis::round_to;
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_report_models::{
    ComparisonReport, ComparisonSummary, RegionComparison, ReportType,
};
use opportunity_map_store_models::{ScoreDistribution, StoredOpportunity, TopOpportunity};

/// Fewest regions a comparison accepts.
pub const MIN_REGIONS: usize = 2;

/// Builds the comparison from each region's stored rows, sorted by score
/// descending. `category` records the filter the rows were selected with.
///
/// Regions are ordered by average score, best first. Regions with equal
/// averages keep their input order. The overall average weighs every
/// region equally, including regions with nothing stored.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build(
    per_region: &[(String, Vec<StoredOpportunity>)],
    category: Option<BusinessCategory>,
    generated_at: DateTime<Utc>,
) -> ComparisonReport {
    let mut regions: Vec<RegionComparison> = per_region
        .iter()
        .map(|(region, rows)| compare_region(region, rows))
        .collect();
    regions.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));

    let overall_average = if regions.is_empty() {
        0.0
    } else {
        let total: f64 = regions.iter().map(|r| r.average_score).sum();
        round_to(total / regions.len() as f64, 1)
    };

    let summary = ComparisonSummary {
        best_region: regions.first().map(|r| r.region.clone()).unwrap_or_default(),
        regions_compared: regions.len(),
        overall_average,
    };

    ComparisonReport {
        report_type: ReportType::MarketComparison,
        business_type: category,
        generated_at,
        regions,
        summary,
    }
}

#[allow(clippy::cast_precision_loss)]
fn compare_region(region: &str, rows: &[StoredOpportunity]) -> RegionComparison {
    let average_score = if rows.is_empty() {
        0.0
    } else {
        let total: f64 = rows.iter().map(|r| r.opportunity_score).sum();
        round_to(total / rows.len() as f64, 1)
    };

    RegionComparison {
        region: region.to_string(),
        total_opportunities: rows.len(),
        average_score,
        best_opportunity: rows
            .iter()
            .reduce(|best, row| {
                if row.opportunity_score > best.opportunity_score {
                    row
                } else {
                    best
                }
            })
            .map(TopOpportunity::from),
        score_distribution: ScoreDistribution::from_scores(
            rows.iter().map(|r| r.opportunity_score),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opportunity_map_analysis_models::{
        AnalysisResult, CompetitionAnalysis, CompetitionLevel, DemandAnalysis, DensityAnalysis,
        RecommendationTier, SentimentAnalysis,
    };

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn row(region: &str, category: BusinessCategory, score: f64) -> StoredOpportunity {
        let tier = RecommendationTier::from_score(score);
        let now = Utc::now();
        StoredOpportunity {
            id: 0,
            region: region.to_string(),
            business_type: category,
            opportunity_score: score,
            population_density: 0.0,
            competition_level: CompetitionLevel::Medium,
            estimated_demand: 1000,
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
    fn orders_regions_by_average() {
        let per_region = vec![
            (
                "Centro".to_string(),
                vec![
                    row("Centro", BusinessCategory::Bank, 40.0),
                    row("Centro", BusinessCategory::Gym, 30.0),
                ],
            ),
            (
                "Moema".to_string(),
                vec![
                    row("Moema", BusinessCategory::Bakery, 85.0),
                    row("Moema", BusinessCategory::Pharmacy, 61.0),
                ],
            ),
        ];

        let report = build(&per_region, None, Utc::now());

        assert_eq!(report.report_type, ReportType::MarketComparison);
        assert_eq!(report.regions[0].region, "Moema");
        assert!(approx_eq(report.regions[0].average_score, 73.0));
        assert_eq!(
            report.regions[0]
                .best_opportunity
                .as_ref()
                .map(|b| b.business_type),
            Some(BusinessCategory::Bakery)
        );
        assert_eq!(report.regions[0].score_distribution.excellent, 1);
        assert!(approx_eq(report.regions[1].average_score, 35.0));

        assert_eq!(report.summary.best_region, "Moema");
        assert_eq!(report.summary.regions_compared, 2);
        assert!(approx_eq(report.summary.overall_average, 54.0));
        assert_eq!(report.business_type, None);
    }

    #[test]
    fn empty_region_scores_zero() {
        let per_region = vec![
            ("Nowhere".to_string(), Vec::new()),
            (
                "Centro".to_string(),
                vec![row("Centro", BusinessCategory::Bank, 40.0)],
            ),
        ];

        let report = build(&per_region, None, Utc::now());

        assert_eq!(report.regions[0].region, "Centro");
        let empty = &report.regions[1];
        assert_eq!(empty.total_opportunities, 0);
        assert!(approx_eq(empty.average_score, 0.0));
        assert!(empty.best_opportunity.is_none());
        assert!(approx_eq(report.summary.overall_average, 20.0));
    }

    #[test]
    fn equal_averages_keep_input_order() {
        let per_region = vec![
            ("B".to_string(), vec![row("B", BusinessCategory::Gym, 50.0)]),
            ("A".to_string(), vec![row("A", BusinessCategory::Gym, 50.0)]),
        ];

        let report = build(&per_region, None, Utc::now());

        assert_eq!(report.summary.best_region, "B");
        assert_eq!(report.regions[1].region, "A");
    }

    #[test]
    fn overall_average_weighs_regions_equally() {
        let per_region = vec![
            ("A".to_string(), vec![row("A", BusinessCategory::Gym, 90.0)]),
            (
                "B".to_string(),
                vec![
                    row("B", BusinessCategory::Gym, 10.0),
                    row("B", BusinessCategory::Bank, 10.0),
                    row("B", BusinessCategory::Bakery, 10.0),
                ],
            ),
            ("C".to_string(), Vec::new()),
        ];

        let report = build(&per_region, Some(BusinessCategory::Gym), Utc::now());

        // (90 + 10 + 0) / 3
        assert!(approx_eq(report.summary.overall_average, 33.3));
        assert_eq!(report.business_type, Some(BusinessCategory::Gym));
    }
}
