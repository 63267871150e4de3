//! Executive report: region-wide overview of stored opportunities.

use chrono::{DateTime, Utc};
use opportunity_map_analysis::round_to;
use opportunity_map_analysis_models::{CompetitionLevel, RecommendationTier};
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_report_models::{
    CategoryBreakdown, ExecutiveReport, ExecutiveSummary, MarketFindings, RegionOverview,
    ReportMetadata, ReportType,
};
use opportunity_map_store_models::{ScoreDistribution, StoredOpportunity, TopOpportunity};

/// Opportunities listed in the summary.
const TOP_COUNT: usize = 5;
/// Opportunities listed as investment priorities.
const PRIORITY_COUNT: usize = 3;
/// Density gap (percent) above which a category is listed as a market gap.
const MARKET_GAP_THRESHOLD: f64 = 50.0;
/// Monthly customers above which demand is considered high.
const HIGH_DEMAND_THRESHOLD: u64 = 15_000;
/// Score below which an opportunity counts toward the low-potential risk.
const LOW_POTENTIAL_SCORE: f64 = 35.0;
/// Share of low-potential categories that flags the region as high risk.
const LOW_POTENTIAL_SHARE: f64 = 0.7;
/// Share of saturated categories that flags a competition risk.
const HIGH_COMPETITION_SHARE: f64 = 0.5;

const NEXT_STEPS: &[&str] = &[
    "Run field research in the region to validate the data",
    "Survey available commercial locations",
    "Study the detailed demographic profile of the target audience",
    "Develop a business plan specific to the opportunity",
    "Seek strategic local partnerships",
];

/// Builds the executive report from `rows`, which must be sorted by score
/// descending and non-empty.
#[must_use]
pub fn build(
    region: &str,
    category: Option<BusinessCategory>,
    rows: &[StoredOpportunity],
    generated_at: DateTime<Utc>,
) -> ExecutiveReport {
    let average_score = average_score(rows);

    ExecutiveReport {
        metadata: ReportMetadata {
            report_type: ReportType::ExecutiveSummary,
            region: region.to_string(),
            business_type: category,
            generated_at,
        },
        executive_summary: ExecutiveSummary {
            region_overview: RegionOverview {
                total_opportunities: rows.len(),
                average_score: round_to(average_score, 1),
                score_distribution: ScoreDistribution::from_scores(
                    rows.iter().map(|r| r.opportunity_score),
                ),
            },
            top_opportunities: rows.iter().take(TOP_COUNT).map(TopOpportunity::from).collect(),
            categories_analysis: categories_analysis(rows),
            key_insights: key_insights(region, rows, average_score),
            strategic_recommendations: strategic_recommendations(rows),
        },
        detailed_analysis: MarketFindings {
            market_gaps: market_gaps(rows),
            competition_landscape: competition_landscape(rows),
            demand_patterns: demand_patterns(rows),
            risk_assessment: risk_assessment(rows),
        },
        investment_priorities: investment_priorities(rows),
        next_steps: NEXT_STEPS.iter().map(|s| (*s).to_string()).collect(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn average_score(rows: &[StoredOpportunity]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.opportunity_score).sum::<f64>() / rows.len() as f64
}

#[allow(clippy::cast_precision_loss)]
fn categories_analysis(rows: &[StoredOpportunity]) -> Vec<CategoryBreakdown> {
    let mut totals: Vec<(BusinessCategory, usize, f64, f64)> = Vec::new();
    for row in rows {
        match totals.iter_mut().find(|(c, ..)| *c == row.business_type) {
            Some((_, count, total, top)) => {
                *count += 1;
                *total += row.opportunity_score;
                *top = top.max(row.opportunity_score);
            }
            None => totals.push((row.business_type, 1, row.opportunity_score, row.opportunity_score)),
        }
    }

    totals
        .into_iter()
        .map(|(business_type, count, total, best_score)| CategoryBreakdown {
            business_type,
            count,
            avg_score: round_to(total / count as f64, 1),
            best_score,
        })
        .collect()
}

fn best(rows: &[StoredOpportunity]) -> Option<&StoredOpportunity> {
    rows.iter()
        .reduce(|best, row| if row.opportunity_score > best.opportunity_score { row } else { best })
}

fn key_insights(region: &str, rows: &[StoredOpportunity], average_score: f64) -> Vec<String> {
    let mut insights = Vec::new();
    if rows.is_empty() {
        return insights;
    }

    insights.push(if average_score >= 60.0 {
        format!("Region {region} shows above-average potential for new businesses")
    } else if average_score >= 40.0 {
        format!("Region {region} has moderate potential and calls for differentiated strategies")
    } else {
        format!("Region {region} presents significant challenges for new ventures")
    });

    if let Some(best) = best(rows) {
        insights.push(format!(
            "The '{}' category presents the best opportunity with a score of {:.1}",
            best.business_type, best.opportunity_score
        ));
    }

    let low_competition = rows
        .iter()
        .filter(|r| r.competition_level == CompetitionLevel::Low)
        .count();
    if low_competition > 0 {
        insights.push(format!(
            "{low_competition} categories face low competition, easing market entry"
        ));
    }

    insights
}

fn strategic_recommendations(rows: &[StoredOpportunity]) -> Vec<String> {
    let mut recommendations = Vec::new();
    if rows.is_empty() {
        return recommendations;
    }

    let first_in_tier = |tier: RecommendationTier| {
        rows.iter()
            .find(|r| RecommendationTier::from_score(r.opportunity_score) == tier)
    };

    if let Some(excellent) = first_in_tier(RecommendationTier::Excellent) {
        recommendations.push(format!(
            "Prioritize investment in {} given its high identified potential",
            excellent.business_type
        ));
    } else if let Some(good) = first_in_tier(RecommendationTier::Good) {
        recommendations.push(format!(
            "Consider {} as the first investment option",
            good.business_type
        ));
    }

    if rows.len() >= 3 {
        recommendations
            .push("Consider diversifying the portfolio across 2-3 business types".to_string());
    }

    recommendations.push("Run a detailed feasibility study before investing".to_string());
    recommendations.push("Monitor changes in the local market quarterly".to_string());
    recommendations
}

fn market_gaps(rows: &[StoredOpportunity]) -> Vec<String> {
    rows.iter()
        .filter(|r| r.analysis.density_analysis.gap_percentage > MARKET_GAP_THRESHOLD)
        .map(|r| {
            format!(
                "{}: {:.1}% gap versus ideal density",
                r.business_type, r.analysis.density_analysis.gap_percentage
            )
        })
        .collect()
}

fn competition_landscape(rows: &[StoredOpportunity]) -> Vec<String> {
    let mut groups: Vec<(CompetitionLevel, Vec<&str>)> = Vec::new();
    for row in rows {
        let label = row.business_type.label();
        match groups.iter_mut().find(|(level, _)| *level == row.competition_level) {
            Some((_, categories)) => categories.push(label),
            None => groups.push((row.competition_level, vec![label])),
        }
    }

    groups
        .into_iter()
        .map(|(level, categories)| format!("{level} competition: {}", categories.join(", ")))
        .collect()
}

fn demand_patterns(rows: &[StoredOpportunity]) -> Vec<String> {
    let high_demand: Vec<&str> = rows
        .iter()
        .filter(|r| r.estimated_demand > HIGH_DEMAND_THRESHOLD)
        .map(|r| r.business_type.label())
        .collect();

    if high_demand.is_empty() {
        Vec::new()
    } else {
        vec![format!("High demand identified in: {}", high_demand.join(", "))]
    }
}

#[allow(clippy::cast_precision_loss)]
fn risk_assessment(rows: &[StoredOpportunity]) -> Vec<String> {
    let total = rows.len() as f64;
    let mut risks = Vec::new();

    let low_potential = rows
        .iter()
        .filter(|r| r.opportunity_score < LOW_POTENTIAL_SCORE)
        .count();
    if low_potential as f64 > total * LOW_POTENTIAL_SHARE {
        risks.push("High risk: most categories show low potential".to_string());
    }

    let saturated = rows
        .iter()
        .filter(|r| {
            matches!(
                r.competition_level,
                CompetitionLevel::High | CompetitionLevel::VeryHigh
            )
        })
        .count();
    if saturated as f64 > total * HIGH_COMPETITION_SHARE {
        risks.push("Competition risk: market saturated in several categories".to_string());
    }

    risks
}

fn investment_priorities(rows: &[StoredOpportunity]) -> Vec<String> {
    let mut sorted: Vec<&StoredOpportunity> = rows.iter().collect();
    sorted.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));

    sorted
        .iter()
        .take(PRIORITY_COUNT)
        .enumerate()
        .map(|(i, r)| {
            format!(
                "Priority {}: {} (Score: {:.1})",
                i + 1,
                r.business_type,
                r.opportunity_score
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opportunity_map_analysis_models::{
        AnalysisResult, CompetitionAnalysis, DemandAnalysis, DensityAnalysis, SentimentAnalysis,
    };

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn row(
        category: BusinessCategory,
        score: f64,
        level: CompetitionLevel,
        gap: f64,
        demand: u64,
    ) -> StoredOpportunity {
        let tier = RecommendationTier::from_score(score);
        let now = Utc::now();
        StoredOpportunity {
            id: 0,
            region: "Pinheiros".to_string(),
            business_type: category,
            opportunity_score: score,
            population_density: 8000.0,
            competition_level: level,
            estimated_demand: demand,
            analysis: AnalysisResult {
                business_type: category,
                opportunity_score: score,
                tier,
                recommendation: tier.message().to_string(),
                density_analysis: DensityAnalysis {
                    gap_percentage: gap,
                    ..DensityAnalysis::default()
                },
                demand_analysis: DemandAnalysis {
                    estimated_monthly_customers: demand,
                    ..DemandAnalysis::default()
                },
                competition_analysis: CompetitionAnalysis {
                    competition_level: level,
                    ..CompetitionAnalysis::unknown()
                },
                sentiment_analysis: SentimentAnalysis::neutral(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn strong_region() -> Vec<StoredOpportunity> {
        vec![
            row(BusinessCategory::Bakery, 82.0, CompetitionLevel::Low, 75.0, 20_000),
            row(BusinessCategory::Gym, 70.0, CompetitionLevel::Low, 40.0, 9000),
            row(BusinessCategory::Pharmacy, 58.0, CompetitionLevel::Medium, 55.5, 16_000),
            row(BusinessCategory::Bank, 30.0, CompetitionLevel::VeryHigh, 0.0, 500),
        ]
    }

    #[test]
    fn overview_and_distribution() {
        let report = build("Pinheiros", None, &strong_region(), Utc::now());
        let overview = &report.executive_summary.region_overview;

        assert_eq!(report.metadata.report_type, ReportType::ExecutiveSummary);
        assert_eq!(overview.total_opportunities, 4);
        assert!(approx_eq(overview.average_score, 60.0));
        assert_eq!(overview.score_distribution.excellent, 1);
        assert_eq!(overview.score_distribution.good, 1);
        assert_eq!(overview.score_distribution.moderate, 1);
        assert_eq!(overview.score_distribution.low, 1);
        assert_eq!(report.executive_summary.top_opportunities.len(), 4);
        assert_eq!(report.next_steps.len(), 5);
    }

    #[test]
    fn insights_and_recommendations() {
        let report = build("Pinheiros", None, &strong_region(), Utc::now());
        let summary = &report.executive_summary;

        assert!(summary.key_insights[0].contains("above-average"));
        assert!(summary.key_insights[1].contains("'Bakery'"));
        assert!(summary.key_insights[1].contains("82.0"));
        assert!(summary.key_insights[2].starts_with("2 categories"));

        assert!(summary.strategic_recommendations[0].contains("Prioritize investment in Bakery"));
        assert_eq!(summary.strategic_recommendations.len(), 4);
    }

    #[test]
    fn market_findings() {
        let report = build("Pinheiros", None, &strong_region(), Utc::now());
        let findings = &report.detailed_analysis;

        assert_eq!(
            findings.market_gaps,
            vec![
                "Bakery: 75.0% gap versus ideal density".to_string(),
                "Pharmacy: 55.5% gap versus ideal density".to_string(),
            ]
        );
        assert_eq!(
            findings.competition_landscape,
            vec![
                "low competition: Bakery, Gym".to_string(),
                "medium competition: Pharmacy".to_string(),
                "very_high competition: Bank".to_string(),
            ]
        );
        assert_eq!(
            findings.demand_patterns,
            vec!["High demand identified in: Bakery, Pharmacy".to_string()]
        );
        assert!(findings.risk_assessment.is_empty());
    }

    #[test]
    fn weak_region_flags_risks() {
        let rows = vec![
            row(BusinessCategory::Bank, 30.0, CompetitionLevel::High, 0.0, 100),
            row(BusinessCategory::GasStation, 20.0, CompetitionLevel::VeryHigh, 0.0, 100),
            row(BusinessCategory::Supermarket, 10.0, CompetitionLevel::High, 0.0, 100),
        ];
        let report = build("Centro", None, &rows, Utc::now());

        assert!(report.executive_summary.key_insights[0].contains("significant challenges"));
        assert_eq!(report.detailed_analysis.risk_assessment.len(), 2);
        assert_eq!(
            report.executive_summary.strategic_recommendations[0],
            "Consider diversifying the portfolio across 2-3 business types"
        );
    }

    #[test]
    fn priorities_and_categories() {
        let report = build("Pinheiros", None, &strong_region(), Utc::now());

        assert_eq!(
            report.investment_priorities,
            vec![
                "Priority 1: Bakery (Score: 82.0)".to_string(),
                "Priority 2: Gym (Score: 70.0)".to_string(),
                "Priority 3: Pharmacy (Score: 58.0)".to_string(),
            ]
        );

        let categories = &report.executive_summary.categories_analysis;
        assert_eq!(categories.len(), 4);
        assert_eq!(categories[0].business_type, BusinessCategory::Bakery);
        assert_eq!(categories[0].count, 1);
        assert!(approx_eq(categories[0].best_score, 82.0));
    }
}
