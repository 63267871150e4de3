//! Detailed report: one category in one region, with financial estimates.

use chrono::{DateTime, Utc};
use opportunity_map_analysis::config::FinancialMetrics;
use opportunity_map_report_models::{
    DetailedReport, FinancialProjections, ImplementationPhase, ImplementationPlan,
    MarketAnalysis, OpportunityOverview, ReportMetadata, ReportType,
};
use opportunity_map_store_models::StoredOpportunity;

/// Share of gross customer spend counted as revenue.
pub const REVENUE_CAPTURE_RATE: f64 = 0.3;

const PHASES: &[(&str, &str, &str)] = &[
    (
        "Planning and Research",
        "2-4 weeks",
        "Market validation, site selection and business plan",
    ),
    (
        "Licensing and Setup",
        "4-8 weeks",
        "Licenses, renovation and equipment",
    ),
    (
        "Launch and Operation",
        "2-4 weeks",
        "Hiring, launch marketing and start of operations",
    ),
];

const RISK_MITIGATION: &[&str] = &[
    "Test the market with a minimal initial investment",
    "Establish partnerships with local suppliers",
    "Keep a rigorous financial management system",
    "Develop competitive differentiation strategies",
];

const SUCCESS_FACTORS: &[&str] = &[
    "Strategic, high-visibility location",
    "Differentiated and personalized service",
    "Competitive prices aligned with the local market",
    "Effective local digital marketing",
    "Efficient inventory and supplier management",
];

/// Builds the detailed report for a stored opportunity.
#[must_use]
pub fn build(
    region: &str,
    row: &StoredOpportunity,
    financials: &FinancialMetrics,
    generated_at: DateTime<Utc>,
) -> DetailedReport {
    let analysis = &row.analysis;

    DetailedReport {
        metadata: ReportMetadata {
            report_type: ReportType::DetailedAnalysis,
            region: region.to_string(),
            business_type: Some(row.business_type),
            generated_at,
        },
        opportunity_overview: OpportunityOverview {
            business_type: row.business_type,
            region: row.region.clone(),
            opportunity_score: row.opportunity_score,
            classification: analysis.tier.classification().to_string(),
            recommendation: analysis.tier.message().to_string(),
        },
        market_analysis: MarketAnalysis {
            density_analysis: analysis.density_analysis,
            demand_analysis: analysis.demand_analysis,
            competition_analysis: analysis.competition_analysis,
            sentiment_analysis: analysis.sentiment_analysis.clone(),
        },
        financial_projections: financial_projections(
            analysis.demand_analysis.estimated_monthly_customers,
            financials,
        ),
        implementation_plan: ImplementationPlan {
            phases: PHASES
                .iter()
                .map(|(name, duration, description)| ImplementationPhase {
                    name: (*name).to_string(),
                    duration: (*duration).to_string(),
                    description: (*description).to_string(),
                })
                .collect(),
        },
        risk_mitigation: RISK_MITIGATION.iter().map(|s| (*s).to_string()).collect(),
        success_factors: SUCCESS_FACTORS.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// Estimates revenue, payback and first-year ROI.
///
/// Payback is `0` when there is no revenue, and ROI is `0` when there is no
/// investment.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn financial_projections(
    monthly_customers: u64,
    financials: &FinancialMetrics,
) -> FinancialProjections {
    let investment = financials.initial_investment;
    let monthly_revenue = monthly_customers as f64 * financials.average_ticket * REVENUE_CAPTURE_RATE;
    let annual_revenue = monthly_revenue * 12.0;

    let payback_months = if monthly_revenue > 0.0 {
        (investment / monthly_revenue).round_ties_even() as u64
    } else {
        0
    };
    let annual_roi = if investment > 0.0 {
        ((annual_revenue - investment) / investment * 100.0).round_ties_even() as i64
    } else {
        0
    };

    FinancialProjections {
        initial_investment: investment,
        monthly_revenue,
        annual_revenue,
        payback_months,
        annual_roi,
    }
}
