//! Market density gap analysis.
//!
//! Compares the number of establishments a category has in a region with
//! the number the population could support, given the category's
//! residents-per-establishment threshold.

use opportunity_map_analysis_models::DensityAnalysis;
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_source_models::{BusinessObservation, find_for_category};

use crate::round_to;

/// Gap percentage above which a category is flagged as an opportunity.
pub const OPPORTUNITY_GAP_THRESHOLD: f64 = 20.0;

/// Analyzes the density gap for `category`.
///
/// A category with no observation counts as zero establishments. Never
/// fails: a non-finite intermediate value yields
/// [`DensityAnalysis::default`] and an error log line.
#[must_use]
pub fn analyze_density(
    observations: &[BusinessObservation],
    population: u64,
    category: BusinessCategory,
    population_threshold: u64,
) -> DensityAnalysis {
    let current_count =
        find_for_category(observations, category).map_or(0, |obs| obs.establishment_count);

    compute(current_count, population, population_threshold).unwrap_or_else(|| {
        log::error!(
            "Density analysis for {category} produced a non-finite value \
             (count={current_count}, population={population}, threshold={population_threshold})"
        );
        DensityAnalysis::default()
    })
}

#[allow(clippy::cast_precision_loss)]
fn compute(current_count: u64, population: u64, threshold: u64) -> Option<DensityAnalysis> {
    let count = current_count as f64;
    let population_f = population as f64;

    let (per_1000, per_10000) = if population > 0 {
        (
            count / population_f * 1000.0,
            count / population_f * 10_000.0,
        )
    } else {
        (0.0, 0.0)
    };

    let ideal_count = population_f / threshold as f64;
    let gap = if ideal_count > 0.0 {
        ((ideal_count - count) / ideal_count * 100.0).max(0.0)
    } else {
        0.0
    };

    if ![per_1000, per_10000, ideal_count, gap]
        .iter()
        .all(|v| v.is_finite())
    {
        return None;
    }

    Some(DensityAnalysis {
        current_count,
        ideal_count: round_to(ideal_count, 1),
        density_per_1000: round_to(per_1000, 2),
        density_per_10000: round_to(per_10000, 2),
        gap_percentage: round_to(gap, 1),
        has_opportunity: gap > OPPORTUNITY_GAP_THRESHOLD,
    })
}
