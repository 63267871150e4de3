//! Demand potential analysis.
//!
//! Turns region population, density and rent into three factors in
//! `[0, 1]`, weights them 40/35/25 into a 0-100 score, and discounts the
//! score by commercial vacancy.

use opportunity_map_analysis_models::{DemandAnalysis, RegionSnapshot};

use crate::config::DemandDivisors;
use crate::round_to;

const POPULATION_WEIGHT: f64 = 40.0;
const DENSITY_WEIGHT: f64 = 35.0;
const RENT_WEIGHT: f64 = 25.0;

/// Vacancy rate (percent) at which demand is fully discounted.
const VACANCY_CEILING: f64 = 20.0;

/// Share of the reachable population expected to visit monthly.
const MONTHLY_VISIT_RATE: f64 = 0.1;

/// Analyzes demand potential for a region using `divisors`.
///
/// Never fails: a non-finite intermediate value yields
/// [`DemandAnalysis::default`] and an error log line.
#[must_use]
pub fn analyze_demand(region: &RegionSnapshot, divisors: &DemandDivisors) -> DemandAnalysis {
    compute(region, divisors).unwrap_or_else(|| {
        log::error!("Demand analysis produced a non-finite value for {region:?}");
        DemandAnalysis::default()
    })
}

fn unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
fn compute(region: &RegionSnapshot, divisors: &DemandDivisors) -> Option<DemandAnalysis> {
    let population = region.population as f64;

    let population_factor = unit(population / divisors.population_divisor);
    let density_factor = unit(region.density / divisors.density_divisor);
    let rent_factor = unit(1.0 - region.avg_commercial_rent / divisors.rent_divisor);
    let vacancy_adjustment = unit((VACANCY_CEILING - region.vacancy_rate) / VACANCY_CEILING);

    let demand_score = (population_factor * POPULATION_WEIGHT
        + density_factor * DENSITY_WEIGHT
        + rent_factor * RENT_WEIGHT)
        * vacancy_adjustment;

    let customers = (population * population_factor * MONTHLY_VISIT_RATE).round_ties_even();

    if ![
        population_factor,
        density_factor,
        rent_factor,
        vacancy_adjustment,
        demand_score,
        customers,
    ]
    .iter()
    .all(|v| v.is_finite())
    {
        return None;
    }

    Some(DemandAnalysis {
        demand_score: round_to(demand_score, 1),
        population_factor: round_to(population_factor, 2),
        density_factor: round_to(density_factor, 2),
        rent_factor: round_to(rent_factor, 2),
        vacancy_adjustment: round_to(vacancy_adjustment, 2),
        estimated_monthly_customers: customers as u64,
    })
}
