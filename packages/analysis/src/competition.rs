//! Competitive saturation analysis.
//!
//! Classifies a category's establishment density against an assumed
//! national average, then nudges the score by recent growth: a fast
//! growing market is more crowded, a shrinking one leaves room.

use opportunity_map_analysis_models::{CompetitionAnalysis, CompetitionLevel};
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_source_models::{BusinessObservation, find_for_category};

use crate::round_to;

/// Assumed national average establishments per 100k residents.
pub const NATIONAL_AVERAGE_DENSITY: f64 = 50.0;

/// Saturation bands as `(upper bound exclusive, level, score)`.
const SATURATION_BANDS: &[(f64, CompetitionLevel, f64)] = &[
    (0.5, CompetitionLevel::Low, 80.0),
    (1.0, CompetitionLevel::Medium, 60.0),
    (1.5, CompetitionLevel::High, 40.0),
];

const VERY_HIGH_SCORE: f64 = 20.0;

/// Growth (percent) above which the score is reduced.
const FAST_GROWTH: f64 = 10.0;
const GROWTH_ADJUSTMENT: f64 = 10.0;

/// Analyzes competition for `category`.
///
/// Without an observation the result is [`CompetitionAnalysis::unknown`].
/// Never fails: non-finite observation values also yield the unknown
/// result, with an error log line.
#[must_use]
pub fn analyze_competition(
    observations: &[BusinessObservation],
    category: BusinessCategory,
) -> CompetitionAnalysis {
    let Some(observation) = find_for_category(observations, category) else {
        log::debug!("No business observation for {category}, competition unknown");
        return CompetitionAnalysis::unknown();
    };

    compute(observation).unwrap_or_else(|| {
        log::error!("Competition analysis for {category} got non-finite input: {observation:?}");
        CompetitionAnalysis::unknown()
    })
}

/// Maps a saturation ratio to its level and base score.
#[must_use]
pub fn classify_saturation(ratio: f64) -> (CompetitionLevel, f64) {
    SATURATION_BANDS
        .iter()
        .find(|(upper, _, _)| ratio < *upper)
        .map_or((CompetitionLevel::VeryHigh, VERY_HIGH_SCORE), |(_, level, score)| {
            (*level, *score)
        })
}

fn compute(observation: &BusinessObservation) -> Option<CompetitionAnalysis> {
    let density = observation.density_per_100k;
    let growth = observation.growth_rate_last_year;
    if !density.is_finite() || !growth.is_finite() {
        return None;
    }

    let saturation = density / NATIONAL_AVERAGE_DENSITY;
    let (competition_level, base_score) = classify_saturation(saturation);

    let score = if growth > FAST_GROWTH {
        base_score - GROWTH_ADJUSTMENT
    } else if growth < 0.0 {
        base_score + GROWTH_ADJUSTMENT
    } else {
        base_score
    };

    Some(CompetitionAnalysis {
        competition_level,
        competition_score: round_to(score.clamp(0.0, 100.0), 1),
        market_saturation: round_to(saturation, 2),
        growth_trend: growth,
        establishment_count: observation.establishment_count,
        density_per_100k: density,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn observation(density: f64, growth: f64) -> BusinessObservation {
        BusinessObservation {
            category: "Gym".to_string(),
            establishment_count: 12,
            density_per_100k: density,
            growth_rate_last_year: growth,
        }
    }

    fn analyze(density: f64, growth: f64) -> CompetitionAnalysis {
        analyze_competition(&[observation(density, growth)], BusinessCategory::Gym)
    }

    #[test]
    fn missing_observation_is_unknown() {
        let result = analyze_competition(&[], BusinessCategory::Barbershop);

        assert_eq!(result.competition_level, CompetitionLevel::Unknown);
        assert!(approx_eq(result.competition_score, 50.0));
        assert!(approx_eq(result.market_saturation, 0.0));
        assert!(approx_eq(result.growth_trend, 0.0));
        assert_eq!(result.establishment_count, 0);
    }

    #[test]
    fn low_saturation_fast_growth() {
        let result = analyze(20.0, 15.0);

        assert_eq!(result.competition_level, CompetitionLevel::Low);
        assert!(approx_eq(result.market_saturation, 0.4));
        assert!(approx_eq(result.competition_score, 70.0));
        assert!(approx_eq(result.growth_trend, 15.0));
        assert_eq!(result.establishment_count, 12);
    }

    #[test]
    fn high_saturation_shrinking_market() {
        let result = analyze(60.0, -3.0);

        assert_eq!(result.competition_level, CompetitionLevel::High);
        assert!(approx_eq(result.competition_score, 50.0));
    }

    #[test]
    fn very_high_saturation() {
        let result = analyze(100.0, 12.0);

        assert_eq!(result.competition_level, CompetitionLevel::VeryHigh);
        assert!(approx_eq(result.market_saturation, 2.0));
        assert!(approx_eq(result.competition_score, 10.0));
    }

    #[test]
    fn band_upper_bounds_are_exclusive() {
        assert_eq!(analyze(25.0, 5.0).competition_level, CompetitionLevel::Medium);
        assert_eq!(analyze(50.0, 5.0).competition_level, CompetitionLevel::High);
        assert_eq!(analyze(75.0, 5.0).competition_level, CompetitionLevel::VeryHigh);
    }

    #[test]
    fn growth_of_exactly_ten_is_not_penalized() {
        assert!(approx_eq(analyze(10.0, 10.0).competition_score, 80.0));
        assert!(approx_eq(analyze(10.0, 0.0).competition_score, 80.0));
    }

    #[test]
    fn score_stays_in_range() {
        for density in [0.0, 24.9, 49.9, 74.9, 1e6] {
            for growth in [-50.0, 0.0, 5.0, 50.0] {
                let score = analyze(density, growth).competition_score;
                assert!((0.0..=100.0).contains(&score), "{density} {growth} {score}");
            }
        }
    }

    #[test]
    fn non_finite_density_is_unknown() {
        let result = analyze(f64::NAN, 0.0);
        assert_eq!(result, CompetitionAnalysis::unknown());
    }
}
