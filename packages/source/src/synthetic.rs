//! Deterministic synthetic region data.
//!
//! Stands in for real demographic, commercial, social and rental feeds.
//! Every dataset is derived from a stable SHA-256 seed of the region name,
//! so the same region always yields the same numbers across runs and
//! processes.

use opportunity_map_category_models::BusinessCategory;
use opportunity_map_source_models::{
    BusinessObservation, DemographicSnapshot, RentalSnapshot, SocialObservation, round_to,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use rand::{Rng as _, SeedableRng as _};
use sha2::{Digest as _, Sha256};

use crate::{InputProvider, ProviderError};

/// Complaint labels the synthetic social feed samples from.
pub const KNOWN_COMPLAINTS: &[&str] = &["Atendimento demorado", "Preços altos", "Falta de variedade"];

/// Number of leading catalog categories that receive social data.
const SOCIAL_CATEGORY_COUNT: usize = 9;

/// Population assumed when the region name matches no known metro.
const BASE_POPULATION: u64 = 50_000;

/// Commercial rent assumed when the region name matches no known metro.
const BASE_RENT: i64 = 5_000;

/// Provider that fabricates stable per-region datasets.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    catalog: Vec<BusinessCategory>,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(BusinessCategory::all().to_vec())
    }
}

impl SyntheticProvider {
    /// Creates a provider that emits observations for `catalog`, in order.
    #[must_use]
    pub const fn new(catalog: Vec<BusinessCategory>) -> Self {
        Self { catalog }
    }
}

/// Derives a stable 64-bit seed from the region name.
#[must_use]
pub fn region_seed(region: &str) -> u64 {
    let digest = Sha256::digest(region.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

fn base_population(region: &str) -> u64 {
    if region.contains("São Paulo") {
        200_000
    } else if region.contains("Rio") {
        150_000
    } else if region.contains("Belo Horizonte") {
        100_000
    } else {
        BASE_POPULATION
    }
}

fn base_rent(region: &str) -> i64 {
    if region.contains("São Paulo") {
        12_000
    } else if region.contains("Rio") {
        8_000
    } else {
        BASE_RENT
    }
}

#[allow(clippy::cast_precision_loss)]
impl InputProvider for SyntheticProvider {
    fn demographic_snapshot(
        &self,
        region: &str,
    ) -> Result<Option<DemographicSnapshot>, ProviderError> {
        let population = base_population(region);
        Ok(Some(DemographicSnapshot {
            population,
            density: population as f64 / 10.0,
        }))
    }

    fn business_observations(
        &self,
        region: &str,
    ) -> Result<Vec<BusinessObservation>, ProviderError> {
        let seed = region_seed(region);
        let count_offset = seed % 20;
        let growth_offset = (seed % 10) as f64;

        Ok(self
            .catalog
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let count = (i as u64) * 15 + 10 + count_offset;
                BusinessObservation {
                    category: category.label().to_string(),
                    establishment_count: count,
                    density_per_100k: round_to(count as f64 / 50_000.0 * 100_000.0, 2),
                    growth_rate_last_year: round_to(
                        (i as f64).mul_add(2.5, -5.0) + growth_offset,
                        1,
                    ),
                }
            })
            .collect())
    }

    fn social_observations(&self, region: &str) -> Result<Vec<SocialObservation>, ProviderError> {
        let mut rng = StdRng::seed_from_u64(region_seed(region));

        Ok(self
            .catalog
            .iter()
            .take(SOCIAL_CATEGORY_COUNT)
            .map(|category| {
                let positive: u64 = rng.gen_range(50..=500);
                let negative: u64 = rng.gen_range(10..=100);
                let neutral: u64 = rng.gen_range(20..=200);
                let total = positive + negative + neutral;
                let score = (positive as f64 - negative as f64) / total as f64 * 100.0;

                let complaint_count = rng.gen_range(1..=KNOWN_COMPLAINTS.len());
                let main_complaints = KNOWN_COMPLAINTS
                    .choose_multiple(&mut rng, complaint_count)
                    .map(|c| (*c).to_string())
                    .collect();

                SocialObservation {
                    category: category.label().to_string(),
                    total_mentions: total,
                    sentiment_score_raw: round_to(score, 2),
                    main_complaints,
                }
            })
            .collect())
    }

    fn rental_snapshot(&self, region: &str) -> Result<Option<RentalSnapshot>, ProviderError> {
        let mut rng = StdRng::seed_from_u64(region_seed(region));
        let rent = base_rent(region) + rng.gen_range(-2_000..=5_000);
        let vacancy: f64 = rng.gen_range(5.0..=15.0);

        Ok(Some(RentalSnapshot {
            avg_commercial_rent: rent as f64,
            vacancy_rate: round_to(vacancy, 1),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_region_yields_same_data() {
        let provider = SyntheticProvider::default();
        let a = provider.fetch_all("Pinheiros").unwrap();
        let b = provider.fetch_all("Pinheiros").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn metro_profiles_set_population() {
        let provider = SyntheticProvider::default();
        let sp = provider
            .demographic_snapshot("São Paulo - Centro")
            .unwrap()
            .unwrap();
        assert_eq!(sp.population, 200_000);
        assert!((sp.density - 20_000.0).abs() < f64::EPSILON);

        let other = provider.demographic_snapshot("Curitiba").unwrap().unwrap();
        assert_eq!(other.population, 50_000);
    }

    #[test]
    fn business_observations_cover_catalog() {
        let provider = SyntheticProvider::default();
        let seed = region_seed("Moema");
        let observations = provider.business_observations("Moema").unwrap();

        assert_eq!(observations.len(), BusinessCategory::all().len());
        assert_eq!(observations[0].category, "Pet Shop");
        assert_eq!(observations[0].establishment_count, 10 + seed % 20);
        assert_eq!(observations[2].establishment_count, 40 + seed % 20);
    }

    #[test]
    fn social_observations_stay_in_bounds() {
        let provider = SyntheticProvider::default();
        let observations = provider.social_observations("Liberdade").unwrap();

        assert_eq!(observations.len(), SOCIAL_CATEGORY_COUNT);
        for obs in &observations {
            assert!((80..=800).contains(&obs.total_mentions));
            assert!(obs.sentiment_score_raw > -100.0 && obs.sentiment_score_raw < 100.0);
            assert!((1..=3).contains(&obs.main_complaints.len()));
            for complaint in &obs.main_complaints {
                assert!(KNOWN_COMPLAINTS.contains(&complaint.as_str()));
            }
        }
    }

    #[test]
    fn rental_snapshot_stays_in_bounds() {
        let provider = SyntheticProvider::default();
        let rental = provider
            .rental_snapshot("Rio de Janeiro - Tijuca")
            .unwrap()
            .unwrap();

        assert!((6_000.0..=13_000.0).contains(&rental.avg_commercial_rent));
        assert!((5.0..=15.0).contains(&rental.vacancy_rate));
    }

    #[test]
    fn rounded_values_sit_on_the_half_even_grid() {
        let provider = SyntheticProvider::default();

        for obs in provider.social_observations("Pinheiros").unwrap() {
            let score = obs.sentiment_score_raw;
            assert!(
                (round_to(score, 2) - score).abs() < f64::EPSILON,
                "sentiment score {score} not rounded to 2 places"
            );
        }

        let rental = provider.rental_snapshot("Pinheiros").unwrap().unwrap();
        assert!((round_to(rental.vacancy_rate, 1) - rental.vacancy_rate).abs() < f64::EPSILON);

        // Same helper the analyzers use: ties go to the even neighbor.
        assert!((round_to(0.125, 2) - 0.12).abs() < 1e-12);
        assert!((round_to(-4.25, 1) + 4.2).abs() < 1e-12);
    }
}
