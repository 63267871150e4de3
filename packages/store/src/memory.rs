//! In-memory opportunity store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use opportunity_map_analysis::round_to;
use opportunity_map_analysis_models::{RankingOutcome, RegionRankingResult};
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_store_models::{
    AnalysisSummary, CategoryStats, OpportunityQuery, RegionStats, RegionTopOpportunities,
    ScoreDistribution, StoredOpportunity, TOP_OPPORTUNITY_MIN_SCORE, TopOpportunities,
    TopOpportunity, region_contains,
};
use tokio::sync::RwLock;

use crate::{OpportunityStore, StoreError};

type RowKey = (String, BusinessCategory);

#[derive(Debug, Default)]
struct Rows {
    by_key: BTreeMap<RowKey, StoredOpportunity>,
    next_id: u64,
}

/// Opportunity store backed by an ordered map behind an async `RwLock`.
///
/// Concurrent upserts of the same `(region, category)` key are serialized
/// by the write lock; the last writer wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Rows>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.by_key.len()
    }

    /// Returns `true` if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.by_key.is_empty()
    }
}

/// Sorts rows by score descending. Equal scores keep their key order.
fn sort_by_score(rows: &mut [StoredOpportunity]) {
    rows.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));
}

#[allow(clippy::cast_precision_loss)]
fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round_to(sum / count as f64, 1)
    }
}

#[async_trait]
impl OpportunityStore for MemoryStore {
    async fn upsert_region(&self, result: &RegionRankingResult) -> Result<usize, StoreError> {
        let RankingOutcome::Success(ranked) = &result.outcome else {
            log::debug!(
                "Skipping store of region '{}' with status {}",
                result.region,
                result.status()
            );
            return Ok(0);
        };

        if result.region.trim().is_empty() {
            return Err(StoreError::Rejected {
                region: result.region.clone(),
                message: "region name is empty".to_string(),
            });
        }

        let now = Utc::now();
        let mut rows = self.rows.write().await;
        let mut written = 0;

        for opportunity in &ranked.all_opportunities {
            let key = (result.region.clone(), opportunity.business_type);
            let competition_level = opportunity.competition_analysis.competition_level;
            let estimated_demand = opportunity.demand_analysis.estimated_monthly_customers;

            if let Some(existing) = rows.by_key.get_mut(&key) {
                existing.opportunity_score = opportunity.opportunity_score;
                existing.competition_level = competition_level;
                existing.estimated_demand = estimated_demand;
                existing.analysis = opportunity.clone();
                existing.updated_at = now;
            } else {
                rows.next_id += 1;
                let id = rows.next_id;
                rows.by_key.insert(
                    key,
                    StoredOpportunity {
                        id,
                        region: result.region.clone(),
                        business_type: opportunity.business_type,
                        opportunity_score: opportunity.opportunity_score,
                        population_density: ranked.region_summary.density,
                        competition_level,
                        estimated_demand,
                        analysis: opportunity.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
            written += 1;
        }
        drop(rows);

        log::info!("Stored {written} opportunities for region '{}'", result.region);
        Ok(written)
    }

    async fn query(&self, query: &OpportunityQuery) -> Result<Vec<StoredOpportunity>, StoreError> {
        let mut matches: Vec<StoredOpportunity> = self
            .rows
            .read()
            .await
            .by_key
            .values()
            .filter(|row| query.matches(row))
            .cloned()
            .collect();

        sort_by_score(&mut matches);
        matches.truncate(query.limit);
        Ok(matches)
    }

    async fn get(
        &self,
        region: &str,
        category: BusinessCategory,
    ) -> Result<Option<StoredOpportunity>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .by_key
            .get(&(region.to_string(), category))
            .cloned())
    }

    async fn top_opportunities(
        &self,
        region: Option<&str>,
        limit: usize,
    ) -> Result<TopOpportunities, StoreError> {
        let mut best: Vec<StoredOpportunity> = self
            .rows
            .read()
            .await
            .by_key
            .values()
            .filter(|row| row.opportunity_score >= TOP_OPPORTUNITY_MIN_SCORE)
            .filter(|row| region.is_none_or(|needle| region_contains(&row.region, needle)))
            .cloned()
            .collect();
        sort_by_score(&mut best);
        best.truncate(limit);

        let mut groups: Vec<RegionTopOpportunities> = Vec::new();
        for row in &best {
            let entry = TopOpportunity::from(row);
            match groups.iter_mut().find(|g| g.region == row.region) {
                Some(group) => group.opportunities.push(entry),
                None => groups.push(RegionTopOpportunities {
                    region: row.region.clone(),
                    opportunities: vec![entry],
                }),
            }
        }

        Ok(TopOpportunities {
            total_regions: groups.len(),
            opportunities_by_region: groups,
        })
    }

    async fn summary(&self) -> Result<AnalysisSummary, StoreError> {
        let rows = self.rows.read().await;

        let mut score_distribution = ScoreDistribution::default();
        let mut by_category: BTreeMap<BusinessCategory, (usize, f64)> = BTreeMap::new();
        let mut by_region: BTreeMap<&str, (usize, f64)> = BTreeMap::new();

        for row in rows.by_key.values() {
            score_distribution.record(row.opportunity_score);

            let category = by_category.entry(row.business_type).or_default();
            category.0 += 1;
            category.1 += row.opportunity_score;

            let region = by_region.entry(row.region.as_str()).or_default();
            region.0 += 1;
            region.1 += row.opportunity_score;
        }

        let business_type_stats = by_category
            .into_iter()
            .map(|(business_type, (count, sum))| CategoryStats {
                business_type,
                count,
                avg_score: average(sum, count),
            })
            .collect();

        let region_stats = by_region
            .into_iter()
            .map(|(region, (count, sum))| RegionStats {
                region: region.to_string(),
                count,
                avg_score: average(sum, count),
            })
            .collect();

        Ok(AnalysisSummary {
            total_opportunities: rows.by_key.len(),
            score_distribution,
            business_type_stats,
            region_stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use opportunity_map_analysis_models::{
        AnalysisResult, CompetitionAnalysis, CompetitionLevel, DemandAnalysis, DensityAnalysis,
        RankedOpportunities, RecommendationTier, RegionSnapshot, SentimentAnalysis,
    };

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn opportunity(category: BusinessCategory, score: f64) -> AnalysisResult {
        let tier = RecommendationTier::from_score(score);
        AnalysisResult {
            business_type: category,
            opportunity_score: score,
            tier,
            recommendation: tier.message().to_string(),
            density_analysis: DensityAnalysis::default(),
            demand_analysis: DemandAnalysis {
                estimated_monthly_customers: 1200,
                ..DemandAnalysis::default()
            },
            competition_analysis: CompetitionAnalysis {
                competition_level: CompetitionLevel::Low,
                ..CompetitionAnalysis::unknown()
            },
            sentiment_analysis: SentimentAnalysis::neutral(),
        }
    }

    fn success(region: &str, scored: &[(BusinessCategory, f64)]) -> RegionRankingResult {
        let all: Vec<_> = scored
            .iter()
            .map(|(category, score)| opportunity(*category, *score))
            .collect();
        RegionRankingResult {
            region: region.to_string(),
            outcome: RankingOutcome::Success(RankedOpportunities {
                analysis_timestamp: Utc::now(),
                total_opportunities: all.len(),
                top_opportunities: all.iter().take(5).cloned().collect(),
                all_opportunities: all,
                region_summary: RegionSnapshot {
                    population: 100_000,
                    density: 10_000.0,
                    avg_commercial_rent: 8000.0,
                    vacancy_rate: 9.0,
                },
            }),
        }
    }

    #[tokio::test]
    async fn upsert_inserts_then_updates() {
        let store = MemoryStore::new();
        let first = success("Moema", &[(BusinessCategory::Gym, 60.0), (BusinessCategory::Bank, 30.0)]);
        assert_eq!(store.upsert_region(&first).await.unwrap(), 2);

        let before = store.get("Moema", BusinessCategory::Gym).await.unwrap().unwrap();
        assert!(approx_eq(before.opportunity_score, 60.0));
        assert!(approx_eq(before.population_density, 10_000.0));
        assert_eq!(before.estimated_demand, 1200);

        let second = success("Moema", &[(BusinessCategory::Gym, 72.5)]);
        assert_eq!(store.upsert_region(&second).await.unwrap(), 1);

        let after = store.get("Moema", BusinessCategory::Gym).await.unwrap().unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
        assert!(approx_eq(after.opportunity_score, 72.5));
        assert_eq!(after.analysis.tier, RecommendationTier::Good);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn non_success_results_store_nothing() {
        let store = MemoryStore::new();
        let no_data = RegionRankingResult {
            region: "Lapa".to_string(),
            outcome: RankingOutcome::NoData {
                message: "nothing".to_string(),
            },
        };
        let error = RegionRankingResult {
            region: "Lapa".to_string(),
            outcome: RankingOutcome::Error {
                error: "boom".to_string(),
            },
        };

        assert_eq!(store.upsert_region(&no_data).await.unwrap(), 0);
        assert_eq!(store.upsert_region(&error).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn rejects_blank_region() {
        let store = MemoryStore::new();
        let result = success("  ", &[(BusinessCategory::Gym, 60.0)]);
        assert!(matches!(
            store.upsert_region(&result).await,
            Err(StoreError::Rejected { .. })
        ));
    }

    #[tokio::test]
    async fn query_filters_sorts_and_limits() {
        let store = MemoryStore::new();
        store
            .upsert_region(&success(
                "São Paulo - Centro",
                &[
                    (BusinessCategory::PetShop, 55.0),
                    (BusinessCategory::Bakery, 81.0),
                    (BusinessCategory::Bank, 20.0),
                ],
            ))
            .await
            .unwrap();
        store
            .upsert_region(&success("Rio de Janeiro", &[(BusinessCategory::Gym, 90.0)]))
            .await
            .unwrap();

        let all = store.query(&OpportunityQuery::default()).await.unwrap();
        let scores: Vec<f64> = all.iter().map(|r| r.opportunity_score).collect();
        assert_eq!(scores, vec![90.0, 81.0, 55.0, 20.0]);

        let sp = store
            .query(&OpportunityQuery {
                region: Some("são paulo".to_string()),
                min_score: Some(50.0),
                limit: 1,
                ..OpportunityQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(sp.len(), 1);
        assert_eq!(sp[0].business_type, BusinessCategory::Bakery);
    }

    #[tokio::test]
    async fn top_opportunities_group_by_region() {
        let store = MemoryStore::new();
        store
            .upsert_region(&success(
                "Pinheiros",
                &[(BusinessCategory::Gym, 70.0), (BusinessCategory::Bank, 49.9)],
            ))
            .await
            .unwrap();
        store
            .upsert_region(&success(
                "Tijuca",
                &[(BusinessCategory::Bakery, 85.0), (BusinessCategory::Pharmacy, 50.0)],
            ))
            .await
            .unwrap();

        let top = store.top_opportunities(None, 10).await.unwrap();
        assert_eq!(top.total_regions, 2);
        assert_eq!(top.opportunities_by_region[0].region, "Tijuca");
        assert_eq!(top.opportunities_by_region[0].opportunities.len(), 2);
        assert_eq!(top.opportunities_by_region[1].region, "Pinheiros");
        assert_eq!(top.opportunities_by_region[1].opportunities.len(), 1);

        let limited = store.top_opportunities(Some("pinh"), 10).await.unwrap();
        assert_eq!(limited.total_regions, 1);
        assert_eq!(
            limited.opportunities_by_region[0].opportunities[0].business_type,
            BusinessCategory::Gym
        );
    }

    #[tokio::test]
    async fn summary_aggregates_by_category_and_region() {
        let store = MemoryStore::new();
        store
            .upsert_region(&success(
                "A",
                &[(BusinessCategory::Gym, 80.0), (BusinessCategory::Bank, 40.0)],
            ))
            .await
            .unwrap();
        store
            .upsert_region(&success("B", &[(BusinessCategory::Gym, 65.0)]))
            .await
            .unwrap();

        let summary = store.summary().await.unwrap();
        assert_eq!(summary.total_opportunities, 3);
        assert_eq!(summary.score_distribution.excellent, 1);
        assert_eq!(summary.score_distribution.good, 1);
        assert_eq!(summary.score_distribution.low, 1);

        let gym = &summary.business_type_stats[0];
        assert_eq!(gym.business_type, BusinessCategory::Gym);
        assert_eq!(gym.count, 2);
        assert!(approx_eq(gym.avg_score, 72.5));

        let regions: Vec<_> = summary.region_stats.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, ["A", "B"]);
        assert!(approx_eq(summary.region_stats[0].avg_score, 60.0));
    }

    #[tokio::test]
    async fn concurrent_upserts_keep_one_row_per_key() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..16u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let result = success("Centro", &[(BusinessCategory::Gym, f64::from(i))]);
                store.upsert_region(&result).await.unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 1);
        }

        assert_eq!(store.len().await, 1);
        let row = store.get("Centro", BusinessCategory::Gym).await.unwrap().unwrap();
        assert_eq!(row.id, 1);
    }
}
