//! Social sentiment analysis.

use opportunity_map_analysis_models::{SentimentAnalysis, SentimentImpact};
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_source_models::{SocialObservation, find_for_category};

use crate::round_to;

/// Raw score above which sentiment counts as positive.
const POSITIVE_THRESHOLD: f64 = 20.0;
/// Raw score above which sentiment counts as neutral.
const NEUTRAL_THRESHOLD: f64 = -20.0;

/// Recognized complaints and the opportunity each one suggests.
pub const COMPLAINT_OPPORTUNITIES: &[(&str, &str)] = &[
    ("Atendimento demorado", "Opportunity for faster service"),
    ("Preços altos", "Opportunity for competitive pricing"),
    ("Falta de variedade", "Opportunity for wider variety"),
];

/// Returns the opportunity suggested by `complaint`, if it is recognized.
#[must_use]
pub fn opportunity_for_complaint(complaint: &str) -> Option<&'static str> {
    COMPLAINT_OPPORTUNITIES
        .iter()
        .find(|(known, _)| *known == complaint)
        .map(|(_, opportunity)| *opportunity)
}

/// Labels a raw sentiment score.
#[must_use]
pub fn classify_impact(raw: f64) -> SentimentImpact {
    if raw > POSITIVE_THRESHOLD {
        SentimentImpact::Positive
    } else if raw > NEUTRAL_THRESHOLD {
        SentimentImpact::Neutral
    } else {
        SentimentImpact::Negative
    }
}

/// Maps a raw score in `-100..=100` onto `0..=100`, clamping outliers.
#[must_use]
pub fn normalize_score(raw: f64) -> f64 {
    ((raw + 100.0) / 2.0).clamp(0.0, 100.0)
}

/// Analyzes social sentiment for `category`.
///
/// Without an observation, or with a non-finite raw score, the result is
/// [`SentimentAnalysis::neutral`].
#[must_use]
pub fn analyze_sentiment(
    observations: &[SocialObservation],
    category: BusinessCategory,
) -> SentimentAnalysis {
    let Some(observation) = find_for_category(observations, category) else {
        log::debug!("No social observation for {category}, sentiment neutral");
        return SentimentAnalysis::neutral();
    };

    let raw = observation.sentiment_score_raw;
    if !raw.is_finite() {
        log::error!("Sentiment analysis for {category} got non-finite raw score {raw}");
        return SentimentAnalysis::neutral();
    }

    let opportunity_indicators = observation
        .main_complaints
        .iter()
        .filter_map(|complaint| opportunity_for_complaint(complaint))
        .map(str::to_string)
        .collect();

    SentimentAnalysis {
        sentiment_score: round_to(normalize_score(raw), 1),
        sentiment_impact: classify_impact(raw),
        main_complaints: observation.main_complaints.clone(),
        opportunity_indicators,
        total_mentions: observation.total_mentions,
        raw_sentiment_score: raw,
    }
}
