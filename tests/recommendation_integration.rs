//! Integration tests for the recommendation pipeline.
//!
//! These tests drive the handlers end to end over the in-memory adapters:
//! 1. Seed catalog and influence graph load and resolve weights
//! 2. Listings are ranked, explained, and limited
//! 3. Wire requests deserialize and responses serialize

use serde_json::json;
use std::sync::Arc;

use stayhub_dss::adapters::memory::{
    InMemoryAttributeStore, InMemoryCatalogReader, InMemoryInfluenceGraphReader,
};
use stayhub_dss::application::{
    Candidate, GetRecommendationsHandler, GetRecommendationsQuery, RecommendationError,
    RecommendationRequest, ResolveWeightsHandler, ResolveWeightsQuery,
};
use stayhub_dss::config::EngineConfig;
use stayhub_dss::domain::foundation::AlternativeId;
use stayhub_dss::domain::preferences::{DirectPreferences, LegacyPreferences, Preferences};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn listings() -> InMemoryAttributeStore {
    InMemoryAttributeStore::new()
        .with_alternative(
            101,
            &[
                ("PRICE", 120.0),
                ("DISTANCE_CENTER", 0.8),
                ("RATING_OVERALL", 4.8),
                ("RATING_CLEANLINESS", 4.9),
                ("RATING_LOCATION", 4.9),
                ("RATING_VALUE", 4.2),
                ("AMENITIES_COUNT", 30.0),
                ("VIEW_QUALITY", 4.0),
            ],
        )
        .with_alternative(
            102,
            &[
                ("PRICE", 45.0),
                ("DISTANCE_CENTER", 6.5),
                ("RATING_OVERALL", 4.1),
                ("RATING_CLEANLINESS", 4.0),
                ("RATING_LOCATION", 3.6),
                ("RATING_VALUE", 4.7),
                ("AMENITIES_COUNT", 12.0),
                ("VIEW_QUALITY", 2.0),
            ],
        )
        .with_alternative(
            103,
            &[
                ("PRICE", 80.0),
                ("DISTANCE_CENTER", 2.5),
                ("RATING_OVERALL", 4.5),
                ("RATING_CLEANLINESS", 4.6),
                ("RATING_LOCATION", 4.4),
                ("RATING_VALUE", 4.5),
                ("AMENITIES_COUNT", 20.0),
                ("VIEW_QUALITY", 3.5),
            ],
        )
        // Dominated on every criterion by 103.
        .with_alternative(
            104,
            &[
                ("PRICE", 150.0),
                ("DISTANCE_CENTER", 9.0),
                ("RATING_OVERALL", 3.2),
                ("RATING_CLEANLINESS", 3.0),
                ("RATING_LOCATION", 3.1),
                ("RATING_VALUE", 2.9),
                ("AMENITIES_COUNT", 5.0),
                ("VIEW_QUALITY", 1.0),
            ],
        )
}

fn recommendations_handler(store: InMemoryAttributeStore) -> GetRecommendationsHandler {
    GetRecommendationsHandler::new(
        Arc::new(InMemoryCatalogReader::seeded()),
        Arc::new(InMemoryInfluenceGraphReader::seeded()),
        Arc::new(store),
        EngineConfig::default(),
    )
}

fn all_candidates() -> Vec<Candidate> {
    [101, 102, 103, 104].into_iter().map(Candidate::new).collect::<Vec<_>>()
}

fn neutral_direct() -> Preferences {
    Preferences::Direct(DirectPreferences::default())
}

// =============================================================================
// Weight Resolution
// =============================================================================

#[tokio::test]
async fn direct_mode_weights_cover_seven_criteria_and_sum_to_one() {
    let handler = ResolveWeightsHandler::new(
        Arc::new(InMemoryCatalogReader::seeded()),
        Arc::new(InMemoryInfluenceGraphReader::seeded()),
    );

    let result = handler
        .handle(ResolveWeightsQuery {
            preferences: neutral_direct(),
        })
        .await
        .unwrap();

    let mut codes: Vec<&str> = result.computed_weights.codes().map(|c| c.as_str()).collect();
    codes.sort_unstable();
    assert_eq!(
        codes,
        vec![
            "AMENITIES_COUNT",
            "DISTANCE_CENTER",
            "PRICE",
            "RATING_CLEANLINESS",
            "RATING_LOCATION",
            "RATING_OVERALL",
            "VIEW_QUALITY",
        ]
    );
    assert!((result.computed_weights.total() - 1.0).abs() < 1e-6);

    let explained: Vec<f64> = result.weight_explanations.iter().map(|e| e.weight).collect();
    assert!(explained.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn legacy_mode_weights_follow_the_seed_graph() {
    let handler = ResolveWeightsHandler::new(
        Arc::new(InMemoryCatalogReader::seeded()),
        Arc::new(InMemoryInfluenceGraphReader::seeded()),
    );

    let result = handler
        .handle(ResolveWeightsQuery {
            preferences: Preferences::Legacy(LegacyPreferences {
                convenience_importance: 0.0,
                comfort_importance: 0.0,
                value_importance: 1.0,
            }),
        })
        .await
        .unwrap();

    let weights = &result.computed_weights;
    assert!((weights.get("PRICE").unwrap() - 0.7).abs() < 1e-9);
    assert!((weights.get("RATING_VALUE").unwrap() - 0.3).abs() < 1e-9);
    assert_eq!(weights.get("RATING_OVERALL"), Some(0.0));
}

// =============================================================================
// Ranking
// =============================================================================

#[tokio::test]
async fn dominance_scenario_ranks_cheaper_better_rated_listing_first() {
    let store = InMemoryAttributeStore::new()
        .with_alternative(1, &[("PRICE", 100.0), ("RATING_OVERALL", 4.0)])
        .with_alternative(2, &[("PRICE", 50.0), ("RATING_OVERALL", 5.0)]);
    let handler = recommendations_handler(store);

    let result = handler
        .handle(GetRecommendationsQuery {
            preferences: neutral_direct(),
            candidates: vec![Candidate::new(1), Candidate::new(2)],
            limit: None,
        })
        .await
        .unwrap();

    let first = &result.ranked_results[0].result;
    let second = &result.ranked_results[1].result;
    assert_eq!(first.alternative_id, AlternativeId::new(2));
    assert_eq!(first.rank, 1);
    assert!(first.score > second.score);
}

#[tokio::test]
async fn dominated_listing_ranks_last() {
    let result = recommendations_handler(listings())
        .handle(GetRecommendationsQuery {
            preferences: neutral_direct(),
            candidates: all_candidates(),
            limit: None,
        })
        .await
        .unwrap();

    assert_eq!(result.total_evaluated, 4);
    let last = result.ranked_results.last().unwrap();
    assert_eq!(last.result.alternative_id, AlternativeId::new(104));
    assert_eq!(last.result.rank, 4);

    for (position, recommendation) in result.ranked_results.iter().enumerate() {
        assert_eq!(recommendation.result.rank, position + 1);
        assert!((0.0..=1.0).contains(&recommendation.result.score));
        assert!(recommendation.result.distance_to_best >= 0.0);
        assert!(recommendation.result.distance_to_worst >= 0.0);
        assert!(!recommendation.result.explanation.is_empty());
    }
}

#[tokio::test]
async fn empty_candidate_set_yields_empty_result() {
    let result = recommendations_handler(listings())
        .handle(GetRecommendationsQuery {
            preferences: neutral_direct(),
            candidates: Vec::new(),
            limit: None,
        })
        .await
        .unwrap();

    assert_eq!(result.total_evaluated, 0);
    assert!(result.ranked_results.is_empty());
    assert!(!result.weight_explanations.is_empty());
}

#[tokio::test]
async fn single_listing_gets_finite_score() {
    let result = recommendations_handler(listings())
        .handle(GetRecommendationsQuery {
            preferences: neutral_direct(),
            candidates: vec![Candidate::new(103)],
            limit: None,
        })
        .await
        .unwrap();

    let only = &result.ranked_results[0].result;
    assert_eq!(only.rank, 1);
    assert_eq!(only.distance_to_best, 0.0);
    assert_eq!(only.distance_to_worst, 0.0);
    assert!(only.score.is_finite());
    assert_eq!(only.score, 0.0);
}

#[tokio::test]
async fn limit_truncates_but_total_counts_every_candidate() {
    let result = recommendations_handler(listings())
        .handle(GetRecommendationsQuery {
            preferences: neutral_direct(),
            candidates: all_candidates(),
            limit: Some(2),
        })
        .await
        .unwrap();

    assert_eq!(result.total_evaluated, 4);
    assert_eq!(result.ranked_results.len(), 2);
    assert_eq!(result.ranked_results[1].result.rank, 2);
}

#[tokio::test]
async fn limit_above_cap_is_rejected() {
    let result = recommendations_handler(listings())
        .handle(GetRecommendationsQuery {
            preferences: neutral_direct(),
            candidates: all_candidates(),
            limit: Some(500),
        })
        .await;

    assert!(matches!(result, Err(RecommendationError::InvalidInput { .. })));
}

#[tokio::test]
async fn identical_requests_rank_identically() {
    let handler = recommendations_handler(listings());
    let query = GetRecommendationsQuery {
        preferences: Preferences::Legacy(LegacyPreferences::default()),
        candidates: all_candidates(),
        limit: None,
    };

    let (first, second) = tokio::join!(handler.handle(query.clone()), handler.handle(query));
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_ne!(first.session_id, second.session_id);
    let strip = |r: &stayhub_dss::application::RecommendationResult| {
        r.ranked_results
            .iter()
            .map(|rec| rec.result.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&first), strip(&second));
}

// =============================================================================
// Wire Format
// =============================================================================

#[tokio::test]
async fn json_request_round_trips_through_handler() {
    let request: RecommendationRequest = serde_json::from_value(json!({
        "preferences": {
            "price_sensitivity": 0.9,
            "comfort_priority": 0.2
        },
        "candidates": [
            {"id": 101, "distance_km": 0.4},
            {"id": 102, "distance_km": 5.0},
            {"id": 103}
        ],
        "limit": 3
    }))
    .unwrap();

    let result = recommendations_handler(listings())
        .handle(request.into())
        .await
        .unwrap();
    let body = serde_json::to_value(&result).unwrap();

    assert_eq!(body["total_evaluated"], 3);
    assert!(body["session_id"].is_string());
    assert!(body["computed_weights"]["PRICE"].is_number());
    let ranked = body["ranked_results"].as_array().unwrap();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0]["rank"], 1);
    assert!(ranked[0]["weighted_values"]["PRICE"].is_number());

    let near = ranked
        .iter()
        .find(|r| r["alternative_id"] == 101)
        .unwrap();
    assert!(near["explanation"]
        .as_str()
        .unwrap()
        .ends_with(". Very close (0.4 km)"));
}
