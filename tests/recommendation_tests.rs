//! Behavioral tests for the recommender against every store backend.

mod harness;
mod support;

use harness::temp_db::TempDb;

use std::sync::Arc;

use affinity::application::recommendation::{AggregationMode, RecommenderConfig, RecommenderService};
use affinity::adapter::outbound::sqlite::SqliteAffinityStore;
use affinity::domain::{ProductId, StoreKey};
use affinity::port::inbound::recommendation::Recommendations;
use affinity::testkit::domain::{catalog_with, ids};
use affinity::testkit::store::FailingStore;

use support::{raw_ids, Backend, Fixture, BACKENDS};

const ORDERS: &[&[u64]] = &[
    &[1, 2, 3],
    &[1, 2],
    &[2, 4, 5, 6],
    &[1, 5],
    &[3, 5, 7],
    &[2, 3],
    &[1, 2, 3, 4, 5],
    &[6, 7],
];

async fn seeded(backend: Backend, aggregation: AggregationMode) -> Fixture {
    let fixture = Fixture::with_aggregation(backend, aggregation).await;
    for order in ORDERS {
        fixture.service.record_co_purchase(&ids(order)).await;
    }
    fixture
}

// -------------------------------------------------------------------------
// Recording invariants
// -------------------------------------------------------------------------

#[tokio::test]
async fn scores_are_symmetric() {
    for backend in BACKENDS {
        let fixture = seeded(backend, AggregationMode::Store).await;

        for p in 1..=7 {
            for (q, score) in fixture.scores(p).await {
                let reverse = fixture.scores(q).await.get(&p).copied();
                assert_eq!(reverse, Some(score), "{backend:?}: score({p},{q}) != score({q},{p})");
            }
        }
    }
}

#[tokio::test]
async fn no_product_is_scored_against_itself() {
    for backend in BACKENDS {
        let fixture = seeded(backend, AggregationMode::Store).await;

        for p in 1..=7 {
            assert!(!fixture.scores(p).await.contains_key(&p), "{backend:?}: self-loop on {p}");
        }
    }
}

#[tokio::test]
async fn scores_count_shared_orders() {
    for backend in BACKENDS {
        let fixture = seeded(backend, AggregationMode::Store).await;

        // Orders containing both 1 and 2: [1,2,3], [1,2], [1,2,3,4,5].
        assert_eq!(fixture.scores(1).await.get(&2), Some(&3), "{backend:?}");
        // Orders containing both 6 and 7: [6,7] only.
        assert_eq!(fixture.scores(6).await.get(&7), Some(&1), "{backend:?}");
    }
}

// -------------------------------------------------------------------------
// Query invariants
// -------------------------------------------------------------------------

#[tokio::test]
async fn results_exclude_queried_products() {
    for backend in BACKENDS {
        let fixture = seeded(backend, AggregationMode::Store).await;

        for query in [&[1][..], &[1, 2], &[2, 3, 5], &[6, 7]] {
            let ranked = fixture.service.suggest_ids(&ids(query), 10).await;
            for suggestion in &ranked {
                assert!(
                    !query.contains(&suggestion.product.get()),
                    "{backend:?}: {query:?} returned queried product {}",
                    suggestion.product
                );
            }
        }
    }
}

#[tokio::test]
async fn results_are_bounded_and_non_increasing() {
    for backend in BACKENDS {
        let fixture = seeded(backend, AggregationMode::Store).await;

        for limit in [1, 2, 3, 10] {
            let ranked = fixture.service.suggest_ids(&ids(&[2, 3]), limit).await;

            assert!(ranked.len() <= limit, "{backend:?}");
            assert!(
                ranked.windows(2).all(|w| w[0].score >= w[1].score),
                "{backend:?}: {ranked:?} not ordered"
            );
        }
    }
}

#[tokio::test]
async fn transient_keys_never_outlive_a_query() {
    for backend in BACKENDS {
        let fixture = seeded(backend, AggregationMode::Store).await;
        let before = fixture.keys();

        fixture.service.suggest_ids(&ids(&[1, 2]), 5).await;
        fixture.service.suggest(&ids(&[3, 5, 7]), 5).await;

        let after = fixture.keys();
        assert!(!after.iter().any(StoreKey::is_transient), "{backend:?}: {after:?}");
        assert_eq!(after, before, "{backend:?}");
    }
}

#[tokio::test]
async fn client_and_store_aggregation_agree() {
    for backend in BACKENDS {
        let on_store = seeded(backend, AggregationMode::Store).await;
        let in_process = seeded(backend, AggregationMode::Client).await;

        for query in [&[1, 2][..], &[2, 3, 5], &[1, 6], &[4, 7]] {
            assert_eq!(
                on_store.service.suggest_ids(&ids(query), 4).await,
                in_process.service.suggest_ids(&ids(query), 4).await,
                "{backend:?}: {query:?}"
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_identical_queries_all_see_the_full_result() {
    for backend in BACKENDS {
        let fixture = Arc::new(seeded(backend, AggregationMode::Store).await);
        let expected = fixture.service.suggest_ids(&ids(&[1, 2]), 5).await;
        assert!(!expected.is_empty());

        let mut handles = Vec::new();
        for _ in 0..16 {
            let fixture = Arc::clone(&fixture);
            handles.push(tokio::spawn(async move {
                fixture.service.suggest_ids(&ids(&[1, 2]), 5).await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), expected, "{backend:?}");
        }
        assert_eq!(fixture.key_count(), 7, "{backend:?}");
        assert!(
            !fixture.keys().iter().any(StoreKey::is_transient),
            "{backend:?}: transient key leaked"
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_recording_loses_no_increments() {
    for backend in BACKENDS {
        let fixture = Arc::new(Fixture::new(backend).await);

        let mut handles = Vec::new();
        for _ in 0..20 {
            let fixture = Arc::clone(&fixture);
            handles.push(tokio::spawn(async move {
                fixture.service.record_co_purchase(&ids(&[1, 2, 3])).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(fixture.scores(1).await.get(&2), Some(&20), "{backend:?}");
        assert_eq!(fixture.scores(3).await.get(&1), Some(&20), "{backend:?}");
    }
}

// -------------------------------------------------------------------------
// Worked examples
// -------------------------------------------------------------------------

#[tokio::test]
async fn single_order_of_three() {
    for backend in BACKENDS {
        let fixture = Fixture::new(backend).await;

        fixture.service.record_co_purchase(&ids(&[1, 2, 3])).await;

        let single = fixture.service.suggest_ids(&ids(&[1]), 5).await;
        let mut single_ids = raw_ids(single.iter().map(|s| s.product));
        single_ids.sort_unstable();
        assert_eq!(single_ids, vec![2, 3], "{backend:?}");
        assert!(single.iter().all(|s| s.score == 1));

        let pair = fixture.service.suggest_ids(&ids(&[1, 2]), 5).await;
        assert_eq!(raw_ids(pair.iter().map(|s| s.product)), vec![3], "{backend:?}");
        assert_eq!(pair[0].score, 2);
    }
}

#[tokio::test]
async fn repeat_order_breaks_the_tie() {
    for backend in BACKENDS {
        let fixture = Fixture::new(backend).await;

        fixture.service.record_co_purchase(&ids(&[1, 2])).await;
        fixture.service.record_co_purchase(&ids(&[1, 3])).await;
        let tied = fixture.service.suggest_ids(&ids(&[1]), 5).await;
        assert_eq!(tied.len(), 2, "{backend:?}");
        assert_eq!(tied[0].score, tied[1].score);

        fixture.service.record_co_purchase(&ids(&[1, 2])).await;
        let ranked = fixture.service.suggest(&ids(&[1]), 5).await;
        assert_eq!(raw_ids(ranked.iter().map(|p| p.id)), vec![2, 3], "{backend:?}");
    }
}

// -------------------------------------------------------------------------
// Clearing
// -------------------------------------------------------------------------

#[tokio::test]
async fn clearing_every_product_empties_all_results() {
    for backend in BACKENDS {
        let fixture = seeded(backend, AggregationMode::Store).await;

        let cleared = fixture.service.clear_catalog().await;

        assert_eq!(cleared, 20, "{backend:?}");
        assert_eq!(fixture.key_count(), 0, "{backend:?}");
        for p in 1..=7 {
            assert!(fixture.service.suggest_ids(&ids(&[p]), 5).await.is_empty());
        }
    }
}

#[tokio::test]
async fn clearing_one_product_leaves_its_mirror_entries() {
    for backend in BACKENDS {
        let fixture = seeded(backend, AggregationMode::Store).await;

        assert_eq!(fixture.service.clear_all(&ids(&[6])).await, 1);

        assert!(fixture.scores(6).await.is_empty(), "{backend:?}");
        assert!(fixture.scores(7).await.contains_key(&6), "{backend:?}");
    }
}

// -------------------------------------------------------------------------
// Degraded operation
// -------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_store_yields_nothing_and_never_errors() {
    let service = RecommenderService::connect(
        FailingStore::unreachable(),
        catalog_with(1..=5),
        RecommenderConfig::default(),
    )
    .await;

    service.record_co_purchase(&ids(&[1, 2, 3])).await;

    assert!(!service.is_enabled());
    assert!(service.suggest(&ids(&[1]), 5).await.is_empty());
    assert!(service.suggest_for_product(ProductId::new(1)).await.is_empty());
    assert!(service.suggest_for_cart(&ids(&[1, 2])).await.is_empty());
    assert_eq!(service.clear_catalog().await, 0);
}

#[tokio::test]
async fn operation_failures_yield_nothing() {
    let service = RecommenderService::connect(
        FailingStore::reachable(),
        catalog_with(1..=5),
        RecommenderConfig::default(),
    )
    .await;

    assert!(service.is_enabled());
    assert!(service.suggest(&ids(&[1, 2]), 5).await.is_empty());
    assert_eq!(service.clear_all(&ids(&[1, 2, 3])).await, 0);
}

#[tokio::test]
async fn calls_made_while_disabled_leave_no_data_behind() {
    let db = TempDb::create();
    let disabled = RecommenderService::connect(
        SqliteAffinityStore::new(db.pool().clone()),
        catalog_with(1..=5),
        RecommenderConfig {
            enabled: false,
            ..RecommenderConfig::default()
        },
    )
    .await;
    assert!(!disabled.is_enabled());

    disabled.record_co_purchase(&ids(&[1, 2])).await;
    disabled.record_co_purchase(&ids(&[2, 3, 4])).await;

    let recovered = RecommenderService::connect(
        SqliteAffinityStore::new(db.pool().clone()),
        catalog_with(1..=5),
        RecommenderConfig::default(),
    )
    .await;
    assert!(recovered.is_enabled());
    assert!(recovered.suggest_ids(&ids(&[1]), 5).await.is_empty());
    assert!(recovered.suggest_ids(&ids(&[2, 3]), 5).await.is_empty());
    assert_eq!(recovered.store().unwrap().key_count().unwrap(), 0);
}
