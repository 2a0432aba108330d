use std::time::Duration;

use zenith_finds::repository::StaticRepository;
use zenith_finds::services::search::{ResultSource, SearchController, SearchState, resolve_search};

mod common;

const DEADLINE: Duration = Duration::from_secs(5);

#[tokio::test]
async fn noise_canceling_finds_the_earbuds_without_a_credential() {
    let repo = StaticRepository::bundled().expect("bundled catalog loads");
    let recommender = common::offline_recommender();

    let outcome = resolve_search(&repo, &recommender, "noise canceling", DEADLINE)
        .await
        .expect("search succeeds");

    assert_eq!(outcome.source, ResultSource::TextMatch);
    assert!(outcome.products.iter().any(|p| p.id == "jbl-tune-flex"));
    assert!(outcome.recommender_error.is_some());
}

#[tokio::test]
async fn nonsense_query_settles_empty() {
    let repo = StaticRepository::bundled().expect("bundled catalog loads");
    let recommender = common::offline_recommender();

    let outcome = resolve_search(&repo, &recommender, "zzz-nonexistent-zzz", DEADLINE)
        .await
        .expect("search succeeds");

    assert_eq!(outcome.source, ResultSource::Empty);
    assert!(outcome.is_empty());
}

#[tokio::test]
async fn controller_settles_latest_search() {
    let repo = StaticRepository::bundled().expect("bundled catalog loads");
    let recommender = common::offline_recommender();
    let controller = SearchController::new();

    let outcome = controller
        .search(&repo, &recommender, "earmuffs", DEADLINE)
        .await
        .expect("search succeeds")
        .expect("only search is the latest");

    assert_eq!(outcome.products[0].id, "walkers-razor-slim");
    assert!(matches!(controller.state(), SearchState::Settled { generation: 1, .. }));
}
