//! Transport client tests against the in-process mock service.
//!
//! Covers the retry contract:
//! - 2xx short-circuits the retry loop
//! - 429 backs off and retries, bounded by the attempt budget
//! - any other failure status is fatal on the first attempt

use megaverse_api::{ApiError, GoalMap, MegaverseApi, RetryPolicy};
use megaverse_test_utils::MockMegaverse;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::{Duration, Instant};

/// Helper: client pointed at the mock with test-friendly backoff delays.
fn make_client(mock: &MockMegaverse) -> MegaverseApi {
    let policy = RetryPolicy::default().with_base_delay(Duration::from_millis(10));
    MegaverseApi::new(mock.base_url(), "test-candidate")
        .unwrap()
        .with_policy(policy)
}

#[tokio::test]
async fn fetch_goal_map_returns_goal_grid() {
    let mock = MockMegaverse::start(json!([["SPACE", "POLYANET"], ["RED_SOLOON", "SPACE"]])).await;
    let api = make_client(&mock);

    let goal = api.fetch_goal_map().await.unwrap();
    assert_eq!(
        goal,
        GoalMap::from(vec![
            vec!["SPACE", "POLYANET"],
            vec!["RED_SOLOON", "SPACE"],
        ])
    );

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/map/test-candidate/goal");
}

#[tokio::test]
async fn fetch_goal_map_without_goal_field_is_decode_error() {
    let mock = MockMegaverse::start(json!([])).await;
    mock.set_goal_body(json!({ "map": [["SPACE"]] }));
    let api = make_client(&mock);

    let err = api.fetch_goal_map().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn create_polyanet_posts_identity_and_coordinates() {
    let mock = MockMegaverse::start(json!([])).await;
    let api = make_client(&mock);

    api.create_polyanet(4, 9).await.unwrap();

    let posts = mock.creation_requests();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, "/polyanets");
    assert_eq!(
        posts[0].body,
        Some(json!({
            "candidateId": "test-candidate",
            "row": 4,
            "column": 9
        }))
    );
}

#[tokio::test]
async fn create_soloon_and_cometh_carry_their_attributes() {
    let mock = MockMegaverse::start(json!([])).await;
    let api = make_client(&mock);

    api.create_soloon(1, 2, "blue").await.unwrap();
    api.create_cometh(3, 4, "right").await.unwrap();

    let posts = mock.creation_requests();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].path, "/soloons");
    assert_eq!(
        posts[0].body,
        Some(json!({
            "candidateId": "test-candidate",
            "row": 1,
            "column": 2,
            "color": "blue"
        }))
    );
    assert_eq!(posts[1].path, "/comeths");
    assert_eq!(
        posts[1].body,
        Some(json!({
            "candidateId": "test-candidate",
            "row": 3,
            "column": 4,
            "direction": "right"
        }))
    );
}

#[tokio::test]
async fn rate_limited_call_backs_off_then_succeeds() {
    let mock = MockMegaverse::start(json!([])).await;
    let api = make_client(&mock);
    mock.rate_limit_next(2);

    let started = Instant::now();
    api.create_polyanet(0, 0).await.unwrap();

    // Two 429s then success: exactly three attempts, with backoff sleeps of
    // base_delay and 2 * base_delay in between.
    assert_eq!(mock.request_count(), 3);
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn persistent_rate_limiting_exhausts_the_budget() {
    let mock = MockMegaverse::start(json!([])).await;
    let api = make_client(&mock).with_policy(
        RetryPolicy::default()
            .with_max_attempts(3)
            .with_base_delay(Duration::from_millis(5)),
    );
    mock.rate_limit_next(usize::MAX);

    let err = api.create_polyanet(0, 0).await.unwrap_err();
    match err {
        ApiError::RetriesExhausted {
            method, attempts, ..
        } => {
            assert_eq!(method, "POST");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert!(err.is_rate_limited());

    // No more attempts than the budget allows
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn server_error_fails_immediately_without_retry() {
    let mock = MockMegaverse::start(json!([])).await;
    let api = make_client(&mock);
    mock.fail_creations_with(500);

    let started = Instant::now();
    let err = api.create_cometh(7, 7, "up").await.unwrap_err();

    match err {
        ApiError::Status { status, url, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert!(url.ends_with("/comeths"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
    // Single attempt, no backoff sleep
    assert_eq!(mock.request_count(), 1);
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn rate_limited_goal_fetch_retries_too() {
    let mock = MockMegaverse::start(json!([["SPACE"]])).await;
    let api = make_client(&mock);
    mock.rate_limit_next(1);

    let goal = api.fetch_goal_map().await.unwrap();
    assert_eq!(goal, GoalMap::from(vec![vec!["SPACE"]]));
    assert_eq!(mock.request_count(), 2);
}
