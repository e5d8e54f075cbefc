//! Testing utilities for the megaverse workspace
//!
//! Provides [`MockMegaverse`], an in-process stand-in for the remote service:
//! serves the goal-map endpoint and the three creation endpoints, records
//! every request, and injects faults (rate limiting, fixed failure statuses,
//! malformed bodies) on demand.

#![allow(missing_docs)]

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Filter;

/// One request as seen by the mock service
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Raw body served for the goal endpoint
    goal_body: Mutex<Value>,
    /// Remaining requests to answer with 429
    rate_limit_budget: AtomicUsize,
    /// When set, every creation request fails with this status
    fail_status: Mutex<Option<u16>>,
    /// Everything the mock has seen, in arrival order
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    fn record(&self, method: &str, path: String, body: Option<Value>) {
        self.requests.lock().push(RecordedRequest {
            method: method.to_string(),
            path,
            body,
        });
    }

    /// Status for the next creation response, honoring injected faults.
    fn creation_status(&self) -> StatusCode {
        if let Some(code) = *self.fail_status.lock() {
            return StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        }
        if take_budget(&self.rate_limit_budget) {
            return StatusCode::TOO_MANY_REQUESTS;
        }
        StatusCode::OK
    }
}

/// Decrement the budget if positive, reporting whether a unit was taken.
fn take_budget(budget: &AtomicUsize) -> bool {
    budget
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

/// In-process mock of the megaverse service.
///
/// Dropped servers are torn down with the test's tokio runtime.
pub struct MockMegaverse {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockMegaverse {
    /// Start a mock serving `goal` (the raw grid) on an ephemeral port.
    pub async fn start(goal: Value) -> Self {
        let state = Arc::new(MockState::default());
        *state.goal_body.lock() = json!({ "goal": goal });

        let with_state = {
            let state = Arc::clone(&state);
            warp::any().map(move || Arc::clone(&state))
        };

        let goal_route = warp::get()
            .and(warp::path!("map" / String / "goal"))
            .and(with_state.clone())
            .map(|candidate: String, state: Arc<MockState>| {
                state.record("GET", format!("/map/{candidate}/goal"), None);
                if take_budget(&state.rate_limit_budget) {
                    return warp::reply::with_status(
                        warp::reply::json(&json!({"error": "rate limited"})),
                        StatusCode::TOO_MANY_REQUESTS,
                    );
                }
                warp::reply::with_status(
                    warp::reply::json(&*state.goal_body.lock()),
                    StatusCode::OK,
                )
            });

        let create_route = warp::post()
            .and(warp::path!(String))
            .and(warp::body::json())
            .and(with_state)
            .map(|endpoint: String, body: Value, state: Arc<MockState>| {
                state.record("POST", format!("/{endpoint}"), Some(body));
                let status = match endpoint.as_str() {
                    "polyanets" | "soloons" | "comeths" => state.creation_status(),
                    _ => StatusCode::NOT_FOUND,
                };
                warp::reply::with_status(warp::reply::json(&json!({})), status)
            });

        let routes = goal_route.or(create_route);
        let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self { addr, state }
    }

    /// Base URL clients should target
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer the next `n` requests with HTTP 429
    pub fn rate_limit_next(&self, n: usize) {
        self.state.rate_limit_budget.store(n, Ordering::SeqCst);
    }

    /// Fail every creation request with the given status
    pub fn fail_creations_with(&self, status: u16) {
        *self.state.fail_status.lock() = Some(status);
    }

    /// Replace the goal endpoint's entire response body
    pub fn set_goal_body(&self, body: Value) {
        *self.state.goal_body.lock() = body;
    }

    /// Everything the mock has seen so far, in arrival order
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Creation requests only (POSTs), in arrival order
    #[must_use]
    pub fn creation_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST")
            .collect()
    }

    /// Total request count
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }
}
