//! The megaverse HTTP client
//!
//! One [`MegaverseApi`] per candidate identity. Every call goes through a
//! shared retry loop: 429 responses back off and retry, anything else
//! non-2xx fails immediately.

use crate::error::ApiError;
use crate::retry::RetryPolicy;
use crate::types::{ComethRequest, GoalMap, GoalMapResponse, PolyanetRequest, SoloonRequest};
use reqwest::{Method, StatusCode};
use std::time::Duration;

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the megaverse service
///
/// Wraps outbound GET/POST calls against a configured base endpoint, with
/// the candidate identity embedded in POST payloads and GET URL paths.
#[derive(Debug, Clone)]
pub struct MegaverseApi {
    /// Underlying HTTP client (connection pool, timeout)
    http: reqwest::Client,
    /// Service endpoint, no trailing slash
    base_url: String,
    /// Caller identity sent with every request
    candidate_id: String,
    /// Backoff schedule for rate-limited responses
    policy: RetryPolicy,
}

impl MegaverseApi {
    /// Create a client with the default timeout and retry policy.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        candidate_id: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, candidate_id, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout.
    ///
    /// Timeout expiry surfaces as [`ApiError::Transport`] and is fatal; only
    /// explicit 429 responses are retried.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn with_timeout(
        base_url: impl Into<String>,
        candidate_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            candidate_id: candidate_id.into(),
            policy: RetryPolicy::default(),
        })
    }

    /// With a different retry policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Caller identity this client submits as
    #[inline]
    #[must_use]
    pub fn candidate_id(&self) -> &str {
        &self.candidate_id
    }

    /// Retry policy in effect
    #[inline]
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch the goal map for this candidate.
    ///
    /// # Errors
    /// [`ApiError::Decode`] if the response lacks a well-formed `goal` field;
    /// otherwise the usual transport taxonomy.
    pub async fn fetch_goal_map(&self) -> Result<GoalMap, ApiError> {
        let url = format!("{}/map/{}/goal", self.base_url, self.candidate_id);
        let body = self.request(Method::GET, &url, None).await?;
        let response: GoalMapResponse = serde_json::from_str(&body)?;
        tracing::info!(rows = response.goal.len(), "goal map fetched");
        Ok(response.goal)
    }

    /// Create a POLYANET at the given coordinates.
    ///
    /// # Errors
    /// Propagates transport failures; rate limits are retried internally.
    pub async fn create_polyanet(&self, row: usize, column: usize) -> Result<(), ApiError> {
        let payload = serde_json::to_value(PolyanetRequest {
            candidate_id: self.candidate_id.clone(),
            row,
            column,
        })?;
        let url = format!("{}/polyanets", self.base_url);
        self.request(Method::POST, &url, Some(&payload)).await?;
        tracing::debug!(row, column, "polyanet created");
        Ok(())
    }

    /// Create a SOLOON at the given coordinates.
    ///
    /// # Errors
    /// Propagates transport failures; rate limits are retried internally.
    pub async fn create_soloon(
        &self,
        row: usize,
        column: usize,
        color: &str,
    ) -> Result<(), ApiError> {
        let payload = serde_json::to_value(SoloonRequest {
            candidate_id: self.candidate_id.clone(),
            row,
            column,
            color: color.to_string(),
        })?;
        let url = format!("{}/soloons", self.base_url);
        self.request(Method::POST, &url, Some(&payload)).await?;
        tracing::debug!(row, column, color, "soloon created");
        Ok(())
    }

    /// Create a COMETH at the given coordinates.
    ///
    /// # Errors
    /// Propagates transport failures; rate limits are retried internally.
    pub async fn create_cometh(
        &self,
        row: usize,
        column: usize,
        direction: &str,
    ) -> Result<(), ApiError> {
        let payload = serde_json::to_value(ComethRequest {
            candidate_id: self.candidate_id.clone(),
            row,
            column,
            direction: direction.to_string(),
        })?;
        let url = format!("{}/comeths", self.base_url);
        self.request(Method::POST, &url, Some(&payload)).await?;
        tracing::debug!(row, column, direction, "cometh created");
        Ok(())
    }

    /// Issue one request through the retry loop.
    ///
    /// The request is rebuilt on every attempt; only the current attempt's
    /// response status is ever consulted. A 429 on the final attempt exits
    /// the loop without sleeping.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, ApiError> {
        let method_name = if method == Method::GET { "GET" } else { "POST" };

        for attempt in 0..self.policy.max_attempts {
            let mut request = self.http.request(method.clone(), url);
            if let Some(payload) = body {
                request = request.json(payload);
            }
            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt + 1 < self.policy.max_attempts {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        %url,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                continue;
            }

            let body_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
                body: body_text,
            });
        }

        Err(ApiError::RetriesExhausted {
            method: method_name,
            url: url.to_string(),
            attempts: self.policy.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = MegaverseApi::new("http://localhost:9999/api/", "cand").unwrap();
        assert_eq!(api.candidate_id(), "cand");
        // Trailing slash stripped so path joins stay single-slashed
        let api2 = MegaverseApi::new("http://localhost:9999/api", "cand").unwrap();
        assert_eq!(api.base_url, api2.base_url);
    }

    #[test]
    fn policy_builder_replaces_default() {
        let policy = RetryPolicy::default().with_max_attempts(2);
        let api = MegaverseApi::new("http://localhost:9999", "cand")
            .unwrap()
            .with_policy(policy);
        assert_eq!(api.policy().max_attempts, 2);
    }
}
