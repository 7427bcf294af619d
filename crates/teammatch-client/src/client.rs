// Balance request client.
//
// Posts the validated roster to the balancer in a single request and turns
// the outcome into either a `BalanceResult` or a classified `BalanceError`.
// One attempt per call: no retry, no caching, no request coalescing.

use std::time::Duration;

use async_trait::async_trait;
use teammatch_core::model::{BalanceRequest, BalanceResult};
use teammatch_core::roster::Roster;
use thiserror::Error;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_BALANCE_PATH: &str = "/balance";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// The balancer answered with a non-success status.
    #[error("Server error: {status}")]
    Service { status: u16 },

    /// No response could be obtained (connect failure, timeout, broken body).
    #[error("Network error: {cause}")]
    Transport { cause: String },

    /// A success response whose body does not match the expected shape.
    #[error("Malformed response from server")]
    Malformed { detail: String },
}

// ---------------------------------------------------------------------------
// BalanceService
// ---------------------------------------------------------------------------

/// Anything that can turn a validated roster into a two-team split.
#[async_trait]
pub trait BalanceService: Send + Sync {
    async fn request_balance(&self, roster: &Roster) -> Result<BalanceResult, BalanceError>;
}

// ---------------------------------------------------------------------------
// HttpBalanceClient
// ---------------------------------------------------------------------------

/// reqwest-backed balancer client.
pub struct HttpBalanceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpBalanceClient {
    /// Build a client posting to `<base_url><balance_path>` with an overall
    /// per-request timeout.
    pub fn new(
        base_url: &str,
        balance_path: &str,
        timeout: Duration,
    ) -> Result<Self, BalanceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            http,
            endpoint: join_endpoint(base_url, balance_path),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BalanceService for HttpBalanceClient {
    async fn request_balance(&self, roster: &Roster) -> Result<BalanceResult, BalanceError> {
        debug!(endpoint = %self.endpoint, "sending balance request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&BalanceRequest::new(roster))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            warn!(status, "balancer returned failure status");
            return Err(BalanceError::Service { status });
        }

        let body = response.text().await.map_err(transport_error)?;
        let result = interpret_response(status, &body)?;
        info!(
            team_a = result.team_a.len(),
            team_b = result.team_b.len(),
            "balance result received"
        );
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Classify a completed HTTP exchange.
///
/// Non-2xx statuses are service errors regardless of body; a 2xx body must
/// parse as a `BalanceResult` or the response is reported as malformed.
pub fn interpret_response(status: u16, body: &str) -> Result<BalanceResult, BalanceError> {
    if !(200..300).contains(&status) {
        return Err(BalanceError::Service { status });
    }
    BalanceResult::from_json(body).map_err(|e| {
        warn!(error = %e, "balance response did not match expected shape");
        BalanceError::Malformed {
            detail: e.to_string(),
        }
    })
}

fn transport_error(err: reqwest::Error) -> BalanceError {
    let cause = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    warn!(%cause, "balance request failed in transport");
    BalanceError::Transport { cause }
}

fn join_endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
