use async_trait::async_trait;
use log::debug;
use reqwest::header::USER_AGENT;
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::{error_messages, http_status, probe};
use crate::core::error::Result;
use crate::core::types::{Candidate, FailureReason};

/// Result of a single probe attempt
pub type ProbeResult = std::result::Result<(), FailureReason>;

/// One attempt at validating a candidate. Implementations must not retry.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, candidate: &Candidate) -> ProbeResult;
}

/// Sends `GET <endpoint>` with the candidate as the `User-Agent` header.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpProbe {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, concurrency: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(probe::MAX_REDIRECTS))
            // Connection pooling sized to the admission limit
            .pool_max_idle_per_host(concurrency.min(probe::MAX_IDLE_PER_HOST))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.probe_url(),
            config.timeout_duration(),
            config.concurrency_limit(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, candidate: &Candidate) -> ProbeResult {
        let request = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, candidate.as_str())
            .build()
            .map_err(|err| FailureReason::Construction(describe_error(&err)))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| FailureReason::Transport(describe_error(&err)))?;

        let status = response.status().as_u16();

        // Drain the body so the connection is released back to the pool
        if let Err(err) = response.bytes().await {
            debug!("Could not drain response body for '{candidate}': {err}");
        }

        if status == http_status::OK {
            Ok(())
        } else {
            Err(FailureReason::Status(status))
        }
    }
}

/// Human-readable detail for a reqwest error, preferring the root cause.
pub fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return error_messages::OPERATION_TIMED_OUT.to_string();
    }
    std::error::Error::source(err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string())
}
