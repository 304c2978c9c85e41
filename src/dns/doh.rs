//! reqwest-backed DNS-over-HTTPS client.

use super::{DnsResolve, DnsResponse, RecordType, STATUS_SERVFAIL};
use crate::core::config::{get_random_sleep_duration, Config};
use crate::core::error::{AppError, Result};
use crate::utils::throttle::Throttle;
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::sync::Arc;

const DNS_JSON: &str = "application/dns-json";

/// Queries a JSON DoH endpoint (`GET <resolver>?name=..&type=..`).
#[derive(Clone)]
pub struct DohClient {
    config: Arc<Config>,
    http: reqwest::Client,
    throttle: Option<Arc<Throttle>>,
}

impl DohClient {
    pub fn new(config: Arc<Config>, throttle: Option<Arc<Throttle>>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Initialization(format!("Failed to build HTTP client: {}", e)))?;
        tracing::debug!(target: "doh", "DoH client ready for {}", config.resolver_url);
        Ok(Self {
            config,
            http,
            throttle,
        })
    }

    async fn query_once(&self, name: &str, record_type: RecordType) -> Result<DnsResponse> {
        let response = self
            .http
            .get(&self.config.resolver_url)
            .query(&[("name", name), ("type", record_type.as_str())])
            .header(ACCEPT, DNS_JSON)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            if let Some(throttle) = &self.throttle {
                throttle.signal_throttled();
            }
            return Err(AppError::DnsHttpStatus(status.as_u16()));
        }
        if !status.is_success() {
            return Err(AppError::DnsHttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: DnsResponse = serde_json::from_slice(&body)?;
        if let Some(throttle) = &self.throttle {
            throttle.signal_ok();
        }
        Ok(parsed)
    }

    /// Runs the query, retrying transient failures up to
    /// `max_lookup_attempts` times in total.
    pub async fn query(&self, name: &str, record_type: RecordType) -> Result<DnsResponse> {
        let attempts = self.config.max_lookup_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::trace!(target: "doh", "{} {} (attempt {}/{})", record_type, name, attempt, attempts);

            let outcome = match self.query_once(name, record_type).await {
                Ok(resp) if resp.status == STATUS_SERVFAIL && attempt < attempts => {
                    Err(AppError::DnsStatus {
                        name: name.to_string(),
                        status: resp.status,
                    })
                }
                other => other,
            };

            match outcome {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < attempts && e.is_transient() => {
                    let sleep = get_random_sleep_duration(&self.config);
                    tracing::debug!(target: "doh",
                        "Transient failure for {} {}: {}. Retrying in {:?}", record_type, name, e, sleep);
                    tokio::time::sleep(sleep).await;
                }
                Err(e) => {
                    tracing::debug!(target: "doh", "Lookup {} {} failed: {}", record_type, name, e);
                    return Err(e);
                }
            }
        }
    }
}

impl DnsResolve for DohClient {
    fn resolve<'a>(&'a self, name: &'a str, record_type: RecordType) -> BoxFuture<'a, Result<DnsResponse>> {
        self.query(name, record_type).boxed()
    }
}
