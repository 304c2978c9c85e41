//! Domain reputation lookups against DNS-based blacklists.

use crate::core::models::{BlacklistCheck, CheckStatus};
use crate::dns::{within, DnsResolve, RecordType};
use crate::utils::cache::BoundedCache;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Answers in this range are DNSBL error codes (e.g. queries through a public
/// resolver being refused), not listings.
const DNSBL_ERROR_PREFIX: &str = "127.255.255.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostOutcome {
    Listed,
    Clean,
    Failed,
}

pub struct BlacklistChecker {
    resolver: Arc<dyn DnsResolve>,
    hosts: Vec<String>,
    timeout: Duration,
    enabled: bool,
    cache: BoundedCache<BlacklistCheck>,
}

impl BlacklistChecker {
    pub fn new(
        resolver: Arc<dyn DnsResolve>,
        hosts: Vec<String>,
        enabled: bool,
        timeout: Duration,
        capacity: usize,
        ttl: Duration,
    ) -> Self {
        Self {
            resolver,
            hosts,
            timeout,
            enabled,
            cache: BoundedCache::new("blacklist", capacity, ttl),
        }
    }

    async fn query_host(&self, domain: &str, host: &str) -> HostOutcome {
        let name = format!("{}.{}", domain, host);
        let lookup = within(&name, self.timeout, self.resolver.resolve(&name, RecordType::A)).await;
        let response = match lookup.and_then(|r| r) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(target: "blacklist", "Lookup {} failed: {}", name, e);
                return HostOutcome::Failed;
            }
        };

        if response.is_nxdomain() {
            return HostOutcome::Clean;
        }
        if !response.is_success() {
            return HostOutcome::Failed;
        }

        let answers: Vec<&str> = response
            .answers_of(RecordType::A)
            .map(|a| a.data.as_str())
            .collect();
        if answers.is_empty() {
            HostOutcome::Clean
        } else if answers.iter().all(|a| a.starts_with(DNSBL_ERROR_PREFIX)) {
            tracing::debug!(target: "blacklist", "{} refused the query: {:?}", host, answers);
            HostOutcome::Failed
        } else {
            tracing::info!(target: "blacklist", "{} is listed on {} ({:?})", domain, host, answers);
            HostOutcome::Listed
        }
    }

    /// Queries every configured DNSBL concurrently. A host that fails counts
    /// as "not listed there"; only when all of them fail is the outcome
    /// inconclusive.
    pub async fn check(&self, domain: &str) -> BlacklistCheck {
        if !self.enabled {
            return BlacklistCheck {
                status: CheckStatus::Inconclusive,
                is_blacklisted: false,
                lists: Vec::new(),
                message: "Blacklist checks disabled".to_string(),
            };
        }
        if self.hosts.is_empty() {
            return BlacklistCheck {
                status: CheckStatus::Inconclusive,
                is_blacklisted: false,
                lists: Vec::new(),
                message: "No blacklist hosts configured".to_string(),
            };
        }
        if let Some(hit) = self.cache.get(domain) {
            return hit;
        }

        let outcomes = join_all(self.hosts.iter().map(|host| self.query_host(domain, host))).await;

        let listed: Vec<String> = self
            .hosts
            .iter()
            .zip(&outcomes)
            .filter(|(_, outcome)| **outcome == HostOutcome::Listed)
            .map(|(host, _)| host.clone())
            .collect();
        let failed = outcomes.iter().filter(|o| **o == HostOutcome::Failed).count();

        let result = if !listed.is_empty() {
            BlacklistCheck {
                status: CheckStatus::Fail,
                is_blacklisted: true,
                message: format!("Listed on {}", listed.join(", ")),
                lists: listed,
            }
        } else if failed == outcomes.len() {
            BlacklistCheck {
                status: CheckStatus::Inconclusive,
                is_blacklisted: false,
                lists: Vec::new(),
                message: "Could not query any blacklist".to_string(),
            }
        } else {
            BlacklistCheck {
                status: CheckStatus::Pass,
                is_blacklisted: false,
                lists: Vec::new(),
                message: format!("Not listed on {} blacklist(s)", outcomes.len() - failed),
            }
        };

        if result.status != CheckStatus::Inconclusive {
            self.cache.set(domain, result.clone());
        }
        result
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
