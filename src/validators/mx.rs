//! MX lookup with A-record fallback.

use crate::core::models::{CheckStatus, MxCheck, MxRecord};
use crate::dns::{within, DnsResolve, DnsResponse, RecordType};
use crate::utils::cache::BoundedCache;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct MxValidator {
    resolver: Arc<dyn DnsResolve>,
    cache: BoundedCache<MxCheck>,
    timeout: Duration,
}

fn mx_check(status: CheckStatus, records: Vec<MxRecord>, used_a_fallback: bool, message: String) -> MxCheck {
    MxCheck {
        status,
        records,
        used_a_fallback,
        message,
    }
}

fn inconclusive(message: String) -> MxCheck {
    mx_check(CheckStatus::Inconclusive, Vec::new(), false, message)
}

fn fail(message: &str) -> MxCheck {
    mx_check(CheckStatus::Fail, Vec::new(), false, message.to_string())
}

/// Parses MX answer data of the form `"<priority> <exchange>."`, sorted by
/// priority. Malformed entries are skipped.
pub(crate) fn parse_mx_records(response: &DnsResponse) -> Vec<MxRecord> {
    let mut records: Vec<MxRecord> = response
        .answers_of(RecordType::Mx)
        .filter_map(|answer| {
            let mut parts = answer.data.split_whitespace();
            let priority = parts.next()?.parse::<u16>().ok()?;
            let exchange = parts.next()?.trim_end_matches('.').to_lowercase();
            Some(MxRecord { exchange, priority })
        })
        .collect();
    records.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.exchange.cmp(&b.exchange)));
    records
}

impl MxValidator {
    pub fn new(resolver: Arc<dyn DnsResolve>, capacity: usize, ttl: Duration, timeout: Duration) -> Self {
        Self {
            resolver,
            cache: BoundedCache::new("mx", capacity, ttl),
            timeout,
        }
    }

    /// Checks that `domain` can receive mail. Inconclusive outcomes are not
    /// cached so a transient resolver failure is retried on the next call.
    pub async fn check(&self, domain: &str) -> MxCheck {
        if let Some(hit) = self.cache.get(domain) {
            tracing::trace!(target: "mx", "Cache hit for {}", domain);
            return hit;
        }

        let start = Instant::now();
        let result = match within(domain, self.timeout, self.lookup(domain)).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(target: "mx", "{} after {:?}", e, self.timeout);
                inconclusive(format!("MX lookup timed out after {:?}", self.timeout))
            }
        };
        tracing::debug!(target: "mx", "MX check for {} finished in {:.2?}: {:?}", domain, start.elapsed(), result.status);

        if result.status != CheckStatus::Inconclusive {
            self.cache.set(domain, result.clone());
        }
        result
    }

    async fn lookup(&self, domain: &str) -> MxCheck {
        let response = match self.resolver.resolve(domain, RecordType::Mx).await {
            Ok(r) => r,
            Err(e) => return inconclusive(format!("Could not verify MX records: {}", e)),
        };
        if response.is_nxdomain() {
            return fail("Domain does not exist");
        }
        if !response.is_success() {
            return inconclusive(format!("Resolver returned status {} for MX query", response.status));
        }

        let records = parse_mx_records(&response);
        // RFC 7505 null MX: "0 ." means the domain accepts no mail.
        if records.len() == 1 && records[0].exchange.is_empty() {
            return fail("Domain does not accept email (null MX)");
        }
        if !records.is_empty() {
            let message = format!("Found {} MX record(s)", records.len());
            return mx_check(CheckStatus::Pass, records, false, message);
        }

        tracing::debug!(target: "mx", "No MX records for {}, trying A record", domain);
        self.a_fallback(domain).await
    }

    async fn a_fallback(&self, domain: &str) -> MxCheck {
        let response = match self.resolver.resolve(domain, RecordType::A).await {
            Ok(r) => r,
            Err(e) => return inconclusive(format!("Could not verify A record fallback: {}", e)),
        };
        if response.is_nxdomain() {
            return fail("Domain does not exist");
        }
        if !response.is_success() {
            return inconclusive(format!("Resolver returned status {} for A query", response.status));
        }
        if response.answers_of(RecordType::A).next().is_some() {
            mx_check(
                CheckStatus::Pass,
                Vec::new(),
                true,
                "No MX records; domain accepts mail via its A record".to_string(),
            )
        } else {
            fail("No MX or A records found")
        }
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
