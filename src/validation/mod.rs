//! Orchestrates the leaf validators for single and bulk validation.

mod bulk;
pub mod scoring;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::models::{
    skipped_blacklist, skipped_mx, CheckStatus, SyntaxCheck, ValidationChecks, ValidationResult,
};
use crate::data::ReferenceData;
use crate::dns::{DnsResolve, DohClient};
use crate::utils::cache::BoundedCache;
use crate::utils::dedup::Deduplicator;
use crate::utils::throttle::Throttle;
use crate::validators::syntax::MSG_MISSING_AT;
use crate::validators::{
    check_catch_all, check_disposable, check_free_provider, check_role_based, check_typo,
    normalize_email, parse_email, validate_syntax, BlacklistChecker, DomainValidator, MxValidator,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

struct ValidatorInner {
    config: Arc<Config>,
    data: Arc<ReferenceData>,
    domain: DomainValidator,
    mx: MxValidator,
    blacklist: BlacklistChecker,
    results: BoundedCache<ValidationResult>,
    pending: Deduplicator<ValidationResult>,
    throttle: Arc<Throttle>,
}

/// Entry point of the validation engine.
///
/// Cheap to clone; clones share caches, the dedup map and the throttle.
#[derive(Clone)]
pub struct Validator {
    inner: Arc<ValidatorInner>,
}

fn throttle_for(config: &Config) -> Arc<Throttle> {
    let permits = u32::try_from(config.batch_size).unwrap_or(u32::MAX);
    Arc::new(Throttle::new(
        permits,
        config.batch_interval,
        config.throttle_max_backoff,
    ))
}

impl Validator {
    /// Builds a validator that resolves through the configured DoH endpoint.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let throttle = throttle_for(&config);
        let client = DohClient::new(config.clone(), Some(throttle.clone()))?;
        let data = ReferenceData::from_config(&config);
        Ok(Self::assemble(config, Arc::new(client), data, throttle))
    }

    /// Builds a validator around a caller-supplied resolver and reference
    /// data.
    pub fn with_resolver(config: Config, resolver: Arc<dyn DnsResolve>, data: ReferenceData) -> Self {
        let config = Arc::new(config);
        let throttle = throttle_for(&config);
        Self::assemble(config, resolver, data, throttle)
    }

    fn assemble(
        config: Arc<Config>,
        resolver: Arc<dyn DnsResolve>,
        data: ReferenceData,
        throttle: Arc<Throttle>,
    ) -> Self {
        let hosts: Vec<String> = data
            .blacklist_hosts()
            .iter()
            .take(config.blacklist_check_limit)
            .cloned()
            .collect();

        let inner = ValidatorInner {
            domain: DomainValidator::new(config.domain_cache_size, config.domain_cache_ttl),
            mx: MxValidator::new(
                resolver.clone(),
                config.mx_cache_size,
                config.mx_cache_ttl,
                config.dns_timeout,
            ),
            blacklist: BlacklistChecker::new(
                resolver,
                hosts,
                config.enable_blacklist_checks,
                config.blacklist_timeout,
                config.blacklist_cache_size,
                config.blacklist_cache_ttl,
            ),
            results: BoundedCache::new("results", config.result_cache_size, config.result_cache_ttl),
            pending: Deduplicator::new(),
            data: Arc::new(data),
            throttle,
            config,
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Validates one address.
    ///
    /// Never fails: lookup problems show up as inconclusive checks, and a run
    /// that panics yields an unverified result with unknown deliverability.
    /// Results are cached per normalized address, and concurrent calls for
    /// the same address share one validation run.
    pub async fn validate_email(&self, email: &str) -> ValidationResult {
        let key = normalize_email(email);

        if let Some(hit) = self.inner.results.get(&key) {
            tracing::debug!(target: "validator", "Result cache hit for {}", key);
            return hit.refreshed_for(email);
        }

        let inner = self.inner.clone();
        let owned_key = key.clone();
        let outcome = self
            .inner
            .pending
            .run(&key, move || async move { inner.validate_uncached(&owned_key).await })
            .await;

        match outcome {
            Ok(result) => ValidationResult {
                email: email.to_string(),
                ..result
            },
            Err(e) => {
                tracing::warn!(target: "validator", "Validation of {} did not complete: {}", key, e);
                bulk::unverified_result(email)
            }
        }
    }

    /// Drops every cached lookup and result.
    pub fn clear_caches(&self) {
        self.inner.results.clear();
        self.inner.domain.clear();
        self.inner.mx.clear();
        self.inner.blacklist.clear();
    }
}

impl ValidatorInner {
    async fn validate_uncached(&self, normalized: &str) -> ValidationResult {
        let start = Instant::now();
        let syntax = validate_syntax(normalized);

        let checks = if !syntax.valid {
            tracing::debug!(target: "validator", "{} failed syntax: {}", normalized, syntax.message);
            ValidationChecks::short_circuited(syntax)
        } else {
            match parse_email(normalized) {
                Some(parsed) => self.run_checks(syntax, &parsed.local_part, &parsed.domain).await,
                None => ValidationChecks::short_circuited(SyntaxCheck::fail(MSG_MISSING_AT)),
            }
        };

        let verdict = scoring::assess(&checks);
        let result = ValidationResult {
            email: normalized.to_string(),
            is_valid: verdict.is_valid,
            score: verdict.score,
            checks,
            deliverability: verdict.deliverability,
            risk: verdict.risk,
            timestamp: Utc::now(),
        };

        tracing::info!(target: "validator",
            "Validated {} in {:.2?}: score={} risk={:?} deliverability={:?}",
            normalized, start.elapsed(), result.score, result.risk, result.deliverability
        );
        if result.checks.mx.status != CheckStatus::Inconclusive {
            self.results.set(normalized, result.clone());
        }
        result
    }

    async fn run_checks(&self, syntax: SyntaxCheck, local_part: &str, domain: &str) -> ValidationChecks {
        let domain_check = self.domain.check(domain);

        let (mx, blacklisted) = if domain_check.valid {
            tokio::join!(self.mx.check(domain), self.blacklist.check(domain))
        } else {
            (skipped_mx(), skipped_blacklist())
        };

        ValidationChecks {
            syntax,
            domain: domain_check,
            mx,
            disposable: check_disposable(&self.data, domain),
            role_based: check_role_based(&self.data, local_part),
            free_provider: check_free_provider(&self.data, domain),
            typo: check_typo(&self.data, local_part, domain),
            blacklisted,
            catch_all: check_catch_all(&self.data, domain),
        }
    }
}
