//! Sanity checks applied to a fully assembled [`Config`].

use super::Config;
use crate::core::error::{AppError, Result};
use std::time::Duration;
use url::Url;

/// Upper bound on either retry sleep bound, in seconds.
const MAX_RETRY_SLEEP_SECS: f32 = 60.0;

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    let url = Url::parse(&config.resolver_url)?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(AppError::Config(format!(
            "resolver_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    let timeouts = [
        ("request_timeout", config.request_timeout),
        ("dns_timeout", config.dns_timeout),
        ("blacklist_timeout", config.blacklist_timeout),
        ("mx_cache_ttl", config.mx_cache_ttl),
        ("domain_cache_ttl", config.domain_cache_ttl),
        ("blacklist_cache_ttl", config.blacklist_cache_ttl),
        ("result_cache_ttl", config.result_cache_ttl),
    ];
    for (name, value) in timeouts {
        if value == Duration::ZERO {
            return Err(AppError::Config(format!("{} must be greater than zero", name)));
        }
    }

    let sizes = [
        ("mx_cache_size", config.mx_cache_size),
        ("domain_cache_size", config.domain_cache_size),
        ("blacklist_cache_size", config.blacklist_cache_size),
        ("result_cache_size", config.result_cache_size),
        ("batch_size", config.batch_size),
        ("max_bulk_emails", config.max_bulk_emails),
    ];
    for (name, value) in sizes {
        if value == 0 {
            return Err(AppError::Config(format!("{} must be greater than zero", name)));
        }
    }

    if config.max_lookup_attempts == 0 {
        return Err(AppError::Config(
            "max_lookup_attempts must be at least 1".to_string(),
        ));
    }

    let (min, max) = config.sleep_between_attempts;
    if !min.is_finite() || !max.is_finite() {
        return Err(AppError::Config(
            "retry sleep bounds must be finite numbers".to_string(),
        ));
    }
    if min < 0.0 || max < 0.0 {
        return Err(AppError::Config(
            "retry sleep bounds cannot be negative".to_string(),
        ));
    }
    if max > MAX_RETRY_SLEEP_SECS {
        return Err(AppError::Config(format!(
            "retry sleep cannot exceed {} seconds",
            MAX_RETRY_SLEEP_SECS
        )));
    }
    if min > max {
        return Err(AppError::Config(format!(
            "min retry sleep ({}) is greater than max ({})",
            min, max
        )));
    }

    if let Some(hosts) = &config.blacklist_hosts {
        if let Some(bad) = hosts.iter().find(|h| h.trim().is_empty() || h.contains('/')) {
            return Err(AppError::Config(format!("invalid blacklist host '{}'", bad)));
        }
    }

    tracing::debug!(target: "config", "Configuration validated: {:?}", config);
    Ok(())
}
