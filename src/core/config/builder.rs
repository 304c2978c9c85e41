//! Builder for the runtime [`Config`], layering file values and explicit
//! overrides on top of the defaults.

use super::file::ConfigFile;
use super::validation::validate_config;
use super::Config;
use crate::core::error::Result;
use std::time::Duration;

/// Incrementally assembles a [`Config`].
///
/// Later calls win: `apply_file` followed by `resolver_url` keeps the
/// explicit resolver.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays every value present in a parsed configuration file.
    pub fn apply_file(mut self, file: &ConfigFile) -> Self {
        let c = &mut self.config;

        let dns = &file.dns;
        if let Some(url) = &dns.resolver_url {
            c.resolver_url = url.clone();
        }
        if let Some(secs) = dns.request_timeout {
            c.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = dns.dns_timeout {
            c.dns_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = dns.max_lookup_attempts {
            c.max_lookup_attempts = attempts;
        }
        if let Some(min) = dns.min_retry_sleep {
            c.sleep_between_attempts.0 = min;
        }
        if let Some(max) = dns.max_retry_sleep {
            c.sleep_between_attempts.1 = max;
        }
        if let Some(agent) = &dns.user_agent {
            c.user_agent = agent.clone();
        }

        let bl = &file.blacklist;
        if let Some(enabled) = bl.enabled {
            c.enable_blacklist_checks = enabled;
        }
        if let Some(secs) = bl.timeout {
            c.blacklist_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = bl.check_limit {
            c.blacklist_check_limit = limit;
        }
        if let Some(hosts) = &bl.hosts {
            c.blacklist_hosts = Some(hosts.clone());
        }

        let cache = &file.cache;
        if let Some(secs) = cache.mx_ttl {
            c.mx_cache_ttl = Duration::from_secs(secs);
        }
        if let Some(size) = cache.mx_size {
            c.mx_cache_size = size;
        }
        if let Some(secs) = cache.domain_ttl {
            c.domain_cache_ttl = Duration::from_secs(secs);
        }
        if let Some(size) = cache.domain_size {
            c.domain_cache_size = size;
        }
        if let Some(secs) = cache.blacklist_ttl {
            c.blacklist_cache_ttl = Duration::from_secs(secs);
        }
        if let Some(size) = cache.blacklist_size {
            c.blacklist_cache_size = size;
        }
        if let Some(secs) = cache.result_ttl {
            c.result_cache_ttl = Duration::from_secs(secs);
        }
        if let Some(size) = cache.result_size {
            c.result_cache_size = size;
        }

        let bulk = &file.bulk;
        if let Some(size) = bulk.batch_size {
            c.batch_size = size;
        }
        if let Some(ms) = bulk.batch_interval_ms {
            c.batch_interval = Duration::from_millis(ms);
        }
        if let Some(max) = bulk.max_emails {
            c.max_bulk_emails = max;
        }
        if let Some(ms) = bulk.max_backoff_ms {
            c.throttle_max_backoff = Duration::from_millis(ms);
        }

        let lists = &file.lists;
        if let Some(domains) = &lists.disposable_domains {
            c.extra_disposable_domains = domains.clone();
        }
        if let Some(providers) = &lists.free_providers {
            c.extra_free_providers = providers
                .iter()
                .map(|(d, n)| (d.clone(), n.clone()))
                .collect();
        }
        if let Some(prefixes) = &lists.role_prefixes {
            c.extra_role_prefixes = prefixes.clone();
        }
        if let Some(typos) = &lists.typo_domains {
            c.extra_typo_domains = typos.iter().map(|(t, d)| (t.clone(), d.clone())).collect();
        }
        if let Some(domains) = &lists.catch_all_domains {
            c.extra_catch_all_domains = domains.clone();
        }

        self
    }

    pub fn resolver_url(mut self, url: impl Into<String>) -> Self {
        self.config.resolver_url = url.into();
        self
    }

    pub fn dns_timeout(mut self, timeout: Duration) -> Self {
        self.config.dns_timeout = timeout;
        self
    }

    pub fn enable_blacklist_checks(mut self, enabled: bool) -> Self {
        self.config.enable_blacklist_checks = enabled;
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    pub fn batch_interval(mut self, interval: Duration) -> Self {
        self.config.batch_interval = interval;
        self
    }

    pub fn max_lookup_attempts(mut self, attempts: u32) -> Self {
        self.config.max_lookup_attempts = attempts;
        self
    }

    /// Bounds, in seconds, of the jittered pause between lookup attempts.
    pub fn sleep_between_attempts(mut self, min: f32, max: f32) -> Self {
        self.config.sleep_between_attempts = (min, max);
        self
    }

    pub fn loaded_config_path(mut self, path: Option<String>) -> Self {
        self.config.loaded_config_path = path;
        self
    }

    /// Validates and returns the assembled configuration.
    pub fn build(self) -> Result<Config> {
        validate_config(&self.config)?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
            [cache]
            result_ttl = 30
            [bulk]
            batch_size = 25
            [lists]
            free_providers = { "mail.test" = "Mail Test" }
        "#,
        )
        .unwrap();
        let config = ConfigBuilder::new().apply_file(&file).build().unwrap();
        assert_eq!(config.result_cache_ttl, Duration::from_secs(30));
        assert_eq!(config.batch_size, 25);
        assert_eq!(
            config.extra_free_providers,
            vec![("mail.test".to_string(), "Mail Test".to_string())]
        );
        assert_eq!(config.mx_cache_size, Config::default().mx_cache_size);
    }

    #[test]
    fn explicit_setter_wins_over_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [dns]
            resolver_url = "https://one.example/resolve"
        "#,
        )
        .unwrap();
        let config = ConfigBuilder::new()
            .apply_file(&file)
            .resolver_url("https://two.example/resolve")
            .build()
            .unwrap();
        assert_eq!(config.resolver_url, "https://two.example/resolve");
    }

    #[test]
    fn build_rejects_invalid_values() {
        assert!(ConfigBuilder::new().batch_size(0).build().is_err());
    }

    #[test]
    fn non_finite_retry_sleep_from_file_is_rejected() {
        let file: ConfigFile = toml::from_str(
            r#"
            [dns]
            min_retry_sleep = nan
        "#,
        )
        .unwrap();
        let err = ConfigBuilder::new().apply_file(&file).build().unwrap_err();
        assert!(err.to_string().contains("finite"), "{}", err);

        assert!(ConfigBuilder::new().sleep_between_attempts(1.0, 0.5).build().is_err());
    }
}
