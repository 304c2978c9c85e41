//! Defines the structure mirroring the TOML configuration file format.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) dns: DnsConfig,
    #[serde(default)]
    pub(crate) blacklist: BlacklistConfig,
    #[serde(default)]
    pub(crate) cache: CacheConfig,
    #[serde(default)]
    pub(crate) bulk: BulkConfig,
    #[serde(default)]
    pub(crate) lists: ListsConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DnsConfig {
    pub(crate) resolver_url: Option<String>,
    /// Seconds.
    pub(crate) request_timeout: Option<u64>,
    /// Seconds.
    pub(crate) dns_timeout: Option<u64>,
    pub(crate) max_lookup_attempts: Option<u32>,
    pub(crate) min_retry_sleep: Option<f32>,
    pub(crate) max_retry_sleep: Option<f32>,
    pub(crate) user_agent: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct BlacklistConfig {
    pub(crate) enabled: Option<bool>,
    /// Seconds.
    pub(crate) timeout: Option<u64>,
    pub(crate) check_limit: Option<usize>,
    pub(crate) hosts: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct CacheConfig {
    /// Seconds.
    pub(crate) mx_ttl: Option<u64>,
    pub(crate) mx_size: Option<usize>,
    /// Seconds.
    pub(crate) domain_ttl: Option<u64>,
    pub(crate) domain_size: Option<usize>,
    /// Seconds.
    pub(crate) blacklist_ttl: Option<u64>,
    pub(crate) blacklist_size: Option<usize>,
    /// Seconds.
    pub(crate) result_ttl: Option<u64>,
    pub(crate) result_size: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct BulkConfig {
    pub(crate) batch_size: Option<usize>,
    /// Milliseconds.
    pub(crate) batch_interval_ms: Option<u64>,
    pub(crate) max_emails: Option<usize>,
    /// Milliseconds.
    pub(crate) max_backoff_ms: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ListsConfig {
    pub(crate) disposable_domains: Option<Vec<String>>,
    pub(crate) free_providers: Option<BTreeMap<String, String>>,
    pub(crate) role_prefixes: Option<Vec<String>>,
    pub(crate) typo_domains: Option<BTreeMap<String, String>>,
    pub(crate) catch_all_domains: Option<Vec<String>>,
}
