//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;
pub use loading::{load_and_build, load_config};

use std::time::Duration;

/// Public resolver speaking the JSON dialect of DNS-over-HTTPS.
pub const DEFAULT_RESOLVER_URL: &str = "https://dns.google/resolve";

/// Runtime configuration settings used by the email-vet core logic.
#[derive(Debug, Clone)]
pub struct Config {
    pub resolver_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub dns_timeout: Duration,
    pub max_lookup_attempts: u32,
    pub sleep_between_attempts: (f32, f32),

    pub enable_blacklist_checks: bool,
    pub blacklist_timeout: Duration,
    pub blacklist_check_limit: usize,

    pub mx_cache_ttl: Duration,
    pub mx_cache_size: usize,
    pub domain_cache_ttl: Duration,
    pub domain_cache_size: usize,
    pub blacklist_cache_ttl: Duration,
    pub blacklist_cache_size: usize,
    pub result_cache_ttl: Duration,
    pub result_cache_size: usize,

    pub batch_size: usize,
    pub batch_interval: Duration,
    pub max_bulk_emails: usize,
    pub throttle_max_backoff: Duration,

    pub extra_disposable_domains: Vec<String>,
    pub extra_free_providers: Vec<(String, String)>,
    pub extra_role_prefixes: Vec<String>,
    pub extra_typo_domains: Vec<(String, String)>,
    pub extra_catch_all_domains: Vec<String>,
    pub blacklist_hosts: Option<Vec<String>>,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        Config {
            resolver_url: DEFAULT_RESOLVER_URL.to_string(),
            request_timeout: Duration::from_secs(5),
            user_agent: format!("email-vet/{}", env!("CARGO_PKG_VERSION")),
            dns_timeout: Duration::from_secs(8),
            max_lookup_attempts: 2,
            sleep_between_attempts: (0.05, 0.25),
            enable_blacklist_checks: true,
            blacklist_timeout: Duration::from_secs(3),
            blacklist_check_limit: 3,
            mx_cache_ttl: Duration::from_secs(5 * 60),
            mx_cache_size: 1000,
            domain_cache_ttl: Duration::from_secs(5 * 60),
            domain_cache_size: 1000,
            blacklist_cache_ttl: Duration::from_secs(15 * 60),
            blacklist_cache_size: 500,
            result_cache_ttl: Duration::from_secs(60),
            result_cache_size: 500,
            batch_size: 10,
            batch_interval: Duration::from_millis(100),
            max_bulk_emails: 1000,
            throttle_max_backoff: Duration::from_secs(5),
            extra_disposable_domains: Vec::new(),
            extra_free_providers: Vec::new(),
            extra_role_prefixes: Vec::new(),
            extra_typo_domains: Vec::new(),
            extra_catch_all_domains: Vec::new(),
            blacklist_hosts: None,
            loaded_config_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}

/// Utility function to get a random sleep duration between lookup attempts.
///
/// Uses the `sleep_between_attempts` setting from the provided configuration.
pub fn get_random_sleep_duration(config: &Config) -> Duration {
    use rand::Rng;
    let (min, max) = config.sleep_between_attempts;
    if min >= max {
        return Duration::from_secs_f32(min.max(0.0));
    }
    let duration_secs = rand::thread_rng().gen_range(min..max);
    Duration::from_secs_f32(duration_secs)
}
