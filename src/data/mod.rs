//! Static reference data consulted by the list-based validators.
//!
//! A [`ReferenceData`] value is built once per [`crate::Validator`] from the
//! built-in lists plus whatever the configuration adds, and is shared
//! read-only afterwards.

mod lists;

use crate::core::config::Config;
use std::collections::{HashMap, HashSet};

/// Lookup tables for the membership checks. All keys are lowercase.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    disposable_domains: HashSet<String>,
    free_providers: HashMap<String, String>,
    role_prefixes: HashSet<String>,
    typo_domains: HashMap<String, String>,
    catch_all_domains: HashSet<String>,
    blacklist_hosts: Vec<String>,
}

fn lowered<'a>(items: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    items.into_iter().map(|s| s.trim().to_lowercase()).collect()
}

fn lowered_pairs<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> HashMap<String, String> {
    items
        .into_iter()
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect()
}

impl ReferenceData {
    /// The built-in lists only.
    pub fn builtin() -> Self {
        Self {
            disposable_domains: lowered(lists::DISPOSABLE_DOMAINS.iter().copied()),
            free_providers: lowered_pairs(lists::FREE_PROVIDERS.iter().copied()),
            role_prefixes: lowered(lists::ROLE_PREFIXES.iter().copied()),
            typo_domains: lowered_pairs(lists::TYPO_DOMAINS.iter().copied()),
            catch_all_domains: lowered(lists::CATCH_ALL_DOMAINS.iter().copied()),
            blacklist_hosts: lists::BLACKLIST_HOSTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Built-in lists extended (and, for blacklist hosts, replaced) by the
    /// configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut data = Self::builtin();
        data.disposable_domains
            .extend(lowered(config.extra_disposable_domains.iter().map(String::as_str)));
        data.free_providers.extend(lowered_pairs(
            config
                .extra_free_providers
                .iter()
                .map(|(d, n)| (d.as_str(), n.as_str())),
        ));
        data.role_prefixes
            .extend(lowered(config.extra_role_prefixes.iter().map(String::as_str)));
        data.typo_domains.extend(
            config
                .extra_typo_domains
                .iter()
                .map(|(t, d)| (t.trim().to_lowercase(), d.trim().to_lowercase())),
        );
        data.catch_all_domains
            .extend(lowered(config.extra_catch_all_domains.iter().map(String::as_str)));
        if let Some(hosts) = &config.blacklist_hosts {
            data.blacklist_hosts = hosts.iter().map(|h| h.trim().to_lowercase()).collect();
        }

        tracing::debug!(target: "config",
            "Reference data loaded: {} disposable, {} free providers, {} roles, {} typos, {} catch-all, {} DNSBL hosts",
            data.disposable_domains.len(),
            data.free_providers.len(),
            data.role_prefixes.len(),
            data.typo_domains.len(),
            data.catch_all_domains.len(),
            data.blacklist_hosts.len()
        );
        data
    }

    pub fn is_disposable(&self, domain: &str) -> bool {
        self.disposable_domains.contains(domain)
    }

    pub fn free_provider(&self, domain: &str) -> Option<&str> {
        self.free_providers.get(domain).map(String::as_str)
    }

    pub fn is_role_prefix(&self, local_part: &str) -> bool {
        self.role_prefixes.contains(local_part)
    }

    pub fn typo_correction(&self, domain: &str) -> Option<&str> {
        self.typo_domains.get(domain).map(String::as_str)
    }

    pub fn is_known_catch_all(&self, domain: &str) -> bool {
        self.catch_all_domains.contains(domain)
    }

    pub fn blacklist_hosts(&self) -> &[String] {
        &self.blacklist_hosts
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}
