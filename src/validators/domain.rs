//! Structural domain check, cached per domain.

use crate::core::models::DomainCheck;
use crate::core::patterns::{DOMAIN_PATTERN, MAX_DOMAIN_LENGTH};
use crate::utils::cache::BoundedCache;
use std::time::Duration;

pub struct DomainValidator {
    cache: BoundedCache<DomainCheck>,
}

impl DomainValidator {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: BoundedCache::new("domain", capacity, ttl),
        }
    }

    pub fn check(&self, domain: &str) -> DomainCheck {
        if let Some(hit) = self.cache.get(domain) {
            return hit;
        }
        let result = check_domain_format(domain);
        self.cache.set(domain, result.clone());
        result
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

/// Uncached structural check of a domain name.
pub fn check_domain_format(domain: &str) -> DomainCheck {
    let (valid, message) = if domain.is_empty() {
        (false, "Domain is empty")
    } else if domain.len() > MAX_DOMAIN_LENGTH {
        (false, "Domain must not exceed 253 characters")
    } else if !DOMAIN_PATTERN.is_match(domain) {
        (false, "Invalid domain format")
    } else {
        (true, "Valid domain format")
    };
    DomainCheck {
        valid,
        message: message.to_string(),
    }
}
