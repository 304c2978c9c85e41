//! DNS lookups over the JSON dialect of DNS-over-HTTPS.
//!
//! [`DnsResolve`] is the seam between the validators and the network; the
//! production implementation is [`DohClient`].

mod doh;

pub use doh::DohClient;

use crate::core::error::{AppError, Result};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// DNS RCODE values as reported in the `Status` field.
pub const STATUS_NOERROR: u32 = 0;
pub const STATUS_SERVFAIL: u32 = 2;
pub const STATUS_NXDOMAIN: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Mx,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Mx => "MX",
        }
    }

    /// Numeric type code used in answer records.
    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::Mx => 15,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the `Answer` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsAnswer {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    pub data: String,
}

/// Body of a DoH JSON response. Fields this crate does not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsResponse {
    #[serde(rename = "Status")]
    pub status: u32,
    #[serde(rename = "Answer", default)]
    pub answers: Vec<DnsAnswer>,
}

impl DnsResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_NOERROR
    }

    pub fn is_nxdomain(&self) -> bool {
        self.status == STATUS_NXDOMAIN
    }

    /// Answers of the given type, skipping CNAMEs and other records a
    /// resolver includes while following a chain.
    pub fn answers_of(&self, record_type: RecordType) -> impl Iterator<Item = &DnsAnswer> {
        let code = record_type.code();
        self.answers.iter().filter(move |a| a.record_type == code)
    }
}

/// Issues DNS queries.
///
/// Implementations return `Ok` for any response the resolver produced,
/// including non-zero statuses, and `Err` only when no usable response
/// was obtained.
pub trait DnsResolve: Send + Sync {
    fn resolve<'a>(&'a self, name: &'a str, record_type: RecordType) -> BoxFuture<'a, Result<DnsResponse>>;
}

/// Runs `lookup` for `name` under `limit`, reporting expiry as
/// [`AppError::DnsTimeout`].
pub async fn within<T>(name: &str, limit: Duration, lookup: impl Future<Output = T>) -> Result<T> {
    tokio::time::timeout(limit, lookup)
        .await
        .map_err(|_| AppError::DnsTimeout(name.to_string()))
}
