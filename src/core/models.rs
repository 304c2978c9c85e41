//! Data structures produced by the validation pipeline.
//!
//! Everything here serializes with camelCase field names so results can be
//! stored by an external history store and read back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a check that depends on a network lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// The lookup could not be completed (timeout, transport error, bad response).
    Inconclusive,
    /// The check was not reached because an earlier gate failed.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deliverability {
    Deliverable,
    Risky,
    Undeliverable,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxCheck {
    pub valid: bool,
    pub message: String,
}

impl SyntaxCheck {
    pub(crate) fn ok() -> Self {
        Self {
            valid: true,
            message: "Valid email syntax".to_string(),
        }
    }

    pub(crate) fn fail(message: &str) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCheck {
    pub valid: bool,
    pub message: String,
}

/// A single mail exchanger from an MX answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    pub exchange: String,
    pub priority: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MxCheck {
    pub status: CheckStatus,
    pub records: Vec<MxRecord>,
    /// True when no MX exists and an A record was accepted instead.
    pub used_a_fallback: bool,
    pub message: String,
}

impl MxCheck {
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposableCheck {
    pub is_disposable: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBasedCheck {
    pub is_role_based: bool,
    pub role: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeProviderCheck {
    pub is_free: bool,
    pub provider: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypoCheck {
    pub has_typo: bool,
    /// Corrected domain.
    pub suggestion: Option<String>,
    /// Original local part joined with the corrected domain.
    pub suggested_email: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistCheck {
    pub status: CheckStatus,
    pub is_blacklisted: bool,
    /// DNSBL hosts that listed the domain.
    pub lists: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchAllCheck {
    pub is_catch_all: bool,
    pub message: String,
}

/// The nine sub-results of one validation. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationChecks {
    pub syntax: SyntaxCheck,
    pub domain: DomainCheck,
    pub mx: MxCheck,
    pub disposable: DisposableCheck,
    pub role_based: RoleBasedCheck,
    pub free_provider: FreeProviderCheck,
    pub typo: TypoCheck,
    pub blacklisted: BlacklistCheck,
    pub catch_all: CatchAllCheck,
}

const NOT_CHECKED: &str = "Not checked";

impl ValidationChecks {
    /// Checks for an address that failed syntax validation: every later
    /// check carries its inert default.
    pub fn short_circuited(syntax: SyntaxCheck) -> Self {
        Self {
            syntax,
            domain: DomainCheck {
                valid: false,
                message: NOT_CHECKED.to_string(),
            },
            mx: skipped_mx(),
            disposable: DisposableCheck {
                is_disposable: false,
                message: NOT_CHECKED.to_string(),
            },
            role_based: RoleBasedCheck {
                is_role_based: false,
                role: None,
                message: NOT_CHECKED.to_string(),
            },
            free_provider: FreeProviderCheck {
                is_free: false,
                provider: None,
                message: NOT_CHECKED.to_string(),
            },
            typo: TypoCheck {
                has_typo: false,
                suggestion: None,
                suggested_email: None,
                message: NOT_CHECKED.to_string(),
            },
            blacklisted: skipped_blacklist(),
            catch_all: CatchAllCheck {
                is_catch_all: false,
                message: NOT_CHECKED.to_string(),
            },
        }
    }
}

pub(crate) fn skipped_mx() -> MxCheck {
    MxCheck {
        status: CheckStatus::Skipped,
        records: Vec::new(),
        used_a_fallback: false,
        message: NOT_CHECKED.to_string(),
    }
}

pub(crate) fn skipped_blacklist() -> BlacklistCheck {
    BlacklistCheck {
        status: CheckStatus::Skipped,
        is_blacklisted: false,
        lists: Vec::new(),
        message: NOT_CHECKED.to_string(),
    }
}

/// Full verdict for one email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// The address as supplied by the caller.
    pub email: String,
    pub is_valid: bool,
    pub score: u8,
    pub checks: ValidationChecks,
    pub deliverability: Deliverability,
    pub risk: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

impl ValidationResult {
    /// Copy of this result carrying `email` and a fresh timestamp.
    pub fn refreshed_for(&self, email: &str) -> Self {
        Self {
            email: email.to_string(),
            timestamp: Utc::now(),
            ..self.clone()
        }
    }
}

/// Local part and domain of an address split on its last `@`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEmail {
    pub local_part: String,
    pub domain: String,
}
