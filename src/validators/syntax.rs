//! Address syntax checks and parsing helpers.
//!
//! `validate_syntax` splits on the first `@`, so any further `@` lands in the
//! domain and fails the domain shape check. `parse_email` splits on the last
//! `@`. For addresses that pass `validate_syntax` the two agree, since such
//! an address contains exactly one `@`.

use crate::core::models::{ParsedEmail, SyntaxCheck};
use crate::core::patterns::{
    DOMAIN_PATTERN, LOCAL_PART_PATTERN, MAX_DOMAIN_LABEL_LENGTH, MAX_EMAIL_LENGTH,
    MAX_LOCAL_PART_LENGTH, TLD_PATTERN,
};

pub const MSG_REQUIRED: &str = "Email is required";
pub const MSG_MISSING_AT: &str = "Email must contain an @ symbol";
pub const MSG_MISSING_LOCAL: &str = "Email must have a local part before @";
pub const MSG_MISSING_DOMAIN: &str = "Email must have a domain after @";
pub const MSG_INVALID_TLD: &str = "Domain must have a valid TLD";
pub const MSG_CONSECUTIVE_DOTS: &str = "Email cannot contain consecutive dots";
pub const MSG_LOCAL_DOT_EDGE: &str = "Local part cannot start or end with a dot";
pub const MSG_DOMAIN_DOT_EDGE: &str = "Domain cannot start or end with a dot";
pub const MSG_DOMAIN_HYPHEN_EDGE: &str = "Domain labels cannot start or end with a hyphen";
pub const MSG_DOMAIN_LABEL_TOO_LONG: &str = "Domain labels must not exceed 63 characters";
pub const MSG_DOMAIN_INVALID: &str = "Domain contains invalid characters";
pub const MSG_TOO_LONG: &str = "Email must not exceed 254 characters";
pub const MSG_LOCAL_TOO_LONG: &str = "Local part must not exceed 64 characters";
pub const MSG_LOCAL_INVALID: &str = "Local part contains invalid characters";

/// Lowercased, trimmed form used for cache and dedup keys.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Checks the shape of an address, reporting the first rule it breaks.
pub fn validate_syntax(raw: &str) -> SyntaxCheck {
    let email = raw.trim();
    if email.is_empty() {
        return SyntaxCheck::fail(MSG_REQUIRED);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return SyntaxCheck::fail(MSG_MISSING_AT);
    };
    if local.is_empty() {
        return SyntaxCheck::fail(MSG_MISSING_LOCAL);
    }
    if domain.is_empty() {
        return SyntaxCheck::fail(MSG_MISSING_DOMAIN);
    }

    let tld = domain.rsplit('.').next().unwrap_or_default();
    if !domain.contains('.') || !TLD_PATTERN.is_match(tld) {
        return SyntaxCheck::fail(MSG_INVALID_TLD);
    }
    if email.contains("..") {
        return SyntaxCheck::fail(MSG_CONSECUTIVE_DOTS);
    }
    if local.starts_with('.') || local.ends_with('.') {
        return SyntaxCheck::fail(MSG_LOCAL_DOT_EDGE);
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return SyntaxCheck::fail(MSG_DOMAIN_DOT_EDGE);
    }
    if domain
        .split('.')
        .any(|label| label.starts_with('-') || label.ends_with('-'))
    {
        return SyntaxCheck::fail(MSG_DOMAIN_HYPHEN_EDGE);
    }
    if domain.split('.').any(|label| label.len() > MAX_DOMAIN_LABEL_LENGTH) {
        return SyntaxCheck::fail(MSG_DOMAIN_LABEL_TOO_LONG);
    }
    if !DOMAIN_PATTERN.is_match(domain) {
        return SyntaxCheck::fail(MSG_DOMAIN_INVALID);
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return SyntaxCheck::fail(MSG_TOO_LONG);
    }
    if local.len() > MAX_LOCAL_PART_LENGTH {
        return SyntaxCheck::fail(MSG_LOCAL_TOO_LONG);
    }
    if !LOCAL_PART_PATTERN.is_match(local) {
        return SyntaxCheck::fail(MSG_LOCAL_INVALID);
    }

    SyntaxCheck::ok()
}

/// Splits an address on its last `@`, lowercasing the domain.
pub fn parse_email(raw: &str) -> Option<ParsedEmail> {
    let (local, domain) = raw.trim().rsplit_once('@')?;
    Some(ParsedEmail {
        local_part: local.to_string(),
        domain: domain.to_lowercase(),
    })
}
