//! Shared regular expressions for email and domain shape checks.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters permitted in an unquoted local part (RFC 5322 atext plus dots).
pub static LOCAL_PART_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-!#$&'*/=?^`{|}~]+$")
        .expect("local part pattern failed to compile. This is a bug.")
});

/// Full domain: one or more labels followed by an alphabetic TLD.
pub static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$")
        .expect("domain pattern failed to compile. This is a bug.")
});

/// Final label of a domain.
pub static TLD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,}$").expect("tld pattern failed to compile. This is a bug."));

pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_LOCAL_PART_LENGTH: usize = 64;
pub const MAX_DOMAIN_LENGTH: usize = 253;
pub const MAX_DOMAIN_LABEL_LENGTH: usize = 63;
