//! Membership checks against the static reference data.

use crate::core::models::{CatchAllCheck, DisposableCheck, FreeProviderCheck, RoleBasedCheck, TypoCheck};
use crate::data::ReferenceData;

pub fn check_disposable(data: &ReferenceData, domain: &str) -> DisposableCheck {
    let is_disposable = data.is_disposable(domain);
    DisposableCheck {
        is_disposable,
        message: if is_disposable {
            "Disposable email domain".to_string()
        } else {
            "Not a disposable email domain".to_string()
        },
    }
}

/// Matches the local part, and its base before any `+tag`, against the
/// role prefixes.
pub fn check_role_based(data: &ReferenceData, local_part: &str) -> RoleBasedCheck {
    let local = local_part.to_lowercase();
    let base = local.split('+').next().unwrap_or_default();
    let role = if data.is_role_prefix(&local) {
        Some(local.clone())
    } else if !base.is_empty() && data.is_role_prefix(base) {
        Some(base.to_string())
    } else {
        None
    };

    match role {
        Some(role) => RoleBasedCheck {
            is_role_based: true,
            message: format!("Role-based address ({})", role),
            role: Some(role),
        },
        None => RoleBasedCheck {
            is_role_based: false,
            role: None,
            message: "Not a role-based address".to_string(),
        },
    }
}

pub fn check_free_provider(data: &ReferenceData, domain: &str) -> FreeProviderCheck {
    match data.free_provider(domain) {
        Some(provider) => FreeProviderCheck {
            is_free: true,
            provider: Some(provider.to_string()),
            message: format!("Free email provider ({})", provider),
        },
        None => FreeProviderCheck {
            is_free: false,
            provider: None,
            message: "Not a free email provider".to_string(),
        },
    }
}

/// Exact known-typo lookup; no fuzzy matching.
pub fn check_typo(data: &ReferenceData, local_part: &str, domain: &str) -> TypoCheck {
    match data.typo_correction(domain) {
        Some(corrected) => TypoCheck {
            has_typo: true,
            suggestion: Some(corrected.to_string()),
            suggested_email: Some(format!("{}@{}", local_part, corrected)),
            message: format!("Did you mean {}@{}?", local_part, corrected),
        },
        None => TypoCheck {
            has_typo: false,
            suggestion: None,
            suggested_email: None,
            message: "No typo detected".to_string(),
        },
    }
}

/// Known catch-all domains only. Real detection needs an SMTP dialogue,
/// so anything not on the list reports "not catch-all".
pub fn check_catch_all(data: &ReferenceData, domain: &str) -> CatchAllCheck {
    let is_catch_all = data.is_known_catch_all(domain);
    CatchAllCheck {
        is_catch_all,
        message: if is_catch_all {
            "Domain is known to accept all addresses".to_string()
        } else {
            "Not a known catch-all domain".to_string()
        },
    }
}
