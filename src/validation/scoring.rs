//! Turns a set of checks into a score, validity flag, risk and deliverability.

use crate::core::models::{CheckStatus, Deliverability, RiskLevel, ValidationChecks};

pub const WEIGHT_SYNTAX: u8 = 20;
pub const WEIGHT_DOMAIN: u8 = 20;
pub const WEIGHT_MX: u8 = 25;
pub const WEIGHT_NOT_DISPOSABLE: u8 = 15;
pub const WEIGHT_NOT_ROLE_BASED: u8 = 5;
pub const WEIGHT_NO_TYPO: u8 = 10;
pub const WEIGHT_NOT_BLACKLISTED: u8 = 5;

const LOW_RISK_THRESHOLD: u8 = 80;
const MEDIUM_RISK_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_valid: bool,
    pub score: u8,
    pub risk: RiskLevel,
    pub deliverability: Deliverability,
}

/// Weighted sum of passing checks. Failing a component withholds all of its
/// points; an address with invalid syntax scores zero.
pub fn score(checks: &ValidationChecks) -> u8 {
    if !checks.syntax.valid {
        return 0;
    }
    let blacklist_ok = matches!(
        checks.blacklisted.status,
        CheckStatus::Pass | CheckStatus::Inconclusive
    ) && !checks.blacklisted.is_blacklisted;

    let parts = [
        (true, WEIGHT_SYNTAX),
        (checks.domain.valid, WEIGHT_DOMAIN),
        (checks.mx.passed(), WEIGHT_MX),
        (!checks.disposable.is_disposable, WEIGHT_NOT_DISPOSABLE),
        (!checks.role_based.is_role_based, WEIGHT_NOT_ROLE_BASED),
        (!checks.typo.has_typo, WEIGHT_NO_TYPO),
        (blacklist_ok, WEIGHT_NOT_BLACKLISTED),
    ];
    parts
        .iter()
        .filter(|(passed, _)| *passed)
        .map(|(_, weight)| *weight)
        .sum::<u8>()
        .min(100)
}

/// Syntax, domain and MX all hold. An MX lookup that could not complete
/// does not count against the address.
pub fn is_valid(checks: &ValidationChecks) -> bool {
    checks.syntax.valid
        && checks.domain.valid
        && matches!(checks.mx.status, CheckStatus::Pass | CheckStatus::Inconclusive)
}

pub fn risk_for(score: u8) -> RiskLevel {
    if score >= LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

pub fn deliverability_for(checks: &ValidationChecks) -> Deliverability {
    if !checks.syntax.valid || !checks.domain.valid {
        return Deliverability::Undeliverable;
    }
    match checks.mx.status {
        CheckStatus::Fail | CheckStatus::Skipped => return Deliverability::Undeliverable,
        CheckStatus::Inconclusive => return Deliverability::Unknown,
        CheckStatus::Pass => {}
    }
    if checks.disposable.is_disposable || checks.blacklisted.is_blacklisted || checks.catch_all.is_catch_all {
        Deliverability::Risky
    } else {
        Deliverability::Deliverable
    }
}

pub fn assess(checks: &ValidationChecks) -> Verdict {
    let score = score(checks);
    Verdict {
        is_valid: is_valid(checks),
        score,
        risk: risk_for(score),
        deliverability: deliverability_for(checks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::*;
    use pretty_assertions::assert_eq;

    fn clean_checks() -> ValidationChecks {
        ValidationChecks {
            syntax: SyntaxCheck::ok(),
            domain: DomainCheck {
                valid: true,
                message: String::new(),
            },
            mx: MxCheck {
                status: CheckStatus::Pass,
                records: vec![MxRecord {
                    exchange: "mx.example.com".into(),
                    priority: 10,
                }],
                used_a_fallback: false,
                message: String::new(),
            },
            disposable: DisposableCheck {
                is_disposable: false,
                message: String::new(),
            },
            role_based: RoleBasedCheck {
                is_role_based: false,
                role: None,
                message: String::new(),
            },
            free_provider: FreeProviderCheck {
                is_free: false,
                provider: None,
                message: String::new(),
            },
            typo: TypoCheck {
                has_typo: false,
                suggestion: None,
                suggested_email: None,
                message: String::new(),
            },
            blacklisted: BlacklistCheck {
                status: CheckStatus::Pass,
                is_blacklisted: false,
                lists: Vec::new(),
                message: String::new(),
            },
            catch_all: CatchAllCheck {
                is_catch_all: false,
                message: String::new(),
            },
        }
    }

    #[test]
    fn weights_sum_to_one_hundred() {
        let total = WEIGHT_SYNTAX
            + WEIGHT_DOMAIN
            + WEIGHT_MX
            + WEIGHT_NOT_DISPOSABLE
            + WEIGHT_NOT_ROLE_BASED
            + WEIGHT_NO_TYPO
            + WEIGHT_NOT_BLACKLISTED;
        assert_eq!(total, 100);
    }

    #[test]
    fn clean_address_is_perfect() {
        let verdict = assess(&clean_checks());
        assert_eq!(
            verdict,
            Verdict {
                is_valid: true,
                score: 100,
                risk: RiskLevel::Low,
                deliverability: Deliverability::Deliverable,
            }
        );
    }

    #[test]
    fn flipping_any_check_to_failing_never_raises_the_score() {
        let base = score(&clean_checks());
        let flips: [fn(&mut ValidationChecks); 9] = [
            |c| c.domain.valid = false,
            |c| c.mx.status = CheckStatus::Fail,
            |c| c.mx.status = CheckStatus::Inconclusive,
            |c| c.disposable.is_disposable = true,
            |c| c.role_based.is_role_based = true,
            |c| c.typo.has_typo = true,
            |c| {
                c.blacklisted.status = CheckStatus::Fail;
                c.blacklisted.is_blacklisted = true;
            },
            |c| c.catch_all.is_catch_all = true,
            |c| c.syntax.valid = false,
        ];
        for flip in flips {
            let mut checks = clean_checks();
            flip(&mut checks);
            assert!(score(&checks) <= base);
        }
    }

    #[test]
    fn inconclusive_mx_is_unknown_but_valid() {
        let mut checks = clean_checks();
        checks.mx.status = CheckStatus::Inconclusive;
        let verdict = assess(&checks);
        assert!(verdict.is_valid);
        assert_eq!(verdict.score, 75);
        assert_eq!(verdict.risk, RiskLevel::Medium);
        assert_eq!(verdict.deliverability, Deliverability::Unknown);
    }

    #[test]
    fn failed_mx_is_undeliverable() {
        let mut checks = clean_checks();
        checks.mx.status = CheckStatus::Fail;
        let verdict = assess(&checks);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.deliverability, Deliverability::Undeliverable);
    }

    #[test]
    fn disposable_blacklisted_or_catch_all_is_risky() {
        let mut disposable = clean_checks();
        disposable.disposable.is_disposable = true;
        assert_eq!(deliverability_for(&disposable), Deliverability::Risky);
        assert_eq!(score(&disposable), 85);

        let mut listed = clean_checks();
        listed.blacklisted.status = CheckStatus::Fail;
        listed.blacklisted.is_blacklisted = true;
        assert_eq!(deliverability_for(&listed), Deliverability::Risky);
        assert_eq!(score(&listed), 95);

        let mut catch_all = clean_checks();
        catch_all.catch_all.is_catch_all = true;
        assert_eq!(deliverability_for(&catch_all), Deliverability::Risky);
        assert_eq!(score(&catch_all), 100);
    }

    #[test]
    fn syntax_failure_scores_zero() {
        let checks = ValidationChecks::short_circuited(SyntaxCheck::fail("Email is required"));
        let verdict = assess(&checks);
        assert_eq!(verdict.score, 0);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.risk, RiskLevel::High);
        assert_eq!(verdict.deliverability, Deliverability::Undeliverable);
    }

    #[test]
    fn risk_thresholds() {
        assert_eq!(risk_for(100), RiskLevel::Low);
        assert_eq!(risk_for(80), RiskLevel::Low);
        assert_eq!(risk_for(79), RiskLevel::Medium);
        assert_eq!(risk_for(50), RiskLevel::Medium);
        assert_eq!(risk_for(49), RiskLevel::High);
        assert_eq!(risk_for(0), RiskLevel::High);
    }
}
