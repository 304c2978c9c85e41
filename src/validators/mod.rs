//! Leaf validators. Each produces one sub-result of a validation.

pub mod blacklist;
pub mod domain;
pub mod lists;
pub mod mx;
pub mod syntax;

pub use blacklist::BlacklistChecker;
pub use domain::{check_domain_format, DomainValidator};
pub use lists::{check_catch_all, check_disposable, check_free_provider, check_role_based, check_typo};
pub use mx::MxValidator;
pub use syntax::{normalize_email, parse_email, validate_syntax};
