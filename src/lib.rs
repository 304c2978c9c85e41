//! # email-vet core
//!
//! Email address validation: syntax rules, DNS-over-HTTPS MX and DNSBL
//! lookups, static list heuristics (disposable, free provider, role-based,
//! typo, catch-all) and a 0-100 score with risk and deliverability labels.
//!
//! ```no_run
//! use email_vet_core::{Config, Validator};
//!
//! # async fn run() -> email_vet_core::Result<()> {
//! let validator = Validator::new(Config::default())?;
//! let result = validator.validate_email("someone@example.com").await;
//! println!("{} -> {} ({:?})", result.email, result.score, result.deliverability);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod dns;
pub mod utils;
pub mod validation;
pub mod validators;

pub use crate::core::config::{Config, ConfigBuilder};
pub use crate::core::error::{AppError, Result};
pub use crate::core::models::{
    BlacklistCheck, CatchAllCheck, CheckStatus, Deliverability, DisposableCheck, DomainCheck,
    FreeProviderCheck, MxCheck, MxRecord, ParsedEmail, RiskLevel, RoleBasedCheck, SyntaxCheck,
    TypoCheck, ValidationChecks, ValidationResult,
};
pub use crate::data::ReferenceData;
pub use crate::dns::{DnsAnswer, DnsResolve, DnsResponse, DohClient, RecordType};
pub use crate::validation::Validator;
pub use crate::validators::{normalize_email, parse_email, validate_syntax};
