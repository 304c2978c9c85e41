use super::Validator;
use crate::core::error::{AppError, Result};
use crate::core::models::{Deliverability, RiskLevel, ValidationChecks, ValidationResult};
use crate::validators::{normalize_email, validate_syntax};
use chrono::Utc;
use futures::future::join_all;
use std::collections::HashMap;
use std::time::Instant;

/// Stand-in for an address whose validation task died unexpectedly.
pub(super) fn unverified_result(email: &str) -> ValidationResult {
    let syntax = validate_syntax(email);
    let syntax_valid = syntax.valid;
    let mut checks = ValidationChecks::short_circuited(syntax);
    if syntax_valid {
        checks.domain.message = "Validation did not complete".to_string();
    }
    ValidationResult {
        email: email.to_string(),
        is_valid: false,
        score: 0,
        checks,
        deliverability: if syntax_valid {
            Deliverability::Unknown
        } else {
            Deliverability::Undeliverable
        },
        risk: RiskLevel::High,
        timestamp: Utc::now(),
    }
}

impl Validator {
    /// Validates many addresses, returning results in input order.
    ///
    /// Repeated addresses (after normalization) are validated once. Work is
    /// split into batches of `batch_size`; each address takes a throttle
    /// permit before its task starts.
    pub async fn validate_bulk<S: AsRef<str>>(&self, emails: &[S]) -> Result<Vec<ValidationResult>> {
        self.validate_bulk_with_progress(emails, |_, _| {}).await
    }

    /// Like [`Validator::validate_bulk`], reporting `(completed, total)`
    /// unique addresses after every batch.
    pub async fn validate_bulk_with_progress<S, F>(&self, emails: &[S], progress: F) -> Result<Vec<ValidationResult>>
    where
        S: AsRef<str>,
        F: Fn(usize, usize),
    {
        let config = self.config();
        if emails.len() > config.max_bulk_emails {
            return Err(AppError::BulkLimitExceeded {
                count: emails.len(),
                max: config.max_bulk_emails,
            });
        }

        let mut unique: Vec<String> = Vec::new();
        let mut index_of: HashMap<String, usize> = HashMap::new();
        let positions: Vec<usize> = emails
            .iter()
            .map(|email| {
                let email = email.as_ref();
                *index_of.entry(normalize_email(email)).or_insert_with(|| {
                    unique.push(email.to_string());
                    unique.len() - 1
                })
            })
            .collect();

        let start = Instant::now();
        let total = unique.len();
        tracing::info!(target: "bulk", "Validating {} emails ({} unique) in batches of {}",
            emails.len(), total, config.batch_size);

        let mut unique_results: Vec<ValidationResult> = Vec::with_capacity(total);
        for (batch_no, batch) in unique.chunks(config.batch_size.max(1)).enumerate() {
            let mut handles = Vec::with_capacity(batch.len());
            for email in batch {
                self.inner.throttle.acquire().await;
                let validator = self.clone();
                let email = email.clone();
                handles.push(tokio::spawn(async move { validator.validate_email(&email).await }));
            }

            for (email, joined) in batch.iter().zip(join_all(handles).await) {
                match joined {
                    Ok(result) => unique_results.push(result),
                    Err(e) => {
                        tracing::error!(target: "bulk", "Validation task for {} failed: {}", email, e);
                        unique_results.push(unverified_result(email));
                    }
                }
            }

            tracing::debug!(target: "bulk", "Batch {} done ({}/{})", batch_no + 1, unique_results.len(), total);
            progress(unique_results.len(), total);
        }

        tracing::info!(target: "bulk", "Bulk validation of {} emails finished in {:.2?}", emails.len(), start.elapsed());

        Ok(emails
            .iter()
            .zip(positions)
            .map(|(email, idx)| ValidationResult {
                email: email.as_ref().to_string(),
                ..unique_results[idx].clone()
            })
            .collect())
    }
}
