//! Static integrity checks over the reference list.

use std::collections::HashSet;

use thiserror::Error;

use crate::records::SeedAttribute;

/// Violations detected while validating a reference list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogValidationError {
    /// Two records share the same (`kind`, `code`) pair.
    #[error("duplicate attribute key {kind}/{code}")]
    DuplicateKey {
        /// Offending kind.
        kind: String,
        /// Offending code.
        code: String,
    },
    /// A record carries an empty or padded code.
    #[error("attribute code for kind {kind} must be lowercase, trimmed, and non-empty")]
    MalformedCode {
        /// Kind of the offending record.
        kind: String,
    },
    /// A record carries an empty label.
    #[error("attribute {kind}/{code} has an empty label")]
    EmptyLabel {
        /// Kind of the offending record.
        kind: String,
        /// Code of the offending record.
        code: String,
    },
    /// A record carries a non-positive sort order.
    #[error("attribute {kind}/{code} has non-positive sort order {sort_order}")]
    NonPositiveSortOrder {
        /// Kind of the offending record.
        kind: String,
        /// Code of the offending record.
        code: String,
        /// Rejected ordering value.
        sort_order: i32,
    },
}

fn code_is_well_formed(code: &str) -> bool {
    !code.is_empty()
        && code.trim() == code
        && code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validate a reference list before it is handed to the seeder.
///
/// The pair (`kind`, `code`) is the upsert natural key, so duplicates here
/// would make the seeding result order-dependent; they are rejected outright.
///
/// # Errors
///
/// Returns the first violation found, in list order.
pub fn validate_reference_list(
    records: &[SeedAttribute],
) -> Result<(), CatalogValidationError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !code_is_well_formed(record.code) {
            return Err(CatalogValidationError::MalformedCode {
                kind: record.kind.to_owned(),
            });
        }
        if record.label.trim().is_empty() {
            return Err(CatalogValidationError::EmptyLabel {
                kind: record.kind.to_owned(),
                code: record.code.to_owned(),
            });
        }
        if record.sort_order < 1 {
            return Err(CatalogValidationError::NonPositiveSortOrder {
                kind: record.kind.to_owned(),
                code: record.code.to_owned(),
                sort_order: record.sort_order,
            });
        }
        if !seen.insert((record.kind, record.code)) {
            return Err(CatalogValidationError::DuplicateKey {
                kind: record.kind.to_owned(),
                code: record.code.to_owned(),
            });
        }
    }
    Ok(())
}
