//! Domain attribute seeding service.
//!
//! Brings the attribute table into agreement with the fixed reference list
//! shipped in the `attribute-catalog` crate. Safe to run repeatedly against
//! a live database: every record is an upsert on (`kind`, `code`), rows not
//! in the list are never touched, and running the seeder twice produces the
//! same table as running it once.

use std::sync::Arc;

use attribute_catalog::{CatalogValidationError, SeedAttribute, validate_reference_list};
use thiserror::Error;
use tracing::{debug, info};

use super::attribute::{AttributeCode, AttributeKind, AttributeValidationError, DomainAttribute};
use super::ports::{AttributePersistenceError, AttributeRepository};

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// The reference list itself is malformed; nothing was written.
    #[error("attribute reference list is invalid: {0}")]
    InvalidCatalog(#[from] CatalogValidationError),
    /// A record failed domain validation; nothing past it was written.
    #[error("record {kind}/{code} is invalid: {source}")]
    InvalidRecord {
        /// Kind of the rejected record.
        kind: String,
        /// Code of the rejected record.
        code: String,
        /// Underlying validation failure.
        #[source]
        source: AttributeValidationError,
    },
    /// An upsert failed; records applied before it stay applied.
    #[error("seeding aborted after {applied} of {total} records: {source}")]
    Aborted {
        /// Records already upserted when the failure hit.
        applied: usize,
        /// Records in the reference list.
        total: usize,
        /// Underlying persistence failure.
        #[source]
        source: AttributePersistenceError,
    },
}

/// Summary of a completed seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Records upserted.
    pub applied: usize,
    /// Records in the reference list.
    pub total: usize,
}

/// Sequential upsert-based seeder over an [`AttributeRepository`].
pub struct DomainSeeder {
    repository: Arc<dyn AttributeRepository>,
}

impl DomainSeeder {
    /// Create a seeder writing through the given repository.
    pub fn new(repository: Arc<dyn AttributeRepository>) -> Self {
        Self { repository }
    }

    /// Upsert every record of `records`, strictly in list order.
    ///
    /// The run is not wrapped in a transaction: a failure aborts the run and
    /// leaves records applied so far in place. Re-running after a fix
    /// converges on the same final state because every write is a
    /// natural-key upsert.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::InvalidCatalog`] or
    /// [`SeedingError::InvalidRecord`] before any write, and
    /// [`SeedingError::Aborted`] when an upsert fails mid-run.
    pub async fn seed(&self, records: &[SeedAttribute]) -> Result<SeedReport, SeedingError> {
        validate_reference_list(records)?;

        let total = records.len();
        let mut applied = 0_usize;
        for record in records {
            let attribute = map_record(record)?;
            debug!(
                kind = %attribute.kind(),
                code = %attribute.code(),
                "upserting attribute"
            );
            self.repository
                .upsert(&attribute)
                .await
                .map_err(|source| SeedingError::Aborted {
                    applied,
                    total,
                    source,
                })?;
            applied += 1;
        }

        info!(applied, total, "attribute seeding complete");
        Ok(SeedReport { applied, total })
    }
}

fn map_record(record: &SeedAttribute) -> Result<DomainAttribute, SeedingError> {
    let invalid = |source| SeedingError::InvalidRecord {
        kind: record.kind.to_owned(),
        code: record.code.to_owned(),
        source,
    };
    let kind = AttributeKind::parse(record.kind).map_err(invalid)?;
    let code = AttributeCode::new(record.code).map_err(invalid)?;
    DomainAttribute::try_new(kind, code, record.label, record.sort_order).map_err(invalid)
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage: idempotence, update-in-place, abort-on-failure.
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;

    type StoredRow = (String, i32);
    type NaturalKey = (AttributeKind, String);

    /// In-memory natural-key upsert store, optionally failing on the Nth
    /// upsert call.
    #[derive(Default)]
    struct StubAttributeRepository {
        rows: Mutex<BTreeMap<NaturalKey, StoredRow>>,
        fail_on_call: Option<usize>,
        calls: Mutex<usize>,
    }

    impl StubAttributeRepository {
        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::default()
            }
        }

        fn insert_row(&self, kind: AttributeKind, code: &str, label: &str, sort_order: i32) {
            self.rows
                .lock()
                .expect("rows lock")
                .insert((kind, code.to_owned()), (label.to_owned(), sort_order));
        }

        fn snapshot(&self) -> BTreeMap<NaturalKey, StoredRow> {
            self.rows.lock().expect("rows lock").clone()
        }
    }

    #[async_trait]
    impl AttributeRepository for StubAttributeRepository {
        async fn upsert(
            &self,
            attribute: &DomainAttribute,
        ) -> Result<(), AttributePersistenceError> {
            let mut calls = self.calls.lock().expect("calls lock");
            *calls += 1;
            if self.fail_on_call == Some(*calls) {
                return Err(AttributePersistenceError::query("forced failure"));
            }
            drop(calls);

            self.rows.lock().expect("rows lock").insert(
                (attribute.kind(), attribute.code().as_str().to_owned()),
                (attribute.label().to_owned(), attribute.sort_order()),
            );
            Ok(())
        }

        async fn list(
            &self,
            kind: Option<AttributeKind>,
        ) -> Result<Vec<DomainAttribute>, AttributePersistenceError> {
            let rows = self.rows.lock().expect("rows lock");
            let mut attributes = Vec::new();
            for ((row_kind, code), (label, sort_order)) in rows.iter() {
                if kind.is_some_and(|wanted| wanted != *row_kind) {
                    continue;
                }
                let code = AttributeCode::new(code)
                    .map_err(|err| AttributePersistenceError::query(err.to_string()))?;
                let attribute = DomainAttribute::try_new(*row_kind, code, label, *sort_order)
                    .map_err(|err| AttributePersistenceError::query(err.to_string()))?;
                attributes.push(attribute);
            }
            Ok(attributes)
        }
    }

    fn record(
        kind: &'static str,
        code: &'static str,
        label: &'static str,
        sort_order: i32,
    ) -> SeedAttribute {
        SeedAttribute {
            kind,
            code,
            label,
            sort_order,
        }
    }

    #[tokio::test]
    async fn seeding_twice_equals_seeding_once() {
        let repository = Arc::new(StubAttributeRepository::default());
        let seeder = DomainSeeder::new(repository.clone());
        let records = [
            record("color", "negro", "Negro", 1),
            record("brand", "vulk", "Vulk", 1),
        ];

        let first = seeder.seed(&records).await.expect("first run succeeds");
        let after_first = repository.snapshot();
        let second = seeder.seed(&records).await.expect("second run succeeds");

        assert_eq!(first, SeedReport { applied: 2, total: 2 });
        assert_eq!(second, SeedReport { applied: 2, total: 2 });
        assert_eq!(repository.snapshot(), after_first);
        assert_eq!(after_first.len(), 2);
    }

    #[tokio::test]
    async fn reseeding_updates_label_and_order_in_place() {
        let repository = Arc::new(StubAttributeRepository::default());
        let seeder = DomainSeeder::new(repository.clone());

        seeder
            .seed(&[record("color", "negro", "Negro", 1)])
            .await
            .expect("initial seed succeeds");
        seeder
            .seed(&[record("color", "negro", "Black", 2)])
            .await
            .expect("reseed succeeds");

        let rows = repository.snapshot();
        assert_eq!(rows.len(), 1, "no duplicate row may appear");
        assert_eq!(
            rows.get(&(AttributeKind::Color, "negro".to_owned())),
            Some(&("Black".to_owned(), 2))
        );
    }

    #[tokio::test]
    async fn rows_outside_the_reference_list_are_left_untouched() {
        let repository = Arc::new(StubAttributeRepository::default());
        repository.insert_row(AttributeKind::Color, "fucsia", "Fucsia", 40);
        let seeder = DomainSeeder::new(repository.clone());

        seeder
            .seed(&[record("color", "negro", "Negro", 1)])
            .await
            .expect("seed succeeds");

        let rows = repository.snapshot();
        assert_eq!(
            rows.get(&(AttributeKind::Color, "fucsia".to_owned())),
            Some(&("Fucsia".to_owned(), 40)),
            "the seeder must never delete or rewrite unrelated rows"
        );
    }

    #[tokio::test]
    async fn upsert_failure_aborts_and_keeps_earlier_records() {
        let repository = Arc::new(StubAttributeRepository::failing_on(2));
        let seeder = DomainSeeder::new(repository.clone());
        let records = [
            record("color", "negro", "Negro", 1),
            record("color", "azul", "Azul", 2),
            record("color", "rojo", "Rojo", 3),
        ];

        let err = seeder.seed(&records).await.expect_err("run must abort");
        match err {
            SeedingError::Aborted { applied, total, .. } => {
                assert_eq!(applied, 1);
                assert_eq!(total, 3);
            }
            other => panic!("unexpected error: {other}"),
        }

        let rows = repository.snapshot();
        assert_eq!(rows.len(), 1, "records past the failure must not apply");
        assert!(rows.contains_key(&(AttributeKind::Color, "negro".to_owned())));
    }

    #[tokio::test]
    async fn duplicate_reference_records_are_rejected_before_any_write() {
        let repository = Arc::new(StubAttributeRepository::default());
        let seeder = DomainSeeder::new(repository.clone());
        let records = [
            record("color", "negro", "Negro", 1),
            record("color", "negro", "Negro bis", 2),
        ];

        let err = seeder.seed(&records).await.expect_err("duplicates must fail");
        assert!(matches!(err, SeedingError::InvalidCatalog(_)));
        assert!(repository.snapshot().is_empty());
    }

    #[tokio::test]
    async fn unknown_kinds_are_rejected() {
        let repository = Arc::new(StubAttributeRepository::default());
        let seeder = DomainSeeder::new(repository.clone());

        let err = seeder
            .seed(&[record("flavour", "menta", "Menta", 1)])
            .await
            .expect_err("unknown kind must fail");
        assert!(matches!(err, SeedingError::InvalidRecord { .. }));
        assert!(repository.snapshot().is_empty());
    }

    #[tokio::test]
    async fn shipped_catalog_seeds_cleanly() {
        let repository = Arc::new(StubAttributeRepository::default());
        let seeder = DomainSeeder::new(repository.clone());
        let records = attribute_catalog::reference_attributes();

        let report = seeder.seed(records).await.expect("catalog seeds");
        assert_eq!(report.applied, records.len());
        assert_eq!(repository.snapshot().len(), records.len());
    }
}
