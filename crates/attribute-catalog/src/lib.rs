//! Fixed reference list of eyewear domain attributes.
//!
//! The storefront classifies frames and lenses along a small set of
//! categorical axes (colour, shape, gender, material, polarisation, UV
//! protection, brand). This crate holds the canonical list of those
//! attributes as static data, independent of backend domain types to avoid
//! circular dependencies. The backend seeder maps each record into its own
//! domain model before persisting it.
//!
//! Records are identified by the pair (`kind`, `code`); the list is expected
//! to contain no duplicate pairs and [`validate_reference_list`] enforces
//! that expectation in tests and at seeding time.
//!
//! # Example
//!
//! ```
//! use attribute_catalog::{reference_attributes, validate_reference_list};
//!
//! validate_reference_list(reference_attributes()).expect("catalog is well formed");
//! assert!(reference_attributes().iter().any(|a| a.code == "negro"));
//! ```

mod records;
mod validation;

pub use records::{KINDS, SeedAttribute, reference_attributes};
pub use validation::{CatalogValidationError, validate_reference_list};
