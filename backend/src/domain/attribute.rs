//! Domain attribute model.
//!
//! Attributes are the categorical tags products reference: colour, frame
//! shape, target audience, material, polarisation, UV grade, and brand.
//! The pair ([`AttributeKind`], [`AttributeCode`]) is the natural key used
//! for upserts; it is immutable once a row exists, while label and ordering
//! may be rewritten by the seeder or an admin.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors for attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValidationError {
    /// The kind discriminator was not one of the recognised axes.
    UnknownKind {
        /// Rejected raw value.
        raw: String,
    },
    /// The code was empty, padded, or contained characters outside
    /// lowercase ASCII, digits, and hyphens.
    MalformedCode,
    /// The label was blank once trimmed.
    EmptyLabel,
    /// The sort order was not positive.
    NonPositiveSortOrder,
}

impl fmt::Display for AttributeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { raw } => write!(f, "unknown attribute kind: {raw}"),
            Self::MalformedCode => {
                write!(f, "attribute code must be lowercase, trimmed, and non-empty")
            }
            Self::EmptyLabel => write!(f, "attribute label must not be empty"),
            Self::NonPositiveSortOrder => write!(f, "attribute sort order must be positive"),
        }
    }
}

impl std::error::Error for AttributeValidationError {}

/// Categorical axis an attribute belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Frame or lens colour.
    Color,
    /// Frame shape.
    Shape,
    /// Target audience.
    Gender,
    /// Frame material.
    Material,
    /// Lens polarisation.
    Polarized,
    /// UV protection grade.
    UvProtection,
    /// Manufacturer brand.
    Brand,
}

impl AttributeKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 7] = [
        Self::Color,
        Self::Shape,
        Self::Gender,
        Self::Material,
        Self::Polarized,
        Self::UvProtection,
        Self::Brand,
    ];

    /// Stable string form used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Shape => "shape",
            Self::Gender => "gender",
            Self::Material => "material",
            Self::Polarized => "polarized",
            Self::UvProtection => "uv_protection",
            Self::Brand => "brand",
        }
    }

    /// Parse the stable string form.
    pub fn parse(raw: &str) -> Result<Self, AttributeValidationError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| AttributeValidationError::UnknownKind {
                raw: raw.to_owned(),
            })
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable attribute identifier, unique within its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "negro")]
pub struct AttributeCode(String);

impl AttributeCode {
    /// Validate and construct a code.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AttributeValidationError> {
        let raw = raw.as_ref();
        let well_formed = !raw.is_empty()
            && raw.trim() == raw
            && raw
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !well_formed {
            return Err(AttributeValidationError::MalformedCode);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the underlying code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AttributeCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AttributeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AttributeCode> for String {
    fn from(value: AttributeCode) -> Self {
        let AttributeCode(raw) = value;
        raw
    }
}

impl TryFrom<String> for AttributeCode {
    type Error = AttributeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One categorical attribute row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainAttribute {
    kind: AttributeKind,
    code: AttributeCode,
    label: String,
    sort_order: i32,
}

impl DomainAttribute {
    /// Validate parts and assemble an attribute.
    pub fn try_new(
        kind: AttributeKind,
        code: AttributeCode,
        label: impl Into<String>,
        sort_order: i32,
    ) -> Result<Self, AttributeValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(AttributeValidationError::EmptyLabel);
        }
        if sort_order < 1 {
            return Err(AttributeValidationError::NonPositiveSortOrder);
        }
        Ok(Self {
            kind,
            code,
            label,
            sort_order,
        })
    }

    /// Categorical axis.
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Stable identifier within the kind.
    pub fn code(&self) -> &AttributeCode {
        &self.code
    }

    /// Display label.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Display ordering within the kind.
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// The upsert natural key.
    pub fn natural_key(&self) -> (AttributeKind, &str) {
        (self.kind, self.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn kinds_round_trip_their_stable_form() {
        for kind in AttributeKind::ALL {
            assert_eq!(AttributeKind::parse(kind.as_str()).expect("round trip"), kind);
        }
    }

    #[rstest]
    fn unknown_kinds_are_rejected() {
        let err = AttributeKind::parse("flavour").expect_err("unknown kind must fail");
        assert_eq!(
            err,
            AttributeValidationError::UnknownKind {
                raw: "flavour".to_owned()
            }
        );
    }

    #[rstest]
    #[case("negro")]
    #[case("cat-eye")]
    #[case("tr90")]
    fn well_formed_codes_are_accepted(#[case] raw: &str) {
        assert_eq!(AttributeCode::new(raw).expect("valid code").as_str(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("Negro")]
    #[case(" negro")]
    #[case("negro mate")]
    fn malformed_codes_are_rejected(#[case] raw: &str) {
        let err = AttributeCode::new(raw).expect_err("malformed code must fail");
        assert_eq!(err, AttributeValidationError::MalformedCode);
    }

    #[rstest]
    fn attributes_validate_label_and_order() {
        let code = AttributeCode::new("negro").expect("valid code");
        let err = DomainAttribute::try_new(AttributeKind::Color, code.clone(), "  ", 1)
            .expect_err("blank label must fail");
        assert_eq!(err, AttributeValidationError::EmptyLabel);

        let err = DomainAttribute::try_new(AttributeKind::Color, code.clone(), "Negro", 0)
            .expect_err("zero order must fail");
        assert_eq!(err, AttributeValidationError::NonPositiveSortOrder);

        let attribute = DomainAttribute::try_new(AttributeKind::Color, code, "Negro", 1)
            .expect("valid attribute");
        assert_eq!(attribute.natural_key(), (AttributeKind::Color, "negro"));
    }
}
