//! Static attribute records.
//!
//! Labels are the retailer's display strings (Spanish). Codes are stable,
//! lowercase identifiers referenced by product rows; changing a code is a
//! breaking change for any product that points at it, so codes stay fixed
//! while labels and ordering may evolve.

/// One attribute record in the reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAttribute {
    /// Categorical axis the attribute belongs to (e.g. `color`, `brand`).
    pub kind: &'static str,
    /// Stable identifier, unique within `kind`.
    pub code: &'static str,
    /// Human-readable display label.
    pub label: &'static str,
    /// Display ordering within `kind`; lower sorts first.
    pub sort_order: i32,
}

const fn attr(
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

/// Kinds the backend recognises, in display order.
pub const KINDS: &[&str] = &[
    "color",
    "shape",
    "gender",
    "material",
    "polarized",
    "uv_protection",
    "brand",
];

static REFERENCE_ATTRIBUTES: &[SeedAttribute] = &[
    // Colours
    attr("color", "negro", "Negro", 1),
    attr("color", "marron", "Marrón", 2),
    attr("color", "azul", "Azul", 3),
    attr("color", "rojo", "Rojo", 4),
    attr("color", "verde", "Verde", 5),
    attr("color", "gris", "Gris", 6),
    attr("color", "dorado", "Dorado", 7),
    attr("color", "plateado", "Plateado", 8),
    attr("color", "transparente", "Transparente", 9),
    // Frame shapes
    attr("shape", "cuadrado", "Cuadrado", 1),
    attr("shape", "rectangular", "Rectangular", 2),
    attr("shape", "redondo", "Redondo", 3),
    attr("shape", "aviador", "Aviador", 4),
    attr("shape", "cat-eye", "Cat Eye", 5),
    attr("shape", "hexagonal", "Hexagonal", 6),
    attr("shape", "mariposa", "Mariposa", 7),
    // Target audience
    attr("gender", "hombre", "Hombre", 1),
    attr("gender", "mujer", "Mujer", 2),
    attr("gender", "unisex", "Unisex", 3),
    attr("gender", "nino", "Niño", 4),
    // Frame materials
    attr("material", "acetato", "Acetato", 1),
    attr("material", "metal", "Metal", 2),
    attr("material", "titanio", "Titanio", 3),
    attr("material", "tr90", "TR-90", 4),
    attr("material", "madera", "Madera", 5),
    // Lens polarisation
    attr("polarized", "polarizado", "Polarizado", 1),
    attr("polarized", "no-polarizado", "No polarizado", 2),
    // UV protection grades
    attr("uv_protection", "uv400", "UV400", 1),
    attr("uv_protection", "uv380", "UV380", 2),
    attr("uv_protection", "sin-uv", "Sin protección UV", 3),
    // Brands
    attr("brand", "vulk", "Vulk", 1),
    attr("brand", "rusty", "Rusty", 2),
    attr("brand", "ray-ban", "Ray-Ban", 3),
    attr("brand", "oakley", "Oakley", 4),
    attr("brand", "vogue", "Vogue", 5),
    attr("brand", "arnette", "Arnette", 6),
    attr("brand", "polaroid", "Polaroid", 7),
];

/// Return the canonical attribute reference list, in seeding order.
#[must_use]
pub fn reference_attributes() -> &'static [SeedAttribute] {
    REFERENCE_ATTRIBUTES
}
