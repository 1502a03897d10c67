//! Storefront catalog read models and pagination primitives.
//!
//! Categories and products are read-mostly: the storefront lists and
//! filters them, the back-office maintains them out of band. They carry no
//! invariants beyond what the database schema enforces, so they are plain
//! data carriers rather than validated newtypes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product category shown in storefront navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-stable identifier.
    pub slug: String,
    /// Hero image shown on category tiles.
    pub image_url: String,
}

/// One sellable product.
///
/// Attribute references (`brand_code`, `color_code`, `shape_code`) point at
/// domain attribute rows by code within their respective kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-stable identifier.
    pub slug: String,
    /// Marketing copy.
    pub description: String,
    /// Unit price in cents, avoiding floating point money.
    pub price_cents: i64,
    /// Owning category.
    pub category_id: Uuid,
    /// Brand attribute code, when tagged.
    pub brand_code: Option<String>,
    /// Colour attribute code, when tagged.
    pub color_code: Option<String>,
    /// Shape attribute code, when tagged.
    pub shape_code: Option<String>,
}

/// Storefront product listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Restrict to one category by slug.
    pub category_slug: Option<String>,
}

/// Highest `per_page` value a caller may request.
pub const PER_PAGE_MAX: u32 = 100;

/// Default `per_page` value when the caller does not specify one.
pub const PER_PAGE_DEFAULT: u32 = 20;

/// Validated, clamped pagination window.
///
/// ## Invariants
/// - `page` ≥ 1.
/// - 1 ≤ `per_page` ≤ [`PER_PAGE_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, PER_PAGE_DEFAULT)
    }
}

impl PageRequest {
    /// Build a window, clamping out-of-range values instead of failing.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, PER_PAGE_MAX),
        }
    }

    /// 1-based page number.
    pub fn page(self) -> u32 {
        self.page
    }

    /// Window size.
    pub fn per_page(self) -> u32 {
        self.per_page
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    /// Row limit for SQL `LIMIT`.
    pub fn limit(self) -> i64 {
        i64::from(self.per_page)
    }
}

/// One page of results plus the window that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows in this window.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    /// Window size.
    pub per_page: u32,
    /// Total matching rows across all pages.
    pub total: i64,
}

impl<T> Page<T> {
    /// Assemble a page from its window and total count.
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page(),
            per_page: request.per_page(),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0, 1, 1)]
    #[case(1, 20, 1, 20)]
    #[case(3, 500, 3, PER_PAGE_MAX)]
    fn windows_are_clamped(
        #[case] page: u32,
        #[case] per_page: u32,
        #[case] expected_page: u32,
        #[case] expected_per_page: u32,
    ) {
        let request = PageRequest::new(page, per_page);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.per_page(), expected_per_page);
    }

    #[rstest]
    #[case(1, 20, 0)]
    #[case(2, 20, 20)]
    #[case(5, 10, 40)]
    fn offsets_follow_the_window(#[case] page: u32, #[case] per_page: u32, #[case] offset: i64) {
        assert_eq!(PageRequest::new(page, per_page).offset(), offset);
    }

    #[rstest]
    fn page_envelope_carries_the_window() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(2, 3), 11);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 3);
        assert_eq!(page.total, 11);
        assert_eq!(page.items, vec![1, 2, 3]);
    }
}
