//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; when a migration changes the schema, regenerate or update
//! this file to match (`diesel print-schema`).

diesel::table! {
    /// Categorical attribute rows keyed by the (`kind`, `code`) natural key.
    domain_attributes (kind, code) {
        /// Categorical axis discriminator.
        kind -> Varchar,
        /// Stable identifier, unique within `kind`.
        code -> Varchar,
        /// Display label.
        label -> Varchar,
        /// Display ordering within `kind`.
        sort_order -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User accounts, including credential hashes.
    users (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Canonical (lowercased) email; unique.
        email -> Varchar,
        /// Access role: `admin` or `customer`.
        role -> Varchar,
        /// Argon2 PHC-string hash.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Storefront product categories.
    categories (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// URL-stable identifier; unique.
        slug -> Varchar,
        /// Hero image URL.
        image_url -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sellable products.
    products (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// URL-stable identifier; unique.
        slug -> Varchar,
        /// Marketing copy.
        description -> Text,
        /// Unit price in cents.
        price_cents -> Int8,
        /// Owning category.
        category_id -> Uuid,
        /// Brand attribute code, when tagged.
        brand_code -> Nullable<Varchar>,
        /// Colour attribute code, when tagged.
        color_code -> Nullable<Varchar>,
        /// Shape attribute code, when tagged.
        shape_code -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Customer orders.
    orders (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Purchasing customer.
        user_id -> Uuid,
        /// Lifecycle state: pending, paid, shipped, cancelled.
        status -> Varchar,
        /// Sum of line totals in cents.
        total_cents -> Int8,
        /// Placement timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Order lines, priced at purchase time.
    order_items (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Owning order.
        order_id -> Uuid,
        /// Purchased product.
        product_id -> Uuid,
        /// Units purchased.
        quantity -> Int4,
        /// Unit price captured at purchase time.
        unit_price_cents -> Int8,
    }
}

diesel::joinable!(products -> categories (category_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> products (product_id));
diesel::joinable!(orders -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    domain_attributes,
    users,
    categories,
    products,
    orders,
    order_items,
);
