//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Blog posts table.
    ///
    /// `id` is a `SERIAL` primary key, so ascending id reproduces creation
    /// order.
    posts (id) {
        /// Primary key assigned by the database sequence.
        id -> Int4,
        /// Post title.
        title -> Text,
        /// Post body.
        body -> Text,
    }
}
