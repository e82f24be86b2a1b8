//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Concrete implementation of the post repository port, backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` connection pooling. Row structs and schema definitions are
//! internal implementation details, never exposed to the domain.

mod diesel_post_repository;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use pool::{DbPool, PoolError};
