//! Blogful: a minimal blog-post CRUD API.
//!
//! The crate is a small hexagon: [`domain`] holds the `Post` entity and the
//! persistence port, [`inbound`] the HTTP adapter, [`outbound`] the Diesel
//! PostgreSQL adapter, [`middleware`] the content-negotiation guards, and
//! [`server`] configuration and application wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
