//! Cross-cutting request guards composed around handlers.

pub mod negotiation;

pub use negotiation::{AcceptJson, RequireJsonBody};
