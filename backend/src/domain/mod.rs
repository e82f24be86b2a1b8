//! Domain types for the blog post service.
//!
//! Everything here is transport and storage agnostic: the [`Post`] entity,
//! the persistence port in [`ports`], and the [`Error`] type adapters map
//! onto their own envelopes.

mod error;
mod post;
pub mod ports;

pub use error::{Error, ErrorCode};
pub use post::{NewPost, Post, PostId};
