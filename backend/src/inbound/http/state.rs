//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::PostRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Post persistence port.
    pub posts: Arc<dyn PostRepository>,
}

impl HttpState {
    /// Construct state over a post repository implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use blogful::domain::ports::InMemoryPostRepository;
    /// use blogful::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryPostRepository::default()));
    /// let _posts = state.posts.clone();
    /// ```
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
