//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! The only port here is post persistence; it exposes strongly typed errors
//! so adapters map their failures into predictable variants instead of
//! returning `anyhow::Result`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Error, NewPost, Post, PostId};

/// Errors raised by post repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostRepositoryError {
    /// Repository connection could not be established.
    #[error("post repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied connection failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("post repository query failed: {message}")]
    Query {
        /// Adapter-supplied query failure description.
        message: String,
    },
}

impl PostRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<PostRepositoryError> for Error {
    fn from(err: PostRepositoryError) -> Self {
        Self::internal(err.to_string())
    }
}

/// Optional substring filters applied by [`PostRepository::list`].
///
/// Both needles present means both must match (logical AND); an absent
/// needle matches every post. Containment is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Substring the title must contain.
    pub title_like: Option<String>,
    /// Substring the body must contain.
    pub body_like: Option<String>,
}

impl PostFilter {
    /// Filter matching every post.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            title_like: None,
            body_like: None,
        }
    }

    /// True when `post` satisfies both containment predicates.
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        let title_ok = self
            .title_like
            .as_deref()
            .is_none_or(|needle| post.title.contains(needle));
        let body_ok = self
            .body_like
            .as_deref()
            .is_none_or(|needle| post.body.contains(needle));
        title_ok && body_ok
    }
}

/// Port for blog post persistence.
///
/// Implementations must assign identifiers monotonically so that listing in
/// ascending id order reproduces creation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it with its assigned id.
    ///
    /// The record must be durably committed before this returns, so a
    /// subsequent read by another request observes it.
    async fn create(&self, draft: &NewPost) -> Result<Post, PostRepositoryError>;

    /// Point lookup by id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// List posts matching `filter`, ordered by ascending id.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, PostRepositoryError>;

    /// Delete a post, returning whether a record was removed.
    ///
    /// Deleting an absent id returns `Ok(false)`; callers surface that as
    /// not-found. Deleting the same id twice returns `false` the second time.
    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError>;
}

/// In-memory [`PostRepository`] used by the test suites.
///
/// Mirrors the store contract: ids start at 1 and increase monotonically,
/// and listing preserves creation order.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i32,
    posts: Vec<Post>,
}

impl InMemoryPostRepository {
    fn lock_state(&self) -> Result<MutexGuard<'_, InMemoryState>, PostRepositoryError> {
        self.state
            .lock()
            .map_err(|_| PostRepositoryError::query("in-memory state poisoned"))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, draft: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut state = self.lock_state()?;
        state.next_id += 1;
        let post = Post {
            id: PostId::new(state.next_id),
            title: draft.title.clone(),
            body: draft.body.clone(),
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let state = self.lock_state()?;
        Ok(state.posts.iter().find(|post| post.id == id).cloned())
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, PostRepositoryError> {
        let state = self.lock_state()?;
        Ok(state
            .posts
            .iter()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut state = self.lock_state()?;
        let before = state.posts.len();
        state.posts.retain(|post| post.id != id);
        Ok(state.posts.len() < before)
    }
}
