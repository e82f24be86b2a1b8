//! Blog post entity and its creation draft.

use serde::Serialize;
use utoipa::ToSchema;

/// Identifier assigned to a post by the store on creation.
///
/// Identifiers are unique, monotonically increasing, and never change for
/// the lifetime of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostId(i32);

impl PostId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value as stored in the database.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted blog post.
///
/// Serialises as `{"id": 1, "title": "...", "body": "..."}`, the shape every
/// read endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Post {
    /// Store-assigned identifier.
    #[schema(value_type = i32, example = 1)]
    pub id: PostId,
    /// Post title. May be empty; the schema only requires a string.
    pub title: String,
    /// Post body. Same constraint as the title.
    pub body: String,
}

/// Validated draft for a post that has not been persisted yet.
///
/// Only constructed after body validation succeeds, so no partial post ever
/// reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Title of the post to create.
    pub title: String,
    /// Body of the post to create.
    pub body: String,
}
