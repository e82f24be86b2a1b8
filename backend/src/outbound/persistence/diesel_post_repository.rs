//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! A thin adapter: it only translates between Diesel rows and domain types
//! and maps database failures into the port's error variants. Each mutation
//! is a single auto-committed statement, so a create or delete is durable
//! before the handler responds.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PostFilter, PostRepository, PostRepositoryError};
use crate::domain::{NewPost, Post, PostId};

use super::models::{NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to the port's connection error.
fn map_pool_error(error: PoolError) -> PostRepositoryError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            PostRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to the port's error variants.
fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PostRepositoryError::connection("database connection error")
        }
        _ => PostRepositoryError::query("database error"),
    }
}

/// Wrap `needle` in `%` wildcards, escaping LIKE metacharacters so the
/// match is literal substring containment.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, draft: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: PostRow = diesel::insert_into(posts::table)
            .values(NewPostRow {
                title: &draft.title,
                body: &draft.body,
            })
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = posts::table
            .find(id.value())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Post::from))
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = posts::table.select(PostRow::as_select()).into_boxed();
        if let Some(needle) = filter.title_like.as_deref() {
            query = query.filter(posts::title.like(contains_pattern(needle)));
        }
        if let Some(needle) = filter.body_like.as_deref() {
            query = query.filter(posts::body.like(contains_pattern(needle)));
        }

        let rows: Vec<PostRow> = query
            .order(posts::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(posts::table.find(id.value()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
