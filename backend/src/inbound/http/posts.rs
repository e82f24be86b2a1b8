//! Blog post API handlers.
//!
//! ```text
//! GET    /api/posts[?title_like=&body_like=]
//! GET    /api/posts/{id}
//! POST   /api/posts
//! DELETE /api/post/{id}
//! ```
//!
//! The delete route keeps its singular `post` path segment for wire
//! compatibility with existing clients.

use actix_web::{HttpResponse, delete, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::PostFilter;
use crate::domain::{Error, Post, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::validate_new_post;

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListPostsQuery {
    /// Substring the title must contain (case-sensitive).
    pub title_like: Option<String>,
    /// Substring the body must contain (case-sensitive).
    pub body_like: Option<String>,
}

/// Message-only response body used by delete confirmations and errors.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageBody {
    /// Human-readable outcome description.
    pub message: String,
}

fn not_found(id: PostId) -> Error {
    Error::not_found(format!("Could not find post with id {id}"))
}

/// List posts, optionally narrowed by title/body substring filters.
///
/// Results come back in creation order (ascending id); an empty array when
/// nothing matches.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Matching posts in creation order", body = [Post]),
        (status = 406, description = "Client does not accept JSON", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    query: web::Query<ListPostsQuery>,
) -> ApiResult<web::Json<Vec<Post>>> {
    let query = query.into_inner();
    let filter = PostFilter {
        title_like: query.title_like,
        body_like: query.body_like,
    };
    let posts = state.posts.list(&filter).await?;
    Ok(web::Json(posts))
}

/// Fetch a single post by id.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 404, description = "No post with this id", body = Error),
        (status = 406, description = "Client does not accept JSON", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Post>> {
    let id = PostId::new(path.into_inner());
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(web::Json(post))
}

/// Create a post from a JSON body with required string `title` and `body`.
///
/// The body is validated before any store access; no partial post is ever
/// persisted. The response carries a `Location` header pointing at the
/// created resource.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body(content = serde_json::Value, description = "Object with required string properties `title` and `body`"),
    responses(
        (status = 201, description = "Created post", body = Post,
            headers(("Location" = String, description = "Path of the created post"))),
        (status = 406, description = "Client does not accept JSON", body = Error),
        (status = 415, description = "Body is not declared as JSON", body = Error),
        (status = 422, description = "Body fails schema validation", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<serde_json::Value>,
) -> ApiResult<HttpResponse> {
    let draft = validate_new_post(&payload)?;
    let post = state.posts.create(&draft).await?;
    let location = format!("/api/posts/{}", post.id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(post))
}

/// Delete a single post by id.
#[utoipa::path(
    delete,
    path = "/api/post/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Deletion confirmation", body = MessageBody),
        (status = 404, description = "No post with this id", body = Error),
        (status = 406, description = "Client does not accept JSON", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/post/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = PostId::new(path.into_inner());
    if !state.posts.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(web::Json(MessageBody {
        message: format!("Deleted post with id {id} from the database"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{
        InMemoryPostRepository, MockPostRepository, PostRepository, PostRepositoryError,
    };

    fn test_app(
        repo: Arc<dyn PostRepository>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::new(repo)))
            .service(
                web::scope("/api")
                    .service(list_posts)
                    .service(get_post)
                    .service(create_post)
                    .service(delete_post),
            )
    }

    async fn create_example(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        title: &str,
        body: &str,
    ) -> Value {
        let req = actix_test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"title": title, "body": body}))
            .to_request();
        let res = actix_test::call_service(app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        actix_test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn create_returns_entity_and_location() {
        let app =
            actix_test::init_service(test_app(Arc::new(InMemoryPostRepository::default()))).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"title": "Example Post", "body": "Just a test"}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/api/posts/1")
        );
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({"id": 1, "title": "Example Post", "body": "Just a test"})
        );
    }

    #[actix_web::test]
    async fn create_rejects_invalid_body_with_single_violation() {
        let app =
            actix_test::init_service(test_app(Arc::new(InMemoryPostRepository::default()))).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"title": "Example Post", "body": 32}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("32 is not of type 'string'")
        );
    }

    #[actix_web::test]
    async fn get_returns_persisted_post() {
        let app =
            actix_test::init_service(test_app(Arc::new(InMemoryPostRepository::default()))).await;
        create_example(&app, "Example Post A", "Just a test").await;
        create_example(&app, "Example Post B", "Another test").await;

        let req = actix_test::TestRequest::get()
            .uri("/api/posts/2")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({"id": 2, "title": "Example Post B", "body": "Another test"})
        );
    }

    #[actix_web::test]
    async fn get_missing_post_reports_not_found() {
        let app =
            actix_test::init_service(test_app(Arc::new(InMemoryPostRepository::default()))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/posts/1")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Could not find post with id 1")
        );
    }

    #[actix_web::test]
    async fn delete_confirms_then_reports_missing() {
        let app =
            actix_test::init_service(test_app(Arc::new(InMemoryPostRepository::default()))).await;
        create_example(&app, "Example Post", "Just a test").await;

        let req = actix_test::TestRequest::delete()
            .uri("/api/post/1")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Deleted post with id 1 from the database")
        );

        let req = actix_test::TestRequest::delete()
            .uri("/api/post/1")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Could not find post with id 1")
        );
    }

    #[rstest]
    #[case(None, None, vec![1, 2, 3])]
    #[case(Some("title_like=whistles"), None, vec![2, 3])]
    #[case(Some("title_like=bells"), Some("body_like=test"), vec![1])]
    #[actix_web::test]
    async fn list_filters_compose_as_intersection(
        #[case] title_param: Option<&str>,
        #[case] body_param: Option<&str>,
        #[case] expected_ids: Vec<i64>,
    ) {
        let app =
            actix_test::init_service(test_app(Arc::new(InMemoryPostRepository::default()))).await;
        create_example(&app, "Post with bells", "Just a test").await;
        create_example(&app, "Post with whistles", "Still a test").await;
        create_example(&app, "Post with bells and whistles", "Done").await;

        let query: Vec<&str> = [title_param, body_param].into_iter().flatten().collect();
        let uri = if query.is_empty() {
            "/api/posts".to_owned()
        } else {
            format!("/api/posts?{}", query.join("&"))
        };
        let req = actix_test::TestRequest::get().uri(&uri).to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let ids: Vec<i64> = body
            .as_array()
            .expect("array body")
            .iter()
            .filter_map(|post| post.get("id").and_then(Value::as_i64))
            .collect();
        assert_eq!(ids, expected_ids);
    }

    #[actix_web::test]
    async fn repository_failure_surfaces_as_redacted_internal_error() {
        let mut repo = MockPostRepository::new();
        repo.expect_list()
            .returning(|_| Err(PostRepositoryError::query("connection reset")));
        let app = actix_test::init_service(test_app(Arc::new(repo))).await;

        let req = actix_test::TestRequest::get().uri("/api/posts").to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Internal server error")
        );
    }
}
