//! Content-negotiation guards.
//!
//! [`AcceptJson`] rejects requests whose `Accept` header does not admit
//! `application/json` with 406 before any handler logic runs. In the same
//! position, [`RequireJsonBody`] rejects body-carrying requests whose
//! declared `Content-Type` is not `application/json` with 415. Both are pure
//! gates: they hold no state, mutate nothing, and short-circuit with the
//! JSON rendering of a typed domain error.
//!
//! Wrap order matters: register [`RequireJsonBody`] first and [`AcceptJson`]
//! last so the Accept check runs outermost. A request failing both checks is
//! answered with 406.

use std::task::{Context, Poll};

use actix_web::Error as ActixError;
use actix_web::ResponseError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, header};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::Error;

const JSON_MIME: &str = "application/json";

/// True when this media range admits `application/json` with q > 0.
fn media_range_admits_json(range: &str) -> bool {
    let mut parts = range.split(';');
    let media = parts.next().unwrap_or_default().trim();
    let admits = media == "*/*"
        || media.eq_ignore_ascii_case("application/*")
        || media.eq_ignore_ascii_case(JSON_MIME);
    if !admits {
        return false;
    }
    // A q=0 parameter withdraws the range.
    !parts.any(|param| {
        let mut pair = param.splitn(2, '=');
        let key = pair.next().unwrap_or_default().trim();
        let value = pair.next().unwrap_or_default().trim();
        key.eq_ignore_ascii_case("q") && matches!(value, "0" | "0." | "0.0" | "0.00" | "0.000")
    })
}

/// True when the request will accept a JSON response.
///
/// A missing `Accept` header admits every media type.
fn accepts_json(req: &ServiceRequest) -> bool {
    let mut ranges = req.headers().get_all(header::ACCEPT).peekable();
    if ranges.peek().is_none() {
        return true;
    }
    ranges
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(media_range_admits_json)
}

/// True when the declared `Content-Type` media type is exactly
/// `application/json`, ignoring parameters such as `charset`.
fn declares_json_body(req: &ServiceRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(JSON_MIME))
}

/// Render `error` as the short-circuit response for `req`.
fn reject<B>(req: ServiceRequest, error: &Error) -> ServiceResponse<EitherBody<B>> {
    req.into_response(error.error_response()).map_into_right_body()
}

/// Middleware returning 406 when the client will not accept JSON responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blogful::middleware::AcceptJson;
///
/// let app = App::new().wrap(AcceptJson);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptJson;

impl<S, B> Transform<S, ServiceRequest> for AcceptJson
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = AcceptJsonMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AcceptJsonMiddleware { service }))
    }
}

/// Service wrapper produced by [`AcceptJson`].
///
/// Applications should not use this type directly.
pub struct AcceptJsonMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AcceptJsonMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !accepts_json(&req) {
            let error = Error::not_acceptable(format!("Request must accept {JSON_MIME} data"));
            return Box::pin(ready(Ok(reject(req, &error))));
        }
        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}

/// Middleware returning 415 when a body-carrying request does not declare a
/// JSON body.
///
/// Only POST, PUT, and PATCH are gated; GET and DELETE carry no body and
/// pass through regardless of their `Content-Type` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireJsonBody;

impl<S, B> Transform<S, ServiceRequest> for RequireJsonBody
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = RequireJsonBodyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJsonBodyMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireJsonBody`].
///
/// Applications should not use this type directly.
pub struct RequireJsonBodyMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireJsonBodyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let gated = [Method::POST, Method::PUT, Method::PATCH].contains(req.method());
        if gated && !declares_json_body(&req) {
            let error =
                Error::unsupported_media_type(format!("Request must contain {JSON_MIME} data"));
            return Box::pin(ready(Ok(reject(req, &error))));
        }
        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("application/json", true)]
    #[case("application/json; q=0.9", true)]
    #[case("application/*", true)]
    #[case("*/*", true)]
    #[case("*/*; q=0", false)]
    #[case("application/json; q=0", false)]
    #[case("application/xml", false)]
    #[case("text/html", false)]
    fn media_range_admission(#[case] range: &str, #[case] expected: bool) {
        assert_eq!(media_range_admits_json(range), expected);
    }

    fn guarded_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().service(
            web::scope("/api")
                .wrap(RequireJsonBody)
                .wrap(AcceptJson)
                .service(
                    web::resource("/echo")
                        .route(web::get().to(|| async { HttpResponse::Ok().finish() }))
                        .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
                ),
        )
    }

    #[actix_web::test]
    async fn rejects_unacceptable_accept_header_with_message() {
        let app = actix_test::init_service(guarded_app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/echo")
            .insert_header((header::ACCEPT, "application/xml"))
            .to_request();

        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_ACCEPTABLE);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Request must accept application/json data")
        );
    }

    #[rstest]
    #[case(Some("application/json"))]
    #[case(Some("*/*"))]
    #[case(Some("application/*"))]
    #[case(Some("text/html, application/json"))]
    #[case(None)]
    #[actix_web::test]
    async fn admits_json_capable_clients(#[case] accept: Option<&str>) {
        let app = actix_test::init_service(guarded_app()).await;
        let mut req = actix_test::TestRequest::get().uri("/api/echo");
        if let Some(accept) = accept {
            req = req.insert_header((header::ACCEPT, accept));
        }

        let res = actix_test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn rejects_non_json_body_with_message() {
        let app = actix_test::init_service(guarded_app()).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/echo")
            .insert_header((header::ACCEPT, "application/json"))
            .insert_header((header::CONTENT_TYPE, "application/xml"))
            .set_payload("<post/>")
            .to_request();

        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Request must contain application/json data")
        );
    }

    #[actix_web::test]
    async fn rejects_missing_content_type_on_post() {
        let app = actix_test::init_service(guarded_app()).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/echo")
            .insert_header((header::ACCEPT, "application/json"))
            .to_request();

        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[actix_web::test]
    async fn content_type_parameters_are_ignored() {
        let app = actix_test::init_service(guarded_app()).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/echo")
            .insert_header((header::ACCEPT, "application/json"))
            .insert_header((header::CONTENT_TYPE, "application/json; charset=utf-8"))
            .set_payload("{}")
            .to_request();

        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn get_is_not_gated_by_content_type() {
        let app = actix_test::init_service(guarded_app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/echo")
            .insert_header((header::ACCEPT, "application/json"))
            .insert_header((header::CONTENT_TYPE, "application/xml"))
            .to_request();

        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn accept_check_runs_before_content_type_check() {
        let app = actix_test::init_service(guarded_app()).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/echo")
            .insert_header((header::ACCEPT, "application/xml"))
            .insert_header((header::CONTENT_TYPE, "application/xml"))
            .set_payload("<post/>")
            .to_request();

        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[actix_web::test]
    async fn error_responses_are_json() {
        let app = actix_test::init_service(guarded_app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/echo")
            .insert_header((header::ACCEPT, "application/xml"))
            .to_request();

        let res = actix_test::call_service(&app, req).await;
        let content_type = res
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("application/json"));
    }
}
