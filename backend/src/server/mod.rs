//! Server construction and route wiring.

mod config;

pub use config::{AppConfig, ConfigError, Profile};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::posts::{create_post, delete_post, get_post, list_posts};
use crate::inbound::http::state::HttpState;
use crate::middleware::{AcceptJson, RequireJsonBody};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the actix application: negotiation guards wrap the API scope,
/// probes (and Swagger UI in debug builds) sit outside it.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // The transform registered last runs first, so the Accept guard is
    // evaluated before the Content-Type guard.
    let api = web::scope("/api")
        .wrap(RequireJsonBody)
        .wrap(AcceptJson)
        .service(list_posts)
        .service(get_post)
        .service(create_post)
        .service(delete_post);

    let app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
