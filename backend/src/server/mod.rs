//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub use metrics::make_metrics;
pub use state_builders::in_memory_http_state;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::comments::{
    create_comment, delete_comment, get_comment, list_comments, patch_comment, replace_comment,
};
use crate::inbound::http::groups::{get_group, list_groups, write_group, write_groups};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::posts::{
    create_post, delete_post, get_post, list_posts, patch_post, replace_post,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tokens::obtain_token;

/// Build the application: the `/api/v1` resources, the health probes and,
/// in debug builds, Swagger UI at `/docs`.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(obtain_token)
        .service(list_groups)
        .service(get_group)
        .service(write_groups)
        .service(write_group)
        .service(list_posts)
        .service(create_post)
        .service(get_post)
        .service(replace_post)
        .service(patch_post)
        .service(delete_post)
        .service(list_comments)
        .service(create_comment)
        .service(get_comment)
        .service(replace_comment)
        .service(patch_comment)
        .service(delete_comment);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The seed, when configured, is applied before the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding, binding the socket or starting
/// the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        seed,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    let http_state = build_http_state(db_pool.as_ref(), seed.as_ref())
        .await
        .map(web::Data::new)
        .map_err(|err| std::io::Error::other(format!("seeding failed: {err}")))?;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
