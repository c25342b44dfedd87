use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use axum::extract::Request;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer, MaxAge};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::games::Game;
use crate::global::Global;

pub mod error;
pub mod routes;


/// The relay is read-only, so only GET is allowed cross-origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::list([hyper::Method::GET]))
        .allow_headers(AllowHeaders::any())
        .max_age(MaxAge::exact(Duration::from_secs(7200)))
}

/// Game slug of a `/stats/{game}[/view]` request, if it names a known game.
fn requested_game(req: &Request) -> Option<Game> {
    req.uri()
        .path()
        .strip_prefix("/stats/")
        .and_then(|rest| rest.split('/').next())
        .and_then(Game::from_slug)
}

/// Query strings carry player names, so spans and logs only see the path.
fn request_span(req: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        game = requested_game(req).map(|g| g.slug()),
        status = tracing::field::Empty,
    )
}

fn log_response(res: &Response, latency: Duration, span: &Span) {
    let status = res.status();
    span.record("status", status.as_u16());

    if status.is_server_error() {
        tracing::warn!(status = status.as_u16(), latency = ?latency, "response");
    } else {
        tracing::info!(status = status.as_u16(), latency = ?latency, "response");
    }
}

pub fn app(global: Arc<Global>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .nest("/stats", routes::stats::routes())
        .with_state(global)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(request_span)
                        .on_request(|req: &Request, _span: &Span| {
                            tracing::debug!(path = %req.uri().path(), "incoming request");
                        })
                        .on_response(log_response)
                        .on_failure(()),
                )
                .layer(cors_layer()),
        )
}

#[tracing::instrument]
async fn not_found() -> error::ApiError {
    error::ApiError::not_found(error::ApiErrorCode::ROUTE_NOT_FOUND, "route not found")
}

#[tracing::instrument(name = "HTTP", skip_all)]
pub async fn run(global: Arc<Global>) -> anyhow::Result<()> {
    let bind = global.config.api.bind;

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .context("failed to bind HTTP server")?;

    tracing::info!(%bind, "http server listening");

    axum::serve(
        listener,
        app(global).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("http server error")?;

    Ok(())
}
