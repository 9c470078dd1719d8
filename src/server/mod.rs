//! HTTP surface of the site backend.

pub mod routes;

use std::{any::Any, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};

use crate::announcements::AnnouncementConfig;
use crate::chat::ChatService;
use crate::hours::Clock;
use routes::ErrorBody;

pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong processing your request.";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub announcements: Option<Arc<AnnouncementConfig>>,
    pub clock: Arc<dyn Clock>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/api/chat", post(routes::chat))
        .route("/api/announcements", get(routes::announcements))
        .route("/api/appointments", post(routes::appointments))
        .with_state(state)
        .layer(cors)
        .layer(CatchPanicLayer::custom(panic_response))
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    log::error!("[server] request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

pub async fn serve(state: AppState, bind: &str) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address {bind:?}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    log::info!("clinic-concierge listening on http://{addr}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown requested, draining connections"),
        Err(err) => {
            log::warn!("Could not listen for Ctrl-C: {err}");
            std::future::pending::<()>().await
        }
    }
}
