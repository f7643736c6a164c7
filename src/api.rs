use std::future::Future;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use log::{debug, info};
use tokio::net::TcpListener;

use crate::commander::config::Config;
use crate::commander::outcome::OutcomeReceiver;
use crate::commander::{Reply, ReplyBody, SlackMux};

struct AppState {
    mux: Arc<SlackMux>,
}

type AppStateArg = State<Arc<AppState>>;

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.body {
            ReplyBody::Text(text) => (self.status, text).into_response(),
            ReplyBody::Json(response) => (self.status, Json(response)).into_response(),
        }
    }
}

async fn slash_command(State(state): AppStateArg, body: Bytes) -> Reply {
    debug!("slash_command({} bytes)", body.len());
    let dispatch = state.mux.dispatch_form(&body).await;
    tokio::spawn(log_outcome(dispatch.outcome));
    dispatch.reply
}

async fn log_outcome(outcome: OutcomeReceiver) {
    match outcome.wait().await {
        Some(outcome) => debug!("Dispatch finished: {outcome:?}"),
        None => debug!("Dispatch finished without outcome"),
    }
}

/// Router serving the webhook on `path`.
pub fn router(mux: Arc<SlackMux>, path: &str) -> Router {
    let shared_state = Arc::new(AppState { mux });
    Router::new()
        .route(path, post(slash_command))
        .with_state(shared_state)
}

pub async fn serve(
    mux: Arc<SlackMux>,
    config: &Config,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(config.serving_addr.as_str())
        .await
        .with_context(|| format!("Cannot listen on {}", config.serving_addr))?;
    serve_on(listener, mux, &config.effective_webhook_path(), shutdown).await
}

pub async fn serve_on(
    listener: TcpListener,
    mux: Arc<SlackMux>,
    path: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    info!("Serving slash commands on {}{path}", listener.local_addr()?);
    axum::serve(listener, router(mux, path))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Api server failed")
}
