use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::controllers::paste;
use crate::storage::AnyStorage;
use crate::types::api::{CreatedPaste, ReadResult};
use crate::App;

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr = SocketAddr::new(app.config.address, app.config.port);

    info!("listening on {addr}");

    axum::Server::bind(&addr)
        .serve(router(app).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");

    Ok(())
}

pub fn router(app: App) -> Router {
    Router::new()
        .route("/", get(read_paste).post(create_paste).delete(delete_paste))
        .layer(DefaultBodyLimit::max(app.config.limits.max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

/// Parse a JSON body regardless of its content type; GET and DELETE clients
/// rarely send one.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> crate::ApiResult<T> {
    Ok(serde_json::from_slice(body)?)
}

async fn create_paste(
    State(mut storage): State<AnyStorage>,
    body: Bytes,
) -> crate::ApiResult<Json<CreatedPaste>> {
    let created = paste::create(&mut storage, parse_body(&body)?).await?;
    Ok(Json(created))
}

async fn read_paste(
    State(mut storage): State<AnyStorage>,
    body: Bytes,
) -> crate::ApiResult<Json<ReadResult>> {
    let result = paste::read(&mut storage, parse_body(&body)?).await?;
    Ok(Json(result))
}

async fn delete_paste(
    State(mut storage): State<AnyStorage>,
    body: Bytes,
) -> crate::ApiResult<StatusCode> {
    paste::delete(&mut storage, parse_body(&body)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
