use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::{any_service, get},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::infra::runtime::mcp_transport::{make_streamable_http_service, LocalSessionManager};
use crate::tools::apod::{make_factory, ApodSvc};

/// `/healthz` + streamable MCP at `/mcp`.
pub fn build_app_default(svc: ApodSvc) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = make_streamable_http_service(make_factory(svc), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

/// Default app **plus** the plain REST route at `/v1/apod`.
pub fn build_app_with_rest(svc: ApodSvc) -> Router {
    build_app_default(svc.clone()).merge(
        Router::new()
            .route("/v1/apod", get(apod_text))
            .with_state(svc),
    )
}

#[derive(Debug, Deserialize)]
pub struct ApodQuery {
    date: Option<String>,
}

/// Same contract as the MCP tool: always 200, body is the report or the unavailable message.
async fn apod_text(State(svc): State<ApodSvc>, Query(q): Query<ApodQuery>) -> impl IntoResponse {
    tracing::debug!(date = ?q.date, "GET /v1/apod");
    let body = svc.report(q.date.as_deref()).await;
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}
