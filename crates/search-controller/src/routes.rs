use crate::clients::{RendererClient, SearchClient};
use crate::health::{HealthCheck, HealthReport};
use crate::prelude::*;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use search_controller_core::api_query::{build_api_query, update_query_with_api_filters};
use search_controller_core::mapper::create_search_page;
use search_controller_core::query::{review_query, QueryParams};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Renderer page the search model is posted to
const SEARCH_PAGE: &str = "search";

#[derive(Debug, Clone)]
pub struct AppState {
    pub search: SearchClient,
    pub renderer: RendererClient,
    pub health: HealthCheck,
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .route("/health", get(health_handler))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

async fn search_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, Error> {
    let params = QueryParams::parse(raw.as_deref().unwrap_or_default());
    let validated = review_query(&params)?;

    let mut api_query = build_api_query(&validated);
    update_query_with_api_filters(&mut api_query);

    let response = state.search.get_search(&api_query).await?;
    let page = create_search_page(&params, response);

    let html = state.renderer.render(SEARCH_PAGE, &page).await?;
    Ok(Html(html))
}

async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health.report().await;
    (report.status.status_code(), Json(report))
}
