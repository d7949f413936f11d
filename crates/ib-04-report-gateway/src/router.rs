//! Routes and handlers.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET {report.route}?page=&order=&sort=` | HTML usage table |
//! | `GET /health` | `{"status", "usage_records"}` |
//! | `GET /metrics` | Prometheus text format |
//!
//! Storage is synchronous, so every handler that touches it runs the work on
//! the blocking pool.

use crate::domain::config::GatewayConfig;
use crate::middleware::{TimeoutLayer, TracingLayer};
use crate::render::render_page;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ib_01_usage_storage::{EntityStorage, UsageReader};
use ib_02_block_resolver::BlockResolver;
use ib_03_usage_report::{TableRequest, UsageTable, WebTableView};
use report_telemetry::{encode_metrics, record_report, HistogramTimer, ReportCounts, REPORT_RENDER_DURATION};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, error};

/// A store the gateway can serve reports from.
pub trait ReportStore: UsageReader + EntityStorage {}

impl<T: UsageReader + EntityStorage + ?Sized> ReportStore for T {}

/// Shared store handle.
pub type SharedStore = Arc<dyn ReportStore>;

type TableView = WebTableView<SharedStore, SharedStore>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    view: Arc<TableView>,
    store: SharedStore,
    route: Arc<str>,
}

impl AppState {
    pub fn new(store: SharedStore, config: &GatewayConfig) -> Self {
        let view = WebTableView::new(
            Arc::clone(&store),
            BlockResolver::new(Arc::clone(&store)),
            config.report.report_config(),
        );
        Self {
            view: Arc::new(view),
            store,
            route: Arc::from(config.report.route.as_str()),
        }
    }
}

/// Build the gateway router with its middleware stack.
pub fn build_router(store: SharedStore, config: &GatewayConfig) -> Router {
    let state = AppState::new(store, config);

    let middleware = ServiceBuilder::new()
        .layer(TracingLayer::new())
        .layer(TimeoutLayer::new(config.timeouts.clone()));

    Router::new()
        .route(&config.report.route, get(usage_report))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(middleware)
        .with_state(state)
}

/// Parse query parameters leniently: a non-numeric `page` means page 0.
pub fn table_request(params: &HashMap<String, String>) -> TableRequest {
    TableRequest {
        page: params.get("page").and_then(|p| p.trim().parse().ok()),
        order: params.get("order").cloned(),
        sort: params.get("sort").cloned(),
    }
}

async fn usage_report(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let request = table_request(&params);
    debug!(?request, "Building usage table");

    let view = Arc::clone(&state.view);
    let route = Arc::clone(&state.route);
    let rendered = tokio::task::spawn_blocking(move || {
        let _timer = HistogramTimer::new(&REPORT_RENDER_DURATION);
        let table = view.build(&request);
        let html = render_page(&table, &route);
        (report_counts(&table), html)
    })
    .await;

    match rendered {
        Ok((counts, html)) => {
            record_report("web", counts);
            Html(html).into_response()
        }
        Err(e) => {
            error!(error = %e, "Usage table task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

fn report_counts(table: &UsageTable) -> ReportCounts {
    ReportCounts {
        scanned: table.scanned,
        missing_blocks: table.skipped,
        missing_pages: table
            .rows
            .iter()
            .filter(|row| row.edit_link.page_title.is_none())
            .count(),
        storage_failed: table.storage_error.is_some(),
    }
}

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub usage_records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn health_check(State(state): State<AppState>) -> Response {
    let store = Arc::clone(&state.store);
    let counted = tokio::task::spawn_blocking(move || store.count()).await;

    let (code, body) = match counted {
        Ok(Ok(count)) => (
            StatusCode::OK,
            HealthStatus {
                status: "ok",
                usage_records: Some(count),
                error: None,
            },
        ),
        Ok(Err(e)) => {
            error!(error = %e, "Health check could not read usage table");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthStatus {
                    status: "unavailable",
                    usage_records: None,
                    error: Some(e.to_string()),
                },
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            HealthStatus {
                status: "error",
                usage_records: None,
                error: Some(e.to_string()),
            },
        ),
    };
    (code, Json(body)).into_response()
}

async fn metrics() -> Response {
    match encode_metrics() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
