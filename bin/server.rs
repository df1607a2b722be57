// Transaction Network - Web Server
// Dashboard page + JSON API over an in-memory, read-only transaction list

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transaction_network::{
    legend, render_html, vis_data, vis_options, Dashboard, DashboardView, DataArgs,
    PropertySummary, SelectionFilter, Transaction,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Transaction network web dashboard", long_about = None)]
struct ServerArgs {
    #[command(flatten)]
    data: DataArgs,

    /// HTTP listen address
    #[arg(long, env = "NETWORK_BIND", default_value = "0.0.0.0:3000")]
    bind: String,
}

/// Shared application state (read-only after startup)
#[derive(Clone)]
struct AppState {
    dashboard: Arc<Dashboard>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphQuery {
    node: Option<String>,
}

/// Graph response: the computed view plus the vis-network payload
#[derive(Serialize)]
struct GraphResponse {
    view: DashboardView,
    vis: Value,
    options: Value,
    legend: Vec<LegendEntry>,
}

#[derive(Serialize)]
struct LegendEntry {
    label: String,
    color: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/transactions - All transactions
async fn get_transactions(State(state): State<AppState>) -> impl IntoResponse {
    let transactions: Vec<Transaction> = state.dashboard.transactions().to_vec();
    Json(ApiResponse::ok(transactions))
}

/// GET /api/nodes - Dropdown options ("All" + source accounts)
async fn get_nodes(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.dashboard.node_options()))
}

/// GET /api/graph?node=<id> - Graph and summary for a selection
async fn get_graph(
    State(state): State<AppState>,
    Query(query): Query<GraphQuery>,
) -> impl IntoResponse {
    let filter = SelectionFilter::from_option(query.node.as_deref());
    let view = state.dashboard.view(&filter);
    info!(filter = %filter, nodes = view.graph.nodes.len(), edges = view.graph.edges.len(), "graph view");

    let response = GraphResponse {
        vis: vis_data(&view.graph),
        options: vis_options(),
        legend: legend()
            .into_iter()
            .map(|(label, color)| LegendEntry { label, color })
            .collect(),
        view,
    };

    Json(ApiResponse::ok(response))
}

/// GET /api/nodes/:node/summary - Property summary of one node
async fn get_node_summary(
    State(state): State<AppState>,
    Path(node): Path<String>,
) -> impl IntoResponse {
    // Path has already percent-decoded the segment
    match SelectionFilter::from_option(Some(node.as_str())) {
        SelectionFilter::All => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<PropertySummary>::err("select a specific node")),
        )
            .into_response(),
        filter => {
            let summary = state.dashboard.view(&filter).summary;
            (StatusCode::OK, Json(ApiResponse { success: true, data: summary, error: None }))
                .into_response()
        }
    }
}

/// GET /network?node=<id> - Standalone graph page
async fn serve_network(
    State(state): State<AppState>,
    Query(query): Query<GraphQuery>,
) -> impl IntoResponse {
    let filter = SelectionFilter::from_option(query.node.as_deref());
    let view = state.dashboard.view(&filter);

    match render_html(&view.graph, &format!("Network Graph Analysis - {}", filter)) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Error rendering network page: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/transactions", get(get_transactions))
        .route("/nodes", get(get_nodes))
        .route("/nodes/:node/summary", get(get_node_summary))
        .route("/graph", get(get_graph))
        .with_state(state.clone());

    Router::new()
        .route("/", get(serve_index))
        .route("/network", get(serve_network))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "network_server=info,transaction_network=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();

    let transactions = args.data.load().context("Failed to load transactions")?;
    info!(source = ?args.data.source, rows = transactions.len(), "transactions loaded");

    let state = AppState {
        dashboard: Arc::new(Dashboard::new(transactions)),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", args.bind))?;

    info!("🚀 Server running on http://{}", args.bind);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
