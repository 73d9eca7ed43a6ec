//! HTTP API server for the chat front end.
//!
//! Thin JSON marshalling over [`Retriever`]; one retriever, and therefore one
//! embedding cache, is shared by every request.

use super::build_retriever;
use crate::cli::Output;
use crate::collection::{Collection, Filter, Record};
use crate::config::Settings;
use crate::retrieval::{MatchResult, Retriever};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Shared application state.
struct AppState {
    retriever: Retriever,
    settings: Settings,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let retriever = build_retriever(&settings)?;
    let app = router(Arc::new(AppState { retriever, settings }));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Asha API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Retrieve", "POST /retrieve");
    Output::kv("Search", "POST /search");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/retrieve", post(retrieve))
        .route("/search", post(search))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct RetrieveRequest {
    query: String,
    #[serde(default)]
    filter: Option<Filter>,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
    source: String,
    #[serde(default)]
    top_k: Option<usize>,
    #[serde(default)]
    filter: Option<Filter>,
}

#[derive(Serialize)]
struct SearchResponse {
    source: Collection,
    results: Vec<SearchHit>,
}

#[derive(Serialize)]
struct SearchHit {
    score: f32,
    record: Record,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn retrieve(State(state): State<Arc<AppState>>, Json(req): Json<RetrieveRequest>) -> Json<MatchResult> {
    Json(state.retriever.retrieve(&req.query, req.filter.as_ref()).await)
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> impl IntoResponse {
    let collection: Collection = match req.source.parse() {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response();
        }
    };

    let top_k = req.top_k.unwrap_or(state.settings.retrieval.top_k);
    match state
        .retriever
        .semantic_search(&req.query.to_lowercase(), collection, top_k, req.filter.as_ref())
        .await
    {
        Ok(results) => Json(SearchResponse {
            source: collection,
            results: results
                .into_iter()
                .map(|r| SearchHit {
                    score: r.score,
                    record: r.record,
                })
                .collect(),
        })
        .into_response(),
        Err(e) => {
            error!("Search failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response()
        }
    }
}
