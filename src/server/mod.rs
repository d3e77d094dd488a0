use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::{Show, ShowCatalog};
use crate::config::Config;
use crate::pattern::{suggest_filename, FilenameParser, ParseResult};
use crate::Result;

/// Shared application context passed to all handlers.
#[derive(Clone)]
pub struct AppContext {
    pub parser: Arc<FilenameParser>,
    pub catalog: Arc<ShowCatalog>,
    /// Extension used when a suggest request doesn't name one
    pub default_suggest_format: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseFilenameRequest {
    filename: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestFilenameRequest {
    show_name: String,
    date: NaiveDate,
    format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestFilenameResponse {
    filename: String,
}

#[derive(Debug, Serialize)]
pub struct ShowsResponse {
    shows: Vec<Show>,
}

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    filename: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    matched: bool,
    show: Option<Show>,
    parsed: ParseResult,
}

/// Build the API router.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/parse-filename", post(parse_filename))
        .route("/api/suggest-filename", post(suggest))
        .route("/api/shows", get(list_shows))
        .route("/api/shows/match", get(match_show))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Run the JSON preview API until shutdown.
pub async fn run(config: &Config, parser: FilenameParser, catalog: ShowCatalog) -> Result<()> {
    let ctx = AppContext {
        parser: Arc::new(parser),
        catalog: Arc::new(catalog),
        default_suggest_format: config.app.default_suggest_format.clone(),
    };

    let app = router(ctx);

    let addr: SocketAddr = config.server.bind.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("JSON API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "aircheck".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Echo the parse result verbatim so upload forms can preview the match
/// before committing a file.
async fn parse_filename(
    State(ctx): State<AppContext>,
    Json(request): Json<ParseFilenameRequest>,
) -> Json<ParseResult> {
    let result = ctx.parser.parse(&request.filename);
    if !result.success {
        tracing::debug!(filename = %request.filename, error = ?result.error, "parse preview failed");
    }
    Json(result)
}

async fn suggest(
    State(ctx): State<AppContext>,
    Json(request): Json<SuggestFilenameRequest>,
) -> Json<SuggestFilenameResponse> {
    let format = request
        .format
        .unwrap_or_else(|| ctx.default_suggest_format.clone());

    Json(SuggestFilenameResponse {
        filename: suggest_filename(&request.show_name, request.date, &format),
    })
}

async fn list_shows(State(ctx): State<AppContext>) -> Json<ShowsResponse> {
    Json(ShowsResponse {
        shows: ctx.catalog.shows().to_vec(),
    })
}

async fn match_show(
    State(ctx): State<AppContext>,
    Query(query): Query<MatchQuery>,
) -> Json<MatchResponse> {
    let parsed = ctx.parser.parse(&query.filename);
    let show = ctx
        .catalog
        .find_show_by_pattern(&ctx.parser, &query.filename)
        .cloned();

    Json(MatchResponse {
        matched: show.is_some(),
        show,
        parsed,
    })
}
