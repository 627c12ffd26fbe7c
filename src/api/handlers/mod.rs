use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use compdoc_core::models::*;

use super::AppState;

// ============================================================
// Error Handling
// ============================================================

fn not_found(name: &str) -> (StatusCode, String) {
    tracing::debug!("Unknown source requested: {}", name);
    (StatusCode::NOT_FOUND, format!("Source not found: {}", name))
}

fn find<'a>(state: &'a AppState, name: &str) -> Result<&'a Source, (StatusCode, String)> {
    state.catalog.get(name).ok_or_else(|| not_found(name))
}

// ============================================================
// Health
// ============================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "sources": state.catalog.len() }))
}

// ============================================================
// Sources
// ============================================================

pub async fn list_sources(State(state): State<AppState>) -> Json<Vec<Source>> {
    Json(state.catalog.iter().cloned().collect())
}

pub async fn get_source(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Source>, (StatusCode, String)> {
    find(&state, &name).map(|source| Json(source.clone()))
}

pub async fn list_fields(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Field>>, (StatusCode, String)> {
    find(&state, &name).map(|source| Json(source.fields_list().to_vec()))
}

pub async fn get_source_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PageLayout>, (StatusCode, String)> {
    let source = find(&state, &name)?;
    let metadata = PageMetadata::from_source(source);
    Ok(Json(PageLayout::build(&metadata, Some(&[] as &[Heading]), &state.site)))
}

// ============================================================
// Page Layout
// ============================================================

pub async fn layout_page(
    State(state): State<AppState>,
    Json(input): Json<PageInput>,
) -> Json<PageLayout> {
    Json(PageLayout::from_input(&input, &state.site))
}
