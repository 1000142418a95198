//! One handler per store operation.
//!
//! Handlers keep no memory between requests; the only shared state is the
//! store handle in [`AppState`].

use super::AppState;
use crate::core::data::{Category, Prompt, PromptCollection, PromptInput, PromptPatch, PromptStats};
use crate::core::search::{CategoryFilter, FilterCriteria, SearchEngine};
use crate::core::state::Highlights;
use crate::utils::error::AppError;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::info;

type HandlerResult<T> = Result<T, AppError>;

/// Decode a request body that must be a JSON object. Serde would otherwise
/// fill a struct from a positional array.
fn object_body<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> HandlerResult<T> {
    let Json(value) = payload?;
    if !value.is_object() {
        return Err(AppError::validation("Request body must be a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| AppError::validation(format!("Invalid request body: {}", e)))
}

/// Query string accepted by `GET /prompts`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Comma separated
    pub tags: Option<String>,
    pub favorites: Option<bool>,
}

impl ListQuery {
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            search_term: self.search,
            category: self
                .category
                .as_deref()
                .map(CategoryFilter::parse)
                .unwrap_or_default(),
            tags: self
                .tags
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            favorites_only: self.favorites.unwrap_or(false),
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn list_prompts(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> HandlerResult<Json<Vec<Prompt>>> {
    let Query(query) = query?;
    let prompts = state.store.list().await?;
    let criteria = query.into_criteria();

    if criteria.is_active() {
        Ok(Json(SearchEngine::select(&prompts, &criteria)))
    } else {
        Ok(Json(prompts))
    }
}

pub async fn create_prompt(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<impl IntoResponse> {
    let input: PromptInput = object_body(payload)?;
    let prompt = state.store.create(input).await?;
    info!(id = %prompt.id, "Created prompt '{}'", prompt.title);
    Ok((StatusCode::CREATED, Json(prompt)))
}

pub async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Json<Prompt>> {
    Ok(Json(state.store.get(&id).await?))
}

pub async fn replace_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Json<Prompt>> {
    let input: PromptInput = object_body(payload)?;
    let prompt = state.store.replace(&id, input).await?;
    info!(%id, "Replaced prompt");
    Ok(Json(prompt))
}

pub async fn patch_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Json<Prompt>> {
    let patch: PromptPatch = object_body(payload)?;
    let prompt = state.store.patch(&id, patch).await?;
    info!(%id, "Patched prompt");
    Ok(Json(prompt))
}

pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<StatusCode> {
    state.store.delete(&id).await?;
    info!(%id, "Deleted prompt");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_prompt_used(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Json<Prompt>> {
    let prompt = state.store.mark_used(&id).await?;
    info!(%id, use_count = prompt.use_count, "Marked prompt used");
    Ok(Json(prompt))
}

pub async fn highlights(State(state): State<AppState>) -> HandlerResult<Json<Highlights>> {
    let prompts = state.store.list().await?;
    Ok(Json(Highlights::from_prompts(&prompts)))
}

pub async fn stats(State(state): State<AppState>) -> HandlerResult<Json<PromptStats>> {
    let prompts = state.store.list().await?;
    Ok(Json(PromptCollection::new(prompts).get_stats()))
}

pub async fn categories() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}
