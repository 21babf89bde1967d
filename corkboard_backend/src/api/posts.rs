use super::{ApiError, ApiResult, AppState};
use crate::posting::{CreatePostInput, PostService, PostView, UpdatePostInput};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    api_port: u16,
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        api_port: state.config.api_port,
    })
}

pub(crate) async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<PostView>> {
    let service = PostService::new(state.database.clone());
    let posts = service.list_posts()?;
    Ok(Json(posts))
}

pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PostView> {
    let service = PostService::new(state.database.clone());
    let post = service.get_post(&id)?;
    Ok(Json(post))
}

pub(crate) async fn list_replies(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<PostView>> {
    let service = PostService::new(state.database.clone());
    let replies = service.list_replies(&id)?;
    Ok(Json(replies))
}

pub(crate) async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostInput>,
) -> ApiResult<PostView> {
    let service = PostService::new(state.database.clone());
    let post = service.create_post(payload)?;
    Ok(Json(post))
}

pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePostInput>,
) -> ApiResult<PostView> {
    let service = PostService::new(state.database.clone());
    let post = service.update_post(&id, payload)?;
    Ok(Json(post))
}

pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service = PostService::new(state.database.clone());
    service.delete_post(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
