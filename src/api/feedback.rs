// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::{CreateFeedbackRequest, Feedback, FeedbackQuery, UpdateFeedbackRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/feedback",
    params(FeedbackQuery),
    tag = "Feedback",
    responses((status = 200, body = [Feedback]))
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(params): Query<FeedbackQuery>,
) -> Json<Vec<Feedback>> {
    let store = state.store.read().await;
    Json(store.list_feedback(&params))
}

#[utoipa::path(
    post,
    path = "/feedback",
    request_body = CreateFeedbackRequest,
    tag = "Feedback",
    responses(
        (status = 201, body = Feedback),
        (status = 400, description = "Rating out of range")
    )
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    Json(request): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    let mut store = state.store.write().await;
    let feedback = store.create_feedback(request)?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

#[utoipa::path(
    get,
    path = "/feedback/{id}",
    params(("id" = String, Path, description = "Feedback identifier")),
    tag = "Feedback",
    responses((status = 200, body = Feedback), (status = 404))
)]
pub async fn get_feedback(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Feedback>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_feedback(&id)?))
}

#[utoipa::path(
    patch,
    path = "/feedback/{id}",
    params(("id" = String, Path, description = "Feedback identifier")),
    request_body = UpdateFeedbackRequest,
    tag = "Feedback",
    responses((status = 200, body = Feedback), (status = 400), (status = 404))
)]
pub async fn update_feedback(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(patch): Json<UpdateFeedbackRequest>,
) -> Result<Json<Feedback>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_feedback(&id, patch)?))
}

#[utoipa::path(
    delete,
    path = "/feedback/{id}",
    params(("id" = String, Path, description = "Feedback identifier")),
    tag = "Feedback",
    responses((status = 200, body = Feedback), (status = 404))
)]
pub async fn delete_feedback(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Feedback>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.delete_feedback(&id)?))
}
