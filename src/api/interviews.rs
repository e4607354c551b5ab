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
    models::{CreateInterviewRequest, Interview, InterviewQuery, UpdateInterviewRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/interviews",
    params(InterviewQuery),
    tag = "Interviews",
    responses((status = 200, body = [Interview]))
)]
pub async fn list_interviews(
    State(state): State<AppState>,
    Query(params): Query<InterviewQuery>,
) -> Json<Vec<Interview>> {
    let store = state.store.read().await;
    Json(store.list_interviews(&params))
}

#[utoipa::path(
    post,
    path = "/interviews",
    request_body = CreateInterviewRequest,
    tag = "Interviews",
    responses((status = 201, body = Interview))
)]
pub async fn create_interview(
    State(state): State<AppState>,
    Json(request): Json<CreateInterviewRequest>,
) -> (StatusCode, Json<Interview>) {
    let mut store = state.store.write().await;
    (StatusCode::CREATED, Json(store.create_interview(request)))
}

#[utoipa::path(
    get,
    path = "/interviews/{id}",
    params(("id" = String, Path, description = "Interview identifier")),
    tag = "Interviews",
    responses((status = 200, body = Interview), (status = 404))
)]
pub async fn get_interview(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Interview>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_interview(&id)?))
}

#[utoipa::path(
    patch,
    path = "/interviews/{id}",
    params(("id" = String, Path, description = "Interview identifier")),
    request_body = UpdateInterviewRequest,
    tag = "Interviews",
    responses((status = 200, body = Interview), (status = 404))
)]
pub async fn update_interview(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(patch): Json<UpdateInterviewRequest>,
) -> Result<Json<Interview>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_interview(&id, patch)?))
}

#[utoipa::path(
    delete,
    path = "/interviews/{id}",
    params(("id" = String, Path, description = "Interview identifier")),
    tag = "Interviews",
    responses((status = 200, body = Interview), (status = 404))
)]
pub async fn delete_interview(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Interview>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.delete_interview(&id)?))
}
