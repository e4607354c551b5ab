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
    models::{AccessRequest, AccessRequestQuery, CreateAccessRequest, UpdateAccessRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/access-requests",
    params(AccessRequestQuery),
    tag = "Access Requests",
    responses((status = 200, body = [AccessRequest]))
)]
pub async fn list_access_requests(
    State(state): State<AppState>,
    Query(params): Query<AccessRequestQuery>,
) -> Json<Vec<AccessRequest>> {
    let store = state.store.read().await;
    Json(store.list_access_requests(&params))
}

#[utoipa::path(
    post,
    path = "/access-requests",
    request_body = CreateAccessRequest,
    tag = "Access Requests",
    responses((status = 201, body = AccessRequest))
)]
pub async fn create_access_request(
    State(state): State<AppState>,
    Json(request): Json<CreateAccessRequest>,
) -> (StatusCode, Json<AccessRequest>) {
    let mut store = state.store.write().await;
    (StatusCode::CREATED, Json(store.create_access_request(request)))
}

#[utoipa::path(
    get,
    path = "/access-requests/{id}",
    params(("id" = String, Path, description = "Access request identifier")),
    tag = "Access Requests",
    responses(
        (status = 200, body = AccessRequest),
        (status = 404, description = "Access request not found")
    )
)]
pub async fn get_access_request(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AccessRequest>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_access_request(&id)?))
}

#[utoipa::path(
    patch,
    path = "/access-requests/{id}",
    params(("id" = String, Path, description = "Access request identifier")),
    request_body = UpdateAccessRequest,
    tag = "Access Requests",
    responses(
        (status = 200, body = AccessRequest),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Access request not found")
    )
)]
pub async fn update_access_request(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(patch): Json<UpdateAccessRequest>,
) -> Result<Json<AccessRequest>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_access_request(&id, patch)?))
}

#[utoipa::path(
    delete,
    path = "/access-requests/{id}",
    params(("id" = String, Path, description = "Access request identifier")),
    tag = "Access Requests",
    responses(
        (status = 200, description = "The deleted record", body = AccessRequest),
        (status = 404, description = "Access request not found")
    )
)]
pub async fn delete_access_request(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AccessRequest>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.delete_access_request(&id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccessStatus;

    fn request(candidate_id: &str) -> CreateAccessRequest {
        CreateAccessRequest {
            candidate_id: candidate_id.into(),
            recruiter_id: Some("rec_1".into()),
            recruiter_name: Some("Jane Recruiter".into()),
            company: Some("Acme".into()),
            documents: vec!["degree".into()],
            message: Some("May I see your degree?".into()),
        }
    }

    #[tokio::test]
    async fn create_access_request_success() {
        let state = AppState::default();

        let (status, Json(created)) =
            create_access_request(State(state.clone()), Json(request("cand_1"))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.status, AccessStatus::Pending);
        assert_eq!(created.candidate_id, "cand_1");

        let Json(fetched) = get_access_request(Path(created.id.clone()), State(state.clone()))
            .await
            .expect("access request exists");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn list_filters_by_candidate() {
        let state = AppState::default();
        let (_, Json(first)) =
            create_access_request(State(state.clone()), Json(request("cand_1"))).await;
        create_access_request(State(state.clone()), Json(request("cand_2"))).await;

        let Json(listed) = list_access_requests(
            State(state.clone()),
            Query(AccessRequestQuery {
                candidate_id: Some("cand_1".into()),
                status: None,
            }),
        )
        .await;
        assert_eq!(listed, vec![first]);
    }

    #[tokio::test]
    async fn patch_sets_status_and_updated_at() {
        let state = AppState::default();
        let (_, Json(created)) =
            create_access_request(State(state.clone()), Json(request("cand_1"))).await;

        let Json(updated) = update_access_request(
            Path(created.id.clone()),
            State(state.clone()),
            Json(UpdateAccessRequest {
                status: Some("granted".into()),
                ..UpdateAccessRequest::default()
            }),
        )
        .await
        .expect("patch succeeds");

        assert_eq!(updated.status, AccessStatus::Granted);
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.message, created.message);
    }

    #[tokio::test]
    async fn patch_rejects_unknown_status() {
        let state = AppState::default();
        let (_, Json(created)) =
            create_access_request(State(state.clone()), Json(request("cand_1"))).await;

        let err = update_access_request(
            Path(created.id),
            State(state.clone()),
            Json(UpdateAccessRequest {
                status: Some("approved".into()),
                ..UpdateAccessRequest::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid status");
    }

    #[tokio::test]
    async fn delete_returns_record_then_404() {
        let state = AppState::default();
        let (_, Json(created)) =
            create_access_request(State(state.clone()), Json(request("cand_1"))).await;

        let Json(deleted) = delete_access_request(Path(created.id.clone()), State(state.clone()))
            .await
            .expect("delete succeeds");
        assert_eq!(deleted, created);

        let err = get_access_request(Path(created.id), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Access request not found");
    }
}
