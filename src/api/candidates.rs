// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    models::{CandidateProfile, CandidateSearchQuery},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/candidates/search",
    params(CandidateSearchQuery),
    tag = "Candidates",
    responses((status = 200, body = [CandidateProfile]))
)]
pub async fn search_candidates(
    State(state): State<AppState>,
    Query(params): Query<CandidateSearchQuery>,
) -> Json<Vec<CandidateProfile>> {
    let store = state.store.read().await;
    Json(store.search_candidates(&params))
}
