// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    invoke::{InvokeArg, InvokeRequest},
    models::{
        AccessRequest, AccessStatus, CandidateProfile, CreateAccessRequest, CreateFeedbackRequest,
        CreateInterviewRequest, DocumentVerification, Feedback, Interview, UpdateAccessRequest,
        UpdateFeedbackRequest, UpdateInterviewRequest, VerifyDocumentRequest,
    },
    state::AppState,
    upload::{storage::UPLOADS_URL_PREFIX, StoredFile},
};

pub mod access_requests;
pub mod candidates;
pub mod contracts;
pub mod documents;
pub mod feedback;
pub mod health;
pub mod interviews;
pub mod invoke;
pub mod payments;
pub mod upload;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let upload_routes = Router::new()
        .route("/upload", post(upload::upload_file))
        .route("/upload-ipfs", post(upload::upload_to_ipfs))
        .route("/contracts/documents", post(contracts::anchor_document))
        .layer(DefaultBodyLimit::max(state.config.upload_max_bytes));

    let api_routes = Router::new()
        .route("/status", get(health::cli_status))
        .route("/health/live", get(health::liveness))
        .route("/invoke", post(invoke::invoke_contract))
        .route("/wallet", get(wallet::wallet_status))
        .route("/wallet/connect", post(wallet::connect_wallet))
        .route("/wallet/disconnect", post(wallet::disconnect_wallet))
        .route("/payments", post(payments::submit_payment))
        .route("/payments/xdr", post(payments::build_payment_xdr))
        .route("/contracts/profile", post(contracts::register_profile))
        .route("/contracts/jobs", post(contracts::post_job))
        .route("/contracts/jobs/{id}/apply", post(contracts::apply_to_job))
        .route(
            "/contracts/documents/verify",
            post(contracts::verify_document_on_chain),
        )
        .route(
            "/contracts/applications/{id}/status",
            post(contracts::update_application_status),
        )
        .route(
            "/access-requests",
            get(access_requests::list_access_requests).post(access_requests::create_access_request),
        )
        .route(
            "/access-requests/{id}",
            get(access_requests::get_access_request)
                .patch(access_requests::update_access_request)
                .delete(access_requests::delete_access_request),
        )
        .route(
            "/interviews",
            get(interviews::list_interviews).post(interviews::create_interview),
        )
        .route(
            "/interviews/{id}",
            get(interviews::get_interview)
                .patch(interviews::update_interview)
                .delete(interviews::delete_interview),
        )
        .route(
            "/feedback",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route(
            "/feedback/{id}",
            get(feedback::get_feedback)
                .patch(feedback::update_feedback)
                .delete(feedback::delete_feedback),
        )
        .route("/candidates/search", get(candidates::search_candidates))
        .route("/documents/verify", post(documents::verify_document))
        .merge(upload_routes)
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(state.uploads.dir()))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::cli_status,
        health::liveness,
        invoke::invoke_contract,
        upload::upload_file,
        upload::upload_to_ipfs,
        wallet::connect_wallet,
        wallet::wallet_status,
        wallet::disconnect_wallet,
        payments::submit_payment,
        payments::build_payment_xdr,
        contracts::register_profile,
        contracts::post_job,
        contracts::apply_to_job,
        contracts::verify_document_on_chain,
        contracts::update_application_status,
        contracts::anchor_document,
        access_requests::list_access_requests,
        access_requests::create_access_request,
        access_requests::get_access_request,
        access_requests::update_access_request,
        access_requests::delete_access_request,
        interviews::list_interviews,
        interviews::create_interview,
        interviews::get_interview,
        interviews::update_interview,
        interviews::delete_interview,
        feedback::list_feedback,
        feedback::create_feedback,
        feedback::get_feedback,
        feedback::update_feedback,
        feedback::delete_feedback,
        candidates::search_candidates,
        documents::verify_document
    ),
    components(
        schemas(
            health::CliStatus,
            health::HealthResponse,
            InvokeRequest,
            InvokeArg,
            invoke::InvokeSuccess,
            invoke::InvokeFailure,
            StoredFile,
            upload::UploadResponse,
            upload::PinnedUploadResponse,
            upload::UploadFailure,
            wallet::ConnectResponse,
            wallet::WalletStatus,
            payments::PaymentRequest,
            payments::PaymentResponse,
            payments::PaymentXdrResponse,
            contracts::ContractTxResponse,
            contracts::AnchoredDocumentResponse,
            contracts::RegisterProfileRequest,
            contracts::PostJobRequest,
            contracts::ApplyToJobRequest,
            contracts::VerifyDocumentOnChainRequest,
            contracts::ApplicationStatusRequest,
            crate::stellar::ApplicationAction,
            AccessRequest,
            AccessStatus,
            CreateAccessRequest,
            UpdateAccessRequest,
            Interview,
            CreateInterviewRequest,
            UpdateInterviewRequest,
            Feedback,
            CreateFeedbackRequest,
            UpdateFeedbackRequest,
            CandidateProfile,
            VerifyDocumentRequest,
            DocumentVerification
        )
    ),
    tags(
        (name = "Health", description = "Liveness and CLI reachability"),
        (name = "Contracts", description = "Soroban contract calls, through the Stellar CLI or signed by the wallet"),
        (name = "Uploads", description = "Local uploads and IPFS pinning"),
        (name = "Wallet", description = "Wallet provider session"),
        (name = "Payments", description = "Native payments signed by the connected wallet"),
        (name = "Access Requests", description = "Recruiter document access requests"),
        (name = "Interviews", description = "Interview scheduling"),
        (name = "Feedback", description = "Interview feedback"),
        (name = "Candidates", description = "Candidate search"),
        (name = "Documents", description = "Document verification")
    )
)]
pub struct ApiDoc;
