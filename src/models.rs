// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures for the recruitment resource endpoints.
//! All JSON is camelCase. Types derive `Serialize`, `Deserialize` and
//! `ToSchema` for request handling and the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Access requests**: a recruiter asking to see a candidate's documents
//! - **Interviews**: proposed or scheduled interviews
//! - **Feedback**: post-interview ratings
//! - **Candidates**: searchable candidate profiles
//! - **Documents**: verification results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// Access Requests
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessStatus {
    Pending,
    Granted,
    Denied,
    Expired,
}

impl AccessStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "granted" => Some(Self::Granted),
            "denied" => Some(Self::Denied),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Expired => "expired",
        }
    }
}

/// A recruiter's request to access a candidate's documents.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub id: String,
    pub candidate_id: String,
    pub recruiter_id: Option<String>,
    pub recruiter_name: Option<String>,
    pub company: Option<String>,
    /// Documents the recruiter wants to see.
    #[serde(default)]
    pub documents: Vec<String>,
    pub message: Option<String>,
    pub status: AccessStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// New access requests always start `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccessRequest {
    pub candidate_id: String,
    pub recruiter_id: Option<String>,
    pub recruiter_name: Option<String>,
    pub company: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub message: Option<String>,
}

/// Partial update. `status` is validated by hand so an unknown value
/// answers 400 "Invalid status".
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccessRequest {
    pub status: Option<String>,
    pub message: Option<String>,
    pub documents: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AccessRequestQuery {
    pub candidate_id: Option<String>,
    pub status: Option<String>,
}

// =============================================================================
// Interviews
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    pub candidate_id: String,
    pub recruiter_id: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    /// `proposed` on creation; free-form afterwards.
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    pub candidate_id: String,
    pub recruiter_id: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInterviewRequest {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InterviewQuery {
    pub candidate_id: Option<String>,
    pub recruiter_id: Option<String>,
}

// =============================================================================
// Feedback
// =============================================================================

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub candidate_id: String,
    pub interview_id: Option<String>,
    pub recruiter_id: Option<String>,
    /// 1 to 5.
    pub rating: u8,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub candidate_id: String,
    pub interview_id: Option<String>,
    pub recruiter_id: Option<String>,
    /// Any JSON number; only whole numbers from 1 to 5 are accepted.
    #[schema(value_type = i64)]
    pub rating: Number,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackRequest {
    #[schema(value_type = Option<i64>)]
    pub rating: Option<Number>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FeedbackQuery {
    pub candidate_id: Option<String>,
    pub interview_id: Option<String>,
}

// =============================================================================
// Candidates
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub location: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    /// Whether the candidate's documents have been verified on-chain.
    pub verified: bool,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CandidateSearchQuery {
    /// Case-insensitive substring of name or title
    pub q: Option<String>,
    /// Comma-separated; a candidate matches if it has any of them
    pub skills: Option<String>,
    /// Case-insensitive substring of location
    pub location: Option<String>,
}

// =============================================================================
// Documents
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDocumentRequest {
    pub document_id: Option<String>,
    pub ipfs_cid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVerification {
    pub document_id: Option<String>,
    pub verified: bool,
    pub verified_at: DateTime<Utc>,
    /// `0x`-prefixed hex when verified.
    pub blockchain_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_status_round_trips_as_lowercase() {
        for status in ["pending", "granted", "denied", "expired"] {
            let parsed = AccessStatus::parse(status).unwrap();
            assert_eq!(parsed.as_str(), status);
            assert_eq!(serde_json::to_value(parsed).unwrap(), json!(status));
        }
        assert_eq!(AccessStatus::parse("approved"), None);
    }

    #[test]
    fn create_request_uses_camel_case() {
        let request: CreateFeedbackRequest = serde_json::from_value(json!({
            "candidateId": "cand_1",
            "interviewId": "int_1",
            "rating": 4
        }))
        .unwrap();
        assert_eq!(request.candidate_id, "cand_1");
        assert_eq!(request.interview_id.as_deref(), Some("int_1"));
        assert_eq!(request.rating, serde_json::Number::from(4));
    }
}
