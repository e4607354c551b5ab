// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mock resource stores.
//!
//! Access requests, interviews and feedback live in process memory and are
//! lost on restart. Each entity sits behind [`Repository`] so a persistent
//! backend can replace the in-memory one without touching the handlers.

use chrono::Utc;
use serde_json::Number;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    AccessRequest, AccessRequestQuery, AccessStatus, CandidateProfile, CandidateSearchQuery,
    CreateAccessRequest, CreateFeedbackRequest, CreateInterviewRequest, Feedback, FeedbackQuery,
    Interview, InterviewQuery, UpdateAccessRequest, UpdateFeedbackRequest, UpdateInterviewRequest,
    MAX_RATING, MIN_RATING,
};

/// A stored entity with a prefixed string id.
pub trait Resource: Clone + Send + Sync + 'static {
    const ID_PREFIX: &'static str;
    /// Used in "<name> not found" messages.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

pub trait Repository<T: Resource>: Send + Sync {
    /// All items in insertion order.
    fn list(&self) -> Vec<T>;
    fn get(&self, id: &str) -> Option<T>;
    fn insert(&mut self, item: T) -> T;
    /// Apply `apply` to the item and return the updated copy.
    fn update(&mut self, id: &str, apply: &mut dyn FnMut(&mut T)) -> Option<T>;
    fn remove(&mut self, id: &str) -> Option<T>;
}

#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    items: Vec<T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Resource> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Vec<T> {
        self.items.clone()
    }

    fn get(&self, id: &str) -> Option<T> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    fn insert(&mut self, item: T) -> T {
        self.items.push(item.clone());
        item
    }

    fn update(&mut self, id: &str, apply: &mut dyn FnMut(&mut T)) -> Option<T> {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        apply(item);
        Some(item.clone())
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl Resource for AccessRequest {
    const ID_PREFIX: &'static str = "access";
    const NAME: &'static str = "Access request";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Interview {
    const ID_PREFIX: &'static str = "int";
    const NAME: &'static str = "Interview";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Feedback {
    const ID_PREFIX: &'static str = "fb";
    const NAME: &'static str = "Feedback";

    fn id(&self) -> &str {
        &self.id
    }
}

fn new_id<T: Resource>() -> String {
    format!("{}_{}", T::ID_PREFIX, Uuid::new_v4())
}

fn not_found<T: Resource>() -> ApiError {
    ApiError::not_found(format!("{} not found", T::NAME))
}

fn matches(filter: &Option<String>, value: &str) -> bool {
    filter.as_deref().is_none_or(|f| f.is_empty() || f == value)
}

/// Negative, fractional and oversized numbers all fail the same way.
fn validate_rating(rating: &Number) -> Result<u8, ApiError> {
    rating
        .as_u64()
        .and_then(|r| u8::try_from(r).ok())
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or_else(|| {
            ApiError::bad_request(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            ))
        })
}

pub struct InMemoryStore {
    access_requests: Box<dyn Repository<AccessRequest>>,
    interviews: Box<dyn Repository<Interview>>,
    feedback: Box<dyn Repository<Feedback>>,
    candidates: Vec<CandidateProfile>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Empty resource stores and the seeded candidate directory.
    pub fn new() -> Self {
        Self::with_candidates(seed_candidates())
    }

    pub fn with_candidates(candidates: Vec<CandidateProfile>) -> Self {
        Self {
            access_requests: Box::new(InMemoryRepository::default()),
            interviews: Box::new(InMemoryRepository::default()),
            feedback: Box::new(InMemoryRepository::default()),
            candidates,
        }
    }

    // -------------------------------------------------------------------------
    // Access requests
    // -------------------------------------------------------------------------

    pub fn list_access_requests(&self, query: &AccessRequestQuery) -> Vec<AccessRequest> {
        self.access_requests
            .list()
            .into_iter()
            .filter(|r| matches(&query.candidate_id, &r.candidate_id))
            .filter(|r| matches(&query.status, r.status.as_str()))
            .collect()
    }

    pub fn create_access_request(&mut self, request: CreateAccessRequest) -> AccessRequest {
        self.access_requests.insert(AccessRequest {
            id: new_id::<AccessRequest>(),
            candidate_id: request.candidate_id,
            recruiter_id: request.recruiter_id,
            recruiter_name: request.recruiter_name,
            company: request.company,
            documents: request.documents,
            message: request.message,
            status: AccessStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    pub fn get_access_request(&self, id: &str) -> Result<AccessRequest, ApiError> {
        self.access_requests
            .get(id)
            .ok_or_else(not_found::<AccessRequest>)
    }

    pub fn update_access_request(
        &mut self,
        id: &str,
        patch: UpdateAccessRequest,
    ) -> Result<AccessRequest, ApiError> {
        self.get_access_request(id)?;
        let status = patch
            .status
            .as_deref()
            .map(|s| AccessStatus::parse(s).ok_or_else(|| ApiError::bad_request("Invalid status")))
            .transpose()?;

        let mut patch = Some(patch);
        self.access_requests
            .update(id, &mut |request: &mut AccessRequest| {
                let Some(patch) = patch.take() else { return };
                if let Some(status) = status {
                    request.status = status;
                }
                if patch.message.is_some() {
                    request.message = patch.message;
                }
                if let Some(documents) = patch.documents {
                    request.documents = documents;
                }
                request.updated_at = Some(Utc::now());
            })
            .ok_or_else(not_found::<AccessRequest>)
    }

    pub fn delete_access_request(&mut self, id: &str) -> Result<AccessRequest, ApiError> {
        self.access_requests
            .remove(id)
            .ok_or_else(not_found::<AccessRequest>)
    }

    // -------------------------------------------------------------------------
    // Interviews
    // -------------------------------------------------------------------------

    pub fn list_interviews(&self, query: &InterviewQuery) -> Vec<Interview> {
        self.interviews
            .list()
            .into_iter()
            .filter(|i| matches(&query.candidate_id, &i.candidate_id))
            .filter(|i| matches(&query.recruiter_id, &i.recruiter_id))
            .collect()
    }

    pub fn create_interview(&mut self, request: CreateInterviewRequest) -> Interview {
        self.interviews.insert(Interview {
            id: new_id::<Interview>(),
            candidate_id: request.candidate_id,
            recruiter_id: request.recruiter_id,
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            meeting_link: request.meeting_link,
            notes: request.notes,
            status: "proposed".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    pub fn get_interview(&self, id: &str) -> Result<Interview, ApiError> {
        self.interviews.get(id).ok_or_else(not_found::<Interview>)
    }

    pub fn update_interview(
        &mut self,
        id: &str,
        patch: UpdateInterviewRequest,
    ) -> Result<Interview, ApiError> {
        let mut patch = Some(patch);
        self.interviews
            .update(id, &mut |interview: &mut Interview| {
                let Some(patch) = patch.take() else { return };
                if patch.scheduled_at.is_some() {
                    interview.scheduled_at = patch.scheduled_at;
                }
                if patch.duration_minutes.is_some() {
                    interview.duration_minutes = patch.duration_minutes;
                }
                if patch.meeting_link.is_some() {
                    interview.meeting_link = patch.meeting_link;
                }
                if patch.notes.is_some() {
                    interview.notes = patch.notes;
                }
                if let Some(status) = patch.status {
                    interview.status = status;
                }
                interview.updated_at = Some(Utc::now());
            })
            .ok_or_else(not_found::<Interview>)
    }

    pub fn delete_interview(&mut self, id: &str) -> Result<Interview, ApiError> {
        self.interviews.remove(id).ok_or_else(not_found::<Interview>)
    }

    // -------------------------------------------------------------------------
    // Feedback
    // -------------------------------------------------------------------------

    pub fn list_feedback(&self, query: &FeedbackQuery) -> Vec<Feedback> {
        self.feedback
            .list()
            .into_iter()
            .filter(|f| matches(&query.candidate_id, &f.candidate_id))
            .filter(|f| {
                query.interview_id.as_deref().is_none_or(|wanted| {
                    wanted.is_empty() || f.interview_id.as_deref() == Some(wanted)
                })
            })
            .collect()
    }

    pub fn create_feedback(&mut self, request: CreateFeedbackRequest) -> Result<Feedback, ApiError> {
        let rating = validate_rating(&request.rating)?;
        Ok(self.feedback.insert(Feedback {
            id: new_id::<Feedback>(),
            candidate_id: request.candidate_id,
            interview_id: request.interview_id,
            recruiter_id: request.recruiter_id,
            rating,
            comments: request.comments,
            created_at: Utc::now(),
            updated_at: None,
        }))
    }

    pub fn get_feedback(&self, id: &str) -> Result<Feedback, ApiError> {
        self.feedback.get(id).ok_or_else(not_found::<Feedback>)
    }

    pub fn update_feedback(
        &mut self,
        id: &str,
        patch: UpdateFeedbackRequest,
    ) -> Result<Feedback, ApiError> {
        self.get_feedback(id)?;
        let rating = patch.rating.as_ref().map(validate_rating).transpose()?;

        let mut comments = Some(patch.comments);
        self.feedback
            .update(id, &mut |feedback: &mut Feedback| {
                if let Some(rating) = rating {
                    feedback.rating = rating;
                }
                if let Some(Some(text)) = comments.take() {
                    feedback.comments = Some(text);
                }
                feedback.updated_at = Some(Utc::now());
            })
            .ok_or_else(not_found::<Feedback>)
    }

    pub fn delete_feedback(&mut self, id: &str) -> Result<Feedback, ApiError> {
        self.feedback.remove(id).ok_or_else(not_found::<Feedback>)
    }

    // -------------------------------------------------------------------------
    // Candidates
    // -------------------------------------------------------------------------

    pub fn search_candidates(&self, query: &CandidateSearchQuery) -> Vec<CandidateProfile> {
        let text = query
            .q
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        let skills: Vec<&str> = query
            .skills
            .as_deref()
            .map(|s| s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let location = query
            .location
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        self.candidates
            .iter()
            .filter(|c| {
                text.is_empty()
                    || c.name.to_lowercase().contains(&text)
                    || c.title.to_lowercase().contains(&text)
            })
            .filter(|c| skills.is_empty() || skills.iter().any(|s| c.skills.iter().any(|k| k == s)))
            .filter(|c| location.is_empty() || c.location.to_lowercase().contains(&location))
            .cloned()
            .collect()
    }
}

fn candidate(
    id: &str,
    name: &str,
    title: &str,
    location: &str,
    skills: &[&str],
    experience_years: u32,
    verified: bool,
) -> CandidateProfile {
    CandidateProfile {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience_years,
        verified,
    }
}

fn seed_candidates() -> Vec<CandidateProfile> {
    vec![
        candidate(
            "cand_1",
            "Sarah Chen",
            "Senior Blockchain Developer",
            "San Francisco, CA",
            &["Rust", "Solidity", "Soroban", "TypeScript"],
            7,
            true,
        ),
        candidate(
            "cand_2",
            "Marcus Johnson",
            "Full Stack Engineer",
            "Austin, TX",
            &["React", "Node.js", "TypeScript", "PostgreSQL"],
            5,
            true,
        ),
        candidate(
            "cand_3",
            "Aisha Patel",
            "Smart Contract Auditor",
            "London, UK",
            &["Solidity", "Rust", "Security"],
            6,
            false,
        ),
        candidate(
            "cand_4",
            "Diego Alvarez",
            "Frontend Developer",
            "Remote",
            &["React", "Next.js", "Tailwind"],
            3,
            false,
        ),
    ]
}
