use serde::{Deserialize, Serialize};

use crate::core::booking::BookingView;
use crate::core::registration::RegistrationView;
use crate::models::domain::{BookingRequest, Mentor};
use crate::services::webhook::SubmissionOutcome;

/// Response for the filtered catalog endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MentorListResponse {
    pub mentors: Vec<Mentor>,
    pub industries: Vec<String>,
    pub cities: Vec<String>,
    pub total: usize,
}

/// A validated AI recommendation, resolved against the catalog
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub mentor: Mentor,
    pub reason: String,
}

/// Response for the recommendation endpoint
///
/// `recommendation` is null whenever the external call failed, the
/// reply did not parse, the returned id is unknown, or a newer query
/// superseded this one — all deliberately indistinguishable for the
/// user.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub recommendation: Option<RecommendationView>,
}

/// Response after opening any workflow session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Current booking workflow state
#[derive(Debug, Clone, Serialize)]
pub struct BookingStateResponse {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
    #[serde(flatten)]
    pub view: BookingView,
}

/// Response for a completed booking
#[derive(Debug, Clone, Serialize)]
pub struct BookingCompletedResponse {
    pub request: BookingRequest,
    pub outcome: SubmissionOutcome,
}

/// Response after cancelling a booking via back from the first step
#[derive(Debug, Clone, Serialize)]
pub struct BookingCancelledResponse {
    pub cancelled: bool,
}

/// Current registration workflow state
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationStateResponse {
    #[serde(rename = "registrationId")]
    pub registration_id: String,
    #[serde(flatten)]
    pub view: RegistrationView,
}

/// Registration state plus the submission outcome of the final step
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSubmittedResponse {
    #[serde(rename = "registrationId")]
    pub registration_id: String,
    pub outcome: SubmissionOutcome,
    #[serde(flatten)]
    pub view: RegistrationView,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
