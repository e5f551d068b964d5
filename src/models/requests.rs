use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{MeetingFormat, UserRole};

/// Catalog filter parameters
///
/// Missing parameters fall back to the "show everything" sentinels.
#[derive(Debug, Clone, Deserialize)]
pub struct MentorFilterQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Request for an AI match recommendation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    /// Free-text goal, e.g. "хочу в IT из маркетинга"
    #[validate(length(min = 1))]
    pub query: String,
}

/// Request to open a booking workflow for a mentor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "mentor_id", rename = "mentorId")]
    pub mentor_id: String,
}

/// Format choice for the first booking step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectFormatRequest {
    pub format: MeetingFormat,
}

/// Goal and energy-exchange offer for the second booking step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitGoalRequest {
    pub goal: String,
    #[serde(alias = "exchange_offer", rename = "exchangeOffer")]
    pub exchange_offer: String,
}

/// Slot choice for the final booking step
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectSlotRequest {
    #[validate(length(min = 1))]
    pub slot: String,
}

/// Request to open a registration workflow with an exclusive role choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub role: UserRole,
}

/// Partial field update for the active registration step
///
/// One flat shape serves both tracks; fields that do not belong to the
/// active track are ignored by the workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationFieldsRequest {
    pub name: Option<String>,
    #[serde(alias = "business_name", rename = "businessName")]
    pub business_name: Option<String>,
    pub revenue: Option<String>,
    pub city: Option<String>,
    pub industry: Option<String>,
    pub values: Option<String>,
    pub request: Option<String>,
    #[serde(alias = "video_declared", rename = "videoDeclared")]
    pub video_declared: Option<bool>,
    #[serde(alias = "hours_per_month", rename = "hoursPerMonth")]
    pub hours_per_month: Option<u8>,
    #[serde(alias = "birth_date", rename = "birthDate")]
    pub birth_date: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "main_focus", rename = "mainFocus")]
    pub main_focus: Option<String>,
    #[serde(alias = "meeting_goal", rename = "meetingGoal")]
    pub meeting_goal: Option<String>,
    #[serde(alias = "energy_exchange", rename = "energyExchange")]
    pub energy_exchange: Option<String>,
}

/// Schedule-step slot addition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSlotRequest {
    pub date: String,
    pub time: String,
}
