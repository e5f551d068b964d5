//! STEP Algo - Matching and booking service for the STEP mentorship platform
//!
//! This library provides the engine behind the STEP web app: the mentor
//! catalog with its multi-criteria filter, the AI-assisted match
//! recommendation, the pricing calculator, and the booking and
//! registration workflow state machines.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    booking::{BookingStep, BookingWorkflow, OFFERED_SLOTS},
    catalog::MentorCatalog,
    pricing,
    registration::RegistrationWorkflow,
};
pub use crate::models::{BookingRequest, MatchSuggestion, MeetingFormat, Mentor, UserRole};
pub use crate::services::{MentorRecommender, SubmissionOutcome};
