// Route exports
pub mod bookings;
pub mod mentors;
pub mod registrations;

use actix_web::web;
use std::sync::Arc;

use crate::core::MentorCatalog;
use crate::services::{MentorRecommender, SessionStore, SubmissionClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<MentorCatalog>,
    pub recommender: Arc<dyn MentorRecommender>,
    pub submissions: Arc<SubmissionClient>,
    pub sessions: Arc<SessionStore>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(mentors::configure)
            .configure(bookings::configure)
            .configure(registrations::configure),
    );
}
