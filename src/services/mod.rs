// Service exports
pub mod gemini;
pub mod sessions;
pub mod webhook;

pub use gemini::{GeminiClient, MatchError, MentorRecommender};
pub use sessions::{BrowseSession, SessionStore};
pub use webhook::{SubmissionClient, SubmissionOutcome};
