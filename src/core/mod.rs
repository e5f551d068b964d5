// Core engine exports
pub mod booking;
pub mod catalog;
pub mod filters;
pub mod pricing;
pub mod registration;

pub use booking::{
    BackOutcome, BookingError, BookingStep, BookingView, BookingWorkflow, OFFERED_SLOTS,
};
pub use catalog::{CatalogError, MentorCatalog};
pub use filters::{matches_category, matches_city, matches_query, mentor_matches, ALL};
pub use registration::{
    AdvanceOutcome, EntrepreneurStep, ProfileUpdate, RegistrationError, RegistrationSubmission,
    RegistrationView, RegistrationWorkflow, YouthStep,
};
