// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BookingRequest, EntrepreneurProfile, MatchSuggestion, MeetingFormat, Mentor, UserRole,
    YouthProfile,
};
pub use requests::{
    AddSlotRequest, CreateBookingRequest, CreateRegistrationRequest, MentorFilterQuery,
    RecommendRequest, RegistrationFieldsRequest, SelectFormatRequest, SelectSlotRequest,
    SubmitGoalRequest,
};
pub use responses::{
    BookingCancelledResponse, BookingCompletedResponse, BookingStateResponse, ErrorResponse,
    HealthResponse, MentorListResponse, RecommendResponse, RecommendationView,
    RegistrationStateResponse, RegistrationSubmittedResponse, SessionCreatedResponse,
};
