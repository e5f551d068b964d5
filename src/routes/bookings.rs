use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::core::booking::{BackOutcome, BookingError, BookingWorkflow};
use crate::models::{
    BookingCancelledResponse, BookingCompletedResponse, BookingStateResponse, CreateBookingRequest,
    ErrorResponse, SelectFormatRequest, SelectSlotRequest, SubmitGoalRequest,
};
use crate::routes::AppState;

/// Configure booking workflow routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/bookings", web::post().to(create_booking))
        .route("/bookings/{id}", web::get().to(get_booking))
        .route("/bookings/{id}", web::delete().to(cancel_booking))
        .route("/bookings/{id}/format", web::post().to(select_format))
        .route("/bookings/{id}/goal", web::post().to(submit_goal))
        .route("/bookings/{id}/slot", web::post().to(select_slot))
        .route("/bookings/{id}/back", web::post().to(step_back));
}

/// Open a booking workflow for a mentor
///
/// POST /api/v1/bookings
async fn create_booking(
    state: web::Data<AppState>,
    req: web::Json<CreateBookingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let mentor = match state.catalog.get(&req.mentor_id) {
        Some(mentor) => mentor.clone(),
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "mentor_not_found".to_string(),
                message: format!("No mentor with id {}", req.mentor_id),
                status_code: 404,
            });
        }
    };

    let workflow = BookingWorkflow::open(mentor);
    let view = workflow.view();
    let id = state.sessions.create_booking(workflow).await;

    tracing::info!("Opened booking {} for mentor {}", id, req.mentor_id);

    HttpResponse::Ok().json(BookingStateResponse {
        booking_id: id.to_string(),
        view,
    })
}

/// Current booking state
async fn get_booking(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let view = session.lock().await.view();
    HttpResponse::Ok().json(BookingStateResponse {
        booking_id: id.to_string(),
        view,
    })
}

/// Abandon the booking without producing a request
async fn cancel_booking(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let (id, _session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    state.sessions.remove_booking(id).await;
    tracing::info!("Cancelled booking {}", id);
    HttpResponse::Ok().json(BookingCancelledResponse { cancelled: true })
}

/// First step: choose the meeting format, freezing the price
async fn select_format(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SelectFormatRequest>,
) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    match workflow.select_format(req.format) {
        Ok(()) => HttpResponse::Ok().json(BookingStateResponse {
            booking_id: id.to_string(),
            view: workflow.view(),
        }),
        Err(e) => booking_error(e),
    }
}

/// Second step: record the goal and the energy-exchange offer
async fn submit_goal(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SubmitGoalRequest>,
) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    match workflow.submit_goal(&req.goal, &req.exchange_offer) {
        Ok(()) => HttpResponse::Ok().json(BookingStateResponse {
            booking_id: id.to_string(),
            view: workflow.view(),
        }),
        Err(e) => booking_error(e),
    }
}

/// Final step: pick a slot, complete the booking and fire the
/// best-effort submission
///
/// The submission outcome is reported but never blocks completion.
async fn select_slot(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SelectSlotRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    let request = match workflow.select_slot(&req.slot) {
        Ok(request) => request,
        Err(e) => return booking_error(e),
    };
    let mentor = workflow.mentor().clone();
    drop(workflow);

    let outcome = state.submissions.submit_booking(&request, &mentor).await;

    // completed instances are discarded, success either way
    state.sessions.remove_booking(id).await;
    tracing::info!(
        "Completed booking {} for mentor {} at {} ({:?})",
        id,
        request.mentor_id,
        request.slot,
        outcome
    );

    HttpResponse::Ok().json(BookingCompletedResponse { request, outcome })
}

/// Backward transition; from the first step this cancels the workflow
async fn step_back(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    match workflow.back() {
        Ok(BackOutcome::Cancelled) => {
            drop(workflow);
            state.sessions.remove_booking(id).await;
            tracing::info!("Booking {} cancelled via back", id);
            HttpResponse::Ok().json(BookingCancelledResponse { cancelled: true })
        }
        Ok(BackOutcome::MovedTo(_)) => HttpResponse::Ok().json(BookingStateResponse {
            booking_id: id.to_string(),
            view: workflow.view(),
        }),
        Err(e) => booking_error(e),
    }
}

fn booking_error(err: BookingError) -> HttpResponse {
    match err {
        BookingError::StepMismatch { .. } => HttpResponse::Conflict().json(ErrorResponse {
            error: "invalid_transition".to_string(),
            message: err.to_string(),
            status_code: 409,
        }),
        BookingError::MissingField(_) | BookingError::UnknownSlot(_) => {
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "validation_failed".to_string(),
                message: err.to_string(),
                status_code: 400,
            })
        }
    }
}

async fn lookup(
    state: &web::Data<AppState>,
    raw_id: &str,
) -> Result<(Uuid, Arc<Mutex<BookingWorkflow>>), HttpResponse> {
    let id = Uuid::parse_str(raw_id).map_err(|_| not_found(raw_id))?;
    let session = state.sessions.booking(id).await.ok_or_else(|| not_found(raw_id))?;
    Ok((id, session))
}

fn not_found(raw_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "booking_not_found".to_string(),
        message: format!("Unknown booking id {}", raw_id),
        status_code: 404,
    })
}
