use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::registration::{
    AdvanceOutcome, ProfileUpdate, RegistrationError, RegistrationSubmission, RegistrationWorkflow,
};
use crate::models::{
    AddSlotRequest, CreateRegistrationRequest, ErrorResponse, RegistrationFieldsRequest,
    RegistrationStateResponse, RegistrationSubmittedResponse,
};
use crate::routes::AppState;

/// Configure registration workflow routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/registrations", web::post().to(create_registration))
        .route("/registrations/{id}", web::get().to(get_registration))
        .route("/registrations/{id}/fields", web::post().to(apply_fields))
        .route("/registrations/{id}/advance", web::post().to(advance))
        .route("/registrations/{id}/back", web::post().to(step_back))
        .route("/registrations/{id}/slots", web::post().to(add_slot))
        .route(
            "/registrations/{id}/slots/{index}",
            web::delete().to(remove_slot),
        )
        .route(
            "/registrations/{id}/acknowledge",
            web::post().to(acknowledge_moderation),
        );
}

/// Open a registration workflow with an exclusive role choice
///
/// POST /api/v1/registrations
async fn create_registration(
    state: web::Data<AppState>,
    req: web::Json<CreateRegistrationRequest>,
) -> impl Responder {
    let mut workflow = RegistrationWorkflow::new();
    if let Err(e) = workflow.choose_role(req.role) {
        return registration_error(e);
    }

    let view = workflow.view();
    let id = state.sessions.create_registration(workflow).await;

    tracing::info!("Opened registration {} as {:?}", id, req.role);

    HttpResponse::Ok().json(RegistrationStateResponse {
        registration_id: id.to_string(),
        view,
    })
}

/// Current registration state
async fn get_registration(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let view = session.lock().await.view();
    HttpResponse::Ok().json(RegistrationStateResponse {
        registration_id: id.to_string(),
        view,
    })
}

/// Merge field updates into the active step's profile
async fn apply_fields(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RegistrationFieldsRequest>,
) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let update = to_update(req.into_inner());
    let mut workflow = session.lock().await;
    match workflow.apply_fields(update) {
        Ok(()) => HttpResponse::Ok().json(RegistrationStateResponse {
            registration_id: id.to_string(),
            view: workflow.view(),
        }),
        Err(e) => registration_error(e),
    }
}

/// Step forward; from the final step this submits the registration
///
/// Submission is the same best-effort webhook write as bookings: the
/// outcome is reported, the user proceeds either way.
async fn advance(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    match workflow.advance() {
        Ok(AdvanceOutcome::Moved) => HttpResponse::Ok().json(RegistrationStateResponse {
            registration_id: id.to_string(),
            view: workflow.view(),
        }),
        Ok(AdvanceOutcome::Submitted(submission)) => {
            let view = workflow.view();
            drop(workflow);

            let outcome = match &submission {
                RegistrationSubmission::Entrepreneur(profile) => {
                    state.submissions.submit_entrepreneur(profile).await
                }
                RegistrationSubmission::Youth(profile) => {
                    state.submissions.submit_youth(profile).await
                }
            };

            tracing::info!("Registration {} submitted ({:?})", id, outcome);

            HttpResponse::Ok().json(RegistrationSubmittedResponse {
                registration_id: id.to_string(),
                outcome,
                view,
            })
        }
        Err(e) => registration_error(e),
    }
}

/// Backward transition; from the first step this clears the role choice
/// and every collected field
async fn step_back(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    match workflow.back() {
        Ok(()) => HttpResponse::Ok().json(RegistrationStateResponse {
            registration_id: id.to_string(),
            view: workflow.view(),
        }),
        Err(e) => registration_error(e),
    }
}

/// Declare an offered slot on the Schedule step
///
/// Blank parts and duplicates are silent no-ops, mirroring the disabled
/// add button in the UI.
async fn add_slot(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AddSlotRequest>,
) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    match workflow.add_slot(&req.date, &req.time) {
        Ok(added) => {
            if !added {
                tracing::debug!("Ignored blank or duplicate slot on registration {}", id);
            }
            HttpResponse::Ok().json(RegistrationStateResponse {
                registration_id: id.to_string(),
                view: workflow.view(),
            })
        }
        Err(e) => registration_error(e),
    }
}

/// Remove a declared slot by position
async fn remove_slot(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
) -> impl Responder {
    let (raw_id, index) = path.into_inner();
    let (id, session) = match lookup(&state, &raw_id).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    match workflow.remove_slot(index) {
        Ok(_) => HttpResponse::Ok().json(RegistrationStateResponse {
            registration_id: id.to_string(),
            view: workflow.view(),
        }),
        Err(e) => registration_error(e),
    }
}

/// Dismiss the moderation-pending notice, unlocking the catalog
async fn acknowledge_moderation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let (id, session) = match lookup(&state, path.into_inner().as_str()).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let mut workflow = session.lock().await;
    match workflow.acknowledge_moderation() {
        Ok(()) => HttpResponse::Ok().json(RegistrationStateResponse {
            registration_id: id.to_string(),
            view: workflow.view(),
        }),
        Err(e) => registration_error(e),
    }
}

fn to_update(req: RegistrationFieldsRequest) -> ProfileUpdate {
    ProfileUpdate {
        name: req.name,
        business_name: req.business_name,
        revenue: req.revenue,
        city: req.city,
        industry: req.industry,
        values: req.values,
        request: req.request,
        video_declared: req.video_declared,
        hours_per_month: req.hours_per_month,
        birth_date: req.birth_date,
        phone: req.phone,
        email: req.email,
        main_focus: req.main_focus,
        meeting_goal: req.meeting_goal,
        energy_exchange: req.energy_exchange,
    }
}

fn registration_error(err: RegistrationError) -> HttpResponse {
    match err {
        RegistrationError::MissingField(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: err.to_string(),
            status_code: 400,
        }),
        RegistrationError::RoleAlreadyChosen
        | RegistrationError::RoleNotChosen
        | RegistrationError::AlreadySubmitted
        | RegistrationError::StepMismatch { .. } => {
            HttpResponse::Conflict().json(ErrorResponse {
                error: "invalid_transition".to_string(),
                message: err.to_string(),
                status_code: 409,
            })
        }
    }
}

async fn lookup(
    state: &web::Data<AppState>,
    raw_id: &str,
) -> Result<(Uuid, Arc<Mutex<RegistrationWorkflow>>), HttpResponse> {
    let id = Uuid::parse_str(raw_id).map_err(|_| not_found(raw_id))?;
    let session = state
        .sessions
        .registration(id)
        .await
        .ok_or_else(|| not_found(raw_id))?;
    Ok((id, session))
}

fn not_found(raw_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "registration_not_found".to_string(),
        message: format!("Unknown registration id {}", raw_id),
        status_code: 404,
    })
}
