use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::core::filters::ALL;
use crate::models::{
    ErrorResponse, HealthResponse, MentorFilterQuery, MentorListResponse, RecommendRequest,
    RecommendResponse, RecommendationView, SessionCreatedResponse,
};
use crate::routes::AppState;
use crate::services::BrowseSession;

/// Configure catalog and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/mentors", web::get().to(list_mentors))
        .route("/mentors/{id}", web::get().to(get_mentor))
        .route("/match/sessions", web::post().to(create_match_session))
        .route(
            "/match/sessions/{id}/recommend",
            web::post().to(recommend),
        );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Filtered catalog endpoint
///
/// GET /api/v1/mentors?category=IT&city=Москва&q=команда
///
/// All three predicates are conjunctive; omitted parameters fall back
/// to the "show everything" sentinels. An empty result is a normal
/// response, not an error.
async fn list_mentors(
    state: web::Data<AppState>,
    query: web::Query<MentorFilterQuery>,
) -> impl Responder {
    let category = query.category.as_deref().unwrap_or(ALL);
    let city = query.city.as_deref().unwrap_or(ALL);
    let text = query.q.as_deref().unwrap_or("");

    let mentors: Vec<_> = state
        .catalog
        .filter(category, city, text)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        "Catalog filter category={} city={} q={} -> {} mentors",
        category,
        city,
        text,
        mentors.len()
    );

    let total = mentors.len();
    HttpResponse::Ok().json(MentorListResponse {
        mentors,
        industries: state.catalog.industries().to_vec(),
        cities: state.catalog.cities().to_vec(),
        total,
    })
}

/// Single mentor endpoint
async fn get_mentor(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match state.catalog.get(&id) {
        Some(mentor) => HttpResponse::Ok().json(mentor),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "mentor_not_found".to_string(),
            message: format!("No mentor with id {}", id),
            status_code: 404,
        }),
    }
}

/// Open a browsing session carrying the AI recommendation state
async fn create_match_session(state: web::Data<AppState>) -> impl Responder {
    let id = state.sessions.create_browse().await;
    HttpResponse::Ok().json(SessionCreatedResponse {
        session_id: id.to_string(),
    })
}

/// AI match recommendation endpoint
///
/// POST /api/v1/match/sessions/{id}/recommend
///
/// A failed external call, an unparsable reply or an id unknown to the
/// catalog all degrade to a null recommendation; the user is never
/// blocked on the model. A stale response (superseded by a newer query
/// in the same session) is discarded by the generation guard.
async fn recommend(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }
    if req.query.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "empty_query".to_string(),
            message: "Match query must not be blank".to_string(),
            status_code: 400,
        });
    }

    let session = match lookup_browse(&state, path.into_inner().as_str()).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    // claim a generation before suspending on the external call
    let generation = session.lock().await.next_generation();

    let result = state
        .recommender
        .recommend(&req.query, state.catalog.mentors())
        .await;

    let mut browse = session.lock().await;
    if !browse.is_current(generation) {
        tracing::debug!("Discarding stale match response for superseded query");
        return HttpResponse::Ok().json(RecommendResponse {
            recommendation: None,
        });
    }

    match result {
        Ok(suggestion) => match state.catalog.get(&suggestion.mentor_id) {
            Some(mentor) => {
                let view = RecommendationView {
                    mentor: mentor.clone(),
                    reason: suggestion.reason.clone(),
                };
                browse.recommendation = Some(suggestion);
                HttpResponse::Ok().json(RecommendResponse {
                    recommendation: Some(view),
                })
            }
            None => {
                tracing::warn!(
                    "Match returned unknown mentor id {}, treating as no recommendation",
                    suggestion.mentor_id
                );
                browse.recommendation = None;
                HttpResponse::Ok().json(RecommendResponse {
                    recommendation: None,
                })
            }
        },
        Err(e) => {
            tracing::info!("Match recommendation failed, degrading to none: {}", e);
            browse.recommendation = None;
            HttpResponse::Ok().json(RecommendResponse {
                recommendation: None,
            })
        }
    }
}

async fn lookup_browse(
    state: &web::Data<AppState>,
    raw_id: &str,
) -> Result<Arc<Mutex<BrowseSession>>, HttpResponse> {
    let id = Uuid::parse_str(raw_id).map_err(|_| {
        HttpResponse::NotFound().json(ErrorResponse {
            error: "session_not_found".to_string(),
            message: format!("Unknown session id {}", raw_id),
            status_code: 404,
        })
    })?;

    state.sessions.browse(id).await.ok_or_else(|| {
        HttpResponse::NotFound().json(ErrorResponse {
            error: "session_not_found".to_string(),
            message: format!("Unknown session id {}", id),
            status_code: 404,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
