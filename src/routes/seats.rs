use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, HealthResponse, MySeatResponse, NewParticipant, SubmitResponseRequest,
    SubmitResponseResponse, Tablemate,
};
use crate::routes::{current_layout, storage_error, AppState};

/// Configure participant-facing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/responses", web::post().to(submit_response))
        .route("/seats/{id}", web::get().to(find_my_seat));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Submit a survey response
///
/// POST /api/v1/responses
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "q1": true, "q2": false, "q3": true, "q4": false,
///   "q5": "free text"
/// }
/// ```
async fn submit_response(
    state: web::Data<AppState>,
    req: web::Json<SubmitResponseRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for submit_response: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let req = req.into_inner();
    let q5_short = state
        .summarizer
        .summarize(&req.q5, state.planner.summary_chars())
        .await;

    let new = NewParticipant {
        name: req.name.trim().to_string(),
        q1: req.q1,
        q2: req.q2,
        q3: req.q3,
        q4: req.q4,
        q5: req.q5,
        q5_short: Some(q5_short),
    };

    match state.postgres.insert_participant(&new).await {
        Ok(participant) => {
            tracing::info!("Stored response from {}", participant.id);
            HttpResponse::Created().json(SubmitResponseResponse {
                id: participant.id.to_string(),
                name: participant.name,
                q5_short: participant.q5_short.unwrap_or_default(),
            })
        }
        Err(e) => storage_error("Failed to store response", e),
    }
}

/// Find my seat
///
/// GET /api/v1/seats/{id}
///
/// Only answers while results are published. The plan is recomputed
/// from current data on every call.
async fn find_my_seat(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let participant = match state.postgres.get_participant(id).await {
        Ok(p) => p,
        Err(e) => return storage_error("Failed to fetch participant", e),
    };

    match state.postgres.is_published().await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Forbidden().json(ErrorResponse::new(
                "not_published",
                "Seat assignments have not been published yet",
                403,
            ));
        }
        Err(e) => return storage_error("Failed to read publish flag", e),
    }

    if participant.absent {
        return not_seated(&participant.name);
    }

    let (layout, _) = match current_layout(&state).await {
        Ok(result) => result,
        Err(e) => return storage_error("Failed to compute assignments", e),
    };

    let id = id.to_string();
    let Some((table, position)) = layout.find_seat(&id) else {
        return not_seated(&participant.name);
    };

    let tablemates = table
        .seats
        .iter()
        .filter_map(|seat| {
            let occupant = seat.occupant.as_ref()?;
            (occupant.id != id).then(|| Tablemate {
                name: occupant.name.clone(),
                position: seat.position,
                summary: occupant.summary.clone(),
            })
        })
        .collect();

    HttpResponse::Ok().json(MySeatResponse {
        id,
        name: participant.name,
        table_no: table.table_no,
        position,
        tablemates,
    })
}

fn not_seated(name: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_seated",
        format!("{} has no seat assignment", name),
        404,
    ))
}
