use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    AbsentRequest, AssignmentsResponse, ErrorResponse, PublishRequest, PublishResponse,
    SeatOverrideRequest, SubmitResponseResponse,
};
use crate::routes::{current_layout, storage_error, AppState};

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/assignments", web::get().to(list_assignments))
            .route("/publish", web::get().to(get_publish))
            .route("/publish", web::post().to(set_publish))
            .route("/overrides", web::put().to(set_override))
            .route("/overrides/{participant_id}", web::delete().to(remove_override))
            .route("/participants/{id}/absent", web::put().to(set_absent))
            .route("/participants/{id}/summary", web::post().to(refresh_summary))
            .route("/participants/{id}", web::delete().to(delete_participant)),
    );
}

/// Full seating plan, regardless of the publish flag
///
/// GET /api/v1/admin/assignments
async fn list_assignments(state: web::Data<AppState>) -> impl Responder {
    let published = match state.postgres.is_published().await {
        Ok(p) => p,
        Err(e) => return storage_error("Failed to read publish flag", e),
    };

    match current_layout(&state).await {
        Ok((layout, participants)) => {
            tracing::info!(
                "Returning {} tables ({} participants)",
                layout.tables.len(),
                participants.len()
            );
            HttpResponse::Ok().json(AssignmentsResponse {
                published,
                tables: layout.tables,
                id_to_table: layout.id_to_table,
                total_participants: participants.len(),
            })
        }
        Err(e) => storage_error("Failed to compute assignments", e),
    }
}

/// GET /api/v1/admin/publish
async fn get_publish(state: web::Data<AppState>) -> impl Responder {
    match state.postgres.is_published().await {
        Ok(published) => HttpResponse::Ok().json(PublishResponse { published }),
        Err(e) => storage_error("Failed to read publish flag", e),
    }
}

/// POST /api/v1/admin/publish
///
/// Request body: `{ "published": true }`
async fn set_publish(
    state: web::Data<AppState>,
    req: web::Json<PublishRequest>,
) -> impl Responder {
    match state.postgres.set_published(req.published).await {
        Ok(()) => HttpResponse::Ok().json(PublishResponse {
            published: req.published,
        }),
        Err(e) => storage_error("Failed to update publish flag", e),
    }
}

/// Pin a participant to a seat
///
/// PUT /api/v1/admin/overrides
///
/// Request body:
/// ```json
/// {
///   "participantId": "uuid",
///   "tableNo": 2,
///   "position": "topLeft|topRight|bottomLeft|bottomRight"
/// }
/// ```
async fn set_override(
    state: web::Data<AppState>,
    req: web::Json<SeatOverrideRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    if let Err(e) = state.postgres.get_participant(req.participant_id).await {
        return storage_error("Failed to fetch participant", e);
    }

    match state
        .postgres
        .upsert_override(req.participant_id, req.table_no, req.position)
        .await
    {
        Ok(()) => {
            tracing::info!(
                "Override set: {} -> table {} {}",
                req.participant_id,
                req.table_no,
                req.position.as_str()
            );
            HttpResponse::Ok().json(req.into_inner())
        }
        Err(e) => storage_error("Failed to store override", e),
    }
}

/// DELETE /api/v1/admin/overrides/{participant_id}
async fn remove_override(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
) -> impl Responder {
    let participant_id = path.into_inner();

    match state.postgres.remove_override(participant_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("No override for participant {}", participant_id),
            404,
        )),
        Err(e) => storage_error("Failed to remove override", e),
    }
}

/// Mark a participant as not attending
///
/// PUT /api/v1/admin/participants/{id}/absent
///
/// Request body: `{ "absent": true }`
async fn set_absent(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<AbsentRequest>,
) -> impl Responder {
    let id = path.into_inner();

    match state.postgres.set_absent(id, req.absent).await {
        Ok(true) => {
            tracing::info!("Participant {} absent={}", id, req.absent);
            HttpResponse::Ok().json(serde_json::json!({
                "id": id,
                "absent": req.absent,
            }))
        }
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("participant {}", id),
            404,
        )),
        Err(e) => storage_error("Failed to update participant", e),
    }
}

/// Re-run summarization for one participant's free-text answer
///
/// POST /api/v1/admin/participants/{id}/summary
async fn refresh_summary(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let participant = match state.postgres.get_participant(id).await {
        Ok(p) => p,
        Err(e) => return storage_error("Failed to fetch participant", e),
    };

    let q5_short = state
        .summarizer
        .summarize(&participant.q5, state.planner.summary_chars())
        .await;

    match state.postgres.update_summary(id, &q5_short).await {
        Ok(_) => HttpResponse::Ok().json(SubmitResponseResponse {
            id: id.to_string(),
            name: participant.name,
            q5_short,
        }),
        Err(e) => storage_error("Failed to update summary", e),
    }
}

/// DELETE /api/v1/admin/participants/{id}
async fn delete_participant(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    match state.postgres.delete_participant(id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("participant {}", id),
            404,
        )),
        Err(e) => storage_error("Failed to delete participant", e),
    }
}
