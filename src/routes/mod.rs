// Route exports
pub mod admin;
pub mod seats;

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use crate::core::SeatPlanner;
use crate::models::{ErrorResponse, Participant, SeatingSnapshot, TableLayout};
use crate::services::{apply_overrides, PostgresClient, PostgresError, Summarizer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub summarizer: Arc<Summarizer>,
    pub planner: SeatPlanner,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(seats::configure)
            .configure(admin::configure),
    );
}

/// Compute the current seating plan from a fresh snapshot
///
/// Reads participants and overrides in one transaction, matches the
/// attending ones, then applies stored overrides on top of the layout.
pub(crate) async fn current_layout(
    state: &AppState,
) -> Result<(TableLayout, Vec<Participant>), PostgresError> {
    let snapshot = state.postgres.seating_snapshot().await?;
    let respondents = snapshot.respondents();

    let layout = state.planner.layout(&respondents);
    let layout = apply_overrides(layout, &snapshot.overrides, &snapshot.participants, &state.planner);

    tracing::debug!(
        "Computed {} tables for {} respondents ({} overrides)",
        layout.tables.len(),
        respondents.len(),
        snapshot.overrides.len()
    );

    Ok((layout, snapshot.participants))
}

pub(crate) fn storage_error(context: &str, e: PostgresError) -> HttpResponse {
    match e {
        PostgresError::NotFound(what) => {
            HttpResponse::NotFound().json(ErrorResponse::new("not_found", what, 404))
        }
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(context, other.to_string(), 500))
        }
    }
}
