use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::models::domain::{SeatPosition, Table};

/// Full seating plan for the admin view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentsResponse {
    pub published: bool,
    pub tables: Vec<Table>,
    #[serde(rename = "idToTable")]
    pub id_to_table: HashMap<String, u32>,
    #[serde(rename = "totalParticipants")]
    pub total_participants: usize,
}

/// Someone sharing the caller's table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tablemate {
    pub name: String,
    pub position: SeatPosition,
    pub summary: String,
}

/// Participant-facing "find my seat" result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MySeatResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "tableNo")]
    pub table_no: u32,
    pub position: SeatPosition,
    pub tablemates: Vec<Tablemate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "q5Short")]
    pub q5_short: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    pub published: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}
