use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::SeatPosition;

/// Survey submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitResponseRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    pub q1: bool,
    pub q2: bool,
    pub q3: bool,
    pub q4: bool,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub q5: String,
}

/// Names are stored trimmed, so the length bound applies to the trimmed text
fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (1..=100).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

/// Toggle result publication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub published: bool,
}

/// Pin a participant to a table and seat
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeatOverrideRequest {
    #[serde(alias = "participant_id", rename = "participantId")]
    pub participant_id: uuid::Uuid,
    #[validate(range(min = 1, max = 1000))]
    #[serde(alias = "table_no", rename = "tableNo")]
    pub table_no: u32,
    pub position: SeatPosition,
}

/// Mark a participant as not attending (or attending again)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsentRequest {
    pub absent: bool,
}
