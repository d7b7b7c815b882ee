// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Block, BlockType, NewParticipant, Occupant, Participant, Respondent, Seat, SeatOrigin,
    SeatOverride, SeatPosition, SeatingSnapshot, Table, TableLayout,
};
pub use requests::{AbsentRequest, PublishRequest, SeatOverrideRequest, SubmitResponseRequest};
pub use responses::{
    AssignmentsResponse, ErrorResponse, HealthResponse, MySeatResponse, PublishResponse,
    SubmitResponseResponse, Tablemate,
};
