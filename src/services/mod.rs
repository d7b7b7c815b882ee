// Service exports
pub mod overrides;
pub mod postgres;
pub mod summarizer;

pub use overrides::apply_overrides;
pub use postgres::{PostgresClient, PostgresError};
pub use summarizer::{Summarizer, SummarizerError};
