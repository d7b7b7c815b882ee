use sqlx::postgres::{PgExecutor, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;
use crate::models::{NewParticipant, Participant, SeatOverride, SeatPosition, SeatingSnapshot};

const PUBLISHED_KEY: &str = "published";

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid stored value: {0}")]
    InvalidData(String),
}

/// PostgreSQL client holding participants, seat overrides and the publish flag
///
/// The matching core never touches this client; request handlers read a
/// snapshot from it and feed the core plain values.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Store a new survey response
    pub async fn insert_participant(&self, new: &NewParticipant) -> Result<Participant, PostgresError> {
        let query = r#"
            INSERT INTO participants (id, name, q1, q2, q3, q4, q5, q5_short, absent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, NOW())
            RETURNING id, name, q1, q2, q3, q4, q5, q5_short, absent, created_at
        "#;

        let row = sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(&new.name)
            .bind(new.q1)
            .bind(new.q2)
            .bind(new.q3)
            .bind(new.q4)
            .bind(&new.q5)
            .bind(&new.q5_short)
            .fetch_one(&self.pool)
            .await?;

        let participant = participant_from_row(&row);
        tracing::debug!("Stored participant {} ({})", participant.id, participant.name);

        Ok(participant)
    }

    /// Fetch one participant by id
    pub async fn get_participant(&self, id: Uuid) -> Result<Participant, PostgresError> {
        let query = r#"
            SELECT id, name, q1, q2, q3, q4, q5, q5_short, absent, created_at
            FROM participants
            WHERE id = $1
        "#;

        sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| participant_from_row(&row))
            .ok_or_else(|| PostgresError::NotFound(format!("participant {}", id)))
    }

    /// All participants in registration order, absentees included
    pub async fn list_participants(&self) -> Result<Vec<Participant>, PostgresError> {
        fetch_participants(&self.pool).await
    }

    /// Participants and overrides read in one `REPEATABLE READ` transaction
    ///
    /// This is the snapshot the seating plan is computed from, so an
    /// override never outlives the participant it points at.
    pub async fn seating_snapshot(&self) -> Result<SeatingSnapshot, PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let participants = fetch_participants(&mut *tx).await?;
        let overrides = fetch_overrides(&mut *tx).await?;

        tx.commit().await?;

        tracing::debug!(
            "Loaded snapshot: {} participants, {} overrides",
            participants.len(),
            overrides.len()
        );

        Ok(SeatingSnapshot { participants, overrides })
    }

    /// Mark a participant absent or present; returns false if no such participant
    pub async fn set_absent(&self, id: Uuid, absent: bool) -> Result<bool, PostgresError> {
        let result = sqlx::query("UPDATE participants SET absent = $2 WHERE id = $1")
            .bind(id)
            .bind(absent)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored short summary for a participant
    pub async fn update_summary(&self, id: Uuid, q5_short: &str) -> Result<bool, PostgresError> {
        let result = sqlx::query("UPDATE participants SET q5_short = $2 WHERE id = $1")
            .bind(id)
            .bind(q5_short)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a participant (their seat override goes with them)
    pub async fn delete_participant(&self, id: Uuid) -> Result<bool, PostgresError> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!("Deleted participant {}", id);
        }

        Ok(result.rows_affected() > 0)
    }

    /// Pin a participant to a table and seat
    ///
    /// Uses INSERT ... ON CONFLICT so a participant holds at most one override.
    pub async fn upsert_override(
        &self,
        participant_id: Uuid,
        table_no: u32,
        position: SeatPosition,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO seat_overrides (participant_id, table_no, position, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (participant_id)
            DO UPDATE SET
                table_no = EXCLUDED.table_no,
                position = EXCLUDED.position,
                updated_at = EXCLUDED.updated_at
        "#;

        sqlx::query(query)
            .bind(participant_id)
            .bind(table_no as i32)
            .bind(position.as_str())
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded seat override: {} -> table {} {}",
            participant_id,
            table_no,
            position.as_str()
        );

        Ok(())
    }

    /// All seat overrides, oldest first
    pub async fn list_overrides(&self) -> Result<Vec<SeatOverride>, PostgresError> {
        fetch_overrides(&self.pool).await
    }

    /// Remove a participant's seat override
    pub async fn remove_override(&self, participant_id: Uuid) -> Result<bool, PostgresError> {
        let result = sqlx::query("DELETE FROM seat_overrides WHERE participant_id = $1")
            .bind(participant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether seat results may be shown to participants (false when never set)
    pub async fn is_published(&self) -> Result<bool, PostgresError> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM app_settings WHERE key = $1")
            .bind(PUBLISHED_KEY)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value.as_deref() == Some("true"))
    }

    pub async fn set_published(&self, published: bool) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO app_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key)
            DO UPDATE SET value = EXCLUDED.value
        "#;

        sqlx::query(query)
            .bind(PUBLISHED_KEY)
            .bind(published.to_string())
            .execute(&self.pool)
            .await?;

        tracing::info!("Seat results {}", if published { "published" } else { "unpublished" });

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

async fn fetch_participants<'e, E>(executor: E) -> Result<Vec<Participant>, PostgresError>
where
    E: PgExecutor<'e>,
{
    let query = r#"
        SELECT id, name, q1, q2, q3, q4, q5, q5_short, absent, created_at
        FROM participants
        ORDER BY created_at, id
    "#;

    let rows = sqlx::query(query).fetch_all(executor).await?;

    Ok(rows.iter().map(participant_from_row).collect())
}

async fn fetch_overrides<'e, E>(executor: E) -> Result<Vec<SeatOverride>, PostgresError>
where
    E: PgExecutor<'e>,
{
    let query = r#"
        SELECT participant_id, table_no, position, updated_at
        FROM seat_overrides
        ORDER BY updated_at, participant_id
    "#;

    let rows = sqlx::query(query).fetch_all(executor).await?;

    rows.iter()
        .map(|row| -> Result<SeatOverride, PostgresError> {
            let position: String = row.get("position");
            let table_no: i32 = row.get("table_no");
            Ok(SeatOverride {
                participant_id: row.get("participant_id"),
                table_no: u32::try_from(table_no)
                    .map_err(|_| PostgresError::InvalidData(format!("table_no {}", table_no)))?,
                position: position.parse::<SeatPosition>().map_err(PostgresError::InvalidData)?,
                updated_at: row.get("updated_at"),
            })
        })
        .collect()
}

fn participant_from_row(row: &PgRow) -> Participant {
    Participant {
        id: row.get("id"),
        name: row.get("name"),
        q1: row.get("q1"),
        q2: row.get("q2"),
        q3: row.get("q3"),
        q4: row.get("q4"),
        q5: row.get("q5"),
        q5_short: row.get("q5_short"),
        absent: row.get("absent"),
        created_at: row.get("created_at"),
    }
}
