//! Event repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::event::{Event, EventStatus, CreateEventRequest};
use crate::utils::errors::EventBuddyError;

const EVENT_COLUMNS: &str = "id, title, description, event_date, event_time, location, image_url, max_participants, current_participants, created_by, status, is_free, price, currency, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, creator_id: i64, request: CreateEventRequest) -> Result<Event, EventBuddyError> {
        // Free events always store a zero price, whatever the caller sent.
        let price = if request.is_free {
            0.0
        } else {
            request.price.unwrap_or(0.0)
        };

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (title, description, event_date, event_time, location, image_url, max_participants, created_by, is_free, price, currency, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_date)
        .bind(request.event_time)
        .bind(request.location)
        .bind(request.image_url)
        .bind(request.max_participants.unwrap_or(100))
        .bind(creator_id)
        .bind(request.is_free)
        .bind(price)
        .bind(request.currency.unwrap_or_else(|| "USD".to_string()))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EventBuddyError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List active events, soonest first
    pub async fn find_active(&self) -> Result<Vec<Event>, EventBuddyError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE status = $1 ORDER BY event_date ASC"
        ))
        .bind(EventStatus::Active)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Get events created by a user
    pub async fn find_by_creator(&self, user_id: i64) -> Result<Vec<Event>, EventBuddyError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE created_by = $1 ORDER BY event_date ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Atomically increment the participant counter for an event.
    ///
    /// A single SQL increment so that concurrent approvals never lose
    /// updates; callers must not read-modify-write this column.
    pub async fn increment_participants(&self, id: i64) -> Result<Event, EventBuddyError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET current_participants = current_participants + 1,
                updated_at = $2
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EventBuddyError::EventNotFound { event_id: id })?;

        Ok(event)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, EventBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count events whose date is still ahead
    pub async fn count_upcoming(&self) -> Result<i64, EventBuddyError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM events WHERE event_date >= NOW()"
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
