//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub event_time: String,
    pub location: String,
    pub image_url: Option<String>,
    pub max_participants: i32,
    pub current_participants: i32,
    pub created_by: i64,
    pub status: EventStatus,
    pub is_free: bool,
    pub price: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// The price a registrant actually pays. Free events always cost zero,
    /// regardless of the stored price value.
    pub fn effective_price(&self) -> f64 {
        if self.is_free {
            0.0
        } else {
            self.price
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub event_time: String,
    pub location: String,
    pub image_url: Option<String>,
    pub max_participants: Option<i32>,
    pub is_free: bool,
    pub price: Option<f64>,
    pub currency: Option<String>,
}

/// An event together with its registration counters, for admin dashboards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithCounts {
    #[serde(flatten)]
    pub event: Event,
    pub registration_count: i64,
    pub pending_count: i64,
}
