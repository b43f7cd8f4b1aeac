//! Event catalog service

use tracing::info;

use crate::database::EventRepository;
use crate::models::event::{CreateEventRequest, Event};
use crate::utils::errors::{EventBuddyError, Result};

#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
}

impl EventService {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    /// Create a new event. Admin role is enforced by the caller's gate;
    /// this validates the event fields themselves.
    pub async fn create_event(&self, creator_id: i64, request: CreateEventRequest) -> Result<Event> {
        if request.title.trim().is_empty()
            || request.description.trim().is_empty()
            || request.event_time.trim().is_empty()
            || request.location.trim().is_empty()
        {
            return Err(EventBuddyError::InvalidInput(
                "All required fields must be filled".to_string()
            ));
        }

        if let Some(price) = request.price {
            if price < 0.0 {
                return Err(EventBuddyError::InvalidInput(
                    "Price cannot be negative".to_string()
                ));
            }
        }

        if let Some(max) = request.max_participants {
            if max <= 0 {
                return Err(EventBuddyError::InvalidInput(
                    "Max participants must be greater than 0".to_string()
                ));
            }
        }

        let event = self.events.create(creator_id, request).await?;
        info!(event_id = event.id, creator_id = creator_id, is_free = event.is_free, "Event created");

        Ok(event)
    }

    /// Fetch a single event
    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(EventBuddyError::EventNotFound { event_id })
    }

    /// List active events, soonest first
    pub async fn list_active(&self) -> Result<Vec<Event>> {
        self.events.find_active().await
    }
}
