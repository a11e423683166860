use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::models::event::{BudgetSummary, Event, Guest, NewEvent};
use crate::error::ApiError;
use crate::transport::api_client::ApiClient;

/// Typed bindings for the event resources the dashboard renders.
#[async_trait]
pub trait EventService: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, ApiError>;

    async fn create_event(&self, event: &NewEvent) -> Result<Event, ApiError>;

    async fn list_guests(&self, event_id: &str) -> Result<Vec<Guest>, ApiError>;

    async fn budget_summary(&self, event_id: &str) -> Result<BudgetSummary, ApiError>;
}

pub struct EventServiceImpl {
    client: Arc<ApiClient>,
}

impl EventServiceImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventService for EventServiceImpl {
    async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let events: Vec<Event> = self.client.get("/events").await?;
        debug!("Fetched {} events", events.len());
        Ok(events)
    }

    async fn create_event(&self, event: &NewEvent) -> Result<Event, ApiError> {
        self.client.post("/events", event).await
    }

    async fn list_guests(&self, event_id: &str) -> Result<Vec<Guest>, ApiError> {
        let path = format!("/events/{}/guests", event_id);
        self.client.get(&path).await
    }

    async fn budget_summary(&self, event_id: &str) -> Result<BudgetSummary, ApiError> {
        let path = format!("/events/{}/budget-summary", event_id);
        self.client.get(&path).await
    }
}
