use serde::{Deserialize, Serialize};

/// An event as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    /// ISO-8601 date, as produced by the dashboard's date picker.
    pub date: String,
    pub venue: Option<String>,
}

/// Payload for creating an event.
#[derive(Debug, Clone, Serialize)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub venue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "rsvpStatus")]
    pub rsvp_status: RsvpStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsvpStatus {
    Pending,
    Attending,
    Declined,
    Maybe,
}

/// Aggregated budget figures for one event; the math happens server-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BudgetSummary {
    #[serde(rename = "totalBudget")]
    pub total_budget: f64,
    pub spent: f64,
    pub remaining: f64,
}
