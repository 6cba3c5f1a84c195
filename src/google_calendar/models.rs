/// Simplified calendar event representation as returned by events.list
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date_time: Option<String>,
    pub end_date: Option<String>,
}

/// One entry of the credential's calendar list
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CalendarListEntry {
    pub id: String,
    pub summary: String,
}
