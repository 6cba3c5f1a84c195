use super::models::{CalendarEvent, CalendarListEntry};
use super::token::TokenManager;
use crate::config::Config;
use crate::digest::WeekWindow;
use crate::error::{google_calendar_error, BotResult};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

/// Client for the Google Calendar v3 REST API
pub struct CalendarClient {
    token_manager: TokenManager,
    client: Client,
}

impl CalendarClient {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            token_manager: TokenManager::new(config),
            client: Client::new(),
        }
    }

    async fn access_token(&self) -> BotResult<String> {
        let token = self.token_manager.get_token().await?;
        token
            .get("access_token")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| google_calendar_error("No access token available"))
    }

    /// Fetch the events of one calendar within the week window, sorted by
    /// start time, with recurring events expanded to single occurrences.
    /// An empty week is an empty Ok result; HTTP and auth failures are
    /// errors.
    pub async fn get_events(
        &self,
        calendar_id: &str,
        window: &WeekWindow,
    ) -> BotResult<Vec<CalendarEvent>> {
        let access_token = self.access_token().await?;

        let url_str = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            calendar_id
        );
        let mut url = Url::parse(&url_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("timeMin", &window.time_min())
            .append_pair("timeMax", &window.time_max())
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");

        debug!(calendar_id, "Fetching events");

        let response_data = self.get_json(url, &access_token).await?;

        // The API omits "items" entirely for an empty window
        let events = response_data
            .get("items")
            .and_then(|i| i.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(events.iter().map(parse_event).collect())
    }

    /// List the calendars this credential has access to
    pub async fn list_calendars(&self) -> BotResult<Vec<CalendarListEntry>> {
        let access_token = self.access_token().await?;

        let url = Url::parse("https://www.googleapis.com/calendar/v3/users/me/calendarList")
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        let response_data = self.get_json(url, &access_token).await?;

        let entries = response_data
            .get("items")
            .and_then(|i| i.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(entries
            .iter()
            .map(|entry| CalendarListEntry {
                id: string_field(entry, "id").unwrap_or_default(),
                summary: string_field(entry, "summary").unwrap_or_default(),
            })
            .collect())
    }

    async fn get_json(&self, url: Url, access_token: &str) -> BotResult<Value> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse response: {}", e)))
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn nested_field(value: &Value, outer: &str, inner: &str) -> Option<String> {
    value
        .get(outer)
        .and_then(|o| o.as_object())
        .and_then(|o| o.get(inner))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn parse_event(event: &Value) -> CalendarEvent {
    CalendarEvent {
        id: string_field(event, "id").unwrap_or_default(),
        summary: string_field(event, "summary"),
        description: string_field(event, "description"),
        start_date_time: nested_field(event, "start", "dateTime"),
        start_date: nested_field(event, "start", "date"),
        end_date_time: nested_field(event, "end", "dateTime"),
        end_date: nested_field(event, "end", "date"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_event_picks_up_both_time_representations() {
        let timed = json!({
            "id": "event1",
            "summary": "Standup",
            "description": "Kurzes Update",
            "start": { "dateTime": "2023-01-02T09:00:00+01:00" },
            "end": { "dateTime": "2023-01-02T09:30:00+01:00" }
        });
        let event = parse_event(&timed);
        assert_eq!(event.id, "event1");
        assert_eq!(
            event.start_date_time.as_deref(),
            Some("2023-01-02T09:00:00+01:00")
        );
        assert!(event.start_date.is_none());

        let all_day = json!({
            "id": "event2",
            "summary": "Papier",
            "start": { "date": "2023-01-05" },
            "end": { "date": "2023-01-06" }
        });
        let event = parse_event(&all_day);
        assert_eq!(event.start_date.as_deref(), Some("2023-01-05"));
        assert!(event.start_date_time.is_none());
        assert!(event.description.is_none());
    }
}
