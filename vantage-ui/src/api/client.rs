//! HTTP API Client
//!
//! Functions for communicating with the dashboard API.

use gloo_net::http::Request;
use web_sys::RequestCredentials;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Local storage key holding a user-chosen API base URL
const API_URL_KEY: &str = "vantage_api_url";

/// Get the API base URL from local storage, the build environment, or the
/// default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    let url = stored
        .or_else(|| option_env!("VANTAGE_API_URL").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

/// One line of an analysis activity log
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default)]
    pub phase: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Info,
    Success,
    Warning,
    Error,
    Milestone,
}

impl ActivityKind {
    /// Text color class and icon
    pub fn style(self) -> (&'static str, &'static str) {
        match self {
            ActivityKind::Info => ("text-blue-400", "ℹ"),
            ActivityKind::Success => ("text-green-400", "✓"),
            ActivityKind::Warning => ("text-yellow-400", "⚠"),
            ActivityKind::Error => ("text-red-400", "✕"),
            ActivityKind::Milestone => ("text-purple-400", "★"),
        }
    }
}

impl ActivityEntry {
    /// `HH:MM:SS` of the entry, or the raw timestamp when it does not parse
    pub fn clock_label(&self) -> String {
        use chrono::{DateTime, NaiveDateTime};

        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return dt.format("%H:%M:%S").to_string();
        }
        match NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(dt) => dt.format("%H:%M:%S").to_string(),
            Err(_) => self.timestamp.clone(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct ActivityLog {
    pub log: Vec<ActivityEntry>,
}

// ============ API Functions ============

/// Fetch the full activity log of an analysis run.
///
/// The request carries the browser's cookies for session auth.
pub async fn fetch_activity(analysis_id: &str) -> Result<Vec<ActivityEntry>, String> {
    let api_base = get_api_base();
    let id: String = js_sys::encode_uri_component(analysis_id).into();

    let response = Request::get(&format!("{}/api/analysis/{}/activity", api_base, id))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let result: ActivityLog = response.json().await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activity_log() {
        let body = r#"{"log":[
            {"timestamp":"2024-05-01T10:00:00Z","message":"Started","type":"info"},
            {"timestamp":"2024-05-01T10:00:04","message":"Draft","type":"milestone","phase":"writing"}
        ]}"#;

        let parsed: ActivityLog = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.log.len(), 2);
        assert_eq!(parsed.log[1].kind, ActivityKind::Milestone);
        assert_eq!(parsed.log[1].phase.as_deref(), Some("writing"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let body = r#"{"log":[{"timestamp":"t","message":"m","type":"debug"}]}"#;
        assert!(serde_json::from_str::<ActivityLog>(body).is_err());
    }

    #[test]
    fn test_styles() {
        assert_eq!(ActivityKind::Info.style(), ("text-blue-400", "ℹ"));
        assert_eq!(ActivityKind::Error.style(), ("text-red-400", "✕"));
        assert_eq!(ActivityKind::Milestone.style(), ("text-purple-400", "★"));
    }

    #[test]
    fn test_clock_label() {
        let entry = |ts: &str| ActivityEntry {
            timestamp: ts.to_string(),
            message: String::new(),
            kind: ActivityKind::Info,
            phase: None,
        };

        assert_eq!(entry("2024-05-01T10:15:30Z").clock_label(), "10:15:30");
        assert_eq!(entry("2024-05-01T10:15:30.250").clock_label(), "10:15:30");
        assert_eq!(entry("yesterday").clock_label(), "yesterday");
    }
}
