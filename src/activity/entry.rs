//! Activity Entries
//!
//! Wire types of the activity endpoint and their presentation.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::FeedResult;

/// One line of an analysis activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// ISO-8601 instant as sent by the server
    pub timestamp: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

/// Entry category; selects color and icon only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Info,
    Success,
    Warning,
    Error,
    Milestone,
}

/// Color class and icon for an entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStyle {
    pub color_class: &'static str,
    pub icon: &'static str,
}

impl ActivityKind {
    pub fn style(self) -> EntryStyle {
        let (color_class, icon) = match self {
            ActivityKind::Info => ("text-blue-400", "ℹ"),
            ActivityKind::Success => ("text-green-400", "✓"),
            ActivityKind::Warning => ("text-yellow-400", "⚠"),
            ActivityKind::Error => ("text-red-400", "✕"),
            ActivityKind::Milestone => ("text-purple-400", "★"),
        };
        EntryStyle { color_class, icon }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Info => "info",
            ActivityKind::Success => "success",
            ActivityKind::Warning => "warning",
            ActivityKind::Error => "error",
            ActivityKind::Milestone => "milestone",
        }
    }
}

impl ActivityEntry {
    pub fn new(timestamp: impl Into<String>, kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
            kind,
            phase: None,
        }
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    pub fn style(&self) -> EntryStyle {
        self.kind.style()
    }

    /// Parse the timestamp.
    ///
    /// Accepts RFC 3339 and offset-less ISO-8601, the latter read as UTC.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// `HH:MM:SS`, or the raw timestamp when it cannot be parsed
    pub fn clock_label(&self) -> String {
        self.instant()
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }
}

/// Response container of `GET /api/analysis/{id}/activity`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub log: Vec<ActivityEntry>,
}

/// Parse an activity response body.
///
/// Anything but an object with a well-formed `log` array is rejected as a
/// whole; there is no partial result.
pub fn parse_activity_log(body: &[u8]) -> FeedResult<Vec<ActivityEntry>> {
    let container: ActivityLog = serde_json::from_slice(body)?;
    Ok(container.log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::FeedError;

    #[test]
    fn test_parse_preserves_order() {
        let body = br#"{"log": [
            {"timestamp": "2024-05-01T10:00:00Z", "message": "Started", "type": "info"},
            {"timestamp": "2024-05-01T10:00:05Z", "message": "Phase 1 done", "type": "milestone", "phase": "ingest"},
            {"timestamp": "2024-05-01T10:00:09Z", "message": "Boom", "type": "error"}
        ]}"#;

        let entries = parse_activity_log(body).unwrap();
        let kinds: Vec<_> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Info, ActivityKind::Milestone, ActivityKind::Error]
        );
        assert_eq!(entries[1].phase.as_deref(), Some("ingest"));
        assert_eq!(entries[0].message, "Started");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        let bodies: [&[u8]; 6] = [
            b"[]",
            br#"{"entries": []}"#,
            br#"{"log": null}"#,
            br#"{"log": [{"timestamp": "t", "message": "m", "type": "fatal"}]}"#,
            br#"{"log": [{"message": "no timestamp", "type": "info"}]}"#,
            b"<html>502</html>",
        ];

        for body in bodies {
            let err = parse_activity_log(body).unwrap_err();
            assert!(matches!(err, FeedError::Malformed(_)));
        }
    }

    #[test]
    fn test_parse_empty_log() {
        assert!(parse_activity_log(br#"{"log": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_styles() {
        assert_eq!(ActivityKind::Info.style().color_class, "text-blue-400");
        assert_eq!(ActivityKind::Error.style().icon, "✕");
        assert_eq!(ActivityKind::Milestone.style().color_class, "text-purple-400");
        assert_eq!(ActivityKind::Warning.as_str(), "warning");
    }

    #[test]
    fn test_instant_formats() {
        let rfc = ActivityEntry::new("2024-05-01T12:30:45+02:00", ActivityKind::Info, "x");
        assert_eq!(rfc.clock_label(), "10:30:45");

        let naive = ActivityEntry::new("2024-05-01T12:30:45.123456", ActivityKind::Info, "x");
        assert_eq!(naive.clock_label(), "12:30:45");

        let whole = ActivityEntry::new("2024-05-01T08:00:00", ActivityKind::Info, "x");
        assert!(whole.instant().is_some());

        let junk = ActivityEntry::new("yesterday", ActivityKind::Info, "x");
        assert!(junk.instant().is_none());
        assert_eq!(junk.clock_label(), "yesterday");
    }
}
