use serde::Deserialize;

use crate::api::error::ApiError;
use crate::models::{AttendanceRecord, DashboardStats};

/// Minimal `{success, message?}` envelope shared by every JSON endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<AttendanceRecord>,
}

#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stats: Option<DashboardStats>,
}

/// Error body returned by the export endpoint on failure.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

fn rejected(message: Option<String>, fallback: &str) -> ApiError {
    ApiError::Rejected(message.unwrap_or_else(|| fallback.to_string()))
}

pub fn parse_envelope(body: &str, fallback: &str) -> Result<(), ApiError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.success {
        Ok(())
    } else {
        Err(rejected(envelope.message, fallback))
    }
}

/// Records come back exactly in server order; no re-sorting, no de-dup.
pub fn parse_filter_body(body: &str) -> Result<Vec<AttendanceRecord>, ApiError> {
    let response: FilterResponse = serde_json::from_str(body)?;
    if response.success {
        Ok(response.data)
    } else {
        Err(rejected(response.message, "Failed to filter data"))
    }
}

pub fn parse_stats_body(body: &str) -> Result<DashboardStats, ApiError> {
    let response: StatsResponse = serde_json::from_str(body)?;
    match (response.success, response.stats) {
        (true, Some(stats)) => Ok(stats),
        (true, None) => Err(rejected(None, "Stats missing from response")),
        (false, _) => Err(rejected(response.message, "Failed to fetch dashboard stats")),
    }
}

/// The export endpoint answers a failed request with a JSON `{message}`
/// body. An unparsable body counts as a transport-level failure.
pub fn parse_export_failure(body: &str, fallback: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => rejected(parsed.message, fallback),
        Err(err) => ApiError::Malformed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_success_preserves_server_order() {
        let body = r#"{
            "success": true,
            "data": [
                {"id": 2, "name": "Jane Smith", "roll_number": "002",
                 "session": "AN", "campus": "AEC", "course": "EEE",
                 "scan_date": "2025-01-06", "scan_time": "09:31:02",
                 "location": "Main Campus", "status": "late"},
                {"id": 1, "name": "John Doe", "roll_number": "001",
                 "session": "AN", "campus": "AEC", "course": "CE",
                 "scan_date": "2025-01-05", "scan_time": "09:15:44",
                 "location": "Main Campus", "status": "present"}
            ],
            "count": 2
        }"#;
        let records = parse_filter_body(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].roll_number, "002");
        assert_eq!(records[1].roll_number, "001");
    }

    #[test]
    fn filter_rejection_carries_the_server_message() {
        let body = r#"{"success": false, "message": "Authentication required"}"#;
        match parse_filter_body(body) {
            Err(ApiError::Rejected(message)) => assert_eq!(message, "Authentication required"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn filter_rejection_without_message_uses_fallback() {
        let body = r#"{"success": false}"#;
        match parse_filter_body(body) {
            Err(ApiError::Rejected(message)) => assert_eq!(message, "Failed to filter data"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(
            parse_filter_body("<html>502 Bad Gateway</html>"),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn stats_body_parses_recent_scans() {
        let body = r#"{
            "success": true,
            "stats": {
                "total_students": 5,
                "today_attendance": 3,
                "attendance_percentage": 60.0,
                "recent_attendance": [
                    {"name": "John Doe", "roll_number": "001",
                     "location": "Main Campus", "scan_time": "2025-01-05 09:15:44"}
                ]
            }
        }"#;
        let stats = parse_stats_body(body).unwrap();
        assert_eq!(stats.total_students, 5);
        assert_eq!(stats.recent_attendance.len(), 1);
        assert_eq!(stats.recent_attendance[0].name, "John Doe");
    }

    #[test]
    fn export_failure_body_yields_rejection() {
        let err = parse_export_failure(
            r#"{"message": "No data found for the specified criteria"}"#,
            "Failed to download report",
        );
        match err {
            ApiError::Rejected(message) => {
                assert_eq!(message, "No data found for the specified criteria")
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn unparsable_export_failure_is_malformed() {
        assert!(parse_export_failure("not json", "Failed to download report").is_network());
    }
}
