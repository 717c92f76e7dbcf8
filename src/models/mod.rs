use serde::{Deserialize, Serialize};

/// Snapshot of the five filter fields, taken at the moment an action fires.
/// Empty strings mean "no filter"; dates travel as `%Y-%m-%d` strings and
/// are passed to the backend exactly as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub session: String,
    pub campus: String,
    pub course: String,
    pub date_from: String,
    pub date_to: String,
}

/// One attendance row as returned by the backend. Opaque to the client:
/// rendered, never mutated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub roll_number: String,
    pub session: String,
    pub campus: String,
    pub course: String,
    pub scan_date: String,
    pub scan_time: String,
    pub location: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub today_attendance: i64,
    pub attendance_percentage: f64,
    #[serde(default)]
    pub recent_attendance: Vec<RecentScan>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentScan {
    pub name: String,
    pub roll_number: String,
    pub location: String,
    pub scan_time: String,
}
