use crate::models::AttendanceRecord;
use crate::session::UserSession;

/// Application state with explicit ownership: the query invoker writes the
/// result set through `replace_results`, the renderer only reads it. A
/// failed filter never touches `results`, so the last successful response
/// stays on display.
#[derive(Debug, Default)]
pub struct AppState {
    pub session: Option<UserSession>,
    results: Vec<AttendanceRecord>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[AttendanceRecord] {
        &self.results
    }

    /// Wholesale replacement on filter success; the previous set is dropped.
    pub fn replace_results(&mut self, records: Vec<AttendanceRecord>) {
        self.results = records;
    }
}
