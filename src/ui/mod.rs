pub mod notify;

use chrono::Local;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::Duration;

use crate::models::{AttendanceRecord, DashboardStats};
use crate::render::{format_recent_time, format_scan_time, record_count_label, status_class};

// Styled progress bar creation
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg} [{elapsed_precise}]")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

// Function to print banner and initialize UI
pub fn init_ui() {
    print!("\x1B[2J\x1B[1;1H");

    println!(
        "{} {} {}",
        "📋".green(),
        "Attendance Dashboard".bold().blue(),
        "📋".green()
    );
    // Clock line, HH:MM 24h
    println!(
        "{}",
        format!("🕐 {}", Local::now().format("%H:%M")).yellow()
    );
}

/// Idle/Busy guard for an asynchronous action. The spinner doubles as the
/// busy indicator; `begin` while Busy is a no-op, and dropping the returned
/// guard restores Idle on every exit path, early returns and panics included.
pub struct Trigger {
    label: String,
    busy: std::cell::Cell<bool>,
}

impl Trigger {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            busy: std::cell::Cell::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn begin(&self, message: &str) -> Option<ActionGuard<'_>> {
        if self.busy.get() {
            log::debug!("{} trigger already busy, ignoring", self.label);
            return None;
        }
        self.busy.set(true);
        let spinner = create_spinner(message);
        Some(ActionGuard {
            trigger: self,
            spinner,
        })
    }
}

pub struct ActionGuard<'a> {
    trigger: &'a Trigger,
    spinner: ProgressBar,
}

impl ActionGuard<'_> {
    pub fn finish_with_message(&self, message: String) {
        self.spinner.finish_with_message(message);
    }

    pub fn clear(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
        self.trigger.busy.set(false);
    }
}

// Dashboard summary box, same layout as the filter results below it
pub fn print_stats(stats: &DashboardStats) {
    println!("{}", "┌─────────────────────────────────────────────────┐".bright_blue());
    println!(
        "{} {} {}",
        "│".bright_blue(),
        " 📊 DASHBOARD SUMMARY                            ".bold().white().on_blue(),
        "│".bright_blue()
    );
    println!("{}", "├─────────────────────────────────────────────────┤".bright_blue());
    println!(
        "{} {:<25} {:<21} {}",
        "│".bright_blue(),
        "Total students:".bold(),
        stats.total_students.to_string().green().bold(),
        "│".bright_blue()
    );
    println!(
        "{} {:<25} {:<21} {}",
        "│".bright_blue(),
        "Today's attendance:".bold(),
        stats.today_attendance.to_string().green().bold(),
        "│".bright_blue()
    );
    println!(
        "{} {:<25} {:<21} {}",
        "│".bright_blue(),
        "Attendance percentage:".bold(),
        format!("{}%", stats.attendance_percentage).yellow().bold(),
        "│".bright_blue()
    );
    println!("{}", "└─────────────────────────────────────────────────┘".bright_blue());

    if stats.recent_attendance.is_empty() {
        println!("{}", "No recent attendance records.".dimmed());
        return;
    }

    println!("{}", "🕘 Recent scans".bold().blue());
    for scan in &stats.recent_attendance {
        println!(
            "  {} {} {}",
            scan.name.bold(),
            format!("(Roll: {} | {})", scan.roll_number, scan.location).dimmed(),
            format_recent_time(&scan.scan_time).cyan()
        );
    }
}

fn status_colored(status: &str) -> ColoredString {
    match status_class(status) {
        "status-late" => status.yellow().bold(),
        "status-absent" => status.red().bold(),
        _ => status.green().bold(),
    }
}

// Terminal preview of the filtered records; the HTML snapshot is the full render
pub fn print_records(records: &[AttendanceRecord]) {
    println!(
        "\n{} {}",
        "🔎 Filtered attendance:".bold().blue(),
        record_count_label(records.len()).yellow().bold()
    );

    if records.is_empty() {
        println!("{}", "No records found for the selected criteria.".dimmed());
        return;
    }

    println!(
        "{:<4} {:<20} {:<12} {:<12} {:<8} {:<10}",
        "#".bold(),
        "Name".bold(),
        "Roll".bold(),
        "Date".bold(),
        "Time".bold(),
        "Status".bold()
    );
    for (index, record) in records.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:<12} {:<12} {:<8} {}",
            index + 1,
            record.name,
            record.roll_number,
            record.scan_date,
            format_scan_time(&record.scan_time),
            status_colored(&record.status)
        );
    }
}
