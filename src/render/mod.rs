use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{AttendanceRecord, FilterCriteria};

/// Number of columns in the attendance table; the empty-state placeholder
/// row spans all of them.
const COLUMN_COUNT: usize = 10;

/// Rendered table state: the `<tbody>` markup plus the record-count label.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub body: String,
    pub count_label: String,
}

/// Escapes text for insertion into HTML. Record content comes straight from
/// the backend, so every textual field goes through here before it touches
/// markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Status → CSS class. Unrecognized statuses render as present on purpose;
/// the status vocabulary belongs to the server and may grow.
pub fn status_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "late" => "status-late",
        "absent" => "status-absent",
        _ => "status-present",
    }
}

/// `2025-01-05` → `Jan 5, 2025`; anything unparsable passes through as-is.
pub fn format_scan_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `09:15:44` → `09:15`. Falls back to the raw string when it is shorter
/// than HH:MM or the cut would split a character.
pub fn format_scan_time(raw: &str) -> String {
    raw.get(..5).unwrap_or(raw).to_string()
}

/// `2025-01-05 09:15:44` → `Jan 5, 09:15 AM` for the recent-scan list.
pub fn format_recent_time(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(stamp) => stamp.format("%b %-d, %I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn record_count_label(count: usize) -> String {
    if count == 1 {
        "1 record".to_string()
    } else {
        format!("{} records", count)
    }
}

/// Renders the result set into table markup. Pure and idempotent: the same
/// records always produce the same view.
pub fn render(records: &[AttendanceRecord]) -> TableView {
    let body = if records.is_empty() {
        format!(
            "<tr><td colspan=\"{}\" class=\"text-center text-muted\">\
             No records found for the selected criteria.</td></tr>\n",
            COLUMN_COUNT
        )
    } else {
        let mut body = String::new();
        for (index, record) in records.iter().enumerate() {
            body.push_str(&render_row(index + 1, record));
        }
        body
    };

    TableView {
        body,
        count_label: record_count_label(records.len()),
    }
}

fn render_row(index: usize, record: &AttendanceRecord) -> String {
    format!(
        "<tr>\
         <td>{index}</td>\
         <td>{name}</td>\
         <td>{roll}</td>\
         <td>{session}</td>\
         <td>{campus}</td>\
         <td>{course}</td>\
         <td>{date}</td>\
         <td>{time}</td>\
         <td>{location}</td>\
         <td><span class=\"{class}\">{status}</span></td>\
         </tr>\n",
        index = index,
        name = escape_html(&record.name),
        roll = escape_html(&record.roll_number),
        session = escape_html(&record.session),
        campus = escape_html(&record.campus),
        course = escape_html(&record.course),
        date = escape_html(&format_scan_date(&record.scan_date)),
        time = escape_html(&format_scan_time(&record.scan_time)),
        location = escape_html(&record.location),
        class = status_class(&record.status),
        status = escape_html(&record.status),
    )
}

/// Wraps a rendered view into a standalone snapshot document.
pub fn render_page(view: &TableView, criteria: &FilterCriteria) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Attendance Dashboard</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ddd; padding: 0.5rem; text-align: left; }}\n\
         .text-center {{ text-align: center; }}\n\
         .text-muted {{ color: #6c757d; }}\n\
         .status-present {{ color: #198754; font-weight: bold; }}\n\
         .status-late {{ color: #ffc107; font-weight: bold; }}\n\
         .status-absent {{ color: #dc3545; font-weight: bold; }}\n\
         </style>\n</head>\n<body>\n\
         <h1>Attendance Records</h1>\n\
         <p>Filters: session={session} campus={campus} course={course} \
         from={from} to={to}</p>\n\
         <p id=\"record-count\">{count}</p>\n\
         <table>\n<thead>\n<tr>\
         <th>#</th><th>Name</th><th>Roll Number</th><th>Session</th>\
         <th>Campus</th><th>Course</th><th>Date</th><th>Time</th>\
         <th>Location</th><th>Status</th>\
         </tr>\n</thead>\n<tbody>\n{body}</tbody>\n</table>\n\
         </body>\n</html>\n",
        session = escape_html(&criteria.session),
        campus = escape_html(&criteria.campus),
        course = escape_html(&criteria.course),
        from = escape_html(&criteria.date_from),
        to = escape_html(&criteria.date_to),
        count = escape_html(&view.count_label),
        body = view.body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(name: &str, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: Some(1),
            name: name.to_string(),
            roll_number: "001".to_string(),
            session: "AN".to_string(),
            campus: "AEC".to_string(),
            course: "CE".to_string(),
            scan_date: "2025-01-05".to_string(),
            scan_time: "09:15:44".to_string(),
            location: "Main Campus".to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn single_record_renders_one_indexed_row() {
        let view = render(&[record("John Doe", "present")]);
        assert_eq!(view.count_label, "1 record");
        assert_eq!(view.body.matches("<tr>").count(), 1);
        assert!(view.body.contains("<td>1</td>"));
        assert!(view.body.contains("<td>John Doe</td>"));
        assert!(view.body.contains("<td>Jan 5, 2025</td>"));
        assert!(view.body.contains("<td>09:15</td>"));
        assert!(view.body.contains("<span class=\"status-present\">present</span>"));
    }

    #[test]
    fn empty_result_set_renders_placeholder_row() {
        let view = render(&[]);
        assert_eq!(view.count_label, "0 records");
        assert_eq!(view.body.matches("<tr>").count(), 1);
        assert!(view.body.contains("colspan=\"10\""));
        assert!(view.body.contains("No records found for the selected criteria."));
    }

    #[test]
    fn rendering_is_idempotent() {
        let records = vec![record("John Doe", "present"), record("Jane Smith", "late")];
        assert_eq!(render(&records), render(&records));
    }

    #[test]
    fn script_tags_in_record_content_are_escaped() {
        let view = render(&[record("<script>alert('x')</script>", "present")]);
        assert!(!view.body.contains("<script>"));
        assert!(view
            .body
            .contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn unknown_status_falls_back_to_present_class() {
        assert_eq!(status_class("present"), "status-present");
        assert_eq!(status_class("LATE"), "status-late");
        assert_eq!(status_class("absent"), "status-absent");
        assert_eq!(status_class("excused"), "status-present");
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(record_count_label(0), "0 records");
        assert_eq!(record_count_label(1), "1 record");
        assert_eq!(record_count_label(2), "2 records");
    }

    #[test]
    fn unparsable_dates_and_times_pass_through() {
        assert_eq!(format_scan_date("not-a-date"), "not-a-date");
        assert_eq!(format_scan_time("9:15"), "9:15");
        assert_eq!(format_recent_time("???"), "???");
    }

    #[test]
    fn recent_time_is_locale_formatted() {
        assert_eq!(format_recent_time("2025-01-05 09:15:44"), "Jan 5, 09:15 AM");
    }
}
