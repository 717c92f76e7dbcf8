use chrono::{Days, NaiveDate};
use clap::Args;

use crate::models::FilterCriteria;

/// The five filter fields as they arrive from the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Session code (e.g. AN, FN)
    #[arg(long)]
    pub session: Option<String>,

    /// Campus code (e.g. AEC, ACET)
    #[arg(long)]
    pub campus: Option<String>,

    /// Course code (e.g. CE, CSE)
    #[arg(long)]
    pub course: Option<String>,

    /// Start of the date range, YYYY-MM-DD
    #[arg(long)]
    pub date_from: Option<String>,

    /// End of the date range, YYYY-MM-DD
    #[arg(long)]
    pub date_to: Option<String>,
}

/// Snapshots the filter fields into a criteria record. No validation: the
/// backend owns the vocabulary, so whatever was entered passes through.
/// Missing dates default to the last seven days.
pub fn read_filters(args: &FilterArgs, today: NaiveDate) -> FilterCriteria {
    let week_ago = today
        .checked_sub_days(Days::new(7))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string();

    FilterCriteria {
        session: args.session.clone().unwrap_or_default(),
        campus: args.campus.clone().unwrap_or_default(),
        course: args.course.clone().unwrap_or_default(),
        date_from: args.date_from.clone().unwrap_or(week_ago),
        date_to: args
            .date_to
            .clone()
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
    }
}
