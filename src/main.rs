use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use colored::*;
use dotenv::dotenv;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

mod api;
mod export;
mod filters;
mod models;
mod render;
mod session;
mod state;
mod ui;

use crate::api::ApiClient;
use crate::api::error::ExportError;
use crate::export::export_report;
use crate::filters::{read_filters, FilterArgs};
use crate::session::UserSession;
use crate::state::AppState;
use crate::ui::notify::{Level, Notifications};
use crate::ui::{init_ui, print_records, print_stats, Trigger};

#[derive(Debug, Parser)]
#[command(name = "attendash", about = "Attendance dashboard client")]
struct Cli {
    #[command(flatten)]
    filters: FilterArgs,

    /// Also download the filtered records as an Excel report
    #[arg(long)]
    download: bool,

    /// Where to write the rendered dashboard snapshot
    #[arg(long, default_value = "attendance_dashboard.html")]
    snapshot: PathBuf,

    /// Directory the Excel report is saved into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// End the current session and exit
    #[arg(long)]
    logout: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Instant::now();

    env_logger::init();
    dotenv().ok();
    let cli = Cli::parse();

    init_ui();

    let client = ApiClient::from_env()?;
    let session_file = session::session_path();

    if cli.logout {
        logout(&client, &session_file).await;
        return Ok(());
    }

    let mut state = AppState::new();
    let mut notices = Notifications::new();

    // Login gate: reuse the stored session if one exists, otherwise
    // authenticate with the configured credentials.
    state.session = Some(match session::restore(&session_file) {
        Some(existing) => existing,
        None => login(&client, &session_file, &mut notices).await?,
    });

    if let Some(user) = &state.session {
        println!("{}", format!("Welcome, {}", user.username).bold());
    }

    load_dashboard(&client).await;

    let criteria = read_filters(&cli.filters, Local::now().date_naive());
    log::info!("filtering with {:?}", criteria);

    let filter_trigger = Trigger::new("filter");
    let mut filtered = false;
    if let Some(guard) = filter_trigger.begin("Loading attendance records...") {
        match client.filter_records(&criteria).await {
            Ok(records) => {
                guard.finish_with_message(format!(
                    "✅ Fetched {} from the backend",
                    render::record_count_label(records.len()).green().bold()
                ));
                state.replace_results(records);
                filtered = true;
            }
            Err(err) => {
                guard.clear();
                log::error!("filter failed: {}", err);
                notices.push(Level::Danger, err.user_message());
                // Stale-on-error: the previous render stays as it was.
            }
        }
    }

    if filtered {
        print_records(state.results());

        let view = render::render(state.results());
        let page = render::render_page(&view, &criteria);
        fs::write(&cli.snapshot, page)
            .with_context(|| format!("Failed to write snapshot to {}", cli.snapshot.display()))?;
        println!(
            "{} {}",
            "📄 Dashboard snapshot written to".cyan(),
            cli.snapshot.display().to_string().bold()
        );
    }

    if cli.download {
        download_report(&client, &criteria, &state, &cli.out_dir, &mut notices).await;
    }

    let duration = start_time.elapsed();
    println!(
        "\n{}",
        format!("⏱️ Total execution time: {:.2?}", duration).cyan()
    );

    Ok(())
}

async fn login(
    client: &ApiClient,
    session_file: &std::path::Path,
    notices: &mut Notifications,
) -> Result<UserSession> {
    let username = env::var("DASHBOARD_USER").context("DASHBOARD_USER env var not set")?;
    let password = env::var("DASHBOARD_PASSWORD").context("DASHBOARD_PASSWORD env var not set")?;

    let trigger = Trigger::new("login");
    let Some(guard) = trigger.begin("Signing in...") else {
        bail!("login already in progress");
    };

    match client.authenticate(&username, &password).await {
        Ok(()) => {
            guard.finish_with_message(format!("✅ Signed in as {}", username.green().bold()));
            let user = UserSession::begin(&username);
            if let Err(err) = session::store(session_file, &user) {
                log::warn!("could not persist session: {}", err);
            }
            Ok(user)
        }
        Err(err) => {
            guard.clear();
            notices.push(Level::Danger, err.user_message());
            bail!("login failed: {}", err)
        }
    }
}

async fn logout(client: &ApiClient, session_file: &std::path::Path) {
    let trigger = Trigger::new("logout");
    if let Some(guard) = trigger.begin("Signing out...") {
        match client.end_session().await {
            Ok(()) => guard.finish_with_message("✅ Logged out successfully".to_string()),
            Err(err) => {
                // Forced logout: the local session goes away regardless.
                guard.clear();
                log::warn!("logout request failed: {}", err);
            }
        }
    }
    session::clear(session_file);
    println!("{}", "Session cleared.".dimmed());
}

/// Summary stats are decoration; failure to load them is logged, never fatal.
async fn load_dashboard(client: &ApiClient) {
    let trigger = Trigger::new("stats");
    if let Some(guard) = trigger.begin("Loading dashboard stats...") {
        match client.dashboard_stats().await {
            Ok(stats) => {
                guard.clear();
                print_stats(&stats);
            }
            Err(err) => {
                guard.clear();
                log::error!("dashboard stats failed: {}", err);
                println!("{}", "Error loading dashboard stats.".dimmed());
            }
        }
    };
}

async fn download_report(
    client: &ApiClient,
    criteria: &models::FilterCriteria,
    state: &AppState,
    out_dir: &std::path::Path,
    notices: &mut Notifications,
) {
    let trigger = Trigger::new("download");
    let Some(guard) = trigger.begin("Generating report...") else {
        return;
    };

    match export_report(client, criteria, state.results().len(), out_dir).await {
        Ok(path) => {
            guard.finish_with_message(format!(
                "💾 Report saved to {}",
                path.display().to_string().green().bold()
            ));
            notices.push(Level::Success, "Report downloaded successfully!");
        }
        Err(ExportError::Empty) => {
            guard.clear();
            notices.push(
                Level::Warning,
                "No data to download. Please filter some records first.",
            );
        }
        Err(ExportError::Api(err)) => {
            guard.clear();
            log::error!("export failed: {}", err);
            notices.push(Level::Danger, err.user_message());
        }
        Err(ExportError::Io(err)) => {
            guard.clear();
            log::error!("saving report failed: {}", err);
            notices.push(Level::Danger, format!("Failed to save report: {}", err));
        }
    }
}
