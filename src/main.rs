// PlanVista calendar
// Terminal front end for the month grid and day timeline

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use planvista_calendar::models::event::ScheduleEnvelope;
use planvista_calendar::models::settings::{DataSource, Settings};
use planvista_calendar::services::calendar::{CalendarController, PendingFetch};
use planvista_calendar::services::navigation::{Direction, RebuildScope};
use planvista_calendar::services::remote::RemoteClient;
use planvista_calendar::services::settings::SettingsService;
use planvista_calendar::ui::{Pane, RenderSurface, TerminalRenderer};
use planvista_calendar::utils::date::parse_date;

#[derive(Parser)]
#[command(name = "planvista-calendar")]
#[command(about = "Month grid and day timeline for PlanVista schedules")]
struct Cli {
    /// Settings file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Embedded events: a JSON array or a `{"schedules": [...]}` body
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    /// Select this day first (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<String>,

    /// Navigation steps applied in order after selecting the day
    #[arg(long = "step", value_enum, global = true)]
    steps: Vec<Step>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Month grid and selected day
    Show,
    Month,
    Day,
    /// Details of one schedule or record
    Detail { id: String },
    /// Delete a schedule through the server
    Delete { id: String },
    /// Estimated duration of a task
    Estimate { task: String },
    AddTask { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Step {
    PrevMonth,
    NextMonth,
    PrevDay,
    NextDay,
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let service = match path {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_default_location()?,
    };
    service.get()
}

fn read_events(path: &Path) -> Result<Vec<serde_json::Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))?;

    match value {
        serde_json::Value::Array(records) => Ok(records),
        other => {
            let envelope: ScheduleEnvelope =
                serde_json::from_value(other).context("Expected an event array or a schedules body")?;
            Ok(envelope.schedules)
        }
    }
}

fn dispatch(controller: &mut CalendarController, client: Option<&RemoteClient>, fetches: Vec<PendingFetch>) {
    if let Some(client) = client {
        controller.run_fetches(client, fetches);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.logging.filter.as_str()))
        .init();
    log::info!("Starting PlanVista calendar ({:?})", settings.calendar.data_source);

    let today = Local::now().date_naive();
    let remote = settings.calendar.data_source == DataSource::Remote;

    let mut controller = if remote {
        CalendarController::new(settings.mode(), today)
    } else {
        CalendarController::embedded(today, settings.calendar.editable, Vec::new())
    };

    // Entry actions always go through the server; listings only in remote mode
    let client = RemoteClient::new(&settings.remote)?;
    let source = remote.then_some(&client);

    if remote {
        if cli.events.is_some() {
            log::warn!("--events is ignored for the remote calendar");
        }
        let fetches = controller.refresh(RebuildScope::Both);
        dispatch(&mut controller, source, fetches);
    } else if let Some(path) = cli.events.as_deref() {
        let skipped = controller.load_embedded(read_events(path)?);
        if skipped > 0 {
            log::warn!("{} event records were skipped", skipped);
        }
    }

    if let Some(text) = cli.date.as_deref() {
        let date: NaiveDate = match parse_date(text) {
            Some(date) => date,
            None => bail!("Invalid --date `{}`, expected YYYY-MM-DD", text),
        };
        let outcome = controller.select_date(date);
        dispatch(&mut controller, source, outcome.fetches);
    }

    for step in &cli.steps {
        let outcome = match step {
            Step::PrevMonth => controller.advance_month(Direction::Previous),
            Step::NextMonth => controller.advance_month(Direction::Next),
            Step::PrevDay => controller.advance_day(Direction::Previous)?,
            Step::NextDay => controller.advance_day(Direction::Next)?,
        };
        dispatch(&mut controller, source, outcome.fetches);
    }

    let renderer = TerminalRenderer::from_settings(&settings);
    let now = Some(Local::now().time());

    let mut surface = match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            let mut surface = RenderSurface::full();
            renderer.render(&controller, &mut surface, now);
            surface
        }
        Commands::Month => {
            let mut surface = RenderSurface::with_panes(&[Pane::Header, Pane::MonthGrid, Pane::Notices]);
            renderer.render(&controller, &mut surface, now);
            surface
        }
        Commands::Day => {
            let mut surface = RenderSurface::with_panes(&[Pane::Header, Pane::Timeline, Pane::Notices]);
            renderer.render(&controller, &mut surface, now);
            surface
        }
        Commands::Detail { id } => {
            let Some(detail) = controller.detail(&id) else {
                bail!("No event `{}` on the displayed month or selected day", id);
            };
            let mut surface = RenderSurface::with_panes(&[Pane::Detail, Pane::Notices]);
            renderer.render_detail(&detail, &mut surface);
            surface
        }
        Commands::Delete { id } => {
            if let Err(err) = controller.delete_schedule(&id, &client) {
                log::error!("{}", err);
            }
            let mut surface = RenderSurface::full();
            renderer.render(&controller, &mut surface, now);
            surface
        }
        Commands::Estimate { task } => {
            let estimate = controller.estimate(&task, &client);
            println!("{}: {}", task, estimate);
            RenderSurface::with_panes(&[Pane::Notices])
        }
        Commands::AddTask { name } => {
            // Outcome message is queued as a notice
            controller.add_task(&name, &client);
            RenderSurface::with_panes(&[Pane::Notices])
        }
    };

    renderer.render_notices(&mut controller, &mut surface);
    let output = surface.compose();
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
