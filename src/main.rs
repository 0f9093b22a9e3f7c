use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use staffing_match::api::{AppState, Clock, DashboardQuery, create_router};
use staffing_match::config::{AppSettings, ConfigLoader};
use staffing_match::dashboard::{build_dashboard, employee_details};
use staffing_match::error::EngineError;
use staffing_match::matching::RequirementMatcher;
use staffing_match::store::InMemoryStore;
use staffing_match::telemetry::{self, TelemetryError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "staffing-match",
    about = "Match employees to staffing requirements and report on revenue",
    version
)]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List open requirements
    Requirements,
    /// Print matched candidates for one requirement
    Match(MatchArgs),
    /// Print the revenue dashboard for a month
    Dashboard(DashboardArgs),
    /// Print one employee with skills and contract history
    Employee(EmployeeArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Directory holding matching.yaml and proficiency.yaml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    /// YAML snapshot of requirements, employees and contracts
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Pin "today" instead of reading the system clock (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Requirement id, e.g. REQ-0001
    requirement_id: String,
    /// Reference date for availability (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    /// Month number, 0-11 as the HTTP query takes it (defaults to the current month)
    #[arg(long)]
    month: Option<u32>,
    /// Year (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
    /// Reference date for bench and expiry windows (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct EmployeeArgs {
    /// Employee id, e.g. EMP-0001
    employee_id: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    let mut settings = AppSettings::from_env()?;

    if let Some(dir) = cli.sources.config_dir {
        settings.config_dir = dir;
    }
    if let Some(file) = cli.sources.data_file {
        settings.data_file = file;
    }

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(settings, args).await,
        Command::Requirements => {
            let (config, store) = load_sources(&settings)?;
            let requirements = RequirementMatcher::new(&store, config.rules()).list_requirements()?;
            print_json(&requirements)
        }
        Command::Match(args) => {
            let (config, store) = load_sources(&settings)?;
            let today = args.today.unwrap_or_else(system_today);
            let report = RequirementMatcher::new(&store, config.rules())
                .match_requirement(&args.requirement_id, today)?;
            print_json(&report)
        }
        Command::Dashboard(args) => {
            let (_, store) = load_sources(&settings)?;
            let today = args.today.unwrap_or_else(system_today);
            let month = DashboardQuery {
                month: args.month,
                year: args.year,
            }
            .resolve(today)?;
            let report = build_dashboard(&store, month, today)?;
            print_json(&report)
        }
        Command::Employee(args) => {
            let (_, store) = load_sources(&settings)?;
            print_json(&employee_details(&store, &args.employee_id)?)
        }
    }
}

async fn run_server(mut settings: AppSettings, mut args: ServeArgs) -> Result<(), CliError> {
    if let Some(host) = args.host.take() {
        settings.host = host;
    }
    if let Some(port) = args.port.take() {
        settings.port = port;
    }

    telemetry::init(&settings.log_level)?;

    let (config, store) = load_sources(&settings)?;
    let clock = args.today.map(Clock::Fixed).unwrap_or_default();
    let state = AppState::new(Arc::new(store), config).with_clock(clock);
    let app = create_router(state);

    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        config_dir = %settings.config_dir.display(),
        data_file = %settings.data_file.display(),
        "staffing match service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_sources(settings: &AppSettings) -> Result<(ConfigLoader, InMemoryStore), CliError> {
    let config = ConfigLoader::load(&settings.config_dir)?;
    let store = InMemoryStore::load(&settings.data_file, config.proficiency().clone())?;
    Ok((config, store))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn system_today() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
