use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fitlog_core::*;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Workout log parser and fitness statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User to act as (defaults to [user] default_owner from the config)
    #[arg(long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage known users
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Parse a workout log and store its entries
    Log {
        /// Read the log from a file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List the workouts of one day
    Day {
        /// Calendar day (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show today's totals, category breakdown and the last 7 days
    Dashboard,

    /// Export workouts between two days (inclusive) to CSV
    Export {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,

        /// Output CSV path
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Register a user so workouts can be logged for it
    Add { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            fitlog_core::logging::init();
            return fail(&e);
        }
    };
    fitlog_core::logging::init_with_level(&config.logging.level);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    let mut store = fitlog_core::jsonl::open(&data_dir)?;
    let user = cli.user;

    match cli.command {
        Commands::User {
            action: UserCommand::Add { id },
        } => cmd_user_add(&mut store, &id),
        Commands::Log { file } => {
            let owner = resolve_owner(user, config)?;
            cmd_log(&mut store, &owner, file.as_deref())
        }
        Commands::Day { date } => {
            let owner = resolve_owner(user, config)?;
            cmd_day(&store, &owner, date)
        }
        Commands::Dashboard => {
            let owner = resolve_owner(user, config)?;
            cmd_dashboard(&store, &owner)
        }
        Commands::Export { from, to, out } => {
            let owner = resolve_owner(user, config)?;
            cmd_export(&store, &owner, from, to, &out)
        }
    }
}

fn resolve_owner(flag: Option<String>, config: &Config) -> Result<String> {
    flag.or_else(|| config.user.default_owner.clone())
        .ok_or_else(|| {
            Error::InvalidArgument("no user given: pass --user or set [user] default_owner".into())
        })
}

fn ensure_owner(store: &JsonlStore, owner: &str) -> Result<()> {
    if store.owner_exists(owner)? {
        Ok(())
    } else {
        Err(Error::NotFound(owner.to_string()))
    }
}

fn cmd_user_add(store: &mut JsonlStore, id: &str) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::InvalidArgument("user id must not be empty".into()));
    }

    store.register_owner(id)?;
    println!("✓ Registered user {}", id);
    Ok(())
}

fn cmd_log(store: &mut JsonlStore, owner: &str, file: Option<&Path>) -> Result<()> {
    ensure_owner(store, owner)?;

    let raw = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };

    let submission = submit(store, owner, &raw, Utc::now())?;
    print_json(&submission)
}

fn cmd_day(store: &JsonlStore, owner: &str, date: Option<NaiveDate>) -> Result<()> {
    let stats = StatsAggregator::new(store, Local);
    let listing = stats.list_day(owner, date)?;
    print_json(&listing)
}

fn cmd_dashboard(store: &JsonlStore, owner: &str) -> Result<()> {
    let stats = StatsAggregator::new(store, Local);
    let dashboard = stats.dashboard(owner)?;
    print_json(&dashboard)
}

fn cmd_export(
    store: &JsonlStore,
    owner: &str,
    from: NaiveDate,
    to: NaiveDate,
    out: &Path,
) -> Result<()> {
    if from > to {
        return Err(Error::InvalidArgument(format!(
            "--from {} is after --to {}",
            from, to
        )));
    }
    ensure_owner(store, owner)?;

    let stats = StatsAggregator::new(store, Local);
    let (start, _) = stats.day_range(from);
    let (_, end) = stats.day_range(to);

    let count = export_range(store, owner, start, end, out)?;
    println!("✓ Exported {} workouts to {}", count, out.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fail(err: &Error) -> ExitCode {
    tracing::error!("{}", err);
    match serde_json::to_string(&ErrorReport::from(err)) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{}", err),
    }
    ExitCode::FAILURE
}
