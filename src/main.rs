use appbase_dashboard::{
    commands::{self, Command},
    config::Config,
    setup::{default_seed, load_seed_file},
    AppState,
};
use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "appbase_dashboard", author, version, about = "Runs one AppBase dashboard operation over the seed data.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,

    /// Email of the dashboard user performing the operation.
    #[arg(long = "as", value_name = "EMAIL", global = true)]
    acting_user: Option<String>,

    /// Clock used for date windows, e.g. 2024-03-16T12:00:00. Defaults to local time.
    #[arg(long, value_name = "DATETIME", global = true)]
    at: Option<NaiveDateTime>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env(&cli.env_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: Failed to load or parse configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    let seed = match config.seed_path() {
        Some(path) => load_seed_file(&path),
        None => default_seed(),
    };
    let mut state = match seed.and_then(|seed| Ok(AppState::from_seed(seed)?)) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Could not load dashboard data: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Loaded {} banners, {} content items, {} news items, {} users",
        state.banners.len(),
        state.content.len(),
        state.news.len(),
        state.users.len()
    );

    let now = cli.at.unwrap_or_else(|| chrono::Local::now().naive_local());
    match commands::run(&mut state, &config, cli.acting_user.as_deref(), &cli.command, now) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to render output: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
