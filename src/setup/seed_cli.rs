use appbase_dashboard::config::Config;
use appbase_dashboard::setup::{default_seed, load_seed_file, DEFAULT_SEED};
use appbase_dashboard::AppState;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "seed_cli", author, version, about = "Checks and exports dashboard seed data.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Loads the configured seed and reports what it contains.
    Check,
    /// Writes the bundled seed document to PATH as a starting point for SEED_FILE.
    Export {
        path: PathBuf,
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env(&cli.env_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: Failed to load or parse configuration: {}", e);
            std::process::exit(1);
        }
    };

    match &cli.command {
        Commands::Check => check_seed(&config),
        Commands::Export { path, force } => export_seed(path, *force),
    }
}

fn check_seed(config: &Config) {
    let (source, seed) = match config.seed_path() {
        Some(path) => (path.display().to_string(), load_seed_file(&path)),
        None => ("bundled seed".to_string(), default_seed()),
    };
    let state = match seed.and_then(|seed| Ok(AppState::from_seed(seed)?)) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Error: {} is not usable: {}", source, e);
            std::process::exit(1);
        }
    };
    println!("✅ {} loaded successfully.", source);
    println!("- banners: {}", state.banners.len());
    println!("- content: {}", state.content.len());
    println!("- news: {}", state.news.len());
    println!("- popups: {}", state.popups.len());
    println!("- sections: {}", state.sections.len());
    println!("- users: {}", state.users.len());
    println!("- search queries: {}", state.search_queries.len());
    println!("- page visits: {}", state.page_visits.len());
    println!("- file downloads: {}", state.file_downloads.len());
}

fn export_seed(path: &Path, force: bool) {
    if path.exists() && !force {
        println!("ℹ️ '{}' already exists. Pass --force to overwrite it.", path.display());
        return;
    }
    if let Some(parent_dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent_dir) {
            eprintln!("❌ Error: Could not create '{}': {}", parent_dir.display(), e);
            std::process::exit(1);
        }
    }
    match fs::write(path, DEFAULT_SEED) {
        Ok(_) => println!("✅ Seed data written to '{}'.", path.display()),
        Err(e) => {
            eprintln!("❌ Error writing seed data: {}", e);
            std::process::exit(1);
        }
    }
}
