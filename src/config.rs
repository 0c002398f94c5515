use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Attachment extensions accepted when no config file overrides them.
pub const DEFAULT_ALLOWED_FILE_TYPES: &[&str] = &[
    ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".pdf", ".zip", ".rar", ".png", ".jpg", ".gif",
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub log_level: String,
    /// Seed document to load instead of the bundled one.
    pub seed_file: Option<String>,
    pub page_size: u32,
    pub allowed_file_types: Vec<String>,
}

impl Config {
    pub fn from_env(env_path: &Path) -> Result<Self, config::ConfigError> {
        // Load the specified .env file first; everything below reads from the process environment.
        dotenvy::from_path(env_path).map_err(|e| {
            config::ConfigError::Message(format!(
                "FATAL: Failed to load .env file from '{}'. Error: {}",
                env_path.display(),
                e
            ))
        })?;

        // LOG_LEVEL falls back to "info" when not set.
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        // SEED_FILE is optional, but when given it must be an absolute path.
        let seed_file = env::var("SEED_FILE").ok().filter(|s| !s.trim().is_empty());
        if let Some(path) = &seed_file {
            if Path::new(path).is_relative() {
                return Err(config::ConfigError::Message(format!(
                    "FATAL: The 'SEED_FILE' in your .env file is a relative path ('{}'). It MUST be an absolute path.",
                    path
                )));
            }
        }

        // PAGE_SIZE is optional; a value that is present must be a positive integer.
        let page_size = match env::var("PAGE_SIZE") {
            Ok(raw) => Some(raw.trim().parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                config::ConfigError::Message(format!("FATAL: 'PAGE_SIZE' must be a positive integer, got '{}'.", raw))
            })?),
            Err(_) => None,
        };

        let defaults: Vec<String> = DEFAULT_ALLOWED_FILE_TYPES.iter().map(|s| s.to_string()).collect();
        // Built-in defaults, then config/default.toml if present, then the values read above.
        let mut builder = config::Config::builder()
            .set_default("page_size", i64::from(DEFAULT_PAGE_SIZE))?
            .set_default("allowed_file_types", defaults)?
            .add_source(config::File::new("config/default.toml", config::FileFormat::Toml).required(false))
            .set_override("log_level", log_level)?;

        if let Some(size) = page_size {
            builder = builder.set_override("page_size", i64::from(size))?;
        }
        if let Some(path) = seed_file {
            builder = builder.set_override("seed_file", path)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn seed_path(&self) -> Option<PathBuf> {
        self.seed_file.as_ref().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Env vars are process-wide; keep every case in one test so they never race.
    #[test]
    fn reads_env_file_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");

        let mut file = std::fs::File::create(&env_path).unwrap();
        writeln!(file, "LOG_LEVEL=debug").unwrap();
        writeln!(file, "PAGE_SIZE=25").unwrap();
        drop(file);

        env::remove_var("SEED_FILE");
        let config = Config::from_env(&env_path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.page_size, 25);
        assert!(config.seed_path().is_none());
        assert!(config.allowed_file_types.iter().any(|t| t == ".pdf"));

        env::set_var("SEED_FILE", "relative/seed.json");
        assert!(Config::from_env(&env_path).is_err());
        env::remove_var("SEED_FILE");

        env::set_var("PAGE_SIZE", "zero");
        assert!(Config::from_env(&env_path).is_err());
        env::remove_var("PAGE_SIZE");
        env::remove_var("LOG_LEVEL");

        assert!(Config::from_env(&dir.path().join("missing.env")).is_err());
    }
}
