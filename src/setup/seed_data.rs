use crate::models::store_operations::StoreError;
use crate::models::{
    Banner, ContentItem, FileDownload, HomepageSection, NewsItem, PageVisit, PopularSearch, PopupEvent,
    SearchQuery, SearchSettings, User, VisitorStats,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Seed document bundled with the binary.
pub const DEFAULT_SEED: &str = include_str!("seed.json");

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Failed to read seed file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Seed JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Seed data rejected: {0}")]
    Store(#[from] StoreError),
}

/// Every collection the dashboard starts from.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub banners: Vec<Banner>,
    #[serde(default)]
    pub content: Vec<ContentItem>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub popups: Vec<PopupEvent>,
    #[serde(default)]
    pub sections: Vec<HomepageSection>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub search_queries: Vec<SearchQuery>,
    #[serde(default)]
    pub popular_searches: Vec<PopularSearch>,
    pub search_settings: SearchSettings,
    #[serde(default)]
    pub page_visits: Vec<PageVisit>,
    #[serde(default)]
    pub file_downloads: Vec<FileDownload>,
    #[serde(default)]
    pub visitor_stats: Vec<VisitorStats>,
}

pub fn parse_seed(json: &str) -> Result<SeedData, SetupError> {
    Ok(serde_json::from_str(json)?)
}

pub fn default_seed() -> Result<SeedData, SetupError> {
    parse_seed(DEFAULT_SEED)
}

pub fn load_seed_file(path: &Path) -> Result<SeedData, SetupError> {
    let raw = fs::read_to_string(path).map_err(|source| SetupError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("Loading seed data from '{}'", path.display());
    parse_seed(&raw)
}
