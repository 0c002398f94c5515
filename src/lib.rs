use crate::models::store_operations::{EntityStore, StoreError};
use crate::models::{
    Banner, ContentItem, FileDownload, HomepageSection, NewsItem, PageVisit, PopularSearch, PopupEvent,
    SearchQuery, SearchSettings, User, VisitorStats,
};
use crate::setup::SeedData;

/// Owner of every dashboard collection. One store per aggregate root; helpers
/// borrow the store they work on instead of keeping their own copy.
#[derive(Debug, Clone)]
pub struct AppState {
    pub banners: EntityStore<Banner>,
    pub content: EntityStore<ContentItem>,
    pub news: EntityStore<NewsItem>,
    pub popups: EntityStore<PopupEvent>,
    pub sections: EntityStore<HomepageSection>,
    pub users: EntityStore<User>,
    pub search_queries: EntityStore<SearchQuery>,
    pub popular_searches: Vec<PopularSearch>,
    pub search_settings: SearchSettings,
    pub page_visits: EntityStore<PageVisit>,
    pub file_downloads: EntityStore<FileDownload>,
    pub visitor_stats: Vec<VisitorStats>,
}

impl AppState {
    pub fn from_seed(seed: SeedData) -> Result<Self, StoreError> {
        Ok(Self {
            banners: EntityStore::from_seed(seed.banners)?,
            content: EntityStore::from_seed(seed.content)?,
            news: EntityStore::from_seed(seed.news)?,
            popups: EntityStore::from_seed(seed.popups)?,
            sections: EntityStore::from_seed(seed.sections)?,
            users: EntityStore::from_seed(seed.users)?,
            search_queries: EntityStore::from_seed(seed.search_queries)?,
            popular_searches: seed.popular_searches,
            search_settings: seed.search_settings,
            page_visits: EntityStore::from_seed(seed.page_visits)?,
            file_downloads: EntityStore::from_seed(seed.file_downloads)?,
            visitor_stats: seed.visitor_stats,
        })
    }
}

#[macro_use]
pub mod models;

pub mod commands;
pub mod config;
pub mod guards;
pub mod helper;
pub mod setup;
