//! Search log and traffic records backing the analytics pages.

use crate::models::store_operations::{Entity, Searchable};
use crate::models::EntityId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub id: EntityId,
    pub query: String,
    pub results: u64,
    pub timestamp: NaiveDateTime,
    pub user_agent: String,
    pub ip: String,
    pub category: String,
}

impl Entity for SearchQuery {
    const KIND: &'static str = "search query";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl Searchable for SearchQuery {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.query.as_str()]
    }
}

wire_enum! {
    Trend {
        Up => "up",
        Down => "down",
        Stable => "stable",
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PopularSearch {
    pub query: String,
    pub count: u64,
    pub trend: Trend,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    pub index_update: NaiveDateTime,
    pub search_fields: Vec<String>,
    pub result_limit: u32,
    pub highlight_enabled: bool,
    pub fuzzy_search_enabled: bool,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageVisit {
    pub id: EntityId,
    pub page: String,
    pub url: String,
    pub visits: u64,
    pub unique_visitors: u64,
    /// "mm:ss"
    pub avg_time_on_page: String,
    /// Percentage with a trailing '%', e.g. "34.2%".
    pub bounce_rate: String,
    pub downloads: u64,
}

impl PageVisit {
    pub fn bounce_rate_percent(&self) -> Option<f64> {
        self.bounce_rate.trim().trim_end_matches('%').trim().parse().ok()
    }

    pub fn avg_time_on_page_secs(&self) -> Option<u32> {
        let (minutes, seconds) = self.avg_time_on_page.trim().split_once(':')?;
        let minutes: u32 = minutes.parse().ok()?;
        let seconds: u32 = seconds.parse().ok()?;
        if seconds >= 60 {
            return None;
        }
        minutes.checked_mul(60)?.checked_add(seconds)
    }
}

impl Entity for PageVisit {
    const KIND: &'static str = "page visit";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl Searchable for PageVisit {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.page.as_str(), self.url.as_str()]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileDownload {
    pub id: EntityId,
    pub file_name: String,
    pub file_type: String,
    pub downloads: u64,
    pub page: String,
    pub last_download: NaiveDateTime,
}

impl Entity for FileDownload {
    const KIND: &'static str = "file download";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl Searchable for FileDownload {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.file_name.as_str(), self.page.as_str()]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStats {
    pub date: NaiveDate,
    pub visits: u64,
    pub unique_visitors: u64,
    pub page_views: u64,
}
