use crate::models::content::Attachment;
use crate::models::status::NewsStatus;
use crate::models::store_operations::{Entity, HasStatus, Searchable};
use crate::models::EntityId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

wire_enum! {
    NewsCategory {
        Announcement => "announcement",
        Events => "events",
        Updates => "updates",
        News => "news",
        Promotions => "promotions",
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: EntityId,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: NewsCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured_image: String,
    /// Display glyph shown beside the headline.
    pub icon: String,
    pub status: NewsStatus,
    pub publish_date: NaiveDateTime,
    pub author: String,
    pub views: u64,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub rss_included: bool,
}

impl Entity for NewsItem {
    const KIND: &'static str = "news item";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl HasStatus for NewsItem {
    type Status = NewsStatus;

    fn status(&self) -> NewsStatus {
        self.status
    }

    fn set_status(&mut self, status: NewsStatus) {
        self.status = status;
    }

    fn check_window(&self, next: NewsStatus, now: NaiveDateTime) -> Result<(), String> {
        if next == NewsStatus::Published && self.publish_date > now {
            return Err(format!("publish date {} is still in the future", self.publish_date));
        }
        Ok(())
    }
}

impl Searchable for NewsItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.summary.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}
