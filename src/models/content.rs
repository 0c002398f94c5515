use crate::models::status::ContentStatus;
use crate::models::store_operations::{Entity, HasStatus, Searchable};
use crate::models::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

wire_enum! {
    ContentCategory {
        Documents => "documents",
        Legal => "legal",
        Planning => "planning",
        Policy => "policy",
        Guidelines => "guidelines",
    }
}

/// A downloadable file owned by a content or news record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Attachment {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Display string such as "2.5 MB".
    pub size: String,
    pub url: String,
    #[serde(default)]
    pub downloads: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    /// HTML rich text.
    pub content: String,
    pub category: ContentCategory,
    pub status: ContentStatus,
    pub author: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub views: u64,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl ContentItem {
    pub fn downloads(&self) -> u64 {
        self.attachments.iter().map(|a| a.downloads).sum()
    }
}

impl Entity for ContentItem {
    const KIND: &'static str = "content item";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.slug.clone())
    }
}

impl HasStatus for ContentItem {
    type Status = ContentStatus;

    fn status(&self) -> ContentStatus {
        self.status
    }

    fn set_status(&mut self, status: ContentStatus) {
        self.status = status;
    }
}

impl Searchable for ContentItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }
}
