use crate::models::status::ActivityStatus;
use crate::models::store_operations::{Entity, HasStatus, Searchable};
use crate::models::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

wire_enum! {
    BannerPosition {
        Header => "header",
        Sidebar => "sidebar",
        Footer => "footer",
        Popup => "popup",
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub position: BannerPosition,
    pub status: ActivityStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub clicks: u64,
    pub views: u64,
    /// Display rank; lower shows first.
    pub order: i32,
}

impl Entity for Banner {
    const KIND: &'static str = "banner";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl HasStatus for Banner {
    type Status = ActivityStatus;

    fn status(&self) -> ActivityStatus {
        self.status
    }

    fn set_status(&mut self, status: ActivityStatus) {
        self.status = status;
    }
}

impl Searchable for Banner {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}
