use crate::models::status::PopupStatus;
use crate::models::store_operations::{Entity, HasStatus, Searchable};
use crate::models::EntityId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

wire_enum! {
    ImageType {
        Static => "static",
        Animated => "animated",
    }
}

wire_enum! {
    PopupPosition {
        Center => "center",
        Top => "top",
        Bottom => "bottom",
        Left => "left",
        Right => "right",
    }
}

wire_enum! {
    DisplayType {
        Popup => "popup",
        Banner => "banner",
        Notification => "notification",
    }
}

wire_enum! {
    ShowFrequency {
        Once => "once",
        Daily => "daily",
        Always => "always",
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PopupEvent {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub image_type: ImageType,
    pub link_url: String,
    pub position: PopupPosition,
    pub display_type: DisplayType,
    pub status: PopupStatus,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// Display rank; lower shows first.
    pub priority: i32,
    pub show_frequency: ShowFrequency,
    #[serde(default)]
    pub target_pages: Vec<String>,
    pub clicks: u64,
    pub views: u64,
}

impl PopupEvent {
    pub fn in_window(&self, now: NaiveDateTime) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    pub fn targets(&self, page: &str) -> bool {
        self.target_pages.iter().any(|p| p == page)
    }
}

impl Entity for PopupEvent {
    const KIND: &'static str = "popup";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl HasStatus for PopupEvent {
    type Status = PopupStatus;

    fn status(&self) -> PopupStatus {
        self.status
    }

    fn set_status(&mut self, status: PopupStatus) {
        self.status = status;
    }

    fn check_window(&self, next: PopupStatus, now: NaiveDateTime) -> Result<(), String> {
        if next == PopupStatus::Active && !self.in_window(now) {
            return Err(format!(
                "{} is outside the display window {} .. {}",
                now, self.start_date, self.end_date
            ));
        }
        Ok(())
    }
}

impl Searchable for PopupEvent {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LinkButton {
    pub text: String,
    pub link: String,
}

/// Per-type payload of a homepage section, tagged by `type`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum SectionContent {
    #[serde(rename_all = "camelCase")]
    Hero {
        title: String,
        subtitle: String,
        background_image: String,
        #[serde(default)]
        buttons: Vec<LinkButton>,
    },
    #[serde(rename_all = "camelCase")]
    News { title: String, show_count: u32, show_images: bool },
    #[serde(rename_all = "camelCase")]
    Events { title: String, show_count: u32, calendar_view: bool },
    #[serde(rename_all = "camelCase")]
    Gallery {
        title: String,
        #[serde(default)]
        images: Vec<String>,
        show_count: u32,
    },
    #[serde(rename_all = "camelCase")]
    Links {
        title: String,
        #[serde(default)]
        links: Vec<LinkButton>,
    },
}

impl SectionContent {
    pub fn kind(&self) -> &'static str {
        match self {
            SectionContent::Hero { .. } => "hero",
            SectionContent::News { .. } => "news",
            SectionContent::Events { .. } => "events",
            SectionContent::Gallery { .. } => "gallery",
            SectionContent::Links { .. } => "links",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HomepageSection {
    pub id: EntityId,
    pub name: String,
    #[serde(flatten)]
    pub content: SectionContent,
    pub order: i32,
    pub visible: bool,
}

impl Entity for HomepageSection {
    const KIND: &'static str = "homepage section";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl Searchable for HomepageSection {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
