use crate::models::status::ActivityStatus;
use crate::models::store_operations::{Entity, HasStatus, Searchable};
use crate::models::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

wire_enum! {
    UserRole {
        SuperAdmin => "super_admin",
        Admin => "admin",
        ContentManager => "content_manager",
        NewsEditor => "news_editor",
        Viewer => "viewer",
    }
}

impl UserRole {
    pub fn label(self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "Super Admin",
            UserRole::Admin => "Admin",
            UserRole::ContentManager => "Content Manager",
            UserRole::NewsEditor => "News Editor",
            UserRole::Viewer => "Viewer",
        }
    }
}

wire_enum! {
    /// Capability tags granted to dashboard users. `All` implies every other tag.
    Permission {
        All => "all",
        Users => "users",
        Content => "content",
        News => "news",
        Banners => "banners",
        Homepage => "homepage",
        Statistics => "statistics",
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: ActivityStatus,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    pub created_at: NaiveDate,
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.trim().to_lowercase())
    }
}

impl HasStatus for User {
    type Status = ActivityStatus;

    fn status(&self) -> ActivityStatus {
        self.status
    }

    fn set_status(&mut self, status: ActivityStatus) {
        self.status = status;
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.role.label()]
    }
}
