use serde::Serialize;
use thiserror::Error;

/// Numeric record identifier, unique within one collection.
pub type EntityId = u32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed set of string values that travel as lowercase wire strings.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::models::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// A page of filtered records for list views.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub last_page: usize,
    pub total: usize,
}

pub mod analytics;
pub mod banner;
pub mod content;
pub mod homepage;
pub mod news;
pub mod status;
pub mod store_operations;
pub mod user;

pub use analytics::{FileDownload, PageVisit, PopularSearch, SearchQuery, SearchSettings, Trend, VisitorStats};
pub use banner::{Banner, BannerPosition};
pub use content::{Attachment, ContentCategory, ContentItem};
pub use homepage::{
    DisplayType, HomepageSection, ImageType, LinkButton, PopupEvent, PopupPosition, SectionContent,
    ShowFrequency,
};
pub use news::{NewsCategory, NewsItem};
pub use status::{ActivityStatus, ContentStatus, Lifecycle, NewsStatus, PopupStatus};
pub use user::{Permission, User, UserRole};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_enum_round_trips_through_strings() {
        for position in BannerPosition::ALL {
            assert_eq!(position.as_str().parse::<BannerPosition>(), Ok(*position));
        }
    }

    #[test]
    fn wire_enum_rejects_unknown_values() {
        let err = "sideways".parse::<BannerPosition>().unwrap_err();
        assert_eq!(err.kind, "BannerPosition");
        assert_eq!(err.to_string(), "Unknown BannerPosition value 'sideways'");
    }
}
