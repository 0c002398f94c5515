//! Status enums and their transition tables.
//!
//! Every status field is a small finite-state machine. `toggled` covers the
//! two-value switch shown next to a record; states outside that pair are only
//! reachable through an explicit transition.

use std::fmt;

pub trait Lifecycle: Copy + PartialEq + fmt::Display + 'static {
    /// Statuses reachable from `self` in one explicit transition.
    fn valid_transitions(self) -> &'static [Self];

    /// The other member of the two-value toggle pair, or `None` when `self`
    /// sits outside the pair.
    fn toggled(self) -> Option<Self>;

    fn can_transition_to(self, next: Self) -> bool {
        self == next || self.valid_transitions().contains(&next)
    }
}

wire_enum! {
    /// Status shared by banners and users.
    ActivityStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

impl Lifecycle for ActivityStatus {
    fn valid_transitions(self) -> &'static [Self] {
        match self {
            ActivityStatus::Active => &[ActivityStatus::Inactive],
            ActivityStatus::Inactive => &[ActivityStatus::Active],
        }
    }

    fn toggled(self) -> Option<Self> {
        Some(match self {
            ActivityStatus::Active => ActivityStatus::Inactive,
            ActivityStatus::Inactive => ActivityStatus::Active,
        })
    }
}

wire_enum! {
    ContentStatus {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

impl Lifecycle for ContentStatus {
    fn valid_transitions(self) -> &'static [Self] {
        match self {
            ContentStatus::Draft => &[ContentStatus::Published, ContentStatus::Archived],
            ContentStatus::Published => &[ContentStatus::Draft, ContentStatus::Archived],
            ContentStatus::Archived => &[ContentStatus::Draft],
        }
    }

    fn toggled(self) -> Option<Self> {
        match self {
            ContentStatus::Draft => Some(ContentStatus::Published),
            ContentStatus::Published => Some(ContentStatus::Draft),
            ContentStatus::Archived => None,
        }
    }
}

wire_enum! {
    NewsStatus {
        Draft => "draft",
        Published => "published",
        Scheduled => "scheduled",
    }
}

impl Lifecycle for NewsStatus {
    fn valid_transitions(self) -> &'static [Self] {
        match self {
            NewsStatus::Draft => &[NewsStatus::Published, NewsStatus::Scheduled],
            NewsStatus::Scheduled => &[NewsStatus::Published, NewsStatus::Draft],
            NewsStatus::Published => &[NewsStatus::Draft],
        }
    }

    fn toggled(self) -> Option<Self> {
        match self {
            NewsStatus::Draft => Some(NewsStatus::Published),
            NewsStatus::Published => Some(NewsStatus::Draft),
            NewsStatus::Scheduled => None,
        }
    }
}

wire_enum! {
    PopupStatus {
        Active => "active",
        Inactive => "inactive",
        Scheduled => "scheduled",
    }
}

impl Lifecycle for PopupStatus {
    fn valid_transitions(self) -> &'static [Self] {
        match self {
            PopupStatus::Inactive => &[PopupStatus::Active, PopupStatus::Scheduled],
            PopupStatus::Scheduled => &[PopupStatus::Active, PopupStatus::Inactive],
            PopupStatus::Active => &[PopupStatus::Inactive],
        }
    }

    fn toggled(self) -> Option<Self> {
        match self {
            PopupStatus::Active => Some(PopupStatus::Inactive),
            PopupStatus::Inactive => Some(PopupStatus::Active),
            PopupStatus::Scheduled => None,
        }
    }
}
