use crate::helper::{form_helpers, sanitization_helpers};
use crate::models::store_operations::aggregate_operations::{count_where, sum_by};
use crate::models::store_operations::{EntityStore, FilterComposer, Selection, StoreError};
use crate::models::{DisplayType, EntityId, HomepageSection, PopupEvent, PopupStatus};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct PopupFilter {
    pub search: String,
    pub status: Selection<PopupStatus>,
    pub display_type: Selection<DisplayType>,
}

impl PopupFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, StoreError> {
        form_helpers::ensure_known_keys(params, &["status", "display_type"])?;
        Ok(Self {
            search: form_helpers::search_term(params),
            status: form_helpers::selection(params, "status")?,
            display_type: form_helpers::selection(params, "display_type")?,
        })
    }
}

pub fn filter_popups<'a>(popups: &'a [PopupEvent], filter: &PopupFilter) -> Vec<&'a PopupEvent> {
    FilterComposer::new()
        .search(&filter.search)
        .category(&filter.status, |p: &PopupEvent| p.status)
        .category(&filter.display_type, |p: &PopupEvent| p.display_type)
        .apply(popups)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PopupStats {
    pub total: usize,
    pub active: usize,
    pub clicks: u64,
    pub views: u64,
}

pub fn popup_stats(popups: &[PopupEvent]) -> PopupStats {
    PopupStats {
        total: popups.len(),
        active: count_where(popups, |p| p.status == PopupStatus::Active),
        clicks: sum_by(popups, |p| p.clicks),
        views: sum_by(popups, |p| p.views),
    }
}

/// Checks the display window and cleans the text of a popup before it is stored.
pub fn prepare_popup(mut popup: PopupEvent) -> Result<PopupEvent, StoreError> {
    if popup.start_date > popup.end_date {
        return Err(StoreError::Validation(format!(
            "Popup window starts at {} after it ends at {}",
            popup.start_date, popup.end_date
        )));
    }
    popup.title = sanitization_helpers::plain_text(&popup.title);
    popup.description = sanitization_helpers::plain_text(&popup.description);
    Ok(popup)
}

/// Popups a visitor of `page` should see at `now`, highest priority first.
pub fn popups_for_page<'a>(popups: &'a [PopupEvent], page: &str, now: NaiveDateTime) -> Vec<&'a PopupEvent> {
    let mut shown: Vec<&PopupEvent> = popups
        .iter()
        .filter(|p| p.status == PopupStatus::Active && p.in_window(now) && p.targets(page))
        .collect();
    shown.sort_by_key(|p| p.priority);
    shown
}

pub fn filter_sections<'a>(sections: &'a [HomepageSection], search: &str) -> Vec<&'a HomepageSection> {
    FilterComposer::new().search(search).apply(sections)
}

pub fn toggle_section_visibility(
    store: &mut EntityStore<HomepageSection>,
    id: EntityId,
) -> Result<&HomepageSection, StoreError> {
    store.update_by_id(id, |s| s.visible = !s.visible)
}

/// Sections rendered on the homepage, in display order.
pub fn visible_sections(sections: &[HomepageSection]) -> Vec<&HomepageSection> {
    let mut shown: Vec<&HomepageSection> = sections.iter().filter(|s| s.visible).collect();
    shown.sort_by_key(|s| s.order);
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::store_operations::status_operations::{toggle_status, transition_status};
    use crate::models::SectionContent;
    use crate::setup::default_seed;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn popups() -> EntityStore<PopupEvent> {
        EntityStore::from_seed(default_seed().unwrap().popups).unwrap()
    }

    #[test]
    fn stats_match_the_seed() {
        let stats = popup_stats(popups().list());
        assert_eq!(stats, PopupStats { total: 3, active: 1, clicks: 323, views: 2023 });
    }

    #[test]
    fn scheduled_popup_cannot_be_toggled() {
        let mut store = popups();
        assert_matches!(toggle_status(&mut store, 2, at(2024, 12, 31, 0)), Err(StoreError::IllegalTransition { .. }));
    }

    #[test]
    fn scheduled_popup_activates_only_inside_its_window() {
        let mut store = popups();
        assert_matches!(
            transition_status(&mut store, 2, PopupStatus::Active, at(2024, 3, 16, 12)),
            Err(StoreError::IllegalTransition { .. })
        );
        let popup = transition_status(&mut store, 2, PopupStatus::Active, at(2024, 12, 31, 12)).unwrap();
        assert_eq!(popup.status, PopupStatus::Active);
    }

    #[test]
    fn inactive_popup_reactivates_inside_window() {
        let mut store = popups();
        let popup = toggle_status(&mut store, 3, at(2024, 3, 16, 12)).unwrap();
        assert_eq!(popup.status, PopupStatus::Active);
    }

    #[test]
    fn page_targeting_respects_status_window_and_priority() {
        let mut store = popups();
        toggle_status(&mut store, 3, at(2024, 3, 16, 12)).unwrap();
        let ids: Vec<u32> = popups_for_page(store.list(), "/news", at(2024, 3, 16, 12)).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(popups_for_page(store.list(), "/about", at(2024, 3, 16, 12)).is_empty());
        let ids: Vec<u32> = popups_for_page(store.list(), "/news", at(2024, 3, 22, 12)).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut popup = popups().get(1).unwrap().clone();
        popup.title = "<b>Sale</b>".into();
        assert_eq!(prepare_popup(popup.clone()).unwrap().title, "Sale");

        std::mem::swap(&mut popup.start_date, &mut popup.end_date);
        assert_matches!(prepare_popup(popup), Err(StoreError::Validation(_)));
    }

    #[test]
    fn hidden_gallery_is_left_out_until_toggled() {
        let mut store = EntityStore::from_seed(default_seed().unwrap().sections).unwrap();
        assert_eq!(visible_sections(store.list()).len(), 3);
        let gallery = toggle_section_visibility(&mut store, 4).unwrap();
        assert_matches!(gallery.content, SectionContent::Gallery { show_count: 6, .. });
        let ids: Vec<u32> = visible_sections(store.list()).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
