use crate::helper::{form_helpers, sanitization_helpers};
use crate::models::store_operations::aggregate_operations::{count_where, sum_by};
use crate::models::store_operations::{EntityStore, FilterComposer, Selection, StoreError};
use crate::models::{EntityId, NewsCategory, NewsItem, NewsStatus};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct NewsFilter {
    pub search: String,
    pub category: Selection<NewsCategory>,
    pub status: Selection<NewsStatus>,
}

impl NewsFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, StoreError> {
        form_helpers::ensure_known_keys(params, &["category", "status"])?;
        Ok(Self {
            search: form_helpers::search_term(params),
            category: form_helpers::selection(params, "category")?,
            status: form_helpers::selection(params, "status")?,
        })
    }
}

pub fn filter_news<'a>(items: &'a [NewsItem], filter: &NewsFilter) -> Vec<&'a NewsItem> {
    FilterComposer::new()
        .search(&filter.search)
        .category(&filter.category, |n: &NewsItem| n.category)
        .category(&filter.status, |n: &NewsItem| n.status)
        .apply(items)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NewsStats {
    pub total: usize,
    pub published: usize,
    pub rss_included: usize,
    pub views: u64,
}

pub fn news_stats(items: &[NewsItem]) -> NewsStats {
    NewsStats {
        total: items.len(),
        published: count_where(items, |n| n.status == NewsStatus::Published),
        rss_included: count_where(items, |n| n.rss_included),
        views: sum_by(items, |n| n.views),
    }
}

/// Strips markup from the headline fields and cleans the body before a
/// news item is stored.
pub fn prepare_news(mut item: NewsItem) -> Result<NewsItem, StoreError> {
    item.title = sanitization_helpers::plain_text(&item.title);
    if item.title.is_empty() {
        return Err(StoreError::Validation("News title must not be empty".to_string()));
    }
    item.summary = sanitization_helpers::plain_text(&item.summary);
    item.content = sanitization_helpers::sanitize_rich_content(&item.content);
    item.tags = item
        .tags
        .iter()
        .map(|t| sanitization_helpers::plain_text(t))
        .filter(|t| !t.is_empty())
        .collect();
    Ok(item)
}

pub fn toggle_rss_included(store: &mut EntityStore<NewsItem>, id: EntityId) -> Result<&NewsItem, StoreError> {
    store.update_by_id(id, |n| n.rss_included = !n.rss_included)
}

/// Items that belong in the RSS feed, newest first.
pub fn rss_feed_items(items: &[NewsItem]) -> Vec<&NewsItem> {
    let mut feed: Vec<&NewsItem> = items
        .iter()
        .filter(|n| n.status == NewsStatus::Published && n.rss_included)
        .collect();
    feed.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
    feed
}

/// Characters of body text carried in each feed entry.
pub const RSS_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RssEntry {
    pub id: EntityId,
    pub title: String,
    pub category: NewsCategory,
    pub author: String,
    pub publish_date: NaiveDateTime,
    pub summary: String,
    pub excerpt: String,
}

pub fn rss_feed(items: &[NewsItem]) -> Vec<RssEntry> {
    rss_feed_items(items)
        .into_iter()
        .map(|n| RssEntry {
            id: n.id,
            title: n.title.clone(),
            category: n.category,
            author: n.author.clone(),
            publish_date: n.publish_date,
            summary: n.summary.clone(),
            excerpt: sanitization_helpers::excerpt(&n.content, RSS_EXCERPT_CHARS),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::default_seed;
    use assert_matches::assert_matches;

    fn store() -> EntityStore<NewsItem> {
        EntityStore::from_seed(default_seed().unwrap().news).unwrap()
    }

    #[test]
    fn stats_match_the_seed() {
        let stats = news_stats(store().list());
        assert_eq!(stats, NewsStats { total: 3, published: 1, rss_included: 2, views: 3035 });
    }

    #[test]
    fn search_matches_tags() {
        let store = store();
        let filter = NewsFilter { search: "สำคัญ".into(), ..Default::default() };
        let ids: Vec<u32> = filter_news(store.list(), &filter).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let filter = NewsFilter { search: "ระบบ".into(), ..Default::default() };
        let ids: Vec<u32> = filter_news(store.list(), &filter).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn rss_toggle_is_an_involution() {
        let mut store = store();
        toggle_rss_included(&mut store, 3).unwrap();
        assert!(store.get(3).unwrap().rss_included);
        toggle_rss_included(&mut store, 3).unwrap();
        assert!(!store.get(3).unwrap().rss_included);
    }

    #[test]
    fn prepared_news_has_no_scripts_or_markup_in_headlines() {
        let mut item = store().get(3).unwrap().clone();
        item.title = "<i>Maintenance</i>".into();
        item.content = "<p>ok</p><script>alert(1)</script>".into();
        item.tags = vec!["<b>ระบบ</b>".into(), "  ".into()];
        let prepared = prepare_news(item.clone()).unwrap();
        assert_eq!(prepared.title, "Maintenance");
        assert_eq!(prepared.content, "<p>ok</p>");
        assert_eq!(prepared.tags, vec!["ระบบ".to_string()]);

        item.title = "<b></b>".into();
        assert_matches!(prepare_news(item), Err(StoreError::Validation(_)));
    }

    #[test]
    fn feed_entries_carry_a_plain_text_excerpt() {
        let mut items = store().list().to_vec();
        items[0].content = format!("<p>{}</p>", "ก".repeat(RSS_EXCERPT_CHARS + 5));
        let feed = rss_feed(&items);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, 1);
        assert!(!feed[0].excerpt.contains('<'));
        assert_eq!(feed[0].excerpt.chars().count(), RSS_EXCERPT_CHARS + 1);
        assert!(feed[0].excerpt.ends_with('…'));
    }

    #[test]
    fn feed_contains_published_rss_items_newest_first() {
        let mut items = store().list().to_vec();
        items[2].status = NewsStatus::Published;
        items[2].rss_included = true;
        let ids: Vec<u32> = rss_feed_items(&items).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
