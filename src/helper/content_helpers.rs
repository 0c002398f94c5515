use crate::helper::{form_helpers, sanitization_helpers};
use crate::models::store_operations::aggregate_operations::{count_where, sum_by, sum_nested};
use crate::models::store_operations::{Entity, EntityStore, FilterComposer, Selection, StoreError};
use crate::models::{Attachment, ContentCategory, ContentItem, ContentStatus, EntityId};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub search: String,
    pub category: Selection<ContentCategory>,
    pub status: Selection<ContentStatus>,
}

impl ContentFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, StoreError> {
        form_helpers::ensure_known_keys(params, &["category", "status"])?;
        Ok(Self {
            search: form_helpers::search_term(params),
            category: form_helpers::selection(params, "category")?,
            status: form_helpers::selection(params, "status")?,
        })
    }
}

pub fn filter_content<'a>(items: &'a [ContentItem], filter: &ContentFilter) -> Vec<&'a ContentItem> {
    FilterComposer::new()
        .search(&filter.search)
        .category(&filter.category, |c: &ContentItem| c.category)
        .category(&filter.status, |c: &ContentItem| c.status)
        .apply(items)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ContentStats {
    pub total: usize,
    pub published: usize,
    pub downloads: u64,
    pub views: u64,
}

pub fn content_stats(items: &[ContentItem]) -> ContentStats {
    ContentStats {
        total: items.len(),
        published: count_where(items, |c| c.status == ContentStatus::Published),
        downloads: sum_nested(items, |c| c.attachments.as_slice(), |a| a.downloads),
        views: sum_by(items, |c| c.views),
    }
}

/// Checks a content record before it goes into the store: slug shape and
/// sanitized body.
pub fn prepare_content(mut item: ContentItem) -> Result<ContentItem, StoreError> {
    item.title = sanitization_helpers::plain_text(&item.title);
    if item.slug.trim().is_empty() {
        item.slug = sanitization_helpers::slugify(&item.title);
    }
    if !sanitization_helpers::is_valid_slug(&item.slug) {
        return Err(StoreError::Validation(format!(
            "Slug '{}' must be lowercase letters, digits and single hyphens",
            item.slug
        )));
    }
    item.content = sanitization_helpers::sanitize_rich_content(&item.content);
    Ok(item)
}

/// Whether `file_name` ends with one of the allowed extensions (case-insensitive).
pub fn has_allowed_extension(file_name: &str, allowed: &[String]) -> bool {
    let lowered = file_name.to_ascii_lowercase();
    allowed.iter().any(|ext| lowered.ends_with(&ext.to_ascii_lowercase()))
}

/// Attaches a file to a content record. Attachment ids run one past the
/// highest attachment id anywhere in the store.
pub fn add_attachment<'a>(
    store: &'a mut EntityStore<ContentItem>,
    content_id: EntityId,
    mut attachment: Attachment,
    allowed_types: &[String],
) -> Result<&'a ContentItem, StoreError> {
    if !has_allowed_extension(&attachment.name, allowed_types) {
        return Err(StoreError::Validation(format!(
            "File type of '{}' is not allowed. Allowed: {}",
            attachment.name,
            allowed_types.join(" ")
        )));
    }
    attachment.id = store
        .list()
        .iter()
        .flat_map(|c| c.attachments.iter())
        .map(|a| a.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| StoreError::Validation("No attachment ids left to assign".to_string()))?;
    store.update_by_id(content_id, |c| c.attachments.push(attachment))
}

pub fn remove_attachment(
    store: &mut EntityStore<ContentItem>,
    content_id: EntityId,
    attachment_id: EntityId,
) -> Result<Attachment, StoreError> {
    let item = store
        .get(content_id)
        .ok_or(StoreError::NotFound { entity: ContentItem::KIND, id: content_id })?;
    let idx = item
        .attachments
        .iter()
        .position(|a| a.id == attachment_id)
        .ok_or(StoreError::NotFound { entity: "attachment", id: attachment_id })?;
    let removed = item.attachments[idx].clone();
    store.update_by_id(content_id, |c| {
        c.attachments.remove(idx);
    })?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::default_seed;
    use assert_matches::assert_matches;

    fn store() -> EntityStore<ContentItem> {
        EntityStore::from_seed(default_seed().unwrap().content).unwrap()
    }

    fn allowed() -> Vec<String> {
        vec![".pdf".into(), ".docx".into()]
    }

    fn attachment(name: &str) -> Attachment {
        Attachment {
            id: 0,
            name: name.into(),
            mime_type: "application/pdf".into(),
            size: "10 KB".into(),
            url: format!("/files/{name}"),
            downloads: 0,
        }
    }

    #[test]
    fn stats_sum_downloads_across_all_attachments() {
        let stats = content_stats(store().list());
        assert_eq!(stats, ContentStats { total: 3, published: 2, downloads: 435, views: 2235 });
    }

    #[test]
    fn status_and_category_filters_combine() {
        let store = store();
        let filter = ContentFilter { status: Selection::Only(ContentStatus::Published), ..Default::default() };
        assert_eq!(filter_content(store.list(), &filter).len(), 2);

        let filter = ContentFilter {
            category: Selection::Only(ContentCategory::Legal),
            status: Selection::Only(ContentStatus::Published),
            ..Default::default()
        };
        let hits = filter_content(store.list(), &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "privacy-policy");
    }

    #[test]
    fn search_reaches_into_the_html_body() {
        let store = store();
        let filter = ContentFilter { search: "รายละเอียดแผน".into(), ..Default::default() };
        assert_eq!(filter_content(store.list(), &filter)[0].id, 3);
    }

    #[test]
    fn attachments_get_store_wide_ids() {
        let mut store = store();
        let item = add_attachment(&mut store, 2, attachment("terms.PDF"), &allowed()).unwrap();
        assert_eq!(item.attachments.last().map(|a| a.id), Some(4));
    }

    #[test]
    fn attachment_ids_stop_at_the_largest_id() {
        let mut store = store();
        store.update_by_id(3, |c| c.attachments[0].id = EntityId::MAX).unwrap();
        assert_matches!(
            add_attachment(&mut store, 2, attachment("terms.pdf"), &allowed()),
            Err(StoreError::Validation(_))
        );
        assert!(store.get(2).unwrap().attachments.is_empty());
    }

    #[test]
    fn disallowed_file_types_are_rejected() {
        let mut store = store();
        assert_matches!(
            add_attachment(&mut store, 2, attachment("run.exe"), &allowed()),
            Err(StoreError::Validation(_))
        );
        assert!(store.get(2).unwrap().attachments.is_empty());
    }

    #[test]
    fn removing_an_attachment_lowers_downloads() {
        let mut store = store();
        let removed = remove_attachment(&mut store, 1, 2).unwrap();
        assert_eq!(removed.name, "examples.zip");
        assert_eq!(content_stats(store.list()).downloads, 279);
        assert_matches!(remove_attachment(&mut store, 1, 2), Err(StoreError::NotFound { entity: "attachment", .. }));
    }

    #[test]
    fn prepare_content_derives_and_checks_slug() {
        let mut item = store().get(3).unwrap().clone();
        item.title = "<b>Annual Plan</b>".into();
        item.slug.clear();
        let prepared = prepare_content(item.clone()).unwrap();
        assert_eq!(prepared.title, "Annual Plan");
        assert_eq!(prepared.slug, "annual-plan");

        item.title = "แผนงาน".into();
        assert_matches!(prepare_content(item), Err(StoreError::Validation(_)));
    }

    #[test]
    fn duplicate_slug_is_a_conflict() {
        let mut store = store();
        let copy = store.get(1).unwrap().clone();
        assert_matches!(store.insert(copy), Err(StoreError::Conflict { .. }));
    }
}
