use crate::helper::{form_helpers, sanitization_helpers};
use crate::models::store_operations::aggregate_operations::{count_where, percentage, sum_by};
use crate::models::store_operations::{FilterComposer, Selection, StoreError};
use crate::models::{ActivityStatus, Banner, BannerPosition};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct BannerFilter {
    pub search: String,
    pub position: Selection<BannerPosition>,
    pub status: Selection<ActivityStatus>,
}

impl BannerFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, StoreError> {
        form_helpers::ensure_known_keys(params, &["position", "status"])?;
        Ok(Self {
            search: form_helpers::search_term(params),
            position: form_helpers::selection(params, "position")?,
            status: form_helpers::selection(params, "status")?,
        })
    }
}

pub fn filter_banners<'a>(banners: &'a [Banner], filter: &BannerFilter) -> Vec<&'a Banner> {
    FilterComposer::new()
        .search(&filter.search)
        .category(&filter.position, |b: &Banner| b.position)
        .category(&filter.status, |b: &Banner| b.status)
        .apply(banners)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BannerStats {
    pub total: usize,
    pub active: usize,
    pub clicks: u64,
    pub views: u64,
    /// Clicks per hundred views.
    pub click_through_rate: f64,
}

pub fn banner_stats(banners: &[Banner]) -> BannerStats {
    let clicks = sum_by(banners, |b| b.clicks);
    let views = sum_by(banners, |b| b.views);
    BannerStats {
        total: banners.len(),
        active: count_where(banners, |b| b.status == ActivityStatus::Active),
        clicks,
        views,
        click_through_rate: percentage(clicks, views),
    }
}

pub fn prepare_banner(mut banner: Banner) -> Result<Banner, StoreError> {
    if banner.start_date > banner.end_date {
        return Err(StoreError::Validation(format!(
            "Banner runs from {} to {}; the start must not be after the end",
            banner.start_date, banner.end_date
        )));
    }
    banner.title = sanitization_helpers::plain_text(&banner.title);
    banner.description = sanitization_helpers::plain_text(&banner.description);
    Ok(banner)
}

/// Banners sorted by display rank; ties keep collection order.
pub fn banners_in_display_order(banners: &[Banner]) -> Vec<&Banner> {
    let mut ordered: Vec<&Banner> = banners.iter().collect();
    ordered.sort_by_key(|b| b.order);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::default_seed;

    fn banners() -> Vec<Banner> {
        default_seed().unwrap().banners
    }

    #[test]
    fn stats_match_the_seed() {
        let stats = banner_stats(&banners());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.clicks, 501);
        assert_eq!(stats.views, 2755);
    }

    #[test]
    fn search_covers_title_and_description() {
        let banners = banners();
        let filter = BannerFilter { search: "ข่าว".into(), ..Default::default() };
        let hits: Vec<u32> = filter_banners(&banners, &filter).iter().map(|b| b.id).collect();
        assert_eq!(hits, vec![3]);

        let filter = BannerFilter { search: "สมาชิกใหม่".into(), ..Default::default() };
        assert_eq!(filter_banners(&banners, &filter)[0].id, 2);
    }

    #[test]
    fn position_filter_from_query_string() {
        let banners = banners();
        let params = form_helpers::parse_query("position=sidebar&status=all");
        let filter = BannerFilter::from_params(&params).unwrap();
        let hits: Vec<u32> = filter_banners(&banners, &filter).iter().map(|b| b.id).collect();
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn banner_dates_must_be_ordered() {
        let mut banner = banners().remove(0);
        banner.end_date = banner.start_date - chrono::Duration::days(1);
        assert!(matches!(prepare_banner(banner), Err(StoreError::Validation(_))));
    }

    #[test]
    fn display_order_follows_rank() {
        let mut banners = banners();
        banners[0].order = 9;
        let ids: Vec<u32> = banners_in_display_order(&banners).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
