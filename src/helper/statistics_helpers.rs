use crate::models::store_operations::aggregate_operations::{percentage, sum_by};
use crate::models::store_operations::{FilterComposer, Selection};
use crate::models::{FileDownload, PageVisit, VisitorStats};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TrafficTotals {
    pub total_visits: u64,
    pub total_unique_visitors: u64,
    pub total_downloads: u64,
    pub total_page_views: u64,
}

pub fn traffic_totals(pages: &[PageVisit], files: &[FileDownload], daily: &[VisitorStats]) -> TrafficTotals {
    TrafficTotals {
        total_visits: sum_by(pages, |p| p.visits),
        total_unique_visitors: sum_by(pages, |p| p.unique_visitors),
        total_downloads: sum_by(files, |f| f.downloads),
        total_page_views: sum_by(daily, |d| d.page_views),
    }
}

/// Pages whose url contains `fragment`; `All` keeps every page.
pub fn filter_pages<'a>(pages: &'a [PageVisit], fragment: &'a Selection<String>) -> Vec<&'a PageVisit> {
    FilterComposer::new()
        .predicate(move |p: &PageVisit| match fragment {
            Selection::All => true,
            Selection::Only(part) => p.url.contains(part.as_str()),
        })
        .apply(pages)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PageShare {
    pub page: String,
    pub url: String,
    pub visits: u64,
    /// Share of all visits across every page, not just the filtered ones.
    pub visit_share: f64,
    pub bounce_rate: Option<f64>,
    pub avg_time_on_page_secs: Option<u32>,
}

pub fn page_shares(all_pages: &[PageVisit], shown: &[&PageVisit]) -> Vec<PageShare> {
    let total = sum_by(all_pages, |p| p.visits);
    shown
        .iter()
        .map(|p| PageShare {
            page: p.page.clone(),
            url: p.url.clone(),
            visits: p.visits,
            visit_share: percentage(p.visits, total),
            bounce_rate: p.bounce_rate_percent(),
            avg_time_on_page_secs: p.avg_time_on_page_secs(),
        })
        .collect()
}

/// The most recent day in the visitor series.
pub fn latest_day(daily: &[VisitorStats]) -> Option<&VisitorStats> {
    daily.iter().max_by_key(|d| d.date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::default_seed;

    #[test]
    fn totals_match_the_seed() {
        let seed = default_seed().unwrap();
        let totals = traffic_totals(&seed.page_visits, &seed.file_downloads, &seed.visitor_stats);
        assert_eq!(
            totals,
            TrafficTotals {
                total_visits: 35220,
                total_unique_visitors: 23105,
                total_downloads: 3283,
                total_page_views: 20037,
            }
        );
    }

    #[test]
    fn url_fragment_filter_is_substring_based() {
        let seed = default_seed().unwrap();
        let news = Selection::Only("news".to_string());
        let hits = filter_pages(&seed.page_visits, &news);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "/news");

        let all = Selection::All;
        assert_eq!(filter_pages(&seed.page_visits, &all).len(), 5);
    }

    #[test]
    fn shares_are_relative_to_all_pages() {
        let seed = default_seed().unwrap();
        let about = Selection::Only("about".to_string());
        let shown = filter_pages(&seed.page_visits, &about);
        let shares = page_shares(&seed.page_visits, &shown);
        assert_eq!(shares.len(), 1);
        assert!((shares[0].visit_share - 2345.0 * 100.0 / 35220.0).abs() < 1e-9);
        assert_eq!(shares[0].avg_time_on_page_secs, Some(135));
    }

    #[test]
    fn latest_day_is_by_date_not_position() {
        let seed = default_seed().unwrap();
        assert_eq!(latest_day(&seed.visitor_stats).map(|d| d.visits), Some(1245));
        assert!(latest_day(&[]).is_none());
    }
}
