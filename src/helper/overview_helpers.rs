use crate::helper::statistics_helpers;
use crate::models::store_operations::aggregate_operations::count_where;
use crate::models::{ActivityStatus, ContentStatus, NewsStatus};
use crate::AppState;
use serde::Serialize;

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DashboardOverview {
    pub users: usize,
    pub active_users: usize,
    pub published_items: usize,
    pub active_banners: usize,
    pub news_items: usize,
    pub latest_day_visits: u64,
    pub total_searches: usize,
}

pub fn dashboard_overview(state: &AppState) -> DashboardOverview {
    let published_content = count_where(state.content.list(), |c| c.status == ContentStatus::Published);
    let published_news = count_where(state.news.list(), |n| n.status == NewsStatus::Published);
    DashboardOverview {
        users: state.users.len(),
        active_users: count_where(state.users.list(), |u| u.status == ActivityStatus::Active),
        published_items: published_content + published_news,
        active_banners: count_where(state.banners.list(), |b| b.status == ActivityStatus::Active),
        news_items: state.news.len(),
        latest_day_visits: statistics_helpers::latest_day(&state.visitor_stats).map_or(0, |d| d.visits),
        total_searches: state.search_queries.len(),
    }
}
