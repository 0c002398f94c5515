use crate::helper::form_helpers;
use crate::models::store_operations::aggregate_operations::{count_where, rounded_average, sum_by};
use crate::models::store_operations::{FilterComposer, Selection, StoreError};
use crate::models::{PopularSearch, SearchQuery, SearchSettings, Trend};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct SearchLogFilter {
    pub search: String,
    pub category: Selection<String>,
}

impl SearchLogFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, StoreError> {
        form_helpers::ensure_known_keys(params, &["category"])?;
        Ok(Self {
            search: form_helpers::search_term(params),
            category: form_helpers::selection(params, "category")?,
        })
    }
}

pub fn filter_search_log<'a>(queries: &'a [SearchQuery], filter: &SearchLogFilter) -> Vec<&'a SearchQuery> {
    FilterComposer::new()
        .search(&filter.search)
        .category(&filter.category, |q: &SearchQuery| q.category.clone())
        .apply(queries)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchStats {
    pub total_searches: usize,
    pub average_results: u64,
    pub zero_result_searches: usize,
}

pub fn search_stats(queries: &[SearchQuery]) -> SearchStats {
    SearchStats {
        total_searches: queries.len(),
        average_results: rounded_average(sum_by(queries, |q| q.results), queries.len()),
        zero_result_searches: count_where(queries, |q| q.results == 0),
    }
}

/// Popular searches, optionally narrowed to one trend, most frequent first.
pub fn popular_searches(searches: &[PopularSearch], trend: &Selection<Trend>) -> Vec<PopularSearch> {
    let mut hits: Vec<PopularSearch> = searches.iter().filter(|s| trend.matches(&s.trend)).cloned().collect();
    hits.sort_by(|a, b| b.count.cmp(&a.count));
    hits
}

/// Drops stop words from a whitespace-separated query.
pub fn strip_stop_words(query: &str, settings: &SearchSettings) -> String {
    query
        .split_whitespace()
        .filter(|word| !settings.stop_words.iter().any(|s| s == word))
        .collect::<Vec<_>>()
        .join(" ")
}
