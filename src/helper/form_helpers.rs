use crate::models::store_operations::{Selection, StoreError};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use url::form_urlencoded;

/// Key carrying the free-text search term.
pub const SEARCH_KEY: &str = "q";

/// Parses URL-encoded filter parameters such as `q=news&status=active`.
/// A leading `?` is ignored; a repeated key keeps its last value.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let query = query.trim().trim_start_matches('?');
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

pub fn search_term(params: &HashMap<String, String>) -> String {
    params.get(SEARCH_KEY).map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Reads a categorical filter; a missing key means `all`.
pub fn selection<V>(params: &HashMap<String, String>, key: &str) -> Result<Selection<V>, StoreError>
where
    V: FromStr,
    V::Err: Display,
{
    match params.get(key) {
        None => Ok(Selection::All),
        Some(raw) => raw
            .parse()
            .map_err(|e: V::Err| StoreError::Validation(format!("Invalid '{}' filter: {}", key, e))),
    }
}

/// Rejects keys a list view does not understand, so typos do not silently match everything.
pub fn ensure_known_keys(params: &HashMap<String, String>, allowed: &[&str]) -> Result<(), StoreError> {
    let mut unknown: Vec<&str> = params
        .keys()
        .map(String::as_str)
        .filter(|k| *k != SEARCH_KEY && !allowed.contains(k))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(StoreError::Validation(format!(
        "Unknown filter parameter(s): {}. Allowed: {}",
        unknown.join(", "),
        allowed.join(", ")
    )))
}
