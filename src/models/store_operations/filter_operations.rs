use crate::models::PaginatedResponse;
use std::str::FromStr;

/// Sentinel used by list filters to mean "no constraint".
pub const ALL_SENTINEL: &str = "all";

/// A categorical filter value: either unconstrained or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<V> {
    #[default]
    All,
    Only(V),
}

impl<V: PartialEq> Selection<V> {
    pub fn matches(&self, value: &V) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<V: FromStr> FromStr for Selection<V> {
    type Err = V::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_SENTINEL {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

/// Records that take part in free-text search.
pub trait Searchable {
    /// The text fields a search term is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Case folding applied to both the term and the fields. Only ASCII letters
/// fold; other scripts compare exactly.
pub fn fold_case(text: &str) -> String {
    text.to_ascii_lowercase()
}

pub fn matches_search<T: Searchable>(record: &T, term: &str) -> bool {
    let needle = fold_case(term);
    needle.is_empty() || record.search_fields().iter().any(|field| fold_case(field).contains(&needle))
}

/// AND-composition of one search term with any number of categorical predicates.
pub struct FilterComposer<'a, T> {
    search: String,
    predicates: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
}

impl<'a, T: Searchable> Default for FilterComposer<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Searchable> FilterComposer<'a, T> {
    pub fn new() -> Self {
        Self { search: String::new(), predicates: Vec::new() }
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = fold_case(term.trim());
        self
    }

    /// Adds an equality constraint on the field returned by `field`.
    pub fn category<V, F>(mut self, selection: &'a Selection<V>, field: F) -> Self
    where
        V: PartialEq + 'a,
        F: Fn(&T) -> V + 'a,
    {
        if let Selection::Only(_) = selection {
            self.predicates.push(Box::new(move |record| selection.matches(&field(record))));
        }
        self
    }

    /// Adds an arbitrary predicate, for constraints that are not plain equality.
    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn matches(&self, record: &T) -> bool {
        matches_search(record, &self.search) && self.predicates.iter().all(|p| p(record))
    }

    /// Matching records in collection order.
    pub fn apply<'r>(&self, records: &'r [T]) -> Vec<&'r T> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Slices `items` into 1-based pages. Pages past the end come back empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> PaginatedResponse<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total = items.len();
    let last_page = total.div_ceil(page_size).max(1);
    let data = match (page - 1).checked_mul(page_size) {
        Some(offset) => items.iter().skip(offset).take(page_size).cloned().collect(),
        None => Vec::new(),
    };
    PaginatedResponse { data, page, last_page, total }
}
