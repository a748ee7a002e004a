//! Derives a display-ready page of records from a full in-memory
//! collection: search + field filters, stable sort, slice.
//!
//! Every table in the dashboard (API keys, webhooks, transactions) goes
//! through `select`, so the filter/sort/paginate rules live in exactly
//! one place.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A record that can be searched, filtered by named fields and compared
/// by named sort keys.
pub trait ListRecord {
    /// Case handling is up to the implementor; the dashboard matches
    /// case-insensitively.
    fn matches_search(&self, term: &str) -> bool;

    /// The record's value for a filterable field, or `None` if the field
    /// does not apply to this record type.
    fn field(&self, name: &str) -> Option<String>;

    /// Compare two records by the named sort key. Unknown keys compare
    /// equal, which leaves the input order untouched (the sort is stable).
    fn compare_by(&self, other: &Self, key: &str) -> Ordering;
}

#[derive(Debug, Clone)]
pub struct ListQuery {
    pub search: Option<String>,
    /// Active filter sets per field. An empty set is no constraint.
    pub filters: HashMap<String, HashSet<String>>,
    pub sort_key: String,
    pub direction: SortDirection,
    /// Zero-based page index. Out-of-range pages are not clamped; the
    /// resulting slice is simply empty.
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    pub fn new(sort_key: &str, direction: SortDirection) -> Self {
        Self {
            search: None,
            filters: HashMap::new(),
            sort_key: sort_key.to_string(),
            direction,
            page: 0,
            page_size: 10,
        }
    }

    pub fn with_filter(mut self, field: &str, values: HashSet<String>) -> Self {
        self.filters.insert(field.to_string(), values);
        self
    }
}

/// A parsed `sort=key,direction` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses `"date,desc"` / `"name,asc"`. A missing or unrecognized
    /// direction falls back to descending, a missing key to the default.
    pub fn parse(raw: &str, default_key: &str) -> Self {
        let mut parts = raw.splitn(2, ',');
        let key = match parts.next().map(str::trim) {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => default_key.to_string(),
        };
        let direction = match parts.next().map(str::trim) {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };
        SortSpec { key, direction }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub page_items: Vec<T>,
    pub total_pages: usize,
    pub total_count: usize,
}

fn passes<T: ListRecord>(item: &T, query: &ListQuery) -> bool {
    if let Some(term) = query.search.as_deref() {
        if !term.is_empty() && !item.matches_search(term) {
            return false;
        }
    }
    query.filters.iter().all(|(field, allowed)| {
        allowed.is_empty()
            || item
                .field(field)
                .is_some_and(|value| allowed.contains(&value))
    })
}

/// Filter by search term AND all active filter sets, stable-sort by the
/// sort key, slice out the requested page.
pub fn select<T: ListRecord + Clone>(items: &[T], query: &ListQuery) -> ListPage<T> {
    let mut matched: Vec<T> = items
        .iter()
        .filter(|item| passes(*item, query))
        .cloned()
        .collect();

    matched.sort_by(|a, b| {
        let ord = a.compare_by(b, &query.sort_key);
        match query.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    let total_count = matched.len();
    let total_pages = if total_count == 0 || query.page_size == 0 {
        0
    } else {
        total_count.div_ceil(query.page_size)
    };

    let start = query.page.saturating_mul(query.page_size);
    let page_items = if start >= total_count {
        Vec::new()
    } else {
        matched[start..(start + query.page_size).min(total_count)].to_vec()
    };

    ListPage {
        page_items,
        total_pages,
        total_count,
    }
}
