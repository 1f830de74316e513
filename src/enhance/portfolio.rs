//! Portfolio grid filtering: tag buttons plus a debounced search box.

use std::time::{Duration, Instant};

use super::timing::Debouncer;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioItem {
    pub title: String,
    pub client: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl PortfolioItem {
    pub fn new(title: &str, client: &str, category: &str, tags: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            client: client.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Filter buttons use `*` for everything and `.tag` for one tag
    pub fn matches_filter(&self, filter: &str) -> bool {
        if filter == "*" {
            return true;
        }
        let tag = filter.strip_prefix('.').unwrap_or(filter);
        self.tags.iter().any(|t| t == tag)
    }

    pub fn matches_search(&self, term: &str) -> bool {
        let searchable = format!(
            "{} {} {} {}",
            self.title,
            self.client,
            self.category,
            self.tags.join(" ")
        )
        .to_lowercase();
        searchable.contains(&term.to_lowercase())
    }
}

/// Visibility of each portfolio item under the active filter or search.
///
/// Like the page, whichever of filter and search ran last decides what
/// is shown.
#[derive(Debug, Clone)]
pub struct PortfolioFilter {
    items: Vec<PortfolioItem>,
    visible: Vec<bool>,
    active_filter: String,
    search: Debouncer<String>,
    search_term: String,
}

impl PortfolioFilter {
    pub fn new(items: Vec<PortfolioItem>) -> Self {
        Self::with_debounce(items, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(items: Vec<PortfolioItem>, wait: Duration) -> Self {
        let visible = vec![true; items.len()];
        Self {
            items,
            visible,
            active_filter: "*".to_string(),
            search: Debouncer::new(wait),
            search_term: String::new(),
        }
    }

    pub fn items(&self) -> &[PortfolioItem] {
        &self.items
    }

    pub fn active_filter(&self) -> &str {
        &self.active_filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &PortfolioItem> {
        self.items
            .iter()
            .zip(&self.visible)
            .filter_map(|(item, shown)| shown.then_some(item))
    }

    /// Filter button click; applies immediately
    pub fn apply_filter(&mut self, filter: &str) {
        self.active_filter = filter.to_string();
        for (item, shown) in self.items.iter().zip(self.visible.iter_mut()) {
            *shown = item.matches_filter(filter);
        }
    }

    /// Search box input; applied once typing pauses
    pub fn search_input(&mut self, term: &str, now: Instant) {
        self.search.call(term.to_string(), now);
    }

    /// Apply a pending search whose debounce has elapsed. Returns true if it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(term) = self.search.poll(now) else {
            return false;
        };
        for (item, shown) in self.items.iter().zip(self.visible.iter_mut()) {
            *shown = item.matches_search(&term);
        }
        tracing::trace!(%term, "portfolio search applied");
        self.search_term = term;
        true
    }
}
