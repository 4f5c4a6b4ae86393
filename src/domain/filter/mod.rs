//! Client-side list filtering.
//!
//! Facets combine with AND across dimensions and OR within the multi-select
//! category/supplier facet. Everything here is pure; the view-model owns the state.

use crate::domain::model::{FacetField, StatusPolicy, StockItem, StockStatus};
use caseless::default_case_fold_str;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Search,
    Category,
    Status,
}

/// One active filter, shown as a removable badge.
///
/// Removal is driven by the variant itself; the display label is never parsed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterTag {
    Search(String),
    Category(String),
    Status(StockStatus),
}

impl FilterTag {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterTag::Search(_) => FilterKind::Search,
            FilterTag::Category(_) => FilterKind::Category,
            FilterTag::Status(_) => FilterKind::Status,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            FilterTag::Search(v) | FilterTag::Category(v) => v,
            FilterTag::Status(s) => s.label(),
        }
    }

    pub fn label(&self) -> String {
        let prefix = match self.kind() {
            FilterKind::Search => "Search",
            FilterKind::Category => "Category",
            FilterKind::Status => "Status",
        };
        format!("{}: {}", prefix, self.value())
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterQuery {
    /// Case-insensitive substring of name or id. Empty matches everything.
    pub text: String,
    /// Selected facet values, distinct, in selection order. Empty matches everything.
    pub categories: Vec<String>,
    pub status: Option<StockStatus>,
    /// Field the `categories` selection is compared against.
    pub facet: FacetField,
}

impl FilterQuery {
    pub fn with_facet(facet: FacetField) -> Self {
        Self {
            facet,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.categories.is_empty() && self.status.is_none()
    }

    pub fn matches(&self, item: &StockItem, policy: &StatusPolicy) -> bool {
        self.matches_text(item) && self.matches_facet(item) && self.matches_status(item, policy)
    }

    fn matches_text(&self, item: &StockItem) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let needle = default_case_fold_str(&self.text);
        default_case_fold_str(&item.name).contains(&needle)
            || default_case_fold_str(&item.id).contains(&needle)
    }

    fn matches_facet(&self, item: &StockItem) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        match item.facet_value(self.facet) {
            Some(value) => self.categories.iter().any(|c| c == value),
            None => false,
        }
    }

    fn matches_status(&self, item: &StockItem, policy: &StatusPolicy) -> bool {
        match self.status {
            Some(wanted) => item.effective_status(policy) == wanted,
            None => true,
        }
    }

    /// Activates the piece of state the tag describes.
    pub fn apply(&mut self, tag: &FilterTag) {
        match tag {
            FilterTag::Search(text) => self.text = text.clone(),
            FilterTag::Category(value) => self.toggle_category(value, true),
            FilterTag::Status(status) => self.status = Some(*status),
        }
    }

    /// Clears exactly the piece of state the tag describes.
    pub fn remove(&mut self, tag: &FilterTag) {
        match tag {
            FilterTag::Search(_) => self.text.clear(),
            FilterTag::Category(value) => self.toggle_category(value, false),
            FilterTag::Status(_) => self.status = None,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.categories.clear();
        self.status = None;
    }

    /// Checkbox semantics: checking an already-selected value is a no-op.
    pub fn toggle_category(&mut self, value: &str, checked: bool) {
        if checked {
            if !self.categories.iter().any(|c| c == value) {
                self.categories.push(value.to_string());
            }
        } else {
            self.categories.retain(|c| c != value);
        }
    }

    /// Status select box: `"all"` or an empty choice clears the facet.
    pub fn set_status_choice(&mut self, choice: &str) -> Result<(), String> {
        let choice = choice.trim();
        if choice.is_empty() || choice.eq_ignore_ascii_case("all") {
            self.status = None;
            return Ok(());
        }
        self.status = Some(choice.parse()?);
        Ok(())
    }

    /// Drops selected facet values that are not in `available`. Returns what was dropped.
    pub fn retain_known(&mut self, available: &[String]) -> Vec<String> {
        let (kept, dropped): (Vec<String>, Vec<String>) = self
            .categories
            .drain(..)
            .partition(|c| available.iter().any(|a| a == c));
        self.categories = kept;
        dropped
    }
}

/// Items matching every facet of `query`, in input order.
pub fn filter<'a>(
    records: &'a [StockItem],
    query: &FilterQuery,
    policy: &StatusPolicy,
) -> Vec<&'a StockItem> {
    records.iter().filter(|item| query.matches(item, policy)).collect()
}

/// Distinct non-empty values of `field`, in first-seen order.
pub fn distinct_values(records: &[StockItem], field: FacetField) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in records.iter().filter_map(|item| item.facet_value(field)) {
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

/// Badges for the active filters: search first, then one per category, then status.
pub fn describe_active_filters(query: &FilterQuery) -> Vec<FilterTag> {
    let mut tags = Vec::with_capacity(query.categories.len() + 2);
    if !query.text.is_empty() {
        tags.push(FilterTag::Search(query.text.clone()));
    }
    tags.extend(query.categories.iter().cloned().map(FilterTag::Category));
    if let Some(status) = query.status {
        tags.push(FilterTag::Status(status));
    }
    tags
}
