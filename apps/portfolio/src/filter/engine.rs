//! Filter Engine: the category and project-type dual predicate.
//!
//! Pure functions over `CvItem` metadata. The UI layer owns the only
//! `FilterState` and passes it in; nothing here holds state between calls.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::filter::items::CvItem;

/// Sentinel meaning "match anything" in either dimension.
pub const ALL: &str = "all";

/// Current selection of the two filter surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Single-choice project class, lowercase. `"all"` matches any.
    pub active_project_type: String,
    /// Multi-choice categories, lowercase. Never empty; `{"all"}` matches any.
    pub selected_categories: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_project_type: ALL.to_string(),
            selected_categories: BTreeSet::from([ALL.to_string()]),
        }
    }
}

impl FilterState {
    /// Returns the state with a new active project type. Blank selects `"all"`.
    pub fn with_project_type(mut self, value: &str) -> Self {
        let value = value.trim().to_lowercase();
        self.active_project_type = if value.is_empty() {
            ALL.to_string()
        } else {
            value
        };
        self
    }

    /// Returns the state with a new category selection, normalized through
    /// `normalize_categories`.
    pub fn with_categories<I, S>(mut self, raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected_categories = normalize_categories(raw);
        self
    }

    pub fn shows_all_categories(&self) -> bool {
        self.selected_categories.contains(ALL)
    }

    pub fn shows_all_project_types(&self) -> bool {
        self.active_project_type == ALL
    }
}

/// Normalizes a raw multi-select into the effective category set.
///
/// Values are trimmed and lowercased; blanks are dropped. If `"all"` is among
/// them, or nothing remains, the selection collapses to `{"all"}`.
pub fn normalize_categories<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let selected: BTreeSet<String> = raw
        .into_iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();

    if selected.is_empty() || selected.contains(ALL) {
        BTreeSet::from([ALL.to_string()])
    } else {
        selected
    }
}

/// Which criteria a surface applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criteria {
    /// The project grid: project type AND category.
    TypeAndCategory,
    /// Certifications, experience and the filtered skill group.
    CategoryOnly,
}

pub fn project_type_matches(active_project_type: &str, item: &CvItem) -> bool {
    let active = active_project_type.trim().to_lowercase();
    if active == ALL {
        return true;
    }
    item.project_type
        .as_deref()
        .map(|t| t.to_lowercase() == active)
        .unwrap_or(false)
}

pub fn category_matches(selected_categories: &BTreeSet<String>, item: &CvItem) -> bool {
    if selected_categories
        .iter()
        .any(|c| c.eq_ignore_ascii_case(ALL))
    {
        return true;
    }
    selected_categories.iter().any(|selected| {
        let selected = selected.to_lowercase();
        item.categories.iter().any(|c| c.to_lowercase() == selected)
    })
}

pub fn is_visible(item: &CvItem, state: &FilterState, criteria: Criteria) -> bool {
    let type_ok = match criteria {
        Criteria::TypeAndCategory => project_type_matches(&state.active_project_type, item),
        Criteria::CategoryOnly => true,
    };
    type_ok && category_matches(&state.selected_categories, item)
}

/// Sets the visibility flag of every project item from both criteria.
pub fn apply_filters(
    items: &mut [CvItem],
    active_project_type: &str,
    selected_categories: &BTreeSet<String>,
) {
    for item in items.iter_mut() {
        item.visible = project_type_matches(active_project_type, item)
            && category_matches(selected_categories, item);
    }
}

/// Sets the visibility flag of every item from the category criterion alone.
pub fn apply_category_filter(items: &mut [CvItem], selected_categories: &BTreeSet<String>) {
    for item in items.iter_mut() {
        item.visible = category_matches(selected_categories, item);
    }
}

/// Applies `state` to `items` with the criteria of their surface.
pub fn apply_state(items: &mut [CvItem], state: &FilterState, criteria: Criteria) {
    match criteria {
        Criteria::TypeAndCategory => apply_filters(
            items,
            &state.active_project_type,
            &state.selected_categories,
        ),
        Criteria::CategoryOnly => apply_category_filter(items, &state.selected_categories),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(categories: &str, project_type: &str) -> CvItem {
        CvItem::from_attributes(Some(categories), Some(project_type))
    }

    fn sample_projects() -> Vec<CvItem> {
        vec![
            project("software,research", "web"),
            project("database", "data"),
            project("", "web"),
            CvItem::from_attributes(None, None),
        ]
    }

    fn visibility(items: &[CvItem]) -> Vec<bool> {
        items.iter().map(|i| i.visible).collect()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        normalize_categories(values.iter().copied())
    }

    #[test]
    fn test_default_state_shows_everything() {
        let mut items = sample_projects();
        let state = FilterState::default();
        apply_state(&mut items, &state, Criteria::TypeAndCategory);
        assert_eq!(visibility(&items), vec![true, true, true, true]);
    }

    #[test]
    fn test_project_type_filter_alone() {
        let mut items = sample_projects();
        apply_filters(&mut items, "web", &set(&["all"]));
        assert_eq!(visibility(&items), vec![true, false, true, false]);
    }

    #[test]
    fn test_project_type_is_case_insensitive() {
        let mut items = sample_projects();
        apply_filters(&mut items, "WEB", &set(&["all"]));
        assert_eq!(visibility(&items), vec![true, false, true, false]);
    }

    #[test]
    fn test_category_intersection() {
        let mut items = sample_projects();
        apply_filters(&mut items, "all", &set(&["research", "database"]));
        assert_eq!(visibility(&items), vec![true, true, false, false]);
    }

    #[test]
    fn test_both_criteria_must_hold() {
        let mut items = sample_projects();
        apply_filters(&mut items, "data", &set(&["software"]));
        assert_eq!(visibility(&items), vec![false, false, false, false]);

        apply_filters(&mut items, "web", &set(&["software"]));
        assert_eq!(visibility(&items), vec![true, false, false, false]);
    }

    #[test]
    fn test_empty_categories_only_match_all() {
        let item = CvItem::from_attributes(Some(""), None);
        assert!(!category_matches(&set(&["software"]), &item));
        assert!(category_matches(&set(&["all"]), &item));
    }

    #[test]
    fn test_missing_category_attribute_is_empty_set() {
        let item = CvItem::from_attributes(None, None);
        assert!(item.categories.is_empty());
        assert!(!category_matches(&set(&["research"]), &item));
        assert!(category_matches(&set(&["all"]), &item));
    }

    #[test]
    fn test_all_collapses_co_selected_values() {
        assert_eq!(set(&["software", "All", "research"]), set(&["all"]));
        let state = FilterState::default().with_categories(["software", "all"]);
        assert_eq!(
            state.selected_categories,
            BTreeSet::from(["all".to_string()])
        );
    }

    #[test]
    fn test_blank_selection_collapses_to_all() {
        assert_eq!(set(&[]), set(&["all"]));
        assert_eq!(set(&["  ", ""]), set(&["all"]));
    }

    #[test]
    fn test_all_categories_reduces_to_type_predicate() {
        let mut filtered = sample_projects();
        apply_filters(&mut filtered, "data", &set(&["all"]));
        let expected: Vec<bool> = sample_projects()
            .iter()
            .map(|i| project_type_matches("data", i))
            .collect();
        assert_eq!(visibility(&filtered), expected);
    }

    #[test]
    fn test_category_only_surface_ignores_type() {
        let mut items = sample_projects();
        let state = FilterState::default().with_project_type("data");
        apply_state(&mut items, &state, Criteria::CategoryOnly);
        assert_eq!(visibility(&items), vec![true, true, true, true]);

        let state = state.with_categories(["software"]);
        apply_state(&mut items, &state, Criteria::CategoryOnly);
        assert_eq!(visibility(&items), vec![true, false, false, false]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let state = FilterState::default()
            .with_project_type("web")
            .with_categories(["research"]);
        let mut items = sample_projects();
        apply_state(&mut items, &state, Criteria::TypeAndCategory);
        let first = visibility(&items);
        apply_state(&mut items, &state, Criteria::TypeAndCategory);
        apply_state(&mut items, &state, Criteria::TypeAndCategory);
        assert_eq!(visibility(&items), first);

        let mut fresh = sample_projects();
        apply_state(&mut fresh, &state, Criteria::TypeAndCategory);
        assert_eq!(visibility(&fresh), first);
    }

    #[test]
    fn test_hidden_items_reappear_when_filter_is_cleared() {
        let mut items = sample_projects();
        apply_filters(&mut items, "data", &set(&["database"]));
        assert_eq!(visibility(&items), vec![false, true, false, false]);
        apply_filters(&mut items, "all", &set(&["all"]));
        assert_eq!(visibility(&items), vec![true, true, true, true]);
    }

    #[test]
    fn test_empty_item_set_is_fine() {
        let mut items: Vec<CvItem> = Vec::new();
        apply_filters(&mut items, "web", &set(&["software"]));
        assert!(items.is_empty());
    }

    #[test]
    fn test_blank_project_type_selects_all() {
        let state = FilterState::default().with_project_type("  ");
        assert!(state.shows_all_project_types());
    }
}
