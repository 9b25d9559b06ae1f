// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conjunctive catalog filtering with an "all" wildcard per dimension.

use std::collections::BTreeSet;
use std::str::FromStr;

use plaza_core::PlazaError;
use serde::Serialize;

use crate::item::{CatalogItem, Category};

/// Wildcard token accepted for every filter dimension.
pub const ALL_TOKEN: &str = "all";

/// A filter dimension: either everything or one exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// True when `value` passes this dimension. Items lacking the value only pass `All`.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted),
        }
    }
}

impl<T: FromStr> Selection<T> {
    /// Parses a query value. Missing, blank, and `"all"` mean [`Selection::All`].
    pub fn parse(raw: Option<&str>) -> Result<Self, T::Err> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Selection::All),
            Some(s) if s.eq_ignore_ascii_case(ALL_TOKEN) => Ok(Selection::All),
            Some(s) => s.parse().map(Selection::Only),
        }
    }
}

/// Category, seller and country selections, combined with AND.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogFilter {
    pub category: Selection<Category>,
    pub seller: Selection<String>,
    pub country: Selection<String>,
}

impl CatalogFilter {
    /// Builds a filter from raw query values. Unknown categories are invalid input.
    pub fn from_query(
        category: Option<&str>,
        seller: Option<&str>,
        country: Option<&str>,
    ) -> Result<Self, PlazaError> {
        let category = Selection::parse(category).map_err(|_| {
            PlazaError::InvalidInput(format!(
                "unknown category `{}`",
                category.unwrap_or_default()
            ))
        })?;
        Ok(Self {
            category,
            seller: text_selection(seller),
            country: text_selection(country),
        })
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.category.matches(Some(&item.category))
            && self.seller.matches(item.seller.as_ref())
            && self.country.matches(item.country.as_ref())
    }

    /// Items passing every dimension, in input order.
    pub fn apply(&self, items: &[CatalogItem]) -> Vec<CatalogItem> {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

fn text_selection(raw: Option<&str>) -> Selection<String> {
    match Selection::parse(raw) {
        Ok(selection) => selection,
        Err(never) => match never {},
    }
}

/// A listing that distinguishes "still loading" from "loaded, nothing matched".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "lowercase")]
pub enum ListingState<T> {
    Loading,
    Empty,
    Items(Vec<T>),
}

impl<T> ListingState<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            ListingState::Empty
        } else {
            ListingState::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListingState::Items(items) => items,
            ListingState::Loading | ListingState::Empty => &[],
        }
    }
}

/// Distinct sellers and countries present in a catalog, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Facets {
    pub sellers: Vec<String>,
    pub countries: Vec<String>,
}

pub fn facets(items: &[CatalogItem]) -> Facets {
    let sellers: BTreeSet<&String> = items.iter().filter_map(|i| i.seller.as_ref()).collect();
    let countries: BTreeSet<&String> = items.iter().filter_map(|i| i.country.as_ref()).collect();
    Facets {
        sellers: sellers.into_iter().cloned().collect(),
        countries: countries.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_catalog;

    #[test]
    fn parse_wildcards() {
        assert_eq!(Selection::<Category>::parse(None).unwrap(), Selection::All);
        assert_eq!(Selection::<Category>::parse(Some("all")).unwrap(), Selection::All);
        assert_eq!(Selection::<Category>::parse(Some(" ")).unwrap(), Selection::All);
        assert_eq!(
            Selection::<Category>::parse(Some("art")).unwrap(),
            Selection::Only(Category::Art)
        );
        assert!(Selection::<Category>::parse(Some("furniture")).is_err());
    }

    #[test]
    fn unknown_category_is_invalid_input() {
        let err = CatalogFilter::from_query(Some("furniture"), None, None).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn dimensions_combine_with_and() {
        let filter = CatalogFilter::from_query(Some("clothing"), Some("STUDIO_MINIMAL"), None).unwrap();
        let titles: Vec<_> = filter
            .apply(&demo_catalog())
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["Minimalist Tee", "Vintage Denim"]);
    }

    #[test]
    fn item_without_seller_only_passes_wildcard() {
        let mut item = demo_catalog().remove(0);
        item.seller = None;
        assert!(CatalogFilter::default().matches(&item));
        let filter = CatalogFilter::from_query(None, Some("STUDIO_MINIMAL"), None).unwrap();
        assert!(!filter.matches(&item));
    }

    #[test]
    fn no_match_yields_empty_state() {
        let filter = CatalogFilter::from_query(Some("fashion"), None, None).unwrap();
        let state = ListingState::from_items(filter.apply(&demo_catalog()));
        assert_eq!(state, ListingState::Empty);
        assert!(state.items().is_empty());
        assert_ne!(state, ListingState::Loading);
    }

    #[test]
    fn facets_are_sorted_and_distinct() {
        let f = facets(&demo_catalog());
        assert_eq!(f.sellers.first().map(String::as_str), Some("ATELIER_CLAY"));
        assert_eq!(
            f.countries,
            vec!["France", "Germany", "Italy", "Japan", "Portugal", "Sweden"]
        );
        assert_eq!(f.sellers.len(), 6);
    }

    #[test]
    fn listing_state_serializes_with_tag() {
        let json = serde_json::to_value(ListingState::<u8>::Empty).unwrap();
        assert_eq!(json["state"], "empty");
        let json = serde_json::to_value(ListingState::Items(vec![1u8])).unwrap();
        assert_eq!(json["state"], "items");
        assert_eq!(json["items"][0], 1);
    }
}
