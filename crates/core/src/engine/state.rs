//! # Catalog State
//!
//! The data the engine owns: the loaded items, the active filter, and the
//! staged-mutation slots. Mutation goes through `CatalogStateEngine`;
//! everything here is read-side.

use crate::model::{Game, GameDraft};

/// Client-side filter over the loaded catalog.
///
/// An item is visible iff its identifier contains `category_prefix` (when
/// set) AND its name contains `name_substring` case-insensitively (when
/// set). Absent predicates pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Substring matched against the item identifier.
    pub category_prefix: Option<String>,
    /// Case-insensitive substring matched against the item name.
    pub name_substring: Option<String>,
}

impl Filter {
    /// True when neither predicate is set.
    pub fn is_empty(&self) -> bool {
        self.category_prefix.is_none() && self.name_substring.is_none()
    }

    /// Apply both predicates (logical AND).
    pub fn matches(&self, game: &Game) -> bool {
        let category_ok = self
            .category_prefix
            .as_deref()
            .map_or(true, |prefix| game.id.contains(prefix));
        let name_ok = self.name_substring.as_deref().map_or(true, |needle| {
            game.name.to_lowercase().contains(&needle.to_lowercase())
        });
        category_ok && name_ok
    }
}

/// Staged mutations awaiting user confirmation, one slot per kind.
///
/// Each slot runs `Idle -> Staged -> Idle` independently; staging an
/// already-staged slot is rejected. Cross-kind staging is not constrained.
#[derive(Debug, Clone, Default)]
pub struct Pending {
    /// Identifier awaiting delete confirmation.
    pub deletion: Option<String>,
    /// Draft awaiting create confirmation.
    pub creation: Option<GameDraft>,
    /// Target identifier and patch awaiting update confirmation.
    pub update: Option<(String, GameDraft)>,
}

impl Pending {
    /// True when no mutation of any kind is staged.
    pub fn is_idle(&self) -> bool {
        self.deletion.is_none() && self.creation.is_none() && self.update.is_none()
    }
}

/// The engine-owned catalog state.
#[derive(Debug, Default)]
pub struct CatalogState {
    /// Loaded items, insertion order = server fetch order, unique by id.
    pub items: Vec<Game>,
    /// Active client-side filter.
    pub filter: Filter,
    /// Staged mutations.
    pub pending: Pending,
}

impl CatalogState {
    /// The filtered view: an order-preserving subsequence of `items`.
    ///
    /// Derived on demand, never stored.
    pub fn visible_items(&self) -> Vec<&Game> {
        self.items
            .iter()
            .filter(|game| self.filter.matches(game))
            .collect()
    }

    /// True when an item with this identifier is loaded.
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|game| game.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn game(id: &str, name: &str) -> Game {
        Game {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            author: "someone".to_string(),
            price: 10.0,
            image: String::new(),
        }
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let state = CatalogState {
            items: vec![game("GAMEA0001", "Foo"), game("GAMEB0001", "Bar")],
            ..CatalogState::default()
        };
        assert_eq!(state.visible_items().len(), 2);
    }

    #[test]
    fn test_category_prefix_filter() {
        let mut state = CatalogState {
            items: vec![game("GAMEA0001", "Foo"), game("GAMEB0001", "Bar")],
            ..CatalogState::default()
        };
        state.filter.category_prefix = Some("GAMEA".to_string());

        let visible = state.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "GAMEA0001");
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let mut state = CatalogState {
            items: vec![game("GAMEA0001", "Foo"), game("GAMEB0001", "Bar")],
            ..CatalogState::default()
        };
        state.filter.name_substring = Some("bar".to_string());

        let visible = state.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "GAMEB0001");
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let mut state = CatalogState {
            items: vec![
                game("GAMEA0001", "Foo"),
                game("GAMEA0002", "Bar"),
                game("GAMEB0001", "Bar"),
            ],
            ..CatalogState::default()
        };
        state.filter.category_prefix = Some("GAMEA".to_string());
        state.filter.name_substring = Some("BAR".to_string());

        let visible = state.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "GAMEA0002");
    }

    #[test]
    fn test_visible_items_preserve_relative_order() {
        let mut state = CatalogState {
            items: vec![
                game("GAMEA0003", "c"),
                game("GAMEB0001", "x"),
                game("GAMEA0001", "a"),
                game("GAMEA0002", "b"),
            ],
            ..CatalogState::default()
        };
        state.filter.category_prefix = Some("GAMEA".to_string());

        let ids: Vec<&str> = state.visible_items().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["GAMEA0003", "GAMEA0001", "GAMEA0002"]);
    }

    #[test]
    fn test_pending_idle() {
        let mut pending = Pending::default();
        assert!(pending.is_idle());
        pending.deletion = Some("GAMEA0001".to_string());
        assert!(!pending.is_idle());
    }
}
