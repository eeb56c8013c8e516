// Favorites registry: the set of property ids the user has marked, with
// pure toggle semantics. The registry does not validate ids against the
// catalog; callers only toggle ids obtained from it.

use std::collections::BTreeSet;

use crate::catalog::PropertyId;

// Which way the membership flipped, for the notification subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteEvent {
    Added,
    Removed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    ids: BTreeSet<PropertyId>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Flips membership by exactly one element and reports which way.
    // Never fails.
    pub fn toggle(&mut self, id: PropertyId) -> FavoriteEvent {
        if self.ids.remove(&id) {
            FavoriteEvent::Removed
        } else {
            self.ids.insert(id);
            FavoriteEvent::Added
        }
    }

    pub fn contains(&self, id: PropertyId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = FavoritesSet::new();

        assert_eq!(favorites.toggle(3), FavoriteEvent::Added);
        assert!(favorites.contains(3));
        assert_eq!(favorites.len(), 1);

        assert_eq!(favorites.toggle(3), FavoriteEvent::Removed);
        assert!(!favorites.contains(3));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut favorites = FavoritesSet::new();
        favorites.toggle(1);
        favorites.toggle(4);
        let before = favorites.clone();

        favorites.toggle(9);
        favorites.toggle(9);

        assert_eq!(favorites, before);
    }

    #[test]
    fn test_each_toggle_changes_size_by_one() {
        let mut favorites = FavoritesSet::new();
        for id in 1..=5 {
            let before = favorites.len();
            favorites.toggle(id);
            assert_eq!(favorites.len(), before + 1);
        }
        for id in 1..=5 {
            let before = favorites.len();
            favorites.toggle(id);
            assert_eq!(favorites.len(), before - 1);
        }
    }

    #[test]
    fn test_uncataloged_id_still_flips() {
        // Validation is the caller's job; the registry itself never rejects
        let mut favorites = FavoritesSet::new();
        assert_eq!(favorites.toggle(999), FavoriteEvent::Added);
        assert!(favorites.contains(999));
    }
}
