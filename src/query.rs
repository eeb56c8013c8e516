// Filter/sort engine: a pure function from (catalog, criteria, sort key)
// to an ordered result list. Identical inputs always produce an identical
// list, so the engine is unit-testable without any state setup.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, Category, PropertyRecord};

// User-selected filter constraints. An empty set on a dimension means
// "no constraint on this dimension", not "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub categories: BTreeSet<Category>,
    pub amenities: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.amenities.is_empty()
    }

    // Category matching is disjunctive (any selected category), amenity
    // matching is conjunctive (every required tag), with an AND between
    // the two dimensions.
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        let category_ok =
            self.categories.is_empty() || self.categories.contains(&record.category);
        let amenities_ok = self.amenities.is_empty()
            || self
                .amenities
                .iter()
                .all(|tag| record.amenities.contains(tag));

        category_ok && amenities_ok
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    // Catalog insertion order, no reordering
    #[default]
    Relevance,
    PriceAscending,
    RatingDescending,
}

// Never fails: zero matches is a valid outcome represented by an empty
// list. Sorts are stable, so equal keys keep their catalog order.
pub fn query<'a>(
    catalog: &'a Catalog,
    criteria: &FilterCriteria,
    sort: SortKey,
) -> Vec<&'a PropertyRecord> {
    let mut results: Vec<&PropertyRecord> = catalog
        .properties()
        .iter()
        .filter(|record| criteria.matches(record))
        .collect();

    match sort {
        SortKey::Relevance => {}
        SortKey::PriceAscending => results.sort_by_key(|record| record.price_per_night),
        SortKey::RatingDescending => {
            results.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
    }

    results
}
