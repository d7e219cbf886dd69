//! Query view: the filtered, sorted sequence a list screen renders.
//!
//! Everything here is a pure function of `(items, search term, sort config)`. Results borrow
//! from the store and are thrown away after use; nothing is cached between calls, so a change
//! of search term or sort config is always reflected on the next read.
//!
//! Sorting happens on the full store contents first and filtering second. Because the filter
//! predicate only looks at one item at a time, filtering never disturbs the sort order of the
//! items that survive it.

use crate::models::Entity;

// ============================================================================
// Search
// ============================================================================

/// Free-text search input.
///
/// Matched case-insensitively as a plain substring. The term is used exactly as typed:
/// surrounding whitespace is part of the needle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether at least one of `entity`'s designated fields contains this term.
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        entity
            .designated_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// Sort
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + Eq> SortConfig<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: K) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Apply a click on the `key` column header.
    ///
    /// Clicking the active column flips the direction; clicking any other column makes it
    /// active in ascending order.
    pub fn clicked(current: Option<Self>, key: K) -> Self {
        match current {
            Some(config) if config.key == key => Self::new(key, config.direction.flipped()),
            _ => Self::ascending(key),
        }
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// Items of `items` matched by `term`, in their given order.
pub fn filter<'a, E, I>(items: I, term: &SearchTerm) -> Vec<&'a E>
where
    E: Entity,
    I: IntoIterator<Item = &'a E>,
{
    items.into_iter().filter(|item| term.matches(*item)).collect()
}

/// Stable sort of `items` by `config`.
///
/// Descending reverses the comparator's sign, so items with equal keys keep their relative
/// order in both directions.
pub fn sort<E: Entity>(items: &[E], config: SortConfig<E::SortKey>) -> Vec<&E> {
    let mut sorted: Vec<&E> = items.iter().collect();
    sorted.sort_by(|a, b| {
        let ordering = a.compare_by(b, config.key);
        match config.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// The presentation sequence: sort (if configured), then filter.
pub fn derive_view<'a, E: Entity>(
    items: &'a [E],
    term: &SearchTerm,
    sort_config: Option<SortConfig<E::SortKey>>,
) -> Vec<&'a E> {
    match sort_config {
        Some(config) => filter(sort(items, config), term),
        None => filter(items, term),
    }
}
