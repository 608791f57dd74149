//! Display ordering for explorer listings.
//!
//! # Responsibility
//! - Sort the displayed node set only; storage order is never rewritten.
//!
//! # Invariants
//! - The sort is stable, so collection (insertion) order is the tie-break.
//! - `folders_first` wins over the key comparison and ignores direction.
//! - Missing dates compare as the empty string.

use crate::model::node::Node;
use std::cmp::Ordering;

/// Field the listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive name ordering.
    Name,
    /// Lexicographic ordering of the optional date field.
    Date,
}

/// Direction applied to the key comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active display ordering of one explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortMode {
    pub key: SortKey,
    pub direction: SortDirection,
    /// Places every folder before every file, regardless of key.
    pub folders_first: bool,
}

impl SortMode {
    /// Name ascending, files and folders interleaved.
    pub fn by_name() -> Self {
        Self {
            key: SortKey::Name,
            direction: SortDirection::Ascending,
            folders_first: false,
        }
    }

    /// Folders first, then name ascending.
    pub fn by_kind() -> Self {
        Self {
            folders_first: true,
            ..Self::by_name()
        }
    }

    /// Folders interleaved, ordered by the optional date field.
    pub fn by_date(direction: SortDirection) -> Self {
        Self {
            key: SortKey::Date,
            direction,
            folders_first: false,
        }
    }
}

impl Default for SortMode {
    fn default() -> Self {
        Self::by_name()
    }
}

/// Orders one displayed listing in place.
pub fn sort_listing(nodes: &mut [Node], mode: SortMode) {
    nodes.sort_by(|a, b| compare(a, b, mode));
}

fn compare(a: &Node, b: &Node, mode: SortMode) -> Ordering {
    if mode.folders_first {
        match (a.is_folder(), b.is_folder()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }

    let by_key = match mode.key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Date => a
            .date
            .as_deref()
            .unwrap_or("")
            .cmp(b.date.as_deref().unwrap_or("")),
    };

    match mode.direction {
        SortDirection::Ascending => by_key,
        SortDirection::Descending => by_key.reverse(),
    }
}
