//! The algorithm registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::history::History;
use crate::item::Sortable;
use crate::{bubble, heap, insertion, merge, quick, selection};

/// A sorting algorithm that can produce a [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Insertion,
    Selection,
    Bubble,
    Merge,
    Heap,
    Quick,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Bubble,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Quick,
    ];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Insertion => "insertion",
            Algorithm::Selection => "selection",
            Algorithm::Bubble => "bubble",
            Algorithm::Merge => "merge",
            Algorithm::Heap => "heap",
            Algorithm::Quick => "quick",
        }
    }

    /// Whether equal keys keep their input order.
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            Algorithm::Insertion | Algorithm::Bubble | Algorithm::Merge
        )
    }

    /// Run this algorithm over a private copy of `items` and record its history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if any order key is not comparable.
    pub fn generate<T: Sortable>(&self, items: &[T]) -> Result<History<T>> {
        match self {
            Algorithm::Insertion => insertion::insertion_sort(items),
            Algorithm::Selection => selection::selection_sort(items),
            Algorithm::Bubble => bubble::bubble_sort(items),
            Algorithm::Merge => merge::merge_sort(items),
            Algorithm::Heap => heap::heap_sort(items),
            Algorithm::Quick => quick::quick_sort(items),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts `quick`, `quicksort`, `quick-sort` and `quick_sort`, in any case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        let base = normalized.strip_suffix("sort").unwrap_or(&normalized);

        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == base)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}
