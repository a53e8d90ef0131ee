//! Sorting History Generation
//!
//! Runs a classic sorting algorithm over a private copy of the input and
//! records a replayable [`History`]: a full snapshot of the array at every
//! meaningful point, plus an [`Annotation`] saying what was happening.
//!
//! # Guarantees
//!
//! For every algorithm and every valid input:
//!
//! - the input slice is never touched
//! - the first step's state equals the input, the last is sorted ascending
//! - every step holds exactly the input's items, reordered
//! - there are at least two steps, even for empty input
//! - insertion, bubble and merge keep equal keys in input order
//!
//! Step counts stay small: one step per outer iteration for the quadratic
//! sorts, a bounded number per merge, sift swap or partition for the others.
//!
//! # Usage
//!
//! ```
//! use solarsort_history::{Algorithm, Annotation, Item};
//!
//! let items = vec![Item::new(3.0), Item::new(1.0), Item::new(2.0)];
//! let history = Algorithm::Insertion.generate(&items).unwrap();
//!
//! assert_eq!(history.len(), 3);
//! assert_eq!(history.final_state()[0].order, 1.0);
//! assert_eq!(
//!     history.last().map(|step| &step.annotation),
//!     Some(&Annotation::SortedUntil { index: 2 })
//! );
//! ```

mod algorithm;
mod error;
mod history;
mod item;

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

#[cfg(test)]
mod properties;

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use history::{Annotation, Emphasis, History, HistoryStep, IndexRange};
pub use item::{Item, Sortable};

pub use bubble::bubble_sort;
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;
