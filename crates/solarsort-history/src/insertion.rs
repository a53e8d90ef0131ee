//! Insertion sort.
//!
//! One step per outer iteration, taken before the key is shifted into place.
//! The `SortedUntil` bound of that step is `i - 1`: the prefix sorted so far,
//! not a set of final positions.

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::history::{Annotation, History, Recorder};
use crate::item::{validate, Sortable};

/// Record an insertion sort of `items`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if any order key is not comparable.
pub fn insertion_sort<T: Sortable>(items: &[T]) -> Result<History<T>> {
    validate(items)?;

    let mut arr = items.to_vec();
    let mut recorder = Recorder::new();

    if arr.len() < 2 {
        recorder.record(&arr, Annotation::Initial);
    }

    for i in 1..arr.len() {
        recorder.record(
            &arr,
            Annotation::SortedUntil {
                index: i as isize - 1,
            },
        );

        // Equal keys stop the scan, so earlier items stay in front.
        let key = arr[i].order();
        let mut slot = i;
        while slot > 0 && arr[slot - 1].order() > key {
            slot -= 1;
        }
        arr[slot..=i].rotate_right(1);
    }

    recorder.record(&arr, Annotation::sorted_through(arr.len()));
    Ok(recorder.finish(Algorithm::Insertion, arr.len()))
}
