//! Bubble sort with early exit.

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::history::{Annotation, History, Recorder};
use crate::item::{validate, Sortable};

/// Record a bubble sort of `items`.
///
/// One step before the first pass, one after every pass, one at the end.
/// A pass without swaps is still recorded, then the sort stops.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if any order key is not comparable.
pub fn bubble_sort<T: Sortable>(items: &[T]) -> Result<History<T>> {
    validate(items)?;

    let mut arr = items.to_vec();
    let n = arr.len();
    let mut recorder = Recorder::new();

    recorder.record(&arr, Annotation::SortedFrom { index: n });

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            if arr[j].order() > arr[j + 1].order() {
                arr.swap(j, j + 1);
                swapped = true;
            }
        }

        // The largest remaining item has bubbled up to n - 1 - pass.
        recorder.record(
            &arr,
            Annotation::SortedFrom {
                index: n - 1 - pass,
            },
        );

        if !swapped {
            break;
        }
    }

    recorder.record(&arr, Annotation::SortedFrom { index: 0 });
    Ok(recorder.finish(Algorithm::Bubble, n))
}
