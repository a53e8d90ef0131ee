//! Selection sort.

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::history::{Annotation, History, Recorder};
use crate::item::{validate, Sortable};

/// Record a selection sort of `items`.
///
/// Each outer iteration records the array before its swap, tagged with the
/// previous iteration's bound (`i - 1`). Ties go to the first minimum found.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if any order key is not comparable.
pub fn selection_sort<T: Sortable>(items: &[T]) -> Result<History<T>> {
    validate(items)?;

    let mut arr = items.to_vec();
    let n = arr.len();
    let mut recorder = Recorder::new();

    if n < 2 {
        recorder.record(&arr, Annotation::Initial);
    }

    for i in 0..n.saturating_sub(1) {
        let mut min_index = i;
        for j in i + 1..n {
            if arr[j].order() < arr[min_index].order() {
                min_index = j;
            }
        }

        recorder.record(
            &arr,
            Annotation::SortedUntil {
                index: i as isize - 1,
            },
        );

        if min_index != i {
            arr.swap(i, min_index);
        }
    }

    recorder.record(&arr, Annotation::sorted_through(n));
    Ok(recorder.finish(Algorithm::Selection, n))
}
