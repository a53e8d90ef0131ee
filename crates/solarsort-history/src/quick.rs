//! Quick sort with Lomuto partitioning.
//!
//! The set of finalized positions is owned by [`quick_sort`] and threaded
//! through the recursion by `&mut`. Every recorded step gets its own sorted
//! copy of the set.

use std::collections::BTreeSet;

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::history::{Annotation, History, IndexRange, Recorder};
use crate::item::{validate, Sortable};

/// Record a quick sort of `items`, using the last item of each range as pivot.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if any order key is not comparable.
pub fn quick_sort<T: Sortable>(items: &[T]) -> Result<History<T>> {
    validate(items)?;

    let mut arr = items.to_vec();
    let n = arr.len();
    let mut finalized = BTreeSet::new();
    let mut recorder = Recorder::new();

    recorder.record(&arr, Annotation::Initial);
    sort_range(&mut arr, 0, n as isize - 1, &mut finalized, &mut recorder);
    recorder.record(&arr, Annotation::sorted_through(n));

    Ok(recorder.finish(Algorithm::Quick, n))
}

/// Sort `low..=high`. Bounds are signed because `pivot - 1` may be `-1`.
fn sort_range<T: Sortable>(
    arr: &mut [T],
    low: isize,
    high: isize,
    finalized: &mut BTreeSet<usize>,
    recorder: &mut Recorder<T>,
) {
    if low >= high {
        // An empty or single-item range is already in place. Its neighbours
        // are either off the end or pivots settled by an outer call.
        for bound in [low, high] {
            if let Ok(index) = usize::try_from(bound) {
                if index < arr.len() {
                    finalized.insert(index);
                }
            }
        }
        return;
    }

    let (lo, hi) = (low as usize, high as usize);

    recorder.record(
        arr,
        Annotation::Partition {
            active_range: IndexRange(lo, hi),
            pivot_index: hi,
            finalized_indices: snapshot(finalized),
        },
    );

    let pivot = partition(arr, lo, hi);
    finalized.insert(pivot);

    recorder.record(
        arr,
        Annotation::Finalized {
            finalized_indices: snapshot(finalized),
        },
    );

    sort_range(arr, low, pivot as isize - 1, finalized, recorder);
    sort_range(arr, pivot as isize + 1, high, finalized, recorder);
}

/// Lomuto partition of `low..=high` around `arr[high]`. Returns the pivot's final index.
fn partition<T: Sortable>(arr: &mut [T], low: usize, high: usize) -> usize {
    let pivot = arr[high].order();
    let mut boundary = low;

    for j in low..high {
        if arr[j].order() < pivot {
            arr.swap(boundary, j);
            boundary += 1;
        }
    }

    arr.swap(boundary, high);
    boundary
}

fn snapshot(finalized: &BTreeSet<usize>) -> Vec<usize> {
    finalized.iter().copied().collect()
}
