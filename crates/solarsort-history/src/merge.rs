//! Top-down merge sort.
//!
//! Every merge is recorded twice: once before, with the two runs highlighted,
//! and once after, with the merged run marked sorted. Single-item ranges are
//! never recorded.

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::history::{Annotation, History, IndexRange, Recorder};
use crate::item::{validate, Sortable};

/// Record a merge sort of `items`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if any order key is not comparable.
pub fn merge_sort<T: Sortable>(items: &[T]) -> Result<History<T>> {
    validate(items)?;

    let mut arr = items.to_vec();
    let n = arr.len();
    let mut recorder = Recorder::new();

    recorder.record(&arr, Annotation::Initial);

    if n > 0 {
        sort_range(&mut arr, 0, n - 1, &mut recorder);
    }

    recorder.record(&arr, Annotation::sorted_through(n));
    Ok(recorder.finish(Algorithm::Merge, n))
}

fn sort_range<T: Sortable>(arr: &mut [T], left: usize, right: usize, recorder: &mut Recorder<T>) {
    if left >= right {
        return;
    }

    let mid = left + (right - left) / 2;
    sort_range(arr, left, mid, recorder);
    sort_range(arr, mid + 1, right, recorder);
    merge(arr, left, mid, right, recorder);
}

/// Merge the sorted runs `left..=mid` and `mid+1..=right` in place.
fn merge<T: Sortable>(
    arr: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    recorder: &mut Recorder<T>,
) {
    recorder.record(
        arr,
        Annotation::HighlightRanges {
            ranges: vec![IndexRange(left, mid), IndexRange(mid + 1, right)],
        },
    );

    let left_run = arr[left..=mid].to_vec();
    let right_run = arr[mid + 1..=right].to_vec();
    let (mut i, mut j) = (0, 0);

    for slot in &mut arr[left..=right] {
        // `<=` lets the left run win ties.
        let take_left = match (left_run.get(i), right_run.get(j)) {
            (Some(l), Some(r)) => l.order() <= r.order(),
            (Some(_), None) => true,
            _ => false,
        };

        if take_left {
            *slot = left_run[i].clone();
            i += 1;
        } else {
            *slot = right_run[j].clone();
            j += 1;
        }
    }

    recorder.record(
        arr,
        Annotation::SortedRanges {
            ranges: vec![IndexRange(left, right)],
        },
    );
}
