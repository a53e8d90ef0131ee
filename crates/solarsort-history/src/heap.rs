//! Heap sort over an in-place max-heap.

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::history::{Annotation, History, Recorder};
use crate::item::{validate, Sortable};

/// Record a heap sort of `items`.
///
/// Only swaps are recorded: each sift-down swap, and each extraction of the
/// root into its final slot. `SortedFrom` marks where the finished suffix
/// starts (`n` while the heap is being built).
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if any order key is not comparable.
pub fn heap_sort<T: Sortable>(items: &[T]) -> Result<History<T>> {
    validate(items)?;

    let mut arr = items.to_vec();
    let n = arr.len();
    let mut recorder = Recorder::new();

    recorder.record(&arr, Annotation::SortedFrom { index: n });

    for root in (0..n / 2).rev() {
        heapify(&mut arr, n, root, n, &mut recorder);
    }

    for end in (1..n).rev() {
        arr.swap(0, end);
        recorder.record(&arr, Annotation::SortedFrom { index: end });
        heapify(&mut arr, end, 0, end, &mut recorder);
    }

    recorder.record(&arr, Annotation::SortedFrom { index: 0 });
    Ok(recorder.finish(Algorithm::Heap, n))
}

/// Sift `root` down within the first `heap_size` items.
fn heapify<T: Sortable>(
    arr: &mut [T],
    heap_size: usize,
    root: usize,
    sorted_from: usize,
    recorder: &mut Recorder<T>,
) {
    let left = 2 * root + 1;
    let right = left + 1;
    let mut largest = root;

    if left < heap_size && arr[left].order() > arr[largest].order() {
        largest = left;
    }
    if right < heap_size && arr[right].order() > arr[largest].order() {
        largest = right;
    }

    if largest != root {
        arr.swap(root, largest);
        recorder.record(arr, Annotation::SortedFrom { index: sorted_from });
        heapify(arr, heap_size, largest, sorted_from, recorder);
    }
}
