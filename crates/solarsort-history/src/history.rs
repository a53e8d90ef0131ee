//! Recorded sorting histories.
//!
//! A [`History`] is a sequence of full array snapshots. Each snapshot carries
//! exactly one [`Annotation`] saying what the algorithm was doing when it was
//! taken. Renderers walk the history pairwise and animate each transition.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithm::Algorithm;

/// An inclusive index range, serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexRange(pub usize, pub usize);

impl IndexRange {
    /// First index in the range.
    pub fn start(&self) -> usize {
        self.0
    }

    /// Last index in the range (inclusive).
    pub fn end(&self) -> usize {
        self.1
    }

    /// Whether `index` falls inside the range.
    pub fn contains(&self, index: usize) -> bool {
        self.0 <= index && index <= self.1
    }
}

/// Why a snapshot was taken.
///
/// Each algorithm uses a fixed subset of these:
///
/// | algorithm | annotations |
/// |---|---|
/// | insertion, selection | `SortedUntil` (plus `Initial` for inputs shorter than two) |
/// | bubble, heap | `SortedFrom` |
/// | merge | `Initial`, `HighlightRanges`, `SortedRanges`, `SortedUntil` |
/// | quick | `Initial`, `Partition`, `Finalized`, `SortedUntil` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Annotation {
    /// The untouched input.
    Initial,

    /// Indices `0..=index` form the sorted prefix. `-1` means no prefix yet.
    SortedUntil { index: isize },

    /// Indices `index..` hold their final values. `n` means nothing yet.
    SortedFrom { index: usize },

    /// Two adjacent runs about to be merged (pre-merge state).
    HighlightRanges { ranges: Vec<IndexRange> },

    /// Runs that were just merged (post-merge state).
    SortedRanges { ranges: Vec<IndexRange> },

    /// A range about to be partitioned around the pivot at `pivot_index`.
    Partition {
        active_range: IndexRange,
        pivot_index: usize,
        finalized_indices: Vec<usize>,
    },

    /// Positions settled so far, after a partition.
    Finalized { finalized_indices: Vec<usize> },
}

/// How a renderer should emphasise a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Emphasis {
    None,
    Sorted,
    Highlighted,
    Active,
    Pivot,
    Finalized,
}

impl Annotation {
    /// The annotation of a fully sorted array of `len` items.
    pub(crate) fn sorted_through(len: usize) -> Self {
        Annotation::SortedUntil {
            index: len as isize - 1,
        }
    }

    /// Resolve this annotation to the emphasis of slot `index`.
    pub fn emphasis(&self, index: usize) -> Emphasis {
        match self {
            Annotation::Initial => Emphasis::None,
            Annotation::SortedUntil { index: bound } => {
                if (index as isize) <= *bound {
                    Emphasis::Sorted
                } else {
                    Emphasis::None
                }
            }
            Annotation::SortedFrom { index: bound } => {
                if index >= *bound {
                    Emphasis::Sorted
                } else {
                    Emphasis::None
                }
            }
            Annotation::HighlightRanges { ranges } => {
                if ranges.iter().any(|r| r.contains(index)) {
                    Emphasis::Highlighted
                } else {
                    Emphasis::None
                }
            }
            Annotation::SortedRanges { ranges } => {
                if ranges.iter().any(|r| r.contains(index)) {
                    Emphasis::Sorted
                } else {
                    Emphasis::None
                }
            }
            Annotation::Partition {
                active_range,
                pivot_index,
                finalized_indices,
            } => {
                if index == *pivot_index {
                    Emphasis::Pivot
                } else if finalized_indices.contains(&index) {
                    Emphasis::Finalized
                } else if active_range.contains(index) {
                    Emphasis::Active
                } else {
                    Emphasis::None
                }
            }
            Annotation::Finalized { finalized_indices } => {
                if finalized_indices.contains(&index) {
                    Emphasis::Finalized
                } else {
                    Emphasis::None
                }
            }
        }
    }

    /// Emphasis for every slot of an array of `len` items.
    pub fn emphasis_map(&self, len: usize) -> Vec<Emphasis> {
        (0..len).map(|i| self.emphasis(i)).collect()
    }
}

/// One recorded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStep<T> {
    /// Full copy of the working array at this point.
    pub state: Vec<T>,
    pub annotation: Annotation,
}

/// The complete trace of one sorting run.
///
/// Always holds at least two steps. The first step's state is the input and
/// the last step's state is sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History<T> {
    algorithm: Algorithm,
    steps: Vec<HistoryStep<T>>,
}

impl<T> History<T> {
    /// The algorithm that produced this history.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// All recorded steps, in order.
    pub fn steps(&self) -> &[HistoryStep<T>] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&HistoryStep<T>> {
        self.steps.get(index)
    }

    /// The first step (a copy of the input).
    pub fn initial(&self) -> Option<&HistoryStep<T>> {
        self.steps.first()
    }

    /// The last step (the sorted array).
    pub fn last(&self) -> Option<&HistoryStep<T>> {
        self.steps.last()
    }

    /// The sorted array.
    pub fn final_state(&self) -> &[T] {
        self.steps.last().map_or(&[], |step| step.state.as_slice())
    }

    /// Consecutive `(previous, next)` step pairs, in replay order.
    pub fn transitions(&self) -> impl Iterator<Item = (&HistoryStep<T>, &HistoryStep<T>)> {
        self.steps.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Take the steps out of the history.
    pub fn into_steps(self) -> Vec<HistoryStep<T>> {
        self.steps
    }
}

impl<'a, T> IntoIterator for &'a History<T> {
    type Item = &'a HistoryStep<T>;
    type IntoIter = std::slice::Iter<'a, HistoryStep<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates snapshots for one generator invocation.
pub(crate) struct Recorder<T> {
    steps: Vec<HistoryStep<T>>,
}

impl<T: Clone> Recorder<T> {
    pub(crate) fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Snapshot `state` with the given annotation.
    pub(crate) fn record(&mut self, state: &[T], annotation: Annotation) {
        self.steps.push(HistoryStep {
            state: state.to_vec(),
            annotation,
        });
    }

    pub(crate) fn finish(self, algorithm: Algorithm, item_count: usize) -> History<T> {
        debug!(
            algorithm = %algorithm,
            items = item_count,
            steps = self.steps.len(),
            "history generated"
        );
        History {
            algorithm,
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_serialization() {
        let annotation = Annotation::Partition {
            active_range: IndexRange(0, 4),
            pivot_index: 4,
            finalized_indices: vec![5, 6],
        };

        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["kind"], "partition");
        assert_eq!(json["activeRange"], serde_json::json!([0, 4]));
        assert_eq!(json["pivotIndex"], 4);
        assert_eq!(json["finalizedIndices"], serde_json::json!([5, 6]));

        let parsed: Annotation = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, annotation);
    }

    #[test]
    fn sorted_until_json_shape() {
        let json = serde_json::to_string(&Annotation::SortedUntil { index: -1 }).unwrap();
        assert_eq!(json, r#"{"kind":"sortedUntil","index":-1}"#);
    }

    #[test]
    fn sorted_until_emphasis() {
        let annotation = Annotation::SortedUntil { index: 1 };
        assert_eq!(
            annotation.emphasis_map(4),
            vec![Emphasis::Sorted, Emphasis::Sorted, Emphasis::None, Emphasis::None]
        );

        let nothing = Annotation::SortedUntil { index: -1 };
        assert_eq!(nothing.emphasis(0), Emphasis::None);
    }

    #[test]
    fn sorted_from_emphasis() {
        let annotation = Annotation::SortedFrom { index: 3 };
        assert_eq!(annotation.emphasis(2), Emphasis::None);
        assert_eq!(annotation.emphasis(3), Emphasis::Sorted);

        let nothing = Annotation::SortedFrom { index: 4 };
        assert!(nothing.emphasis_map(4).iter().all(|e| *e == Emphasis::None));
    }

    #[test]
    fn partition_emphasis_prefers_pivot() {
        let annotation = Annotation::Partition {
            active_range: IndexRange(1, 3),
            pivot_index: 3,
            finalized_indices: vec![0],
        };
        assert_eq!(
            annotation.emphasis_map(5),
            vec![
                Emphasis::Finalized,
                Emphasis::Active,
                Emphasis::Active,
                Emphasis::Pivot,
                Emphasis::None,
            ]
        );
    }

    #[test]
    fn range_emphasis() {
        let highlight = Annotation::HighlightRanges {
            ranges: vec![IndexRange(0, 0), IndexRange(1, 1)],
        };
        assert_eq!(highlight.emphasis(1), Emphasis::Highlighted);
        assert_eq!(highlight.emphasis(2), Emphasis::None);

        let merged = Annotation::SortedRanges {
            ranges: vec![IndexRange(0, 1)],
        };
        assert_eq!(merged.emphasis(0), Emphasis::Sorted);
    }

    #[test]
    fn recorder_snapshots_are_independent() {
        let mut working = vec![3, 1, 2];
        let mut recorder = Recorder::new();
        recorder.record(&working, Annotation::Initial);
        working.swap(0, 1);
        recorder.record(&working, Annotation::Initial);

        let history = recorder.finish(Algorithm::Selection, 3);
        assert_eq!(history.steps()[0].state, vec![3, 1, 2]);
        assert_eq!(history.steps()[1].state, vec![1, 3, 2]);
    }

    #[test]
    fn transitions_are_pairwise() {
        let mut recorder = Recorder::new();
        for i in 0..4 {
            recorder.record(&[i], Annotation::Initial);
        }
        let history = recorder.finish(Algorithm::Bubble, 1);

        let pairs: Vec<_> = history
            .transitions()
            .map(|(from, to)| (from.state[0], to.state[0]))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
    }
}
