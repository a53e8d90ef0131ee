//! Transitions between consecutive history steps.

use serde::{Deserialize, Serialize};
use solarsort_history::{HistoryStep, Sortable};

/// Where one item goes between two steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMove {
    /// Index in the previous state.
    pub from: usize,
    /// Index in the next state.
    pub to: usize,
    /// Whether the item changes position.
    pub moved: bool,
}

/// One unit of replay: the step pair a renderer animates.
#[derive(Debug, Clone, Serialize)]
pub struct Transition<'a, T> {
    /// Index of the target step (1 for the first transition).
    pub step: usize,
    pub from: &'a HistoryStep<T>,
    pub to: &'a HistoryStep<T>,
    /// One entry per slot of `from`.
    pub moves: Vec<ItemMove>,
}

impl<'a, T: Sortable + PartialEq> Transition<'a, T> {
    /// Build the transition into step `step` and work out every item's move.
    pub fn new(step: usize, from: &'a HistoryStep<T>, to: &'a HistoryStep<T>) -> Self {
        Self {
            step,
            from,
            to,
            moves: compute_moves(&from.state, &to.state),
        }
    }
}

impl<T> Transition<'_, T> {
    /// Items that change position.
    pub fn moving(&self) -> impl Iterator<Item = &ItemMove> {
        self.moves.iter().filter(|m| m.moved)
    }

    /// Whether nothing moves (an annotation-only step).
    pub fn is_still(&self) -> bool {
        self.moves.iter().all(|m| !m.moved)
    }
}

/// Match every item in `from` to its slot in `to`.
///
/// An identical item wins over one that only shares the order key, so a swap
/// of two equal-keyed items still follows each item's payload. Each target
/// slot is claimed exactly once.
fn compute_moves<T: Sortable + PartialEq>(from: &[T], to: &[T]) -> Vec<ItemMove> {
    let mut claimed = vec![false; to.len()];

    from.iter()
        .enumerate()
        .map(|(index, item)| {
            let key = item.order();
            let target = (0..to.len())
                .find(|&j| !claimed[j] && to[j] == *item)
                .or_else(|| (0..to.len()).find(|&j| !claimed[j] && to[j].order() == key))
                .unwrap_or(index);
            if let Some(slot) = claimed.get_mut(target) {
                *slot = true;
            }
            ItemMove {
                from: index,
                to: target,
                moved: index != target,
            }
        })
        .collect()
}
