//! Property tests shared by every algorithm.

use proptest::prelude::*;

use crate::{Algorithm, History, Sortable};

/// A key plus the position it had in the input.
#[derive(Debug, Clone, PartialEq)]
struct Tagged {
    key: i32,
    id: usize,
}

impl Sortable for Tagged {
    type Key = i32;

    fn order(&self) -> i32 {
        self.key
    }
}

fn tagged(keys: &[i32]) -> Vec<Tagged> {
    keys.iter()
        .enumerate()
        .map(|(id, &key)| Tagged { key, id })
        .collect()
}

fn sorted_keys(state: &[Tagged]) -> Vec<i32> {
    let mut keys: Vec<i32> = state.iter().map(|t| t.key).collect();
    keys.sort_unstable();
    keys
}

fn sorted_ids(state: &[Tagged]) -> Vec<usize> {
    let mut ids: Vec<usize> = state.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    ids
}

/// Upper bound on recorded steps for `n` items.
fn step_bound(algorithm: Algorithm, n: usize) -> usize {
    let height = n.max(1).ilog2() as usize + 1;
    match algorithm {
        Algorithm::Insertion | Algorithm::Selection => n.max(2),
        Algorithm::Bubble => (n + 1).max(2),
        Algorithm::Merge => 2 + 2 * n.saturating_sub(1),
        Algorithm::Heap => 2 + n + (n + n / 2) * height,
        Algorithm::Quick => 2 + 2 * n,
    }
}

fn check(history: &History<Tagged>, input: &[Tagged]) -> Result<(), TestCaseError> {
    prop_assert!(history.len() >= 2);
    prop_assert_eq!(&history.steps()[0].state, &input.to_vec());

    for step in history.steps() {
        prop_assert_eq!(sorted_keys(&step.state), sorted_keys(input));
        prop_assert_eq!(sorted_ids(&step.state), sorted_ids(input));
    }

    let last = history.final_state();
    prop_assert!(last.windows(2).all(|w| w[0].key <= w[1].key));
    Ok(())
}

proptest! {
    #[test]
    fn conserves_items_and_sorts(keys in prop::collection::vec(-8i32..8, 0..40)) {
        let input = tagged(&keys);
        for algorithm in Algorithm::ALL {
            let history = algorithm.generate(&input).unwrap();
            check(&history, &input)?;
        }
    }

    #[test]
    fn stable_algorithms_keep_tie_order(keys in prop::collection::vec(0i32..4, 0..40)) {
        let input = tagged(&keys);
        for algorithm in Algorithm::ALL.into_iter().filter(Algorithm::is_stable) {
            let history = algorithm.generate(&input).unwrap();
            for pair in history.final_state().windows(2) {
                if pair[0].key == pair[1].key {
                    prop_assert!(pair[0].id < pair[1].id, "{} reordered equal keys", algorithm);
                }
            }
        }
    }

    #[test]
    fn step_counts_are_bounded(keys in prop::collection::vec(any::<i32>(), 0..64)) {
        let input = tagged(&keys);
        for algorithm in Algorithm::ALL {
            let history = algorithm.generate(&input).unwrap();
            prop_assert!(
                history.len() <= step_bound(algorithm, input.len()),
                "{} recorded {} steps for {} items",
                algorithm,
                history.len(),
                input.len()
            );
        }
    }

    #[test]
    fn quadratic_sorts_record_one_step_per_item(keys in prop::collection::vec(any::<i32>(), 2..64)) {
        for algorithm in [Algorithm::Insertion, Algorithm::Selection] {
            let history = algorithm.generate(&keys).unwrap();
            prop_assert_eq!(history.len(), keys.len());
        }
    }

    #[test]
    fn generation_is_deterministic(keys in prop::collection::vec(-4i32..4, 0..32)) {
        let input = tagged(&keys);
        for algorithm in Algorithm::ALL {
            let first = algorithm.generate(&input).unwrap();
            let second = algorithm.generate(&input).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
