//! The planet dataset the viewer sorts.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use solarsort_history::Item;

/// Configuration for the dataset.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Seed for a deterministic shuffle
    pub seed: u64,
    /// Whether to shuffle the planets at all
    pub shuffle: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shuffle: true,
        }
    }
}

/// (name, image, colour) for each planet, in order from the sun.
const PLANETS: [(&str, &str, &str); 8] = [
    ("Mercury", "img/planets/mercury.png", "#9E9E9E"),
    ("Venus", "img/planets/venus.png", "#FF7F00"),
    ("Earth", "img/planets/earth.png", "#87BC49"),
    ("Mars", "img/planets/mars.png", "#E57373"),
    ("Jupiter", "img/planets/jupiter.png", "#964B00"),
    ("Saturn", "img/planets/saturn.png", "#FFF176"),
    ("Uranus", "img/planets/uranus.png", "#4DD0E1"),
    ("Neptune", "img/planets/neptune.png", "#5C6BC0"),
];

/// The eight planets, in sorted order (order 0 is Mercury).
pub fn planets() -> Vec<Item> {
    PLANETS
        .iter()
        .enumerate()
        .map(|(order, (name, img, color))| {
            Item::new(order as f64)
                .with("name", *name)
                .with("img", *img)
                .with("color", *color)
                .with("scale", 1.0)
        })
        .collect()
}

/// The planets, shuffled as configured.
pub fn load(config: &DatasetConfig) -> Vec<Item> {
    let mut items = planets();
    if config.shuffle {
        let mut rng = StdRng::seed_from_u64(config.seed);
        items.shuffle(&mut rng);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(items: &[Item]) -> Vec<f64> {
        items.iter().map(|item| item.order).collect()
    }

    #[test]
    fn planets_are_in_order() {
        let items = planets();
        assert_eq!(items.len(), 8);
        assert_eq!(orders(&items), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(items[2].field("name"), Some(&"Earth".into()));
    }

    #[test]
    fn unshuffled_load_is_identity() {
        let config = DatasetConfig {
            shuffle: false,
            ..Default::default()
        };
        assert_eq!(load(&config), planets());
    }

    #[test]
    fn shuffle_is_seeded() {
        let config = DatasetConfig::default();
        assert_eq!(load(&config), load(&config));

        let mut shuffled = orders(&load(&config));
        shuffled.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(shuffled, orders(&planets()));
    }
}
