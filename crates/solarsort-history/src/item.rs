//! Sortable items.
//!
//! Generators only ever look at an item's order key. Everything else an item
//! carries (name, image, colour...) travels through the history untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Something a history generator can reorder.
///
/// Comparisons use the key's `<`, `>` and `<=` operators directly, so a key
/// that is not comparable with itself (a NaN float) is rejected up front.
pub trait Sortable: Clone {
    /// The order key.
    type Key: PartialOrd + fmt::Debug;

    /// The key every comparison is made on.
    fn order(&self) -> Self::Key;
}

/// A display item: an order key plus an opaque payload.
///
/// The payload is flattened on the wire, so `{"order": 2, "name": "Earth"}`
/// deserializes with `name` kept in `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub order: f64,
    #[serde(flatten)]
    pub payload: BTreeMap<String, Value>,
}

impl Item {
    /// Create an item with an empty payload.
    pub fn new(order: f64) -> Self {
        Self {
            order,
            payload: BTreeMap::new(),
        }
    }

    /// Attach a payload field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Look up a payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl Sortable for Item {
    type Key = f64;

    fn order(&self) -> f64 {
        self.order
    }
}

macro_rules! impl_sortable_for_primitive {
    ($($ty:ty),*) => {
        $(
            impl Sortable for $ty {
                type Key = $ty;

                fn order(&self) -> $ty {
                    *self
                }
            }
        )*
    };
}

impl_sortable_for_primitive!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

/// Reject any item whose key cannot be ordered.
pub(crate) fn validate<T: Sortable>(items: &[T]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        let key = item.order();
        if key.partial_cmp(&key).is_none() {
            return Err(Error::InvalidInput {
                index,
                reason: format!("order key {:?} is not comparable", key),
            });
        }
    }
    Ok(())
}
