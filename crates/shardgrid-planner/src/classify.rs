//! Item classification.
//!
//! Decides once, at the boundary, how a batch of items takes part in
//! balancing. The shape is sampled from the first compound item:
//!
//! - **Weighted**: entries are ordered largest weight first (stable), the
//!   order that keeps the greedy pass close to the LPT bound. Weighted items
//!   may still carry tags for pinning
//! - **Tagged**: input order, every entry weighs 1; tags are kept only
//!   for pinning
//! - **Plain**: passed through unchanged
//!
//! Mixed batches keep each entry's own weight and follow the sampled shape.

use shardgrid_core::Item;

use crate::error::{PlanError, PlanResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Plain,
    Weighted,
    Tagged,
}

/// A normalized item ready for separation and balancing.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: String,
    pub weight: f64,
    pub tags: Vec<String>,
}

impl Entry {
    /// The pair the balancer consumes. Tags are dropped here.
    pub fn into_sized(self) -> (String, f64) {
        (self.id, self.weight)
    }
}

#[derive(Debug, Clone)]
pub struct Classified {
    pub shape: Shape,
    pub entries: Vec<Entry>,
}

/// Sample the batch shape from its first compound item.
pub fn detect_shape(items: &[Item]) -> Shape {
    items
        .iter()
        .find_map(|item| match item {
            Item::Plain(_) => None,
            Item::Weighted(..) | Item::WeightedTagged(..) => Some(Shape::Weighted),
            Item::Tagged(..) => Some(Shape::Tagged),
        })
        .unwrap_or(Shape::Plain)
}

pub fn classify(items: Vec<Item>) -> PlanResult<Classified> {
    let shape = detect_shape(&items);

    let mut entries = items
        .into_iter()
        .map(|item| {
            let weight = item.weight();
            if !weight.is_finite() || weight < 0.0 {
                return Err(PlanError::InvalidWeight {
                    id: item.into_id(),
                    weight,
                });
            }
            Ok(match item {
                Item::Plain(id) | Item::Weighted(id, _) => Entry {
                    id,
                    weight,
                    tags: Vec::new(),
                },
                Item::Tagged(id, tags) | Item::WeightedTagged(id, _, tags) => {
                    Entry { id, weight, tags }
                }
            })
        })
        .collect::<PlanResult<Vec<_>>>()?;

    if shape == Shape::Weighted {
        largest_first(&mut entries);
    }

    Ok(Classified { shape, entries })
}

/// Stable descending sort by weight; equal weights keep input order.
pub fn largest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
}
