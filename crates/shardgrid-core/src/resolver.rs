//! Weight lookup contract.

/// Supplies the cost of an item, typically its historical runtime.
///
/// Returning `None` means there is no data for the item; the caller
/// decides how to fill the gap. The planner itself never resolves
/// weights, it expects items to arrive already sized.
pub trait WeightResolver {
    fn weight_for(&self, id: &str) -> Option<f64>;
}

impl<S: std::hash::BuildHasher> WeightResolver for std::collections::HashMap<String, f64, S> {
    fn weight_for(&self, id: &str) -> Option<f64> {
        self.get(id).copied()
    }
}
