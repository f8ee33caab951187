//! Derived result types produced by the cost engine

use serde::Serialize;

/// Closed `[min, max]` interval of tokens or cost
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct Bounds {
    pub(crate) min: f64,
    pub(crate) max: f64,
}

impl Bounds {
    pub(crate) fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    pub(crate) fn flat(value: f64) -> Self {
        Bounds {
            min: value,
            max: value,
        }
    }

    pub(crate) fn add(&mut self, other: &Bounds) {
        self.min += other.min;
        self.max += other.max;
    }

    /// Whether min and max are the same value (rendered as a single number)
    pub(crate) fn is_flat(&self) -> bool {
        self.min == self.max
    }
}

/// Monthly estimate for one enabled interaction
///
/// Never persisted; always recomputed from the settings snapshot and catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CostResult {
    pub(crate) interaction_id: String,
    pub(crate) interaction_name: String,
    pub(crate) model_id: String,
    pub(crate) model_name: String,
    /// Requests per month multiplied by active users (total interaction count)
    pub(crate) monthly_request_volume: f64,
    pub(crate) input_tokens: Bounds,
    pub(crate) output_tokens: Bounds,
    pub(crate) cost: Bounds,
}
