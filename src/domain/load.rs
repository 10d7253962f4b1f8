// ============================================================
// Layer 3 — ProductLoad Domain Type
// ============================================================
// The cargo a single car carries: what it is, how heavy it is,
// what it is worth and whether it is dangerous.
//
// Weight and value are physical / monetary quantities and can
// never be negative. The constructor and the setters check this;
// a rejected setter leaves the old value in place.

use serde::Serialize;

use crate::domain::error::{ensure_non_negative, TrainResult};

/// A cargo item attached to a [`TrainCar`](crate::domain::car::TrainCar).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLoad {
    name:      String,
    /// Tons
    weight:    f64,
    /// Dollars
    value:     f64,
    dangerous: bool,
}

impl ProductLoad {
    /// Create a new load, rejecting negative weight or value.
    pub fn new(
        name:      impl Into<String>,
        weight:    f64,
        value:     f64,
        dangerous: bool,
    ) -> TrainResult<Self> {
        Ok(Self {
            name:   name.into(),
            weight: ensure_non_negative("Weight", weight)?,
            value:  ensure_non_negative("Value", value)?,
            dangerous,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_dangerous(&self) -> bool {
        self.dangerous
    }
}

#[allow(dead_code)]
impl ProductLoad {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the weight. On error the previous weight is kept.
    pub fn set_weight(&mut self, weight: f64) -> TrainResult<()> {
        self.weight = ensure_non_negative("Weight", weight)?;
        Ok(())
    }

    /// Replace the value. On error the previous value is kept.
    pub fn set_value(&mut self, value: f64) -> TrainResult<()> {
        self.value = ensure_non_negative("Value", value)?;
        Ok(())
    }

    pub fn set_dangerous(&mut self, dangerous: bool) {
        self.dangerous = dangerous;
    }
}
