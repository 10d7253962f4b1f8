// ============================================================
// Layer 3 — TrainCar Domain Type
// ============================================================
// One car of the train: its own length and weight, plus an
// optional ProductLoad. A car with no load is "empty".

use serde::Serialize;

use crate::domain::error::{ensure_non_negative, TrainResult};
use crate::domain::load::ProductLoad;

/// A train car with physical dimensions and optional cargo.
///
/// Equality is structural; two empty cars compare equal when their
/// dimensions match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainCar {
    /// Meters
    length: f64,
    /// Tons, without the load
    weight: f64,
    load:   Option<ProductLoad>,
}

impl TrainCar {
    /// Create an empty car, rejecting negative length or weight.
    pub fn new(length: f64, weight: f64) -> TrainResult<Self> {
        Ok(Self {
            length: ensure_non_negative("Length", length)?,
            weight: ensure_non_negative("Weight", weight)?,
            load:   None,
        })
    }

    /// Builder-style variant of [`set_load`](Self::set_load)
    #[allow(dead_code)]
    pub fn with_load(mut self, load: ProductLoad) -> Self {
        self.load = Some(load);
        self
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn load(&self) -> Option<&ProductLoad> {
        self.load.as_ref()
    }

    /// Attach (or clear) the load, returning whatever was there before.
    pub fn set_load(&mut self, load: Option<ProductLoad>) -> Option<ProductLoad> {
        std::mem::replace(&mut self.load, load)
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.load.is_none()
    }

    /// True when the car carries a load flagged dangerous.
    /// Empty cars are never dangerous.
    pub fn is_dangerous(&self) -> bool {
        self.load.as_ref().is_some_and(ProductLoad::is_dangerous)
    }
}
