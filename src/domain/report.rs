// ============================================================
// Layer 3 — Report Snapshots
// ============================================================
// Read-only results the train hands back to the driver:
//
//   ProductSummary — what find_product() found
//   ManifestRow    — one line of the manifest, per car
//   TrainSummary   — the whole-train aggregates
//
// These are plain data. The presentation layer decides whether
// they become a fixed-width table or JSON.

use std::fmt;

use serde::Serialize;

use crate::domain::car::TrainCar;

/// Aggregate over every car whose load has a given name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub name:          String,
    pub match_count:   usize,
    pub total_weight:  f64,
    pub total_value:   f64,
    pub any_dangerous: bool,
}

impl ProductSummary {
    /// The "nothing found" summary
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name:          name.into(),
            match_count:   0,
            total_weight:  0.0,
            total_value:   0.0,
            any_dangerous: false,
        }
    }

    pub fn is_found(&self) -> bool {
        self.match_count > 0
    }
}

/// One car as shown in the manifest. Empty cars report the load as
/// "Empty" with zero weight/value and not dangerous.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestRow {
    pub is_cursor:   bool,
    /// 1-based, counted from the head
    pub position:    usize,
    pub car_length:  f64,
    pub car_weight:  f64,
    pub load_name:   String,
    pub load_weight: f64,
    pub load_value:  f64,
    pub dangerous:   bool,
}

impl ManifestRow {
    pub fn from_car(position: usize, car: &TrainCar, is_cursor: bool) -> Self {
        let load = car.load();
        Self {
            is_cursor,
            position,
            car_length:  car.length(),
            car_weight:  car.weight(),
            load_name:   load.map_or_else(|| EMPTY_LOAD.to_string(), |l| l.name().to_string()),
            load_weight: load.map_or(0.0, |l| l.weight()),
            load_value:  load.map_or(0.0, |l| l.value()),
            dangerous:   load.is_some_and(|l| l.is_dangerous()),
        }
    }
}

/// Name shown for a car that carries nothing
pub const EMPTY_LOAD: &str = "Empty";

/// Snapshot of the train's maintained aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainSummary {
    pub cars:      usize,
    pub length:    f64,
    pub weight:    f64,
    pub value:     f64,
    pub dangerous: bool,
}

impl fmt::Display for TrainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Train: {} cars, {:.1} meters, {:.1} tons, ${} value, {}",
            self.cars,
            self.length,
            self.weight,
            format_money(self.value),
            if self.dangerous { "DANGEROUS." } else { "Not Dangerous." },
        )
    }
}

/// Format a dollar amount with two decimals and thousands separators,
/// e.g. `1234567.891` → `"1,234,567.89"`.
pub fn format_money(amount: f64) -> String {
    let fixed         = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}
