// ============================================================
// Layer 2 — TrainOperator
// ============================================================
// Runs exactly one train operation per menu command.
//
//   Request  — what the user asked for, already parsed into
//              numbers/strings by Layer 1
//   Outcome  — what happened, ready to be rendered by Layer 1
//
// Building ProductLoad / TrainCar values from those numbers
// happens here, so negative quantities come back as the same
// TrainError the linked list would use.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use serde::Serialize;

use crate::domain::{
    car::TrainCar,
    error::TrainResult,
    load::ProductLoad,
    report::{ManifestRow, ProductSummary, TrainSummary},
    train::{CursorMove, TrainLinkedList},
};

/// Which way the cursor was asked to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// One parsed user command.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    MoveCursor(Direction),
    InsertCar { length: f64, weight: f64 },
    RemoveCar,
    SetLoad { name: String, weight: f64, value: f64, dangerous: bool },
    FindProduct { name: String },
    ShowTrain,
    ShowManifest,
    RemoveDangerousCars,
}

/// The result of a successful request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Outcome {
    CursorMoved { direction: Direction, result: CursorMove },
    CarInserted { car: TrainCar },
    CarRemoved { car: TrainCar },
    LoadSet { load: ProductLoad, previous: Option<ProductLoad> },
    ProductFound { summary: ProductSummary },
    Train { summary: TrainSummary },
    Manifest { rows: Vec<ManifestRow> },
    DangerousCarsRemoved { removed: Vec<TrainCar> },
}

/// Owns the train for the lifetime of a session.
#[derive(Debug, Default)]
pub struct TrainOperator {
    train: TrainLinkedList,
}

impl TrainOperator {
    pub fn new() -> Self {
        Self { train: TrainLinkedList::new() }
    }

    pub fn train(&self) -> &TrainLinkedList {
        &self.train
    }

    pub fn into_train(self) -> TrainLinkedList {
        self.train
    }

    /// Execute one request. On error the train is unchanged.
    pub fn execute(&mut self, request: Request) -> TrainResult<Outcome> {
        tracing::debug!("Executing {:?}", request);

        let outcome = match request {
            Request::MoveCursor(direction) => {
                let result = match direction {
                    Direction::Forward  => self.train.cursor_forward()?,
                    Direction::Backward => self.train.cursor_backward()?,
                };
                Outcome::CursorMoved { direction, result }
            }

            Request::InsertCar { length, weight } => {
                let car = TrainCar::new(length, weight)?;
                self.train.insert_after_cursor(car.clone())?;
                Outcome::CarInserted { car }
            }

            Request::RemoveCar => Outcome::CarRemoved { car: self.train.remove_cursor()? },

            Request::SetLoad { name, weight, value, dangerous } => {
                let load     = ProductLoad::new(name, weight, value, dangerous)?;
                let previous = self.train.set_cursor_load(load.clone())?;
                Outcome::LoadSet { load, previous }
            }

            Request::FindProduct { name } => Outcome::ProductFound {
                summary: self.train.find_product(&name),
            },

            Request::ShowTrain => Outcome::Train { summary: self.train.summary() },

            Request::ShowManifest => Outcome::Manifest {
                rows: self.train.manifest_rows().collect(),
            },

            Request::RemoveDangerousCars => {
                let removed = self.train.remove_dangerous_cars()?;
                tracing::info!("Removed {} dangerous cars", removed.len());
                Outcome::DangerousCarsRemoved { removed }
            }
        };

        tracing::debug!(
            "Train now has {} cars ({:.1} t, {} dangerous)",
            self.train.size(),
            self.train.weight(),
            self.train.dangerous_count(),
        );

        Ok(outcome)
    }
}
