// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Every failure the train model can report, as one tagged type.
//
// All of these are recoverable: an operation that returns one
// of them has left the train exactly as it found it, so the
// driver only needs to show the message and carry on.
//
// "Cursor already at the end" is NOT in here — see CursorMove
// in train.rs — because nothing went wrong.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use thiserror::Error;

/// Errors raised by loads, cars and the train sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainError {
    /// A physical or monetary quantity was negative or not finite
    #[error("{0}")]
    InvalidValue(String),

    /// The operation needs at least one car on the train
    #[error("{0}")]
    EmptyList(String),

    /// A required argument was absent
    #[error("{0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the domain layer
pub type TrainResult<T> = Result<T, TrainError>;

impl TrainError {
    /// The error every operation returns when the train has no cars
    pub fn no_train() -> Self {
        TrainError::EmptyList("Invalid: No train exist.".to_string())
    }
}

/// Reject negative quantities, NaN and infinities.
///
/// `what` names the quantity in the message, e.g. "Weight".
pub(crate) fn ensure_non_negative(what: &str, amount: f64) -> TrainResult<f64> {
    if !amount.is_finite() {
        return Err(TrainError::InvalidValue(format!(
            "Invalid inputs. {what} must be a finite number."
        )));
    }
    if amount < 0.0 {
        return Err(TrainError::InvalidValue(format!(
            "Invalid inputs. {what} can't be negative."
        )));
    }
    Ok(amount)
}
