// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// The train model: pure Rust structs, enums and the linked
// list that ties them together.
//
// Rules for this layer:
//   - NO printing or logging
//   - NO reading user input
//   - Every failure is a TrainError returned to the caller
//
// Everything here is deterministic and can be unit tested
// without a terminal.
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §9 (Errors)

// The single error type of the model
pub mod error;

// Cargo carried by a car
pub mod load;

// A car with dimensions and an optional load
pub mod car;

// Arena node linking cars together
pub mod node;

// Read-only snapshots: search results, manifest rows, train summary
pub mod report;

// The doubly linked train and its cursor
pub mod train;
