// ============================================================
// Layer 3 — Sequence Node
// ============================================================
// The linkage unit of the train: a car plus the handles of its
// neighbours.
//
// Nodes live in an arena owned by TrainLinkedList. Instead of
// pointers, prev/next are NodeId handles into that arena, so
// there is no reference cycle for the borrow checker to reject:
//
//   ┌──────┬──►┌──────┬──►┌──────┐
//   │ head │   │ node │   │ tail │
//   └──────┘◄──┴──────┘◄──┴──────┘
//      0          3          1        ← slots in the arena

use crate::domain::car::TrainCar;

/// Stable handle to a node inside a train's arena.
///
/// Only meaningful for the train that created it, and only until that
/// node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct TrainCarNode {
    pub(crate) car:  TrainCar,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl TrainCarNode {
    /// A detached node; the train links it in.
    pub fn new(car: TrainCar) -> Self {
        Self { car, prev: None, next: None }
    }
}
