// ============================================================
// Layer 3 — TrainLinkedList (sequence + cursor engine)
// ============================================================
// The train itself: a doubly linked list of TrainCarNodes with
// a head, a tail and a single movable cursor.
//
// Storage:
//   Nodes sit in a slab::Slab arena and refer to each other by
//   NodeId. Removing a node frees its slot; the handles of all
//   other nodes stay valid.
//
// Aggregates:
//   Count, length, weight, value and the number of dangerous cars
//   are kept up to date on every mutation so that the accessors
//   are O(1). Two rules to keep in mind:
//     - insert_after_cursor() only counts the car body. A load
//       already attached to the inserted car is counted once
//       add_load_totals() is called for it.
//     - Before a car's load is replaced, remove_load_totals()
//       must run for the old load (set_cursor_load() does both).
//
// Cursor:
//   None exactly when the train is empty. After removing the head
//   the cursor jumps to the TAIL, not to the new head.
//
// Reference: Rust Book §15 (Smart Pointers, reference cycles)
//            slab crate documentation

use std::iter::FusedIterator;

use serde::Serialize;
use slab::Slab;

use crate::domain::car::TrainCar;
use crate::domain::error::{TrainError, TrainResult};
use crate::domain::load::ProductLoad;
use crate::domain::node::{NodeId, TrainCarNode};
use crate::domain::report::{ManifestRow, ProductSummary, TrainSummary};

/// Outcome of a successful cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMove {
    Moved,
    /// Already at the head/tail; nothing changed
    AtBoundary,
}

/// Running sums over every car on the train.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    cars:      usize,
    length:    f64,
    weight:    f64,
    value:     f64,
    dangerous: usize,
}

impl Totals {
    /// Count the car body only
    fn add_car(&mut self, car: &TrainCar) {
        self.cars   += 1;
        self.length += car.length();
        self.weight += car.weight();
    }

    /// Uncount the car body and its load
    fn remove_car(&mut self, car: &TrainCar) {
        debug_assert!(self.cars > 0, "car count underflow");
        self.cars   -= 1;
        self.length -= car.length();
        self.remove_load(car.load());
        self.weight -= car.weight();
    }

    fn add_load(&mut self, load: Option<&ProductLoad>) {
        if let Some(load) = load {
            self.weight += load.weight();
            self.value  += load.value();
            if load.is_dangerous() {
                self.dangerous += 1;
            }
        }
    }

    fn remove_load(&mut self, load: Option<&ProductLoad>) {
        if let Some(load) = load {
            self.weight -= load.weight();
            self.value  -= load.value();
            if load.is_dangerous() {
                debug_assert!(self.dangerous > 0, "dangerous count underflow: load was never counted");
                self.dangerous -= 1;
            }
        }
    }
}

/// A train: an ordered sequence of cars with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TrainLinkedList {
    nodes:  Slab<TrainCarNode>,
    head:   Option<NodeId>,
    tail:   Option<NodeId>,
    cursor: Option<NodeId>,
    totals: Totals,
}

impl TrainLinkedList {
    /// An empty train; head, tail and cursor are all unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    // ─── Cursor ──────────────────────────────────────────────────────────────

    /// Move the cursor one car toward the tail.
    pub fn cursor_forward(&mut self) -> TrainResult<CursorMove> {
        let at = self.cursor.ok_or_else(TrainError::no_train)?;
        match self.nodes[at.0].next {
            Some(next) => {
                self.cursor = Some(next);
                Ok(CursorMove::Moved)
            }
            None => Ok(CursorMove::AtBoundary),
        }
    }

    /// Move the cursor one car toward the head.
    pub fn cursor_backward(&mut self) -> TrainResult<CursorMove> {
        let at = self.cursor.ok_or_else(TrainError::no_train)?;
        match self.nodes[at.0].prev {
            Some(prev) => {
                self.cursor = Some(prev);
                Ok(CursorMove::Moved)
            }
            None => Ok(CursorMove::AtBoundary),
        }
    }

    /// The car under the cursor, `None` on an empty train.
    #[allow(dead_code)]
    pub fn cursor_car(&self) -> Option<&TrainCar> {
        self.cursor.map(|at| &self.nodes[at.0].car)
    }

    /// Swap the car under the cursor for `car` and return the old one.
    ///
    /// Ignored on an empty train. The aggregates are NOT adjusted; callers
    /// rebalance them with the load-total methods.
    #[allow(dead_code)]
    pub fn set_cursor_car(&mut self, car: TrainCar) -> Option<TrainCar> {
        let at = self.cursor?;
        Some(std::mem::replace(&mut self.nodes[at.0].car, car))
    }

    #[allow(dead_code)]
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    #[allow(dead_code)]
    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    #[allow(dead_code)]
    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    // ─── Mutation ────────────────────────────────────────────────────────────

    /// Link `car` in right after the cursor and move the cursor onto it.
    ///
    /// Accepts a `TrainCar` or an `Option<TrainCar>`; `None` is rejected
    /// with [`TrainError::InvalidArgument`].
    pub fn insert_after_cursor(&mut self, car: impl Into<Option<TrainCar>>) -> TrainResult<NodeId> {
        let car = car.into().ok_or_else(|| {
            TrainError::InvalidArgument("The inserted train car can't be absent.".to_string())
        })?;

        self.totals.add_car(&car);
        let id = NodeId(self.nodes.insert(TrainCarNode::new(car)));

        match self.cursor {
            None => {
                self.head = Some(id);
                self.tail = Some(id);
            }
            Some(at) => {
                let after = self.nodes[at.0].next;
                {
                    let node  = &mut self.nodes[id.0];
                    node.prev = Some(at);
                    node.next = after;
                }
                self.nodes[at.0].next = Some(id);
                match after {
                    Some(after) => self.nodes[after.0].prev = Some(id),
                    None        => self.tail = Some(id),
                }
            }
        }

        self.cursor = Some(id);
        Ok(id)
    }

    /// Unlink the car under the cursor and return it.
    ///
    /// Where the cursor ends up depends on where the car was:
    ///
    /// | removed node | cursor afterwards |
    /// |--------------|-------------------|
    /// | only node    | none (train empty) |
    /// | tail         | new tail (its predecessor) |
    /// | head         | tail |
    /// | interior     | its successor |
    pub fn remove_cursor(&mut self) -> TrainResult<TrainCar> {
        let at           = self.cursor.ok_or_else(TrainError::no_train)?;
        let (prev, next) = (self.nodes[at.0].prev, self.nodes[at.0].next);

        let car = self.unlink(at);

        self.cursor = match (prev, next) {
            (None, None)          => None,
            (Some(_), None)       => self.tail,
            (None, Some(_))       => self.tail,
            (Some(_), Some(next)) => Some(next),
        };

        Ok(car)
    }

    /// Take a node out of the chain, free its slot and uncount it.
    /// Does not touch the cursor.
    fn unlink(&mut self, id: NodeId) -> TrainCar {
        let node = self.nodes.remove(id.0);

        match node.prev {
            Some(prev) => self.nodes[prev.0].next = node.next,
            None       => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next.0].prev = node.prev,
            None       => self.tail = node.prev,
        }

        self.totals.remove_car(&node.car);
        node.car
    }

    /// Count the load of a car that just had it attached.
    #[allow(dead_code)]
    pub fn add_load_totals(&mut self, car: &TrainCar) {
        self.totals.add_load(car.load());
    }

    /// Uncount the load of a car about to lose it.
    #[allow(dead_code)]
    pub fn remove_load_totals(&mut self, car: &TrainCar) {
        self.totals.remove_load(car.load());
    }

    /// Put `load` on the car under the cursor, returning the load it replaces.
    /// The aggregates follow the swap.
    pub fn set_cursor_load(&mut self, load: ProductLoad) -> TrainResult<Option<ProductLoad>> {
        let at = self.cursor.ok_or_else(|| {
            TrainError::EmptyList("Please insert a train car first.".to_string())
        })?;

        let car = &mut self.nodes[at.0].car;
        self.totals.remove_load(car.load());
        let previous = car.set_load(Some(load));
        self.totals.add_load(car.load());

        Ok(previous)
    }

    /// Remove every car whose load is dangerous, keeping the others in order.
    /// Returns the removed cars, head to tail.
    pub fn remove_dangerous_cars(&mut self) -> TrainResult<Vec<TrainCar>> {
        if self.is_empty() {
            return Err(TrainError::no_train());
        }

        let mut removed = Vec::new();
        let mut at      = self.head;

        while let Some(id) = at {
            let node = &self.nodes[id.0];
            at = node.next;

            if !node.car.is_dangerous() {
                continue;
            }

            let car = if self.cursor == Some(id) {
                self.remove_cursor()?
            } else {
                self.unlink(id)
            };
            removed.push(car);
        }

        Ok(removed)
    }

    // ─── Queries ─────────────────────────────────────────────────────────────

    /// Sum up every load called exactly `name` (case-sensitive).
    pub fn find_product(&self, name: &str) -> ProductSummary {
        self.iter()
            .filter_map(TrainCar::load)
            .filter(|load| load.name() == name)
            .fold(ProductSummary::empty(name), |mut acc, load| {
                acc.match_count   += 1;
                acc.total_weight  += load.weight();
                acc.total_value   += load.value();
                acc.any_dangerous |= load.is_dangerous();
                acc
            })
    }

    /// Cars from head to tail.
    pub fn iter(&self) -> Cars<'_> {
        Cars { nodes: &self.nodes, at: self.head, left: self.totals.cars }
    }

    /// Manifest lines from head to tail, computed lazily.
    pub fn manifest_rows(&self) -> ManifestRows<'_> {
        ManifestRows {
            cars:     self.iter(),
            cursor:   self.cursor,
            position: 0,
        }
    }

    pub fn summary(&self) -> TrainSummary {
        TrainSummary {
            cars:      self.size(),
            length:    self.length(),
            weight:    self.weight(),
            value:     self.value(),
            dangerous: self.has_dangerous_car(),
        }
    }

    pub fn size(&self) -> usize {
        self.totals.cars
    }

    /// Meters
    pub fn length(&self) -> f64 {
        self.totals.length
    }

    /// Tons, cars plus counted loads
    pub fn weight(&self) -> f64 {
        self.totals.weight
    }

    /// Dollars
    pub fn value(&self) -> f64 {
        self.totals.value
    }

    pub fn dangerous_count(&self) -> usize {
        self.totals.dangerous
    }

    pub fn has_dangerous_car(&self) -> bool {
        self.totals.dangerous > 0
    }
}

impl<'a> IntoIterator for &'a TrainLinkedList {
    type Item     = &'a TrainCar;
    type IntoIter = Cars<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a train's cars, head to tail.
#[derive(Debug, Clone)]
pub struct Cars<'a> {
    nodes: &'a Slab<TrainCarNode>,
    at:    Option<NodeId>,
    left:  usize,
}

impl<'a> Iterator for Cars<'a> {
    type Item = &'a TrainCar;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node  = &nodes[self.at?.0];
        self.at   = node.next;
        self.left = self.left.saturating_sub(1);
        Some(&node.car)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl ExactSizeIterator for Cars<'_> {}
impl FusedIterator for Cars<'_> {}

/// Iterator produced by [`TrainLinkedList::manifest_rows`].
#[derive(Debug, Clone)]
pub struct ManifestRows<'a> {
    cars:     Cars<'a>,
    cursor:   Option<NodeId>,
    position: usize,
}

impl Iterator for ManifestRows<'_> {
    type Item = ManifestRow;

    fn next(&mut self) -> Option<Self::Item> {
        let id  = self.cars.at?;
        let car = self.cars.next()?;
        self.position += 1;
        Some(ManifestRow::from_car(self.position, car, self.cursor == Some(id)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cars.size_hint()
    }
}

impl ExactSizeIterator for ManifestRows<'_> {}
impl FusedIterator for ManifestRows<'_> {}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn car(length: f64, weight: f64) -> TrainCar {
        TrainCar::new(length, weight).unwrap()
    }

    fn load(name: &str, weight: f64, value: f64, dangerous: bool) -> ProductLoad {
        ProductLoad::new(name, weight, value, dangerous).unwrap()
    }

    /// Insert a car and, when given, load it the way the menu does
    fn couple(train: &mut TrainLinkedList, c: TrainCar, l: Option<ProductLoad>) {
        train.insert_after_cursor(c).unwrap();
        if let Some(l) = l {
            train.set_cursor_load(l).unwrap();
        }
    }

    /// Recount everything from scratch and compare with the maintained totals
    fn assert_no_drift(train: &TrainLinkedList) {
        let mut expected = Totals::default();
        for c in train {
            expected.add_car(c);
            expected.add_load(c.load());
        }
        assert_eq!(train.totals, expected);
    }

    /// Walk the chain both ways and check the links agree with head/tail/cursor
    fn assert_well_linked(train: &TrainLinkedList) {
        let mut forward = Vec::new();
        let mut at      = train.head;
        while let Some(id) = at {
            forward.push(id);
            at = train.nodes[id.0].next;
        }

        let mut backward = Vec::new();
        let mut at       = train.tail;
        while let Some(id) = at {
            backward.push(id);
            at = train.nodes[id.0].prev;
        }
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), train.size());
        assert_eq!(forward.len(), train.nodes.len());
        assert_eq!(train.head.is_none(), train.cursor.is_none());
        assert_eq!(train.tail.is_none(), train.cursor.is_none());
        if let Some(cursor) = train.cursor {
            assert!(forward.contains(&cursor));
        }
    }

    fn names(train: &TrainLinkedList) -> Vec<String> {
        train
            .iter()
            .map(|c| c.load().map_or("-".to_string(), |l| l.name().to_string()))
            .collect()
    }

    fn cursor_name(train: &TrainLinkedList) -> Option<String> {
        train.cursor_car().and_then(|c| c.load()).map(|l| l.name().to_string())
    }

    /// A, B, C, D with the cursor left on D
    fn abcd() -> TrainLinkedList {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(10.0, 5.0), Some(load("A", 1.0, 100.0, false)));
        couple(&mut train, car(11.0, 6.0), Some(load("B", 2.0, 200.0, true)));
        couple(&mut train, car(12.0, 7.0), Some(load("C", 3.0, 300.0, true)));
        couple(&mut train, car(13.0, 8.0), Some(load("D", 4.0, 400.0, false)));
        train
    }

    #[test]
    fn test_new_train_is_empty() {
        let train = TrainLinkedList::new();
        assert!(train.is_empty());
        assert_eq!(train.size(), 0);
        assert!(train.cursor_car().is_none());
        assert_eq!(train.manifest_rows().count(), 0);
    }

    #[test]
    fn test_empty_train_rejects_moves_and_removals() {
        let mut train = TrainLinkedList::new();
        assert_eq!(train.cursor_forward(), Err(TrainError::no_train()));
        assert_eq!(train.cursor_backward(), Err(TrainError::no_train()));
        assert!(matches!(train.remove_cursor(), Err(TrainError::EmptyList(_))));
        assert!(matches!(train.remove_dangerous_cars(), Err(TrainError::EmptyList(_))));
        assert!(matches!(
            train.set_cursor_load(load("X", 1.0, 1.0, false)),
            Err(TrainError::EmptyList(_))
        ));
        assert!(train.is_empty());
    }

    #[test]
    fn test_set_cursor_car_ignored_when_empty() {
        let mut train = TrainLinkedList::new();
        assert_eq!(train.set_cursor_car(car(1.0, 1.0)), None);
        assert!(train.is_empty());
    }

    #[test]
    fn test_insert_absent_car_is_invalid_argument() {
        let mut train = TrainLinkedList::new();
        assert!(matches!(
            train.insert_after_cursor(None::<TrainCar>),
            Err(TrainError::InvalidArgument(_))
        ));
        assert!(train.is_empty());
    }

    #[test]
    fn test_first_insert_sets_head_tail_cursor() {
        let mut train = TrainLinkedList::new();
        let id = train.insert_after_cursor(car(10.0, 20.0)).unwrap();
        assert_eq!(train.head(), Some(id));
        assert_eq!(train.tail(), Some(id));
        assert_eq!(train.cursor(), Some(id));
        assert_eq!(train.size(), 1);
        assert_eq!(train.length(), 10.0);
        assert_eq!(train.weight(), 20.0);
    }

    #[test]
    fn test_insert_splices_after_cursor() {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(1.0, 1.0), Some(load("A", 0.0, 0.0, false)));
        couple(&mut train, car(1.0, 1.0), Some(load("C", 0.0, 0.0, false)));
        train.cursor_backward().unwrap();
        couple(&mut train, car(1.0, 1.0), Some(load("B", 0.0, 0.0, false)));

        assert_eq!(names(&train), ["A", "B", "C"]);
        assert_eq!(cursor_name(&train).as_deref(), Some("B"));
        assert_ne!(train.tail(), train.cursor());
        assert_well_linked(&train);
    }

    #[test]
    fn test_insert_does_not_count_preattached_load() {
        let mut train = TrainLinkedList::new();
        let loaded    = car(10.0, 20.0).with_load(load("Ore", 30.0, 500.0, true));

        train.insert_after_cursor(loaded.clone()).unwrap();
        assert_eq!(train.weight(), 20.0);
        assert_eq!(train.value(), 0.0);
        assert!(!train.has_dangerous_car());

        train.add_load_totals(&loaded);
        assert_eq!(train.weight(), 50.0);
        assert_eq!(train.value(), 500.0);
        assert_eq!(train.dangerous_count(), 1);
        assert_no_drift(&train);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "dangerous count underflow")]
    fn test_removing_uncounted_dangerous_load_is_caught() {
        let mut train = TrainLinkedList::new();
        train
            .insert_after_cursor(car(10.0, 20.0).with_load(load("Ore", 30.0, 500.0, true)))
            .unwrap();
        let _ = train.remove_cursor();
    }

    #[test]
    fn test_cursor_moves_and_stops_at_ends() {
        let mut train = abcd();
        assert_eq!(train.cursor_forward(), Ok(CursorMove::AtBoundary));
        assert_eq!(train.cursor(), train.tail());

        for _ in 0..3 {
            assert_eq!(train.cursor_backward(), Ok(CursorMove::Moved));
        }
        let at_head = train.cursor();
        assert_eq!(at_head, train.head());
        let before = train.summary();

        assert_eq!(train.cursor_backward(), Ok(CursorMove::AtBoundary));
        assert_eq!(train.cursor_backward(), Ok(CursorMove::AtBoundary));
        assert_eq!(train.cursor(), at_head);
        assert_eq!(train.summary(), before);

        assert_eq!(train.cursor_forward(), Ok(CursorMove::Moved));
        assert_eq!(cursor_name(&train).as_deref(), Some("B"));
    }

    #[test]
    fn test_remove_sole_car_empties_train() {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(5.0, 5.0), Some(load("Only", 1.0, 2.0, true)));

        let removed = train.remove_cursor().unwrap();
        assert_eq!(removed.load().map(ProductLoad::name), Some("Only"));
        assert!(train.is_empty());
        assert_eq!(train.head(), None);
        assert_eq!(train.tail(), None);
        assert_eq!(train.cursor(), None);
        assert_no_drift(&train);
    }

    #[test]
    fn test_remove_tail_moves_cursor_to_new_tail() {
        let mut train = abcd();
        train.remove_cursor().unwrap();
        assert_eq!(names(&train), ["A", "B", "C"]);
        assert_eq!(cursor_name(&train).as_deref(), Some("C"));
        assert_eq!(train.cursor(), train.tail());
        assert_well_linked(&train);
        assert_no_drift(&train);
    }

    #[test]
    fn test_remove_head_snaps_cursor_to_tail() {
        let mut train = abcd();
        for _ in 0..3 {
            train.cursor_backward().unwrap();
        }
        let removed = train.remove_cursor().unwrap();
        assert_eq!(removed.load().map(ProductLoad::name), Some("A"));
        assert_eq!(names(&train), ["B", "C", "D"]);
        assert_eq!(cursor_name(&train).as_deref(), Some("D"));
        assert_eq!(train.cursor(), train.tail());
        assert_well_linked(&train);
    }

    #[test]
    fn test_remove_interior_moves_cursor_to_successor() {
        let mut train = abcd();
        train.cursor_backward().unwrap();
        train.cursor_backward().unwrap();
        train.remove_cursor().unwrap();
        assert_eq!(names(&train), ["A", "C", "D"]);
        assert_eq!(cursor_name(&train).as_deref(), Some("C"));
        assert_well_linked(&train);
        assert_no_drift(&train);
    }

    #[test]
    fn test_remove_subtracts_car_and_load() {
        let mut train = abcd();
        train.remove_cursor().unwrap();
        assert_eq!(train.size(), 3);
        assert_eq!(train.length(), 33.0);
        assert_eq!(train.weight(), 5.0 + 6.0 + 7.0 + 1.0 + 2.0 + 3.0);
        assert_eq!(train.value(), 600.0);
        assert_eq!(train.dangerous_count(), 2);
    }

    #[test]
    fn test_insert_then_remove_round_trip() {
        let mut train = abcd();
        train.cursor_backward().unwrap();
        let (head, tail, before) = (train.head(), train.tail(), train.summary());

        couple(&mut train, car(99.0, 42.0), Some(load("Z", 7.0, 70.0, true)));
        assert_eq!(train.size(), 5);
        train.remove_cursor().unwrap();

        assert_eq!(train.summary(), before);
        assert_eq!(train.head(), head);
        assert_eq!(train.tail(), tail);
        assert_eq!(names(&train), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_set_cursor_load_replaces_totals() {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(10.0, 10.0), Some(load("Acid", 5.0, 50.0, true)));

        let previous = train.set_cursor_load(load("Milk", 2.0, 20.0, false)).unwrap();
        assert_eq!(previous.as_ref().map(ProductLoad::name), Some("Acid"));
        assert_eq!(train.weight(), 12.0);
        assert_eq!(train.value(), 20.0);
        assert!(!train.has_dangerous_car());
        assert_no_drift(&train);
    }

    #[test]
    fn test_manual_load_protocol_matches_set_cursor_load() {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(10.0, 10.0), Some(load("Acid", 5.0, 50.0, true)));

        let mut replacement = train.cursor_car().cloned().unwrap();
        train.remove_load_totals(&replacement);
        replacement.set_load(Some(load("Milk", 2.0, 20.0, false)));
        train.add_load_totals(&replacement);
        train.set_cursor_car(replacement);

        assert_eq!(cursor_name(&train).as_deref(), Some("Milk"));
        assert_no_drift(&train);
    }

    #[test]
    fn test_load_totals_ignore_empty_car() {
        let mut train = TrainLinkedList::new();
        let empty     = car(3.0, 4.0);
        train.insert_after_cursor(empty.clone()).unwrap();
        let before = train.summary();

        train.add_load_totals(&empty);
        assert_eq!(train.summary(), before);
        train.remove_load_totals(&empty);
        assert_eq!(train.summary(), before);
    }

    #[test]
    fn test_find_product_sums_matches() {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(1.0, 1.0), Some(load("Corn", 10.0, 100.0, false)));
        couple(&mut train, car(1.0, 1.0), Some(load("corn", 99.0, 999.0, true)));
        couple(&mut train, car(1.0, 1.0), None);
        couple(&mut train, car(1.0, 1.0), Some(load("Corn", 5.0, 50.0, true)));
        train.cursor_backward().unwrap();
        let cursor = train.cursor();

        let found = train.find_product("Corn");
        assert_eq!(found.match_count, 2);
        assert_eq!(found.total_weight, 15.0);
        assert_eq!(found.total_value, 150.0);
        assert!(found.any_dangerous);
        assert_eq!(train.cursor(), cursor);
    }

    #[test]
    fn test_find_missing_product_changes_nothing() {
        let mut train = abcd();
        train.cursor_backward().unwrap();
        let (cursor, before) = (train.cursor(), train.summary());

        let found = train.find_product("X");
        assert_eq!(found, ProductSummary::empty("X"));
        assert!(!found.is_found());
        assert_eq!(train.cursor(), cursor);
        assert_eq!(train.summary(), before);
    }

    #[test]
    fn test_remove_dangerous_cars_keeps_safe_order() {
        let mut train = abcd();
        let removed   = train.remove_dangerous_cars().unwrap();

        assert_eq!(removed.len(), 2);
        assert_eq!(names(&train), ["A", "D"]);
        assert_eq!(train.dangerous_count(), 0);
        assert_eq!(train.size(), 2);
        assert_eq!(train.length(), 23.0);
        assert_eq!(train.weight(), 5.0 + 1.0 + 8.0 + 4.0);
        assert_eq!(train.value(), 500.0);
        assert_well_linked(&train);
        assert_no_drift(&train);
    }

    #[test]
    fn test_remove_dangerous_cars_through_cursor() {
        // Cursor on C, a dangerous interior car
        let mut train = abcd();
        train.cursor_backward().unwrap();
        train.remove_dangerous_cars().unwrap();
        assert_eq!(names(&train), ["A", "D"]);
        assert_eq!(cursor_name(&train).as_deref(), Some("D"));
        assert_well_linked(&train);
    }

    #[test]
    fn test_remove_dangerous_cars_at_head_and_tail() {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(1.0, 1.0), Some(load("H", 1.0, 1.0, true)));
        couple(&mut train, car(1.0, 1.0), None);
        couple(&mut train, car(1.0, 1.0), Some(load("S", 1.0, 1.0, false)));
        couple(&mut train, car(1.0, 1.0), Some(load("T", 1.0, 1.0, true)));
        train.cursor_backward().unwrap();

        train.remove_dangerous_cars().unwrap();
        assert_eq!(names(&train), ["-", "S"]);
        assert_eq!(cursor_name(&train).as_deref(), Some("S"));
        assert_well_linked(&train);
        assert_no_drift(&train);
    }

    #[test]
    fn test_remove_dangerous_cars_can_empty_train() {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(1.0, 1.0), Some(load("X", 1.0, 1.0, true)));
        couple(&mut train, car(1.0, 1.0), Some(load("Y", 1.0, 1.0, true)));

        assert_eq!(train.remove_dangerous_cars().unwrap().len(), 2);
        assert!(train.is_empty());
        assert_eq!(train.cursor(), None);
        assert_no_drift(&train);
    }

    #[test]
    fn test_remove_dangerous_cars_without_danger_is_noop() {
        let mut train = TrainLinkedList::new();
        couple(&mut train, car(1.0, 1.0), None);
        couple(&mut train, car(1.0, 1.0), Some(load("S", 1.0, 1.0, false)));
        let before = train.summary();

        assert!(train.remove_dangerous_cars().unwrap().is_empty());
        assert_eq!(train.summary(), before);
    }

    #[test]
    fn test_manifest_rows_marks_cursor() {
        let mut train = abcd();
        train.cursor_backward().unwrap();
        couple(&mut train, car(2.0, 2.0), None);

        let rows: Vec<ManifestRow> = train.manifest_rows().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows.iter().map(|r| r.position).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
        assert_eq!(rows.iter().filter(|r| r.is_cursor).count(), 1);
        assert!(rows[3].is_cursor);
        assert_eq!(rows[3].load_name, "Empty");
        assert_eq!(rows[4].load_name, "D");
    }

    #[test]
    fn test_random_operations_never_drift() {
        let mut rng   = StdRng::seed_from_u64(0x7241);
        let mut train = TrainLinkedList::new();
        let mut expected_size = 0usize;

        for _ in 0..2_000 {
            match rng.gen_range(0..6) {
                0 | 1 => {
                    let c = car(rng.gen_range(0..40) as f64, rng.gen_range(0..40) as f64);
                    let l = rng.gen_bool(0.7).then(|| {
                        load(
                            ["Coal", "Oil", "Grain"][rng.gen_range(0..3)],
                            rng.gen_range(0..100) as f64,
                            rng.gen_range(0..1000) as f64,
                            rng.gen_bool(0.3),
                        )
                    });
                    couple(&mut train, c, l);
                    expected_size += 1;
                }
                2 => {
                    if train.remove_cursor().is_ok() {
                        expected_size -= 1;
                    }
                }
                3 => {
                    let _ = train.cursor_forward();
                }
                4 => {
                    let _ = train.cursor_backward();
                }
                _ => {
                    if rng.gen_bool(0.1) {
                        if let Ok(removed) = train.remove_dangerous_cars() {
                            expected_size -= removed.len();
                        }
                        assert_eq!(train.dangerous_count(), 0);
                    }
                }
            }

            assert_eq!(train.size(), expected_size);
            assert_well_linked(&train);
            assert_no_drift(&train);
        }
    }
}
