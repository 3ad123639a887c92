//! # Ring Queue Implementation
//!
//! A fixed-capacity circular queue that refuses new items when full.
//!
//! ## Plain English
//!
//! Picture a circular track with numbered parking spots.
//! Cars park one after another around the circle; the car at the
//! front leaves first. When every spot is taken, the barrier stays
//! down until someone leaves or the lot is rebuilt bigger.

use crate::error::QueueError;
use crate::record::Keyed;

use super::snapshot::{QueueSnapshot, SlotView};

/// Smallest capacity a ring may have. Smaller requests are clamped up.
pub const MIN_CAPACITY: usize = 4;

/// A fixed-capacity ring of optional slots.
///
/// ## Properties
/// - Fixed capacity between resizes (never below [`MIN_CAPACITY`])
/// - O(1) enqueue and dequeue
/// - Refuses new items when full instead of overwriting
/// - Maintains arrival order
///
/// Occupied slots are always exactly the `len()` positions starting at
/// `front` and wrapping modulo `capacity`.
#[derive(Clone, Debug)]
pub struct RingQueue<T> {
    /// Absolute slot storage, `capacity` long
    slots: Vec<Option<T>>,

    /// Absolute index of the oldest item (read only when non-empty)
    front: usize,

    /// Number of occupied slots
    size: usize,
}

impl<T> RingQueue<T> {
    /// Creates an empty ring. Capacities below [`MIN_CAPACITY`] are clamped.
    ///
    /// ## Example
    /// ```
    /// # use parking_ring::buffer::RingQueue;
    /// let ring: RingQueue<String> = RingQueue::new(2);
    /// assert_eq!(ring.capacity(), 4);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity.max(MIN_CAPACITY)),
            front: 0,
            size: 0,
        }
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns the number of free slots.
    pub fn free_slots(&self) -> usize {
        self.capacity() - self.size
    }

    /// Absolute index of the oldest item, or `None` when empty.
    pub fn front(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.front)
    }

    /// Absolute index of the newest item, or `None` when empty.
    pub fn rear(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.absolute(self.size - 1))
    }

    /// Places `item` in the first free slot after the rear.
    ///
    /// Returns the absolute index it landed in. When full, the item comes
    /// back inside [`QueueError::Overflow`] and nothing changes.
    pub fn enqueue(&mut self, item: T) -> Result<usize, QueueError<T>> {
        if self.is_full() {
            return Err(QueueError::Overflow {
                capacity: self.capacity(),
                rejected: item,
            });
        }

        let idx = self.absolute(self.size);
        self.slots[idx] = Some(item);
        self.size += 1;
        Ok(idx)
    }

    /// Removes and returns the oldest item.
    pub fn dequeue(&mut self) -> Result<T, QueueError<T>> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let item = self.slots[self.front].take().ok_or(QueueError::Empty)?;
        self.front = (self.front + 1) % self.capacity();
        self.size -= 1;
        Ok(item)
    }

    /// Returns the item at an absolute index, if that slot is occupied.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx)?.as_ref()
    }

    /// Absolute index of the first item (in arrival order) matching `pred`.
    pub fn position<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        (0..self.size)
            .map(|rel| self.absolute(rel))
            .find(|&idx| self.slots[idx].as_ref().is_some_and(&mut pred))
    }

    /// Removes the item at absolute index `idx` and returns it.
    ///
    /// The survivors are then laid out again from slot 0 in their
    /// original order, so `front` becomes 0 and every absolute index
    /// after the removed item changes. Returns `None` (and changes
    /// nothing) if `idx` is not inside the occupied window.
    pub fn remove_at(&mut self, idx: usize) -> Option<T> {
        let rel = self.relative(idx)?;

        let mut items = self.drain_logical();
        let removed = items.remove(rel);
        self.refill(items);
        Some(removed)
    }

    /// Removes the item at absolute index `idx`; see [`RingQueue::remove_at`].
    ///
    /// Returns `false` if the queue is empty or `idx` is not occupied.
    pub fn remove_by_absolute_index(&mut self, idx: usize) -> bool {
        self.remove_at(idx).is_some()
    }

    /// Rebuilds the ring with a new capacity, keeping arrival order.
    ///
    /// Capacities below [`MIN_CAPACITY`] are clamped. If the new ring is
    /// too small, the newest items are discarded. Returns how many were
    /// discarded.
    pub fn resize_preserving_order(&mut self, new_capacity: usize) -> usize {
        let items = self.drain_logical();
        self.slots = empty_slots(new_capacity.max(MIN_CAPACITY));
        self.refill(items)
    }

    /// Empties every slot. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.front = 0;
        self.size = 0;
    }

    /// Iterates occupied items from front to rear.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.size).filter_map(move |rel| self.slots[self.absolute(rel)].as_ref())
    }

    /// Read-only view of every absolute slot plus the front/rear markers.
    pub fn snapshot(&self) -> QueueSnapshot<'_, T> {
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotView::new(index, slot.as_ref()))
            .collect();

        QueueSnapshot::new(self.capacity(), self.front(), self.rear(), slots)
    }

    /// Maps a logical position to its absolute slot.
    fn absolute(&self, rel: usize) -> usize {
        (self.front + rel) % self.capacity()
    }

    /// Maps an absolute slot to its logical position, if it is occupied.
    fn relative(&self, idx: usize) -> Option<usize> {
        if self.is_empty() || idx >= self.capacity() {
            return None;
        }
        let rel = (idx + self.capacity() - self.front) % self.capacity();
        (rel < self.size).then_some(rel)
    }

    /// Takes every item out in logical order, leaving the ring empty.
    fn drain_logical(&mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.size);
        for rel in 0..self.size {
            let idx = self.absolute(rel);
            if let Some(item) = self.slots[idx].take() {
                items.push(item);
            }
        }
        self.front = 0;
        self.size = 0;
        items
    }

    /// Re-enqueues `items` in order until full. Returns how many did not fit.
    fn refill(&mut self, items: Vec<T>) -> usize {
        let mut dropped = 0;
        for item in items {
            if self.enqueue(item).is_err() {
                dropped += 1;
            }
        }
        dropped
    }
}

impl<T: Keyed> RingQueue<T> {
    /// Absolute index of the earliest-arrived item whose key equals `key`.
    pub fn find_index_by_key(&self, key: &str) -> Option<usize> {
        self.position(|item| item.key() == key)
    }
}

impl<T: Clone> RingQueue<T> {
    /// Returns cloned copies of all items (front to rear).
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn s(key: &str) -> String {
        key.to_string()
    }

    fn ring_of(capacity: usize, keys: &[&str]) -> RingQueue<String> {
        let mut ring = RingQueue::new(capacity);
        for key in keys {
            ring.enqueue(s(key)).unwrap();
        }
        ring
    }

    /// Checks the occupancy invariants against the raw storage.
    fn assert_invariants<T>(ring: &RingQueue<T>) {
        assert!(ring.capacity() >= MIN_CAPACITY);
        assert!(ring.size <= ring.capacity());

        let occupied: Vec<usize> = (0..ring.capacity())
            .filter(|&i| ring.slots[i].is_some())
            .collect();
        let mut expected: Vec<usize> = (0..ring.size)
            .map(|rel| (ring.front + rel) % ring.capacity())
            .collect();
        expected.sort_unstable();

        assert_eq!(occupied, expected);
    }

    #[test]
    fn test_new_ring() {
        let ring: RingQueue<String> = RingQueue::new(8);
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 8);
        assert_eq!(ring.front(), None);
        assert_eq!(ring.rear(), None);
        assert_invariants(&ring);
    }

    #[test]
    fn test_capacity_floor() {
        for requested in 0..MIN_CAPACITY {
            let ring: RingQueue<String> = RingQueue::new(requested);
            assert_eq!(ring.capacity(), MIN_CAPACITY);
        }

        let mut ring = ring_of(6, &["A", "B"]);
        ring.resize_preserving_order(1);
        assert_eq!(ring.capacity(), MIN_CAPACITY);
        assert_eq!(ring.to_vec(), vec![s("A"), s("B")]);
    }

    #[test]
    fn test_fifo_order() {
        let keys = ["A", "B", "C", "D", "E"];
        let mut ring = ring_of(5, &keys);

        for key in keys {
            assert_eq!(ring.dequeue().unwrap(), key);
            assert_invariants(&ring);
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_overflow_leaves_ring_unchanged() {
        let mut ring = ring_of(4, &["A", "B", "C", "D"]);
        ring.dequeue().unwrap();
        ring.enqueue(s("E")).unwrap();
        assert!(ring.is_full());

        let before_front = ring.front;
        let before_slots = ring.slots.clone();

        let err = ring.enqueue(s("F")).unwrap_err();
        assert_eq!(
            err,
            QueueError::Overflow {
                capacity: 4,
                rejected: s("F")
            }
        );
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.front, before_front);
        assert_eq!(ring.slots, before_slots);
    }

    #[test]
    fn test_underflow_leaves_ring_unchanged() {
        let mut ring: RingQueue<String> = RingQueue::new(4);
        assert_eq!(ring.dequeue(), Err(QueueError::Empty));
        assert!(ring.is_empty());
        assert_eq!(ring.front, 0);
        assert_invariants(&ring);
    }

    #[test]
    fn test_wrap_around_round_trip() {
        let mut ring = ring_of(4, &["A", "B", "C"]);

        assert_eq!(ring.dequeue().unwrap(), "A");
        assert_eq!(ring.to_vec(), vec![s("B"), s("C")]);
        assert_eq!(ring.front(), Some(1));
        assert_eq!(ring.len(), 2);

        let idx = ring.enqueue(s("D")).unwrap();
        assert_eq!(idx, 3);
        assert_eq!(ring.to_vec(), vec![s("B"), s("C"), s("D")]);
        assert_eq!(ring.front(), Some(1));
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.rear(), Some(3));

        // One more push wraps into slot 0
        let idx = ring.enqueue(s("E")).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(ring.get(0).map(String::as_str), Some("E"));
        assert_eq!(ring.rear(), Some(0));
        assert_invariants(&ring);
    }

    #[test]
    fn test_find_then_remove() {
        let mut ring = ring_of(4, &["A", "B", "C"]);

        let idx = ring.find_index_by_key("B").unwrap();
        assert_eq!(idx, 1);

        assert!(ring.remove_by_absolute_index(idx));
        assert_eq!(ring.to_vec(), vec![s("A"), s("C")]);
        assert_eq!(ring.front(), Some(0));
        assert_eq!(ring.capacity(), 4);
        assert_invariants(&ring);
    }

    #[test]
    fn test_find_prefers_earliest_duplicate() {
        let mut ring = ring_of(6, &["X", "A", "B", "A"]);
        ring.dequeue().unwrap();
        assert_eq!(ring.find_index_by_key("A"), Some(1));
        assert_eq!(ring.find_index_by_key("a"), None);
        assert_eq!(ring.find_index_by_key("Z"), None);
    }

    #[test]
    fn test_find_in_empty_ring() {
        let ring: RingQueue<String> = RingQueue::new(4);
        assert_eq!(ring.find_index_by_key("A"), None);
    }

    #[test]
    fn test_remove_rebuilds_from_slot_zero() {
        // Layout after wrap: slot 0 = E, slots 2..=3 = C, D
        let mut ring = ring_of(4, &["A", "B", "C", "D"]);
        ring.dequeue().unwrap();
        ring.dequeue().unwrap();
        ring.enqueue(s("E")).unwrap();
        assert_eq!(ring.front(), Some(2));

        let removed = ring.remove_at(3);
        assert_eq!(removed.as_deref(), Some("D"));
        assert_eq!(ring.to_vec(), vec![s("C"), s("E")]);
        assert_eq!(ring.front(), Some(0));
        assert_eq!(ring.get(0).map(String::as_str), Some("C"));
        assert_eq!(ring.get(1).map(String::as_str), Some("E"));
        assert_eq!(ring.get(2), None);
        assert_invariants(&ring);
    }

    #[test]
    fn test_remove_outside_window_fails() {
        let mut ring = ring_of(6, &["A", "B"]);
        ring.dequeue().unwrap();
        // Occupied window is just slot 1
        let before = ring.slots.clone();

        assert!(!ring.remove_by_absolute_index(0));
        assert!(!ring.remove_by_absolute_index(2));
        assert!(!ring.remove_by_absolute_index(99));
        assert_eq!(ring.slots, before);
        assert_eq!(ring.front(), Some(1));

        let mut empty: RingQueue<String> = RingQueue::new(4);
        assert!(!empty.remove_by_absolute_index(0));
    }

    #[test]
    fn test_resize_grows_and_keeps_order() {
        let mut ring = ring_of(4, &["A", "B", "C", "D"]);
        ring.dequeue().unwrap();
        ring.enqueue(s("E")).unwrap();

        let dropped = ring.resize_preserving_order(10);
        assert_eq!(dropped, 0);
        assert_eq!(ring.capacity(), 10);
        assert_eq!(ring.front(), Some(0));
        assert_eq!(ring.to_vec(), vec![s("B"), s("C"), s("D"), s("E")]);
        assert_invariants(&ring);
    }

    #[test]
    fn test_resize_truncates_newest() {
        let mut ring = ring_of(8, &["A", "B", "C", "D", "E", "F"]);

        let dropped = ring.resize_preserving_order(4);
        assert_eq!(dropped, 2);
        assert_eq!(ring.capacity(), 4);
        assert!(ring.is_full());
        assert_eq!(ring.to_vec(), vec![s("A"), s("B"), s("C"), s("D")]);
    }

    #[test]
    fn test_clear() {
        let mut ring = ring_of(5, &["A", "B", "C"]);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.capacity(), 5);
        assert_eq!(ring.free_slots(), 5);
        assert_invariants(&ring);
    }

    #[test]
    fn test_snapshot_marks_front_and_rear() {
        let mut ring = ring_of(4, &["A", "B", "C"]);
        ring.dequeue().unwrap();

        let snap = ring.snapshot();
        assert_eq!(snap.capacity(), 4);
        assert_eq!(snap.front(), Some(1));
        assert_eq!(snap.rear(), Some(2));
        assert_eq!(snap.slots().len(), 4);
        assert!(!snap.slots()[0].is_occupied());
        assert_eq!(snap.slots()[1].record().map(String::as_str), Some("B"));
        assert_eq!(snap.slots()[3].index(), 3);

        // Snapshot is read-only; ring is untouched
        assert_eq!(ring.len(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        #[derive(Clone, Debug)]
        enum Op {
            Enqueue(u8),
            Dequeue,
            RemoveAt(usize),
            RemoveKey(u8),
            Resize(usize),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0u8..6).prop_map(Op::Enqueue),
                2 => Just(Op::Dequeue),
                1 => (0usize..12).prop_map(Op::RemoveAt),
                1 => (0u8..6).prop_map(Op::RemoveKey),
                1 => (0usize..12).prop_map(Op::Resize),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            /// Every operation keeps the slot layout consistent and the
            /// logical order equal to a plain deque model.
            #[test]
            fn prop_matches_deque_model(
                capacity in 0usize..10,
                ops in prop::collection::vec(op_strategy(), 0..80)
            ) {
                let mut ring: RingQueue<String> = RingQueue::new(capacity);
                let mut model: VecDeque<String> = VecDeque::new();

                for op in ops {
                    match op {
                        Op::Enqueue(k) => {
                            let key = format!("car-{k}");
                            let full = ring.is_full();
                            let result = ring.enqueue(key.clone());
                            prop_assert_eq!(result.is_err(), full);
                            if !full {
                                model.push_back(key);
                            }
                        }
                        Op::Dequeue => {
                            let expected = model.pop_front();
                            prop_assert_eq!(ring.dequeue().ok(), expected);
                        }
                        Op::RemoveAt(idx) => {
                            let target = ring.get(idx).cloned();
                            let in_window = ring.relative(idx);
                            let removed = ring.remove_by_absolute_index(idx);
                            prop_assert_eq!(removed, in_window.is_some());
                            if let Some(rel) = in_window {
                                prop_assert_eq!(model.remove(rel), target);
                                prop_assert!(ring.is_empty() || ring.front() == Some(0));
                            }
                        }
                        Op::RemoveKey(k) => {
                            let key = format!("car-{k}");
                            let expected_rel = model.iter().position(|m| *m == key);
                            match ring.find_index_by_key(&key) {
                                Some(idx) => {
                                    prop_assert_eq!(ring.get(idx), Some(&key));
                                    prop_assert_eq!(ring.relative(idx), expected_rel);
                                    prop_assert!(ring.remove_by_absolute_index(idx));
                                    let rel = expected_rel.unwrap();
                                    model.remove(rel);
                                }
                                None => prop_assert!(expected_rel.is_none()),
                            }
                        }
                        Op::Resize(cap) => {
                            let dropped = ring.resize_preserving_order(cap);
                            let new_cap = cap.max(MIN_CAPACITY);
                            prop_assert_eq!(ring.capacity(), new_cap);
                            prop_assert_eq!(dropped, model.len().saturating_sub(new_cap));
                            model.truncate(new_cap);
                        }
                    }

                    assert_invariants(&ring);
                    prop_assert_eq!(ring.to_vec(), model.iter().cloned().collect::<Vec<_>>());
                }
            }

            /// N pushes followed by N pops come back in the same order.
            #[test]
            fn prop_fifo_order(values in prop::collection::vec(any::<u16>(), 0..40)) {
                let mut ring = RingQueue::new(values.len());
                for v in &values {
                    ring.enqueue(*v).unwrap();
                }
                let popped: Vec<u16> = std::iter::from_fn(|| ring.dequeue().ok()).collect();
                prop_assert_eq!(popped, values);
            }
        }
    }
}
