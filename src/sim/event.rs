//! Event type delivered by the `EventQueue`. No closures attached to events
//! (see `queue` module docs for why): an event is pure data, and the
//! schedule-next-UPDATE behavior lives in the queue itself.

use std::cmp::Ordering;

/// SEND: the plant sampled its state at `time` and transmitted packet
/// `pkt_nr` toward the controller. RECEIVE: the plant received the
/// controller's response for `pkt_nr` and updates the applied force. UPDATE:
/// the periodic tick that advances the plant by one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Send,
    Receive,
    Update,
}

/// `event_id` is strictly increasing in insertion order. `time` is the
/// scheduled event time. Ordering in the priority queue is
/// `(time asc, event_id asc)` for stable tie-breaking.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub event_id: u64,
    pub pkt_nr: u64,
    pub time: f64,
    pub kind: EventKind,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.event_id == other.event_id
    }
}
impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    /// Reversed so that `BinaryHeap` (a max-heap) pops the event with the
    /// smallest `(time, event_id)` first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .partial_cmp(&self.time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.event_id.cmp(&self.event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_in_time_then_event_id_order() {
        let mut heap = BinaryHeap::new();
        heap.push(Event { event_id: 2, pkt_nr: 0, time: 1.0, kind: EventKind::Update });
        heap.push(Event { event_id: 0, pkt_nr: 0, time: 1.0, kind: EventKind::Send });
        heap.push(Event { event_id: 1, pkt_nr: 0, time: 0.5, kind: EventKind::Receive });

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.event_id).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }
}
