//! Priority-queue driven scheduler. Redesigned from the original's
//! closure-per-event model (see spec design notes): an `Event` is pure data,
//! and the only "action" ever attached to an event — rescheduling the next
//! periodic UPDATE — is handled by the queue's own `run` loop instead of a
//! stored closure. Subscribers are a polymorphic `EventActor` capability,
//! not an `EventReceiver` marker base: dispatch is a trait-object call, not
//! inheritance.

use super::event::{Event, EventKind};
use crate::io::trace::read_trace;
use log::trace;
use std::collections::BinaryHeap;
use std::error::Error;
use std::path::Path;

/// Something that reacts to every event delivered by the queue, in
/// insertion order relative to other subscribers.
pub trait EventActor {
    fn on_event(&mut self, event: &Event);
}

/// Owns the min-heap of pending events, the monotonic `event_id` counter,
/// the UPDATE step size, and the subscriber list.
pub struct EventQueue {
    heap: BinaryHeap<Event>,
    next_event_id: u64,
    step: f64,
    subscribers: Vec<Box<dyn EventActor>>,
}

impl EventQueue {
    pub fn new(step: f64) -> Self {
        Self { heap: BinaryHeap::new(), next_event_id: 0, step, subscribers: Vec::new() }
    }

    /// Loads SEND/RECEIVE events from a trace CSV (see `io::trace`). Each
    /// trace row emits one SEND at `send_time` and one RECEIVE at
    /// `receive_time`, both carrying `pkt_nr`.
    pub fn load_trace<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Box<dyn Error>> {
        for row in read_trace(path)? {
            self.schedule(row.pkt_nr, row.send_time, EventKind::Send);
            self.schedule(row.pkt_nr, row.receive_time, EventKind::Receive);
        }
        Ok(())
    }

    /// Registers a subscriber. Dispatch order is insertion order.
    pub fn add_receiver(&mut self, actor: Box<dyn EventActor>) {
        self.subscribers.push(actor);
    }

    fn schedule(&mut self, pkt_nr: u64, time: f64, kind: EventKind) {
        let event = Event { event_id: self.next_event_id, pkt_nr, time, kind };
        self.next_event_id += 1;
        self.heap.push(event);
    }

    /// Pops events while the heap is non-empty and `top.time <= until_time`,
    /// dispatching each to every subscriber in insertion order. Schedules
    /// the first periodic UPDATE at `t=0`, and re-schedules the next UPDATE
    /// `step` seconds after each one fires, as long as the next tick does
    /// not exceed `until_time`.
    pub fn run(&mut self, until_time: f64) {
        self.schedule(0, 0.0, EventKind::Update);

        while let Some(event) = self.heap.peek().copied() {
            if event.time > until_time {
                break;
            }
            self.heap.pop();
            trace!("event {} ({:?}) at t={} pkt={}", event.event_id, event.kind, event.time, event.pkt_nr);

            if event.kind == EventKind::Update {
                let next_time = event.time + self.step;
                if next_time <= until_time {
                    self.schedule(event.pkt_nr, next_time, EventKind::Update);
                }
            }

            for subscriber in &mut self.subscribers {
                subscriber.on_event(&event);
            }
        }
    }
}
