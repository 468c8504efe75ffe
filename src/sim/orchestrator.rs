//! Closed-loop glue: wires plant and controller as a single `EventActor` so
//! the shared per-packet scratch (`u_vec`, sequence counters) has one owner,
//! per the design note that this state must not be cross-aliased between
//! separate plant/controller actors.

use super::event::{Event, EventKind};
use super::queue::EventActor;
use crate::dynamics::{PendulumState, StateSequence};
use crate::plant::Plant;
use crate::control::{LqrController, PidController};
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;

/// Computes the actuation force for the packet the plant most recently
/// sent, given the trajectory recorded so far. Implementations hold their
/// own controller state (PID history, LQR gain, ...).
pub trait ControlLaw {
    fn compute(&mut self, states: &StateSequence) -> f64;
}

/// PID law: regulates pole angle `phi` to a fixed setpoint.
pub struct PidLaw {
    pid: PidController,
    setpoint: f64,
}

impl PidLaw {
    pub fn new(kp: f64, ki: f64, kd: f64, setpoint: f64) -> Self {
        Self { pid: PidController::new(kp, ki, kd), setpoint }
    }
}

impl ControlLaw for PidLaw {
    fn compute(&mut self, states: &StateSequence) -> f64 {
        let (t, state) = *states.last().expect("compute called with empty trajectory");
        -self.pid.control(self.setpoint, state[2], t)
    }
}

/// LQR law over full state, with no position reference.
pub struct LqrLaw {
    lqr: LqrController,
}

impl LqrLaw {
    pub fn new(k: [f64; 4]) -> Self {
        Self { lqr: LqrController::new(k) }
    }
}

impl ControlLaw for LqrLaw {
    fn compute(&mut self, states: &StateSequence) -> f64 {
        let (_, state) = *states.last().expect("compute called with empty trajectory");
        self.lqr.control(&state)
    }
}

/// Orchestrates one plant against one control law over a sequence of
/// SEND/RECEIVE/UPDATE events. Owns the plant, the recorded trajectory, the
/// per-packet force vector `u_vec`, and both sequence counters.
///
/// Acceptance policy (pinned down from the reference implementation, see
/// SPEC_FULL.md section 4.G / 9):
/// - RECEIVE(pkt_nr) is accepted iff `pkt_nr >= current_rcv_seq`; otherwise
///   it's a stale/out-of-order packet and is silently dropped.
/// - A SEND's force is computed iff the trajectory is non-empty and
///   `pkt_nr == next_send_seq - 1` (i.e. it's the most recently observed
///   SEND); otherwise it's logged as out-of-order and skipped.
pub struct Orchestrator<C: ControlLaw> {
    plant: Plant,
    control: C,
    dt: f64,
    states: StateSequence,
    u_vec: Vec<f64>,
    next_send_seq: u64,
    current_rcv_seq: u64,
}

impl<C: ControlLaw> Orchestrator<C> {
    pub fn new(plant: Plant, control: C, dt: f64) -> Self {
        Self {
            plant,
            control,
            dt,
            states: Vec::new(),
            u_vec: vec![0.0],
            next_send_seq: 0,
            current_rcv_seq: 0,
        }
    }

    pub fn states(&self) -> &StateSequence {
        &self.states
    }

    pub fn plant_state(&self) -> PendulumState {
        self.plant.get_state()
    }

    pub fn u_vec_len(&self) -> usize {
        self.u_vec.len()
    }

    pub fn applied_force(&self) -> f64 {
        self.plant.get_force()
    }

    pub fn current_rcv_seq(&self) -> u64 {
        self.current_rcv_seq
    }
}

impl<C: ControlLaw> EventActor for Orchestrator<C> {
    fn on_event(&mut self, event: &Event) {
        match event.kind {
            EventKind::Update => {
                trace!("plant: update at {}, f={}", event.time, self.plant.get_force());
                self.plant.simulate_step(self.dt, &mut self.states);
            }
            EventKind::Receive => {
                trace!("plant: receive at {}, pkt={}", event.time, event.pkt_nr);
                if event.pkt_nr >= self.current_rcv_seq {
                    if (event.pkt_nr as usize) < self.u_vec.len() {
                        let u = self.u_vec[event.pkt_nr as usize];
                        self.plant.set_force(u);
                        self.current_rcv_seq = event.pkt_nr;
                    } else {
                        debug!("plant: receive for packet {} arrived before its force was computed, ignored", event.pkt_nr);
                    }
                } else {
                    debug!("plant: stale packet {} ignored (current={})", event.pkt_nr, self.current_rcv_seq);
                }
            }
            EventKind::Send => {
                self.next_send_seq += 1;
                trace!("plant: send at {}, next seq={}", event.time, self.next_send_seq);

                if !self.states.is_empty() && event.pkt_nr == self.next_send_seq - 1 {
                    let u = self.control.compute(&self.states);
                    self.u_vec.push(u);
                } else if !self.states.is_empty() {
                    debug!("controller: out-of-order packet, no update at {}", event.time);
                }
            }
        }
    }
}

/// Shared handle so callers can keep inspecting the orchestrator (its
/// recorded trajectory, final `u_vec`, ...) after handing a subscriber
/// reference to an `EventQueue`, whose `add_receiver` takes ownership of a
/// `Box<dyn EventActor>`.
pub struct OrchestratorHandle<C: ControlLaw>(pub Rc<RefCell<Orchestrator<C>>>);

impl<C: ControlLaw> OrchestratorHandle<C> {
    pub fn new(orchestrator: Orchestrator<C>) -> Self {
        Self(Rc::new(RefCell::new(orchestrator)))
    }

    pub fn share(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C: ControlLaw> EventActor for OrchestratorHandle<C> {
    fn on_event(&mut self, event: &Event) {
        self.0.borrow_mut().on_event(event);
    }
}
