//! The cart-pendulum plant: owns the physical parameters, current state, and
//! currently applied force, and exposes the `simulate`/`get`/`set` contract
//! that both the discrete-event simulator and the live UDP loop drive.

use crate::dynamics::{Integrator, PendulumParams, PendulumState, StateSequence};
use log::trace;

/// Created once per run, mutated only by its own methods, destroyed at run
/// end. Not internally synchronized: callers serialize access (see the live
/// plant loop in `net::plant_loop`, which is the only place this matters).
pub struct Plant {
    params: PendulumParams,
    state: PendulumState,
    force: f64,
    t: f64,
}

impl Plant {
    pub fn new(params: PendulumParams, force0: f64, state0: PendulumState) -> Self {
        Self { params, state: state0, force: force0, t: 0.0 }
    }

    pub fn get_state(&self) -> PendulumState {
        self.state
    }

    pub fn get_time(&self) -> f64 {
        self.t
    }

    pub fn get_force(&self) -> f64 {
        self.force
    }

    pub fn set_force(&mut self, f: f64) {
        trace!("plant: force set to {f}");
        self.force = f;
    }

    /// Advance the plant for `duration` seconds in steps of `dt`, appending
    /// one `TimeState` per completed RK4 step. The force applied is whatever
    /// `get_force()` returns at the start of the call, held constant for the
    /// whole call (consistent with a single `Integrator::integrate`).
    pub fn simulate(&mut self, duration: f64, dt: f64, states: &mut StateSequence) {
        let integ = Integrator::new(&self.params);
        integ.integrate(&mut self.state, &mut self.t, self.force, duration, dt, states);
    }

    /// Advance the plant by exactly one step of size `dt`.
    pub fn simulate_step(&mut self, dt: f64, states: &mut StateSequence) {
        let integ = Integrator::new(&self.params);
        integ.step(&mut self.state, &mut self.t, self.force, dt, states);
    }
}
