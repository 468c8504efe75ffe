//! Cart-pendulum dynamics: the nonlinear equations of motion and a fixed-step
//! RK4 integrator used to advance them.

pub mod integrator;
pub mod pendulum;

pub use integrator::Integrator;
pub use pendulum::{PendulumParams, PendulumState, TimeState, StateSequence, G};
