//! Controllers that compute an actuation force from plant state: a scalar
//! PID law and a fixed-gain LQR law.

pub mod lqr;
pub mod pid;

pub use lqr::LqrController;
pub use pid::PidController;
