//! CSV I/O for event traces (input) and state trajectories (output).

pub mod trace;
pub mod trajectory;

pub use trace::{read_trace, TraceRow};
pub use trajectory::{write_trajectory, TrajectoryRow};
