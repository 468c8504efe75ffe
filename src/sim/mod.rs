//! Deterministic discrete-event simulator: a priority-queue scheduler that
//! delivers SEND/RECEIVE/UPDATE events to registered actors in strict time
//! order, plus the orchestrator that wires the plant and a controller as
//! closed-loop actors.

pub mod cascade;
pub mod event;
pub mod orchestrator;
pub mod queue;

pub use cascade::CascadeControlLaw;
pub use event::{Event, EventKind};
pub use orchestrator::{ControlLaw, LqrLaw, Orchestrator, PidLaw};
pub use queue::EventQueue;
