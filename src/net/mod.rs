//! Live two-process runtime: wire marshaling and the plant/controller cycle
//! loops that exchange state/update datagrams over UDP.

pub mod clock;
pub mod controller_loop;
pub mod plant_loop;
pub mod wire;

pub use clock::MonotonicClock;
pub use wire::{LegacyStatePacket, StatePacket, UpdatePacket};
