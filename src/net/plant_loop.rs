//! Live plant: two OS threads sharing one pending-update cell. A
//! sampler/renderer-equivalent foreground thread owns the `Plant` and
//! advances it in step with the wall clock; a background thread blocks on
//! `recv_from` and republishes the latest decoded force.
//!
//! Handoff discipline (most-recent-wins): the receiver locks, writes `u`,
//! unlocks, then sets `update_ready`. The foreground attempts a
//! `1 -> 0` CAS on `update_ready`; on success it locks, reads `u`, unlocks,
//! and applies it. A spurious CAS failure just defers the update one cycle.

use super::clock::MonotonicClock;
use super::wire::{StatePacket, UpdatePacket};
use crate::dynamics::PendulumParams;
use crate::plant::Plant;
use log::{trace, warn};
use parking_lot::Mutex;
use socket2::{Domain, Socket, Type};
use spin_sleep::{SpinSleeper, SpinStrategy};
use std::io::Write;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thread_priority::{ThreadBuilderExt, ThreadPriority};

/// Periodic log sample interval, matching the reference plant's on-disk log
/// cadence.
pub const LOG_INTERVAL_USEC: u64 = 10_000;

struct PendingUpdate {
    u: Mutex<f64>,
    ready: AtomicBool,
}

/// Builds a UDP socket bound to `bind_addr`, connected to `peer_addr`, so
/// that `send`/`recv` (rather than `send_to`/`recv_from`) suffice for the
/// single-peer cycle loop.
pub fn connected_udp_socket(bind_addr: SocketAddr, peer_addr: SocketAddr) -> std::io::Result<UdpSocket> {
    let domain = if bind_addr.is_ipv6() { Domain::IPV6 } else { Domain::IPV4 };
    let socket = Socket::new(domain, Type::DGRAM, None)?;
    socket.set_reuse_address(true)?;
    socket.bind(&bind_addr.into())?;
    socket.connect(&peer_addr.into())?;
    socket.set_nonblocking(false)?;
    Ok(socket.into())
}

pub struct PlantLoop {
    plant: Plant,
    socket: UdpSocket,
    cycletime_us: u64,
    dt: f64,
    pending: Arc<PendingUpdate>,
}

impl PlantLoop {
    pub fn new(params: PendulumParams, force0: f64, state0: [f64; 4], socket: UdpSocket, cycletime_us: u64, dt: f64) -> Self {
        Self {
            plant: Plant::new(params, force0, state0),
            socket,
            cycletime_us,
            dt,
            pending: Arc::new(PendingUpdate { u: Mutex::new(0.0), ready: AtomicBool::new(false) }),
        }
    }

    /// Spawns the background receiver thread at max OS priority, since
    /// actuation latency directly feeds the control loop. Runs until the
    /// socket errors (e.g. the process tears down the socket).
    pub fn spawn_receiver(&self) -> thread::JoinHandle<()> {
        let socket = self.socket.try_clone().expect("clone plant socket for receiver thread");
        let pending = self.pending.clone();

        thread::Builder::new()
            .name("plant-receiver".to_string())
            .spawn_with_priority(ThreadPriority::Max, move |_| {
            let mut buf = [0u8; 65535];
            loop {
                let len = match socket.recv(&mut buf) {
                    Ok(len) => len,
                    Err(e) => {
                        warn!("plant receiver: socket closed: {e}");
                        return;
                    }
                };

                match UpdatePacket::demarshal(&buf[..len]) {
                    Ok(packet) => {
                        *pending.u.lock() = packet.u;
                        pending.ready.store(true, Ordering::Release);
                    }
                    Err(e) => warn!("plant receiver: demarshal failed: {e}"),
                }
            }
        })
            .expect("spawn plant receiver thread")
    }

    /// Runs the sampler/integrator loop in the foreground for `runtime_secs`
    /// wall-clock seconds. Writes a `(t_us, x, angle_deg)` row to `log_writer`
    /// every `LOG_INTERVAL_USEC` microseconds, if given.
    pub fn run(&mut self, runtime_secs: f64, mut log_writer: Option<&mut dyn Write>) {
        let clock = MonotonicClock::start();
        let mut t_next_cycle_us = clock.elapsed_us();
        let mut t_next_log_us = t_next_cycle_us;
        let mut scratch = Vec::new();
        let sleeper = SpinSleeper::new(100_000).with_spin_strategy(SpinStrategy::YieldThread);

        while clock.elapsed_secs() < runtime_secs {
            let t_current_us = clock.elapsed_us();

            if t_next_cycle_us <= t_current_us {
                let state = self.plant.get_state();
                let packet = StatePacket { time_us: t_current_us, angle: state[2], omega: state[3], x: state[0], v: state[1] };
                if let Err(e) = self.socket.send(&packet.marshal()) {
                    warn!("plant: could not send state to controller: {e}");
                }
                t_next_cycle_us += self.cycletime_us;
            }

            if self.pending.ready.compare_exchange(true, false, Ordering::AcqRel, Ordering::Relaxed).is_ok() {
                let u = *self.pending.u.lock();
                self.plant.set_force(u);
                trace!("plant: applied u={u}");
            }

            let t_old = self.plant.get_time();
            let d = t_current_us as f64 / 1_000_000.0 - t_old;
            if d >= self.dt {
                self.plant.simulate(d, self.dt, &mut scratch);
                scratch.clear();
            }

            if let Some(writer) = log_writer.as_deref_mut() {
                if t_next_log_us <= t_current_us {
                    let state = self.plant.get_state();
                    let angle_deg = state[2].to_degrees();
                    if let Err(e) = writeln!(writer, "{t_current_us},{},{angle_deg}", state[0]) {
                        warn!("plant: could not write log entry: {e}");
                    }
                    t_next_log_us += LOG_INTERVAL_USEC;
                }
            }

            sleeper.sleep(Duration::from_micros(100));
        }
    }
}
