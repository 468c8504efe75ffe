//! Live controller: blocking request/response over UDP. One state packet in,
//! one update packet out, per datagram; no state kept across datagrams
//! beyond the controller's own integrator history.

use super::wire::{StatePacket, UpdatePacket};
use crate::control::PidController;
use log::{debug, warn};
use std::net::UdpSocket;

/// Wraps a `PidController` regulating pole angle to zero, matching the
/// reference controller's PID-only live mode.
pub struct AngleControllerLoop {
    pid: PidController,
    socket: UdpSocket,
}

impl AngleControllerLoop {
    pub fn new(pid: PidController, socket: UdpSocket) -> Self {
        Self { pid, socket }
    }

    /// Services datagrams forever: recv, demarshal, compute, marshal,
    /// sendto the source address of the datagram just received. Runs until
    /// the socket errors out (e.g. on shutdown) or `max_iterations`
    /// datagrams have been handled.
    pub fn run(&mut self, max_iterations: Option<u64>) -> std::io::Result<()> {
        let mut buf = [0u8; 65535];
        let mut iterations: u64 = 0;

        loop {
            let (len, src) = self.socket.recv_from(&mut buf)?;
            let packet = match StatePacket::demarshal(&buf[..len]) {
                Ok(p) => p,
                Err(e) => {
                    warn!("could not demarshal state packet: {e}");
                    continue;
                }
            };

            let u = self.compute(&packet);
            let response = UpdatePacket { time_us: packet.time_us, u };
            debug!("controller: state at {}us angle={} -> u={u}", packet.time_us, packet.angle);

            if let Err(e) = self.socket.send_to(&response.marshal(), src) {
                warn!("could not send update to {src}: {e}");
            }

            iterations += 1;
            if let Some(max) = max_iterations {
                if iterations >= max {
                    return Ok(());
                }
            }
        }
    }

    fn compute(&mut self, packet: &StatePacket) -> f64 {
        let t = packet.time_us as f64 / 1_000_000.0;
        -self.pid.control(0.0, packet.angle, t)
    }
}
