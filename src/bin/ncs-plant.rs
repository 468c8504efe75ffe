//! Live plant process: samples the cart-pendulum state on a fixed cycle,
//! transmits it to the controller, and applies whatever force the
//! controller last sent back.
//!
//! Usage: `ncs-plant -d <host> -p <port> -c <cycletime_usec> [-f <logfile>]`

use ncs_lab::dynamics::PendulumParams;
use ncs_lab::net::plant_loop::{connected_udp_socket, PlantLoop};
use std::fs::File;
use std::net::ToSocketAddrs;

const PARAM_M: f64 = 0.2;
const PARAM_CART_MASS: f64 = 0.5;
const PARAM_I: f64 = 0.006;
const PARAM_L: f64 = 0.3;
const PARAM_DT: f64 = 0.001;
const RUNTIME_SECS: f64 = 20.0;

struct Args {
    host: String,
    port: String,
    cycletime_usec: u64,
    log_file: Option<String>,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} -d <host> -p <port> -c <cycletime_usec> [-f <logfile>]\n\
         \x20 -d HOST : destination host (name or IP address)\n\
         \x20 -p PORT : destination service (service name or port number)\n\
         \x20 -c CYCLETIME : cycle time in micro-seconds for sending datagrams\n\
         \x20 -f FILENAME : log file\n"
    )
}

fn parse_args() -> Result<Args, String> {
    let mut host = None;
    let mut port = None;
    let mut cycletime_usec = None;
    let mut log_file = None;

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "-d" => host = Some(value()?),
            "-p" => port = Some(value()?),
            "-c" => cycletime_usec = Some(value()?.parse().map_err(|e| format!("bad -c: {e}"))?),
            "-f" => log_file = Some(value()?),
            other => return Err(format!("unrecognized flag {other}")),
        }
    }

    Ok(Args {
        host: host.ok_or("missing required -d <host>")?,
        port: port.ok_or("missing required -p <port>")?,
        cycletime_usec: cycletime_usec.ok_or("missing required -c <cycletime_usec>")?,
        log_file,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n{}", usage("ncs-plant"));
            std::process::exit(1);
        }
    };

    let peer_addr = format!("{}:{}", args.host, args.port)
        .to_socket_addrs()?
        .next()
        .ok_or("could not resolve controller address")?;
    let bind_addr = if peer_addr.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" }.parse()?;
    let socket = connected_udp_socket(bind_addr, peer_addr)?;

    let params = PendulumParams::new(PARAM_M, PARAM_CART_MASS, PARAM_I, PARAM_L);
    let state0 = [5.0, 0.0, 0.0, 0.0];
    let mut plant_loop = PlantLoop::new(params, 0.0, state0, socket, args.cycletime_usec, PARAM_DT);

    let _receiver = plant_loop.spawn_receiver();

    let mut log_handle = args.log_file.as_deref().map(File::create).transpose()?;
    plant_loop.run(RUNTIME_SECS, log_handle.as_mut().map(|f| f as &mut dyn std::io::Write));

    Ok(())
}
