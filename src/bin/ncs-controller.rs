//! Live controller process: binds a UDP socket and answers every incoming
//! state datagram with a PID-computed actuation update.
//!
//! Usage: `ncs-controller -p <port> -P <kp> -I <ki> -D <kd>`

use ncs_lab::control::PidController;
use ncs_lab::net::controller_loop::AngleControllerLoop;
use std::net::UdpSocket;

struct Args {
    port: String,
    kp: f64,
    ki: f64,
    kd: f64,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} -p <port> -P <kp> -I <ki> -D <kd>\n\
         \x20 -p PORT : destination service (service name or port number)\n\
         \x20 -P PVAL : P(roportional) value of PID controller\n\
         \x20 -I IVAL : I(ntegral) value of PID controller\n\
         \x20 -D DVAL : D(ifferential) value of PID controller\n"
    )
}

fn parse_args() -> Result<Args, String> {
    let mut port = None;
    let mut kp = None;
    let mut ki = None;
    let mut kd = None;

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "-p" => port = Some(value()?),
            "-P" => kp = Some(value()?.parse().map_err(|e| format!("bad -P: {e}"))?),
            "-I" => ki = Some(value()?.parse().map_err(|e| format!("bad -I: {e}"))?),
            "-D" => kd = Some(value()?.parse().map_err(|e| format!("bad -D: {e}"))?),
            other => return Err(format!("unrecognized flag {other}")),
        }
    }

    Ok(Args {
        port: port.ok_or("missing required -p <port>")?,
        kp: kp.ok_or("missing required -P <kp>")?,
        ki: ki.ok_or("missing required -I <ki>")?,
        kd: kd.ok_or("missing required -D <kd>")?,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n{}", usage("ncs-controller"));
            std::process::exit(1);
        }
    };

    let socket = UdpSocket::bind(format!("0.0.0.0:{}", args.port))?;
    let pid = PidController::new(args.kp, args.ki, args.kd);
    let mut controller_loop = AngleControllerLoop::new(pid, socket);

    controller_loop.run(None)?;
    Ok(())
}
