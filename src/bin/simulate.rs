//! Discrete-event simulation entry point: replays a recorded packet trace
//! against a cart-pendulum plant and one of two control laws, writing the
//! resulting state trajectory to CSV.
//!
//! Usage: `simulate -i <events.csv> -o <states.csv> -n <1|2> [-d <distance>] [-e <epsilon>]`
//! `n=1` selects the cascade PID (position -> velocity -> angle); `n=2`
//! selects LQR with position reference. Both track `r(t) = 10*sin(0.2*t) + d/2`.

use ncs_lab::control::PidController;
use ncs_lab::dynamics::PendulumParams;
use ncs_lab::io::trajectory::write_trajectory;
use ncs_lab::plant::Plant;
use ncs_lab::sim::cascade::CascadeControlLaw;
use ncs_lab::sim::orchestrator::{Orchestrator, OrchestratorHandle};
use ncs_lab::sim::queue::EventQueue;

const PARAM_PENDULUM_MASS: f64 = 0.2;
const PARAM_CART_MASS: f64 = 0.5;
const PARAM_I: f64 = 0.006;
const PARAM_L: f64 = 0.3;
const PARAM_DT: f64 = 0.0001;
const UNTIL_TIME: f64 = 60.0;

struct Args {
    input: String,
    output: String,
    sim_number: i32,
    distance: f64,
    epsilon: f64,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} -i <input.csv> -o <output.csv> -n <sim_number> -d <distance> -e <epsilon>\n\
         Options:\n\
         \x20 -i <input.csv>   Path to the input CSV file\n\
         \x20 -o <output.csv>  Path to the output CSV file\n\
         \x20 -n <sim_number>  Simulation number. Select a simulation 1 (cascade PID) or 2 (LQR)\n\
         \x20 -d <distance>    Distance between two AGVs, default: 1.0m\n\
         \x20 -e <epsilon>     Initial position error, default: 0.05m\n"
    )
}

fn parse_args() -> Result<Args, String> {
    let mut input = None;
    let mut output = None;
    let mut sim_number = 0;
    let mut distance = 1.0;
    let mut epsilon = 0.05;

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "-i" => input = Some(value()?),
            "-o" => output = Some(value()?),
            "-n" => sim_number = value()?.parse().map_err(|e| format!("bad -n: {e}"))?,
            "-d" => distance = value()?.parse().map_err(|e| format!("bad -d: {e}"))?,
            "-e" => epsilon = value()?.parse().map_err(|e| format!("bad -e: {e}"))?,
            other => return Err(format!("unrecognized flag {other}")),
        }
    }

    let input = input.ok_or("missing required -i <input.csv>")?;
    let output = output.ok_or("missing required -o <output.csv>")?;
    Ok(Args { input, output, sim_number, distance, epsilon })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n{}", usage("simulate"));
            std::process::exit(1);
        }
    };

    let params = PendulumParams::new(PARAM_PENDULUM_MASS, PARAM_CART_MASS, PARAM_I, PARAM_L);
    let state0 = [args.distance / 2.0 + args.epsilon, 0.0, 0.0, 0.0];
    let plant = Plant::new(params, 0.0, state0);

    let d = args.distance;
    let reference = move |t: f64| 10.0 * (0.2 * t).sin() + d / 2.0;

    let mut queue = EventQueue::new(PARAM_DT);
    queue.load_trace(&args.input)?;

    let states = match args.sim_number {
        1 => {
            let pid_x = PidController::new(1.0, 0.0, 0.1);
            let pid_v = PidController::new(0.06, 0.0, 0.0);
            let pid_phi = PidController::new(10.0, 0.0, 1.0);
            let control = CascadeControlLaw::new(pid_x, pid_v, pid_phi, reference);
            let handle = OrchestratorHandle::new(Orchestrator::new(plant, control, PARAM_DT));
            queue.add_receiver(Box::new(handle.share()));
            queue.run(UNTIL_TIME);
            handle.0.borrow().states().clone()
        }
        2 => {
            let control = PositionLqrLaw::new([-3.162277660168483, -6.105688949485788, 49.16351188321586, 7.204143097154165], reference);
            let handle = OrchestratorHandle::new(Orchestrator::new(plant, control, PARAM_DT));
            queue.add_receiver(Box::new(handle.share()));
            queue.run(UNTIL_TIME);
            handle.0.borrow().states().clone()
        }
        _ => {
            eprintln!("Select a simulation 1 (cascade PID) or 2 (LQR).\n{}", usage("simulate"));
            std::process::exit(1);
        }
    };

    write_trajectory(&states, &args.output)?;
    println!("Simulation finished.");
    Ok(())
}

/// LQR control law with a time-varying position reference, used only by
/// this binary's `n=2` mode (the library's `LqrLaw` has no reference term).
struct PositionLqrLaw<F: FnMut(f64) -> f64> {
    lqr: ncs_lab::control::LqrController,
    reference: F,
}

impl<F: FnMut(f64) -> f64> PositionLqrLaw<F> {
    fn new(k: [f64; 4], reference: F) -> Self {
        Self { lqr: ncs_lab::control::LqrController::new(k), reference }
    }
}

impl<F: FnMut(f64) -> f64> ncs_lab::sim::orchestrator::ControlLaw for PositionLqrLaw<F> {
    fn compute(&mut self, states: &ncs_lab::dynamics::StateSequence) -> f64 {
        let (t, state) = *states.last().expect("compute called with empty trajectory");
        let pos_ref = (self.reference)(t);
        self.lqr.control_with_position_reference(&state, pos_ref)
    }
}
