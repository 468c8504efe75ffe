//! Classical fixed-step Runge-Kutta 4 integrator over the 4-dimensional
//! pendulum state. No adaptive stepping, no error estimate: standard RK4,
//! observed once per completed step.

use super::pendulum::{derivative, PendulumParams, PendulumState, StateSequence};

/// Stateless RK4 stepper bound to one set of physical parameters.
pub struct Integrator<'a> {
    params: &'a PendulumParams,
}

impl<'a> Integrator<'a> {
    pub fn new(params: &'a PendulumParams) -> Self {
        Self { params }
    }

    /// Advance `(state, t)` by exactly one RK4 step of size `dt`, appending
    /// the resulting `TimeState` to `states`.
    pub fn step(&self, state: &mut PendulumState, t: &mut f64, force: f64, dt: f64, states: &mut StateSequence) {
        let k1 = derivative(self.params, state, force);

        let s2 = add_scaled(state, &k1, dt / 2.0);
        let k2 = derivative(self.params, &s2, force);

        let s3 = add_scaled(state, &k2, dt / 2.0);
        let k3 = derivative(self.params, &s3, force);

        let s4 = add_scaled(state, &k3, dt);
        let k4 = derivative(self.params, &s4, force);

        for i in 0..4 {
            state[i] += (dt / 6.0) * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
        }
        *t += dt;

        states.push((*t, *state));
    }

    /// Advance `(state, t)` by `duration / dt` steps (floor), appending one
    /// `TimeState` per completed step. If `duration < dt`, no step is taken
    /// and `states` is left unchanged. The final recorded time `t_end`
    /// satisfies `t_start + duration - dt < t_end <= t_start + duration`.
    pub fn integrate(
        &self,
        state: &mut PendulumState,
        t: &mut f64,
        force: f64,
        duration: f64,
        dt: f64,
        states: &mut StateSequence,
    ) {
        let n_steps = (duration / dt).floor() as i64;
        for _ in 0..n_steps {
            self.step(state, t, force, dt, states);
        }
    }
}

fn add_scaled(state: &PendulumState, k: &PendulumState, scale: f64) -> PendulumState {
    let mut out = *state;
    for i in 0..4 {
        out[i] += scale * k[i];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PendulumParams {
        PendulumParams::new(0.2, 0.5, 0.006, 0.3)
    }

    #[test]
    fn step_advances_time_by_exactly_dt() {
        let p = params();
        let integ = Integrator::new(&p);
        let mut state: PendulumState = [0.0, 0.0, 0.0, 0.0];
        let mut t = 0.0;
        let mut states = Vec::new();
        integ.step(&mut state, &mut t, 0.0, 0.001, &mut states);
        assert!((t - 0.001).abs() < 1e-12);
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn zero_force_zero_angle_stays_at_equilibrium() {
        let p = params();
        let integ = Integrator::new(&p);
        let mut state: PendulumState = [1.0, 0.0, 0.0, 0.0];
        let mut t = 0.0;
        let mut states = Vec::new();
        integ.integrate(&mut state, &mut t, 0.0, 1.0, 0.001, &mut states);
        for (_, s) in &states {
            assert!((s[0] - 1.0).abs() < 1e-9);
            assert!(s[1].abs() < 1e-9);
            assert!(s[2].abs() < 1e-9);
            assert!(s[3].abs() < 1e-9);
        }
    }

    #[test]
    fn short_duration_takes_no_steps() {
        let p = params();
        let integ = Integrator::new(&p);
        let mut state: PendulumState = [0.0, 0.0, 0.1, 0.0];
        let mut t = 0.0;
        let mut states = Vec::new();
        integ.integrate(&mut state, &mut t, 0.0, 0.0005, 0.001, &mut states);
        assert!(states.is_empty());
        assert_eq!(t, 0.0);
    }

    #[test]
    fn integrate_ends_within_one_step_of_requested_duration() {
        let p = params();
        let integ = Integrator::new(&p);
        let mut state: PendulumState = [0.0, 0.0, 0.087, 0.0];
        let mut t = 0.0;
        let mut states = Vec::new();
        let dt = 0.001;
        let duration = 10.0;
        integ.integrate(&mut state, &mut t, 1.0, duration, dt, &mut states);
        assert!(t > duration - dt - 1e-9);
        assert!(t <= duration + 1e-9);
        assert_eq!(states.len(), (duration / dt).floor() as usize);
    }
}
