//! Nonlinear cart-pendulum model: state vector, parameters, and the pure
//! derivative function `f(x, t) -> dx/dt`.
//!
//! State order is `(x, v, phi, omega)`: cart position [m], cart velocity
//! [m/s], pole angle from vertical [rad], pole angular velocity [rad/s].

/// Gravitational acceleration [m/s^2].
pub const G: f64 = 9.8067;

/// `(x, v, phi, omega)`.
pub type PendulumState = [f64; 4];

/// One recorded sample: simulation time plus the state at that time.
pub type TimeState = (f64, PendulumState);

/// Ordered, append-only trajectory. Monotone non-decreasing in `t`.
pub type StateSequence = Vec<TimeState>;

/// Immutable physical parameters of the cart-pendulum plant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParams {
    /// Mass of the pendulum [kg], > 0.
    pub m: f64,
    /// Mass of the cart [kg], > 0.
    pub cart_mass: f64,
    /// Moment of inertia of the pendulum about its center of mass [kg*m^2], >= 0.
    pub inertia: f64,
    /// Length of the pendulum to its center of mass [m], > 0.
    pub l: f64,
}

impl PendulumParams {
    pub fn new(m: f64, cart_mass: f64, inertia: f64, l: f64) -> Self {
        Self { m, cart_mass, inertia, l }
    }
}

/// Nonlinear derivative function for the cart-pendulum equations of motion.
///
/// `force` is the horizontal force applied to the cart, held constant for the
/// duration of one integrator step. Total on finite input; divergence shows
/// up as non-finite entries in the returned derivative, not as an error.
pub fn derivative(params: &PendulumParams, state: &PendulumState, force: f64) -> PendulumState {
    let PendulumParams { m, cart_mass: mass_cart, inertia: inertia_pendulum, l } = *params;

    let v = state[1];
    let phi = state[2];
    let omega = state[3];

    let s = phi.sin();
    let c = phi.cos();
    let omega2 = omega * omega;
    let l2 = l * l;

    let j_t = inertia_pendulum + m * l2;
    let m_t = mass_cart + m;

    let dv = (-m * l * s * omega2 + m * G * (m * l2 / j_t) * s * c + force)
        / (m_t - m * (m * l2 / j_t) * c * c);

    let domega = (-m * l2 * s * c * omega2 + m_t * G * l * s + l * c * force)
        / (j_t * (m_t / m) - m * (l * c) * (l * c));

    [v, dv, omega, domega]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PendulumParams {
        PendulumParams::new(0.2, 0.5, 0.006, 0.3)
    }

    #[test]
    fn upright_equilibrium_is_a_fixed_point_at_zero_force() {
        let p = params();
        let state: PendulumState = [0.0, 0.0, 0.0, 0.0];
        let dxdt = derivative(&p, &state, 0.0);
        for d in dxdt {
            assert!(d.abs() < 1e-12, "expected fixed point, got {d}");
        }
    }

    #[test]
    fn derivative_is_finite_for_small_angles() {
        let p = params();
        let state: PendulumState = [0.0, 0.0, 0.087, 0.0];
        let dxdt = derivative(&p, &state, 1.0);
        assert!(dxdt.iter().all(|d| d.is_finite()));
    }
}
