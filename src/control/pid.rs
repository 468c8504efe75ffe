//! Scalar PID controller: trapezoidal integral, backward-difference
//! derivative. No anti-windup or output clamping here — callers that need
//! clamping (e.g. the cascade controller in `sim::cascade`) do it themselves.

/// Immutable gains plus the mutable error/time history `control` needs.
pub struct PidController {
    kp: f64,
    ki: f64,
    kd: f64,
    eint: f64,
    eprev: f64,
    tprev: f64,
}

impl PidController {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, eint: 0.0, eprev: 0.0, tprev: 0.0 }
    }

    /// Compute the control output for `measurement` against `setpoint` at
    /// time `t`. `t` must be non-decreasing across calls; the first call
    /// integrates from `tprev = 0`.
    pub fn control(&mut self, setpoint: f64, measurement: f64, t: f64) -> f64 {
        let e = measurement - setpoint;

        let dt = t - self.tprev;
        assert!(dt >= 0.0, "PID controller given decreasing time: t={t}, tprev={}", self.tprev);

        self.eint += 0.5 * (e + self.eprev) * dt;

        let ediff = if dt > 0.0 { (e - self.eprev) / dt } else { 0.0 };

        let u = self.kp * e + self.ki * self.eint + self.kd * ediff;

        self.eprev = e;
        self.tprev = t;

        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_only_matches_kp_times_error() {
        let mut pid = PidController::new(2.0, 0.0, 0.0);
        assert_eq!(pid.control(1.0, 3.0, 0.0), 2.0 * (3.0 - 1.0));
        assert_eq!(pid.control(1.0, 5.0, 1.0), 2.0 * (5.0 - 1.0));
        assert_eq!(pid.control(1.0, 0.0, 2.0), 2.0 * (0.0 - 1.0));
    }

    #[test]
    fn zero_error_gives_zero_output() {
        let mut pid = PidController::new(10.0, 1.0, 1.0);
        for i in 0..5 {
            let t = i as f64 * 0.1;
            let u = pid.control(2.0, 2.0, t);
            assert!(u.abs() < 1e-12, "expected ~0, got {u}");
        }
    }

    #[test]
    fn integral_term_accumulates_trapezoidal_area() {
        let mut pid = PidController::new(0.0, 1.0, 0.0);
        // e = 1 constant, dt = 1 each step: area should accumulate as n.
        let u0 = pid.control(0.0, 1.0, 0.0);
        assert_eq!(u0, 0.0); // first call: eprev=0, trapezoid area = 0.5*(1+0)*0 = 0
        let u1 = pid.control(0.0, 1.0, 1.0);
        assert!((u1 - 1.0).abs() < 1e-12);
        let u2 = pid.control(0.0, 1.0, 2.0);
        assert!((u2 - 2.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn decreasing_time_is_a_contract_violation() {
        let mut pid = PidController::new(1.0, 0.0, 0.0);
        pid.control(0.0, 1.0, 1.0);
        pid.control(0.0, 1.0, 0.5);
    }
}
