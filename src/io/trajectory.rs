//! State-trajectory CSV: header `t,x,v,phi,omega`, one row per recorded
//! `TimeState`. Angle is written in radians; a degrees variant is an
//! explicit opt-in (`write_trajectory_degrees`), never the default.

use crate::dynamics::StateSequence;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub t: f64,
    pub x: f64,
    pub v: f64,
    pub phi: f64,
    pub omega: f64,
}

pub fn write_trajectory<P: AsRef<Path>>(states: &StateSequence, path: P) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for &(t, state) in states {
        writer.serialize(TrajectoryRow { t, x: state[0], v: state[1], phi: state[2], omega: state[3] })?;
    }
    writer.flush()?;
    Ok(())
}

/// Same as `write_trajectory`, but converts `phi` to degrees. Must be
/// requested explicitly by the caller (e.g. a `--degrees` flag); radians
/// remain the default wire/storage convention.
pub fn write_trajectory_degrees<P: AsRef<Path>>(states: &StateSequence, path: P) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for &(t, state) in states {
        let phi_deg = state[2].to_degrees();
        writer.serialize(TrajectoryRow { t, x: state[0], v: state[1], phi: phi_deg, omega: state[3] })?;
    }
    writer.flush()?;
    Ok(())
}
