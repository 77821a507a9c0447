use ndarray::{Array1, Axis};
use ndarray_stats::QuantileExt;

use crate::{
    driver::Trajectory,
    error::{Error, Result},
};

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryStats {
    pub min: Array1<f64>,
    pub max: Array1<f64>,
    pub peak_norm: f64,
}

impl TrajectoryStats {
    /// Fails on an empty trajectory or one containing NaN.
    pub fn of(traj: &Trajectory) -> Result<Self> {
        let dim = traj.dimension();
        let mut min = Array1::zeros(dim);
        let mut max = Array1::zeros(dim);

        for (i, col) in traj.states.axis_iter(Axis(1)).enumerate() {
            min[i] = *col.min()?;
            max[i] = *col.max()?;
        }

        let peak_norm = traj
            .states
            .axis_iter(Axis(0))
            .map(|row| row.dot(&row).sqrt())
            .fold(0.0, f64::max);

        Ok(Self {
            min,
            max,
            peak_norm,
        })
    }

    pub fn is_bounded(&self, limit: f64) -> bool {
        self.peak_norm.is_finite() && self.peak_norm < limit
    }
}

/// Euclidean distance between the two trajectories, sample by sample.
pub fn divergence(a: &Trajectory, b: &Trajectory) -> Result<Array1<f64>> {
    if a.states.dim() != b.states.dim() {
        return Err(Error::ShapeMismatch {
            left: a.states.dim(),
            right: b.states.dim(),
        });
    }

    let diff = &a.states - &b.states;
    Ok(diff.map_axis(Axis(1), |row| row.dot(&row).sqrt()))
}

pub fn rmse(a: &Trajectory, b: &Trajectory) -> Result<f64> {
    let d = divergence(a, b)?;
    Ok(d.mapv(|v| v.powi(2)).mean().unwrap_or(0.0).sqrt())
}
