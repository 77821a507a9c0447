use std::f64::consts::TAU;

use ndarray::{Array1, array};
use serde::{Deserialize, Serialize};

use super::Field;

/// Lorenz system whose rho parameter is disturbed by a cosine forcing term:
///
/// rho_eff(t) = rho + k * cos(omega * t)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForcedLorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    pub omega: f64,
    pub k: f64,
}

impl Default for ForcedLorenz {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 80.0,
            beta: 0.4,
            omega: TAU,
            k: 2.0,
        }
    }
}

impl ForcedLorenz {
    pub fn rho_eff(&self, t: f64) -> f64 {
        self.rho + self.k * (self.omega * t).cos()
    }

    /// One full forcing period, 2pi / omega.
    pub fn period(&self) -> f64 {
        TAU / self.omega
    }
}

impl Field for ForcedLorenz {
    fn dimension(&self) -> usize {
        3
    }

    fn evaluate(&self, h: f64, t: f64, state: &Array1<f64>) -> Array1<f64> {
        let x = state[0];
        let y = state[1];
        let z = state[2];

        array![
            h * self.sigma * (y - x),
            h * (-x * z + self.rho_eff(t) * x - y),
            h * (x * y - self.beta * z),
        ]
    }
}
