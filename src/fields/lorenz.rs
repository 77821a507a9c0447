use ndarray::{Array1, array};

use super::Field;

/// The classic, autonomous Lorenz system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for Lorenz {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl Field for Lorenz {
    fn dimension(&self) -> usize {
        3
    }

    fn evaluate(&self, h: f64, _t: f64, state: &Array1<f64>) -> Array1<f64> {
        let x = state[0];
        let y = state[1];
        let z = state[2];

        let dx = self.sigma * (y - x);
        let dy = x * (self.rho - z) - y;
        let dz = x * y - self.beta * z;

        array![h * dx, h * dy, h * dz]
    }
}
