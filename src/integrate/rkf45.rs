use ndarray::{Array1, Array2};

use super::{
    StepClock, Stepper, stage,
    tableau::{A, B, C5, STAGES},
};
use crate::{
    error::{Error, Result},
    fields::Field,
};

/// Fixed-step Runge-Kutta-Fehlberg integrator using the fifth-order weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rkf45 {
    pub clock: StepClock,
    pub check_finite: bool,
}

impl Rkf45 {
    pub fn new(clock: StepClock) -> Self {
        Self {
            clock,
            check_finite: false,
        }
    }

    /// Fail a step with [`Error::NonFinite`] instead of letting NaN/inf through.
    pub fn with_finite_check(mut self, on: bool) -> Self {
        self.check_finite = on;
        self
    }
}

impl Stepper for Rkf45 {
    fn step<F: Field>(&self, field: &F, state: &mut Array1<f64>, t: f64, h: f64) -> Result<f64> {
        let n = state.len();
        let (ts, next) = self.clock.split(t, h);

        let mut f = Array2::<f64>::zeros((STAGES, n));
        let mut trial = Array1::<f64>::zeros(n);

        f.row_mut(0).assign(&stage(field, h, ts, state)?);

        for k in 1..STAGES {
            let tk = ts + A[k] * h;

            for l in 0..n {
                let mut u = state[l];
                for j in 0..k {
                    u += B[k][j] * f[[j, l]];
                }
                trial[l] = u;
            }

            f.row_mut(k).assign(&stage(field, h, tk, &trial)?);
        }

        for l in 0..n {
            for k in 0..STAGES {
                state[l] += C5[k] * f[[k, l]];
            }
        }

        if self.check_finite && !state.iter().all(|v| v.is_finite()) {
            return Err(Error::NonFinite { t: next });
        }

        Ok(next)
    }
}
