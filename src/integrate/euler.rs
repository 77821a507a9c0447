use ndarray::Array1;

use super::{StepClock, Stepper, stage};
use crate::{error::Result, fields::Field};

/// First-order explicit Euler stepper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler {
    pub clock: StepClock,
}

impl Stepper for Euler {
    fn step<F: Field>(&self, field: &F, state: &mut Array1<f64>, t: f64, h: f64) -> Result<f64> {
        let (ts, next) = self.clock.split(t, h);
        let d = stage(field, h, ts, state)?;
        *state += &d;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, fields::lorenz::Lorenz};
    use ndarray::array;

    #[test]
    fn one_step_is_state_plus_scaled_derivative() {
        let field = Lorenz::default();
        let mut state = array![1.0, 1.0, 1.0];
        let dt = 0.01;

        let t = Euler::default().step(&field, &mut state, 0.0, dt).unwrap();

        // x' = 0, y' = 1 * (28 - 1) - 1, z' = 1 - 8/3
        assert_eq!(t, dt);
        assert_eq!(state[0], 1.0);
        assert_eq!(state[1], 1.0 + dt * 26.0);
        assert_eq!(state[2], 1.0 + dt * (1.0 - 8.0 / 3.0));
    }

    #[test]
    fn step_rejects_state_of_wrong_length() {
        let mut state = array![1.0, 1.0, 1.0, 1.0];

        let err = Euler::default()
            .step(&Lorenz::default(), &mut state, 0.0, 0.01)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                found: 4
            }
        ));
        assert_eq!(state, array![1.0, 1.0, 1.0, 1.0]);
    }
}
