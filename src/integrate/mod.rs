use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::{Error, Result},
    fields::Field,
};

pub mod euler;
pub mod rkf45;
pub mod tableau;

/// Which time the stages of a step are measured from.
///
/// Both conventions advance time by `h` once per step; they only differ in
/// whether the stage base time is read before or after that increment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepClock {
    /// Stages at `t + a_k h`, then `t += h`.
    #[default]
    PreStep,
    /// `t += h`, then stages at the advanced `t + a_k h`.
    PostStep,
}

impl StepClock {
    /// Returns `(stage base time, time after the step)`.
    pub fn split(self, t: f64, h: f64) -> (f64, f64) {
        let next = t + h;
        match self {
            StepClock::PreStep => (t, next),
            StepClock::PostStep => (next, next),
        }
    }
}

impl FromStr for StepClock {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pre-step" | "pre" => Ok(StepClock::PreStep),
            "post-step" | "post" => Ok(StepClock::PostStep),
            other => Err(Error::InvalidConfig(format!(
                "unknown step clock {other:?}, expected pre-step or post-step"
            ))),
        }
    }
}

pub trait Stepper {
    /// Advances `state` in place by one step of size `h` starting at `t`.
    /// Returns the time after the step.
    fn step<F: Field>(&self, field: &F, state: &mut Array1<f64>, t: f64, h: f64) -> Result<f64>;

    /// Takes `num_steps` fixed steps from `t0`, mutating `state` in place, and
    /// returns the final time. Dimensions are checked before anything moves.
    fn advance<F: Field>(
        &self,
        field: &F,
        state: &mut Array1<f64>,
        num_steps: usize,
        h: f64,
        t0: f64,
        dimension: usize,
    ) -> Result<f64> {
        check_dimension(dimension, state.len())?;
        check_dimension(field.dimension(), dimension)?;

        let mut t = t0;
        for _ in 0..num_steps {
            t = self.step(field, state, t, h)?;
        }

        trace!(num_steps, h, t0, t, "advanced");
        Ok(t)
    }
}

pub(crate) fn check_dimension(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Evaluates one stage. The state must match the field's dimension and the
/// derivative must match the state.
pub(crate) fn stage<F: Field>(field: &F, h: f64, t: f64, state: &Array1<f64>) -> Result<Array1<f64>> {
    check_dimension(field.dimension(), state.len())?;

    let d = field.evaluate(h, t, state);
    if d.len() != state.len() {
        return Err(Error::DerivativeLength {
            expected: state.len(),
            found: d.len(),
        });
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_split() {
        assert_eq!(StepClock::PreStep.split(1.0, 0.5), (1.0, 1.5));
        assert_eq!(StepClock::PostStep.split(1.0, 0.5), (1.5, 1.5));
    }

    #[test]
    fn clock_from_str() {
        assert_eq!("pre-step".parse::<StepClock>().unwrap(), StepClock::PreStep);
        assert_eq!("post".parse::<StepClock>().unwrap(), StepClock::PostStep);
        assert!(matches!(
            "sideways".parse::<StepClock>(),
            Err(Error::InvalidConfig(_))
        ));
    }
}
