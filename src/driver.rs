use ndarray::{Array1, Array2, Axis};
use ndarray_rand::{
    RandomExt,
    rand::{SeedableRng, rngs::StdRng},
    rand_distr::Uniform,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    fields::Field,
    integrate::Stepper,
};

/// Repeatedly advances a state and records one sample per advance.
pub struct Sampler<S, F> {
    pub stepper: S,
    pub field: F,
    pub h: f64,
    pub steps_per_sample: usize,
}

impl<S: Stepper, F: Field> Sampler<S, F> {
    pub fn new(stepper: S, field: F, h: f64) -> Self {
        Self {
            stepper,
            field,
            h,
            steps_per_sample: 1,
        }
    }

    pub fn steps_per_sample(mut self, n: usize) -> Self {
        self.steps_per_sample = n;
        self
    }

    fn advance(&self, state: &mut Array1<f64>, t: f64) -> Result<f64> {
        let dim = state.len();
        self.stepper
            .advance(&self.field, state, self.steps_per_sample, self.h, t, dim)
    }

    /// Discards `warmup` advances so transients decay, then records `samples`
    /// advances. `state` is left at the last recorded sample.
    pub fn run(
        &self,
        state: &mut Array1<f64>,
        t0: f64,
        warmup: usize,
        samples: usize,
    ) -> Result<Trajectory> {
        let dim = self.field.dimension();
        if state.len() != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: state.len(),
            });
        }

        let mut t = t0;
        for _ in 0..warmup {
            t = self.advance(state, t)?;
        }
        debug!(warmup, t, "transients discarded");

        let mut times = Array1::zeros(samples);
        let mut states = Array2::zeros((samples, dim));
        for i in 0..samples {
            t = self.advance(state, t)?;
            times[i] = t;
            states.row_mut(i).assign(&*state);
        }
        debug!(samples, t, "trajectory sampled");

        Ok(Trajectory { times, states })
    }
}

/// Sampled states, one row per sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub times: Array1<f64>,
    pub states: Array2<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.states.ncols()
    }

    pub fn axis(&self, i: usize) -> Vec<f64> {
        self.states.index_axis(Axis(1), i).to_vec()
    }

    pub fn last_state(&self) -> Option<Array1<f64>> {
        self.states
            .axis_iter(Axis(0))
            .next_back()
            .map(|row| row.to_owned())
    }

    pub fn project(&self, view: &Viewport) -> Vec<(i32, i32)> {
        self.states
            .axis_iter(Axis(0))
            .map(|row| view.pixel(row[view.h_axis], row[view.v_axis]))
            .collect()
    }

    pub fn project_visible(&self, view: &Viewport) -> Vec<(i32, i32)> {
        self.project(view)
            .into_iter()
            .filter(|p| view.contains(*p))
            .collect()
    }
}

/// Affine map from two state axes onto an integer pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub h_axis: usize,
    pub v_axis: usize,
    pub scale: f64,
    pub h_offset: f64,
    pub v_offset: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        // z horizontally, x vertically
        Self {
            h_axis: 2,
            v_axis: 0,
            scale: 10.0,
            h_offset: -400.0,
            v_offset: 200.0,
            width: 800,
            height: 600,
        }
    }
}

impl Viewport {
    /// Truncates toward zero, like an integer cast.
    pub fn pixel(&self, h: f64, v: f64) -> (i32, i32) {
        (
            (self.scale * h + self.h_offset) as i32,
            (self.scale * v + self.v_offset) as i32,
        )
    }

    pub fn contains(&self, (m, n): (i32, i32)) -> bool {
        m >= 0 && n >= 0 && (m as i64) < self.width as i64 && (n as i64) < self.height as i64
    }
}

/// Perturbs each component uniformly within `[-eps, eps)`. `eps == 0` returns
/// the state unchanged; negative, NaN or unrepresentably wide `eps` is an error.
pub fn jitter(state: &Array1<f64>, eps: f64, seed: u64) -> Result<Array1<f64>> {
    if !(eps >= 0.0 && (2.0 * eps).is_finite()) {
        return Err(Error::InvalidConfig(format!(
            "jitter must be finite and >= 0, got {eps}"
        )));
    }
    if eps == 0.0 {
        return Ok(state.clone());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    Ok(state + Array1::random_using(state.len(), Uniform::new(-eps, eps), &mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fields::{FnField, forced_lorenz::ForcedLorenz},
        integrate::{StepClock, rkf45::Rkf45},
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn records_one_row_per_advance() {
        let sampler = Sampler::new(Rkf45::default(), ForcedLorenz::default(), 0.005)
            .steps_per_sample(2);
        let mut state = array![0.8, 0.8, 0.8];

        let traj = sampler.run(&mut state, 0.0, 3, 10).unwrap();

        assert_eq!(traj.len(), 10);
        assert_eq!(traj.dimension(), 3);
        assert_abs_diff_eq!(traj.times[0], 0.04, epsilon = 1e-12);
        assert_abs_diff_eq!(traj.times[9], 0.13, epsilon = 1e-12);
        for w in traj.times.windows(2) {
            assert_abs_diff_eq!(w[1] - w[0], 0.01, epsilon = 1e-12);
        }
        assert_eq!(traj.last_state().unwrap(), state);
    }

    #[test]
    fn warmup_matches_a_longer_run() {
        let sampler = Sampler::new(Rkf45::new(StepClock::PostStep), ForcedLorenz::default(), 0.005);

        let mut a = array![0.8, 0.8, 0.8];
        let full = sampler.run(&mut a, 0.0, 0, 20).unwrap();

        let mut b = array![0.8, 0.8, 0.8];
        let tail = sampler.run(&mut b, 0.0, 5, 15).unwrap();

        assert_eq!(full.states.row(5), tail.states.row(0));
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_initial_length_is_rejected() {
        let sampler = Sampler::new(Rkf45::default(), ForcedLorenz::default(), 0.005);
        let mut state = array![0.8, 0.8];

        assert!(matches!(
            sampler.run(&mut state, 0.0, 0, 4),
            Err(Error::DimensionMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn zero_samples_is_empty() {
        let field = FnField::new(1, |h, _t, u: &Array1<f64>| -h * u);
        let sampler = Sampler::new(Rkf45::default(), field, 0.1);
        let mut state = array![1.0];

        let traj = sampler.run(&mut state, 0.0, 0, 0).unwrap();
        assert!(traj.is_empty());
        assert!(traj.last_state().is_none());
        assert_eq!(state, array![1.0]);
    }

    #[test]
    fn default_viewport_pixel_mapping() {
        let view = Viewport::default();

        // m from z, n from x
        assert_eq!(view.pixel(0.8, 0.8), (-392, 208));
        assert_eq!(view.pixel(75.55, 10.09), (355, 300));
        // truncation toward zero, not floor
        assert_eq!(view.pixel(39.95, -20.05), (0, 0));
    }

    #[test]
    fn projection_filters_offscreen_points() {
        let traj = Trajectory {
            times: array![0.0, 1.0],
            states: array![[0.8, 0.8, 0.8], [10.0, 0.0, 60.0]],
        };
        let view = Viewport::default();

        assert_eq!(traj.project(&view), vec![(-392, 208), (200, 300)]);
        assert_eq!(traj.project_visible(&view), vec![(200, 300)]);
        assert_eq!(traj.axis(2), vec![0.8, 60.0]);
    }

    #[test]
    fn jitter_is_seeded_and_bounded() {
        let base = array![0.8, 0.8, 0.8];

        let a = jitter(&base, 1e-3, 7).unwrap();
        let b = jitter(&base, 1e-3, 7).unwrap();
        let c = jitter(&base, 1e-3, 8).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        for (p, q) in a.iter().zip(base.iter()) {
            assert!((p - q).abs() <= 1e-3);
        }
        assert_eq!(jitter(&base, 0.0, 7).unwrap(), base);
    }

    #[test]
    fn jitter_rejects_unusable_widths() {
        let base = array![0.8, 0.8, 0.8];

        for eps in [f64::NAN, -1e-3, f64::INFINITY, f64::MAX] {
            assert!(
                matches!(jitter(&base, eps, 7), Err(Error::InvalidConfig(_))),
                "accepted eps={eps}"
            );
        }
    }

    #[test]
    fn last_state_is_the_final_row() {
        let traj = Trajectory {
            times: array![0.0, 1.0, 2.0],
            states: array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
        };

        assert_eq!(traj.last_state(), Some(array![5.0, 6.0]));
    }
}
