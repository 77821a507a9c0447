use std::fs;
use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    driver::Viewport,
    error::{Error, Result},
    fields::forced_lorenz::ForcedLorenz,
    integrate::{StepClock, rkf45::Rkf45},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    #[serde(default = "IntegratorConfig::default_h")]
    pub h: f64,
    #[serde(default)]
    pub t0: f64,
    #[serde(default)]
    pub clock: StepClock,
    #[serde(default)]
    pub check_finite: bool,
}

impl IntegratorConfig {
    fn default_h() -> f64 {
        0.005
    }

    pub fn stepper(&self) -> Rkf45 {
        Rkf45::new(self.clock).with_finite_check(self.check_finite)
    }
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            h: Self::default_h(),
            t0: 0.0,
            clock: StepClock::default(),
            check_finite: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "RunConfig::default_initial")]
    pub initial: Vec<f64>,
    #[serde(default)]
    pub warmup: usize,
    #[serde(default = "RunConfig::default_samples")]
    pub samples: usize,
    #[serde(default = "RunConfig::default_steps_per_sample")]
    pub steps_per_sample: usize,
    #[serde(default)]
    pub jitter: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunConfig {
    fn default_initial() -> Vec<f64> {
        vec![0.8, 0.8, 0.8]
    }
    fn default_samples() -> usize {
        4000
    }
    fn default_steps_per_sample() -> usize {
        1
    }

    pub fn initial_state(&self) -> Array1<f64> {
        Array1::from(self.initial.clone())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial: Self::default_initial(),
            warmup: 0,
            samples: Self::default_samples(),
            steps_per_sample: Self::default_steps_per_sample(),
            jitter: 0.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub field: ForcedLorenz,
    #[serde(default)]
    pub integrator: IntegratorConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub view: Viewport,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Missing file means defaults; a file that fails to load is reported
    /// and replaced by defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("config {} not found, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(
                    "failed to load config {}: {err}. Using defaults.",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        if !self.integrator.h.is_finite() {
            return invalid(format!("integrator.h must be finite, got {}", self.integrator.h));
        }
        if !self.integrator.t0.is_finite() {
            return invalid(format!("integrator.t0 must be finite, got {}", self.integrator.t0));
        }
        if self.run.initial.len() != 3 {
            return invalid(format!(
                "run.initial needs 3 components, got {}",
                self.run.initial.len()
            ));
        }
        if self.run.steps_per_sample == 0 {
            return invalid("run.steps_per_sample must be at least 1".into());
        }
        if !(self.run.jitter >= 0.0 && (2.0 * self.run.jitter).is_finite()) {
            return invalid(format!("run.jitter must be >= 0, got {}", self.run.jitter));
        }
        if self.view.h_axis >= 3 || self.view.v_axis >= 3 {
            return invalid(format!(
                "view axes must be 0, 1 or 2, got {} and {}",
                self.view.h_axis, self.view.v_axis
            ));
        }

        Ok(())
    }
}
