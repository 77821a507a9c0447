use chaos::{config::AppConfig, integrate::StepClock};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "chaos.toml")]
    pub config: String,

    /// Integration step size (overrides config)
    #[arg(long)]
    pub h: Option<f64>,

    /// Number of recorded samples (overrides config)
    #[arg(long)]
    pub samples: Option<usize>,

    /// Unrecorded advances before sampling starts (overrides config)
    #[arg(long)]
    pub warmup: Option<usize>,

    /// Integration steps between two samples (overrides config)
    #[arg(long)]
    pub steps_per_sample: Option<usize>,

    /// Stage time convention: pre-step or post-step (overrides config)
    #[arg(long)]
    pub clock: Option<StepClock>,

    /// Uniform perturbation of the initial state (overrides config)
    #[arg(long)]
    pub jitter: Option<f64>,

    /// Seed for the initial-state perturbation (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the sampled trajectory as JSON
    #[arg(long)]
    pub json: Option<String>,

    /// Write the projected trajectory as an HTML plot
    #[arg(long)]
    pub html: Option<String>,

    /// Open the projected trajectory plot in a browser
    #[arg(long, default_value_t = false)]
    pub show: bool,
}

impl Args {
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(h) = self.h {
            cfg.integrator.h = h;
        }
        if let Some(clock) = self.clock {
            cfg.integrator.clock = clock;
        }
        if let Some(samples) = self.samples {
            cfg.run.samples = samples;
        }
        if let Some(warmup) = self.warmup {
            cfg.run.warmup = warmup;
        }
        if let Some(n) = self.steps_per_sample {
            cfg.run.steps_per_sample = n;
        }
        if let Some(jitter) = self.jitter {
            cfg.run.jitter = jitter;
        }
        if self.seed.is_some() {
            cfg.run.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_what_was_given() {
        let args = Args::parse_from([
            "chaos-control",
            "--h",
            "0.01",
            "--clock",
            "post-step",
            "--seed",
            "9",
        ]);
        let mut cfg = AppConfig::default();
        args.apply(&mut cfg);

        assert_eq!(args.config, "chaos.toml");
        assert_eq!(cfg.integrator.h, 0.01);
        assert_eq!(cfg.integrator.clock, StepClock::PostStep);
        assert_eq!(cfg.run.seed, Some(9));
        assert_eq!(cfg.run.samples, 4000);
        assert!(!args.show);
    }

    #[test]
    fn unknown_clock_is_a_parse_error() {
        assert!(Args::try_parse_from(["chaos-control", "--clock", "sideways"]).is_err());
    }
}
