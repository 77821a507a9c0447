// Entry point: samples the forced Lorenz system and writes the trajectory out.
mod cli;

use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use chaos::{
    config::AppConfig,
    driver::{Sampler, jitter},
    util::{graph, stats::TrajectoryStats},
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Args;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut cfg = AppConfig::load_or_default(&args.config);
    args.apply(&mut cfg);
    cfg.validate()?;

    let seed = cfg.run.seed.unwrap_or_else(rand::random);
    let mut state = jitter(&cfg.run.initial_state(), cfg.run.jitter, seed)?;
    info!(
        h = cfg.integrator.h,
        clock = ?cfg.integrator.clock,
        samples = cfg.run.samples,
        warmup = cfg.run.warmup,
        seed,
        "initial state {state}"
    );

    let sampler = Sampler::new(cfg.integrator.stepper(), cfg.field, cfg.integrator.h)
        .steps_per_sample(cfg.run.steps_per_sample);
    let traj = sampler.run(
        &mut state,
        cfg.integrator.t0,
        cfg.run.warmup,
        cfg.run.samples,
    )?;

    if !traj.is_empty() {
        let t = traj.times[traj.len() - 1];
        info!("final t={t:.6} state={state}");
    }
    match TrajectoryStats::of(&traj) {
        Ok(stats) => info!(
            peak_norm = stats.peak_norm,
            "min={} max={}",
            stats.min,
            stats.max
        ),
        Err(err) => warn!("no trajectory statistics: {err}"),
    }
    let visible = traj.project_visible(&cfg.view).len();
    info!(
        "{visible}/{} samples inside the {}x{} view",
        traj.len(),
        cfg.view.width,
        cfg.view.height
    );

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("creating {path}"))?;
        serde_json::to_writer(BufWriter::new(file), &traj)
            .with_context(|| format!("writing {path}"))?;
        info!("trajectory written to {path}");
    }

    if args.html.is_some() || args.show {
        let plot = graph::plot_projection(&traj, &cfg.view);
        if let Some(path) = &args.html {
            plot.write_html(path);
            info!("plot written to {path}");
        }
        if args.show {
            plot.show();
        }
    }

    Ok(())
}
