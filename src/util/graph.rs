use plotly::{Plot, Scatter, common::Mode};

use crate::driver::{Trajectory, Viewport};

pub fn plot(l: Vec<(&str, Vec<f64>, Vec<f64>)>, mode: Mode) -> Plot {
    let mut plot = Plot::new();
    for (name, x, y) in l {
        let trace = Scatter::new(x, y).mode(mode.clone()).name(name);
        plot.add_trace(trace);
    }
    plot
}

/// The two viewport axes against each other, one marker per sample.
pub fn plot_projection(traj: &Trajectory, view: &Viewport) -> Plot {
    plot(
        vec![(
            "trajectory",
            traj.axis(view.h_axis),
            traj.axis(view.v_axis),
        )],
        Mode::Markers,
    )
}

/// Every state component over time.
pub fn plot_components(traj: &Trajectory) -> Plot {
    let names = ["x(t)", "y(t)", "z(t)"];
    let times = traj.times.to_vec();
    let traces = (0..traj.dimension())
        .map(|i| (names.get(i).copied().unwrap_or("u(t)"), times.clone(), traj.axis(i)))
        .collect();
    plot(traces, Mode::Lines)
}
