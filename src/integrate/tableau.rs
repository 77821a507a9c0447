//! Runge-Kutta-Fehlberg 4(5) coefficients.
//!
//! Six stages. `C5` combines the stages into the fifth-order update used by
//! [`super::rkf45::Rkf45`]; `C4` is the embedded fourth-order row, kept for
//! completeness of the table (no step-size control is built on it).

pub const STAGES: usize = 6;

/// Stage time fractions: stage k is evaluated at `t + A[k] * h`.
pub const A: [f64; STAGES] = [0.0, 1.0 / 4.0, 3.0 / 8.0, 12.0 / 13.0, 1.0, 1.0 / 2.0];

/// Stage coupling, lower triangular: row k uses columns `0..k`.
pub const B: [[f64; STAGES - 1]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 4.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 32.0, 9.0 / 32.0, 0.0, 0.0, 0.0],
    [1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0, 0.0, 0.0],
    [439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0, 0.0],
    [-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0],
];

/// Fifth-order weights.
pub const C5: [f64; STAGES] = [
    16.0 / 135.0,
    0.0,
    6656.0 / 12825.0,
    28561.0 / 56430.0,
    -9.0 / 50.0,
    2.0 / 55.0,
];

/// Embedded fourth-order weights.
pub const C4: [f64; STAGES] = [
    25.0 / 216.0,
    0.0,
    1408.0 / 2565.0,
    2197.0 / 4104.0,
    -1.0 / 5.0,
    0.0,
];
