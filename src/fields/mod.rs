use ndarray::Array1;

pub mod forced_lorenz;
pub mod lorenz;

/// A step-scaled vector field.
///
/// `evaluate` returns `h * f(t, state)`, not the bare derivative: the step size
/// is baked into every stage so integrators only ever add weighted stage
/// vectors to the state.
pub trait Field {
    fn dimension(&self) -> usize;
    fn evaluate(&self, h: f64, t: f64, state: &Array1<f64>) -> Array1<f64>;
}

impl<F: Field + ?Sized> Field for &F {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn evaluate(&self, h: f64, t: f64, state: &Array1<f64>) -> Array1<f64> {
        (**self).evaluate(h, t, state)
    }
}

/// Wraps a plain function or closure as a [`Field`] of fixed dimension.
pub struct FnField<F> {
    dimension: usize,
    f: F,
}

impl<F> FnField<F>
where
    F: Fn(f64, f64, &Array1<f64>) -> Array1<f64>,
{
    pub fn new(dimension: usize, f: F) -> Self {
        Self { dimension, f }
    }
}

impl<F> Field for FnField<F>
where
    F: Fn(f64, f64, &Array1<f64>) -> Array1<f64>,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate(&self, h: f64, t: f64, state: &Array1<f64>) -> Array1<f64> {
        (self.f)(h, t, state)
    }
}
