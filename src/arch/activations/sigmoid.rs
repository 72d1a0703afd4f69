use ndarray::{Array2, ArrayView2};

/// The logistic function with a configurable steepness `beta`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sigmoid {
    beta: f32,
}

impl Default for Sigmoid {
    fn default() -> Self {
        Self { beta: 1. }
    }
}

impl Sigmoid {
    /// Returns a new `Sigmoid`.
    ///
    /// # Arguments
    /// * `beta` - The steepness of the curve around the origin.
    pub fn new(beta: f32) -> Self {
        Self { beta }
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// `1 / (1 + e^(-beta * z))`
    pub fn f(&self, z: f32) -> f32 {
        1. / (1. + (-self.beta * z).exp())
    }

    /// `beta * s(z) * (1 - s(z))`
    pub fn df(&self, z: f32) -> f32 {
        let s = self.f(z);
        self.beta * s * (1. - s)
    }

    /// Applies `f` elementwise.
    pub fn forward(&self, z: ArrayView2<f32>) -> Array2<f32> {
        z.mapv(|z| self.f(z))
    }

    /// Applies `df` elementwise.
    pub fn derivative(&self, z: ArrayView2<f32>) -> Array2<f32> {
        z.mapv(|z| self.df(z))
    }
}
