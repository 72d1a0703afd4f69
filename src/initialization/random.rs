use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::Result;

/// A weight generator that follows a certain probabilistic distribution.
#[derive(Debug, Clone)]
pub struct RandWeightGen<D: Distribution<f32>> {
    distribution: D,
}

impl<D: Distribution<f32>> RandWeightGen<D> {
    /// Creates a new `RandWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `distribution` - The distribution to sample the weights from.
    pub fn new(distribution: D) -> Self {
        Self { distribution }
    }

    /// Samples a full weight matrix.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `dim` - The `(rows, cols)` of the matrix.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, dim: (usize, usize)) -> Array2<f32> {
        Array2::random_using(dim, &self.distribution, rng)
    }
}

impl RandWeightGen<Uniform<f32>> {
    /// Creates a new `RandWeightGen` weight generator with an inclusive uniform distribution.
    ///
    /// # Arguments
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high or not finite).
    pub fn uniform_inclusive(low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(Uniform::new_inclusive(low, high)?))
    }

    /// Creates a new `RandWeightGen` weight generator uniform in
    /// `[-1/sqrt(fan_in), 1/sqrt(fan_in)]`.
    ///
    /// # Arguments
    /// * `fan_in` - The number of input units of the layer, not counting the bias.
    ///
    /// # Returns
    /// An error if the calculated range is invalid, which happens for a zero `fan_in`.
    pub fn fan_in(fan_in: usize) -> Result<Self> {
        let bound = 1. / (fan_in as f32).sqrt();
        Self::uniform_inclusive(-bound, bound)
    }
}
