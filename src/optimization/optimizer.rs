use ndarray::Array2;

use crate::Result;

pub trait Optimizer {
    /// Takes one optimization step, modifying every layer of `params` in place.
    ///
    /// # Arguments
    /// * `grad` - The gradient of each layer, in the same order as `params`.
    /// * `params` - The weight matrices of each layer.
    ///
    /// # Returns
    /// An error if `grad` and `params` disagree in the amount of layers or their shapes.
    fn update_params(&mut self, grad: &[Array2<f32>], params: &mut [Array2<f32>]) -> Result<()>;
}
