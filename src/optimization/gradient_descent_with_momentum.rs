use ndarray::Array2;

use super::Optimizer;
use crate::{MlErr, Result, error::check_size};

/// Gradient descent where each step also carries a fraction of the previous one.
///
/// For every layer `k`: `update_k = learning_rate * grad_k + momentum * prev_k`, then
/// `params_k -= update_k` and `update_k` becomes `prev_k` for the next call.
#[derive(Debug, Clone)]
pub struct GradientDescentWithMomentum {
    learning_rate: f32,
    momentum: f32,
    updates: Vec<Array2<f32>>,
}

impl GradientDescentWithMomentum {
    /// Creates a new `GradientDescentWithMomentum` optimizer with zeroed previous updates.
    ///
    /// # Arguments
    /// * `params` - The layers this optimizer will update, only their shapes are used.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `momentum` - The fraction of the previous update added to the current one.
    ///
    /// # Returns
    /// A new `GradientDescentWithMomentum` instance.
    pub fn new(params: &[Array2<f32>], learning_rate: f32, momentum: f32) -> Self {
        Self {
            learning_rate,
            momentum,
            updates: params.iter().map(|p| Array2::zeros(p.dim())).collect(),
        }
    }

    /// The updates applied on the last step, one per layer.
    pub fn updates(&self) -> &[Array2<f32>] {
        &self.updates
    }
}

impl Optimizer for GradientDescentWithMomentum {
    fn update_params(&mut self, grad: &[Array2<f32>], params: &mut [Array2<f32>]) -> Result<()> {
        check_size("gradient layers", grad.len(), params.len())?;
        check_size("optimizer layers", self.updates.len(), params.len())?;

        for (g, p) in grad.iter().zip(params.iter()) {
            if g.dim() != p.dim() {
                return Err(MlErr::SizeMismatch {
                    what: "gradient elements",
                    got: g.len(),
                    expected: p.len(),
                });
            }
        }

        let lr = self.learning_rate;
        let mu = self.momentum;

        for ((u, g), p) in self.updates.iter_mut().zip(grad).zip(params.iter_mut()) {
            u.zip_mut_with(g, |u, &g| *u = lr * g + mu * *u);
            *p -= &*u;
        }

        Ok(())
    }
}
