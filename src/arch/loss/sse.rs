use ndarray::{Array2, ArrayView2};

use super::LossFn;

/// Sum-of-squares error, `0.5 * sum((y_pred - y)^2)` over every sample and class.
#[derive(Default, Clone, Copy, Debug)]
pub struct SumOfSquares;

impl SumOfSquares {
    /// Returns a new `SumOfSquares`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for SumOfSquares {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        0.5 * (&y_pred - &y).mapv(|x| x.powi(2)).sum()
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32> {
        &y_pred - &y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn half_sum_of_squares() {
        let y_pred = array![[0.5, 0.5], [1., 0.]];
        let y = array![[1., 0.], [0., 1.]];

        // 0.5 * (0.25 + 0.25 + 1 + 1)
        assert_eq!(SumOfSquares.loss(y_pred.view(), y.view()), 1.25);
    }

    #[test]
    fn zero_on_exact_prediction() {
        let y = array![[0., 1.], [1., 0.]];
        assert_eq!(SumOfSquares.loss(y.view(), y.view()), 0.);
    }

    #[test]
    fn prime_is_difference() {
        let y_pred = array![[0.25, 0.75]];
        let y = array![[0., 1.]];
        assert_eq!(
            SumOfSquares.loss_prime(y_pred.view(), y.view()),
            array![[0.25f32, -0.25]]
        );
    }
}
