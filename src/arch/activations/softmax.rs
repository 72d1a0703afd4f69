use ndarray::{Array2, ArrayView2, Axis};

/// Row-wise softmax, each row of the input being one sample.
///
/// The exponentials are not shifted by the row maximum, so large pre-activations overflow to
/// `inf`/`NaN` as plain float results.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Softmax;

impl Softmax {
    pub fn new() -> Self {
        Self
    }

    /// `e^z / sum(e^z)` over each row.
    pub fn forward(&self, z: ArrayView2<f32>) -> Array2<f32> {
        let exp = z.mapv(f32::exp);
        let sums = exp.sum_axis(Axis(1)).insert_axis(Axis(1));
        exp / &sums
    }

    /// The elementwise `s * (1 - s)` approximation of the softmax derivative, not its full
    /// jacobian.
    pub fn derivative(&self, z: ArrayView2<f32>) -> Array2<f32> {
        self.forward(z).mapv_into(|s| s * (1. - s))
    }
}
