use ndarray::{Array2, ArrayView2, s};

/// The constant value of the bias column appended to every layer's input.
pub const BIAS: f32 = -1.;

/// Returns `x` with an extra trailing column filled with `BIAS`.
pub fn append_bias(x: ArrayView2<f32>) -> Array2<f32> {
    let (n, d) = x.dim();
    let mut out = Array2::from_elem((n, d + 1), BIAS);
    out.slice_mut(s![.., ..d]).assign(&x);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn appends_minus_one_column() {
        let x = array![[1f32, 2.], [3., 4.], [5., 6.]];
        assert_eq!(
            append_bias(x.view()),
            array![[1f32, 2., -1.], [3., 4., -1.], [5., 6., -1.]]
        );
    }

    #[test]
    fn empty_rows() {
        let x = Array2::<f32>::zeros((0, 3));
        assert_eq!(append_bias(x.view()).dim(), (0, 4));
    }
}
