use std::fmt::{self, Display};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{MlErr, Result, error::check_size};

/// Returns the index of the largest value of each row, the first one on ties.
///
/// A `NaN` in a row wins over any number, mirroring how a diverged output would be reported.
pub fn argmax(x: ArrayView2<f32>) -> Array1<usize> {
    x.rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            for (i, &v) in row.iter().enumerate().skip(1) {
                let current = row[best];
                if current.is_nan() {
                    break;
                }
                if v.is_nan() || v > current {
                    best = i;
                }
            }
            best
        })
        .collect()
}

/// A `C x C` table where cell `(i, j)` counts the samples predicted as class `i` whose true
/// class is `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
}

impl ConfusionMatrix {
    /// Builds the confusion matrix of a set of predictions.
    ///
    /// # Arguments
    /// * `predicted` - The predicted class of each sample.
    /// * `truth` - The true class of each sample.
    /// * `nclasses` - The number of classes.
    ///
    /// # Returns
    /// An error if `predicted` and `truth` differ in length or a label is not below `nclasses`.
    pub fn new(
        predicted: ArrayView1<usize>,
        truth: ArrayView1<usize>,
        nclasses: usize,
    ) -> Result<Self> {
        check_size("predicted labels", predicted.len(), truth.len())?;

        let mut matrix = Array2::zeros((nclasses, nclasses));
        for (&i, &j) in predicted.iter().zip(truth) {
            for label in [i, j] {
                if label >= nclasses {
                    return Err(MlErr::LabelOutOfRange { label, nclasses });
                }
            }

            matrix[[i, j]] += 1;
        }

        Ok(Self { matrix })
    }

    pub fn matrix(&self) -> ArrayView2<'_, usize> {
        self.matrix.view()
    }

    pub fn nclasses(&self) -> usize {
        self.matrix.nrows()
    }

    /// The amount of evaluated samples.
    pub fn total(&self) -> usize {
        self.matrix.sum()
    }

    /// The amount of correctly classified samples.
    pub fn trace(&self) -> usize {
        self.matrix.diag().sum()
    }

    /// The fraction of correctly classified samples, zero when there are none.
    pub fn accuracy(&self) -> f32 {
        match self.total() {
            0 => 0.,
            total => self.trace() as f32 / total as f32,
        }
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .matrix
            .iter()
            .map(|n| n.to_string().len())
            .max()
            .unwrap_or(1);

        for (i, row) in self.matrix.rows().into_iter().enumerate() {
            let open = if i == 0 { "[[" } else { " [" };
            let cells: Vec<_> = row.iter().map(|n| format!("{n:>width$}")).collect();
            write!(f, "{open}{}]", cells.join(" "))?;

            if i + 1 == self.matrix.nrows() {
                write!(f, "]")?;
            } else {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn argmax_per_row() {
        let x = array![[0.1, 0.7, 0.2], [0.9, 0.05, 0.05], [0.3, 0.3, 0.4]];
        assert_eq!(argmax(x.view()), array![1usize, 0, 2]);
    }

    #[test]
    fn argmax_ties_pick_first() {
        let x = array![[0.5, 0.5], [0.25, 0.25]];
        assert_eq!(argmax(x.view()), array![0usize, 0]);
    }

    #[test]
    fn argmax_nan_wins() {
        let x = array![[0.1, f32::NAN, 0.9]];
        assert_eq!(argmax(x.view()), array![1usize]);
    }

    #[test]
    fn counts_predicted_by_true() {
        let predicted = array![0usize, 1, 1, 2, 0];
        let truth = array![0usize, 1, 0, 2, 2];
        let cm = ConfusionMatrix::new(predicted.view(), truth.view(), 3).unwrap();

        assert_eq!(cm.matrix(), array![[1usize, 0, 1], [1, 1, 0], [0, 0, 1]]);
        assert_eq!(cm.total(), 5);
        assert_eq!(cm.trace(), 3);
        assert!((cm.accuracy() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn empty_has_zero_accuracy() {
        let none = Array1::<usize>::zeros(0);
        let cm = ConfusionMatrix::new(none.view(), none.view(), 2).unwrap();
        assert_eq!(cm.total(), 0);
        assert_eq!(cm.accuracy(), 0.);
    }

    #[test]
    fn rejects_out_of_range_labels() {
        let predicted = array![0usize, 2];
        let truth = array![0usize, 1];
        let err = ConfusionMatrix::new(predicted.view(), truth.view(), 2).unwrap_err();
        assert_eq!(
            err,
            MlErr::LabelOutOfRange {
                label: 2,
                nclasses: 2
            }
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        let predicted = array![0usize];
        let truth = array![0usize, 1];
        let err = ConfusionMatrix::new(predicted.view(), truth.view(), 2).unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { .. }));
    }

    #[test]
    fn display_like_a_table() {
        let labels = array![0usize, 1, 1];
        let cm = ConfusionMatrix::new(labels.view(), labels.view(), 2).unwrap();
        assert_eq!(cm.to_string(), "[[1 0]\n [0 2]]");
    }
}
