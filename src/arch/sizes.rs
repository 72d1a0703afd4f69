use crate::{MlErr, Result};

/// The dimensions of a two hidden layer perceptron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizes {
    input: usize,
    hidden1: usize,
    hidden2: usize,
    classes: usize,
}

impl Sizes {
    /// Creates a new `Sizes`.
    ///
    /// # Arguments
    /// * `input` - The number of features of each sample.
    /// * `hidden1` - The number of neurons in the first hidden layer.
    /// * `hidden2` - The number of neurons in the second hidden layer.
    /// * `classes` - The number of classes, that is, of neurons in the output layer.
    ///
    /// # Returns
    /// An error if any of the dimensions is zero.
    pub fn new(input: usize, hidden1: usize, hidden2: usize, classes: usize) -> Result<Self> {
        for (what, dim) in [
            ("input", input),
            ("hidden1", hidden1),
            ("hidden2", hidden2),
            ("classes", classes),
        ] {
            if dim == 0 {
                return Err(MlErr::InvalidSize { what });
            }
        }

        Ok(Self {
            input,
            hidden1,
            hidden2,
            classes,
        })
    }

    pub fn input(&self) -> usize {
        self.input
    }

    pub fn hidden1(&self) -> usize {
        self.hidden1
    }

    pub fn hidden2(&self) -> usize {
        self.hidden2
    }

    pub fn classes(&self) -> usize {
        self.classes
    }

    /// The `(fan_in, fan_out)` of each of the three layers, without bias.
    pub fn layers(&self) -> [(usize, usize); 3] {
        [
            (self.input, self.hidden1),
            (self.hidden1, self.hidden2),
            (self.hidden2, self.classes),
        ]
    }
}

impl TryFrom<[usize; 4]> for Sizes {
    type Error = MlErr;

    fn try_from([input, hidden1, hidden2, classes]: [usize; 4]) -> Result<Self> {
        Self::new(input, hidden1, hidden2, classes)
    }
}

impl From<Sizes> for [usize; 4] {
    fn from(sizes: Sizes) -> Self {
        [sizes.input, sizes.hidden1, sizes.hidden2, sizes.classes]
    }
}
