use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The crate's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// A shape invariant was violated (e.g. the column count of the inputs).
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A layer dimension that must be positive was zero.
    InvalidSize { what: &'static str },
    /// A class label is not below the number of classes.
    LabelOutOfRange { label: usize, nclasses: usize },
    /// The weights could not be sampled from their distribution.
    Init(String),
    /// The configuration could not be read or parsed.
    Config(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            MlErr::InvalidSize { what } => write!(f, "invalid size: {what} must be non zero"),
            MlErr::LabelOutOfRange { label, nclasses } => {
                write!(f, "class label {label} is out of range for {nclasses} classes")
            }
            MlErr::Init(msg) => write!(f, "failed to initialize weights: {msg}"),
            MlErr::Config(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for MlErr {}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::Init(value.to_string())
    }
}

impl From<serde_json::Error> for MlErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}

/// Checks that `got` equals `expected`, naming the offending quantity otherwise.
pub(crate) fn check_size(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(MlErr::SizeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch_message() {
        let err = check_size("inputs columns", 3, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "shape mismatch for inputs columns: got 3, expected 2"
        );
    }

    #[test]
    fn matching_sizes_pass() {
        assert!(check_size("rows", 4, 4).is_ok());
    }
}
