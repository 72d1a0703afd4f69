mod confusion;

pub use confusion::{ConfusionMatrix, argmax};
