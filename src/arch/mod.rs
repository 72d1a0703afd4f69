pub mod activations;
mod bias;
pub mod loss;
mod mlp;
mod sizes;

pub use bias::{BIAS, append_bias};
pub use mlp::{Activations, Gradients, Mlp, REPORT_EVERY};
pub use sizes::Sizes;
