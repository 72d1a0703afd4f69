pub mod arch;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod initialization;
pub mod optimization;

pub use arch::{Mlp, Sizes};
pub use error::{MlErr, Result};
