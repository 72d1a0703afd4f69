use std::env;

use anyhow::Context;
use env_logger::{Env, Target};
use log::info;
use ndarray::{Array2, array};

use mlp::{Mlp, config::Config};

const CONFIG_ENV: &str = "MLP_CONFIG";

/// The four XOR samples with their one-hot encoded output, class 1 being `true`.
fn xor() -> (Array2<f32>, Array2<f32>) {
    let x = array![[0., 0.], [0., 1.], [1., 0.], [1., 1.]];
    let y = array![[1., 0.], [0., 1.], [0., 1.], [1., 0.]];
    (x, y)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let config = match env::args().nth(1).or_else(|| env::var(CONFIG_ENV).ok()) {
        Some(path) => {
            Config::load(&path).with_context(|| format!("failed to load config from {path}"))?
        }
        None => Config::default(),
    };
    info!("training with {config:?}");

    let (x, y) = xor();
    let mut mlp = Mlp::from_config(&config.model).context("failed to build the network")?;

    mlp.train(
        x.view(),
        y.view(),
        config.training.eta,
        config.training.iterations,
    )?;
    mlp.evaluate(x.view(), y.view())?;

    Ok(())
}
