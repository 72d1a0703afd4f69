use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView2, s};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    Sizes,
    activations::{Sigmoid, Softmax},
    bias::append_bias,
    loss::{LossFn, SumOfSquares},
};
use crate::{
    Result,
    config::ModelConfig,
    error::check_size,
    evaluation::{ConfusionMatrix, argmax},
    initialization::RandWeightGen,
    optimization::{GradientDescentWithMomentum, Optimizer},
};

/// The training error is logged on every iteration that is a multiple of this.
pub const REPORT_EVERY: usize = 100;

/// The activations of every layer computed by a forward pass.
///
/// Both hidden layers keep their trailing bias column so they can be fed straight into the
/// backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Activations {
    hidden1: Array2<f32>,
    hidden2: Array2<f32>,
    outputs: Array2<f32>,
}

impl Activations {
    /// `sigmoid(inputs . W1)` plus the bias column.
    pub fn hidden1(&self) -> ArrayView2<'_, f32> {
        self.hidden1.view()
    }

    /// `sigmoid(hidden1 . W2)` plus the bias column.
    pub fn hidden2(&self) -> ArrayView2<'_, f32> {
        self.hidden2.view()
    }

    /// `softmax(hidden2 . W3)`, one row of class probabilities per sample.
    pub fn outputs(&self) -> ArrayView2<'_, f32> {
        self.outputs.view()
    }

    pub fn into_outputs(self) -> Array2<f32> {
        self.outputs
    }
}

/// The error derivatives with respect to each weight matrix, shaped like them.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    layers: [Array2<f32>; 3],
}

impl Gradients {
    pub fn w1(&self) -> ArrayView2<'_, f32> {
        self.layers[0].view()
    }

    pub fn w2(&self) -> ArrayView2<'_, f32> {
        self.layers[1].view()
    }

    pub fn w3(&self) -> ArrayView2<'_, f32> {
        self.layers[2].view()
    }

    pub fn layers(&self) -> &[Array2<f32>] {
        &self.layers
    }
}

/// A multi-layer perceptron with two sigmoid hidden layers and a softmax output layer.
///
/// Each weight matrix has one extra row for the bias, whose input is the constant `-1` column
/// appended to the previous layer's activations.
#[derive(Debug, Clone)]
pub struct Mlp {
    sizes: Sizes,
    sigmoid: Sigmoid,
    softmax: Softmax,
    momentum: f32,
    weights: [Array2<f32>; 3],
}

impl Mlp {
    pub const DEFAULT_BETA: f32 = 1.;
    pub const DEFAULT_MOMENTUM: f32 = 0.9;

    /// Creates a new `Mlp` with weights sampled from the thread's random number generator.
    ///
    /// # Arguments
    /// * `sizes` - The dimensions of the network.
    /// * `beta` - The steepness of the hidden layers' sigmoid.
    /// * `momentum` - The fraction of the previous update carried over on each training step.
    ///
    /// # Returns
    /// A new `Mlp` or an error if the weights could not be sampled.
    pub fn new(sizes: Sizes, beta: f32, momentum: f32) -> Result<Self> {
        Self::with_rng(sizes, beta, momentum, &mut rand::rng())
    }

    /// Creates a new `Mlp` with each weight matrix uniform in `[-1/sqrt(fan_in), 1/sqrt(fan_in)]`.
    ///
    /// # Arguments
    /// * `sizes` - The dimensions of the network.
    /// * `beta` - The steepness of the hidden layers' sigmoid.
    /// * `momentum` - The fraction of the previous update carried over on each training step.
    /// * `rng` - The random number generator the weights are sampled with.
    ///
    /// # Returns
    /// A new `Mlp` or an error if the weights could not be sampled.
    pub fn with_rng<R: Rng + ?Sized>(
        sizes: Sizes,
        beta: f32,
        momentum: f32,
        rng: &mut R,
    ) -> Result<Self> {
        let [l1, l2, l3] = sizes.layers();
        let weights = [
            init_layer(rng, l1)?,
            init_layer(rng, l2)?,
            init_layer(rng, l3)?,
        ];

        Ok(Self::build(sizes, beta, momentum, weights))
    }

    /// Creates a new `Mlp` from a configuration, seeding the weights when it carries a seed.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let sizes = Sizes::try_from(config.sizes)?;

        match config.seed {
            Some(seed) => Self::with_rng(
                sizes,
                config.beta,
                config.momentum,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => Self::new(sizes, config.beta, config.momentum),
        }
    }

    /// Creates a new `Mlp` with the given weights.
    ///
    /// # Returns
    /// An error if a weight matrix is not `(fan_in + 1) x fan_out` for its layer.
    pub fn from_weights(
        sizes: Sizes,
        beta: f32,
        momentum: f32,
        weights: [Array2<f32>; 3],
    ) -> Result<Self> {
        for (w, (fan_in, fan_out)) in weights.iter().zip(sizes.layers()) {
            check_size("weight rows", w.nrows(), fan_in + 1)?;
            check_size("weight columns", w.ncols(), fan_out)?;
        }

        Ok(Self::build(sizes, beta, momentum, weights))
    }

    fn build(sizes: Sizes, beta: f32, momentum: f32, weights: [Array2<f32>; 3]) -> Self {
        Self {
            sizes,
            sigmoid: Sigmoid::new(beta),
            softmax: Softmax::new(),
            momentum,
            weights,
        }
    }

    pub fn sizes(&self) -> Sizes {
        self.sizes
    }

    pub fn beta(&self) -> f32 {
        self.sigmoid.beta()
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    /// The weight matrices `[W1, W2, W3]`, bias row last.
    pub fn weights(&self) -> [ArrayView2<'_, f32>; 3] {
        let [w1, w2, w3] = &self.weights;
        [w1.view(), w2.view(), w3.view()]
    }

    /// Trains the network with full batch gradient descent with momentum.
    ///
    /// The sum-of-squares error is logged every `REPORT_EVERY` iterations.
    ///
    /// # Arguments
    /// * `inputs` - One sample per row, without the bias column.
    /// * `targets` - The one-hot encoded class of each sample.
    /// * `eta` - The learning rate.
    /// * `iterations` - The amount of weight updates.
    ///
    /// # Returns
    /// An error if the shapes of `inputs` or `targets` don't match the network.
    pub fn train(
        &mut self,
        inputs: ArrayView2<f32>,
        targets: ArrayView2<f32>,
        eta: f32,
        iterations: usize,
    ) -> Result<()> {
        self.check_dataset(inputs, targets)?;

        let inputs = append_bias(inputs);
        let mut optimizer = GradientDescentWithMomentum::new(&self.weights, eta, self.momentum);

        for n in 0..iterations {
            let activations = self.forward_pass(inputs.view())?;
            let error = SumOfSquares.loss(activations.outputs(), targets);

            if n % REPORT_EVERY == 0 {
                info!("Iteration: {n} Error: {error}");
            }
            debug!(iteration = n, error = error; "training step");

            let grads = self.backward(inputs.view(), &activations, targets)?;
            optimizer.update_params(grads.layers(), &mut self.weights)?;
        }

        Ok(())
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `inputs` - One sample per row, with the bias column already appended.
    ///
    /// # Returns
    /// The activations of every layer, or an error if `inputs` has the wrong amount of columns.
    pub fn forward_pass(&self, inputs: ArrayView2<f32>) -> Result<Activations> {
        check_size("inputs columns", inputs.ncols(), self.sizes.input() + 1)?;

        let [w1, w2, w3] = &self.weights;

        let hidden1 = append_bias(self.sigmoid.forward(inputs.dot(w1).view()).view());
        let hidden2 = append_bias(self.sigmoid.forward(hidden1.dot(w2).view()).view());
        let outputs = self.softmax.forward(hidden2.dot(w3).view());

        Ok(Activations {
            hidden1,
            hidden2,
            outputs,
        })
    }

    /// Computes the error derivatives with respect to each weight matrix.
    ///
    /// The output layer delta is `softmax'(h) * (outputs - targets)`, using the elementwise
    /// softmax derivative rather than the cross-entropy gradient.
    ///
    /// # Arguments
    /// * `inputs` - The inputs of the forward pass, bias column included.
    /// * `activations` - The result of `forward_pass` on `inputs`.
    /// * `targets` - The one-hot encoded class of each sample.
    ///
    /// # Returns
    /// The gradients or an error if the shapes don't match the network.
    pub fn backward(
        &self,
        inputs: ArrayView2<f32>,
        activations: &Activations,
        targets: ArrayView2<f32>,
    ) -> Result<Gradients> {
        let n = inputs.nrows();
        check_size("inputs columns", inputs.ncols(), self.sizes.input() + 1)?;
        check_size("targets columns", targets.ncols(), self.sizes.classes())?;
        check_size("targets rows", targets.nrows(), n)?;

        let Activations {
            hidden1,
            hidden2,
            outputs,
        } = activations;
        check_size("hidden1 rows", hidden1.nrows(), n)?;
        check_size("hidden1 columns", hidden1.ncols(), self.sizes.hidden1() + 1)?;
        check_size("hidden2 rows", hidden2.nrows(), n)?;
        check_size("hidden2 columns", hidden2.ncols(), self.sizes.hidden2() + 1)?;
        check_size("outputs rows", outputs.nrows(), n)?;
        check_size("outputs columns", outputs.ncols(), self.sizes.classes())?;

        let [w1, w2, w3] = &self.weights;

        // output layer
        let h_output = hidden2.dot(w3);
        let d_output = self.softmax.derivative(h_output.view())
            * SumOfSquares.loss_prime(outputs.view(), targets);
        let dw3 = hidden2.t().dot(&d_output);

        // second hidden layer, the bias column gets no delta
        let d_hidden2 = d_output.dot(&w3.t());
        let h_hidden2 = hidden1.dot(w2);
        let d_hidden2 = self.sigmoid.derivative(h_hidden2.view()) * &d_hidden2.slice(s![.., ..-1]);
        let dw2 = hidden1.t().dot(&d_hidden2);

        // first hidden layer
        let d_hidden1 = d_hidden2.dot(&w2.t());
        let h_hidden1 = inputs.dot(w1);
        let d_hidden1 = self.sigmoid.derivative(h_hidden1.view()) * &d_hidden1.slice(s![.., ..-1]);
        let dw1 = inputs.t().dot(&d_hidden1);

        Ok(Gradients {
            layers: [dw1, dw2, dw3],
        })
    }

    /// Predicts the class of each sample as the arg-max of its outputs.
    ///
    /// # Arguments
    /// * `x` - One sample per row, without the bias column.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<usize>> {
        check_size("inputs columns", x.ncols(), self.sizes.input())?;

        let activations = self.forward_pass(append_bias(x).view())?;
        Ok(argmax(activations.outputs()))
    }

    /// The sum-of-squares error of the network's current outputs for `x` against `targets`.
    pub fn loss(&self, x: ArrayView2<f32>, targets: ArrayView2<f32>) -> Result<f32> {
        self.check_dataset(x, targets)?;

        let activations = self.forward_pass(append_bias(x).view())?;
        Ok(SumOfSquares.loss(activations.outputs(), targets))
    }

    /// Evaluates the network on unseen samples, logging the confusion matrix and the accuracy.
    ///
    /// # Arguments
    /// * `x` - One sample per row, without the bias column.
    /// * `y` - The one-hot encoded class of each sample.
    ///
    /// # Returns
    /// The confusion matrix, where cell `(i, j)` counts the samples predicted as `i` whose true
    /// class is `j`.
    pub fn evaluate(&self, x: ArrayView2<f32>, y: ArrayView2<f32>) -> Result<ConfusionMatrix> {
        self.check_dataset(x, y)?;

        let predicted = self.predict(x)?;
        let truth = argmax(y);
        let cm = ConfusionMatrix::new(predicted.view(), truth.view(), self.sizes.classes())?;

        info!("The confusion matrix is:\n{cm}");
        info!("The accuracy is {}", cm.accuracy() * 100.);

        Ok(cm)
    }

    pub fn sigmoid(&self, x: ArrayView2<f32>) -> Array2<f32> {
        self.sigmoid.forward(x)
    }

    pub fn sigmoid_derivative(&self, x: ArrayView2<f32>) -> Array2<f32> {
        self.sigmoid.derivative(x)
    }

    pub fn softmax(&self, x: ArrayView2<f32>) -> Array2<f32> {
        self.softmax.forward(x)
    }

    pub fn softmax_derivative(&self, x: ArrayView2<f32>) -> Array2<f32> {
        self.softmax.derivative(x)
    }

    fn check_dataset(&self, x: ArrayView2<f32>, y: ArrayView2<f32>) -> Result<()> {
        check_size("inputs columns", x.ncols(), self.sizes.input())?;
        check_size("targets columns", y.ncols(), self.sizes.classes())?;
        check_size("targets rows", y.nrows(), x.nrows())
    }
}

fn init_layer<R: Rng + ?Sized>(
    rng: &mut R,
    (fan_in, fan_out): (usize, usize),
) -> Result<Array2<f32>> {
    Ok(RandWeightGen::fan_in(fan_in)?.sample(rng, (fan_in + 1, fan_out)))
}
