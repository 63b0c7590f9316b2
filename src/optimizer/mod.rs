use crate::backend::{Backend, Scalar};
use crate::model::ParamOps;

/// Trait for gradient-based optimizers.
///
/// Optimizers only update parameters from gradients; the training loop lives in
/// [`Trainer`](crate::trainer::Trainer). Any model can be paired with any optimizer
/// without dynamic dispatch.
///
/// # Example
/// ```rust
/// use sizetime::backend::{CpuBackend, Scalar, Tensor1D};
/// use sizetime::model::LinearParams;
/// use sizetime::optimizer::{Optimizer, SGD};
///
/// let params = LinearParams {
///     weights: Tensor1D::<CpuBackend>::new(vec![1.0]),
///     bias: Scalar::<CpuBackend>::new(0.5),
/// };
/// let gradients = LinearParams {
///     weights: Tensor1D::<CpuBackend>::new(vec![10.0]),
///     bias: Scalar::<CpuBackend>::new(-10.0),
/// };
/// let sgd = SGD::<CpuBackend>::new(0.01);
/// let updated = sgd.step(&params, &gradients);
/// assert!((updated.weights.to_vec()[0] - 0.9).abs() < 1e-12);
/// assert!((updated.bias.to_f64() - 0.6).abs() < 1e-12);
/// ```
pub trait Optimizer<B: Backend, P> {
    /// Performs one update step:
    /// ```text
    /// params_new = params - learning_rate * gradients
    /// ```
    ///
    /// Returns new parameters instead of mutating `params`.
    fn step(&self, params: &P, gradients: &P) -> P;
}

/// Plain stochastic gradient descent: `θ ← θ - η · ∇L(θ)`.
///
/// No momentum, no adaptive rates.
#[derive(Clone, Debug)]
pub struct SGD<B: Backend> {
    lr: Scalar<B>,
}

impl<B: Backend> SGD<B> {
    /// Creates an SGD optimizer with learning rate `lr`.
    pub fn new(lr: f64) -> Self {
        Self {
            lr: Scalar::<B>::new(lr),
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr.to_f64()
    }
}

impl<B: Backend, P: ParamOps<B>> Optimizer<B, P> for SGD<B> {
    fn step(&self, params: &P, grads: &P) -> P {
        // Scaling by -lr turns the update into a single add.
        let neg_lr = Scalar::<B>::new(0.0) - self.lr;
        params.add(&grads.scale(neg_lr))
    }
}
