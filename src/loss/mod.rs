use crate::backend::{Backend, Scalar, Tensor1D};

/// A trait for differentiable loss functions used during model training.
///
/// Implementors must define:
/// - How to compute the scalar loss value (for logging/metrics).
/// - How to compute the gradient of the loss w.r.t. the model's predictions.
///
/// The gradient is passed to the model's `backward()` method to update parameters.
pub trait Loss<B: Backend> {
    type Prediction;
    type Target;

    /// Computes the scalar loss value.
    fn loss(&self, prediction: &Self::Prediction, target: &Self::Target) -> Scalar<B>;

    /// Computes the gradient of the loss w.r.t. the prediction: ∂L/∂pred.
    fn grad_wrt_prediction(
        &self,
        prediction: &Self::Prediction,
        target: &Self::Target,
    ) -> Self::Prediction;
}

/// Mean Absolute Error (MAE) loss: `L = (1/n) * Σ|pred_i - target_i|`
///
/// Gradient w.r.t. prediction: `∂L/∂pred = sign(pred - target) / n`.
/// At `pred == target` the subgradient `0` is used.
#[derive(Clone, Copy, Debug, Default)]
pub struct MAELoss;

impl<B: Backend> Loss<B> for MAELoss {
    type Prediction = Tensor1D<B>;
    type Target = Tensor1D<B>;

    fn loss(&self, pred: &Self::Prediction, target: &Self::Target) -> Scalar<B> {
        pred.sub(target).abs().mean()
    }

    fn grad_wrt_prediction(&self, pred: &Self::Prediction, target: &Self::Target) -> Tensor1D<B> {
        let sign = pred.sub(target).sign();
        let n = Scalar::<B>::new(1.0 / pred.len() as f64);
        sign.scale(&n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_mae_loss() {
        let pred = Tensor1D::<CpuBackend>::new(vec![3.0, -1.0]);
        let target = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0]);

        let mae = MAELoss;
        let loss_val = mae.loss(&pred, &target);
        // (|3-1| + |-1-2|) / 2 = (2 + 3) / 2 = 2.5
        assert!((loss_val.to_f64() - 2.5).abs() < 1e-12);

        let grad = mae.grad_wrt_prediction(&pred, &target);
        // sign(pred - target) / n = [1.0, -1.0] / 2 = [0.5, -0.5]
        assert_eq!(grad.to_vec(), vec![0.5, -0.5]);
    }

    #[test]
    fn test_mae_exact_match_has_zero_gradient() {
        let pred = Tensor1D::<CpuBackend>::new(vec![0.5, 1.0, 4.0]);
        let target = Tensor1D::<CpuBackend>::new(vec![0.5, 2.0, 4.0]);

        let grad = MAELoss.grad_wrt_prediction(&pred, &target);
        assert_eq!(grad.to_vec()[0], 0.0);
        assert!((grad.to_vec()[1] + 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(grad.to_vec()[2], 0.0);
    }

    #[test]
    fn test_mae_zero_predictions_equal_mean_target() {
        let pred = Tensor1D::<CpuBackend>::zeros(4);
        let target = Tensor1D::<CpuBackend>::new(vec![0.1, 0.2, 0.3, 0.4]);

        let loss: Scalar<CpuBackend> = MAELoss.loss(&pred, &target);
        assert!((loss.to_f64() - 0.25).abs() < 1e-12);
    }
}
