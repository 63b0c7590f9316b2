//! Linear regression with compile-time state tracking.
//!
//! - [`LinearRegression`] = `LinearModel<B, Unfitted>`: used during training.
//! - `LinearModel<B, Fitted>`: inference-only, serializable predictor.
//!
//! For the single-feature case the parameters are also exposed as [`Parameters`],
//! a plain `(k, b)` pair: `time = k * size + b`.

use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::ModelError;
use crate::model::{Fitted, InferenceModel, ParamOps, TrainableModel, Unfitted};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Slope and intercept of a single-feature linear model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Slope (the dense layer's kernel).
    pub k: f64,
    /// Intercept (the dense layer's bias).
    pub b: f64,
}

impl Parameters {
    pub fn new(k: f64, b: f64) -> Self {
        Self { k, b }
    }

    /// `k * x + b`.
    pub fn predict(&self, x: f64) -> f64 {
        self.k * x + self.b
    }
}

/// Trainable parameters of a linear model: weights and bias.
#[derive(Clone, Debug)]
pub struct LinearParams<B: Backend> {
    pub weights: Tensor1D<B>,
    pub bias: Scalar<B>,
}

impl<B: Backend> From<Parameters> for LinearParams<B> {
    fn from(p: Parameters) -> Self {
        Self {
            weights: Tensor1D::new(vec![p.k]),
            bias: Scalar::new(p.b),
        }
    }
}

impl<B: Backend> TryFrom<&LinearParams<B>> for Parameters {
    type Error = ModelError;

    fn try_from(params: &LinearParams<B>) -> Result<Self, Self::Error> {
        match params.weights.to_vec().as_slice() {
            [k] => Ok(Parameters {
                k: *k,
                b: params.bias.to_f64(),
            }),
            other => Err(ModelError::NotSingleFeature(other.len())),
        }
    }
}

/// Serializable representation of linear model parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializableLinearParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl<B: Backend> From<&LinearParams<B>> for SerializableLinearParams {
    fn from(params: &LinearParams<B>) -> Self {
        Self {
            weights: params.weights.to_vec(),
            bias: params.bias.to_f64(),
        }
    }
}

impl<B: Backend> From<SerializableLinearParams> for LinearParams<B> {
    fn from(value: SerializableLinearParams) -> Self {
        Self {
            weights: Tensor1D::new(value.weights),
            bias: Scalar::new(value.bias),
        }
    }
}

impl<B: Backend> ParamOps<B> for LinearParams<B> {
    fn add(&self, other: &Self) -> Self {
        Self {
            weights: self.weights.add(&other.weights),
            bias: self.bias + other.bias,
        }
    }

    fn scale(&self, scalar: Scalar<B>) -> Self {
        Self {
            weights: self.weights.scale(&scalar),
            bias: self.bias * scalar,
        }
    }
}

/// A linear model `y = wᵀx + b` with its training state encoded in `S`.
///
/// You cannot call `predict()` on an `Unfitted` model.
#[derive(Clone, Debug)]
pub struct LinearModel<B: Backend, S> {
    params: LinearParams<B>,
    _state: PhantomData<S>,
}

impl<B: Backend, S> LinearModel<B, S> {
    pub fn n_features(&self) -> usize {
        self.params.weights.len()
    }

    /// Current `(k, b)` of a single-feature model.
    pub fn parameters(&self) -> Result<Parameters, ModelError> {
        Parameters::try_from(&self.params)
    }

    /// Overwrites both `k` and `b`; the model becomes single-feature.
    pub fn set_parameters(&mut self, parameters: Parameters) {
        self.params = parameters.into();
    }
}

impl<B: Backend> LinearModel<B, Fitted> {
    /// Wraps trained parameters.
    pub fn new(params: LinearParams<B>) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }
}

impl<B: Backend> InferenceModel<B> for LinearModel<B, Fitted> {
    type InputSingle = Tensor1D<B>;
    type InputBatch = Tensor2D<B>;
    type OutputSingle = Scalar<B>;
    type OutputBatch = Tensor1D<B>;
    type ParamsRepr = SerializableLinearParams;

    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle {
        self.params.weights.dot(input) + self.params.bias
    }

    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch {
        input
            .dot(&self.params.weights)
            .add_scalar(&self.params.bias)
    }

    fn extract_params(&self) -> Self::ParamsRepr {
        (&self.params).into()
    }

    fn from_params(params: Self::ParamsRepr) -> Self {
        Self::new(params.into())
    }
}

/// Forward pass: `X @ w + b`.
/// Backward pass: `∇w = Xᵀ · grad`, `∇b = Σ grad`.
impl<B: Backend> TrainableModel<B> for LinearModel<B, Unfitted> {
    type Params = LinearParams<B>;
    type Gradients = LinearParams<B>;
    type Prediction = Tensor1D<B>;
    type Input = Tensor2D<B>;
    type Output = LinearModel<B, Fitted>;

    fn forward(&self, x: &Self::Input) -> Self::Prediction {
        x.dot(&self.params.weights).add_scalar(&self.params.bias)
    }

    fn backward(&self, x: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients {
        LinearParams {
            weights: x.tdot(grad_output),
            bias: grad_output.sum(),
        }
    }

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn update_params(&mut self, params: &Self::Params) {
        self.params = params.clone();
    }

    fn into_fitted(self) -> LinearModel<B, Fitted> {
        LinearModel::<B, Fitted>::new(self.params)
    }
}

/// An unfitted linear model, the input to [`Trainer`](crate::trainer::Trainer).
pub type LinearRegression<B> = LinearModel<B, Unfitted>;

impl<B: Backend> LinearRegression<B> {
    /// Creates a model with zero-initialized weights and bias.
    pub fn new(n_features: usize) -> Self {
        Self::from_params(LinearParams {
            weights: Tensor1D::zeros(n_features),
            bias: Scalar::new(0.),
        })
    }

    /// Single-feature model starting from the given `(k, b)`.
    pub fn with_parameters(parameters: Parameters) -> Self {
        Self::from_params(parameters.into())
    }

    pub fn from_params(params: LinearParams<B>) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    // === Parameters ===

    #[test]
    fn test_parameters_predict() {
        let p = Parameters::new(0.07, 0.05);
        assert!((p.predict(10.0) - 0.75).abs() < 1e-12);
        assert_eq!(p.predict(0.0), 0.05);
    }

    #[test]
    fn test_parameters_default_is_zero() {
        assert_eq!(Parameters::default(), Parameters::new(0.0, 0.0));
    }

    #[test]
    fn test_parameters_try_from_multi_feature_fails() {
        let params = LinearParams::<CpuBackend> {
            weights: Tensor1D::new(vec![1.0, 2.0]),
            bias: Scalar::new(0.0),
        };
        let err = Parameters::try_from(&params).unwrap_err();
        assert!(matches!(err, ModelError::NotSingleFeature(2)));
    }

    // === ParamOps ===

    #[test]
    fn test_param_ops_add() {
        let p1 = LinearParams {
            weights: Tensor1D::<CpuBackend>::new(vec![1.0, 2.0]),
            bias: Scalar::<CpuBackend>::new(0.5),
        };
        let p2 = LinearParams {
            weights: Tensor1D::<CpuBackend>::new(vec![0.5, 1.0]),
            bias: Scalar::<CpuBackend>::new(0.5),
        };

        let result = p1.add(&p2);

        assert_eq!(result.weights.to_vec(), vec![1.5, 3.0]);
        assert_eq!(result.bias.to_f64(), 1.0);
    }

    #[test]
    fn test_param_ops_scale_negative() {
        let p = LinearParams {
            weights: Tensor1D::<CpuBackend>::new(vec![2.0]),
            bias: Scalar::<CpuBackend>::new(1.0),
        };

        let result = p.scale(Scalar::<CpuBackend>::new(-1.0));

        assert_eq!(result.weights.to_vec(), vec![-2.0]);
        assert_eq!(result.bias.to_f64(), -1.0);
    }

    // === Model container ===

    #[test]
    fn test_new_is_zero_initialized() {
        let model = LinearRegression::<CpuBackend>::new(1);
        assert_eq!(model.parameters().unwrap(), Parameters::new(0.0, 0.0));
        assert_eq!(model.n_features(), 1);
    }

    #[test]
    fn test_set_parameters_overwrites_both() {
        let mut model = LinearRegression::<CpuBackend>::new(1);
        model.set_parameters(Parameters::new(0.25, -1.5));

        assert_eq!(model.parameters().unwrap(), Parameters::new(0.25, -1.5));
        assert_eq!(model.params().weights.to_vec(), vec![0.25]);
        assert_eq!(model.params().bias.to_f64(), -1.5);
    }

    #[test]
    fn test_parameters_of_multi_feature_model_fails() {
        let model = LinearRegression::<CpuBackend>::new(3);
        assert!(model.parameters().is_err());
    }

    #[test]
    fn test_forward_correctness() {
        let model = LinearRegression::<CpuBackend>::with_parameters(Parameters::new(2.0, 1.0));

        let x = Tensor2D::<CpuBackend>::column(&[0.0, 1.0, 3.0]);
        assert_eq!(model.forward(&x).to_vec(), vec![1.0, 3.0, 7.0]);
    }

    #[test]
    fn test_backward_batch() {
        let model = LinearRegression::<CpuBackend>::new(2);
        // [[1, 2], [3, 4]]
        let x = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        let grad_output = Tensor1D::<CpuBackend>::new(vec![0.5, 0.25]);

        let grads = model.backward(&x, &grad_output);

        // grad_w = Xᵀ @ grad = [1*0.5 + 3*0.25, 2*0.5 + 4*0.25] = [1.25, 2.0]
        // grad_b = 0.75
        assert!((grads.weights.to_vec()[0] - 1.25).abs() < 1e-10);
        assert!((grads.weights.to_vec()[1] - 2.0).abs() < 1e-10);
        assert!((grads.bias.to_f64() - 0.75).abs() < 1e-10);
    }

    // === Fitted ===

    #[test]
    fn test_fitted_predict_single_and_batch() {
        let model = LinearRegression::<CpuBackend>::with_parameters(Parameters::new(0.5, 0.1))
            .into_fitted();

        let single = model.predict(&Tensor1D::new(vec![2.0]));
        assert!((single.to_f64() - 1.1).abs() < 1e-12);

        let batch = model.predict_batch(&Tensor2D::column(&[0.0, 4.0]));
        assert_eq!(batch.to_vec(), vec![0.1, 2.1]);
    }

    #[test]
    fn test_extract_and_from_params() {
        let model = LinearModel::<CpuBackend, Fitted>::from_params(SerializableLinearParams {
            weights: vec![1.5],
            bias: 0.25,
        });

        assert_eq!(model.parameters().unwrap(), Parameters::new(1.5, 0.25));
        assert_eq!(
            model.extract_params(),
            SerializableLinearParams {
                weights: vec![1.5],
                bias: 0.25
            }
        );
    }

    #[test]
    fn test_save_load() -> Result<(), Box<dyn std::error::Error>> {
        let model = LinearRegression::<CpuBackend>::with_parameters(Parameters::new(
            0.0713,
            0.0391,
        ))
        .into_fitted();

        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("model.bin");
        model.save_to_file(&path)?;

        let loaded = LinearModel::<CpuBackend, Fitted>::load_from_file(&path)?;

        // f64 end to end, so the round trip is exact
        assert_eq!(loaded.parameters()?, model.parameters()?);
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = LinearModel::<CpuBackend, Fitted>::load_from_file(tmp.path().join("nope.bin"));
        assert!(matches!(result, Err(crate::error::PersistError::Io(_))));
    }
}
