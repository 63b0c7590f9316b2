//! Models with compile-time training state.
//!
//! Training goes through [`TrainableModel`]; once converted with
//! [`TrainableModel::into_fitted`], the model only exposes [`InferenceModel`].

pub mod linear;
pub mod state;

pub use self::linear::{LinearModel, LinearParams, LinearRegression, Parameters};
pub use self::state::{Fitted, Unfitted};

use crate::backend::{Backend, Scalar};
use crate::error::PersistError;
use crate::serialization::SerializableParams;
use std::path::Path;

/// A model that can be optimized by gradient descent.
pub trait TrainableModel<B: Backend> {
    type Input;
    type Prediction;
    type Params;
    type Gradients;
    type Output;

    /// Computes predictions for a batch.
    fn forward(&self, input: &Self::Input) -> Self::Prediction;

    /// Gradients of the loss w.r.t. the parameters, given `∂L/∂pred`.
    fn backward(&self, input: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients;

    fn params(&self) -> &Self::Params;

    fn update_params(&mut self, new_params: &Self::Params);

    /// Drops training-only state and returns the inference form.
    fn into_fitted(self) -> Self::Output;
}

/// Arithmetic on parameter sets, used by optimizers.
pub trait ParamOps<B: Backend>: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, scalar: Scalar<B>) -> Self;
}

/// A trained model usable for prediction and persistence.
pub trait InferenceModel<B: Backend> {
    type InputSingle;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;
    /// Plain-data parameter representation used for persistence.
    type ParamsRepr: SerializableParams;

    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle;

    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch;

    fn extract_params(&self) -> Self::ParamsRepr;

    fn from_params(params: Self::ParamsRepr) -> Self
    where
        Self: Sized;

    /// Writes the parameters to `path`.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistError> {
        let bytes = self.extract_params().to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Reads a model previously written with [`InferenceModel::save_to_file`].
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::ParamsRepr::from_bytes(&bytes)?;
        Ok(Self::from_params(params))
    }
}
