//! Post-training evaluation: held-out loss and point predictions.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::dataset::Dataset;
use crate::error::TrainError;
use crate::loss::Loss;
use crate::model::InferenceModel;
use serde::{Deserialize, Serialize};

/// Predicted processing time for one file size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizePrediction {
    pub size_mb: f64,
    pub time_sec: f64,
}

/// Loss of `model` over the whole of `dataset`, computed as one batch.
pub fn evaluate<B, M, L, D>(model: &M, dataset: &D, loss_fn: &L) -> Result<f64, TrainError>
where
    B: Backend,
    M: InferenceModel<B, InputBatch = Tensor2D<B>, OutputBatch = Tensor1D<B>>,
    L: Loss<B, Prediction = Tensor1D<B>, Target = Tensor1D<B>>,
    D: Dataset,
{
    let n = dataset.len().ok_or(TrainError::UnknownLength)?;
    if n == 0 {
        return Err(TrainError::EmptyDataset);
    }
    let (x, y) = dataset
        .get_batch::<B>(0..n)
        .map_err(|e| TrainError::Data(format!("{e:?}")))?;

    let preds = model.predict_batch(&x);
    Ok(loss_fn.loss(&preds, &y).to_f64())
}

/// Predicts the processing time of each size in `sizes_mb`, in order.
pub fn predict_sizes<B, M>(model: &M, sizes_mb: &[f64]) -> Vec<SizePrediction>
where
    B: Backend,
    M: InferenceModel<B, InputBatch = Tensor2D<B>, OutputBatch = Tensor1D<B>>,
{
    if sizes_mb.is_empty() {
        return Vec::new();
    }
    let times = model.predict_batch(&Tensor2D::column(sizes_mb)).to_vec();
    sizes_mb
        .iter()
        .zip(times)
        .map(|(&size_mb, time_sec)| SizePrediction { size_mb, time_sec })
        .collect()
}
