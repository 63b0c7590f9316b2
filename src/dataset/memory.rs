use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::dataset::Dataset;
use crate::error::DatasetError;
use std::ops::Range;

/// Dataset held entirely in memory as feature rows and targets.
#[derive(Clone, Debug)]
pub struct InMemoryDataset {
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
}

impl InMemoryDataset {
    /// Builds a dataset, checking that it is non-empty and rectangular.
    pub fn new(x: Vec<Vec<f64>>, y: Vec<f64>) -> Result<Self, DatasetError> {
        if x.len() != y.len() {
            return Err(DatasetError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(DatasetError::Empty);
        }
        let n_features = x[0].len();
        if !x.iter().all(|row| row.len() == n_features) {
            return Err(DatasetError::RaggedRows);
        }
        Ok(Self { x, y })
    }

    pub fn n_features(&self) -> usize {
        self.x[0].len()
    }
}

impl Dataset for InMemoryDataset {
    type Error = std::convert::Infallible;

    fn len(&self) -> Option<usize> {
        Some(self.x.len())
    }

    fn get_batch<B: Backend>(
        &self,
        range: Range<usize>,
    ) -> Result<(Tensor2D<B>, Tensor1D<B>), Self::Error> {
        let batch_x = &self.x[range.clone()];
        let batch_y = &self.y[range];

        let data = batch_x.iter().flat_map(|row| row.iter()).copied().collect();
        let x_tensor = Tensor2D::<B>::new(data, batch_x.len(), self.n_features());
        let y_tensor = Tensor1D::<B>::new(batch_y.to_vec());

        Ok((x_tensor, y_tensor))
    }
}
