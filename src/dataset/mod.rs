//! Dataset abstractions.
//!
//! A [`Dataset`] yields `(X, y)` batches where `X` has shape `(n_samples, n_features)`
//! and `y` has shape `(n_samples,)`. [`DatasetBatchIter`] walks a dataset in
//! contiguous, fixed-size batches.
//!
//! # Example
//!
//! ```rust
//! use sizetime::dataset::{Dataset, InMemoryDataset};
//! use sizetime::backend::CpuBackend;
//!
//! let x = vec![vec![1.0], vec![2.0]];
//! let y = vec![0.0, 1.0];
//! let dataset = InMemoryDataset::new(x, y).unwrap();
//!
//! for batch in dataset.batches::<CpuBackend>(1) {
//!     let (x_batch, y_batch) = batch.unwrap();
//!     assert_eq!(x_batch.shape().0, y_batch.len());
//! }
//! ```

use crate::backend::{Backend, Tensor1D, Tensor2D};
use std::{fmt::Debug, ops::Range};

pub mod memory;
pub mod series;

pub use self::memory::InMemoryDataset;
pub use self::series::{Sample, Series};

/// Abstract interface for a regression dataset.
pub trait Dataset {
    /// Error type returned when accessing data.
    type Error: Debug + 'static;

    /// Returns the total number of samples, or `None` if unknown (e.g. streams).
    fn len(&self) -> Option<usize>;

    /// Checks whether the dataset is known to be empty.
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Creates an iterator over fixed-size batches; the last batch may be smaller.
    fn batches<B: Backend>(&self, batch_size: usize) -> DatasetBatchIter<'_, B, Self>
    where
        Self: Sized,
    {
        DatasetBatchIter {
            dataset: self,
            batch_size,
            current: 0,
            _backend: std::marker::PhantomData,
        }
    }

    /// Loads the samples in `range` as tensors.
    fn get_batch<B: Backend>(
        &self,
        range: Range<usize>,
    ) -> Result<(Tensor2D<B>, Tensor1D<B>), Self::Error>;
}

/// Iterator over dataset batches, created by [`Dataset::batches`].
///
/// Yields nothing for datasets of unknown length, and stops once every sample
/// has been handed out.
pub struct DatasetBatchIter<'a, B: Backend, D: ?Sized> {
    dataset: &'a D,
    batch_size: usize,
    /// Index of the next sample to yield.
    current: usize,
    _backend: std::marker::PhantomData<B>,
}

impl<B: Backend, D: Dataset> Iterator for DatasetBatchIter<'_, B, D> {
    type Item = Result<(Tensor2D<B>, Tensor1D<B>), D::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.dataset.len()?;
        if self.current >= total || self.batch_size == 0 {
            return None;
        }

        let end = (self.current + self.batch_size).min(total);
        let range = self.current..end;
        self.current = end;

        Some(self.dataset.get_batch::<B>(range))
    }
}
