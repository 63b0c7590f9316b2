use super::tensor1d::Tensor1D;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 2D tensor in row-major layout.
#[derive(Clone, Debug)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor2D<B> {
    /// Creates a tensor from row-major host values.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self {
            data: B::from_vec_2d(data, rows, cols),
            backend: PhantomData,
        }
    }

    /// Builds an `(n, 1)` column from a slice of values.
    pub fn column(values: &[f64]) -> Self {
        Self::new(values.to_vec(), values.len(), 1)
    }

    /// Matrix-vector product `self @ other`.
    pub fn dot(&self, other: &Tensor1D<B>) -> Tensor1D<B> {
        Tensor1D::wrap(B::matvec(&self.data, &other.data))
    }

    /// Transposed matrix-vector product `selfᵀ @ other`.
    pub fn tdot(&self, other: &Tensor1D<B>) -> Tensor1D<B> {
        Tensor1D::wrap(B::matvec_transposed(&self.data, &other.data))
    }

    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }
}
