use super::scalar::Scalar;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 1D tensor.
///
/// Wraps a backend's native 1D tensor (`B::Tensor1D`) and carries the backend as a
/// phantom type. All operations delegate to the backend.
///
/// # Example
/// ```
/// use sizetime::backend::{CpuBackend, Scalar, Tensor1D};
///
/// let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0, 3.0]);
/// let y = x.scale(&Scalar::<CpuBackend>::new(2.0));
/// assert_eq!(y.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor1D<B> {
    /// Creates a new 1D tensor from host values.
    pub fn new(data: Vec<f64>) -> Self {
        Self::wrap(B::from_vec_1d(data))
    }

    /// Creates a 1D tensor filled with zeros.
    pub fn zeros(len: usize) -> Self {
        Self::wrap(B::zeros_1d(len))
    }

    pub(crate) fn wrap(data: B::Tensor1D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Element-wise `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Self::wrap(B::sub_1d(&self.data, &other.data))
    }

    /// Element-wise `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        Self::wrap(B::add_1d(&self.data, &other.data))
    }

    /// Arithmetic mean of all elements.
    pub fn mean(&self) -> Scalar<B> {
        Scalar {
            data: B::mean_all_1d(&self.data),
            backend: PhantomData,
        }
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Scalar<B> {
        Scalar {
            data: B::sum_all_1d(&self.data),
            backend: PhantomData,
        }
    }

    /// Copies the tensor to a host `Vec<f64>`.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }

    /// Dot product `Σᵢ aᵢ * bᵢ`.
    ///
    /// # Example
    /// ```
    /// use sizetime::backend::{CpuBackend, Tensor1D};
    ///
    /// let a = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0, 3.0]);
    /// let b = Tensor1D::<CpuBackend>::new(vec![4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).to_f64(), 32.0);
    /// ```
    pub fn dot(&self, other: &Self) -> Scalar<B> {
        let prod = B::mul_1d(&self.data, &other.data);
        Scalar {
            data: B::sum_all_1d(&prod),
            backend: PhantomData,
        }
    }

    pub fn abs(&self) -> Self {
        Self::wrap(B::abs_1d(&self.data))
    }

    pub fn sign(&self) -> Self {
        Self::wrap(B::sign_1d(&self.data))
    }

    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Multiplies every element by `a`.
    pub fn scale(&self, a: &Scalar<B>) -> Self {
        Self::wrap(B::mul_scalar_1d(&self.data, &a.data))
    }

    /// Adds `a` to every element.
    pub fn add_scalar(&self, a: &Scalar<B>) -> Self {
        Self::wrap(B::add_scalar_1d(&self.data, &a.data))
    }
}
