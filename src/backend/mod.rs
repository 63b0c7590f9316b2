//! # Backend Abstraction
//!
//! Trait-based abstraction over the numerical layer, so the model, loss and
//! optimizer code is written once and runs on any tensor implementation.
//!
//! ## Design
//!
//! - **Minimal trait surface**: only the operations linear regression needs are
//!   exposed, keeping backend implementations small and testable.
//! - **Compile-time selection**: the backend is a type parameter, so there is no
//!   runtime dispatch.
//! - **Typed wrappers**: [`Scalar`], [`Tensor1D`] and [`Tensor2D`] carry the backend
//!   as a phantom type, so values from different backends cannot be mixed.
//!
//! ## Available Backends
//!
//! | Backend          | Feature   | Use Case                          |
//! |------------------|-----------|-----------------------------------|
//! | `CpuBackend`     | (always)  | Default, pure-Rust implementation |
//! | `NdarrayBackend` | `ndarray` | Backed by the `ndarray` crate     |
//!
//! ## Example
//!
//! ```rust
//! use sizetime::backend::{CpuBackend, Tensor1D, Tensor2D};
//!
//! let x: Tensor2D<CpuBackend> = Tensor2D::new(vec![1.0, 2.0, 3.0], 3, 1);
//! let w: Tensor1D<CpuBackend> = Tensor1D::new(vec![0.5]);
//! assert_eq!(x.dot(&w).to_vec(), vec![0.5, 1.0, 1.5]);
//! ```

pub mod cpu;
/// Pure-Rust CPU backend.
pub use cpu::{CpuBackend, CpuTensor2D};

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate.
pub use ndarray_backend::{NdarrayBackend, NdarrayTensor2D};

/// Scalar value representation and arithmetic operations.
pub mod scalar;
/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use scalar::{Scalar, ScalarOps};
pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over tensor storage and the operations used for training and inference.
///
/// All values are stored in double precision. Element-wise operations on tensors of
/// different lengths are a programming error and panic.
pub trait Backend: Clone + Copy + std::fmt::Debug + 'static {
    /// Scalar type supporting arithmetic operations.
    type Scalar: ScalarOps;

    /// One-dimensional tensor type.
    type Tensor1D: Clone + std::fmt::Debug + Send + Sync;

    /// Two-dimensional tensor type.
    type Tensor2D: Clone + std::fmt::Debug + Send + Sync;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros of given length.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Constructs a 1D tensor from owned data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major ordered data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D;

    // --- Element-wise operations (1D) ---

    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Multiplies each element of tensor by a scalar.
    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    /// Adds a scalar to each element of tensor.
    fn add_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    /// Element-wise absolute value.
    fn abs_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise sign function: returns -1.0, 0.0, or 1.0.
    ///
    /// Zero maps to zero, which is the subgradient used by the MAE loss.
    fn sign_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    // --- Reductions ---

    /// Arithmetic mean of all elements.
    fn mean_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    /// Sum of all elements.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    // --- Scalars and data access ---

    /// Creates a backend-specific scalar from an f64 value.
    fn scalar_f64(value: f64) -> Self::Scalar;

    /// Copies a 1D tensor to the host.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Returns the number of elements in a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;

    // --- Linear algebra ---

    /// Computes `A @ x` where `A` is (m × n) and `x` is (n,).
    ///
    /// # Panics
    /// If `A.cols() != x.len()`.
    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D;

    /// Computes `Aᵀ @ x` where `A` is (m × n) and `x` is (m,).
    ///
    /// # Panics
    /// If `A.rows() != x.len()`.
    fn matvec_transposed(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D;

    /// Returns the shape of a 2D tensor as (rows, cols).
    fn shape(t: &Self::Tensor2D) -> (usize, usize);
}
