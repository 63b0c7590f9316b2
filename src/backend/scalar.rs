use crate::backend::Backend;
use std::marker::PhantomData;

/// Scalar operations required by numerical backends.
///
/// Implemented for the primitive floating-point type a backend computes in.
/// Arithmetic comes from the standard operator traits; conversions to and from
/// `f64` are used at the host boundary.
///
/// # Example
/// ```
/// use sizetime::backend::ScalarOps;
///
/// assert_eq!(f64::zero(), 0.0);
/// assert_eq!((-2.0f64).abs(), 2.0);
/// ```
pub trait ScalarOps:
    Clone
    + Copy
    + Send
    + Sync
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Div<Output = Self>
{
    /// Returns the absolute value of the scalar.
    fn abs(self) -> Self;

    /// Returns the additive identity.
    fn zero() -> Self;

    /// Converts an `f64` value to this scalar type.
    fn from_f64(v: f64) -> Self;

    /// Converts this scalar to an `f64` value.
    fn to_f64(self) -> f64;
}

impl ScalarOps for f64 {
    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn zero() -> Self {
        0.0
    }

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Backend-typed scalar wrapper.
///
/// Carries its originating backend as a phantom type so scalars of different
/// backends cannot be mixed.
///
/// # Example
/// ```
/// use sizetime::backend::{CpuBackend, Scalar};
///
/// let s: Scalar<CpuBackend> = Scalar::new(2.0);
/// assert_eq!((s * s).to_f64(), 4.0);
/// ```
#[derive(Clone, Debug, Copy)]
pub struct Scalar<B: Backend> {
    pub(crate) data: B::Scalar,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Scalar<B> {
    /// Creates a new scalar from an `f64` host value.
    pub fn new(f: f64) -> Self {
        Self {
            data: B::scalar_f64(f),
            backend: PhantomData,
        }
    }

    /// Converts this backend scalar to a host `f64` value.
    pub fn to_f64(&self) -> f64 {
        self.data.to_f64()
    }

    pub fn abs(&self) -> Self {
        Self {
            data: self.data.abs(),
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Add for Scalar<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            data: self.data + rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Sub for Scalar<B> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            data: self.data - rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Mul for Scalar<B> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            data: self.data * rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Div for Scalar<B> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self {
            data: self.data / rhs.data,
            backend: PhantomData,
        }
    }
}
