use super::Backend;
use ndarray::{Array1, Array2};

/// Backend implemented on top of the `ndarray` crate.
///
/// # Type mappings
/// - `Scalar`: `f64`
/// - `Tensor1D`: `ndarray::Array1<f64>`
/// - `Tensor2D`: [`NdarrayTensor2D`] wrapper around `ndarray::Array2<f64>`
#[derive(Clone, Debug, Copy)]
pub struct NdarrayBackend;

/// Wrapper type for 2D tensors using ndarray's `Array2<f64>`.
#[derive(Debug, Clone)]
pub struct NdarrayTensor2D(pub Array2<f64>);

impl Backend for NdarrayBackend {
    type Scalar = f64;
    type Tensor1D = Array1<f64>;
    type Tensor2D = NdarrayTensor2D;

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        Array1::zeros(len)
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        Array1::from_vec(data)
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        let array = Array2::from_shape_vec((rows, cols), data)
            .unwrap_or_else(|e| panic!("Inconsistent shape ({rows}, {cols}): {e}"));
        NdarrayTensor2D(array)
    }

    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a + b
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a - b
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a * b
    }

    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t * *s
    }

    fn add_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t + *s
    }

    fn abs_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(f64::abs)
    }

    fn sign_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(|x| {
            if x > 0.0 {
                1.0
            } else if x < 0.0 {
                -1.0
            } else {
                0.0
            }
        })
    }

    fn mean_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.sum() / t.len() as f64
    }

    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.sum()
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.to_vec()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        a.0.dot(x)
    }

    fn matvec_transposed(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        a.0.t().dot(x)
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.0.dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_matches_cpu_backend() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let v = vec![1.0, 0.0, 2.0];

        let cpu = CpuBackend::matvec_transposed(&CpuBackend::from_vec_2d(data.clone(), 3, 2), &v);
        let nd = NdarrayBackend::matvec_transposed(
            &NdarrayBackend::from_vec_2d(data, 3, 2),
            &NdarrayBackend::from_vec_1d(v),
        );

        assert_eq!(cpu, nd.to_vec());
    }

    #[test]
    fn test_sign_and_mean() {
        let t = NdarrayBackend::from_vec_1d(vec![-2.0, 0.0, 4.0]);
        assert_eq!(NdarrayBackend::sign_1d(&t).to_vec(), vec![-1.0, 0.0, 1.0]);
        assert!((NdarrayBackend::mean_all_1d(&t) - 2.0 / 3.0).abs() < 1e-12);
    }
}
