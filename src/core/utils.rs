//! Matrix helpers shared by the gate, channel and observation code.
//!
//! This module contains helper functions for:
//! - Basic matrix operations (trace, conjugate transpose).
//! - Completeness checks for Kraus operator sets.
//! - Hermiticity checks for density matrices.

use ndarray::Array2;
use num_complex::Complex64;

/// Computes the trace of a matrix (sum of diagonal elements).
pub fn trace(matrix: &Array2<Complex64>) -> Complex64 {
    matrix.diag().sum()
}

/// Computes the conjugate transpose M† of a matrix.
pub fn adjoint(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    matrix.t().mapv(|c| c.conj())
}

/// Checks the trace-preserving relation for Kraus operators.
///
/// Verifies if $\sum K_i^\dagger K_i = I$.
pub fn check_completeness(ops: &[Array2<Complex64>], dim: usize) -> bool {
    let eye = Array2::<Complex64>::eye(dim);
    let sum = ops
        .iter()
        .fold(Array2::<Complex64>::zeros((dim, dim)), |acc, op| {
            acc + adjoint(op).dot(op)
        });
    sum.iter()
        .zip(eye.iter())
        .all(|(a, b)| (a - b).norm() < 1e-9)
}

/// Checks if a matrix is Hermitian
pub fn is_hermitian(mat: &Array2<Complex64>, tol: f64) -> bool {
    mat.iter()
        .zip(mat.t().iter())
        .all(|(a, b)| (a - b.conj()).norm() < tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn trace_sums_the_diagonal() {
        let m = arr2(&[
            [Complex64::new(0.25, 0.0), Complex64::new(3.0, -1.0)],
            [Complex64::new(-2.0, 5.0), Complex64::new(0.75, 0.5)],
        ]);
        let tr = trace(&m);
        assert!((tr - Complex64::new(1.0, 0.5)).norm() < TOLERANCE);
    }

    #[test]
    fn adjoint_conjugates_and_transposes() {
        let m = arr2(&[
            [Complex64::new(1.0, 2.0), Complex64::new(3.0, 4.0)],
            [Complex64::new(5.0, 6.0), Complex64::new(7.0, 8.0)],
        ]);
        let dag = adjoint(&m);
        assert_eq!(dag[[0, 1]], Complex64::new(5.0, -6.0));
        assert_eq!(dag[[1, 0]], Complex64::new(3.0, -4.0));
        assert_eq!(dag[[0, 0]], Complex64::new(1.0, -2.0));
    }

    #[test]
    fn identity_alone_is_complete() {
        let ops = vec![Array2::<Complex64>::eye(2)];
        assert!(check_completeness(&ops, 2));
    }

    #[test]
    fn scaled_identity_is_not_complete() {
        let half = Array2::<Complex64>::eye(2).mapv(|c| c * Complex64::new(0.5, 0.0));
        assert!(!check_completeness(&[half], 2));
    }

    #[test]
    fn hermiticity_check() {
        let herm = arr2(&[
            [Complex64::new(0.5, 0.0), Complex64::new(0.1, -0.2)],
            [Complex64::new(0.1, 0.2), Complex64::new(0.5, 0.0)],
        ]);
        assert!(is_hermitian(&herm, 1e-9));

        let not_herm = arr2(&[
            [Complex64::new(0.5, 0.0), Complex64::new(0.1, 0.2)],
            [Complex64::new(0.1, 0.2), Complex64::new(0.5, 0.0)],
        ]);
        assert!(!is_hermitian(&not_herm, 1e-9));
    }
}
