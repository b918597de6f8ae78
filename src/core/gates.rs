use crate::core::errors::GateError;
use crate::core::utils;
use ndarray::{Array2, arr2};
use num_complex::Complex64;

/// Represents a single-qubit quantum gate.
///
/// A gate is defined by its 2x2 unitary matrix and acts on a density matrix
/// by conjugation: ρ → U ρ U†.
#[derive(Clone, Debug)]
pub struct Gate {
    /// The unitary matrix of the gate.
    pub matrix: Array2<Complex64>,
}

impl Gate {
    /// Creates a new `Gate` from a unitary matrix.
    ///
    /// # Arguments
    ///
    /// * `matrix` - A 2x2, unitary `Array2<Complex64>`.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if:
    /// - The matrix is not square.
    /// - The matrix is not 2x2.
    /// - The matrix is not unitary.
    pub fn new(matrix: Array2<Complex64>) -> Result<Self, GateError> {
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(GateError::NotSquareMatrix);
        }

        if rows != 2 {
            return Err(GateError::InvalidDimensions);
        }

        if !Self::check_unitary(&matrix) {
            return Err(GateError::NonUnitary);
        }

        Ok(Self { matrix })
    }

    /// Checks if a given matrix is unitary
    fn check_unitary(matrix: &Array2<Complex64>) -> bool {
        let (rows, _) = matrix.dim();
        let eye = Array2::<Complex64>::eye(rows);

        let product = matrix.dot(&utils::adjoint(matrix));

        product
            .iter()
            .zip(eye.iter())
            .all(|(a, b)| (*a - *b).norm() < 1e-6)
    }

    // --- Standard Gates ---

    /// Creates an Identity gate.
    pub fn i() -> Gate {
        Gate::new(arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ]))
        .unwrap()
    }

    /// Creates a Pauli-X gate (NOT gate).
    pub fn x() -> Gate {
        Gate::new(arr2(&[
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        ]))
        .unwrap()
    }

    /// Creates a Pauli-Y gate.
    pub fn y() -> Gate {
        Gate::new(arr2(&[
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, -1.0)],
            [Complex64::new(0.0, 1.0), Complex64::new(0.0, 0.0)],
        ]))
        .unwrap()
    }

    /// Creates a Pauli-Z gate.
    pub fn z() -> Gate {
        Gate::new(arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)],
        ]))
        .unwrap()
    }

    /// Creates a Hadamard gate.
    pub fn h() -> Gate {
        let factor = 1.0 / 2.0_f64.sqrt();
        Gate::new(arr2(&[
            [Complex64::new(factor, 0.0), Complex64::new(factor, 0.0)],
            [Complex64::new(factor, 0.0), Complex64::new(-factor, 0.0)],
        ]))
        .unwrap()
    }

    // --- Rotation Gates ---

    /// Creates a rotation of `theta` radians about the X axis.
    pub fn rx(theta: f64) -> Gate {
        let half = theta / 2.0;
        Gate::new(arr2(&[
            [
                Complex64::new(half.cos(), 0.0),
                Complex64::new(0.0, -half.sin()),
            ],
            [
                Complex64::new(0.0, -half.sin()),
                Complex64::new(half.cos(), 0.0),
            ],
        ]))
        .unwrap()
    }

    /// Creates a rotation of `theta` radians about the Y axis.
    pub fn ry(theta: f64) -> Gate {
        let half = theta / 2.0;
        Gate::new(arr2(&[
            [
                Complex64::new(half.cos(), 0.0),
                Complex64::new(-half.sin(), 0.0),
            ],
            [
                Complex64::new(half.sin(), 0.0),
                Complex64::new(half.cos(), 0.0),
            ],
        ]))
        .unwrap()
    }

    /// Creates a rotation of `theta` radians about the Z axis.
    ///
    /// Global-phase-free form: diag(e^{-iθ/2}, e^{iθ/2}).
    pub fn rz(theta: f64) -> Gate {
        let half = theta / 2.0;
        Gate::new(arr2(&[
            [Complex64::from_polar(1.0, -half), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::from_polar(1.0, half)],
        ]))
        .unwrap()
    }
}
