//! Derived views of a density matrix: Bloch vector and a JSON-safe
//! serialized form.
//!
//! Both views are computed on demand and never stored. The Pauli matrices
//! used for the Bloch components come from the gate catalog, so the sign
//! conventions cannot drift from the operators themselves.

use crate::core::gates::Gate;
use crate::core::utils;
use ndarray::{Array2, arr2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Serialized density matrix: row-major 2x2 cells of (real, imaginary).
pub type DensityMatrixParts = [[[f64; 2]; 2]; 2];

/// A point in the Bloch ball.
///
/// Pure states sit on the unit sphere; mixed states lie strictly inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochVector {
    /// The Euclidean length of the vector: 1 for pure states, shorter for
    /// mixed ones.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Computes the Bloch vector (Tr(ρX), Tr(ρY), Tr(ρZ)) of a density matrix.
///
/// For a Hermitian ρ the three traces are real; the imaginary parts are
/// discarded.
pub fn bloch_vector(rho: &Array2<Complex64>) -> BlochVector {
    let x = utils::trace(&rho.dot(&Gate::x().matrix));
    let y = utils::trace(&rho.dot(&Gate::y().matrix));
    let z = utils::trace(&rho.dot(&Gate::z().matrix));

    debug_assert!(
        x.im.abs() < 1e-9 && y.im.abs() < 1e-9 && z.im.abs() < 1e-9,
        "Pauli traces of a Hermitian matrix must be real"
    );

    BlochVector {
        x: x.re,
        y: y.re,
        z: z.re,
    }
}

/// Serializes a density matrix into nested (real, imaginary) pairs.
///
/// Row-major, top row first, left column first within each row.
pub fn serialize_density_matrix(rho: &Array2<Complex64>) -> DensityMatrixParts {
    let mut parts = [[[0.0; 2]; 2]; 2];
    for row in 0..2 {
        for col in 0..2 {
            let cell = rho[[row, col]];
            parts[row][col] = [cell.re, cell.im];
        }
    }
    parts
}

/// Rebuilds a density matrix from its serialized parts.
pub fn density_matrix_from_parts(parts: &DensityMatrixParts) -> Array2<Complex64> {
    arr2(&[
        [
            Complex64::new(parts[0][0][0], parts[0][0][1]),
            Complex64::new(parts[0][1][0], parts[0][1][1]),
        ],
        [
            Complex64::new(parts[1][0][0], parts[1][0][1]),
            Complex64::new(parts[1][1][0], parts[1][1][1]),
        ],
    ])
}

/// The externally visible summary of a state after one evolution step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub bloch_vector: BlochVector,
    pub density_matrix: DensityMatrixParts,
}

impl Observation {
    /// Derives the observation of a density matrix.
    pub fn of(rho: &Array2<Complex64>) -> Self {
        Self {
            bloch_vector: bloch_vector(rho),
            density_matrix: serialize_density_matrix(rho),
        }
    }
}
