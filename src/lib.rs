//! Single-qubit quantum state evolution in the density matrix formalism.
//!
//! `qevolve` simulates one qubit under a sequence of unitary gates and
//! noisy channels. States are 2x2 density matrices, gates act by
//! conjugation (ρ → U ρ U†) and noise channels by Kraus sums
//! (ρ → Σ K_i ρ K_i†). After every step the engine reports a Bloch vector
//! and a JSON-safe serialized density matrix.
//!
//! # Example
//!
//! ```
//! use qevolve::{Step, run_circuit};
//!
//! let steps = [
//!     Step::gate("H"),
//!     Step::noise("amplitude_damping").with_param("gamma", 0.2),
//! ];
//!
//! let observations = run_circuit(&steps).unwrap();
//! assert_eq!(observations.len(), 2);
//! assert!((observations[0].bloch_vector.x - 1.0).abs() < 1e-9);
//! ```

pub mod circuit;
mod core;

pub use crate::circuit::{GateOp, NoiseOp, Operation, Step, run_circuit, run_circuit_on};
pub use crate::core::{
    BlochVector, DensityMatrixParts, Gate, HistoryPolicy, Observation, QuantumChannel,
    QuantumState, bloch_vector, density_matrix_from_parts, errors, serialize_density_matrix, utils,
};
