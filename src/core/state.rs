use crate::core::channels::QuantumChannel;
use crate::core::errors::{ChannelError, StateError};
use crate::core::gates::Gate;
use crate::core::utils;
use ndarray::{Array2, arr2};
use num_complex::Complex64;
use std::collections::VecDeque;

/// Snapshot retention for the evolution history.
///
/// Keeping every snapshot grows linearly with the number of applied steps;
/// long-running sessions can bound or disable retention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Keep every snapshot.
    #[default]
    KeepAll,
    /// Keep only the most recent `n` snapshots.
    Bounded(usize),
    /// Record nothing.
    Disabled,
}

/// Represents a single-qubit quantum state in the density matrix formalism.
///
/// - The state starts in the ground state |0><0|.
/// - Evolves only through [`apply_gate`](QuantumState::apply_gate) and
///   [`apply_kraus`](QuantumState::apply_kraus) /
///   [`apply_channel`](QuantumState::apply_channel).
/// - Every mutation records a deep-copy snapshot of the new state, subject
///   to the configured [`HistoryPolicy`].
///
/// A `QuantumState` belongs to exactly one logical session; there is no
/// internal locking. Concurrent evaluations each own their own instance.
#[derive(Clone, Debug)]
pub struct QuantumState {
    density_matrix: Array2<Complex64>,
    history: VecDeque<Array2<Complex64>>,
    policy: HistoryPolicy,
}

/// The ground state |0><0|.
fn ground() -> Array2<Complex64> {
    arr2(&[
        [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
    ])
}

impl Default for QuantumState {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumState {
    /// Creates a new quantum state initialized to |0><0|.
    pub fn new() -> Self {
        Self {
            density_matrix: ground(),
            history: VecDeque::new(),
            policy: HistoryPolicy::KeepAll,
        }
    }

    /// Creates a ground state with the given history retention.
    pub fn with_history_policy(policy: HistoryPolicy) -> Self {
        Self {
            policy,
            ..Self::new()
        }
    }

    /// Creates a `QuantumState` from a custom density matrix.
    ///
    /// # Errors
    ///
    /// Returns a `StateError` if the matrix is not 2x2, not Hermitian, or
    /// does not have unit trace.
    pub fn from_density_matrix(matrix: Array2<Complex64>) -> Result<Self, StateError> {
        Self::check_density_matrix(&matrix)?;

        Ok(Self {
            density_matrix: matrix,
            history: VecDeque::new(),
            policy: HistoryPolicy::KeepAll,
        })
    }

    /// Checks the validity of a density matrix
    fn check_density_matrix(matrix: &Array2<Complex64>) -> Result<(), StateError> {
        let (rows, cols) = matrix.dim();

        if (rows, cols) != (2, 2) {
            return Err(StateError::DimensionMismatch { rows, cols });
        }

        let tr = utils::trace(matrix);
        if (tr - Complex64::new(1.0, 0.0)).norm() > 1e-9 {
            return Err(StateError::InvalidTrace(tr));
        }

        if !utils::is_hermitian(matrix, 1e-9) {
            return Err(StateError::NotHermitian);
        }

        Ok(())
    }

    /// The current density matrix.
    pub fn density_matrix(&self) -> &Array2<Complex64> {
        &self.density_matrix
    }

    /// Recorded snapshots of past states, oldest first.
    pub fn history(&self) -> &VecDeque<Array2<Complex64>> {
        &self.history
    }

    /// Resets the state back to the ground state |0><0|.
    ///
    /// The history is cleared as well: snapshots describe the trajectory of
    /// the current evolution, so they do not outlive it.
    pub fn reset(&mut self) {
        self.density_matrix = ground();
        self.history.clear();
    }

    /// Applies a unitary gate to the quantum state.
    ///
    /// Transformation: ρ → U ρ U†.
    ///
    /// A [`Gate`] carries a 2x2 unitary by construction, so application
    /// cannot fail.
    pub fn apply_gate(&mut self, gate: &Gate) {
        let u_rho = gate.matrix.dot(&self.density_matrix);
        self.density_matrix = u_rho.dot(&utils::adjoint(&gate.matrix));
        self.record();
    }

    /// Applies a noise channel defined by a set of Kraus operators.
    ///
    /// Transformation: ρ → Σ K_i ρ K_i†.
    ///
    /// Completeness of the set (Σ K_i† K_i = I) is the caller's
    /// responsibility; the constructors on [`QuantumChannel`] always supply
    /// valid sets.
    ///
    /// # Errors
    ///
    /// Returns a `StateError` if the set is empty or an operator is not 2x2.
    pub fn apply_kraus(&mut self, kraus_ops: &[Array2<Complex64>]) -> Result<(), StateError> {
        if kraus_ops.is_empty() {
            return Err(ChannelError::Empty.into());
        }

        for op in kraus_ops {
            let (rows, cols) = op.dim();
            if (rows, cols) != (2, 2) {
                return Err(StateError::DimensionMismatch { rows, cols });
            }
        }

        let mut new_rho = Array2::<Complex64>::zeros((2, 2));

        // Apply Kraus operators and sum
        for k in kraus_ops {
            let term = k.dot(&self.density_matrix).dot(&utils::adjoint(k));
            new_rho = new_rho + term;
        }

        self.density_matrix = new_rho;
        self.record();

        Ok(())
    }

    /// Applies a [`QuantumChannel`] to the state.
    pub fn apply_channel(&mut self, channel: &QuantumChannel) -> Result<(), StateError> {
        self.apply_kraus(&channel.kraus_ops)
    }

    /// Records a snapshot of the current state according to the policy.
    fn record(&mut self) {
        match self.policy {
            HistoryPolicy::KeepAll => self.history.push_back(self.density_matrix.clone()),
            HistoryPolicy::Bounded(cap) => {
                if cap == 0 {
                    return;
                }
                if self.history.len() == cap {
                    self.history.pop_front();
                }
                self.history.push_back(self.density_matrix.clone());
            }
            HistoryPolicy::Disabled => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::f64::consts::TAU;

    const TOLERANCE: f64 = 1e-9;

    fn assert_matrices_close(a: &Array2<Complex64>, b: &Array2<Complex64>) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).norm() < TOLERANCE, "{} != {}", x, y);
        }
    }

    #[test]
    fn identity_leaves_state_unchanged() {
        let mut state = QuantumState::new();
        state.reset();
        state.apply_gate(&Gate::i());
        assert_matrices_close(state.density_matrix(), &ground());
    }

    #[test]
    fn pauli_x_flips_ground_to_excited() {
        let mut state = QuantumState::new();
        state.apply_gate(&Gate::x());

        let excited = arr2(&[
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ]);
        assert_matrices_close(state.density_matrix(), &excited);
    }

    #[test]
    fn unitaries_preserve_trace_and_hermiticity() {
        let mut rng = rand::rng();
        let mut state = QuantumState::new();

        for _ in 0..32 {
            let theta: f64 = rng.random_range(0.0..TAU);
            let gate = match rng.random_range(0..3) {
                0 => Gate::rx(theta),
                1 => Gate::ry(theta),
                _ => Gate::rz(theta),
            };
            state.apply_gate(&gate);

            let tr = utils::trace(state.density_matrix());
            assert!((tr - Complex64::new(1.0, 0.0)).norm() < TOLERANCE);
            assert!(utils::is_hermitian(state.density_matrix(), TOLERANCE));
        }
    }

    #[test]
    fn zero_strength_channels_are_identity_maps() {
        for channel in [
            QuantumChannel::amplitude_damping(0.0),
            QuantumChannel::phase_damping(0.0),
            QuantumChannel::depolarizing(0.0),
        ] {
            let mut state = QuantumState::new();
            state.apply_gate(&Gate::h());
            let before = state.density_matrix().clone();

            state.apply_channel(&channel).unwrap();
            assert_matrices_close(state.density_matrix(), &before);
        }
    }

    #[test]
    fn full_amplitude_damping_decays_excited_to_ground() {
        let mut state = QuantumState::new();
        state.apply_gate(&Gate::x());

        state
            .apply_channel(&QuantumChannel::amplitude_damping(1.0))
            .unwrap();
        assert_matrices_close(state.density_matrix(), &ground());
    }

    #[test]
    fn full_depolarizing_yields_maximally_mixed() {
        let mut state = QuantumState::new();
        state.apply_gate(&Gate::h());

        state
            .apply_channel(&QuantumChannel::depolarizing(1.0))
            .unwrap();

        let mixed = arr2(&[
            [Complex64::new(0.5, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(0.5, 0.0)],
        ]);
        assert_matrices_close(state.density_matrix(), &mixed);
    }

    #[test]
    fn channels_preserve_trace() {
        for channel in [
            QuantumChannel::amplitude_damping(0.35),
            QuantumChannel::phase_damping(0.2),
            QuantumChannel::depolarizing(0.6),
        ] {
            let mut state = QuantumState::new();
            state.apply_gate(&Gate::h());
            state.apply_channel(&channel).unwrap();

            let tr = utils::trace(state.density_matrix());
            assert!((tr - Complex64::new(1.0, 0.0)).norm() < TOLERANCE);
        }
    }

    #[test]
    fn history_grows_one_snapshot_per_mutation() {
        let mut state = QuantumState::new();
        assert!(state.history().is_empty());

        state.apply_gate(&Gate::h());
        state
            .apply_channel(&QuantumChannel::amplitude_damping(0.1))
            .unwrap();
        assert_eq!(state.history().len(), 2);

        // Snapshots are independent copies: the latest equals the current
        // state, the earlier one stays what it was.
        assert_matrices_close(state.history().back().unwrap(), state.density_matrix());
        let after_h = state.history().front().unwrap();
        assert!((after_h[[0, 0]].re - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut state = QuantumState::with_history_policy(HistoryPolicy::Bounded(2));
        state.apply_gate(&Gate::h());
        state.apply_gate(&Gate::z());
        state.apply_gate(&Gate::h());
        assert_eq!(state.history().len(), 2);

        // The oldest snapshot (after the first H) is gone; the newest is
        // the current state.
        assert_matrices_close(state.history().back().unwrap(), state.density_matrix());
    }

    #[test]
    fn disabled_history_records_nothing() {
        let mut state = QuantumState::with_history_policy(HistoryPolicy::Disabled);
        state.apply_gate(&Gate::h());
        state.apply_gate(&Gate::x());
        assert!(state.history().is_empty());
    }

    #[test]
    fn reset_restores_ground_state_and_clears_history() {
        let mut state = QuantumState::new();
        state.apply_gate(&Gate::h());
        state.apply_gate(&Gate::x());
        assert_eq!(state.history().len(), 2);

        state.reset();
        assert_matrices_close(state.density_matrix(), &ground());
        assert!(state.history().is_empty());
    }

    #[test]
    fn apply_kraus_rejects_empty_set() {
        let mut state = QuantumState::new();
        assert!(matches!(
            state.apply_kraus(&[]),
            Err(StateError::ChannelError(ChannelError::Empty))
        ));
    }

    #[test]
    fn apply_kraus_rejects_wrong_dimensions() {
        let mut state = QuantumState::new();
        let big = Array2::<Complex64>::eye(4);
        assert!(matches!(
            state.apply_kraus(&[big]),
            Err(StateError::DimensionMismatch { rows: 4, cols: 4 })
        ));
    }

    #[test]
    fn from_density_matrix_accepts_valid_mixed_state() {
        let mixed = arr2(&[
            [Complex64::new(0.5, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(0.5, 0.0)],
        ]);
        let state = QuantumState::from_density_matrix(mixed.clone()).unwrap();
        assert_matrices_close(state.density_matrix(), &mixed);
    }

    #[test]
    fn from_density_matrix_rejects_wrong_trace() {
        let double = arr2(&[
            [Complex64::new(2.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
        ]);
        assert!(matches!(
            QuantumState::from_density_matrix(double),
            Err(StateError::InvalidTrace(_))
        ));
    }

    #[test]
    fn from_density_matrix_rejects_non_hermitian() {
        let skew = arr2(&[
            [Complex64::new(0.5, 0.0), Complex64::new(0.2, 0.1)],
            [Complex64::new(0.2, 0.1), Complex64::new(0.5, 0.0)],
        ]);
        assert!(matches!(
            QuantumState::from_density_matrix(skew),
            Err(StateError::NotHermitian)
        ));
    }
}
