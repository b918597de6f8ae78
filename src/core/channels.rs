use crate::core::errors::ChannelError;
use crate::core::utils;
use ndarray::{Array2, array};
use num_complex::Complex64;
use tracing::warn;

/// A completely positive trace-preserving map in Kraus form.
///
/// Applied to a density matrix as ρ → Σ K_i ρ K_i†.
#[derive(Clone, Debug)]
pub struct QuantumChannel {
    pub kraus_ops: Vec<Array2<Complex64>>,
}

impl QuantumChannel {
    /// Creates a channel from an arbitrary Kraus set.
    ///
    /// # Errors
    ///
    /// Returns a `ChannelError` if:
    /// - The set is empty.
    /// - An operator is not 2x2.
    /// - The set does not satisfy Σ K_i† K_i = I.
    pub fn new(kraus_ops: Vec<Array2<Complex64>>) -> Result<Self, ChannelError> {
        if kraus_ops.is_empty() {
            return Err(ChannelError::Empty);
        }

        for op in &kraus_ops {
            if op.dim() != (2, 2) {
                return Err(ChannelError::InvalidDimensions);
            }
        }

        if !utils::check_completeness(&kraus_ops, 2) {
            return Err(ChannelError::NotComplete);
        }

        Ok(Self { kraus_ops })
    }

    /// Amplitude Damping -> T1 relaxation.
    ///
    /// |1> decays to |0> with probability `gamma`. The parameter is clamped
    /// to [0, 1].
    pub fn amplitude_damping(gamma: f64) -> QuantumChannel {
        let gamma = clamp_probability(gamma, "gamma");

        let g_sqrt = gamma.sqrt();
        let one_minus_g_sqrt = (1.0 - gamma).sqrt();

        let k0 = array![
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [
                Complex64::new(0.0, 0.0),
                Complex64::new(one_minus_g_sqrt, 0.0)
            ]
        ];

        let k1 = array![
            [Complex64::new(0.0, 0.0), Complex64::new(g_sqrt, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)]
        ];

        QuantumChannel::new(vec![k0, k1]).expect("amplitude damping Kraus set is complete")
    }

    /// Phase Damping -> T2 relaxation.
    ///
    /// Off-diagonal coherences shrink with probability `lambda` while the
    /// populations stay untouched. The parameter is clamped to [0, 1].
    pub fn phase_damping(lambda: f64) -> QuantumChannel {
        let lambda = clamp_probability(lambda, "lambda");

        let sqrt_one_minus_lambda = (1.0 - lambda).sqrt();
        let sqrt_lambda = lambda.sqrt();

        // K0 = sqrt(1-λ) I
        let k0 = array![
            [
                Complex64::new(sqrt_one_minus_lambda, 0.0),
                Complex64::new(0.0, 0.0)
            ],
            [
                Complex64::new(0.0, 0.0),
                Complex64::new(sqrt_one_minus_lambda, 0.0)
            ]
        ];

        // K1 = sqrt(λ) |0><0|
        let k1 = array![
            [Complex64::new(sqrt_lambda, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)]
        ];

        // K2 = sqrt(λ) |1><1|
        let k2 = array![
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(sqrt_lambda, 0.0)]
        ];

        QuantumChannel::new(vec![k0, k1, k2]).expect("phase damping Kraus set is complete")
    }

    /// Depolarizing Channel.
    ///
    /// The state is replaced by a uniformly random Pauli error with total
    /// probability `p`. The parameter is clamped to [0, 1].
    pub fn depolarizing(p: f64) -> QuantumChannel {
        let p = clamp_probability(p, "p");

        let weight_i = (1.0 - 0.75 * p).sqrt();
        let weight_xyz = (p / 4.0).sqrt();

        let k0 = array![
            // ~ I
            [Complex64::new(weight_i, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(weight_i, 0.0)]
        ];

        let k1 = array![
            // ~ X
            [Complex64::new(0.0, 0.0), Complex64::new(weight_xyz, 0.0)],
            [Complex64::new(weight_xyz, 0.0), Complex64::new(0.0, 0.0)]
        ];

        let k2 = array![
            // ~ Y
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, -weight_xyz)],
            [Complex64::new(0.0, weight_xyz), Complex64::new(0.0, 0.0)]
        ];

        let k3 = array![
            // ~ Z
            [Complex64::new(weight_xyz, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(-weight_xyz, 0.0)]
        ];

        QuantumChannel::new(vec![k0, k1, k2, k3]).expect("depolarizing Kraus set is complete")
    }
}

/// Clamps a channel parameter to the valid probability range [0, 1].
///
/// Out-of-range inputs are accepted and clamped rather than rejected; the
/// documented contract of the channel constructors.
fn clamp_probability(p: f64, name: &str) -> f64 {
    if p.is_nan() {
        warn!("{name} is NaN, treating as 0");
        return 0.0;
    }
    let clamped = p.clamp(0.0, 1.0);
    if clamped != p {
        warn!("{name} = {p} outside [0, 1], clamped to {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_channels_are_complete() {
        for gamma in [0.0, 0.1, 0.5, 1.0] {
            let channel = QuantumChannel::amplitude_damping(gamma);
            assert!(utils::check_completeness(&channel.kraus_ops, 2));
            assert_eq!(channel.kraus_ops.len(), 2);
        }
        for lambda in [0.0, 0.3, 1.0] {
            let channel = QuantumChannel::phase_damping(lambda);
            assert!(utils::check_completeness(&channel.kraus_ops, 2));
            assert_eq!(channel.kraus_ops.len(), 3);
        }
        for p in [0.0, 0.05, 0.75, 1.0] {
            let channel = QuantumChannel::depolarizing(p);
            assert!(utils::check_completeness(&channel.kraus_ops, 2));
            assert_eq!(channel.kraus_ops.len(), 4);
        }
    }

    #[test]
    fn out_of_range_parameters_are_clamped() {
        let high = QuantumChannel::amplitude_damping(1.5);
        let one = QuantumChannel::amplitude_damping(1.0);
        for (a, b) in high.kraus_ops.iter().zip(one.kraus_ops.iter()) {
            assert_eq!(a, b);
        }

        let low = QuantumChannel::amplitude_damping(-0.3);
        let zero = QuantumChannel::amplitude_damping(0.0);
        for (a, b) in low.kraus_ops.iter().zip(zero.kraus_ops.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn nan_parameter_is_treated_as_zero() {
        let nan = QuantumChannel::depolarizing(f64::NAN);
        let zero = QuantumChannel::depolarizing(0.0);
        for (a, b) in nan.kraus_ops.iter().zip(zero.kraus_ops.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn new_rejects_empty_set() {
        assert!(matches!(
            QuantumChannel::new(vec![]),
            Err(ChannelError::Empty)
        ));
    }

    #[test]
    fn new_rejects_incomplete_set() {
        let half = Array2::<Complex64>::eye(2).mapv(|c| c * Complex64::new(0.5, 0.0));
        assert!(matches!(
            QuantumChannel::new(vec![half]),
            Err(ChannelError::NotComplete)
        ));
    }

    #[test]
    fn new_rejects_wrong_dimensions() {
        let big = Array2::<Complex64>::eye(4);
        assert!(matches!(
            QuantumChannel::new(vec![big]),
            Err(ChannelError::InvalidDimensions)
        ));
    }
}
