//! Step-by-step circuit evaluation.
//!
//! A circuit is an ordered list of steps, each naming a unitary gate or a
//! noise channel. Evaluation is a strict in-order fold: every step
//! transforms the state produced by the previous one and yields one
//! [`Observation`] of the result. The first failing step aborts the rest of
//! the evaluation, so the observation list never desynchronizes from the
//! step list.

use crate::core::errors::{CircuitError, OperatorKind};
use crate::core::{Gate, Observation, QuantumChannel, QuantumState};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

/// Default rotation angle when a step omits `theta`.
pub const DEFAULT_THETA: f64 = FRAC_PI_2;
/// Default damping probability when a step omits `gamma`.
pub const DEFAULT_GAMMA: f64 = 0.1;
/// Default dephasing probability when a step omits `lambda`.
pub const DEFAULT_LAMBDA: f64 = 0.1;
/// Default depolarizing probability when a step omits `p`.
pub const DEFAULT_P: f64 = 0.05;

/// One step of a circuit as supplied by an external caller.
#[derive(Clone, Debug, Deserialize)]
pub struct Step {
    /// Either `"gate"` or `"noise"`.
    pub kind: String,
    /// Operator name, e.g. `"H"` or `"amplitude_damping"`.
    pub name: String,
    /// Named numeric parameters (`theta`, `gamma`, `lambda`, `p`).
    #[serde(default)]
    pub params: Option<BTreeMap<String, f64>>,
}

impl Step {
    /// A gate step without parameters.
    pub fn gate(name: &str) -> Self {
        Self {
            kind: "gate".to_string(),
            name: name.to_string(),
            params: None,
        }
    }

    /// A noise step without parameters.
    pub fn noise(name: &str) -> Self {
        Self {
            kind: "noise".to_string(),
            name: name.to_string(),
            params: None,
        }
    }

    /// Attaches a named numeric parameter.
    pub fn with_param(mut self, key: &str, value: f64) -> Self {
        self.params
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value);
        self
    }

    fn param(&self, key: &str, default: f64) -> f64 {
        self.params
            .as_ref()
            .and_then(|params| params.get(key).copied())
            .unwrap_or(default)
    }
}

/// A unitary gate from the fixed catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateOp {
    Identity,
    X,
    Y,
    Z,
    H,
    Rx(f64),
    Ry(f64),
    Rz(f64),
}

impl GateOp {
    /// The gate's unitary matrix.
    pub fn gate(&self) -> Gate {
        match self {
            GateOp::Identity => Gate::i(),
            GateOp::X => Gate::x(),
            GateOp::Y => Gate::y(),
            GateOp::Z => Gate::z(),
            GateOp::H => Gate::h(),
            GateOp::Rx(theta) => Gate::rx(*theta),
            GateOp::Ry(theta) => Gate::ry(*theta),
            GateOp::Rz(theta) => Gate::rz(*theta),
        }
    }
}

/// A noise channel from the fixed catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoiseOp {
    AmplitudeDamping(f64),
    PhaseDamping(f64),
    Depolarizing(f64),
}

impl NoiseOp {
    /// The channel's Kraus operators.
    pub fn channel(&self) -> QuantumChannel {
        match self {
            NoiseOp::AmplitudeDamping(gamma) => QuantumChannel::amplitude_damping(*gamma),
            NoiseOp::PhaseDamping(lambda) => QuantumChannel::phase_damping(*lambda),
            NoiseOp::Depolarizing(p) => QuantumChannel::depolarizing(*p),
        }
    }
}

/// A step resolved against the operator catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    Gate(GateOp),
    Noise(NoiseOp),
}

impl Operation {
    /// Resolves a wire-level step to a catalog operator.
    ///
    /// Missing parameters fall back to the documented defaults (θ = π/2,
    /// γ = 0.1, λ = 0.1, p = 0.05).
    ///
    /// # Errors
    ///
    /// Returns a `CircuitError` if the step kind is neither `"gate"` nor
    /// `"noise"`, or the name is not in the catalog.
    pub fn resolve(step: &Step) -> Result<Operation, CircuitError> {
        match step.kind.as_str() {
            "gate" => {
                let op = match step.name.as_str() {
                    "I" => GateOp::Identity,
                    "X" => GateOp::X,
                    "Y" => GateOp::Y,
                    "Z" => GateOp::Z,
                    "H" => GateOp::H,
                    "Rx" => GateOp::Rx(step.param("theta", DEFAULT_THETA)),
                    "Ry" => GateOp::Ry(step.param("theta", DEFAULT_THETA)),
                    "Rz" => GateOp::Rz(step.param("theta", DEFAULT_THETA)),
                    _ => {
                        return Err(CircuitError::UnknownOperator {
                            name: step.name.clone(),
                            kind: OperatorKind::Gate,
                        });
                    }
                };
                Ok(Operation::Gate(op))
            }
            "noise" => {
                let op = match step.name.as_str() {
                    "amplitude_damping" => {
                        NoiseOp::AmplitudeDamping(step.param("gamma", DEFAULT_GAMMA))
                    }
                    "phase_damping" => NoiseOp::PhaseDamping(step.param("lambda", DEFAULT_LAMBDA)),
                    "depolarizing" => NoiseOp::Depolarizing(step.param("p", DEFAULT_P)),
                    _ => {
                        return Err(CircuitError::UnknownOperator {
                            name: step.name.clone(),
                            kind: OperatorKind::Noise,
                        });
                    }
                };
                Ok(Operation::Noise(op))
            }
            other => Err(CircuitError::MalformedStep(format!(
                "step kind must be \"gate\" or \"noise\", got \"{other}\""
            ))),
        }
    }

    /// Applies the operation to a state.
    pub fn apply(&self, state: &mut QuantumState) -> Result<(), CircuitError> {
        match self {
            Operation::Gate(op) => {
                debug!(gate = ?op, "applying gate");
                state.apply_gate(&op.gate());
            }
            Operation::Noise(op) => {
                debug!(channel = ?op, "applying noise channel");
                state.apply_channel(&op.channel())?;
            }
        }
        Ok(())
    }
}

/// Evaluates a circuit on a fresh ground-state qubit.
///
/// Each call owns its own [`QuantumState`], so concurrent evaluations never
/// share state. Returns one observation per step, in step order.
///
/// # Errors
///
/// The first step that fails to resolve aborts the evaluation; no partial
/// observation list is returned.
pub fn run_circuit(steps: &[Step]) -> Result<Vec<Observation>, CircuitError> {
    let mut state = QuantumState::new();
    run_circuit_on(&mut state, steps)
}

/// Evaluates a circuit on a caller-owned state.
///
/// Use this to chain circuits over one session, resume from a custom
/// starting state, or pick a history retention policy.
pub fn run_circuit_on(
    state: &mut QuantumState,
    steps: &[Step],
) -> Result<Vec<Observation>, CircuitError> {
    let mut observations = Vec::with_capacity(steps.len());

    for step in steps {
        let operation = Operation::resolve(step)?;
        operation.apply(state)?;
        observations.push(Observation::of(state.density_matrix()));
    }

    Ok(observations)
}
