use num_complex::Complex64;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GateError {
    #[error("Matrix is not Unitary (U†U != I)")]
    NonUnitary,

    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Gate must act on a single qubit (2x2 matrix)")]
    InvalidDimensions,
}

#[derive(Error, Debug, Clone)]
pub enum ChannelError {
    #[error("Channel must have at least one Kraus operator")]
    Empty,

    #[error("Kraus operators do not sum to Identity (Trace preserving relation failed)")]
    NotComplete,

    #[error("Invalid operator dimensions: Kraus operators must be 2x2")]
    InvalidDimensions,
}

#[derive(Error, Debug, Clone)]
pub enum StateError {
    #[error("Trace is not unity: {0}")]
    InvalidTrace(Complex64),

    #[error("Density matrix is not Hermitian")]
    NotHermitian,

    #[error("Dimension mismatch: expected 2x2, got {rows}x{cols}")]
    DimensionMismatch { rows: usize, cols: usize },

    #[error("Channel error: {0}")]
    ChannelError(#[from] ChannelError),
}

/// Whether a failed step named a unitary gate or a noise channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Gate,
    Noise,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Gate => write!(f, "gate"),
            OperatorKind::Noise => write!(f, "noise channel"),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum CircuitError {
    #[error("Unknown {kind} name: {name}")]
    UnknownOperator { name: String, kind: OperatorKind },

    #[error("Malformed step: {0}")]
    MalformedStep(String),

    #[error("State error: {0}")]
    State(#[from] StateError),
}
