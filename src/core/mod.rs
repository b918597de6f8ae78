mod channels;
pub mod errors;
mod gates;
mod observation;
mod state;
pub mod utils;

pub use channels::QuantumChannel;
pub use gates::Gate;
pub use observation::{
    BlochVector, DensityMatrixParts, Observation, bloch_vector, density_matrix_from_parts,
    serialize_density_matrix,
};
pub use state::{HistoryPolicy, QuantumState};
