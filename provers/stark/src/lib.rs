pub mod air;
pub mod errors;
pub mod examples;
pub mod fri;
pub mod parameters;
pub mod proof_stream;
pub mod prover;
pub mod trace;
pub mod verifier;

pub use air::{Air, BoundaryConstraint};
pub use errors::{FriFailure, StarkError};
pub use parameters::StarkParameters;
pub use proof_stream::{ProofStream, StreamItem};
pub use trace::TraceTable;
