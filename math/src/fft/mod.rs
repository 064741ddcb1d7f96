//! Number-theoretic transform and the subproduct-tree polynomial algorithms
//! built on top of it: fast multiplication, multi-point evaluation,
//! interpolation, and coset arithmetic for the FRI low-degree test.

pub mod errors;
pub mod ntt;
pub mod polynomial;

pub use errors::FFTError;
pub use ntt::{intt, ntt};
pub use polynomial::{
    fast_coset_divide, fast_coset_evaluate, fast_evaluate, fast_interpolate, fast_multiply,
    fast_zerofier,
};
