//! A small quadratic-recurrence AIR used to exercise the prover and verifier
//! end to end. `a` squares every step and `b` accumulates the running sum of
//! `a`: `a_{i+1} = a_i^2`, `b_{i+1} = b_i + a_i`, with both registers pinned
//! at cycle 0 by boundary constraints.

use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;
use stark_anatomy_math::multivariate::MPolynomial;

use crate::air::{Air, BoundaryConstraint};
use crate::errors::StarkError;
use crate::parameters::StarkParameters;
use crate::trace::TraceTable;

pub type FE = FieldElement<StarkAnatomyPrimeField>;

pub fn air() -> Air {
    let vars = MPolynomial::<StarkAnatomyPrimeField>::variables(5);
    let a_cur = vars[1].clone();
    let b_cur = vars[2].clone();
    let a_next = vars[3].clone();
    let b_next = vars[4].clone();
    let transition_constraints = vec![
        a_next - a_cur.clone() * a_cur.clone(),
        b_next - (b_cur + a_cur),
    ];
    let boundary_constraints = vec![
        BoundaryConstraint { cycle: 0, register: 0, value: FE::from(2u64) },
        BoundaryConstraint { cycle: 0, register: 1, value: FE::from(0u64) },
    ];
    Air::new(2, transition_constraints, boundary_constraints)
}

/// A correct execution trace of `original_trace_length` cycles starting from
/// `a_0 = 2, b_0 = 0`.
pub fn honest_trace(params: &StarkParameters) -> Result<TraceTable, StarkError> {
    let mut rows = vec![vec![FE::from(2u64), FE::from(0u64)]];
    for _ in 1..params.original_trace_length {
        let prev = rows.last().unwrap().clone();
        let next_a = prev[0].clone() * prev[0].clone();
        let next_b = prev[1].clone() + prev[0].clone();
        rows.push(vec![next_a, next_b]);
    }
    TraceTable::new(rows, 2)
}

/// The same trace, but the last row's `a` register is off by one: a
/// plausible-looking proof request for the wrong claimed output.
pub fn trace_with_wrong_output(params: &StarkParameters) -> Result<TraceTable, StarkError> {
    let mut rows = honest_trace(params)?.rows().to_vec();
    let last = rows.len() - 1;
    rows[last][0] = rows[last][0].clone() + FE::one();
    TraceTable::new(rows, 2)
}

/// An interior row perturbed so a transition constraint fails partway
/// through the trace, rather than only at the boundary.
pub fn trace_with_false_witness(params: &StarkParameters) -> Result<TraceTable, StarkError> {
    let mut rows = honest_trace(params)?.rows().to_vec();
    let mid = rows.len() / 2;
    rows[mid][0] = rows[mid][0].clone() + FE::one();
    TraceTable::new(rows, 2)
}
