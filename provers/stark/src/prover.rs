use stark_anatomy_crypto::merkle_tree::backends::blake2b::Blake2b512Tree;
use stark_anatomy_crypto::merkle_tree::merkle::MerkleTree;
use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;
use stark_anatomy_math::polynomial::Polynomial;

use crate::air::Air;
use crate::errors::StarkError;
use crate::fri::{self, sample_weights};
use crate::parameters::StarkParameters;
use crate::proof_stream::{ProofStream, StreamItem};
use crate::trace::TraceTable;

pub type FE = FieldElement<StarkAnatomyPrimeField>;
type Backend = Blake2b512Tree<StarkAnatomyPrimeField>;

fn leaf(value: &FE) -> Vec<FE> {
    vec![value.clone()]
}

/// Divides `lhs` by `rhs`, failing instead of panicking when the remainder
/// is nonzero. A nonzero remainder here means the witness doesn't actually
/// satisfy the constraint the quotient was supposed to certify.
fn checked_exact_divide(
    lhs: &Polynomial<StarkAnatomyPrimeField>,
    rhs: &Polynomial<StarkAnatomyPrimeField>,
) -> Result<Polynomial<StarkAnatomyPrimeField>, StarkError> {
    let (quotient, remainder) = lhs.divide_with_remainder(rhs);
    if !remainder.is_zero() {
        return Err(StarkError::ArithmeticError(
            "quotient does not divide evenly; the trace does not satisfy the constraint".to_string(),
        ));
    }
    Ok(quotient)
}

/// Proves that `trace` satisfies `air`'s transition and boundary constraints.
///
/// `sample_randomizer` supplies fresh field elements for trace padding and
/// the randomizer polynomial; callers wire it to a CSPRNG seeded outside the
/// transcript so the randomness can't be predicted from the proof itself.
pub fn prove(
    air: &Air,
    mut trace: TraceTable,
    params: &StarkParameters,
    mut sample_randomizer: impl FnMut() -> FE,
) -> Result<ProofStream, StarkError> {
    log::info!(
        "started proof generation for a trace of {} cycles, {} registers",
        trace.n_rows(),
        trace.n_cols()
    );
    let mut stream = ProofStream::new();

    // 1. pad the trace with randomizer rows.
    trace.extend_with_randomizers(params.num_randomizers, &mut sample_randomizer);
    if trace.n_rows() != params.randomized_trace_length {
        return Err(StarkError::InvalidArgument(
            "trace length does not match the randomized trace length implied by the parameters"
                .to_string(),
        ));
    }

    // 2. interpolate each register's column over the omicron domain.
    let omicron_domain = params.omicron_domain();
    let trace_polynomials = trace.interpolate_columns(&omicron_domain);

    // 3. boundary quotients: (trace polynomial - boundary interpolant) / boundary zerofier.
    let mut boundary_quotients = Vec::with_capacity(air.num_registers);
    for s in 0..air.num_registers {
        let (zerofier, interpolant) = air.boundary_zerofier_and_interpolant(s, params);
        let numerator = trace_polynomials[s].clone() - interpolant;
        let quotient = checked_exact_divide(&numerator, &zerofier)?;
        boundary_quotients.push(quotient);
    }

    // 4. commit to the boundary quotients, evaluated over the full FRI domain.
    let fri_domain = params.fri_domain();
    let mut boundary_quotient_codewords = Vec::with_capacity(air.num_registers);
    let mut boundary_trees = Vec::with_capacity(air.num_registers);
    for quotient in &boundary_quotients {
        let codeword: Vec<FE> = fri_domain.iter().map(|x| quotient.evaluate(x)).collect();
        let leaves: Vec<Vec<FE>> = codeword.iter().map(leaf).collect();
        let tree = MerkleTree::<Backend>::build(&leaves);
        stream.push(StreamItem::Root(tree.root));
        boundary_trees.push(tree);
        boundary_quotient_codewords.push(codeword);
    }

    // 5. lift the trace polynomials into the symbolic point (x, current row, next row)
    // and evaluate every transition constraint there.
    let x = Polynomial::new(&[FE::zero(), FE::one()]);
    let mut point = vec![x];
    point.extend(trace_polynomials.iter().cloned());
    point.extend(trace_polynomials.iter().map(|p| p.scale(&params.omicron)));
    let transition_polynomials: Vec<_> = air
        .transition_constraints
        .iter()
        .map(|c| c.evaluate_symbolic(&point))
        .collect();

    // 6. divide out the transition zerofier.
    let transition_zerofier = air.transition_zerofier(params)?;
    let transition_quotients = transition_polynomials
        .iter()
        .map(|p| checked_exact_divide(p, &transition_zerofier))
        .collect::<Result<Vec<_>, _>>()?;

    let transition_quotient_bounds = air.transition_quotient_degree_bounds(params);
    for (tq, bound) in transition_quotients.iter().zip(transition_quotient_bounds.iter()) {
        if tq.degree() >= 0 && tq.degree() as usize > *bound {
            return Err(StarkError::ArithmeticError(
                "a transition quotient exceeds its expected degree bound; the trace does not satisfy the AIR".to_string(),
            ));
        }
    }

    // 7. randomizer polynomial: masks the low-order coefficients of the combination below.
    let max_degree = air.max_degree(params);
    let randomizer_polynomial = Polynomial::new(
        &(0..=max_degree).map(|_| sample_randomizer()).collect::<Vec<_>>(),
    );
    let randomizer_codeword: Vec<FE> = fri_domain
        .iter()
        .map(|x| randomizer_polynomial.evaluate(x))
        .collect();
    let randomizer_tree =
        MerkleTree::<Backend>::build(&randomizer_codeword.iter().map(leaf).collect::<Vec<_>>());
    stream.push(StreamItem::Root(randomizer_tree.root));

    // 8. sample weights for the nonlinear combination from the transcript so far.
    let num_terms = 1 + 2 * transition_quotients.len() + 2 * air.num_registers;
    let weights = sample_weights(&stream.prover_fiat_shamir(), num_terms);

    // 9. build the combination polynomial: randomizer, plus every quotient twice
    // (once bare, once shifted up to max_degree), each scaled by its own weight.
    let boundary_quotient_bounds = air.boundary_quotient_degree_bounds(params);
    let mut combination = randomizer_polynomial * Polynomial::new(&[weights[0].clone()]);
    let mut w = 1;
    for (i, tq) in transition_quotients.iter().enumerate() {
        combination = combination + tq.clone() * Polynomial::new(&[weights[w].clone()]);
        w += 1;
        let shift = max_degree - transition_quotient_bounds[i];
        let shifted = Polynomial::new_monomial(FieldElement::one(), shift) * tq.clone();
        combination = combination + shifted * Polynomial::new(&[weights[w].clone()]);
        w += 1;
    }
    for (i, bq) in boundary_quotients.iter().enumerate() {
        combination = combination + bq.clone() * Polynomial::new(&[weights[w].clone()]);
        w += 1;
        let shift = max_degree - boundary_quotient_bounds[i];
        let shifted = Polynomial::new_monomial(FieldElement::one(), shift) * bq.clone();
        combination = combination + shifted * Polynomial::new(&[weights[w].clone()]);
        w += 1;
    }

    // 10. run FRI on the combination polynomial's codeword.
    let combined_codeword: Vec<FE> = fri_domain.iter().map(|x| combination.evaluate(x)).collect();
    let mut top_level_indices = fri::prove(&combined_codeword, params, &mut stream)?;
    top_level_indices.sort_unstable();

    // 11. every query needs its paired point one expansion-factor step away (the
    // next trace row) and the FRI sibling half a domain away (since FRI's
    // round-0 colinearity check opens both points of that pair too).
    let mut duplicated_indices = top_level_indices.clone();
    duplicated_indices.extend(
        top_level_indices
            .iter()
            .map(|i| (i + params.expansion_factor) % params.fri_domain_length),
    );
    let mut quadrupled_indices = duplicated_indices.clone();
    quadrupled_indices.extend(
        duplicated_indices
            .iter()
            .map(|i| (i + params.fri_domain_length / 2) % params.fri_domain_length),
    );
    quadrupled_indices.sort_unstable();

    // 12. open the boundary quotient and randomizer codewords at the queried positions.
    for (codeword, tree) in boundary_quotient_codewords.iter().zip(boundary_trees.iter()) {
        for &i in &quadrupled_indices {
            let path = tree.get_proof_by_pos(i).expect("index is within the FRI domain");
            stream.push(StreamItem::Opening { value: codeword[i].clone(), path });
        }
    }
    for &i in &quadrupled_indices {
        let path = randomizer_tree
            .get_proof_by_pos(i)
            .expect("index is within the FRI domain");
        stream.push(StreamItem::Opening { value: randomizer_codeword[i].clone(), path });
    }

    log::info!("finished proof generation");
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air::BoundaryConstraint;
    use crate::verifier;
    use stark_anatomy_math::multivariate::MPolynomial;

    /// A two-register trace where `a` squares every step and `b` tracks the
    /// running sum of `a`: `a_{i+1} = a_i^2`, `b_{i+1} = b_i + a_i`.
    fn toy_air_and_trace() -> (Air, TraceTable, StarkParameters) {
        let params = StarkParameters::new(4, 2, 4, 2, 2, 2).unwrap();

        let vars = MPolynomial::<StarkAnatomyPrimeField>::variables(5);
        let a_cur = vars[1].clone();
        let b_cur = vars[2].clone();
        let a_next = vars[3].clone();
        let b_next = vars[4].clone();
        let transition_constraints = vec![
            a_next - a_cur.clone() * a_cur.clone(),
            b_next - (b_cur + a_cur),
        ];

        let a0 = FE::from(2u64);
        let b0 = FE::from(0u64);
        let mut rows = vec![vec![a0.clone(), b0.clone()]];
        for _ in 1..params.original_trace_length {
            let prev = rows.last().unwrap().clone();
            let next_a = prev[0].clone() * prev[0].clone();
            let next_b = prev[1].clone() + prev[0].clone();
            rows.push(vec![next_a, next_b]);
        }

        let boundary_constraints = vec![
            BoundaryConstraint { cycle: 0, register: 0, value: a0 },
            BoundaryConstraint { cycle: 0, register: 1, value: b0 },
        ];

        let air = Air::new(2, transition_constraints, boundary_constraints);
        let trace = TraceTable::new(rows, 2).unwrap();
        (air, trace, params)
    }

    fn deterministic_randomizer() -> impl FnMut() -> FE {
        let mut counter = 0u64;
        move || {
            counter += 1;
            FE::from(counter.wrapping_mul(0x9E3779B97F4A7C15))
        }
    }

    #[test]
    fn a_correct_trace_produces_a_proof_that_verifies() {
        let (air, trace, params) = toy_air_and_trace();
        let mut stream = prove(&air, trace, &params, deterministic_randomizer()).unwrap();
        assert!(verifier::verify(&mut stream, &air, &params).unwrap());
    }

    #[test]
    fn a_trace_violating_the_transition_constraints_is_rejected_by_the_prover() {
        let (air, mut trace, params) = toy_air_and_trace();
        let mut rows = trace.rows().to_vec();
        rows[1][0] = rows[1][0].clone() + FE::one();
        trace = TraceTable::new(rows, 2).unwrap();
        assert!(prove(&air, trace, &params, deterministic_randomizer()).is_err());
    }
}
