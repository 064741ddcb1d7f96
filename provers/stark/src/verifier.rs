use std::collections::HashMap;

use stark_anatomy_crypto::merkle_tree::backends::blake2b::Blake2b512Tree;
use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;

use crate::air::Air;
use crate::errors::StarkError;
use crate::fri::{self, sample_weights};
use crate::parameters::StarkParameters;
use crate::proof_stream::{ProofStream, StreamItem};

pub type FE = FieldElement<StarkAnatomyPrimeField>;
type Backend = Blake2b512Tree<StarkAnatomyPrimeField>;

/// Verifies a proof stream against `air` and `params`. Never panics on
/// adversarial input: any malformed or failing step returns `Err`, and only
/// a proof that passes every check returns `Ok(true)`.
pub fn verify(stream: &mut ProofStream, air: &Air, params: &StarkParameters) -> Result<bool, StarkError> {
    log::info!("starting verification");

    let mut boundary_quotient_roots = Vec::with_capacity(air.num_registers);
    for _ in 0..air.num_registers {
        match stream.pull()? {
            StreamItem::Root(r) => boundary_quotient_roots.push(r),
            _ => return Err(StarkError::ProofStreamError),
        }
    }

    let randomizer_root = match stream.pull()? {
        StreamItem::Root(r) => r,
        _ => return Err(StarkError::ProofStreamError),
    };

    let transition_quotient_bounds = air.transition_quotient_degree_bounds(params);
    let boundary_quotient_bounds = air.boundary_quotient_degree_bounds(params);
    let max_degree = air.max_degree(params);

    let num_terms = 1 + 2 * transition_quotient_bounds.len() + 2 * air.num_registers;
    let weights = sample_weights(&stream.verifier_fiat_shamir(), num_terms);

    let mut opened = fri::verify(stream, params)?;
    opened.sort_by_key(|(i, _)| *i);
    let indices: Vec<usize> = opened.iter().map(|(i, _)| *i).collect();
    let values: Vec<FE> = opened.iter().map(|(_, v)| v.clone()).collect();

    // `indices` already holds both halves of each FRI round-0 sibling pair
    // (sorted), so expanding by the next-row shift alone yields the same
    // four-way index set the prover quadrupled on its side; both must sort
    // identically since openings are read back in this exact order.
    let mut quadrupled_indices = indices.clone();
    quadrupled_indices.extend(
        indices
            .iter()
            .map(|i| (i + params.expansion_factor) % params.fri_domain_length),
    );
    quadrupled_indices.sort_unstable();

    let mut boundary_leafs: Vec<HashMap<usize, FE>> = Vec::with_capacity(air.num_registers);
    for &root in &boundary_quotient_roots {
        let mut leafs = HashMap::new();
        for &i in &quadrupled_indices {
            let (value, path) = match stream.pull()? {
                StreamItem::Opening { value, path } => (value, path),
                _ => return Err(StarkError::ProofStreamError),
            };
            if !path.verify::<Backend>(&root, i, &vec![value.clone()]) {
                return Err(StarkError::StarkVerificationFailure(
                    "boundary quotient authentication path failed".to_string(),
                ));
            }
            leafs.insert(i, value);
        }
        boundary_leafs.push(leafs);
    }

    let mut randomizer = HashMap::new();
    for &i in &quadrupled_indices {
        let (value, path) = match stream.pull()? {
            StreamItem::Opening { value, path } => (value, path),
            _ => return Err(StarkError::ProofStreamError),
        };
        if !path.verify::<Backend>(&randomizer_root, i, &vec![value.clone()]) {
            return Err(StarkError::StarkVerificationFailure(
                "randomizer authentication path failed".to_string(),
            ));
        }
        randomizer.insert(i, value);
    }

    let transition_zerofier = air.transition_zerofier(params)?;

    for (k, &current_index) in indices.iter().enumerate() {
        let domain_current_index = params.offset.clone() * params.omega.pow(current_index as u128);
        let next_index = (current_index + params.expansion_factor) % params.fri_domain_length;
        let domain_next_index = params.offset.clone() * params.omega.pow(next_index as u128);

        let mut point = vec![domain_current_index.clone()];
        let mut next_values = Vec::with_capacity(air.num_registers);
        for s in 0..air.num_registers {
            let (zerofier, interpolant) = air.boundary_zerofier_and_interpolant(s, params);
            let current_leaf = boundary_leafs[s]
                .get(&current_index)
                .ok_or(StarkError::ProofStreamError)?
                .clone();
            let next_leaf = boundary_leafs[s]
                .get(&next_index)
                .ok_or(StarkError::ProofStreamError)?
                .clone();
            let current_trace_value =
                current_leaf * zerofier.evaluate(&domain_current_index) + interpolant.evaluate(&domain_current_index);
            let next_trace_value =
                next_leaf * zerofier.evaluate(&domain_next_index) + interpolant.evaluate(&domain_next_index);
            point.push(current_trace_value);
            next_values.push(next_trace_value);
        }
        point.extend(next_values);

        let transition_values: Vec<FE> =
            air.transition_constraints.iter().map(|c| c.evaluate(&point)).collect();
        let zerofier_value = transition_zerofier.evaluate(&domain_current_index);

        let mut terms = Vec::with_capacity(num_terms);
        terms.push(
            randomizer
                .get(&current_index)
                .ok_or(StarkError::ProofStreamError)?
                .clone(),
        );
        for (s, tcv) in transition_values.iter().enumerate() {
            let quotient = tcv.clone() / zerofier_value.clone();
            let shift = max_degree - transition_quotient_bounds[s];
            terms.push(quotient.clone());
            terms.push(quotient * domain_current_index.pow(shift as u128));
        }
        for s in 0..air.num_registers {
            let bqv = boundary_leafs[s]
                .get(&current_index)
                .ok_or(StarkError::ProofStreamError)?
                .clone();
            let shift = max_degree - boundary_quotient_bounds[s];
            terms.push(bqv.clone());
            terms.push(bqv * domain_current_index.pow(shift as u128));
        }

        let combination = terms
            .into_iter()
            .zip(weights.iter())
            .fold(FE::zero(), |acc, (term, w)| acc + term * w.clone());

        if combination != values[k] {
            return Err(StarkError::StarkVerificationFailure(
                "combination polynomial value mismatch at a queried point".to_string(),
            ));
        }
    }

    log::info!("verification succeeded");
    Ok(true)
}
