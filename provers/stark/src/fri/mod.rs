use std::collections::HashSet;

use blake2::{Blake2b512, Digest};
use stark_anatomy_crypto::merkle_tree::backends::blake2b::Blake2b512Tree;
use stark_anatomy_crypto::merkle_tree::merkle::MerkleTree;
use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;
use stark_anatomy_math::polynomial::Polynomial;

use crate::errors::{FriFailure, StarkError};
use crate::parameters::StarkParameters;
use crate::proof_stream::{ProofStream, StreamItem};

pub type FE = FieldElement<StarkAnatomyPrimeField>;
type Backend = Blake2b512Tree<StarkAnatomyPrimeField>;

fn index_seed(seed: &[u8], counter: u64) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(seed);
    hasher.update(counter.to_be_bytes());
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn sample_index(bytes: &[u8], size: usize) -> usize {
    let mut acc: u128 = 0;
    for &b in bytes {
        acc = (acc << 8) ^ b as u128;
    }
    (acc % size as u128) as usize
}

/// Draws `number` distinct-modulo-`reduced_size` indices in `[0, size)` by
/// iterated hashing of `seed`. Colliding draws (two indices landing on the
/// same position once folded down to the final round's domain) are
/// discarded and redrawn, since querying the same point twice buys no extra
/// soundness. Fails rather than looping forever if more distinct indices are
/// requested than the final round's domain actually has.
fn sample_indices(
    seed: &[u8],
    size: usize,
    reduced_size: usize,
    number: usize,
) -> Result<Vec<usize>, StarkError> {
    if number > reduced_size {
        return Err(StarkError::InvalidArgument(format!(
            "cannot draw {number} distinct indices from a domain of only {reduced_size} positions"
        )));
    }
    let mut indices = Vec::with_capacity(number);
    let mut reduced_seen = HashSet::new();
    let mut counter = 0u64;
    while indices.len() < number {
        let digest = index_seed(seed, counter);
        let index = sample_index(&digest, size);
        let reduced = index % reduced_size;
        counter += 1;
        if reduced_seen.insert(reduced) {
            indices.push(index);
        }
    }
    Ok(indices)
}

fn leaf(value: &FE) -> Vec<FE> {
    vec![value.clone()]
}

/// Draws `number` field elements from `seed` by iterated Blake2b hashing,
/// folded into the field the same way any other digest is. Used to weight
/// each term of the nonlinear combination polynomial.
pub(crate) fn sample_weights(seed: &[u8], number: usize) -> Vec<FE> {
    (0..number as u64)
        .map(|i| FE::from_bytes_be(&index_seed(seed, i)))
        .collect()
}

/// Commits to `codeword` round by round, folding it by half with a
/// Fiat-Shamir challenge each time, until it's small enough to ship in the
/// clear; then opens `num_colinearity_checks` query paths per round. Returns
/// the indices queried in the first round, which the caller needs to open
/// its own codewords at the same positions.
pub fn prove(
    codeword: &[FE],
    params: &StarkParameters,
    stream: &mut ProofStream,
) -> Result<Vec<usize>, StarkError> {
    assert_eq!(codeword.len(), params.fri_domain_length, "codeword must span the full FRI domain");
    let num_rounds = params.num_rounds().max(1);

    let mut codewords = Vec::with_capacity(num_rounds);
    let mut trees: Vec<MerkleTree<Backend>> = Vec::with_capacity(num_rounds);

    let mut current = codeword.to_vec();
    let mut omega = params.omega.clone();
    let mut offset = params.offset.clone();

    for r in 0..num_rounds {
        let leaves: Vec<Vec<FE>> = current.iter().map(leaf).collect();
        let tree = MerkleTree::<Backend>::build(&leaves);
        stream.push(StreamItem::Root(tree.root));
        codewords.push(current.clone());
        trees.push(tree);

        if r == num_rounds - 1 {
            break;
        }

        let alpha = FE::from_bytes_be(&stream.prover_fiat_shamir());
        let half = current.len() / 2;
        let two_inv = FE::from(2u64).inv().expect("2 is invertible in this field");
        let mut folded = Vec::with_capacity(half);
        for i in 0..half {
            let x_inv = (offset.clone() * omega.pow(i as u128))
                .inv()
                .expect("domain points are nonzero");
            let a = current[i].clone();
            let b = current[half + i].clone();
            let folded_value = two_inv.clone()
                * ((FE::one() + alpha.clone() * x_inv.clone()) * a
                    + (FE::one() - alpha.clone() * x_inv) * b);
            folded.push(folded_value);
        }
        current = folded;
        omega = omega.clone() * omega.clone();
        offset = offset.clone() * offset.clone();
    }

    stream.push(StreamItem::Codeword(current.clone()));

    let last_round_len = codewords.last().unwrap().len();
    let top_level_indices = sample_indices(
        &stream.prover_fiat_shamir(),
        params.fri_domain_length / 2,
        last_round_len,
        params.num_colinearity_checks,
    )?;

    let mut indices = top_level_indices.clone();
    for r in 0..num_rounds - 1 {
        let half = codewords[r].len() / 2;
        indices = indices.iter().map(|i| i % half).collect();
        for &c_index in &indices {
            let a_index = c_index;
            let b_index = c_index + half;
            let a = codewords[r][a_index].clone();
            let b = codewords[r][b_index].clone();
            let c = codewords[r + 1][c_index].clone();
            let path_a = trees[r].get_proof_by_pos(a_index).unwrap();
            let path_b = trees[r].get_proof_by_pos(b_index).unwrap();
            let path_c = trees[r + 1].get_proof_by_pos(c_index).unwrap();
            stream.push(StreamItem::Colinearity { a, b, c, path_a, path_b, path_c });
        }
    }

    Ok(top_level_indices)
}

/// Replays the Fiat-Shamir transcript, checks the last codeword is both
/// well-formed and low-degree, then verifies every colinearity record and
/// its two Merkle paths. On success, returns the first-round `(index,
/// value)` pairs opened along the way, since the STARK verifier needs those
/// same positions to check its own quotient codewords.
pub fn verify(stream: &mut ProofStream, params: &StarkParameters) -> Result<Vec<(usize, FE)>, StarkError> {
    let num_rounds = params.num_rounds().max(1);
    let mut omega = params.omega.clone();
    let mut offset = params.offset.clone();

    let mut roots = Vec::with_capacity(num_rounds);
    let mut alphas = Vec::with_capacity(num_rounds.saturating_sub(1));

    for r in 0..num_rounds {
        let root = match stream.pull()? {
            StreamItem::Root(root) => root,
            _ => return Err(StarkError::ProofStreamError),
        };
        roots.push(root);
        if r != num_rounds - 1 {
            alphas.push(FE::from_bytes_be(&stream.verifier_fiat_shamir()));
        }
    }

    let last_codeword = match stream.pull()? {
        StreamItem::Codeword(c) => c,
        _ => return Err(StarkError::FriFailure(FriFailure::MalformedLastCodeword)),
    };

    let leaves: Vec<Vec<FE>> = last_codeword.iter().map(leaf).collect();
    let tree = MerkleTree::<Backend>::build(&leaves);
    if &tree.root != roots.last().unwrap() {
        return Err(StarkError::FriFailure(FriFailure::MalformedLastCodeword));
    }

    let degree_bound = (last_codeword.len() / params.expansion_factor) as isize - 1;
    let mut last_omega = omega.clone();
    let mut last_offset = offset.clone();
    for _ in 0..num_rounds - 1 {
        last_omega = last_omega.clone() * last_omega.clone();
        last_offset = last_offset.clone() * last_offset.clone();
    }
    let last_domain: Vec<FE> = (0..last_codeword.len())
        .map(|i| last_offset.clone() * last_omega.pow(i as u128))
        .collect();
    let poly = Polynomial::interpolate(&last_domain, &last_codeword);
    if poly.degree() > degree_bound {
        return Err(StarkError::FriFailure(FriFailure::HighDegreeLastCodeword));
    }

    let top_level_indices = sample_indices(
        &stream.verifier_fiat_shamir(),
        params.fri_domain_length / 2,
        last_codeword.len(),
        params.num_colinearity_checks,
    )?;

    let mut opened = Vec::new();
    let mut indices = top_level_indices.clone();

    for r in 0..num_rounds - 1 {
        let half = params.fri_domain_length >> (r + 1);
        indices = indices.iter().map(|i| i % half).collect();

        for &c_index in &indices {
            let a_index = c_index;
            let b_index = c_index + half;

            let (a, b, c, path_a, path_b, path_c) = match stream.pull()? {
                StreamItem::Colinearity { a, b, c, path_a, path_b, path_c } => {
                    (a, b, c, path_a, path_b, path_c)
                }
                _ => return Err(StarkError::ProofStreamError),
            };

            if r == 0 {
                opened.push((a_index, a.clone()));
                opened.push((b_index, b.clone()));
            }

            let ax = offset.clone() * omega.pow(a_index as u128);
            let bx = offset.clone() * omega.pow(b_index as u128);
            let cx = alphas[r].clone();

            if !Polynomial::is_colinear(&[(ax, a.clone()), (bx, b.clone()), (cx, c.clone())]) {
                return Err(StarkError::FriFailure(FriFailure::ColinearityFailure));
            }
            if !path_a.verify::<Backend>(&roots[r], a_index, &leaf(&a)) {
                return Err(StarkError::FriFailure(FriFailure::MerklePathFailure));
            }
            if !path_b.verify::<Backend>(&roots[r], b_index, &leaf(&b)) {
                return Err(StarkError::FriFailure(FriFailure::MerklePathFailure));
            }
            if !path_c.verify::<Backend>(&roots[r + 1], c_index, &leaf(&c)) {
                return Err(StarkError::FriFailure(FriFailure::MerklePathFailure));
            }
        }

        omega = omega.clone() * omega.clone();
        offset = offset.clone() * offset.clone();
    }

    Ok(opened)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> StarkParameters {
        StarkParameters::new(2, 1, 4, 2, 2, 2).unwrap()
    }

    fn low_degree_codeword(params: &StarkParameters) -> Vec<FE> {
        let poly = Polynomial::new(&[FE::from(3u64), FE::from(5u64), FE::from(7u64)]);
        params.fri_domain().iter().map(|x| poly.evaluate(x)).collect()
    }

    #[test]
    fn a_low_degree_codeword_is_accepted() {
        let params = small_params();
        let codeword = low_degree_codeword(&params);
        let mut stream = ProofStream::new();
        prove(&codeword, &params, &mut stream).unwrap();

        let mut verify_stream = ProofStream::new();
        for item in stream.objects() {
            verify_stream.push(item.clone());
        }
        assert!(verify(&mut verify_stream, &params).is_ok());
    }

    #[test]
    fn a_tampered_codeword_is_rejected() {
        let params = small_params();
        let mut codeword = low_degree_codeword(&params);
        codeword[3] = codeword[3].clone() + FE::one();
        let mut stream = ProofStream::new();
        prove(&codeword, &params, &mut stream).unwrap();

        let mut verify_stream = ProofStream::new();
        for item in stream.objects() {
            verify_stream.push(item.clone());
        }
        assert!(verify(&mut verify_stream, &params).is_err());
    }
}
