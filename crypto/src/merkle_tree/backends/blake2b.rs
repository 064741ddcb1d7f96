use std::marker::PhantomData;

use blake2::{Blake2b512, Digest};
use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::traits::IsField;
use stark_anatomy_math::traits::ByteConversion;

use crate::merkle_tree::traits::IsMerkleTreeBackend;

/// Leaves are the Blake2b-512 digest of one row's worth of field elements;
/// internal nodes are the digest of the concatenation of their children.
#[derive(Clone)]
pub struct Blake2b512Tree<F> {
    phantom: PhantomData<F>,
}

impl<F> Default for Blake2b512Tree<F> {
    fn default() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<F> IsMerkleTreeBackend for Blake2b512Tree<F>
where
    F: IsField,
    FieldElement<F>: ByteConversion,
{
    type Node = [u8; 64];
    type Data = Vec<FieldElement<F>>;

    fn hash_data(&self, input: &Vec<FieldElement<F>>) -> [u8; 64] {
        let mut hasher = Blake2b512::new();
        for element in input.iter() {
            hasher.update(element.to_bytes_be());
        }
        let mut result_hash = [0_u8; 64];
        result_hash.copy_from_slice(&hasher.finalize());
        result_hash
    }

    fn hash_new_parent(&self, left: &[u8; 64], right: &[u8; 64]) -> [u8; 64] {
        let mut hasher = Blake2b512::new();
        hasher.update(left);
        hasher.update(right);
        let mut result_hash = [0_u8; 64];
        result_hash.copy_from_slice(&hasher.finalize());
        result_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle_tree::merkle::MerkleTree;
    use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;

    type F = StarkAnatomyPrimeField;
    type FE = FieldElement<F>;

    #[test]
    fn hash_data_commits_to_every_element_of_a_row() {
        let backend = Blake2b512Tree::<F>::default();
        let row_a = vec![FE::from(2u64), FE::from(11u64)];
        let row_b = vec![FE::from(11u64), FE::from(2u64)];
        assert_ne!(backend.hash_data(&row_a), backend.hash_data(&row_b));
    }

    #[test]
    fn build_and_open_round_trips() {
        let leaves: Vec<Vec<FE>> = (0..8u64)
            .map(|i| vec![FE::from(i), FE::from(i * i)])
            .collect();
        let tree = MerkleTree::<Blake2b512Tree<F>>::build(&leaves);
        let proof = tree.get_proof_by_pos(5).unwrap();
        assert!(proof.verify::<Blake2b512Tree<F>>(&tree.root, 5, &leaves[5]));
    }
}
