use super::traits::IsMerkleTreeBackend;

/// The sibling digest at every level from a leaf up to (but not including)
/// the root. `merkle_path.len()` is `log2` of the tree's leaf count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof<Node> {
    pub merkle_path: Vec<Node>,
}

impl<Node: PartialEq + Clone> Proof<Node> {
    /// Recomputes the root by folding `data`'s hash with each sibling in
    /// order, using bit `index & 1` at each level to decide which side
    /// `data`'s running hash sits on, then compares against `root`.
    pub fn verify<B>(&self, root: &Node, index: usize, data: &B::Data) -> bool
    where
        B: IsMerkleTreeBackend<Node = Node>,
    {
        let backend = B::default();
        let mut hash = backend.hash_data(data);
        let mut index = index;
        for sibling in &self.merkle_path {
            hash = if index % 2 == 0 {
                backend.hash_new_parent(&hash, sibling)
            } else {
                backend.hash_new_parent(sibling, &hash)
            };
            index /= 2;
        }
        &hash == root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle_tree::backends::blake2b::Blake2b512Tree;
    use crate::merkle_tree::merkle::MerkleTree;
    use stark_anatomy_math::field::element::FieldElement;
    use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;

    type FE = FieldElement<StarkAnatomyPrimeField>;
    type Backend = Blake2b512Tree<StarkAnatomyPrimeField>;

    #[test]
    fn tampered_leaf_fails_verification() {
        let leaves: Vec<Vec<FE>> = (0..8u64).map(|i| vec![FE::from(i)]).collect();
        let tree = MerkleTree::<Backend>::build(&leaves);
        let proof = tree.get_proof_by_pos(3).unwrap();
        assert!(proof.verify::<Backend>(&tree.root, 3, &leaves[3]));
        let tampered = vec![FE::from(999u64)];
        assert!(!proof.verify::<Backend>(&tree.root, 3, &tampered));
    }

    #[test]
    fn tampered_index_fails_verification() {
        let leaves: Vec<Vec<FE>> = (0..8u64).map(|i| vec![FE::from(i)]).collect();
        let tree = MerkleTree::<Backend>::build(&leaves);
        let proof = tree.get_proof_by_pos(3).unwrap();
        assert!(!proof.verify::<Backend>(&tree.root, 5, &leaves[3]));
    }

    #[test]
    fn tampered_root_fails_verification() {
        let leaves: Vec<Vec<FE>> = (0..8u64).map(|i| vec![FE::from(i)]).collect();
        let tree = MerkleTree::<Backend>::build(&leaves);
        let proof = tree.get_proof_by_pos(3).unwrap();
        let mut wrong_root = tree.root;
        wrong_root[0] ^= 1;
        assert!(!proof.verify::<Backend>(&wrong_root, 3, &leaves[3]));
    }

    #[test]
    fn tampered_path_element_fails_verification() {
        let leaves: Vec<Vec<FE>> = (0..8u64).map(|i| vec![FE::from(i)]).collect();
        let tree = MerkleTree::<Backend>::build(&leaves);
        let mut proof = tree.get_proof_by_pos(3).unwrap();
        proof.merkle_path[0][0] ^= 1;
        assert!(!proof.verify::<Backend>(&tree.root, 3, &leaves[3]));
    }
}
