use super::proof::Proof;
use super::traits::IsMerkleTreeBackend;

pub type NodePos = usize;
const ROOT: NodePos = 0;

fn is_power_of_two(x: usize) -> bool {
    x != 0 && (x & (x - 1)) == 0
}

fn sibling_pos(pos: NodePos) -> NodePos {
    if pos % 2 == 0 {
        pos - 1
    } else {
        pos + 1
    }
}

fn parent_pos(pos: NodePos) -> NodePos {
    (pos - 1) / 2
}

/// A balanced binary Merkle tree over a power-of-two number of leaves, with
/// the node type and hashing scheme supplied by `B`. Leaf data that doesn't
/// already number a power of two is completed by repeating the last leaf.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerkleTree<B: IsMerkleTreeBackend> {
    pub root: B::Node,
    nodes: Vec<B::Node>,
    leaf_count: usize,
}

impl<B: IsMerkleTreeBackend> MerkleTree<B> {
    pub fn build(unhashed_leaves: &[B::Data]) -> Self
    where
        B::Data: Clone,
    {
        assert!(
            !unhashed_leaves.is_empty(),
            "cannot build a Merkle tree over zero leaves"
        );
        let mut padded = unhashed_leaves.to_vec();
        while !is_power_of_two(padded.len()) {
            padded.push(padded.last().unwrap().clone());
        }

        let backend = B::default();
        let hashed_leaves = backend.hash_leaves(&padded);
        let leaf_count = hashed_leaves.len();

        let mut nodes = vec![hashed_leaves[0].clone(); leaf_count - 1];
        nodes.extend(hashed_leaves);
        for pos in (0..leaf_count - 1).rev() {
            let left = 2 * pos + 1;
            let right = 2 * pos + 2;
            nodes[pos] = backend.hash_new_parent(&nodes[left], &nodes[right]);
        }

        let root = nodes[ROOT].clone();
        MerkleTree {
            root,
            nodes,
            leaf_count,
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// `leaf_index` is the position among leaves, not the overall node
    /// position inside the tree.
    pub fn get_leaf(&self, leaf_index: usize) -> &B::Node {
        &self.nodes[leaf_index + self.leaf_count - 1]
    }

    pub fn get_proof_by_pos(&self, leaf_index: usize) -> Option<Proof<B::Node>> {
        let mut pos = leaf_index + self.leaf_count - 1;
        if pos >= self.nodes.len() {
            return None;
        }
        let mut merkle_path = Vec::new();
        while pos != ROOT {
            merkle_path.push(self.nodes.get(sibling_pos(pos))?.clone());
            pos = parent_pos(pos);
        }
        Some(Proof { merkle_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle_tree::backends::blake2b::Blake2b512Tree;
    use stark_anatomy_math::field::element::FieldElement;
    use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;

    type FE = FieldElement<StarkAnatomyPrimeField>;
    type Backend = Blake2b512Tree<StarkAnatomyPrimeField>;

    #[test]
    fn every_leaf_of_a_64_leaf_tree_opens() {
        let leaves: Vec<Vec<FE>> = (0..64u64).map(|i| vec![FE::from(i * 7 + 1)]).collect();
        let tree = MerkleTree::<Backend>::build(&leaves);
        for (i, leaf) in leaves.iter().enumerate() {
            let proof = tree.get_proof_by_pos(i).unwrap();
            assert!(proof.verify::<Backend>(&tree.root, i, leaf));
            assert_eq!(proof.merkle_path.len(), 6);
        }
    }

    #[test]
    fn odd_leaf_counts_are_padded_to_a_power_of_two() {
        let leaves: Vec<Vec<FE>> = (0..5u64).map(|i| vec![FE::from(i)]).collect();
        let tree = MerkleTree::<Backend>::build(&leaves);
        assert_eq!(tree.leaf_count(), 8);
    }
}
