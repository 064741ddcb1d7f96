/// A hashing scheme for one concrete Merkle tree instantiation: how a leaf's
/// underlying data becomes a node, and how two sibling nodes combine into
/// their parent.
pub trait IsMerkleTreeBackend: Clone + Default {
    type Node: PartialEq + Eq + Clone;
    type Data;

    fn hash_data(&self, input: &Self::Data) -> Self::Node;
    fn hash_new_parent(&self, left: &Self::Node, right: &Self::Node) -> Self::Node;

    fn hash_leaves(&self, unhashed_leaves: &[Self::Data]) -> Vec<Self::Node>
    where
        Self::Data: Clone,
    {
        unhashed_leaves.iter().map(|d| self.hash_data(d)).collect()
    }
}
