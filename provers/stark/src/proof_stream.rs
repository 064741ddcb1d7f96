use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use stark_anatomy_crypto::merkle_tree::proof::Proof as MerkleProof;
use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;
use stark_anatomy_math::traits::ByteConversion;

use crate::errors::StarkError;

pub type FE = FieldElement<StarkAnatomyPrimeField>;
pub type Digest = [u8; 64];
pub type AuthPath = MerkleProof<Digest>;

/// One entry in the transcript. Every kind of object the prover and verifier
/// exchange — roots, codewords, openings, and the colinearity records FRI's
/// query phase produces — is represented here so the whole proof is one
/// linear, append-only sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem {
    Root(Digest),
    Codeword(Vec<FE>),
    Opening { value: FE, path: AuthPath },
    Colinearity {
        a: FE,
        b: FE,
        c: FE,
        path_a: AuthPath,
        path_b: AuthPath,
        path_c: AuthPath,
    },
}

fn push_path(buf: &mut Vec<u8>, path: &AuthPath) {
    buf.extend_from_slice(&(path.merkle_path.len() as u64).to_be_bytes());
    for node in &path.merkle_path {
        buf.extend_from_slice(node);
    }
}

fn serialize_item(buf: &mut Vec<u8>, item: &StreamItem) {
    match item {
        StreamItem::Root(digest) => {
            buf.push(0);
            buf.extend_from_slice(digest);
        }
        StreamItem::Codeword(values) => {
            buf.push(1);
            buf.extend_from_slice(&(values.len() as u64).to_be_bytes());
            for v in values {
                buf.extend(v.to_bytes_be());
            }
        }
        StreamItem::Opening { value, path } => {
            buf.push(2);
            buf.extend(value.to_bytes_be());
            push_path(buf, path);
        }
        StreamItem::Colinearity {
            a,
            b,
            c,
            path_a,
            path_b,
            path_c,
        } => {
            buf.push(3);
            for v in [a, b, c] {
                buf.extend(v.to_bytes_be());
            }
            for p in [path_a, path_b, path_c] {
                push_path(buf, p);
            }
        }
    }
}

fn shake256_32(input: &[u8]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(input);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; 32];
    reader.read(&mut out);
    out
}

/// An append-only transcript with a read cursor. Both prover and verifier
/// build one of these over the course of a proof; the prover only ever
/// pushes, the verifier only ever pulls, and both derive Fiat-Shamir
/// challenges from the serialized prefix they've committed to or consumed so
/// far. This asymmetry (prover commits before sampling, verifier samples
/// only after reading the same prefix) is what makes the transform sound.
#[derive(Debug, Clone, Default)]
pub struct ProofStream {
    objects: Vec<StreamItem>,
    read_index: usize,
}

impl ProofStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: StreamItem) {
        self.objects.push(item);
    }

    pub fn pull(&mut self) -> Result<StreamItem, StarkError> {
        let item = self
            .objects
            .get(self.read_index)
            .cloned()
            .ok_or(StarkError::ProofStreamError)?;
        self.read_index += 1;
        Ok(item)
    }

    pub fn objects(&self) -> &[StreamItem] {
        &self.objects
    }

    pub fn cursor(&self) -> usize {
        self.read_index
    }

    pub fn serialize(&self) -> Vec<u8> {
        Self::serialize_slice(&self.objects)
    }

    fn serialize_slice(items: &[StreamItem]) -> Vec<u8> {
        let mut buf = Vec::new();
        for item in items {
            serialize_item(&mut buf, item);
        }
        buf
    }

    /// Prover-side challenge derivation: hashes every object pushed so far.
    pub fn prover_fiat_shamir(&self) -> [u8; 32] {
        shake256_32(&self.serialize())
    }

    /// Verifier-side challenge derivation: hashes only the prefix the
    /// verifier has actually consumed, mirroring what the prover had
    /// committed to at the matching point in the protocol.
    pub fn verifier_fiat_shamir(&self) -> [u8; 32] {
        shake256_32(&Self::serialize_slice(&self.objects[..self.read_index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_has_a_fixed_fiat_shamir_value() {
        let ps = ProofStream::new();
        let expected = shake256_32(&[]);
        assert_eq!(ps.prover_fiat_shamir(), expected);
    }

    #[test]
    fn pull_advances_the_cursor_and_errors_past_the_end() {
        let mut ps = ProofStream::new();
        ps.push(StreamItem::Root([7u8; 64]));
        assert_eq!(ps.pull().unwrap(), StreamItem::Root([7u8; 64]));
        assert_eq!(ps.pull().unwrap_err(), StarkError::ProofStreamError);
    }

    #[test]
    fn prover_and_verifier_fiat_shamir_agree_on_a_shared_prefix() {
        let mut prover_stream = ProofStream::new();
        prover_stream.push(StreamItem::Root([1u8; 64]));

        let mut verifier_stream = ProofStream::new();
        verifier_stream.push(StreamItem::Root([1u8; 64]));
        let _ = verifier_stream.pull().unwrap();

        assert_eq!(
            prover_stream.prover_fiat_shamir(),
            verifier_stream.verifier_fiat_shamir()
        );
    }

    #[test]
    fn verifier_fiat_shamir_ignores_unread_suffix() {
        let mut ps = ProofStream::new();
        ps.push(StreamItem::Root([1u8; 64]));
        let _ = ps.pull().unwrap();
        let before = ps.verifier_fiat_shamir();
        ps.push(StreamItem::Root([2u8; 64]));
        assert_eq!(ps.verifier_fiat_shamir(), before);
    }
}
