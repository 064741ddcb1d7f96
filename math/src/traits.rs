/// Big/little-endian byte encodings for values that get hashed into a
/// transcript or a Merkle leaf. Implemented per concrete field rather than
/// generically over `IsField`, since the encoding width depends on the
/// field's native representation.
pub trait ByteConversion {
    fn to_bytes_be(&self) -> Vec<u8>;
    fn to_bytes_le(&self) -> Vec<u8>;
}
