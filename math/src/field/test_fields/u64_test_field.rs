use crate::errors::FieldError;
use crate::field::traits::{IsFFTField, IsField};

/// A parametric prime field backed by a native `u64`, for fast unit tests.
/// `MODULUS` must be prime for `inv` to be correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct U64TestField<const MODULUS: u64>;

impl<const MODULUS: u64> IsField for U64TestField<MODULUS> {
    type BaseType = u64;

    fn add(a: &u64, b: &u64) -> u64 {
        ((*a as u128 + *b as u128) % MODULUS as u128) as u64
    }

    fn sub(a: &u64, b: &u64) -> u64 {
        (((*a as u128 + MODULUS as u128) - *b as u128) % MODULUS as u128) as u64
    }

    fn mul(a: &u64, b: &u64) -> u64 {
        ((*a as u128 * *b as u128) % MODULUS as u128) as u64
    }

    fn neg(a: &u64) -> u64 {
        if *a == 0 {
            0
        } else {
            MODULUS - a
        }
    }

    fn inv(a: &u64) -> Result<u64, FieldError> {
        if *a == 0 {
            return Err(FieldError::DivisionByZero);
        }
        Ok(Self::pow(a, (MODULUS - 2) as u128))
    }

    fn eq(a: &u64, b: &u64) -> bool {
        a == b
    }

    fn zero() -> u64 {
        0
    }

    fn one() -> u64 {
        1
    }

    fn from_u64(x: u64) -> u64 {
        x % MODULUS
    }

    fn from_base_type(x: u64) -> u64 {
        x % MODULUS
    }
}

/// The Fermat prime `65537 = 2^16 + 1`; its multiplicative group has order
/// `2^16`, so `3`, a generator of the full group, is already a primitive
/// `2^16`-th root of unity.
pub type F65537 = U64TestField<65537>;

impl IsFFTField for F65537 {
    const TWO_ADICITY: u64 = 16;
    const TWO_ADIC_PRIMITVE_ROOT_OF_UNITY: u64 = 3;
    const GENERATOR: u64 = 3;

    fn field_name() -> &'static str {
        "u64_test_field_65537"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::element::FieldElement;

    type FE = FieldElement<F65537>;

    #[test]
    fn inverse_round_trips() {
        let a = FE::new(12345);
        assert_eq!(a.clone() * a.inv().unwrap(), FE::one());
    }

    #[test]
    fn generator_has_full_two_adic_order() {
        let g = FE::new(3);
        assert_eq!(g.pow(65536u128), FE::one());
        assert_ne!(g.pow(32768u128), FE::one());
    }
}
