use crate::errors::FieldError;
use crate::field::element::FieldElement;
use crate::field::traits::{IsFFTField, IsField};
use crate::traits::ByteConversion;

/// `p = 1 + 407 * 2^119`. A 128-bit prime with multiplicative group of order
/// `p - 1 = 407 * 2^119`, giving a two-adicity of exactly 119.
pub const MODULUS: u128 = 1u128 + (407u128 << 119);

/// `2^128 mod p`, used to correct for the carry lost when a `u128` addition
/// wraps around.
const TWO_POW_128_MOD_P: u128 = u128::MAX - MODULUS + 1;

/// A designated element of order `2^119`. Used both as the source of every
/// primitive root of unity (by repeated squaring) and, unsquared, as the
/// coset offset for FRI and boundary/transition quotient evaluation.
pub const GENERATOR: u128 = 85408008396924667383611388730472331217;

fn add_mod(a: u128, b: u128) -> u128 {
    let (sum, overflow) = a.overflowing_add(b);
    if overflow {
        // a + b = sum + 2^128 (mathematically); subtracting p once suffices
        // since a, b < p < 2^128 implies a + b < 2p, and p < 2^128 implies
        // 2^128 < 2p, so a + b - p < p.
        sum.wrapping_add(TWO_POW_128_MOD_P)
    } else if sum >= MODULUS {
        sum - MODULUS
    } else {
        sum
    }
}

fn sub_mod(a: u128, b: u128) -> u128 {
    if a >= b {
        a - b
    } else {
        // a - b wraps to a - b + 2^128; add p back in one normalization step.
        a.wrapping_sub(b).wrapping_sub(TWO_POW_128_MOD_P)
    }
}

fn neg_mod(a: u128) -> u128 {
    if a == 0 {
        0
    } else {
        MODULUS - a
    }
}

/// Binary (double-and-add) multiplication modulo `p`, built entirely out of
/// `add_mod`. Slower than a Montgomery or Barrett reduction, but its
/// correctness follows directly from `add_mod`'s, which is easy to verify by
/// inspection — the right tradeoff for arithmetic this load-bearing.
fn mul_mod(a: u128, b: u128) -> u128 {
    let mut acc = 0u128;
    for i in (0..128).rev() {
        acc = add_mod(acc, acc);
        if (b >> i) & 1 == 1 {
            acc = add_mod(acc, a);
        }
    }
    acc
}

/// The fixed STARK prime field `1 + 407*2^119`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarkAnatomyPrimeField;

impl IsField for StarkAnatomyPrimeField {
    type BaseType = u128;

    fn add(a: &u128, b: &u128) -> u128 {
        add_mod(*a, *b)
    }

    fn sub(a: &u128, b: &u128) -> u128 {
        sub_mod(*a, *b)
    }

    fn mul(a: &u128, b: &u128) -> u128 {
        mul_mod(*a, *b)
    }

    fn neg(a: &u128) -> u128 {
        neg_mod(*a)
    }

    fn inv(a: &u128) -> Result<u128, FieldError> {
        if *a == 0 {
            return Err(FieldError::DivisionByZero);
        }
        // Fermat's little theorem: a^(p-2) = a^-1 for a != 0 in a prime field.
        Ok(Self::pow(a, MODULUS - 2))
    }

    fn eq(a: &u128, b: &u128) -> bool {
        a == b
    }

    fn zero() -> u128 {
        0
    }

    fn one() -> u128 {
        1
    }

    fn from_u64(x: u64) -> u128 {
        x as u128 % MODULUS
    }

    fn from_base_type(x: u128) -> u128 {
        x % MODULUS
    }
}

impl IsFFTField for StarkAnatomyPrimeField {
    const TWO_ADICITY: u64 = 119;
    const TWO_ADIC_PRIMITVE_ROOT_OF_UNITY: u128 = GENERATOR;
    const GENERATOR: u128 = GENERATOR;

    fn field_name() -> &'static str {
        "stark_anatomy_prime_field"
    }
}

impl ByteConversion for FieldElement<StarkAnatomyPrimeField> {
    fn to_bytes_be(&self) -> Vec<u8> {
        self.value().to_be_bytes().to_vec()
    }

    fn to_bytes_le(&self) -> Vec<u8> {
        self.value().to_le_bytes().to_vec()
    }
}
