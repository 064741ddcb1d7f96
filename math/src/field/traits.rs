use crate::errors::FieldError;
use crate::field::element::FieldElement;
use std::fmt::Debug;

/// A finite field, implemented as a zero-sized type carrying its arithmetic
/// as associated functions over `BaseType`. The field itself holds no data;
/// values live in `FieldElement<Self>`.
pub trait IsField: Debug + Clone {
    /// The underlying representation of a field element, stored canonically
    /// in `[0, modulus)`.
    type BaseType: Clone + Debug + PartialEq + Eq + Send + Sync;

    /// Returns the sum of `a` and `b`.
    fn add(a: &Self::BaseType, b: &Self::BaseType) -> Self::BaseType;

    /// Returns the multiplication of `a` and `b`.
    fn mul(a: &Self::BaseType, b: &Self::BaseType) -> Self::BaseType;

    /// Returns `a` raised to the power of `exponent`, by square-and-multiply.
    fn pow(a: &Self::BaseType, mut exponent: u128) -> Self::BaseType {
        let mut result = Self::one();
        let mut base = a.clone();

        while exponent > 0 {
            if exponent & 1 == 1 {
                result = Self::mul(&result, &base);
            }
            exponent >>= 1;
            base = Self::mul(&base, &base);
        }
        result
    }

    /// Returns the subtraction of `a` and `b`.
    fn sub(a: &Self::BaseType, b: &Self::BaseType) -> Self::BaseType;

    /// Returns the additive inverse of `a`.
    fn neg(a: &Self::BaseType) -> Self::BaseType;

    /// Returns the multiplicative inverse of `a`. Fails with
    /// `FieldError::DivisionByZero` when `a` is the additive identity.
    fn inv(a: &Self::BaseType) -> Result<Self::BaseType, FieldError>;

    /// Returns the division of `a` and `b`.
    fn div(a: &Self::BaseType, b: &Self::BaseType) -> Result<Self::BaseType, FieldError> {
        Ok(Self::mul(a, &Self::inv(b)?))
    }

    /// Returns a boolean indicating whether `a` and `b` are equal or not.
    fn eq(a: &Self::BaseType, b: &Self::BaseType) -> bool;

    /// Returns the additive neutral element.
    fn zero() -> Self::BaseType;

    /// Returns the multiplicative neutral element.
    fn one() -> Self::BaseType;

    /// Returns the element `x * 1` where 1 is the multiplicative neutral element.
    fn from_u64(x: u64) -> Self::BaseType;

    /// Takes as input an element of BaseType and returns the internal representation
    /// of that element in the field.
    fn from_base_type(x: Self::BaseType) -> Self::BaseType;
}

/// A field equipped with a distinguished two-adic subgroup, usable for NTT/FFT
/// style evaluation and interpolation, and with a public generator for coset
/// shifts (used by FRI to avoid the zeros of the transition zerofier).
pub trait IsFFTField: IsField {
    /// The largest `k` such that `2^k` divides `modulus - 1`.
    const TWO_ADICITY: u64;
    /// A primitive `2^TWO_ADICITY`-th root of unity.
    const TWO_ADIC_PRIMITVE_ROOT_OF_UNITY: Self::BaseType;
    /// A multiplicative generator of the full field.
    const GENERATOR: Self::BaseType;

    fn field_name() -> &'static str {
        "unknown field"
    }

    /// A primitive `n`th root of unity, obtained by repeated squaring of
    /// `GENERATOR` until its order is exactly `n`. Fails unless `n` is a
    /// power of two no greater than `2^TWO_ADICITY`.
    fn get_primitive_root_of_unity(n: u64) -> Result<FieldElement<Self>, FieldError> {
        if n == 0 || (n & (n - 1)) != 0 {
            return Err(FieldError::InvalidValue);
        }
        let two_adic_order = 1u128 << Self::TWO_ADICITY;
        if n as u128 > two_adic_order {
            return Err(FieldError::InvalidValue);
        }
        let generator = FieldElement::<Self>::new(Self::TWO_ADIC_PRIMITVE_ROOT_OF_UNITY);
        Ok(generator.pow(two_adic_order / n as u128))
    }
}
