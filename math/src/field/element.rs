use crate::errors::FieldError;
use crate::field::traits::IsField;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An element of the field `F`, wrapping its canonical `BaseType`
/// representation. Cheaply cloned; every arithmetic operation returns a
/// fully reduced value.
#[derive(Clone)]
pub struct FieldElement<F: IsField> {
    value: F::BaseType,
    phantom: PhantomData<F>,
}

impl<F: IsField> FieldElement<F> {
    pub fn new(value: F::BaseType) -> Self {
        Self {
            value: F::from_base_type(value),
            phantom: PhantomData,
        }
    }

    pub fn value(&self) -> &F::BaseType {
        &self.value
    }

    pub fn zero() -> Self {
        Self::new(F::zero())
    }

    pub fn one() -> Self {
        Self::new(F::one())
    }

    pub fn is_zero(&self) -> bool {
        F::eq(&self.value, &F::zero())
    }

    pub fn inv(&self) -> Result<Self, FieldError> {
        Ok(Self::new(F::inv(&self.value)?))
    }

    /// Square-and-multiply exponentiation by a non-negative integer.
    pub fn pow<T: Into<u128>>(&self, exponent: T) -> Self {
        Self::new(F::pow(&self.value, exponent.into()))
    }

    /// Folds an arbitrary-length big-endian byte string into a field element
    /// by Horner's rule in base 256. A hash-to-field with no rejection
    /// sampling; callers are expected to feed it a uniformly random digest.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let base = Self::from(256u64);
        bytes
            .iter()
            .fold(Self::zero(), |acc, &b| acc * base.clone() + Self::from(b as u64))
    }
}

impl<F: IsField> From<u64> for FieldElement<F> {
    fn from(value: u64) -> Self {
        Self::new(F::from_u64(value))
    }
}

impl<F: IsField> PartialEq for FieldElement<F> {
    fn eq(&self, other: &Self) -> bool {
        F::eq(&self.value, &other.value)
    }
}
impl<F: IsField> Eq for FieldElement<F> {}

impl<F: IsField> fmt::Debug for FieldElement<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:?})", self.value)
    }
}

impl<F: IsField> Add for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn add(self, rhs: Self) -> FieldElement<F> {
        FieldElement::new(F::add(&self.value, &rhs.value))
    }
}
impl<F: IsField> Add for FieldElement<F> {
    type Output = FieldElement<F>;
    fn add(self, rhs: Self) -> FieldElement<F> {
        &self + &rhs
    }
}

impl<F: IsField> Sub for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn sub(self, rhs: Self) -> FieldElement<F> {
        FieldElement::new(F::sub(&self.value, &rhs.value))
    }
}
impl<F: IsField> Sub for FieldElement<F> {
    type Output = FieldElement<F>;
    fn sub(self, rhs: Self) -> FieldElement<F> {
        &self - &rhs
    }
}

impl<F: IsField> Mul for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn mul(self, rhs: Self) -> FieldElement<F> {
        FieldElement::new(F::mul(&self.value, &rhs.value))
    }
}
impl<F: IsField> Mul for FieldElement<F> {
    type Output = FieldElement<F>;
    fn mul(self, rhs: Self) -> FieldElement<F> {
        &self * &rhs
    }
}

impl<F: IsField> Div for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn div(self, rhs: Self) -> FieldElement<F> {
        FieldElement::new(F::div(&self.value, &rhs.value).expect("division by zero"))
    }
}
impl<F: IsField> Div for FieldElement<F> {
    type Output = FieldElement<F>;
    fn div(self, rhs: Self) -> FieldElement<F> {
        &self / &rhs
    }
}

impl<F: IsField> Neg for &FieldElement<F> {
    type Output = FieldElement<F>;
    fn neg(self) -> FieldElement<F> {
        FieldElement::new(F::neg(&self.value))
    }
}
impl<F: IsField> Neg for FieldElement<F> {
    type Output = FieldElement<F>;
    fn neg(self) -> FieldElement<F> {
        -&self
    }
}

impl<F: IsField> std::hash::Hash for FieldElement<F>
where
    F::BaseType: std::hash::Hash,
{
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
