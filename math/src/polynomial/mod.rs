use crate::field::element::FieldElement;
use crate::field::traits::IsField;
use std::ops::{Add, Div, Mul, Rem, Sub};

/// A dense univariate polynomial over `F`, stored low-degree-coefficient
/// first. Canonical form never carries trailing zero coefficients; the zero
/// polynomial is the empty coefficient vector and has degree `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<F: IsField> {
    coefficients: Vec<FieldElement<F>>,
}

impl<F: IsField> Polynomial<F> {
    pub fn new(coefficients: &[FieldElement<F>]) -> Self {
        let mut poly = Self {
            coefficients: coefficients.to_vec(),
        };
        poly.trim();
        poly
    }

    pub fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    pub fn new_monomial(coefficient: FieldElement<F>, degree: usize) -> Self {
        if coefficient.is_zero() {
            return Self::zero();
        }
        let mut coefficients = vec![FieldElement::zero(); degree + 1];
        coefficients[degree] = coefficient;
        Self { coefficients }
    }

    fn trim(&mut self) {
        while self.coefficients.last().is_some_and(|c| c.is_zero()) {
            self.coefficients.pop();
        }
    }

    pub fn coefficients(&self) -> &[FieldElement<F>] {
        &self.coefficients
    }

    /// Degree of the zero polynomial is `-1`.
    pub fn degree(&self) -> isize {
        self.coefficients.len() as isize - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn leading_coefficient(&self) -> FieldElement<F> {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(FieldElement::zero)
    }

    /// Horner's method.
    pub fn evaluate(&self, point: &FieldElement<F>) -> FieldElement<F> {
        let mut result = FieldElement::zero();
        for c in self.coefficients.iter().rev() {
            result = result * point.clone() + c.clone();
        }
        result
    }

    pub fn evaluate_domain(&self, domain: &[FieldElement<F>]) -> Vec<FieldElement<F>> {
        domain.iter().map(|x| self.evaluate(x)).collect()
    }

    /// Returns `Q` with `Q(x) = P(factor * x)`, by scaling coefficient `i` by
    /// `factor^i`.
    pub fn scale(&self, factor: &FieldElement<F>) -> Self {
        let mut power = FieldElement::one();
        let coefficients = self
            .coefficients
            .iter()
            .map(|c| {
                let scaled = c.clone() * power.clone();
                power = power.clone() * factor.clone();
                scaled
            })
            .collect::<Vec<_>>();
        Self::new(&coefficients)
    }

    /// Long division, returning `(quotient, remainder)`.
    pub fn divide_with_remainder(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");
        if self.degree() < divisor.degree() {
            return (Self::zero(), self.clone());
        }
        let mut remainder = self.coefficients.clone();
        let divisor_degree = divisor.degree() as usize;
        let divisor_lead_inv = divisor
            .leading_coefficient()
            .inv()
            .expect("divisor leading coefficient is nonzero");
        let quotient_degree = (self.degree() - divisor.degree()) as usize;
        let mut quotient = vec![FieldElement::zero(); quotient_degree + 1];

        for i in (0..=quotient_degree).rev() {
            let remainder_degree = remainder.len() as isize - 1;
            if remainder_degree < (divisor_degree + i) as isize {
                continue;
            }
            let coefficient = remainder[divisor_degree + i].clone() * divisor_lead_inv.clone();
            quotient[i] = coefficient.clone();
            for (j, dc) in divisor.coefficients.iter().enumerate() {
                remainder[i + j] = remainder[i + j].clone() - coefficient.clone() * dc.clone();
            }
        }

        let mut quotient = Polynomial::new(&quotient);
        let mut remainder = Polynomial::new(&remainder);
        quotient.trim();
        remainder.trim();
        (quotient, remainder)
    }

    /// Exact division; panics if the remainder is nonzero.
    pub fn exact_divide(&self, divisor: &Self) -> Self {
        let (quotient, remainder) = self.divide_with_remainder(divisor);
        assert!(remainder.is_zero(), "exact_divide: remainder not zero");
        quotient
    }

    pub fn pow(&self, mut exponent: u64) -> Self {
        let mut result = Self::new_monomial(FieldElement::one(), 0);
        let mut base = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.clone() * base.clone();
            }
            base = base.clone() * base.clone();
            exponent >>= 1;
        }
        result
    }

    /// Lagrange interpolation, O(n^2). `domain` points must be distinct.
    pub fn interpolate(domain: &[FieldElement<F>], values: &[FieldElement<F>]) -> Self {
        assert_eq!(domain.len(), values.len());
        let x = Self::new_monomial(FieldElement::one(), 1);
        let mut acc = Self::zero();
        for i in 0..domain.len() {
            let mut numerator = Self::new_monomial(FieldElement::one(), 0);
            let mut denominator = FieldElement::one();
            for j in 0..domain.len() {
                if i == j {
                    continue;
                }
                numerator = numerator * (x.clone() - Self::new(&[domain[j].clone()]));
                denominator = denominator * (domain[i].clone() - domain[j].clone());
            }
            let scale = values[i].clone()
                * denominator
                    .inv()
                    .expect("domain points must be distinct");
            acc = acc + numerator * Self::new(&[scale]);
        }
        acc
    }

    /// `Π(x - d)` over every point in `domain`.
    pub fn zerofier_domain(domain: &[FieldElement<F>]) -> Self {
        let x = Self::new_monomial(FieldElement::one(), 1);
        domain.iter().fold(Self::new_monomial(FieldElement::one(), 0), |acc, d| {
            acc * (x.clone() - Self::new(&[d.clone()]))
        })
    }

    /// True iff the interpolant through `points` has degree <= 1.
    pub fn is_colinear(points: &[(FieldElement<F>, FieldElement<F>)]) -> bool {
        let domain: Vec<_> = points.iter().map(|(x, _)| x.clone()).collect();
        let unique: std::collections::HashSet<_> =
            domain.iter().map(|d| d.value().clone()).collect();
        if unique.len() != domain.len() {
            return false;
        }
        let values: Vec<_> = points.iter().map(|(_, y)| y.clone()).collect();
        let interpolant = Self::interpolate(&domain, &values);
        interpolant.degree() <= 1
    }
}

impl<F: IsField> Add for Polynomial<F> {
    type Output = Polynomial<F>;
    fn add(self, rhs: Self) -> Self::Output {
        let n = self.coefficients.len().max(rhs.coefficients.len());
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.coefficients.get(i).cloned().unwrap_or_else(FieldElement::zero);
            let b = rhs.coefficients.get(i).cloned().unwrap_or_else(FieldElement::zero);
            out.push(a + b);
        }
        Polynomial::new(&out)
    }
}

impl<F: IsField> Sub for Polynomial<F> {
    type Output = Polynomial<F>;
    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl<F: IsField> std::ops::Neg for Polynomial<F> {
    type Output = Polynomial<F>;
    fn neg(self) -> Self::Output {
        Polynomial::new(
            &self
                .coefficients
                .into_iter()
                .map(|c| -c)
                .collect::<Vec<_>>(),
        )
    }
}

impl<F: IsField> Mul for Polynomial<F> {
    type Output = Polynomial<F>;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut out = vec![FieldElement::zero(); self.coefficients.len() + rhs.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coefficients.iter().enumerate() {
                out[i + j] = out[i + j].clone() + a.clone() * b.clone();
            }
        }
        Polynomial::new(&out)
    }
}

impl<F: IsField> Div for Polynomial<F> {
    type Output = Polynomial<F>;
    fn div(self, rhs: Self) -> Self::Output {
        self.exact_divide(&rhs)
    }
}

impl<F: IsField> Rem for Polynomial<F> {
    type Output = Polynomial<F>;
    fn rem(self, rhs: Self) -> Self::Output {
        self.divide_with_remainder(&rhs).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::test_fields::u64_test_field::F65537;

    type FE = FieldElement<F65537>;
    type Poly = Polynomial<F65537>;

    fn fe(x: u64) -> FE {
        FE::from(x)
    }

    #[test]
    fn degree_of_zero_is_minus_one() {
        assert_eq!(Poly::zero().degree(), -1);
    }

    #[test]
    fn addition_is_commutative_and_distributive_over_mul() {
        let a = Poly::new(&[fe(1), fe(2), fe(3)]);
        let b = Poly::new(&[fe(4), fe(5)]);
        let c = Poly::new(&[fe(6)]);
        assert_eq!(a.clone() + b.clone(), b.clone() + a.clone());
        let lhs = (a.clone() + b.clone()) * c.clone();
        let rhs = a * c.clone() + b * c;
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn exact_division_round_trip() {
        let a = Poly::new(&[fe(1), fe(2), fe(3)]);
        let b = Poly::new(&[fe(7), fe(1)]);
        let product = a.clone() * b.clone();
        assert_eq!(product.exact_divide(&a), b);
    }

    #[test]
    fn interpolation_is_exact_on_its_domain() {
        let domain = vec![fe(1), fe(2), fe(3), fe(4)];
        let values = vec![fe(10), fe(11), fe(20), fe(5)];
        let poly = Poly::interpolate(&domain, &values);
        for (x, y) in domain.iter().zip(values.iter()) {
            assert_eq!(poly.evaluate(x), *y);
        }
    }

    #[test]
    fn zerofier_vanishes_on_its_domain_and_has_matching_degree() {
        let domain = vec![fe(1), fe(2), fe(3)];
        let z = Poly::zerofier_domain(&domain);
        assert_eq!(z.degree(), domain.len() as isize);
        for d in &domain {
            assert!(z.evaluate(d).is_zero());
        }
    }

    #[test]
    fn colinear_points_detected() {
        // y = 2x + 1
        let pts = vec![(fe(1), fe(3)), (fe(2), fe(5)), (fe(3), fe(7))];
        assert!(Poly::is_colinear(&pts));
        let not_colinear = vec![(fe(1), fe(3)), (fe(2), fe(5)), (fe(3), fe(8))];
        assert!(!Poly::is_colinear(&not_colinear));
    }

    #[test]
    fn scale_matches_direct_substitution() {
        let p = Poly::new(&[fe(1), fe(2), fe(3)]);
        let factor = fe(5);
        let scaled = p.scale(&factor);
        let x = fe(7);
        assert_eq!(scaled.evaluate(&x), p.evaluate(&(factor * x)));
    }
}
