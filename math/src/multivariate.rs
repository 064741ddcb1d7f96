use crate::field::element::FieldElement;
use crate::field::traits::IsField;
use crate::polynomial::Polynomial;
use std::collections::HashMap;
use std::ops::{Add, Mul, Neg, Sub};

/// A sparse multivariate polynomial: a map from exponent vector to
/// coefficient. Every key must have the same length within one polynomial;
/// canonical form omits zero-coefficient entries. Used to express AIR
/// transition constraints over the symbolic point `(x, current row, next
/// row)`.
#[derive(Debug, Clone)]
pub struct MPolynomial<F: IsField> {
    dictionary: HashMap<Vec<u64>, FieldElement<F>>,
}

impl<F: IsField> MPolynomial<F> {
    pub fn new(dictionary: HashMap<Vec<u64>, FieldElement<F>>) -> Self {
        let num_vars = dictionary.keys().map(|k| k.len()).max().unwrap_or(0);
        for k in dictionary.keys() {
            assert_eq!(k.len(), num_vars, "all exponent vectors must share a length");
        }
        let mut p = Self { dictionary };
        p.trim();
        p
    }

    pub fn zero() -> Self {
        Self {
            dictionary: HashMap::new(),
        }
    }

    fn trim(&mut self) {
        self.dictionary.retain(|_, v| !v.is_zero());
    }

    pub fn dictionary(&self) -> &HashMap<Vec<u64>, FieldElement<F>> {
        &self.dictionary
    }

    pub fn num_variables(&self) -> usize {
        self.dictionary.keys().map(|k| k.len()).max().unwrap_or(0)
    }

    pub fn constant(value: FieldElement<F>) -> Self {
        if value.is_zero() {
            return Self::zero();
        }
        let mut dictionary = HashMap::new();
        dictionary.insert(vec![], value);
        Self { dictionary }
    }

    /// The `n` degree-1 monomials `e_0, ..., e_{n-1}`.
    pub fn variables(n: usize) -> Vec<Self> {
        (0..n)
            .map(|i| {
                let mut exponent = vec![0u64; n];
                exponent[i] = 1;
                let mut dictionary = HashMap::new();
                dictionary.insert(exponent, FieldElement::one());
                Self { dictionary }
            })
            .collect()
    }

    /// Embeds `polynomial` as the `(variable_index + 1)`-variable polynomial
    /// acting only on variable `variable_index`.
    pub fn lift(polynomial: &Polynomial<F>, variable_index: usize) -> Self {
        if polynomial.is_zero() {
            return Self::zero();
        }
        let x = Self::variables(variable_index + 1)
            .into_iter()
            .last()
            .unwrap();
        let mut acc = Self::zero();
        let mut x_power = Self::constant(FieldElement::one());
        for c in polynomial.coefficients() {
            acc = acc + x_power.clone() * Self::constant(c.clone());
            x_power = x_power * x.clone();
        }
        acc
    }

    fn pad_exponents(exponents: &[u64], len: usize) -> Vec<u64> {
        let mut v = exponents.to_vec();
        v.resize(len, 0);
        v
    }

    pub fn evaluate(&self, point: &[FieldElement<F>]) -> FieldElement<F> {
        let mut acc = FieldElement::zero();
        for (exponents, coefficient) in &self.dictionary {
            assert!(
                exponents.len() <= point.len(),
                "evaluation point has fewer coordinates than this polynomial's variables"
            );
            let mut term = coefficient.clone();
            for (e, x) in exponents.iter().zip(point.iter()) {
                term = term * x.pow(*e as u128);
            }
            acc = acc + term;
        }
        acc
    }

    /// Substitutes a univariate polynomial for each variable, returning the
    /// resulting univariate polynomial. This is how transition constraints
    /// are lifted over trace polynomials.
    pub fn evaluate_symbolic(&self, point: &[Polynomial<F>]) -> Polynomial<F> {
        let mut acc = Polynomial::zero();
        for (exponents, coefficient) in &self.dictionary {
            assert!(exponents.len() <= point.len());
            let mut term = Polynomial::new(&[coefficient.clone()]);
            for (e, p) in exponents.iter().zip(point.iter()) {
                term = term * p.pow(*e);
            }
            acc = acc + term;
        }
        acc
    }

    pub fn pow(&self, mut exponent: u64) -> Self {
        let mut result = Self::constant(FieldElement::one());
        let mut base = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base.clone();
            exponent >>= 1;
        }
        result
    }
}

impl<F: IsField> PartialEq for MPolynomial<F> {
    fn eq(&self, other: &Self) -> bool {
        let n = self.num_variables().max(other.num_variables());
        let lift = |d: &HashMap<Vec<u64>, FieldElement<F>>| -> HashMap<Vec<u64>, FieldElement<F>> {
            d.iter()
                .map(|(k, v)| (Self::pad_exponents(k, n), v.clone()))
                .collect()
        };
        lift(&self.dictionary) == lift(&other.dictionary)
    }
}

impl<F: IsField> Add for MPolynomial<F> {
    type Output = MPolynomial<F>;
    fn add(self, rhs: Self) -> Self::Output {
        let n = self.num_variables().max(rhs.num_variables());
        let mut dictionary: HashMap<Vec<u64>, FieldElement<F>> = HashMap::new();
        for (k, v) in self.dictionary {
            dictionary.insert(Self::pad_exponents(&k, n), v);
        }
        for (k, v) in rhs.dictionary {
            let key = Self::pad_exponents(&k, n);
            let entry = dictionary
                .entry(key)
                .or_insert_with(FieldElement::zero);
            *entry = entry.clone() + v;
        }
        MPolynomial::new(dictionary)
    }
}

impl<F: IsField> Neg for MPolynomial<F> {
    type Output = MPolynomial<F>;
    fn neg(self) -> Self::Output {
        MPolynomial {
            dictionary: self
                .dictionary
                .into_iter()
                .map(|(k, v)| (k, -v))
                .collect(),
        }
    }
}

impl<F: IsField> Sub for MPolynomial<F> {
    type Output = MPolynomial<F>;
    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl<F: IsField> Mul for MPolynomial<F> {
    type Output = MPolynomial<F>;
    fn mul(self, rhs: Self) -> Self::Output {
        let n = self.num_variables().max(rhs.num_variables());
        let mut dictionary: HashMap<Vec<u64>, FieldElement<F>> = HashMap::new();
        for (ka, va) in &self.dictionary {
            let ka = Self::pad_exponents(ka, n);
            for (kb, vb) in &rhs.dictionary {
                let kb = Self::pad_exponents(kb, n);
                let key: Vec<u64> = ka.iter().zip(kb.iter()).map(|(a, b)| a + b).collect();
                let entry = dictionary.entry(key).or_insert_with(FieldElement::zero);
                *entry = entry.clone() + va.clone() * vb.clone();
            }
        }
        MPolynomial::new(dictionary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::test_fields::u64_test_field::F65537;

    type FE = FieldElement<F65537>;
    type MP = MPolynomial<F65537>;

    fn fe(x: u64) -> FE {
        FE::from(x)
    }

    #[test]
    fn addition_matches_pointwise_evaluation() {
        let vars = MP::variables(2);
        let f = vars[0].clone() + MP::constant(fe(3));
        let g = vars[1].clone() * MP::constant(fe(2));
        let sum = f.clone() + g.clone();
        let point = [fe(5), fe(7)];
        assert_eq!(sum.evaluate(&point), f.evaluate(&point) + g.evaluate(&point));
    }

    #[test]
    fn distributivity() {
        let vars = MP::variables(2);
        let f = vars[0].clone();
        let g = vars[1].clone();
        let h = MP::constant(fe(9));
        let lhs = f.clone() * (g.clone() + h.clone());
        let rhs = f.clone() * g.clone() + f * h;
        let point = [fe(3), fe(11)];
        assert_eq!(lhs.evaluate(&point), rhs.evaluate(&point));
    }

    #[test]
    fn lift_matches_univariate_evaluation_on_the_diagonal() {
        let univariate = Polynomial::new(&[fe(1), fe(2), fe(3)]);
        let lifted = MP::lift(&univariate, 0);
        let x = fe(6);
        assert_eq!(lifted.evaluate(&[x]), univariate.evaluate(&x));
    }

    #[test]
    fn evaluate_symbolic_matches_pointwise_evaluation_after_substitution() {
        let vars = MP::variables(2);
        let constraint = vars[1].clone() - vars[0].clone() * vars[0].clone();
        let t0 = Polynomial::new(&[fe(0), fe(1)]); // t0(x) = x
        let t1 = Polynomial::new(&[fe(0), fe(0), fe(1)]); // t1(x) = x^2
        let symbolic = constraint.evaluate_symbolic(&[t0.clone(), t1.clone()]);
        let x = fe(4);
        let direct = constraint.evaluate(&[t0.evaluate(&x), t1.evaluate(&x)]);
        assert_eq!(symbolic.evaluate(&x), direct);
    }
}
