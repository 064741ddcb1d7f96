use crate::fft::errors::FFTError;
use crate::fft::ntt::{intt, ntt};
use crate::field::element::FieldElement;
use crate::field::traits::IsFFTField;
use crate::polynomial::Polynomial;

fn pad<F: IsFFTField>(coefficients: &[FieldElement<F>], len: usize) -> Vec<FieldElement<F>> {
    let mut v = coefficients.to_vec();
    v.resize(len, FieldElement::zero());
    v
}

/// Schoolbook multiplication below this combined degree; the NTT setup cost
/// isn't worth it for small polynomials.
const SCHOOLBOOK_THRESHOLD: isize = 8;

/// Zero-pads both operands to `order`, transforms, multiplies pointwise, and
/// inverse-transforms. `root` must be a primitive `root_order`-th root of
/// unity; the smallest sufficient power-of-two transform length is chosen
/// automatically by halving `root`/`order` while still large enough.
pub fn fast_multiply<F: IsFFTField>(
    lhs: &Polynomial<F>,
    rhs: &Polynomial<F>,
    root: &FieldElement<F>,
    root_order: usize,
) -> Result<Polynomial<F>, FFTError> {
    if lhs.is_zero() || rhs.is_zero() {
        return Ok(Polynomial::zero());
    }
    let degree = lhs.degree() + rhs.degree();
    if degree < SCHOOLBOOK_THRESHOLD {
        return Ok(lhs.clone() * rhs.clone());
    }

    let mut root = root.clone();
    let mut order = root_order;
    while (degree as usize) < order / 2 {
        root = root.clone() * root.clone();
        order /= 2;
    }

    let lhs_codeword = ntt(&root, &pad(lhs.coefficients(), order))?;
    let rhs_codeword = ntt(&root, &pad(rhs.coefficients(), order))?;
    let hadamard: Vec<_> = lhs_codeword
        .into_iter()
        .zip(rhs_codeword)
        .map(|(a, b)| a * b)
        .collect();
    let coefficients = intt(&root, &hadamard)?;
    let truncated = &coefficients[..=(degree as usize)];
    Ok(Polynomial::new(truncated))
}

/// Subproduct-tree zerofier: `Π(x - d)` over `domain`.
pub fn fast_zerofier<F: IsFFTField>(
    domain: &[FieldElement<F>],
    root: &FieldElement<F>,
    root_order: usize,
) -> Result<Polynomial<F>, FFTError> {
    match domain.len() {
        0 => Ok(Polynomial::zero()),
        1 => Ok(Polynomial::new(&[-domain[0].clone(), FieldElement::one()])),
        _ => {
            let half = domain.len() / 2;
            let left = fast_zerofier(&domain[..half], root, root_order)?;
            let right = fast_zerofier(&domain[half..], root, root_order)?;
            fast_multiply(&left, &right, root, root_order)
        }
    }
}

/// Subproduct-tree multi-point evaluation.
pub fn fast_evaluate<F: IsFFTField>(
    polynomial: &Polynomial<F>,
    domain: &[FieldElement<F>],
    root: &FieldElement<F>,
    root_order: usize,
) -> Result<Vec<FieldElement<F>>, FFTError> {
    match domain.len() {
        0 => Ok(vec![]),
        1 => Ok(vec![polynomial.evaluate(&domain[0])]),
        _ => {
            let half = domain.len() / 2;
            let left_zerofier = fast_zerofier(&domain[..half], root, root_order)?;
            let right_zerofier = fast_zerofier(&domain[half..], root, root_order)?;
            let left_rem = polynomial.clone().rem(left_zerofier);
            let right_rem = polynomial.clone().rem(right_zerofier);
            let mut left = fast_evaluate(&left_rem, &domain[..half], root, root_order)?;
            let right = fast_evaluate(&right_rem, &domain[half..], root, root_order)?;
            left.extend(right);
            Ok(left)
        }
    }
}

/// Dual subquotient-tree interpolation. `domain` points must be unique.
pub fn fast_interpolate<F: IsFFTField>(
    domain: &[FieldElement<F>],
    values: &[FieldElement<F>],
    root: &FieldElement<F>,
    root_order: usize,
) -> Result<Polynomial<F>, FFTError> {
    assert_eq!(domain.len(), values.len());
    match domain.len() {
        0 => Ok(Polynomial::zero()),
        1 => Ok(Polynomial::new(&[values[0].clone()])),
        _ => {
            let half = domain.len() / 2;
            let left_zerofier = fast_zerofier(&domain[..half], root, root_order)?;
            let right_zerofier = fast_zerofier(&domain[half..], root, root_order)?;

            let left_offset = fast_evaluate(&right_zerofier, &domain[..half], root, root_order)?;
            let right_offset = fast_evaluate(&left_zerofier, &domain[half..], root, root_order)?;

            let left_targets = values[..half]
                .iter()
                .zip(left_offset.iter())
                .map(|(v, d)| Ok(v.clone() * d.inv().map_err(|_| FFTError::NonUniqueDomain)?))
                .collect::<Result<Vec<_>, FFTError>>()?;
            let right_targets = values[half..]
                .iter()
                .zip(right_offset.iter())
                .map(|(v, d)| Ok(v.clone() * d.inv().map_err(|_| FFTError::NonUniqueDomain)?))
                .collect::<Result<Vec<_>, FFTError>>()?;

            let left_interpolant =
                fast_interpolate(&domain[..half], &left_targets, root, root_order)?;
            let right_interpolant =
                fast_interpolate(&domain[half..], &right_targets, root, root_order)?;

            let a = fast_multiply(&left_interpolant, &right_zerofier, root, root_order)?;
            let b = fast_multiply(&right_interpolant, &left_zerofier, root, root_order)?;
            Ok(a + b)
        }
    }
}

/// Returns the NTT of `poly.scale(offset)`, zero-padded to `order`. `gen`
/// must be a primitive `order`-th root of unity.
pub fn fast_coset_evaluate<F: IsFFTField>(
    polynomial: &Polynomial<F>,
    offset: &FieldElement<F>,
    gen: &FieldElement<F>,
    order: usize,
) -> Result<Vec<FieldElement<F>>, FFTError> {
    let scaled = polynomial.scale(offset);
    ntt(gen, &pad(scaled.coefficients(), order))
}

/// Division on a coset: avoids zero divisors because the transition
/// zerofier vanishes only on the trace subgroup, not on the coset `offset *
/// <root>`.
pub fn fast_coset_divide<F: IsFFTField>(
    lhs: &Polynomial<F>,
    rhs: &Polynomial<F>,
    offset: &FieldElement<F>,
    root: &FieldElement<F>,
    root_order: usize,
) -> Result<Polynomial<F>, FFTError> {
    assert!(!rhs.is_zero(), "fast_coset_divide: division by zero polynomial");
    let degree = lhs.degree().max(rhs.degree());
    if degree < SCHOOLBOOK_THRESHOLD {
        return Ok(lhs.clone().exact_divide(rhs));
    }

    let mut root = root.clone();
    let mut order = root_order;
    while (degree as usize) < order / 2 {
        root = root.clone() * root.clone();
        order /= 2;
    }

    let offset_inv = offset.inv().expect("offset must be nonzero");
    let scaled_lhs = lhs.scale(offset);
    let scaled_rhs = rhs.scale(offset);

    let lhs_codeword = ntt(&root, &pad(scaled_lhs.coefficients(), order))?;
    let rhs_codeword = ntt(&root, &pad(scaled_rhs.coefficients(), order))?;
    let quotient_codeword: Vec<_> = lhs_codeword
        .into_iter()
        .zip(rhs_codeword)
        .map(|(a, b)| a * b.inv().expect("rhs codeword evaluates to zero on the coset"))
        .collect();
    let scaled_quotient_coeffs = intt(&root, &quotient_codeword)?;
    let quotient_len = (lhs.degree() - rhs.degree() + 1) as usize;
    let scaled_quotient = Polynomial::new(&scaled_quotient_coeffs[..quotient_len]);
    Ok(scaled_quotient.scale(&offset_inv))
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

    fn root_of_order(n: u128) -> FE {
        let g = FE::new(3);
        g.pow(65536u128 / n)
    }

    #[test]
    fn fast_multiply_matches_schoolbook_above_threshold() {
        let root = root_of_order(32);
        let a = Poly::new(&(0..10).map(fe).collect::<Vec<_>>());
        let b = Poly::new(&(1..11).map(fe).collect::<Vec<_>>());
        let fast = fast_multiply(&a, &b, &root, 32).unwrap();
        assert_eq!(fast, a * b);
    }

    #[test]
    fn fast_zerofier_matches_schoolbook() {
        let root = root_of_order(16);
        let domain: Vec<_> = (1..=6u64).map(fe).collect();
        let fast = fast_zerofier(&domain, &root, 16).unwrap();
        let slow = Poly::zerofier_domain(&domain);
        assert_eq!(fast, slow);
    }

    #[test]
    fn fast_evaluate_matches_pointwise_evaluate() {
        let root = root_of_order(16);
        let domain: Vec<_> = (1..=6u64).map(fe).collect();
        let p = Poly::new(&(0..5).map(fe).collect::<Vec<_>>());
        let fast = fast_evaluate(&p, &domain, &root, 16).unwrap();
        let slow: Vec<_> = domain.iter().map(|d| p.evaluate(d)).collect();
        assert_eq!(fast, slow);
    }

    #[test]
    fn fast_interpolate_matches_lagrange() {
        let root = root_of_order(16);
        let domain: Vec<_> = (1..=6u64).map(fe).collect();
        let values: Vec<_> = vec![fe(4), fe(9), fe(2), fe(7), fe(1), fe(0)];
        let fast = fast_interpolate(&domain, &values, &root, 16).unwrap();
        let slow = Poly::interpolate(&domain, &values);
        assert_eq!(fast, slow);
    }

    #[test]
    fn fast_coset_divide_undoes_fast_multiply() {
        let root = root_of_order(32);
        let a = Poly::new(&(0..10).map(fe).collect::<Vec<_>>());
        let b = Poly::new(&(1..11).map(fe).collect::<Vec<_>>());
        let offset = fe(5);
        let product = a.clone() * b.clone();
        let quotient = fast_coset_divide(&product, &b, &offset, &root, 32).unwrap();
        assert_eq!(quotient, a);
    }
}
