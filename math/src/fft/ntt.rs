use crate::fft::errors::FFTError;
use crate::field::element::FieldElement;
use crate::field::traits::IsFFTField;

fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Recursive radix-2 decimation-in-time NTT. `root` must be a primitive
/// `coefficients.len()`-th root of unity; `coefficients.len()` must be a
/// power of two.
pub fn ntt<F: IsFFTField>(
    root: &FieldElement<F>,
    coefficients: &[FieldElement<F>],
) -> Result<Vec<FieldElement<F>>, FFTError> {
    let n = coefficients.len();
    if !is_power_of_two(n) {
        return Err(FFTError::LengthNotPowerOfTwo(n));
    }
    if n == 1 {
        return Ok(coefficients.to_vec());
    }
    if root.pow(n as u128) != FieldElement::one() || root.pow((n / 2) as u128) == FieldElement::one() {
        return Err(FFTError::RootOrderMismatch);
    }

    let half = n / 2;
    let root_sq = root.clone() * root.clone();
    let evens: Vec<_> = coefficients.iter().step_by(2).cloned().collect();
    let odds: Vec<_> = coefficients.iter().skip(1).step_by(2).cloned().collect();
    let even_ntt = ntt(&root_sq, &evens)?;
    let odd_ntt = ntt(&root_sq, &odds)?;

    let mut result = Vec::with_capacity(n);
    let mut power = FieldElement::one();
    for i in 0..n {
        result.push(even_ntt[i % half].clone() + power.clone() * odd_ntt[i % half].clone());
        power = power * root.clone();
    }
    Ok(result)
}

/// Inverse NTT: `ntt(1/root, values)` scaled by `1/n`.
pub fn intt<F: IsFFTField>(
    root: &FieldElement<F>,
    values: &[FieldElement<F>],
) -> Result<Vec<FieldElement<F>>, FFTError> {
    let root_inv = root.inv().map_err(|_| FFTError::RootOrderMismatch)?;
    let transformed = ntt(&root_inv, values)?;
    let n_inv = FieldElement::<F>::from(values.len() as u64)
        .inv()
        .map_err(|_| FFTError::RootOrderMismatch)?;
    Ok(transformed.into_iter().map(|v| v * n_inv.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::test_fields::u64_test_field::F65537;

    type FE = FieldElement<F65537>;

    fn root_of_order(n: u128) -> FE {
        // F65537::GENERATOR (3) has order 65536 = 2^16.
        let g = FE::new(3);
        g.pow(65536u128 / n)
    }

    #[test]
    fn ntt_intt_round_trip() {
        let root = root_of_order(8);
        let xs: Vec<_> = (1..=8u64).map(FE::from).collect();
        let forward = ntt(&root, &xs).unwrap();
        let back = intt(&root, &forward).unwrap();
        assert_eq!(back, xs);
    }

    #[test]
    fn rejects_non_power_of_two_length() {
        let root = root_of_order(8);
        let xs: Vec<_> = (1..=7u64).map(FE::from).collect();
        assert_eq!(
            ntt(&root, &xs).unwrap_err(),
            FFTError::LengthNotPowerOfTwo(7)
        );
    }

    #[test]
    fn rejects_wrong_order_root() {
        let root = root_of_order(4); // order 4, not 8
        let xs: Vec<_> = (1..=8u64).map(FE::from).collect();
        assert_eq!(ntt(&root, &xs).unwrap_err(), FFTError::RootOrderMismatch);
    }
}
