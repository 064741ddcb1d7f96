use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::{
    StarkAnatomyPrimeField, GENERATOR,
};
use stark_anatomy_math::field::traits::IsFFTField;

use crate::errors::StarkError;

pub type FE = FieldElement<StarkAnatomyPrimeField>;

/// Derived, immutable parameters for one STARK instance: domain sizes and
/// the roots of unity generating them. Two proofs over the same
/// `(num_registers, original_trace_length, expansion_factor,
/// num_colinearity_checks)` share identical parameters and can reuse the
/// preprocessed transition zerofier.
#[derive(Debug, Clone)]
pub struct StarkParameters {
    pub original_trace_length: usize,
    pub num_registers: usize,
    pub expansion_factor: usize,
    pub num_colinearity_checks: usize,
    pub security_level: usize,
    pub transition_constraints_degree: usize,

    pub num_randomizers: usize,
    pub randomized_trace_length: usize,
    pub omicron_domain_length: usize,
    pub fri_domain_length: usize,

    pub omega: FE,
    pub omicron: FE,
    pub offset: FE,
}

impl StarkParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        original_trace_length: usize,
        num_registers: usize,
        expansion_factor: usize,
        num_colinearity_checks: usize,
        security_level: usize,
        transition_constraints_degree: usize,
    ) -> Result<Self, StarkError> {
        if expansion_factor < 4 || !expansion_factor.is_power_of_two() {
            return Err(StarkError::InvalidArgument(
                "expansion_factor must be a power of two >= 4".to_string(),
            ));
        }
        if num_colinearity_checks == 0 {
            return Err(StarkError::InvalidArgument(
                "num_colinearity_checks must be positive".to_string(),
            ));
        }
        if 2 * num_colinearity_checks < security_level {
            return Err(StarkError::InvalidArgument(
                "2 * num_colinearity_checks must be at least security_level".to_string(),
            ));
        }
        if security_level > StarkAnatomyPrimeField::TWO_ADICITY as usize + 9 {
            // The field has ~128 bits; this is a generous sanity bound, not
            // an exact bit count, since p isn't itself a power of two.
            return Err(StarkError::InvalidArgument(
                "security_level exceeds the field's bit length".to_string(),
            ));
        }
        if original_trace_length == 0 {
            return Err(StarkError::InvalidArgument(
                "original_trace_length must be positive".to_string(),
            ));
        }

        let num_randomizers = 4 * num_colinearity_checks;
        let randomized_trace_length = original_trace_length + num_randomizers;
        let omicron_domain_length =
            (randomized_trace_length * transition_constraints_degree).next_power_of_two();
        let fri_domain_length = omicron_domain_length * expansion_factor;

        let omega = StarkAnatomyPrimeField::get_primitive_root_of_unity(fri_domain_length as u64)
            .map_err(|_| {
                StarkError::InvalidArgument(
                    "fri_domain_length exceeds the field's two-adicity".to_string(),
                )
            })?;
        let omicron = StarkAnatomyPrimeField::get_primitive_root_of_unity(
            omicron_domain_length as u64,
        )
        .map_err(|_| {
            StarkError::InvalidArgument(
                "omicron_domain_length exceeds the field's two-adicity".to_string(),
            )
        })?;
        let offset = FE::new(GENERATOR);

        Ok(Self {
            original_trace_length,
            num_registers,
            expansion_factor,
            num_colinearity_checks,
            security_level,
            transition_constraints_degree,
            num_randomizers,
            randomized_trace_length,
            omicron_domain_length,
            fri_domain_length,
            omega,
            omicron,
            offset,
        })
    }

    /// Total number of codewords FRI commits to, including the final one
    /// shipped in the clear: `folds + 1`, where `folds` is how many times
    /// the domain must be halved before it's no larger than the threshold
    /// below which shipping the codeword outright is cheaper than another
    /// round of commit-and-query.
    pub fn num_rounds(&self) -> usize {
        let threshold = self.expansion_factor.max(4 * self.num_colinearity_checks);
        let mut folds = 0;
        let mut size = self.fri_domain_length;
        while size > threshold {
            size /= 2;
            folds += 1;
        }
        folds + 1
    }

    pub fn fri_domain(&self) -> Vec<FE> {
        (0..self.fri_domain_length)
            .map(|i| self.offset.clone() * self.omega.pow(i as u128))
            .collect()
    }

    pub fn omicron_domain(&self) -> Vec<FE> {
        (0..self.omicron_domain_length)
            .map(|i| self.omicron.pow(i as u128))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_lengths_follow_the_derivation_rules() {
        let params = StarkParameters::new(8, 2, 4, 2, 2, 2).unwrap();
        assert_eq!(params.num_randomizers, 8);
        assert_eq!(params.randomized_trace_length, 16);
        assert_eq!(params.omicron_domain_length, 32);
        assert_eq!(params.fri_domain_length, 128);
    }

    #[test]
    fn omega_has_exactly_the_fri_domain_order() {
        let params = StarkParameters::new(8, 2, 4, 2, 2, 2).unwrap();
        assert_eq!(params.omega.pow(params.fri_domain_length as u128), FE::one());
        assert_ne!(
            params.omega.pow((params.fri_domain_length / 2) as u128),
            FE::one()
        );
    }

    #[test]
    fn rejects_non_power_of_two_expansion_factor() {
        assert!(StarkParameters::new(8, 2, 3, 2, 2, 2).is_err());
    }
}
