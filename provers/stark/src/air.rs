use stark_anatomy_math::fft::fast_zerofier;
use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;
use stark_anatomy_math::multivariate::MPolynomial;
use stark_anatomy_math::polynomial::Polynomial;

use crate::errors::StarkError;
use crate::parameters::StarkParameters;

pub type FE = FieldElement<StarkAnatomyPrimeField>;

/// `trace[cycle][register] == value`. Boundary constraints pin down initial
/// and final values; everything in between is left to the transition
/// constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryConstraint {
    pub cycle: usize,
    pub register: usize,
    pub value: FE,
}

/// An algebraic intermediate representation: a list of transition
/// constraints, each a multivariate polynomial over `1 + 2*num_registers`
/// variables `(x, current row, next row)`, plus a list of boundary
/// constraints pinning specific `(cycle, register)` cells to fixed values.
#[derive(Debug, Clone)]
pub struct Air {
    pub num_registers: usize,
    pub transition_constraints: Vec<MPolynomial<StarkAnatomyPrimeField>>,
    pub boundary_constraints: Vec<BoundaryConstraint>,
}

impl Air {
    pub fn new(
        num_registers: usize,
        transition_constraints: Vec<MPolynomial<StarkAnatomyPrimeField>>,
        boundary_constraints: Vec<BoundaryConstraint>,
    ) -> Self {
        Self {
            num_registers,
            transition_constraints,
            boundary_constraints,
        }
    }

    pub fn boundary_constraints_for_register(&self, register: usize) -> Vec<&BoundaryConstraint> {
        self.boundary_constraints
            .iter()
            .filter(|bc| bc.register == register)
            .collect()
    }

    /// The degree of the univariate polynomial each transition constraint
    /// becomes once every trace polynomial is substituted in, assuming every
    /// trace column has degree `randomized_trace_length - 1` (the worst
    /// case) and the symbolic point variable `x` has degree 1.
    pub fn transition_degree_bounds(&self, params: &StarkParameters) -> Vec<usize> {
        let trace_degree = params.randomized_trace_length - 1;
        let mut point_degrees = vec![1usize];
        point_degrees.extend(std::iter::repeat(trace_degree).take(2 * self.num_registers));

        self.transition_constraints
            .iter()
            .map(|constraint| {
                constraint
                    .dictionary()
                    .keys()
                    .map(|exponents| {
                        exponents
                            .iter()
                            .zip(point_degrees.iter())
                            .map(|(e, d)| *e as usize * d)
                            .sum::<usize>()
                    })
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// The transition zerofier vanishes on the first `original_trace_length -
    /// 1` points of the trace domain (there's no transition to check out of
    /// the last row), so dividing it out of a transition polynomial drops its
    /// degree by exactly that much.
    pub fn transition_quotient_degree_bounds(&self, params: &StarkParameters) -> Vec<usize> {
        let zerofier_degree = params.original_trace_length - 1;
        self.transition_degree_bounds(params)
            .into_iter()
            .map(|d| d - zerofier_degree)
            .collect()
    }

    /// The smallest `2^k - 1` at least as large as every transition
    /// quotient's degree bound. Every term folded into the combination
    /// polynomial is padded up to this common degree.
    pub fn max_degree(&self, params: &StarkParameters) -> usize {
        let bound = self
            .transition_quotient_degree_bounds(params)
            .into_iter()
            .max()
            .unwrap_or(0);
        let mut power = 1usize;
        while power - 1 < bound {
            power <<= 1;
        }
        power - 1
    }

    /// One entry per register: `randomized_trace_length - 1` minus the
    /// number of boundary constraints on that register (the degree of its
    /// boundary zerofier).
    pub fn boundary_quotient_degree_bounds(&self, params: &StarkParameters) -> Vec<usize> {
        let trace_degree = params.randomized_trace_length - 1;
        (0..self.num_registers)
            .map(|register| {
                let zerofier_degree = self.boundary_constraints_for_register(register).len();
                trace_degree - zerofier_degree
            })
            .collect()
    }

    /// The zerofier and interpolant for `register`'s boundary constraints:
    /// `zerofier` vanishes at every constrained cycle, `interpolant` agrees
    /// with the trace at every constrained cycle. A register with no
    /// boundary constraints gets the constant-1 zerofier and the
    /// zero interpolant, so dividing it out is a no-op.
    pub fn boundary_zerofier_and_interpolant(
        &self,
        register: usize,
        params: &StarkParameters,
    ) -> (Polynomial<StarkAnatomyPrimeField>, Polynomial<StarkAnatomyPrimeField>) {
        let constraints = self.boundary_constraints_for_register(register);
        let domain: Vec<FE> = constraints
            .iter()
            .map(|bc| params.omicron.pow(bc.cycle as u128))
            .collect();
        let values: Vec<FE> = constraints.iter().map(|bc| bc.value.clone()).collect();
        let zerofier = Polynomial::zerofier_domain(&domain);
        let interpolant = if domain.is_empty() {
            Polynomial::zero()
        } else {
            Polynomial::interpolate(&domain, &values)
        };
        (zerofier, interpolant)
    }

    /// `Π(x - omicron^i)` over the first `original_trace_length - 1` points
    /// of the trace domain. There's no transition to check out of the last
    /// row (there is no row after it), so the zerofier only needs to vanish
    /// up to that point.
    pub fn transition_zerofier(
        &self,
        params: &StarkParameters,
    ) -> Result<Polynomial<StarkAnatomyPrimeField>, StarkError> {
        let omicron_domain = params.omicron_domain();
        let points = &omicron_domain[..params.original_trace_length.saturating_sub(1)];
        fast_zerofier(points, &params.omicron, params.omicron_domain_length)
            .map_err(|e| StarkError::ArithmeticError(format!("{e:?}")))
    }
}
