use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;
use stark_anatomy_math::polynomial::Polynomial;

use crate::errors::StarkError;

pub type FE = FieldElement<StarkAnatomyPrimeField>;

/// An execution trace: `num_registers` columns, one row per cycle. Rows are
/// stored in the order they were generated; `extend_with_randomizers` is
/// applied after the fact to get zero-knowledge out of the boundary and FRI
/// commitments.
#[derive(Debug, Clone)]
pub struct TraceTable {
    rows: Vec<Vec<FE>>,
    num_registers: usize,
}

impl TraceTable {
    pub fn new(rows: Vec<Vec<FE>>, num_registers: usize) -> Result<Self, StarkError> {
        if rows.iter().any(|row| row.len() != num_registers) {
            return Err(StarkError::InvalidArgument(
                "every trace row must have exactly num_registers entries".to_string(),
            ));
        }
        Ok(Self { rows, num_registers })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.num_registers
    }

    pub fn get_row(&self, cycle: usize) -> &[FE] {
        &self.rows[cycle]
    }

    pub fn rows(&self) -> &[Vec<FE>] {
        &self.rows
    }

    /// Register `s`'s values across every cycle, in order.
    pub fn column(&self, s: usize) -> Vec<FE> {
        self.rows.iter().map(|row| row[s].clone()).collect()
    }

    pub fn columns(&self) -> Vec<Vec<FE>> {
        (0..self.num_registers).map(|s| self.column(s)).collect()
    }

    /// Appends `num_randomizers` rows of fresh randomness, one field element
    /// per register. This is what turns the boundary and FRI commitments
    /// below into zero-knowledge ones: an adversary who only sees a handful
    /// of codeword openings can't distinguish the real trace values from
    /// these randomizer rows sharing the same interpolant.
    pub fn extend_with_randomizers(&mut self, num_randomizers: usize, mut sample: impl FnMut() -> FE) {
        for _ in 0..num_randomizers {
            let row = (0..self.num_registers).map(|_| sample()).collect();
            self.rows.push(row);
        }
    }

    /// Interpolates each column over `domain[0..n_rows()]`, where `domain` is
    /// the omicron-generated subgroup the trace is laid out on.
    pub fn interpolate_columns(&self, domain: &[FE]) -> Vec<Polynomial<StarkAnatomyPrimeField>> {
        let points = &domain[..self.n_rows()];
        self.columns()
            .into_iter()
            .map(|values| Polynomial::interpolate(points, &values))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(x: u64) -> FE {
        FE::from(x)
    }

    #[test]
    fn rejects_rows_with_the_wrong_width() {
        let rows = vec![vec![fe(1), fe(2)], vec![fe(3)]];
        assert!(TraceTable::new(rows, 2).is_err());
    }

    #[test]
    fn column_extraction_matches_row_layout() {
        let rows = vec![vec![fe(1), fe(2)], vec![fe(3), fe(4)], vec![fe(5), fe(6)]];
        let trace = TraceTable::new(rows, 2).unwrap();
        assert_eq!(trace.column(0), vec![fe(1), fe(3), fe(5)]);
        assert_eq!(trace.column(1), vec![fe(2), fe(4), fe(6)]);
    }

    #[test]
    fn extend_with_randomizers_grows_row_count_only() {
        let rows = vec![vec![fe(1), fe(2)], vec![fe(3), fe(4)]];
        let mut trace = TraceTable::new(rows, 2).unwrap();
        let mut next = 100u64;
        trace.extend_with_randomizers(3, || {
            next += 1;
            fe(next)
        });
        assert_eq!(trace.n_rows(), 5);
        assert_eq!(trace.n_cols(), 2);
    }

    #[test]
    fn interpolated_columns_reproduce_the_trace_on_the_domain() {
        let rows = vec![vec![fe(1), fe(2)], vec![fe(3), fe(4)], vec![fe(5), fe(6)], vec![fe(7), fe(8)]];
        let trace = TraceTable::new(rows, 2).unwrap();
        let domain: Vec<FE> = (0..4u64).map(fe).collect();
        let polys = trace.interpolate_columns(&domain);
        for (i, d) in domain.iter().enumerate() {
            for s in 0..trace.n_cols() {
                assert_eq!(polys[s].evaluate(d), trace.get_row(i)[s]);
            }
        }
    }
}
