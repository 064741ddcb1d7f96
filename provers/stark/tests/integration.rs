//! End-to-end exercises of the proving and verification pipeline, running
//! the prover and verifier against each other the way a real caller would:
//! through the crate's public API only, never reaching into internals.

use stark_anatomy_math::field::element::FieldElement;
use stark_anatomy_math::field::fields::stark_anatomy_prime_field::StarkAnatomyPrimeField;
use stark_anatomy_prover::examples::toy;
use stark_anatomy_prover::parameters::StarkParameters;
use stark_anatomy_prover::{prover, verifier};

type FE = FieldElement<StarkAnatomyPrimeField>;

fn deterministic_randomizer() -> impl FnMut() -> FE {
    let mut counter = 0u64;
    move || {
        counter += 1;
        FE::from(counter.wrapping_mul(0x9E3779B97F4A7C15).wrapping_add(1))
    }
}

#[test]
fn a_proof_of_a_correct_trace_verifies() {
    let params = StarkParameters::new(8, 2, 4, 2, 2, 2).unwrap();
    let air = toy::air();
    let trace = toy::honest_trace(&params).unwrap();

    let mut stream = prover::prove(&air, trace, &params, deterministic_randomizer()).unwrap();
    assert!(verifier::verify(&mut stream, &air, &params).unwrap());
}

#[test]
fn the_prover_refuses_a_trace_with_the_wrong_claimed_output() {
    let params = StarkParameters::new(8, 2, 4, 2, 2, 2).unwrap();
    let air = toy::air();
    let trace = toy::trace_with_wrong_output(&params).unwrap();

    assert!(prover::prove(&air, trace, &params, deterministic_randomizer()).is_err());
}

#[test]
fn the_prover_refuses_a_false_witness() {
    let params = StarkParameters::new(8, 2, 4, 2, 2, 2).unwrap();
    let air = toy::air();
    let trace = toy::trace_with_false_witness(&params).unwrap();

    assert!(prover::prove(&air, trace, &params, deterministic_randomizer()).is_err());
}

#[test]
fn a_proof_replayed_against_a_different_air_is_rejected() {
    let params = StarkParameters::new(8, 2, 4, 2, 2, 2).unwrap();
    let air = toy::air();
    let trace = toy::honest_trace(&params).unwrap();
    let mut stream = prover::prove(&air, trace, &params, deterministic_randomizer()).unwrap();

    // Same shape of AIR, but a boundary constraint pins a different value,
    // so the honest trace's proof should no longer check out against it.
    let mismatched_air = {
        use stark_anatomy_math::multivariate::MPolynomial;
        use stark_anatomy_prover::air::{Air, BoundaryConstraint};
        let vars = MPolynomial::<StarkAnatomyPrimeField>::variables(5);
        let a_cur = vars[1].clone();
        let b_cur = vars[2].clone();
        let a_next = vars[3].clone();
        let b_next = vars[4].clone();
        let transition_constraints = vec![
            a_next - a_cur.clone() * a_cur.clone(),
            b_next - (b_cur + a_cur),
        ];
        let boundary_constraints = vec![
            BoundaryConstraint { cycle: 0, register: 0, value: FE::from(3u64) },
            BoundaryConstraint { cycle: 0, register: 1, value: FE::from(0u64) },
        ];
        Air::new(2, transition_constraints, boundary_constraints)
    };

    assert!(verifier::verify(&mut stream, &mismatched_air, &params).is_err());
}

#[test]
fn proofs_at_a_higher_security_level_still_verify() {
    let params = StarkParameters::new(8, 2, 8, 4, 4, 2).unwrap();
    let air = toy::air();
    let trace = toy::honest_trace(&params).unwrap();

    let mut stream = prover::prove(&air, trace, &params, deterministic_randomizer()).unwrap();
    assert!(verifier::verify(&mut stream, &air, &params).unwrap());
}
