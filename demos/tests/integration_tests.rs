//! Integration tests for the demo suite.

use ampl_demos::circuits::{grover_circuit, marked_state_oracle, success_probability};
use ampl_ir::QubitId;
use ampl_synth::circuit_matrix;

/// The oracle flips exactly the marked state's sign.
#[test]
fn test_oracle_marks_one_state() {
    let qubits: Vec<_> = (0..3).map(QubitId).collect();
    for marked in 0..8 {
        let oracle = marked_state_oracle(&qubits, marked).unwrap();
        let m = circuit_matrix(&oracle, &qubits).unwrap();
        for basis in 0..8 {
            let expected = if basis == marked { -1.0 } else { 1.0 };
            let entry = m.get(basis, basis);
            assert!(
                (entry.re - expected).abs() < 1e-9 && entry.im.abs() < 1e-9,
                "marked {marked}, basis {basis}: {entry}"
            );
        }
    }
}

#[test]
fn test_single_qubit_oracle() {
    let oracle = marked_state_oracle(&[QubitId(0)], 0).unwrap();
    let names: Vec<_> = oracle.iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["x", "z", "x"]);
}

#[test]
fn test_grover_finds_marked_state() {
    for marked in [0, 3, 5, 7] {
        let circuit = grover_circuit(3, marked, 2).unwrap();
        let p = success_probability(&circuit, 3, marked).unwrap();
        assert!(p > 0.94, "marked {marked}: p = {p}");
    }

    let circuit = grover_circuit(2, 2, 1).unwrap();
    let p = success_probability(&circuit, 2, 2).unwrap();
    assert!((p - 1.0).abs() < 1e-9);
}

#[test]
fn test_invalid_iterations() {
    let err = grover_circuit(2, 1, 0).unwrap_err();
    assert!(err.is_invalid_argument());
}
