//! Grover search circuits over a single marked basis state.

use ampl_algo::{AlgoError, AlgoResult, grover};
use ampl_ir::{Circuit, QubitId, StandardGate};
use ampl_synth::{circuit_matrix, controlled_gate};

/// Phase oracle flipping the sign of basis state `marked`.
///
/// `qubits[0]` is the most significant bit of `marked`. Qubits whose bit is
/// zero are conjugated by X around a multi-controlled Z.
pub fn marked_state_oracle(qubits: &[QubitId], marked: usize) -> AlgoResult<Circuit> {
    let n = qubits.len();
    let Some((&last, controls)) = qubits.split_last() else {
        return Err(AlgoError::EmptyQubits);
    };

    let flips: Vec<QubitId> = qubits
        .iter()
        .enumerate()
        .filter(|(i, _)| (marked >> (n - 1 - i)) & 1 == 0)
        .map(|(_, &q)| q)
        .collect();

    let phase_flip = if controls.is_empty() {
        Circuit::empty().z(last)
    } else {
        controlled_gate(&StandardGate::Z, controls.iter().copied(), last)?
    };

    Ok(Circuit::empty()
        .x_layer(&flips)
        .then(&phase_flip)
        .x_layer(&flips))
}

/// Grover search for `marked` over `n_qubits` qubits.
pub fn grover_circuit(n_qubits: u32, marked: usize, iterations: usize) -> AlgoResult<Circuit> {
    let qubits: Vec<_> = (0..n_qubits).map(QubitId).collect();
    let oracle = marked_state_oracle(&qubits, marked)?;
    grover(&oracle, &qubits, iterations)
}

/// Probability of reading `marked` after running `circuit` on |0...0⟩.
pub fn success_probability(circuit: &Circuit, n_qubits: u32, marked: usize) -> anyhow::Result<f64> {
    let register: Vec<_> = (0..n_qubits).map(QubitId).collect();
    let unitary = circuit_matrix(circuit, &register)?;
    Ok(unitary.get(marked, 0).norm_sqr())
}
