//! Amplitude amplification.
//!
//! See Brassard, Høyer, Mosca, "Quantum Amplitude Amplification and
//! Estimation" (2000).

use ampl_ir::{Circuit, QubitId, invert};
use tracing::{debug, instrument};

use crate::diffusion::diffusion;
use crate::error::{AlgoError, AlgoResult, check_qubits};

/// Circuit running `num_iter` rounds of amplitude amplification.
///
/// Starts with an H layer on `qubits`, then appends
/// `oracle · algorithm† · diffusion(qubits) · algorithm` once per round.
/// `algorithm` must be measurement-free; `oracle` flips the sign of marked
/// basis states.
#[instrument(
    skip_all,
    fields(num_qubits = qubits.len(), num_iter = num_iter)
)]
pub fn amplify(
    algorithm: &Circuit,
    oracle: &Circuit,
    qubits: &[QubitId],
    num_iter: usize,
) -> AlgoResult<Circuit> {
    if num_iter == 0 {
        return Err(AlgoError::InvalidIterations(num_iter));
    }
    check_qubits(qubits)?;

    let round = oracle
        .then(&invert(algorithm))
        .then(&diffusion(qubits)?)
        .then(algorithm);

    let circuit = (0..num_iter).fold(Circuit::empty().h_layer(qubits), |acc, _| acc.then(&round));

    debug!(
        round_len = round.len(),
        instructions = circuit.len(),
        "built amplification circuit"
    );
    Ok(circuit)
}

/// Grover search: amplification with an H layer as the algorithm.
///
/// ```rust
/// use ampl_algo::grover;
/// use ampl_ir::{Circuit, QubitId};
///
/// let qubits = [QubitId(0), QubitId(1)];
/// let oracle = Circuit::empty().cz(QubitId(0), QubitId(1)).unwrap();
/// let search = grover(&oracle, &qubits, 1).unwrap();
/// assert!(search.len() > oracle.len());
/// ```
#[instrument(skip_all, fields(num_qubits = qubits.len(), num_iter = num_iter))]
pub fn grover(oracle: &Circuit, qubits: &[QubitId], num_iter: usize) -> AlgoResult<Circuit> {
    let hadamards = Circuit::empty().h_layer(qubits);
    amplify(&hadamards, oracle, qubits, num_iter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_structure() {
        let algorithm = Circuit::empty().h(q(0)).t(q(0));
        let oracle = Circuit::empty().z(q(0));
        let circuit = amplify(&algorithm, &oracle, &[q(0)], 2).unwrap();

        // h | z, tdg, h, z, h, t | z, tdg, h, z, h, t
        let names: Vec<_> = circuit.iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec!["h", "z", "tdg", "h", "z", "h", "t", "z", "tdg", "h", "z", "h", "t"]
        );
    }

    #[test]
    fn test_rounds_scale_linearly() {
        let qubits = [q(0), q(1), q(2)];
        let oracle = Circuit::empty().cz(q(1), q(2)).unwrap();
        let one = grover(&oracle, &qubits, 1).unwrap();
        let three = grover(&oracle, &qubits, 3).unwrap();
        assert_eq!(three.len() - 3, 3 * (one.len() - 3));
    }

    #[test]
    fn test_preconditions() {
        let algorithm = Circuit::empty().h(q(0));
        let oracle = Circuit::empty().z(q(0));

        let err = amplify(&algorithm, &oracle, &[], 1).unwrap_err();
        assert!(matches!(err, AlgoError::EmptyQubits));
        assert!(err.is_invalid_argument());

        let err = amplify(&algorithm, &oracle, &[q(0)], 0).unwrap_err();
        assert!(matches!(err, AlgoError::InvalidIterations(0)));
        assert!(err.is_invalid_argument());

        let err = amplify(&algorithm, &oracle, &[q(0), q(0)], 1).unwrap_err();
        assert!(matches!(err, AlgoError::DuplicateQubit(_)));

        assert!(grover(&oracle, &[], 1).unwrap_err().is_invalid_argument());
    }
}
