//! The diffusion operator `diag(1, -1, ..., -1)`.

use ampl_ir::{Circuit, ParameterExpression, QubitId};
use ampl_synth::{ControlledGateBuilder, Unitary2x2};
use tracing::debug;

use crate::error::{AlgoError, AlgoResult, check_qubits};

/// Circuit for `diag(1, -1, ..., -1)` on `qubits` (most significant first).
///
/// One qubit is a plain `Z`. Otherwise the all-zero state is mapped to the
/// all-one state, a multi-controlled `Z` is built from `H · C^{n-1}X · H` on
/// the last qubit, and a pair of `RZ(-π)` on the first qubit contributes the
/// `-1` global phase that turns `diag(-1, 1, ..., 1)` into the target
/// diagonal. The gate order matters.
///
/// ```rust
/// use ampl_algo::diffusion;
/// use ampl_ir::QubitId;
///
/// let one = diffusion(&[QubitId(0)]).unwrap();
/// assert_eq!(one.to_string(), "z q0\n");
/// ```
pub fn diffusion(qubits: &[QubitId]) -> AlgoResult<Circuit> {
    check_qubits(qubits)?;

    let (Some(&first), Some(&last)) = (qubits.first(), qubits.last()) else {
        return Err(AlgoError::EmptyQubits);
    };
    if qubits.len() == 1 {
        return Ok(Circuit::empty().z(first));
    }

    let minus_pi = ParameterExpression::pi().negate();
    let mcx = ControlledGateBuilder::new()
        .with_controls(qubits[..qubits.len() - 1].iter().copied())
        .with_target(last)
        .with_operation(Unitary2x2::x())
        .with_gate_name("x")
        .build()?;

    let circuit = Circuit::empty()
        .x_layer(qubits)
        .h(last)
        .rz(minus_pi.clone(), first)
        .then(&mcx)
        .rz(minus_pi, first)
        .h(last)
        .x_layer(qubits);

    debug!(
        qubits = qubits.len(),
        instructions = circuit.len(),
        "built diffusion operator"
    );
    Ok(circuit)
}
