//! Error types for the algo crate.

use ampl_ir::QubitId;
use thiserror::Error;

/// Errors produced while building diffusion and amplification circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// The qubit list is empty.
    #[error("qubit list is empty")]
    EmptyQubits,

    /// The qubit list repeats a qubit.
    #[error("qubit {0} appears more than once in the qubit list")]
    DuplicateQubit(QubitId),

    /// num_iter must be ≥ 1.
    #[error("num_iter must be at least 1, got {0}")]
    InvalidIterations(usize),

    /// Controlled-gate synthesis failed.
    #[error("synthesis error: {0}")]
    Synth(#[from] ampl_synth::SynthError),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] ampl_ir::IrError),
}

impl AlgoError {
    /// Whether the caller passed malformed arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            AlgoError::EmptyQubits | AlgoError::DuplicateQubit(_) | AlgoError::InvalidIterations(_)
        )
    }
}

/// Result type for algorithm construction.
pub type AlgoResult<T> = Result<T, AlgoError>;

/// Reject empty or repeating qubit lists.
pub(crate) fn check_qubits(qubits: &[QubitId]) -> AlgoResult<()> {
    if qubits.is_empty() {
        return Err(AlgoError::EmptyQubits);
    }
    match ampl_ir::find_duplicate(qubits) {
        Some(qubit) => Err(AlgoError::DuplicateQubit(qubit)),
        None => Ok(()),
    }
}
