//! Error types for the synth crate.

use ampl_ir::QubitId;
use thiserror::Error;

/// Errors produced by controlled-gate synthesis and dense evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// `with_controls` was never called.
    #[error("controlled gate has no control qubits configured")]
    MissingControls,

    /// Controls were configured as an empty list.
    #[error("controlled gate needs at least one control qubit")]
    EmptyControls,

    /// `with_target` was never called.
    #[error("controlled gate has no target qubit configured")]
    MissingTarget,

    /// `with_operation` was never called.
    #[error("controlled gate has no operation configured")]
    MissingOperation,

    /// The target also appears among the controls.
    #[error("target {target} is also listed as a control")]
    TargetInControls {
        /// The overlapping qubit.
        target: QubitId,
    },

    /// A control qubit is listed more than once.
    #[error("control {qubit} is listed more than once")]
    DuplicateControl {
        /// The repeated control.
        qubit: QubitId,
    },

    /// The operation failed the optional unitarity check, or has no square root.
    #[error("operation is not unitary (deviation {deviation:.3e})")]
    NonUnitaryOperation {
        /// Largest entry-wise deviation of `U†U` from the identity.
        deviation: f64,
    },

    /// An instruction acts on a qubit the evaluation register does not contain.
    #[error("qubit {qubit} is not part of the evaluation register")]
    QubitNotInRegister {
        /// The unknown qubit.
        qubit: QubitId,
    },

    /// The evaluation register lists a qubit more than once.
    #[error("qubit {qubit} appears more than once in the evaluation register")]
    DuplicateRegisterQubit {
        /// The repeated qubit.
        qubit: QubitId,
    },

    /// The evaluation register is too wide for a dense matrix.
    #[error("register of {qubits} qubits exceeds the dense evaluation limit of {max}")]
    RegisterTooLarge {
        /// Requested register width.
        qubits: usize,
        /// Widest register accepted.
        max: usize,
    },

    /// Circuit construction failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] ampl_ir::IrError),
}

impl SynthError {
    /// Whether this error comes from a missing or contradictory builder setting.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SynthError::MissingControls
                | SynthError::EmptyControls
                | SynthError::MissingTarget
                | SynthError::MissingOperation
                | SynthError::TargetInControls { .. }
                | SynthError::DuplicateControl { .. }
                | SynthError::NonUnitaryOperation { .. }
        )
    }
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
