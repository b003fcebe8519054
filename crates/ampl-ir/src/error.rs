//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Duplicate qubit in a gate's operand list.
    #[error("Duplicate qubit {qubit} in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate_name: String,
    },

    /// Parameter is unbound, so the gate has no numeric matrix.
    #[error("Parameter '{0}' is unbound")]
    UnboundParameter(String),

    /// A custom gate matrix has the wrong number of entries.
    #[error("Matrix for gate '{gate_name}' has {got} entries, expected {expected}")]
    InvalidMatrix {
        /// Name of the gate.
        gate_name: String,
        /// Required number of entries (`4^n`).
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IrError {
    /// Whether this error rejects an instruction's operand list.
    pub fn is_invalid_operand(&self) -> bool {
        matches!(
            self,
            IrError::QubitCountMismatch { .. } | IrError::DuplicateQubit { .. }
        )
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
