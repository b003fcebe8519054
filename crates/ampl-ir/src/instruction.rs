//! Gate instructions: a gate applied to an ordered tuple of qubits.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateKind, StandardGate};
use crate::qubit::{QubitId, find_duplicate};

/// A gate applied to operand qubits.
///
/// Instructions are validated on construction and immutable afterwards: the
/// operand count matches the gate's arity and no operand repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInstruction")]
pub struct Instruction {
    gate: GateKind,
    qubits: Vec<QubitId>,
}

/// Unvalidated wire form, checked through [`Instruction::new`] on decode.
#[derive(Deserialize)]
struct RawInstruction {
    gate: GateKind,
    qubits: Vec<QubitId>,
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = IrError;

    fn try_from(raw: RawInstruction) -> IrResult<Self> {
        Instruction::new(raw.gate, raw.qubits)
    }
}

impl Instruction {
    /// Create an instruction, checking arity and operand distinctness.
    pub fn new(
        gate: impl Into<GateKind>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        let gate = gate.into();
        let qubits: Vec<_> = qubits.into_iter().collect();

        if qubits.len() != gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len(),
            });
        }
        if let Some(qubit) = find_duplicate(&qubits) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: gate.name().to_string(),
            });
        }

        Ok(Self { gate, qubits })
    }

    /// Build without validation; callers guarantee the invariants.
    pub(crate) fn from_parts(gate: GateKind, qubits: Vec<QubitId>) -> Self {
        Self { gate, qubits }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> IrResult<Self> {
        Self::new(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        Self::new(gate, [q1, q2])
    }

    /// The inverse instruction: same operands, inverted gate.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        Self {
            gate: self.gate.adjoint(),
            qubits: self.qubits.clone(),
        }
    }

    /// The gate.
    pub fn gate(&self) -> &GateKind {
        &self.gate
    }

    /// Operand qubits, in gate order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get the name of the gate.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// The gate's unitary matrix over its operands.
    pub fn matrix(&self) -> IrResult<Vec<Complex64>> {
        self.gate.matrix()
    }

    /// Replace symbol `name` with `value` in the gate parameter, if any.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        let gate = match &self.gate {
            GateKind::Standard(g) => GateKind::Standard(match g {
                StandardGate::Rx(p) => StandardGate::Rx(p.bind(name, value)),
                StandardGate::Ry(p) => StandardGate::Ry(p.bind(name, value)),
                StandardGate::Rz(p) => StandardGate::Rz(p.bind(name, value)),
                StandardGate::P(p) => StandardGate::P(p.bind(name, value)),
                other => other.clone(),
            }),
            custom @ GateKind::Custom(_) => custom.clone(),
        };
        Self {
            gate,
            qubits: self.qubits.clone(),
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())?;
        if let GateKind::Standard(g) = &self.gate {
            if let Some(p) = g.parameter() {
                write!(f, "({p})")?;
            }
        }
        let operands: Vec<String> = self.qubits.iter().map(ToString::to_string).collect();
        write!(f, " {}", operands.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterExpression;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0)).unwrap();
        assert_eq!(inst.qubits(), &[QubitId(0)]);
        assert_eq!(inst.name(), "h");
    }

    #[test]
    fn test_arity_mismatch() {
        let err = Instruction::new(StandardGate::CX, [QubitId(0)]).unwrap_err();
        assert!(err.is_invalid_operand());
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));

        let err = Instruction::single_qubit_gate(StandardGate::Swap, QubitId(0)).unwrap_err();
        assert!(err.is_invalid_operand());
    }

    #[test]
    fn test_repeated_operand() {
        let err = Instruction::two_qubit_gate(StandardGate::CX, QubitId(3), QubitId(3)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: QubitId(3), .. }));
    }

    #[test]
    fn test_adjoint_keeps_operands() {
        let inst = Instruction::single_qubit_gate(
            StandardGate::Rz(ParameterExpression::constant(0.25)),
            QubitId(2),
        )
        .unwrap();
        let adj = inst.adjoint();
        assert_eq!(adj.qubits(), inst.qubits());
        assert_eq!(
            adj.gate(),
            &GateKind::Standard(StandardGate::Rz(ParameterExpression::constant(-0.25)))
        );
        assert_eq!(adj.adjoint(), inst);
    }

    #[test]
    fn test_display() {
        let inst = Instruction::single_qubit_gate(
            StandardGate::Rz(ParameterExpression::pi().negate()),
            QubitId(0),
        )
        .unwrap();
        assert_eq!(inst.to_string(), "rz(-π) q0");

        let cx = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)).unwrap();
        assert_eq!(cx.to_string(), "cx q0, q1");
    }

    #[test]
    fn test_deserialize_validates() {
        let good = r#"{"gate":{"Standard":"CX"},"qubits":[0,1]}"#;
        let inst: Instruction = serde_json::from_str(good).unwrap();
        assert_eq!(inst.name(), "cx");

        let bad = r#"{"gate":{"Standard":"CX"},"qubits":[1,1]}"#;
        assert!(serde_json::from_str::<Instruction>(bad).is_err());
    }
}
