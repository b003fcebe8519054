//! Immutable gate programs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::IrResult;
use crate::gate::{GateKind, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// An ordered sequence of gate instructions.
///
/// A circuit is a value: every builder method consumes `self` and returns a
/// new circuit, and [`compose`]/[`invert`] borrow their inputs and return
/// fresh circuits. Only unitary gates can be represented, so a circuit never
/// contains measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a circuit from already validated instructions.
    pub fn from_instructions(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        Self {
            instructions: instructions.into_iter().collect(),
        }
    }

    /// Append one gate, validating arity and operand distinctness.
    pub fn append(
        self,
        gate: impl Into<GateKind>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        let instruction = Instruction::new(gate, qubits)?;
        Ok(self.push(instruction))
    }

    /// Append an instruction.
    #[must_use]
    pub fn push(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    fn single(self, gate: StandardGate, qubit: QubitId) -> Self {
        // One operand can neither miscount nor repeat for a 1-qubit gate.
        debug_assert_eq!(gate.num_qubits(), 1);
        let instruction = Instruction::from_parts(gate.into(), vec![qubit]);
        self.push(instruction)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    #[must_use]
    pub fn h(self, qubit: QubitId) -> Self {
        self.single(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    #[must_use]
    pub fn x(self, qubit: QubitId) -> Self {
        self.single(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    #[must_use]
    pub fn y(self, qubit: QubitId) -> Self {
        self.single(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    #[must_use]
    pub fn z(self, qubit: QubitId) -> Self {
        self.single(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    #[must_use]
    pub fn s(self, qubit: QubitId) -> Self {
        self.single(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    #[must_use]
    pub fn sdg(self, qubit: QubitId) -> Self {
        self.single(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    #[must_use]
    pub fn t(self, qubit: QubitId) -> Self {
        self.single(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    #[must_use]
    pub fn tdg(self, qubit: QubitId) -> Self {
        self.single(StandardGate::Tdg, qubit)
    }

    /// Apply Rx rotation gate.
    #[must_use]
    pub fn rx(self, theta: impl Into<ParameterExpression>, qubit: QubitId) -> Self {
        self.single(StandardGate::Rx(theta.into()), qubit)
    }

    /// Apply Ry rotation gate.
    #[must_use]
    pub fn ry(self, theta: impl Into<ParameterExpression>, qubit: QubitId) -> Self {
        self.single(StandardGate::Ry(theta.into()), qubit)
    }

    /// Apply Rz rotation gate.
    #[must_use]
    pub fn rz(self, theta: impl Into<ParameterExpression>, qubit: QubitId) -> Self {
        self.single(StandardGate::Rz(theta.into()), qubit)
    }

    /// Apply phase gate.
    #[must_use]
    pub fn p(self, lambda: impl Into<ParameterExpression>, qubit: QubitId) -> Self {
        self.single(StandardGate::P(lambda.into()), qubit)
    }

    /// Apply Hadamard to every qubit, in order.
    #[must_use]
    pub fn h_layer(self, qubits: &[QubitId]) -> Self {
        qubits.iter().fold(self, |c, &q| c.h(q))
    }

    /// Apply Pauli-X to every qubit, in order.
    #[must_use]
    pub fn x_layer(self, qubits: &[QubitId]) -> Self {
        qubits.iter().fold(self, |c, &q| c.x(q))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(self, control: QubitId, target: QubitId) -> IrResult<Self> {
        self.append(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(self, control: QubitId, target: QubitId) -> IrResult<Self> {
        self.append(StandardGate::CZ, [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(self, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        self.append(StandardGate::Swap, [q1, q2])
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// This circuit followed by `other`. Qubit indices are not remapped.
    #[must_use]
    pub fn then(&self, other: &Circuit) -> Self {
        let mut instructions = Vec::with_capacity(self.len() + other.len());
        instructions.extend_from_slice(&self.instructions);
        instructions.extend_from_slice(&other.instructions);
        Self { instructions }
    }

    /// The adjoint circuit: reversed order, every instruction inverted.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            instructions: self.instructions.iter().rev().map(Instruction::adjoint).collect(),
        }
    }

    /// Replace symbol `name` with `value` in every gate parameter.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        Self {
            instructions: self
                .instructions
                .iter()
                .map(|inst| inst.bind(name, value))
                .collect(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over instructions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Every qubit touched by some instruction, sorted.
    pub fn qubits(&self) -> BTreeSet<QubitId> {
        self.iter().flat_map(|inst| inst.qubits().iter().copied()).collect()
    }

    /// Number of distinct qubits touched.
    pub fn num_qubits(&self) -> usize {
        self.qubits().len()
    }

    /// Circuit depth: the longest chain of instructions sharing qubits.
    pub fn depth(&self) -> usize {
        let mut wire_depth: FxHashMap<QubitId, usize> = FxHashMap::default();
        let mut depth = 0;
        for inst in self {
            let layer = 1 + inst
                .qubits()
                .iter()
                .map(|q| wire_depth.get(q).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            for &q in inst.qubits() {
                wire_depth.insert(q, layer);
            }
            depth = depth.max(layer);
        }
        depth
    }

    /// Count of instructions per gate name.
    pub fn count_ops(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for inst in self {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Serialize to JSON for an external executor.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON; every instruction is re-validated.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `a` followed by `b`.
pub fn compose(a: &Circuit, b: &Circuit) -> Circuit {
    a.then(b)
}

/// The adjoint of `circuit`.
pub fn invert(circuit: &Circuit) -> Circuit {
    circuit.inverse()
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl FromIterator<Instruction> for Circuit {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::from_instructions(iter)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in self {
            writeln!(f, "{inst}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;
    use std::f64::consts::PI;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::empty();
        assert!(circuit.is_empty());
        assert_eq!(circuit.depth(), 0);
        assert_eq!(circuit.num_qubits(), 0);
    }

    #[test]
    fn test_fluent_api() {
        let circuit = Circuit::empty()
            .h(q(0))
            .cx(q(0), q(1))
            .unwrap()
            .rz(PI / 2.0, q(1));

        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.qubits().into_iter().collect::<Vec<_>>(), vec![q(0), q(1)]);
    }

    #[test]
    fn test_append_rejects_bad_operands() {
        let err = Circuit::empty().append(StandardGate::CX, [q(1)]).unwrap_err();
        assert!(err.is_invalid_operand());
        let err = Circuit::empty().cz(q(2), q(2)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_compose_leaves_inputs_untouched() {
        let a = Circuit::empty().h(q(0));
        let b = Circuit::empty().x(q(1));
        let ab = compose(&a, &b);

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(ab.instructions()[0], a.instructions()[0]);
        assert_eq!(ab.instructions()[1], b.instructions()[0]);
    }

    #[test]
    fn test_invert_reverses_and_adjoints() {
        let circuit = Circuit::empty().t(q(0)).rz(0.5, q(1)).cx(q(0), q(1)).unwrap();
        let inv = invert(&circuit);
        let names: Vec<_> = inv.iter().map(Instruction::name).collect();
        assert_eq!(names, ["cx", "rz", "tdg"]);
        assert_eq!(
            inv.instructions()[1].gate(),
            &GateKind::Standard(StandardGate::Rz(ParameterExpression::constant(-0.5)))
        );
        assert_eq!(invert(&inv), circuit);
    }

    #[test]
    fn test_depth_parallel_gates() {
        let circuit = Circuit::empty().h_layer(&[q(0), q(1), q(2)]);
        assert_eq!(circuit.depth(), 1);
        let circuit = circuit.cx(q(0), q(1)).unwrap().x(q(2));
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_count_ops() {
        let circuit = Circuit::empty().x_layer(&[q(0), q(1)]).h(q(1));
        let counts = circuit.count_ops();
        assert_eq!(counts["x"], 2);
        assert_eq!(counts["h"], 1);
    }

    #[test]
    fn test_bind_symbol() {
        let circuit = Circuit::empty().rz(ParameterExpression::symbol("theta"), q(0));
        assert!(circuit.instructions()[0].matrix().is_err());
        let bound = circuit.bind("theta", 0.3);
        assert!(bound.instructions()[0].matrix().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let circuit = Circuit::empty().h(q(0)).rz(-PI, q(0)).cx(q(0), q(3)).unwrap();
        let json = circuit.to_json().unwrap();
        assert_eq!(Circuit::from_json(&json).unwrap(), circuit);
        assert!(matches!(
            Circuit::from_json("{\"instructions\": 3}"),
            Err(IrError::Serialization(_))
        ));
    }

    #[test]
    fn test_json_keeps_every_angle_bit() {
        let angle = -9.881_227_046_317_965;
        let circuit = Circuit::empty().rz(angle, q(0)).ry(0.1 + 0.2, q(1));
        let back = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
        assert_eq!(back, circuit);
        assert_eq!(
            back.instructions()[0].gate(),
            &GateKind::Standard(StandardGate::Rz(ParameterExpression::constant(angle)))
        );
    }

    #[test]
    fn test_display() {
        let circuit = Circuit::empty().h(q(0)).cx(q(0), q(1)).unwrap();
        assert_eq!(circuit.to_string(), "h q0\ncx q0, q1\n");
    }
}
