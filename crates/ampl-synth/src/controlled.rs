//! Ancilla-free multi-controlled gate synthesis.
//!
//! A controlled operation applies a 2x2 unitary `U` to a target qubit when
//! every control is |1⟩ and acts as the identity otherwise. The decomposition
//! is exact, global phase included, and introduces no helper qubits:
//!
//! - one control: `CX` for `U = X`, otherwise the ABC construction from the
//!   ZYZ Euler angles of `U` with a phase gate on the control
//! - k ≥ 2 controls: Barenco et al. Lemma 7.5 with `V = √U`
//!
//! ```text
//! rest   ──●──        ───────●───────●───●──
//!          │                 │       │   │
//! last   ──●──   =    ───●───X───●───X───┼──
//!          │             │       │       │
//! target ──U──        ───V───────V†──────V──
//! ```

use ampl_ir::{Circuit, CustomGate, QubitId, StandardGate, find_duplicate};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::unitary::{EPSILON, Unitary2x2};

/// Gate name used when none is configured.
pub const DEFAULT_GATE_NAME: &str = "U";

/// Step-wise configuration of a controlled gate.
///
/// ```rust
/// use ampl_ir::QubitId;
/// use ampl_synth::{ControlledGateBuilder, Unitary2x2};
///
/// let toffoli = ControlledGateBuilder::new()
///     .with_controls([QubitId(0), QubitId(1)])
///     .with_target(QubitId(2))
///     .with_operation(Unitary2x2::x())
///     .with_gate_name("x")
///     .build()
///     .unwrap();
/// assert!(!toffoli.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControlledGateBuilder {
    controls: Option<Vec<QubitId>>,
    target: Option<QubitId>,
    operation: Option<Unitary2x2>,
    name: Option<String>,
    unitarity_tolerance: Option<f64>,
}

impl ControlledGateBuilder {
    /// Create a builder with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the control qubits, in order.
    #[must_use]
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = QubitId>) -> Self {
        self.controls = Some(controls.into_iter().collect());
        self
    }

    /// Set the target qubit.
    #[must_use]
    pub fn with_target(mut self, target: QubitId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the 2x2 operation applied to the target.
    #[must_use]
    pub fn with_operation(mut self, operation: Unitary2x2) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Set the display name of the operation.
    #[must_use]
    pub fn with_gate_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reject operations whose `U†U` deviates from the identity by more than
    /// `tolerance`. Off unless set.
    #[must_use]
    pub fn with_unitarity_check(mut self, tolerance: f64) -> Self {
        self.unitarity_tolerance = Some(tolerance);
        self
    }

    /// Resolve the configuration into a [`ControlledGate`] record.
    pub fn into_gate(self) -> SynthResult<ControlledGate> {
        let controls = self.controls.ok_or(SynthError::MissingControls)?;
        let target = self.target.ok_or(SynthError::MissingTarget)?;
        let operation = self.operation.ok_or(SynthError::MissingOperation)?;

        if let Some(tolerance) = self.unitarity_tolerance {
            let deviation = operation.unitarity_deviation();
            if deviation > tolerance {
                return Err(SynthError::NonUnitaryOperation { deviation });
            }
        }

        let gate = ControlledGate {
            controls,
            target,
            operation,
            name: self
                .name
                .unwrap_or_else(|| DEFAULT_GATE_NAME.to_string()),
        };
        gate.validate()?;
        Ok(gate)
    }

    /// Validate the configuration and synthesize the circuit.
    pub fn build(self) -> SynthResult<Circuit> {
        self.into_gate()?.synthesize()
    }
}

/// A fully specified controlled operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlledGate {
    /// Control qubits; all must be |1⟩ for the operation to apply.
    pub controls: Vec<QubitId>,
    /// Qubit the operation acts on.
    pub target: QubitId,
    /// The 2x2 operation.
    pub operation: Unitary2x2,
    /// Display name, used for the bare gate when there are no controls.
    pub name: String,
}

impl ControlledGate {
    /// Check that controls are non-empty, distinct and exclude the target.
    pub fn validate(&self) -> SynthResult<()> {
        if self.controls.is_empty() {
            return Err(SynthError::EmptyControls);
        }
        check_operands(&self.controls, self.target)
    }

    /// Emit the decomposition.
    ///
    /// A record with no controls synthesizes to the bare operation as a
    /// custom gate; [`ControlledGate::validate`] rejects that case for the
    /// builder.
    pub fn synthesize(&self) -> SynthResult<Circuit> {
        check_operands(&self.controls, self.target)?;
        let circuit = controlled(
            Circuit::empty(),
            &self.controls,
            self.target,
            &self.operation,
            &self.name,
        )?;
        debug!(
            controls = self.controls.len(),
            gate = %self.name,
            instructions = circuit.len(),
            "synthesized controlled gate"
        );
        Ok(circuit)
    }
}

fn check_operands(controls: &[QubitId], target: QubitId) -> SynthResult<()> {
    if let Some(qubit) = find_duplicate(controls) {
        return Err(SynthError::DuplicateControl { qubit });
    }
    if controls.contains(&target) {
        return Err(SynthError::TargetInControls { target });
    }
    Ok(())
}

/// Append a multi-controlled `op` to `circuit`.
fn controlled(
    circuit: Circuit,
    controls: &[QubitId],
    target: QubitId,
    op: &Unitary2x2,
    name: &str,
) -> SynthResult<Circuit> {
    match controls {
        [] => {
            let gate = CustomGate::new(name, 1, op.to_vec())?;
            Ok(circuit.append(gate, [target])?)
        }
        [control] => single_controlled(circuit, *control, target, op),
        [rest @ .., last] => {
            let v = op.sqrt().ok_or_else(|| SynthError::NonUnitaryOperation {
                deviation: op.unitarity_deviation(),
            })?;
            let v_dg = v.dagger();
            let x = Unitary2x2::x();
            let sqrt_name = format!("sqrt_{name}");

            let circuit = single_controlled(circuit, *last, target, &v)?;
            let circuit = controlled(circuit, rest, *last, &x, "x")?;
            let circuit = single_controlled(circuit, *last, target, &v_dg)?;
            let circuit = controlled(circuit, rest, *last, &x, "x")?;
            controlled(circuit, rest, target, &v, &sqrt_name)
        }
    }
}

/// Append a singly controlled `op` using `op = e^{iφ} A X B X C` with `ABC = I`.
fn single_controlled(
    circuit: Circuit,
    control: QubitId,
    target: QubitId,
    op: &Unitary2x2,
) -> SynthResult<Circuit> {
    if op.approx_eq(&Unitary2x2::x(), EPSILON) {
        return Ok(circuit.cx(control, target)?);
    }

    let (alpha, beta, gamma, phase) = op.zyz_decomposition();

    // Rz/Ry angles stay unwrapped: a 2π shift flips the sign of the rotation.
    let circuit = rz_nonzero(circuit, (gamma - alpha) / 2.0, target);
    let circuit = circuit.cx(control, target)?;
    let circuit = rz_nonzero(circuit, -(alpha + gamma) / 2.0, target);
    let circuit = ry_nonzero(circuit, -beta / 2.0, target);
    let circuit = circuit.cx(control, target)?;
    let circuit = ry_nonzero(circuit, beta / 2.0, target);
    let circuit = rz_nonzero(circuit, alpha, target);

    let phase = Unitary2x2::normalize_angle(phase);
    Ok(if phase.abs() > EPSILON {
        circuit.p(phase, control)
    } else {
        circuit
    })
}

fn rz_nonzero(circuit: Circuit, theta: f64, qubit: QubitId) -> Circuit {
    if theta.abs() > EPSILON {
        circuit.rz(theta, qubit)
    } else {
        circuit
    }
}

fn ry_nonzero(circuit: Circuit, theta: f64, qubit: QubitId) -> Circuit {
    if theta.abs() > EPSILON {
        circuit.ry(theta, qubit)
    } else {
        circuit
    }
}

/// Controlled version of a library gate.
pub fn controlled_gate(
    gate: &StandardGate,
    controls: impl IntoIterator<Item = QubitId>,
    target: QubitId,
) -> SynthResult<Circuit> {
    ControlledGateBuilder::new()
        .with_controls(controls)
        .with_target(target)
        .with_operation(Unitary2x2::from_gate(gate)?)
        .with_gate_name(gate.name())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_missing_fields() {
        let err = ControlledGateBuilder::new()
            .with_target(q(1))
            .with_operation(Unitary2x2::x())
            .build()
            .unwrap_err();
        assert!(matches!(err, SynthError::MissingControls));
        assert!(err.is_configuration_error());

        let err = ControlledGateBuilder::new()
            .with_controls([q(0)])
            .with_operation(Unitary2x2::x())
            .build()
            .unwrap_err();
        assert!(matches!(err, SynthError::MissingTarget));

        let err = ControlledGateBuilder::new()
            .with_controls([q(0)])
            .with_target(q(1))
            .build()
            .unwrap_err();
        assert!(matches!(err, SynthError::MissingOperation));
    }

    #[test]
    fn test_contradictory_configuration() {
        let base = ControlledGateBuilder::new().with_operation(Unitary2x2::x());

        let err = base
            .clone()
            .with_controls(Vec::new())
            .with_target(q(1))
            .build();
        assert!(matches!(err, Err(SynthError::EmptyControls)));

        let err = base
            .clone()
            .with_controls([q(0), q(1)])
            .with_target(q(1))
            .build();
        assert!(matches!(
            err,
            Err(SynthError::TargetInControls { target }) if target == q(1)
        ));

        let err = base.with_controls([q(0), q(2), q(0)]).with_target(q(1)).build();
        assert!(matches!(
            err,
            Err(SynthError::DuplicateControl { qubit }) if qubit == q(0)
        ));
    }

    #[test]
    fn test_unitarity_check_is_opt_in() {
        let skewed = Unitary2x2::real(1.0, 1.0, 0.0, 1.0);
        let builder = ControlledGateBuilder::new()
            .with_controls([q(0)])
            .with_target(q(1))
            .with_operation(skewed);

        assert!(builder.clone().build().is_ok());
        assert!(matches!(
            builder.with_unitarity_check(1e-9).build(),
            Err(SynthError::NonUnitaryOperation { .. })
        ));
    }

    #[test]
    fn test_default_name() {
        let gate = ControlledGateBuilder::new()
            .with_controls([q(0)])
            .with_target(q(1))
            .with_operation(Unitary2x2::h())
            .into_gate()
            .unwrap();
        assert_eq!(gate.name, DEFAULT_GATE_NAME);
    }

    #[test]
    fn test_single_control_not_is_cx() {
        let circuit = controlled_gate(&StandardGate::X, [q(0)], q(1)).unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.instructions()[0].name(), "cx");
        assert_eq!(circuit.instructions()[0].qubits(), &[q(0), q(1)]);
    }

    #[test]
    fn test_zero_controls_is_custom_gate() {
        let gate = ControlledGate {
            controls: vec![],
            target: q(4),
            operation: Unitary2x2::h(),
            name: "had".into(),
        };
        assert!(matches!(gate.validate(), Err(SynthError::EmptyControls)));

        let circuit = gate.synthesize().unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.instructions()[0].name(), "had");
        assert_eq!(circuit.instructions()[0].qubits(), &[q(4)]);
    }

    #[test]
    fn test_no_ancillas() {
        let circuit = controlled_gate(&StandardGate::Z, [q(0), q(1), q(2)], q(3)).unwrap();
        let touched: Vec<_> = circuit.qubits().into_iter().collect();
        assert_eq!(touched, vec![q(0), q(1), q(2), q(3)]);
    }

    #[test]
    fn test_deterministic() {
        let a = controlled_gate(&StandardGate::T, [q(0), q(1)], q(2)).unwrap();
        let b = controlled_gate(&StandardGate::T, [q(0), q(1)], q(2)).unwrap();
        assert_eq!(a, b);
    }
}
