//! The gate library.
//!
//! This module is the only place gate semantics are defined. Every matrix is
//! row-major over the gate's local basis, with the first operand as the most
//! significant bit: for `cx` the operands are `[control, target]` and the
//! matrix acts on `|control target⟩`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::parameter::ParameterExpression;

/// Names of every gate in the standard library.
pub const STANDARD_GATE_NAMES: &[&str] = &[
    "x", "y", "z", "h", "s", "sdg", "t", "tdg", "rx", "ry", "rz", "p", "cx", "cz", "swap",
];

/// Suffix toggled on a custom gate's name when it is inverted.
const ADJOINT_SUFFIX: &str = "_dg";

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis: `diag(e^{-iθ/2}, e^{iθ/2})`.
    Rz(ParameterExpression),
    /// Phase gate: `diag(1, e^{iλ})`.
    P(ParameterExpression),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// Whether `name` belongs to the standard library.
    pub fn is_standard_name(name: &str) -> bool {
        STANDARD_GATE_NAMES.contains(&name)
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// The rotation angle, for parameterized gates.
    pub fn parameter(&self) -> Option<&ParameterExpression> {
        match self {
            StandardGate::Rx(p) | StandardGate::Ry(p) | StandardGate::Rz(p) | StandardGate::P(p) => {
                Some(p)
            }
            _ => None,
        }
    }

    /// Check if this gate has an unbound symbolic parameter.
    pub fn is_parameterized(&self) -> bool {
        self.parameter().is_some_and(ParameterExpression::is_symbolic)
    }

    /// Whether the gate is its own inverse.
    pub fn is_self_adjoint(&self) -> bool {
        matches!(
            self,
            StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::H
                | StandardGate::CX
                | StandardGate::CZ
                | StandardGate::Swap
        )
    }

    /// The inverse gate.
    #[must_use]
    pub fn adjoint(&self) -> StandardGate {
        match self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::Rx(p) => StandardGate::Rx(p.negate()),
            StandardGate::Ry(p) => StandardGate::Ry(p.negate()),
            StandardGate::Rz(p) => StandardGate::Rz(p.negate()),
            StandardGate::P(p) => StandardGate::P(p.negate()),
            other => other.clone(),
        }
    }

    /// The unitary matrix of this gate, row-major.
    pub fn matrix(&self) -> IrResult<Vec<Complex64>> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let matrix = match self {
            StandardGate::X => vec![zero, one, one, zero],
            StandardGate::Y => vec![zero, -i, i, zero],
            StandardGate::Z => vec![one, zero, zero, -one],
            StandardGate::H => {
                let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
                vec![s, s, s, -s]
            }
            StandardGate::S => vec![one, zero, zero, i],
            StandardGate::Sdg => vec![one, zero, zero, -i],
            StandardGate::T => vec![one, zero, zero, Complex64::from_polar(1.0, PI_4)],
            StandardGate::Tdg => vec![one, zero, zero, Complex64::from_polar(1.0, -PI_4)],
            StandardGate::Rx(p) => {
                let (c, s) = half_angle(angle(p)?);
                let c = Complex64::new(c, 0.0);
                vec![c, -i * s, -i * s, c]
            }
            StandardGate::Ry(p) => {
                let (c, s) = half_angle(angle(p)?);
                vec![
                    Complex64::new(c, 0.0),
                    Complex64::new(-s, 0.0),
                    Complex64::new(s, 0.0),
                    Complex64::new(c, 0.0),
                ]
            }
            StandardGate::Rz(p) => {
                let theta = angle(p)?;
                vec![
                    Complex64::from_polar(1.0, -theta / 2.0),
                    zero,
                    zero,
                    Complex64::from_polar(1.0, theta / 2.0),
                ]
            }
            StandardGate::P(p) => vec![one, zero, zero, Complex64::from_polar(1.0, angle(p)?)],
            StandardGate::CX => permutation(&[0, 1, 3, 2]),
            StandardGate::Swap => permutation(&[0, 2, 1, 3]),
            StandardGate::CZ => {
                let mut m = permutation(&[0, 1, 2, 3]);
                m[15] = -one;
                m
            }
        };
        Ok(matrix)
    }
}

const PI_4: f64 = std::f64::consts::FRAC_PI_4;

fn angle(p: &ParameterExpression) -> IrResult<f64> {
    p.as_f64()
        .ok_or_else(|| IrError::UnboundParameter(p.to_string()))
}

fn half_angle(theta: f64) -> (f64, f64) {
    ((theta / 2.0).cos(), (theta / 2.0).sin())
}

/// 4×4 permutation matrix mapping column `j` to row `rows[j]`.
fn permutation(rows: &[usize; 4]) -> Vec<Complex64> {
    let mut m = vec![Complex64::new(0.0, 0.0); 16];
    for (col, &row) in rows.iter().enumerate() {
        m[row * 4 + col] = Complex64::new(1.0, 0.0);
    }
    m
}

/// Conjugate transpose of a row-major `dim × dim` matrix.
pub fn dagger(matrix: &[Complex64], dim: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); dim * dim];
    for r in 0..dim {
        for c in 0..dim {
            out[c * dim + r] = matrix[r * dim + c].conj();
        }
    }
    out
}

/// A named user-supplied unitary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Unitary matrix (row-major, 2^n × 2^n).
    pub matrix: Vec<Complex64>,
}

impl CustomGate {
    /// Create a custom gate, checking the matrix has `4^num_qubits` entries.
    ///
    /// Unitarity is not checked here.
    pub fn new(name: impl Into<String>, num_qubits: u32, matrix: Vec<Complex64>) -> IrResult<Self> {
        let name = name.into();
        let dim = 1usize << num_qubits;
        if matrix.len() != dim * dim {
            return Err(IrError::InvalidMatrix {
                gate_name: name,
                expected: dim * dim,
                got: matrix.len(),
            });
        }
        Ok(Self {
            name,
            num_qubits,
            matrix,
        })
    }

    /// The inverse gate: conjugate-transposed matrix, `_dg` suffix toggled.
    #[must_use]
    pub fn adjoint(&self) -> CustomGate {
        let name = match self.name.strip_suffix(ADJOINT_SUFFIX) {
            Some(base) => base.to_string(),
            None => format!("{}{ADJOINT_SUFFIX}", self.name),
        };
        CustomGate {
            name,
            num_qubits: self.num_qubits,
            matrix: dagger(&self.matrix, 1usize << self.num_qubits),
        }
    }
}

/// A quantum gate, either from the library or user-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom user-defined gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// The unitary matrix, row-major.
    pub fn matrix(&self) -> IrResult<Vec<Complex64>> {
        match self {
            GateKind::Standard(g) => g.matrix(),
            GateKind::Custom(g) => Ok(g.matrix.clone()),
        }
    }

    /// The inverse gate.
    #[must_use]
    pub fn adjoint(&self) -> GateKind {
        match self {
            GateKind::Standard(g) => GateKind::Standard(g.adjoint()),
            GateKind::Custom(g) => GateKind::Custom(g.adjoint()),
        }
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<CustomGate> for GateKind {
    fn from(gate: CustomGate) -> Self {
        GateKind::Custom(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn library() -> Vec<StandardGate> {
        let theta = || ParameterExpression::constant(0.37);
        vec![
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::Sdg,
            StandardGate::T,
            StandardGate::Tdg,
            StandardGate::Rx(theta()),
            StandardGate::Ry(theta()),
            StandardGate::Rz(theta()),
            StandardGate::P(theta()),
            StandardGate::CX,
            StandardGate::CZ,
            StandardGate::Swap,
        ]
    }

    fn assert_matrix_eq(a: &[Complex64], b: &[Complex64]) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).norm() < 1e-12, "entry {i}: {x} != {y}");
        }
    }

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert!(StandardGate::Rz(ParameterExpression::symbol("t")).is_parameterized());
        assert!(!StandardGate::Rz(ParameterExpression::pi()).is_parameterized());
    }

    #[test]
    fn test_names_table_covers_library() {
        let names: Vec<_> = library().iter().map(StandardGate::name).collect();
        assert_eq!(names, STANDARD_GATE_NAMES);
        assert!(StandardGate::is_standard_name("cx"));
        assert!(!StandardGate::is_standard_name("NOT"));
    }

    #[test]
    fn test_adjoint_is_conjugate_transpose() {
        for gate in library() {
            let dim = 1usize << gate.num_qubits();
            let m = gate.matrix().unwrap();
            let adj = gate.adjoint().matrix().unwrap();
            assert_matrix_eq(&adj, &dagger(&m, dim));
        }
    }

    #[test]
    fn test_self_adjoint_gates() {
        for gate in library() {
            if gate.is_self_adjoint() {
                assert_eq!(gate.adjoint(), gate);
            }
        }
        assert_eq!(
            StandardGate::Rz(ParameterExpression::constant(PI)).adjoint(),
            StandardGate::Rz(ParameterExpression::constant(-PI))
        );
    }

    #[test]
    fn test_cx_matrix_layout() {
        let m = StandardGate::CX.matrix().unwrap();
        // |10⟩ -> |11⟩
        assert_eq!(m[3 * 4 + 2], Complex64::new(1.0, 0.0));
        assert_eq!(m[2 * 4 + 2], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_symbolic_matrix_fails() {
        let gate = StandardGate::Ry(ParameterExpression::symbol("theta"));
        assert!(matches!(gate.matrix(), Err(IrError::UnboundParameter(_))));
    }

    #[test]
    fn test_custom_gate_adjoint_round_trip() {
        let i = Complex64::new(0.0, 1.0);
        let zero = Complex64::new(0.0, 0.0);
        let gate = CustomGate::new("phase_i", 1, vec![i, zero, zero, -i]).unwrap();
        let adj = gate.adjoint();
        assert_eq!(adj.name, "phase_i_dg");
        assert_eq!(adj.matrix, vec![-i, zero, zero, i]);
        assert_eq!(adj.adjoint(), gate);
    }

    #[test]
    fn test_custom_gate_rejects_bad_matrix() {
        let err = CustomGate::new("bad", 1, vec![Complex64::new(1.0, 0.0); 3]).unwrap_err();
        assert!(matches!(
            err,
            IrError::InvalidMatrix {
                expected: 4,
                got: 3,
                ..
            }
        ));
    }
}
