//! Ampl Circuit Intermediate Representation
//!
//! This crate provides the circuit value type that every other Ampl crate
//! produces and consumes.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], an opaque wire index
//! - **Gates**: [`StandardGate`] for the fixed gate library and [`CustomGate`]
//!   for named user unitaries
//! - **Parameters**: [`ParameterExpression`] for concrete or symbolic angles
//! - **Instructions**: [`Instruction`], a validated gate + operand tuple
//! - **Circuit**: [`Circuit`], an immutable instruction sequence with
//!   [`compose`] and [`invert`]
//!
//! # Example: composing and inverting
//!
//! ```rust
//! use ampl_ir::{Circuit, QubitId, compose, invert};
//! use std::f64::consts::PI;
//!
//! let prep = Circuit::empty().h(QubitId(0)).rz(PI / 4.0, QubitId(0));
//! let entangle = Circuit::empty().cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let both = compose(&prep, &entangle);
//! assert_eq!(both.len(), 3);
//!
//! // Inversion reverses the order and inverts every gate.
//! let undo = invert(&both);
//! assert_eq!(undo.instructions()[0].name(), "cx");
//! assert_eq!(invert(&undo), both);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Adjoint |
//! |------|--------|---------|
//! | `X`, `Y`, `Z`, `H` | 1 | self |
//! | `S` / `Sdg`, `T` / `Tdg` | 1 | each other |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | negated angle |
//! | `CX`, `CZ`, `Swap` | 2 | self |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::{Circuit, compose, invert};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, GateKind, STANDARD_GATE_NAMES, StandardGate};
pub use instruction::Instruction;
pub use parameter::ParameterExpression;
pub use qubit::{QubitId, find_duplicate, qubits};
