//! Ampl Controlled-Gate Synthesis
//!
//! Turns multiply-controlled single-qubit operations into sequences of
//! library gates without helper qubits, and evaluates small circuits to dense
//! unitaries for verification.
//!
//! # Overview
//!
//! - [`ControlledGateBuilder`]: step-wise configuration (controls, target,
//!   2x2 operation, name) validated by `build()`
//! - [`Unitary2x2`]: 2x2 algebra, square roots and ZYZ decomposition
//! - [`circuit_matrix`]: the `2^n x 2^n` unitary of a circuit
//!
//! # Example: a Toffoli gate
//!
//! ```rust
//! use ampl_ir::QubitId;
//! use ampl_synth::{ControlledGateBuilder, Unitary2x2, circuit_matrix};
//!
//! let register = [QubitId(0), QubitId(1), QubitId(2)];
//! let toffoli = ControlledGateBuilder::new()
//!     .with_controls([QubitId(0), QubitId(1)])
//!     .with_target(QubitId(2))
//!     .with_operation(Unitary2x2::x())
//!     .build()
//!     .unwrap();
//!
//! let m = circuit_matrix(&toffoli, &register).unwrap();
//! // |110⟩ -> |111⟩, |010⟩ unchanged
//! assert!((m.get(7, 6).re - 1.0).abs() < 1e-9);
//! assert!((m.get(2, 2).re - 1.0).abs() < 1e-9);
//! ```
//!
//! # Decomposition cost
//!
//! | Controls | Strategy |
//! |----------|----------|
//! | 0 | bare custom gate |
//! | 1 | `CX` for X, otherwise ABC: 2 `CX` + up to 5 rotations + phase |
//! | k ≥ 2 | `C(V)`, `C^{k-1}X`, `C(V†)`, `C^{k-1}X`, `C^{k-1}(V)` with `V = √U` |

pub mod controlled;
pub mod dense;
pub mod error;
pub mod unitary;

pub use controlled::{ControlledGate, ControlledGateBuilder, DEFAULT_GATE_NAME, controlled_gate};
pub use dense::{DenseMatrix, MAX_DENSE_QUBITS, circuit_matrix};
pub use error::{SynthError, SynthResult};
pub use unitary::Unitary2x2;
