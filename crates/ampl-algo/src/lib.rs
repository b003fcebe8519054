//! `ampl-algo`: amplitude amplification circuit construction.
//!
//! Builds the diffusion operator and the amplification loop on top of the
//! Ampl circuit IR and controlled-gate synthesis:
//!
//! - [`diffusion`]: the reflection `diag(1, -1, ..., -1)` from library gates
//!   and one multi-controlled NOT
//! - [`amplify`]: H layer, then `num_iter` rounds of
//!   `oracle · algorithm† · diffusion · algorithm`
//! - [`grover`]: [`amplify`] with an H layer as the algorithm
//!
//! # Quick start
//!
//! ```rust
//! use ampl_algo::grover;
//! use ampl_ir::{Circuit, QubitId};
//!
//! // Mark |11⟩ on two qubits.
//! let qubits = [QubitId(0), QubitId(1)];
//! let oracle = Circuit::empty().cz(QubitId(0), QubitId(1)).unwrap();
//!
//! let search = grover(&oracle, &qubits, 1).unwrap();
//! assert_eq!(search.num_qubits(), 2);
//! ```

pub mod amplification;
pub mod diffusion;
pub mod error;

pub use amplification::{amplify, grover};
pub use diffusion::diffusion;
pub use error::{AlgoError, AlgoResult};
