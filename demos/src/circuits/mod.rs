//! Circuit generators for demos.

pub mod grover;

pub use grover::{grover_circuit, marked_state_oracle, success_probability};
