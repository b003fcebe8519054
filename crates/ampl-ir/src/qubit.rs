//! Qubit identifiers.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a qubit wire.
///
/// Qubits are opaque integers at this layer: no range or existence checks
/// are made against any device or register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Return the first qubit that appears more than once in `qubits`.
pub fn find_duplicate<'a>(qubits: impl IntoIterator<Item = &'a QubitId>) -> Option<QubitId> {
    let mut seen = FxHashSet::default();
    qubits.into_iter().find(|q| !seen.insert(**q)).copied()
}

/// Build a list of qubit ids from raw indices.
pub fn qubits<I>(indices: I) -> Vec<QubitId>
where
    I: IntoIterator<Item = u32>,
{
    indices.into_iter().map(QubitId).collect()
}
