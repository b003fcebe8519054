//! Dense unitary evaluation of small circuits.
//!
//! Builds the full `2^n x 2^n` matrix of a circuit over an ordered register.
//! `register[0]` is the most significant bit of a basis index, and a gate's
//! own matrix treats its first operand as the most significant bit.

use num_complex::Complex64;
use rustc_hash::FxHashMap;

use ampl_ir::{Circuit, QubitId};

use crate::error::{SynthError, SynthResult};
use crate::unitary::Unitary2x2;

/// Widest register [`circuit_matrix`] accepts. A 12-qubit matrix already
/// holds 2^24 complex entries.
pub const MAX_DENSE_QUBITS: usize = 12;

/// A square complex matrix in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl DenseMatrix {
    /// The `dim x dim` identity.
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for i in 0..dim {
            data[i * dim + i] = Complex64::new(1.0, 0.0);
        }
        Self { dim, data }
    }

    /// A diagonal matrix.
    pub fn diagonal(entries: &[Complex64]) -> Self {
        let dim = entries.len();
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for (i, &v) in entries.iter().enumerate() {
            data[i * dim + i] = v;
        }
        Self { dim, data }
    }

    /// Build from row-major entries; `None` unless `data` is square.
    pub fn from_row_major(dim: usize, data: Vec<Complex64>) -> Option<Self> {
        (data.len() == dim * dim).then_some(Self { dim, data })
    }

    /// A single-qubit operation at register position `position` (0 = MSB)
    /// in an `num_qubits`-qubit register.
    pub fn embed_single_qubit(u: &Unitary2x2, position: usize, num_qubits: usize) -> Self {
        let dim = 1 << num_qubits;
        let shift = num_qubits - 1 - position;
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for row in 0..dim {
            for col in 0..dim {
                // Non-target bits must agree.
                if (row ^ col) & !(1 << shift) != 0 {
                    continue;
                }
                let r = (row >> shift) & 1;
                let c = (col >> shift) & 1;
                data[row * dim + col] = u.data[r * 2 + c];
            }
        }
        Self { dim, data }
    }

    /// Side length.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Column `col`, i.e. the image of basis state `|col⟩`.
    pub fn column(&self, col: usize) -> Vec<Complex64> {
        (0..self.dim).map(|row| self.get(row, col)).collect()
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self {
            dim: self.dim,
            data: ampl_ir::gate::dagger(&self.data, self.dim),
        }
    }

    /// Matrix product `self * other`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let n = self.dim;
        let mut data = vec![Complex64::new(0.0, 0.0); n * n];
        for i in 0..n {
            for k in 0..n {
                let a = self.data[i * n + k];
                if a.norm_sqr() == 0.0 {
                    continue;
                }
                for j in 0..n {
                    data[i * n + j] += a * other.data[k * n + j];
                }
            }
        }
        Self { dim: n, data }
    }

    /// Entry-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Whether `other = e^{iφ} self` for some φ, within `tolerance`.
    pub fn approx_eq_up_to_phase(&self, other: &Self, tolerance: f64) -> bool {
        if self.dim != other.dim {
            return false;
        }
        let Some((idx, pivot)) = self
            .data
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
        else {
            return true;
        };
        if pivot.norm() <= tolerance {
            return other.data.iter().all(|v| v.norm() <= tolerance);
        }
        let ratio = other.data[idx] / pivot;
        if (ratio.norm() - 1.0).abs() > tolerance {
            return false;
        }
        let phase = ratio / ratio.norm();
        self.data
            .iter()
            .zip(&other.data)
            .all(|(a, b)| (a * phase - b).norm() <= tolerance)
    }
}

/// The unitary a circuit implements on `register`.
///
/// Fails if the register is wider than [`MAX_DENSE_QUBITS`], or if an
/// instruction touches a qubit outside the register or carries an unbound
/// symbolic parameter.
pub fn circuit_matrix(circuit: &Circuit, register: &[QubitId]) -> SynthResult<DenseMatrix> {
    let n = register.len();
    if n > MAX_DENSE_QUBITS {
        return Err(SynthError::RegisterTooLarge {
            qubits: n,
            max: MAX_DENSE_QUBITS,
        });
    }
    let mut position: FxHashMap<QubitId, usize> = FxHashMap::default();
    for (i, &qubit) in register.iter().enumerate() {
        if position.insert(qubit, i).is_some() {
            return Err(SynthError::DuplicateRegisterQubit { qubit });
        }
    }

    let mut state = DenseMatrix::identity(1 << n);
    for inst in circuit {
        let shifts = inst
            .qubits()
            .iter()
            .map(|q| {
                position
                    .get(q)
                    .map(|&p| n - 1 - p)
                    .ok_or(SynthError::QubitNotInRegister { qubit: *q })
            })
            .collect::<SynthResult<Vec<_>>>()?;
        let gate = inst.matrix()?;
        apply_gate(&mut state, &gate, &shifts);
    }
    Ok(state)
}

/// Left-multiply `state` by a gate acting on the bits at `shifts`
/// (first entry = most significant gate bit).
fn apply_gate(state: &mut DenseMatrix, gate: &[Complex64], shifts: &[usize]) {
    let k = shifts.len();
    let local_dim = 1 << k;
    let mask: usize = shifts.iter().map(|s| 1 << s).sum();

    // Basis index offset for each local gate index.
    let offsets: Vec<usize> = (0..local_dim)
        .map(|local| {
            shifts
                .iter()
                .enumerate()
                .filter(|(bit, _)| (local >> (k - 1 - bit)) & 1 == 1)
                .map(|(_, s)| 1 << s)
                .sum()
        })
        .collect();

    let dim = state.dim;
    let bases: Vec<usize> = (0..dim).filter(|b| (b & mask) == 0).collect();
    let mut amps = vec![Complex64::new(0.0, 0.0); local_dim];
    for col in 0..dim {
        for &base in &bases {
            for (local, off) in offsets.iter().enumerate() {
                amps[local] = state.data[(base | off) * dim + col];
            }
            for (row, off) in offsets.iter().enumerate() {
                let value = (0..local_dim)
                    .map(|c| gate[row * local_dim + c] * amps[c])
                    .sum();
                state.data[(base | off) * dim + col] = value;
            }
        }
    }
}
