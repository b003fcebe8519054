//! 2x2 unitary algebra for controlled-gate synthesis.
//!
//! Provides matrix products, principal square roots and the ZYZ Euler
//! decomposition used to turn an arbitrary single-qubit operation into
//! library rotations.

use num_complex::Complex64;
use std::f64::consts::PI;

use ampl_ir::{IrError, IrResult, StandardGate};

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

/// A 2x2 complex matrix in row-major order.
///
/// Despite the name, unitarity is not enforced; see [`Unitary2x2::is_unitary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create a real-valued matrix.
    pub fn real(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(a.into(), b.into(), c.into(), d.into())
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::real(1.0, 0.0, 0.0, 1.0)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        Self::real(s, s, s, -s)
    }

    /// Create a Pauli-X matrix, the NOT operation.
    pub fn x() -> Self {
        Self::real(0.0, 1.0, 1.0, 0.0)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(0.0, 0.0),
        )
    }

    /// Create a Pauli-Z matrix.
    pub fn z() -> Self {
        Self::real(1.0, 0.0, 0.0, -1.0)
    }

    /// Create a T gate (fourth root of Z).
    pub fn t() -> Self {
        Self::p(PI / 4.0)
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::real(c, -s, s, c)
    }

    /// Create an RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Create a phase gate P(lambda).
    pub fn p(lambda: f64) -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, lambda),
        )
    }

    /// The matrix of a single-qubit library gate.
    pub fn from_gate(gate: &StandardGate) -> IrResult<Self> {
        Self::from_slice(gate.name(), &gate.matrix()?)
    }

    /// Read a row-major matrix with exactly four entries.
    pub fn from_slice(name: &str, entries: &[Complex64]) -> IrResult<Self> {
        match entries {
            &[a, b, c, d] => Ok(Self::new(a, b, c, d)),
            _ => Err(IrError::InvalidMatrix {
                gate_name: name.to_string(),
                expected: 4,
                got: entries.len(),
            }),
        }
    }

    /// Row-major entries.
    pub fn to_vec(&self) -> Vec<Complex64> {
        self.data.to_vec()
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Multiply every entry by a scalar.
    pub fn scale(&self, k: Complex64) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a * k, b * k, c * k, d * k)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Determinant.
    pub fn det(&self) -> Complex64 {
        let [a, b, c, d] = self.data;
        a * d - b * c
    }

    /// Trace.
    pub fn trace(&self) -> Complex64 {
        self.data[0] + self.data[3]
    }

    /// Largest entry-wise deviation of `U†U` from the identity.
    pub fn unitarity_deviation(&self) -> f64 {
        let product = self.dagger().mul(self);
        product
            .data
            .iter()
            .zip(Self::identity().data)
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }

    /// Whether `U†U = I` within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        self.unitarity_deviation() <= tolerance
    }

    /// Entry-wise comparison within `tolerance`, global phase included.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.data
            .iter()
            .zip(other.data)
            .all(|(x, y)| (x - y).norm() <= tolerance)
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;
        if b.norm() > EPSILON || c.norm() > EPSILON {
            return false;
        }
        (a - d).norm() < EPSILON
    }

    /// Principal square root: a matrix `V` with `V * V == self`.
    ///
    /// Uses the 2x2 closed form `V = (U + sI) / t` with `s = ±√det U` and
    /// `t = √(tr U + 2s)`, picking the sign of `s` that keeps `t` away from
    /// zero. Returns `None` only for singular input.
    pub fn sqrt(&self) -> Option<Self> {
        let s = self.det().sqrt();
        let trace = self.trace();
        let (s, t2) = if (trace + 2.0 * s).norm() >= (trace - 2.0 * s).norm() {
            (s, trace + 2.0 * s)
        } else {
            (-s, trace - 2.0 * s)
        };
        if t2.norm() < EPSILON {
            return None;
        }
        let t = t2.sqrt();
        let [a, b, c, d] = self.data;
        Some(Self::new((a + s) / t, b / t, c / t, (d + s) / t))
    }

    /// Decompose into `e^{iφ} · RZ(alpha) · RY(beta) · RZ(gamma)`.
    ///
    /// Returns (alpha, beta, gamma, φ) with beta in [0, π]. This is the ZYZ
    /// Euler decomposition; the global phase is exact, not discarded.
    pub fn zyz_decomposition(&self) -> (f64, f64, f64, f64) {
        let [a, b, c, _] = self.data;

        // det(e^{iφ} W) = e^{2iφ} for W in SU(2)
        let global_phase = self.det().arg() / 2.0;

        let phase_factor = Complex64::from_polar(1.0, -global_phase);
        let a = a * phase_factor;
        let b = b * phase_factor;
        let c = c * phase_factor;

        // For SU(2): U = [[cos(b/2)*e^(-i(a+g)/2), -sin(b/2)*e^(-i(a-g)/2)],
        //                 [sin(b/2)*e^(i(a-g)/2),   cos(b/2)*e^(i(a+g)/2)]]
        let beta = 2.0 * c.norm().atan2(a.norm());

        if beta.abs() < EPSILON {
            // Pure Z rotation; split the angle evenly.
            let alpha_plus_gamma = -2.0 * a.arg();
            return (
                alpha_plus_gamma / 2.0,
                0.0,
                alpha_plus_gamma / 2.0,
                global_phase,
            );
        }

        if (beta - PI).abs() < EPSILON {
            let alpha_minus_gamma = -2.0 * (-b).arg();
            return (
                alpha_minus_gamma / 2.0,
                PI,
                -alpha_minus_gamma / 2.0,
                global_phase,
            );
        }

        let alpha_plus_gamma = -2.0 * a.arg();
        let alpha_minus_gamma = 2.0 * c.arg();

        let alpha = f64::midpoint(alpha_plus_gamma, alpha_minus_gamma);
        let gamma = (alpha_plus_gamma - alpha_minus_gamma) / 2.0;

        (alpha, beta, gamma, global_phase)
    }

    /// Normalize angles to [-pi, pi].
    ///
    /// Only valid for gates with period 2π such as the phase gate; `RZ` and
    /// `RY` change sign under a 2π shift.
    pub fn normalize_angle(angle: f64) -> f64 {
        if angle.is_nan() || angle.is_infinite() {
            return 0.0;
        }
        let mut a = angle.rem_euclid(2.0 * PI);
        if a > PI {
            a -= 2.0 * PI;
        }
        a
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}
