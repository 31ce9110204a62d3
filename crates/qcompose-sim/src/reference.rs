//! Dense reference simulation.
//!
//! Small-register statevector and unitary simulation used to check that
//! decomposed circuits implement the operators they claim to. Qubit `q` is
//! bit `q` of the basis-state index (little-endian).
//!
//! Everything here is exponential in the register width; registers wider
//! than [`MAX_QUBITS`] are rejected.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use qcompose_ir::{Axis, CliffordGate, EntanglerKind, GateOp, QubitId};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, PauliOp, PauliString};
use crate::trotter::TrotterEvolution;

/// Widest register the dense simulator accepts.
pub const MAX_QUBITS: u32 = 12;

/// Number of Taylor terms tried before giving up on convergence.
const TAYLOR_MAX_TERMS: usize = 30;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

type Mat2 = [[Complex64; 2]; 2];

fn check_width(n_qubits: u32) -> SimResult<usize> {
    if n_qubits > MAX_QUBITS {
        return Err(SimError::RegisterTooLarge {
            n_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(1usize << n_qubits)
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Dense matrix of a Pauli string on an `n_qubits` register.
pub fn pauli_matrix(pauli: &PauliString, n_qubits: u32) -> SimResult<Array2<Complex64>> {
    let dim = check_width(n_qubits)?;
    if let Some(q) = pauli.max_qubit().filter(|&q| q >= n_qubits) {
        return Err(SimError::QubitOutOfRange { qubit: q, n_qubits });
    }

    let flip_mask = pauli
        .ops()
        .iter()
        .filter(|(_, op)| matches!(op, PauliOp::X | PauliOp::Y))
        .fold(0usize, |mask, (q, _)| mask | (1 << q));

    let mut m = Array2::zeros((dim, dim));
    for col in 0..dim {
        let mut phase = ONE;
        for &(q, op) in pauli.ops() {
            let bit = (col >> q) & 1;
            phase *= match (op, bit) {
                (PauliOp::Y, 0) => I,
                (PauliOp::Y, _) => -I,
                (PauliOp::Z, 1) => -ONE,
                _ => ONE,
            };
        }
        m[[col ^ flip_mask, col]] = phase;
    }
    Ok(m)
}

/// Dense matrix of `H = Σ c_k P_k`.
pub fn hamiltonian_matrix(h: &Hamiltonian, n_qubits: u32) -> SimResult<Array2<Complex64>> {
    let dim = check_width(n_qubits)?;
    let mut m = Array2::zeros((dim, dim));
    for term in h.terms() {
        m = m + pauli_matrix(&term.pauli, n_qubits)? * term.coeff;
    }
    Ok(m)
}

/// Matrix exponential by Taylor series with scaling and squaring.
pub fn matrix_exp(a: &Array2<Complex64>) -> SimResult<Array2<Complex64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(SimError::DimensionMismatch {
            left: n,
            right: a.ncols(),
        });
    }

    // Scale so that ||A/2^s||_1 <= 0.5.
    let norm = matrix_1_norm(a);
    let s = if norm > 0.5 {
        (norm / 0.5).log2().ceil() as u32
    } else {
        0
    };
    let scaled = a * Complex64::new(1.0 / f64::from(2u32).powi(s as i32), 0.0);

    let mut result = Array2::<Complex64>::eye(n);
    let mut term = Array2::<Complex64>::eye(n);
    for k in 1..=TAYLOR_MAX_TERMS {
        term = term.dot(&scaled) * Complex64::new(1.0 / k as f64, 0.0);
        result = result + &term;
        if matrix_1_norm(&term) < f64::EPSILON {
            break;
        }
    }

    for _ in 0..s {
        result = result.dot(&result);
    }
    Ok(result)
}

/// Maximum absolute column sum.
fn matrix_1_norm(a: &Array2<Complex64>) -> f64 {
    a.columns()
        .into_iter()
        .map(|col| col.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Exact evolution operator `exp(-i H t)`.
pub fn evolution_operator(h: &Hamiltonian, n_qubits: u32, t: f64) -> SimResult<Array2<Complex64>> {
    let hm = hamiltonian_matrix(h, n_qubits)?;
    matrix_exp(&(hm * Complex64::new(0.0, -t)))
}

/// Process infidelity `1 - |Tr(U† V)| / d`, insensitive to global phase.
pub fn process_infidelity(u: &Array2<Complex64>, v: &Array2<Complex64>) -> SimResult<f64> {
    if u.dim() != v.dim() {
        return Err(SimError::DimensionMismatch {
            left: u.nrows(),
            right: v.nrows(),
        });
    }
    let d = u.nrows();
    if d == 0 {
        return Ok(0.0);
    }
    let overlap: Complex64 = u.iter().zip(v.iter()).map(|(a, b)| a.conj() * b).sum();
    Ok((1.0 - overlap.norm() / d as f64).max(0.0))
}

/// Infidelity of a Trotter decomposition against exact evolution.
pub fn trotter_infidelity(evolution: &TrotterEvolution, n_qubits: u32) -> SimResult<f64> {
    let segment = evolution.build(qcompose_ir::QubitRegister::new(n_qubits))?;
    let values: Vec<f64> = segment.parameters().iter().map(|p| p.value).collect();
    let approx = circuit_unitary(segment.ops(), &values, n_qubits)?;
    let exact = evolution_operator(evolution.hamiltonian(), n_qubits, evolution.time())?;
    process_infidelity(&exact, &approx)
}

/// Unitary implemented by `ops` with slot values `values`.
pub fn circuit_unitary(ops: &[GateOp], values: &[f64], n_qubits: u32) -> SimResult<Array2<Complex64>> {
    let dim = check_width(n_qubits)?;
    let mut u = Array2::zeros((dim, dim));
    for col in 0..dim {
        let mut sv = Statevector::basis(n_qubits, col)?;
        sv.apply_all(ops, values)?;
        u.column_mut(col).assign(sv.amplitudes());
    }
    Ok(u)
}

// ---------------------------------------------------------------------------
// Statevector
// ---------------------------------------------------------------------------

/// Dense statevector over a small register.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    n_qubits: u32,
    amplitudes: Array1<Complex64>,
}

impl Statevector {
    /// The all-zeros state `|0…0⟩`.
    pub fn zero(n_qubits: u32) -> SimResult<Self> {
        Self::basis(n_qubits, 0)
    }

    /// Computational basis state `|index⟩`.
    pub fn basis(n_qubits: u32, index: usize) -> SimResult<Self> {
        let dim = check_width(n_qubits)?;
        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index % dim] = ONE;
        Ok(Self {
            n_qubits,
            amplitudes,
        })
    }

    /// Register width.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Amplitudes indexed by basis state.
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Apply every operation in order.
    pub fn apply_all(&mut self, ops: &[GateOp], values: &[f64]) -> SimResult<()> {
        for op in ops {
            self.apply(op, values)?;
        }
        Ok(())
    }

    /// Apply one operation, reading slot values from `values`.
    pub fn apply(&mut self, op: &GateOp, values: &[f64]) -> SimResult<()> {
        for q in op.qubits() {
            if q.0 >= self.n_qubits {
                return Err(SimError::QubitOutOfRange {
                    qubit: q.0,
                    n_qubits: self.n_qubits,
                });
            }
        }

        match op {
            GateOp::Rotation { axis, qubit, angle } => {
                let m = rotation_matrix(*axis, angle.evaluate(values)?);
                self.apply_single(*qubit, &m);
            }
            GateOp::Clifford { gate, qubit } => {
                self.apply_single(*qubit, &clifford_matrix(*gate));
            }
            GateOp::Entangler { kind, qubits } => match kind {
                EntanglerKind::CX => {
                    self.apply_controlled(qubits[0], qubits[1], &[[ZERO, ONE], [ONE, ZERO]]);
                }
            },
            GateOp::Rbs { qubits, angle } => {
                self.apply_rbs(qubits[0], qubits[1], angle.evaluate(values)?);
            }
            GateOp::Controlled {
                kind,
                control,
                target,
                angle,
            } => {
                let m = rotation_matrix(kind.axis(), angle.evaluate(values)?);
                self.apply_controlled(*control, *target, &m);
            }
        }
        Ok(())
    }

    /// Measurement probabilities per basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Expectation value of Z on `qubit`.
    pub fn expectation_z(&self, qubit: QubitId) -> f64 {
        let bit = qubit.index();
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(i, a)| {
                if (i >> bit) & 1 == 0 {
                    a.norm_sqr()
                } else {
                    -a.norm_sqr()
                }
            })
            .sum()
    }

    fn apply_single(&mut self, qubit: QubitId, m: &Mat2) {
        let mask = 1usize << qubit.index();
        for i in 0..self.amplitudes.len() {
            if i & mask != 0 {
                continue;
            }
            let (a0, a1) = (self.amplitudes[i], self.amplitudes[i | mask]);
            self.amplitudes[i] = m[0][0] * a0 + m[0][1] * a1;
            self.amplitudes[i | mask] = m[1][0] * a0 + m[1][1] * a1;
        }
    }

    fn apply_controlled(&mut self, control: QubitId, target: QubitId, m: &Mat2) {
        let cmask = 1usize << control.index();
        let tmask = 1usize << target.index();
        for i in 0..self.amplitudes.len() {
            if i & cmask == 0 || i & tmask != 0 {
                continue;
            }
            let (a0, a1) = (self.amplitudes[i], self.amplitudes[i | tmask]);
            self.amplitudes[i] = m[0][0] * a0 + m[0][1] * a1;
            self.amplitudes[i | tmask] = m[1][0] * a0 + m[1][1] * a1;
        }
    }

    /// Givens rotation on `{|01⟩, |10⟩}` of the pair, where `|01⟩` has
    /// `q0 = 0, q1 = 1`:
    ///
    ///   |01⟩ → cos θ |01⟩ − sin θ |10⟩
    ///   |10⟩ → sin θ |01⟩ + cos θ |10⟩
    fn apply_rbs(&mut self, q0: QubitId, q1: QubitId, theta: f64) {
        let m0 = 1usize << q0.index();
        let m1 = 1usize << q1.index();
        let (c, s) = (theta.cos(), theta.sin());
        for i in 0..self.amplitudes.len() {
            if i & m0 != 0 || i & m1 == 0 {
                continue;
            }
            // i has q0 = 0, q1 = 1; j has q0 = 1, q1 = 0.
            let j = i ^ m0 ^ m1;
            let (a01, a10) = (self.amplitudes[i], self.amplitudes[j]);
            self.amplitudes[i] = a01 * c + a10 * s;
            self.amplitudes[j] = -a01 * s + a10 * c;
        }
    }
}

fn rotation_matrix(axis: Axis, theta: f64) -> Mat2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = (theta / 2.0).sin();
    match axis {
        Axis::X => [[c, Complex64::new(0.0, -s)], [Complex64::new(0.0, -s), c]],
        Axis::Y => [
            [c, Complex64::new(-s, 0.0)],
            [Complex64::new(s, 0.0), c],
        ],
        Axis::Z => [
            [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
            [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
        ],
    }
}

fn clifford_matrix(gate: CliffordGate) -> Mat2 {
    let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    match gate {
        CliffordGate::H => [[h, h], [h, -h]],
        CliffordGate::S => [[ONE, ZERO], [ZERO, I]],
        CliffordGate::Sdg => [[ONE, ZERO], [ZERO, -I]],
        CliffordGate::X => [[ZERO, ONE], [ONE, ZERO]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::HamiltonianTerm;
    use qcompose_ir::ParameterExpression;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn x_flips_zero() {
        let mut sv = Statevector::zero(2).unwrap();
        sv.apply(&GateOp::clifford(CliffordGate::X, QubitId(1)), &[])
            .unwrap();
        let p = sv.probabilities();
        assert!(close(p[0b10], 1.0));
        assert!(close(sv.expectation_z(QubitId(1)), -1.0));
        assert!(close(sv.expectation_z(QubitId(0)), 1.0));
    }

    #[test]
    fn bell_state() {
        let mut sv = Statevector::zero(2).unwrap();
        let ops = [
            GateOp::clifford(CliffordGate::H, QubitId(0)),
            GateOp::entangler(EntanglerKind::CX, QubitId(0), QubitId(1)),
        ];
        sv.apply_all(&ops, &[]).unwrap();
        let p = sv.probabilities();
        assert!(close(p[0b00], 0.5));
        assert!(close(p[0b11], 0.5));
    }

    #[test]
    fn rbs_moves_excitation() {
        // q1 = 1: |01⟩ of the pair (q0, q1).
        let mut sv = Statevector::basis(2, 0b10).unwrap();
        let op = GateOp::rbs(ParameterExpression::slot(0), QubitId(0), QubitId(1));
        sv.apply(&op, &[std::f64::consts::FRAC_PI_2]).unwrap();
        assert!(close(sv.probabilities()[0b01], 1.0));
    }

    #[test]
    fn missing_slot_value_is_error() {
        let mut sv = Statevector::zero(1).unwrap();
        let op = GateOp::rotation(Axis::Y, ParameterExpression::slot(2), QubitId(0));
        assert!(matches!(sv.apply(&op, &[0.0]), Err(SimError::Ir(_))));
    }

    #[test]
    fn matrix_exp_of_zero_is_identity() {
        let z = Array2::<Complex64>::zeros((4, 4));
        let e = matrix_exp(&z).unwrap();
        assert!(close(process_infidelity(&Array2::eye(4), &e).unwrap(), 0.0));
    }

    #[test]
    fn single_z_evolution_matches_rz() {
        let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 0.7)]);
        let exact = evolution_operator(&h, 1, 1.3).unwrap();
        let rz = circuit_unitary(
            &[GateOp::rotation(Axis::Z, 2.0 * 0.7 * 1.3, QubitId(0))],
            &[],
            1,
        )
        .unwrap();
        assert!(process_infidelity(&exact, &rz).unwrap() < 1e-10);
    }

    #[test]
    fn pauli_y_matrix() {
        let y = pauli_matrix(&PauliString::from_ops([(0, PauliOp::Y)]), 1).unwrap();
        assert_eq!(y[[1, 0]], I);
        assert_eq!(y[[0, 1]], -I);
    }

    #[test]
    fn too_wide() {
        assert!(matches!(
            Statevector::zero(MAX_QUBITS + 1),
            Err(SimError::RegisterTooLarge { .. })
        ));
    }
}
