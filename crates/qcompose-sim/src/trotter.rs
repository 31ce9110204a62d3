//! Trotter-Suzuki product-formula decomposition.
//!
//! Approximates `exp(-i H t)` by splitting the evolution into `n_steps`
//! slices, each evolved exactly under each term in sequence.
//!
//! # First-order Trotter (Lie-Trotter)
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k t/n)]^n
//!
//! Error: O(t² / n).
//!
//! # Second-order Trotter (Suzuki-Trotter)
//!
//!   exp(-i H t) ≈ [S₂(t/n)]^n
//!   S₂(τ) = [∏_k exp(-i c_k P_k τ/2)] · [∏_k exp(-i c_{n-k} P_{n-k} τ/2)]
//!
//! Error: O(t³ / n²).
//!
//! The step count is never tuned automatically; callers trade precision
//! against gate count by choosing `n_steps`.

use qcompose_ir::{ParameterExpression, QubitRegister, Segment, SegmentBuilder, SegmentKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::synthesis::{append_exp_pauli, exp_pauli_gate_count};

/// Product-formula order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrotterOrder {
    /// Lie-Trotter: one forward sweep per step.
    #[default]
    First,
    /// Symmetric Suzuki-Trotter: forward then reverse half-sweep per step.
    Second,
}

impl TrotterOrder {
    /// Number of sweeps over the terms per Trotter step.
    pub fn sweeps_per_step(self) -> usize {
        match self {
            TrotterOrder::First => 1,
            TrotterOrder::Second => 2,
        }
    }
}

/// Trotter product-formula time-evolution decomposer.
#[derive(Debug, Clone)]
pub struct TrotterEvolution {
    hamiltonian: Hamiltonian,
    /// Total evolution time t.
    t: f64,
    /// Number of Trotter steps (repetitions).
    n_steps: usize,
    order: TrotterOrder,
    /// Expose t as a parameter slot instead of baking it into the angles.
    trainable_time: bool,
}

impl TrotterEvolution {
    /// Construct a new first-order Trotter decomposer.
    ///
    /// # Arguments
    /// * `hamiltonian`: the Hamiltonian H = Σ c_k P_k
    /// * `t`: total evolution time
    /// * `n_steps`: number of Trotter slices (higher → more accurate)
    pub fn new(hamiltonian: Hamiltonian, t: f64, n_steps: usize) -> Self {
        Self {
            hamiltonian,
            t,
            n_steps,
            order: TrotterOrder::First,
            trainable_time: false,
        }
    }

    /// Select the product-formula order.
    #[must_use]
    pub fn with_order(mut self, order: TrotterOrder) -> Self {
        self.order = order;
        self
    }

    /// Make the evolution time a trainable parameter slot named `t`.
    ///
    /// Every rotation angle then reads `(2·c_k / n) · t` from the slot, with
    /// the slot initialised to the configured time.
    #[must_use]
    pub fn with_trainable_time(mut self, trainable: bool) -> Self {
        self.trainable_time = trainable;
        self
    }

    /// The Hamiltonian being evolved.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// Total evolution time.
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Number of Trotter steps.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Product-formula order.
    pub fn order(&self) -> TrotterOrder {
        self.order
    }

    /// Evolution time covered by one Trotter step, `t / n_steps`.
    pub fn step_time(&self) -> f64 {
        self.t / self.n_steps as f64
    }

    /// Number of parameter slots the segment reserves.
    pub fn num_parameters(&self) -> usize {
        usize::from(self.trainable_time)
    }

    /// Number of gate operations the segment contains.
    pub fn gate_count(&self) -> usize {
        let per_sweep: usize = self
            .hamiltonian
            .terms()
            .iter()
            .map(|term| exp_pauli_gate_count(&term.pauli))
            .sum();
        per_sweep * self.order.sweeps_per_step() * self.n_steps
    }

    /// Decompose the evolution into a segment acting on `register`.
    pub fn build(&self, register: QubitRegister) -> SimResult<Segment> {
        self.validate(register)?;

        let sweeps = self.order.sweeps_per_step();
        // Fraction of t covered by one sweep.
        let fraction = 1.0 / (self.n_steps * sweeps) as f64;
        let label = match self.order {
            TrotterOrder::First => "trotter1",
            TrotterOrder::Second => "trotter2",
        };

        let mut builder = SegmentBuilder::new(SegmentKind::Trotter, label, register);
        let time = self
            .trainable_time
            .then(|| builder.parameter("t", self.t));

        debug!(
            n_terms = self.hamiltonian.n_terms(),
            n_steps = self.n_steps,
            order = ?self.order,
            trainable_time = self.trainable_time,
            n_qubits = register.len(),
            "decomposing Hamiltonian evolution"
        );

        let angle = |coeff: f64| -> ParameterExpression {
            match &time {
                Some(slot) => ParameterExpression::constant(2.0 * coeff * fraction) * slot.clone(),
                None => ParameterExpression::constant(2.0 * coeff * self.t * fraction),
            }
        };

        for _ in 0..self.n_steps {
            for term in self.hamiltonian.terms() {
                append_exp_pauli(&mut builder, &term.pauli, angle(term.real_coeff()))?;
            }
            if self.order == TrotterOrder::Second {
                for term in self.hamiltonian.terms().iter().rev() {
                    append_exp_pauli(&mut builder, &term.pauli, angle(term.real_coeff()))?;
                }
            }
        }

        Ok(builder.build())
    }

    fn validate(&self, register: QubitRegister) -> SimResult<()> {
        self.hamiltonian.validate()?;
        if self.n_steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        let needed = self.hamiltonian.min_qubits();
        if needed > register.len() {
            return Err(SimError::QubitOutOfRange {
                qubit: needed - 1,
                n_qubits: register.len(),
            });
        }
        Ok(())
    }
}
