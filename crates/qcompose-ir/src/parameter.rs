//! Angle expressions over parameter slots.
//!
//! Gate angles are small expression trees whose leaves are numeric constants,
//! π, or references to a slot of the parameter vector. Slots are plain
//! indices: a segment numbers its own slots from zero, and the composer
//! shifts them into the shared vector when the segment is appended.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::fmt;

use crate::error::{IrError, IrResult};

/// A symbolic or concrete angle expression.
///
/// Products of constants, π and slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant numeric value.
    Constant(f64),
    /// Reference to a slot of the parameter vector.
    Slot(usize),
    /// The constant π.
    Pi,
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant expression.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a slot reference.
    pub fn slot(index: usize) -> Self {
        ParameterExpression::Slot(index)
    }

    /// Create a π constant.
    pub fn pi() -> Self {
        ParameterExpression::Pi
    }

    /// Check if this expression references any slot.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParameterExpression::Slot(_) => true,
            ParameterExpression::Constant(_) | ParameterExpression::Pi => false,
            ParameterExpression::Mul(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// Try to evaluate as a concrete f64 value without any slot values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Slot(_) => None,
            ParameterExpression::Pi => Some(PI),
            ParameterExpression::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
        }
    }

    /// Evaluate the expression, reading slot values from `values`.
    pub fn evaluate(&self, values: &[f64]) -> IrResult<f64> {
        Ok(match self {
            ParameterExpression::Constant(v) => *v,
            ParameterExpression::Slot(i) => {
                *values.get(*i).ok_or(IrError::UnknownParameter {
                    slot: *i,
                    allocated: values.len(),
                    gate_name: None,
                })?
            }
            ParameterExpression::Pi => PI,
            ParameterExpression::Mul(a, b) => a.evaluate(values)? * b.evaluate(values)?,
        })
    }

    /// Substitute slot values, returning a constant expression.
    pub fn bind(&self, values: &[f64]) -> IrResult<Self> {
        self.evaluate(values).map(ParameterExpression::Constant)
    }

    /// Get all slot indices referenced by this expression.
    pub fn slots(&self) -> BTreeSet<usize> {
        let mut set = BTreeSet::new();
        self.collect_slots(&mut set);
        set
    }

    fn collect_slots(&self, set: &mut BTreeSet<usize>) {
        match self {
            ParameterExpression::Constant(_) | ParameterExpression::Pi => {}
            ParameterExpression::Slot(i) => {
                set.insert(*i);
            }
            ParameterExpression::Mul(a, b) => {
                a.collect_slots(set);
                b.collect_slots(set);
            }
        }
    }

    /// The highest slot index referenced, if any.
    pub fn max_slot(&self) -> Option<usize> {
        self.slots().last().copied()
    }

    /// Move every slot reference up by `offset`.
    ///
    /// Used when a segment's local slots are appended to a larger vector.
    #[must_use]
    pub fn shift(&self, offset: usize) -> Self {
        match self {
            ParameterExpression::Slot(i) => ParameterExpression::Slot(i + offset),
            ParameterExpression::Constant(_) | ParameterExpression::Pi => self.clone(),
            ParameterExpression::Mul(a, b) => {
                ParameterExpression::Mul(Box::new(a.shift(offset)), Box::new(b.shift(offset)))
            }
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Slot(i) => write!(f, "p[{i}]"),
            ParameterExpression::Pi => write!(f, "π"),
            ParameterExpression::Mul(a, b) => write!(f, "({a} * {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParameterExpression::Mul(Box::new(self), Box::new(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let p = ParameterExpression::constant(1.5);
        assert!(!p.is_symbolic());
        assert_eq!(p.as_f64(), Some(1.5));
        assert!(p.slots().is_empty());
    }

    #[test]
    fn test_slot() {
        let p = ParameterExpression::slot(2);
        assert!(p.is_symbolic());
        assert_eq!(p.as_f64(), None);
        assert_eq!(p.max_slot(), Some(2));
    }

    #[test]
    fn test_scaled_slot_evaluates() {
        let p = ParameterExpression::pi() * ParameterExpression::slot(1);
        let v = p.evaluate(&[0.0, 0.5]).unwrap();
        assert!((v - PI / 2.0).abs() < 1e-12);
        assert_eq!(p.bind(&[0.0, 0.5]).unwrap().as_f64(), Some(v));
    }

    #[test]
    fn test_missing_slot_value() {
        let p = ParameterExpression::slot(3);
        assert!(matches!(
            p.evaluate(&[1.0]),
            Err(IrError::UnknownParameter {
                slot: 3,
                allocated: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_shift() {
        let p = ParameterExpression::constant(2.0)
            * ParameterExpression::slot(0)
            * ParameterExpression::slot(4);
        let shifted = p.shift(10);
        assert_eq!(shifted.slots().into_iter().collect::<Vec<_>>(), vec![10, 14]);
        assert_eq!(ParameterExpression::Pi.shift(3), ParameterExpression::Pi);
    }

    #[test]
    fn test_display() {
        let p = ParameterExpression::pi() * ParameterExpression::slot(0);
        assert_eq!(format!("{p}"), "(π * p[0])");
    }
}
