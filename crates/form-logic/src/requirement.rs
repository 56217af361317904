// crates/form-logic/src/requirement.rs
// ============================================================================
// Module: Requirement Core Types
// Description: Boolean algebra over typed predicates.
// Purpose: Define `Requirement` with short-circuit, traced, and diagnostic
//          evaluation paths.
// Dependencies: serde::{Deserialize, Serialize}, smallvec::SmallVec
// ============================================================================

//! ## Overview
//! A [`Requirement`] is a tree of `and`, `or`, `not`, and `at_least` nodes
//! over domain predicates. The same tree supports three evaluation paths:
//! a short-circuiting [`Requirement::eval`], a full-walk
//! [`Requirement::eval_with_trace`] that reports every leaf, and
//! [`Requirement::check`] which returns the first failing branch as a
//! [`RequirementError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

use crate::error::RequirementError;
use crate::error::RequirementResult;
use crate::traits::PredicateEval;
use crate::traits::RequirementTrace;

// ============================================================================
// SECTION: Requirement Definition
// ============================================================================

/// Requirement tree with domain-specific leaves.
///
/// # Invariants
/// - Empty `And` is satisfied; empty `Or` is unsatisfiable.
/// - `RequireGroup` with `min == 0` is satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement<P> {
    /// Every child must hold.
    And(SmallVec<[Box<Self>; 4]>),

    /// At least one child must hold.
    Or(SmallVec<[Box<Self>; 4]>),

    /// The child must not hold.
    Not(Box<Self>),

    /// At least `min` children must hold.
    RequireGroup {
        /// Minimum number of children that must hold.
        min: u8,
        /// Candidate children.
        reqs: SmallVec<[Box<Self>; 8]>,
    },

    /// Domain-specific leaf.
    Predicate(P),
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl<P> Requirement<P> {
    /// Builds an `And` node.
    #[must_use]
    pub fn and(requirements: Vec<Self>) -> Self {
        Self::And(requirements.into_iter().map(Box::new).collect())
    }

    /// Builds an `Or` node.
    #[must_use]
    pub fn or(requirements: Vec<Self>) -> Self {
        Self::Or(requirements.into_iter().map(Box::new).collect())
    }

    /// Builds a `Not` node.
    #[must_use]
    pub fn negate(requirement: Self) -> Self {
        Self::Not(Box::new(requirement))
    }

    /// Builds a `RequireGroup` node.
    #[must_use]
    pub fn require_group(min: u8, requirements: Vec<Self>) -> Self {
        Self::RequireGroup {
            min,
            reqs: requirements.into_iter().map(Box::new).collect(),
        }
    }

    /// Builds a leaf.
    #[must_use]
    pub const fn predicate(predicate: P) -> Self {
        Self::Predicate(predicate)
    }

    /// Returns the depth of the tree; a bare leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Predicate(_) => 0,
            Self::Not(inner) => inner.depth() + 1,
            Self::And(reqs) | Self::Or(reqs) => {
                reqs.iter().map(|req| req.depth()).max().unwrap_or(0) + 1
            }
            Self::RequireGroup {
                reqs, ..
            } => reqs.iter().map(|req| req.depth()).max().unwrap_or(0) + 1,
        }
    }

    /// Returns each distinct leaf in first-seen order.
    #[must_use]
    pub fn predicates(&self) -> Vec<&P>
    where
        P: PartialEq,
    {
        let mut out = Vec::new();
        self.collect_predicates(&mut out);
        out
    }

    /// Depth-first leaf collection helper.
    fn collect_predicates<'a>(&'a self, out: &mut Vec<&'a P>)
    where
        P: PartialEq,
    {
        match self {
            Self::Predicate(predicate) => {
                if !out.contains(&predicate) {
                    out.push(predicate);
                }
            }
            Self::Not(inner) => inner.collect_predicates(out),
            Self::And(reqs) | Self::Or(reqs) => {
                for req in reqs {
                    req.collect_predicates(out);
                }
            }
            Self::RequireGroup {
                reqs, ..
            } => {
                for req in reqs {
                    req.collect_predicates(out);
                }
            }
        }
    }

    /// Returns a new tree with every leaf mapped through `f`.
    #[must_use]
    pub fn map<Q, F>(&self, f: &F) -> Requirement<Q>
    where
        F: Fn(&P) -> Q,
    {
        match self {
            Self::Predicate(predicate) => Requirement::Predicate(f(predicate)),
            Self::Not(inner) => Requirement::Not(Box::new(inner.map(f))),
            Self::And(reqs) => Requirement::And(reqs.iter().map(|req| Box::new(req.map(f))).collect()),
            Self::Or(reqs) => Requirement::Or(reqs.iter().map(|req| Box::new(req.map(f))).collect()),
            Self::RequireGroup {
                min,
                reqs,
            } => Requirement::RequireGroup {
                min: *min,
                reqs: reqs.iter().map(|req| Box::new(req.map(f))).collect(),
            },
        }
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl<P: PredicateEval> Requirement<P> {
    /// Evaluates the tree with short-circuiting.
    pub fn eval(&self, reader: &P::Reader<'_>) -> bool {
        match self {
            Self::Predicate(predicate) => predicate.eval(reader),
            Self::Not(requirement) => !requirement.eval(reader),
            Self::And(requirements) => requirements.iter().all(|req| req.eval(reader)),
            Self::Or(requirements) => requirements.iter().any(|req| req.eval(reader)),
            Self::RequireGroup {
                min,
                reqs,
            } => {
                let needed = usize::from(*min);
                let mut satisfied = 0usize;
                let mut remaining = reqs.len();
                if needed == 0 {
                    return true;
                }
                for req in reqs {
                    if req.eval(reader) {
                        satisfied += 1;
                        if satisfied >= needed {
                            return true;
                        }
                    }
                    remaining = remaining.saturating_sub(1);
                    if satisfied + remaining < needed {
                        return false;
                    }
                }
                false
            }
        }
    }

    /// Evaluates every leaf, reporting each outcome to `trace`.
    ///
    /// Unlike [`Requirement::eval`] this never short-circuits, so the trace
    /// sees the complete picture of which leaves held.
    pub fn eval_with_trace<T>(&self, reader: &P::Reader<'_>, trace: &mut T) -> bool
    where
        T: RequirementTrace<P>,
    {
        match self {
            Self::Predicate(predicate) => {
                let result = predicate.eval(reader);
                trace.on_predicate_evaluated(predicate, result);
                result
            }
            Self::Not(requirement) => !requirement.eval_with_trace(reader, trace),
            Self::And(requirements) => requirements
                .iter()
                .map(|req| req.eval_with_trace(reader, trace))
                .fold(true, |acc, result| acc && result),
            Self::Or(requirements) => requirements
                .iter()
                .map(|req| req.eval_with_trace(reader, trace))
                .fold(false, |acc, result| acc || result),
            Self::RequireGroup {
                min,
                reqs,
            } => {
                let satisfied =
                    reqs.iter().filter(|req| req.eval_with_trace(reader, trace)).count();
                satisfied >= usize::from(*min)
            }
        }
    }
}

impl<P: PredicateEval + PartialEq> Requirement<P> {
    /// Returns the leaves that keep the tree from holding, each once.
    ///
    /// Only failing branches are descended. A satisfied `Or` or group adds
    /// nothing, and a failing `Not` adds nothing because its child holds.
    pub fn unmet_predicates(&self, reader: &P::Reader<'_>) -> Vec<&P> {
        let mut unmet = Vec::new();
        self.collect_unmet(reader, &mut unmet);
        unmet
    }

    /// Appends unmet leaves of a failing branch to `unmet`.
    fn collect_unmet<'s>(&'s self, reader: &P::Reader<'_>, unmet: &mut Vec<&'s P>) {
        if self.eval(reader) {
            return;
        }
        match self {
            Self::Predicate(predicate) => {
                if !unmet.contains(&predicate) {
                    unmet.push(predicate);
                }
            }
            Self::Not(_) => {}
            Self::And(requirements) | Self::Or(requirements) => {
                for req in requirements {
                    req.collect_unmet(reader, unmet);
                }
            }
            Self::RequireGroup {
                reqs, ..
            } => {
                for req in reqs {
                    req.collect_unmet(reader, unmet);
                }
            }
        }
    }
}

impl<P: PredicateEval + fmt::Display> Requirement<P> {
    /// Checks the tree, returning the first failing branch.
    ///
    /// # Errors
    ///
    /// Returns [`RequirementError`] describing the first branch that did not
    /// hold, in tree order.
    pub fn check(&self, reader: &P::Reader<'_>) -> RequirementResult {
        match self {
            Self::Predicate(predicate) => {
                if predicate.eval(reader) {
                    Ok(())
                } else {
                    Err(RequirementError::predicate_failed(predicate.to_string()))
                }
            }
            Self::Not(requirement) => {
                if requirement.eval(reader) {
                    Err(RequirementError::NotFailed)
                } else {
                    Ok(())
                }
            }
            Self::And(requirements) => {
                for req in requirements {
                    req.check(reader)?;
                }
                Ok(())
            }
            Self::Or(requirements) => {
                if requirements.iter().any(|req| req.eval(reader)) {
                    return Ok(());
                }
                let mut alternatives = Vec::new();
                for req in requirements {
                    alternatives.extend(req.leaf_labels());
                }
                Err(RequirementError::OrAllFailed {
                    alternatives,
                })
            }
            Self::RequireGroup {
                min,
                reqs,
            } => {
                let passed = reqs.iter().filter(|req| req.eval(reader)).count();
                let required = usize::from(*min);
                if passed >= required {
                    Ok(())
                } else {
                    Err(RequirementError::GroupRequirementFailed {
                        passed,
                        required,
                    })
                }
            }
        }
    }

    /// Renders every leaf for diagnostics.
    fn leaf_labels(&self) -> Vec<String> {
        match self {
            Self::Predicate(predicate) => vec![predicate.to_string()],
            Self::Not(inner) => inner.leaf_labels().into_iter().map(|l| format!("not {l}")).collect(),
            Self::And(reqs) | Self::Or(reqs) => reqs.iter().flat_map(|req| req.leaf_labels()).collect(),
            Self::RequireGroup {
                reqs, ..
            } => reqs.iter().flat_map(|req| req.leaf_labels()).collect(),
        }
    }
}
