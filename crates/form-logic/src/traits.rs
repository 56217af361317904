// crates/form-logic/src/traits.rs
// ============================================================================
// Module: Requirement Traits
// Description: Evaluation and tracing contracts for requirement leaves.
// Purpose: Let domains plug predicate semantics into the universal algebra.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A predicate evaluates against a domain-specific reader (a borrowed view of
//! whatever state the domain owns). Traces observe every leaf outcome so
//! callers can report which predicates held and which did not.

// ============================================================================
// SECTION: Predicate Trait
// ============================================================================

/// Domain hook for evaluating requirement leaves.
pub trait PredicateEval {
    /// Borrowed view of domain state the predicate reads from.
    type Reader<'a>;

    /// Returns `true` when the predicate holds for the reader.
    fn eval(&self, reader: &Self::Reader<'_>) -> bool;
}

// ============================================================================
// SECTION: Trace Trait
// ============================================================================

/// Observer invoked once per leaf during traced evaluation.
pub trait RequirementTrace<P> {
    /// Records the outcome of a single predicate.
    fn on_predicate_evaluated(&mut self, predicate: &P, result: bool);
}

/// Trace that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl<P> RequirementTrace<P> for NoopTrace {
    fn on_predicate_evaluated(&mut self, _predicate: &P, _result: bool) {}
}

/// Trace that keeps the unsatisfied predicates in evaluation order.
///
/// # Invariants
/// - Each predicate appears at most once, even when it occurs in several
///   branches of the tree.
#[derive(Debug, Clone)]
pub struct UnsatisfiedTrace<P> {
    /// Predicates that evaluated to `false`.
    unsatisfied: Vec<P>,
}

impl<P> Default for UnsatisfiedTrace<P> {
    fn default() -> Self {
        Self {
            unsatisfied: Vec::new(),
        }
    }
}

impl<P> UnsatisfiedTrace<P> {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unsatisfied predicates.
    #[must_use]
    pub fn unsatisfied(&self) -> &[P] {
        &self.unsatisfied
    }

    /// Consumes the trace, returning the unsatisfied predicates.
    #[must_use]
    pub fn into_unsatisfied(self) -> Vec<P> {
        self.unsatisfied
    }
}

impl<P: Clone + PartialEq> RequirementTrace<P> for UnsatisfiedTrace<P> {
    fn on_predicate_evaluated(&mut self, predicate: &P, result: bool) {
        if !result && !self.unsatisfied.contains(predicate) {
            self.unsatisfied.push(predicate.clone());
        }
    }
}
