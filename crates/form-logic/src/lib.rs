// crates/form-logic/src/lib.rs
// ============================================================================
// Module: Form Logic Root
// Description: Public API surface for the requirement algebra.
// Purpose: Wire together requirement trees, evaluation traits, diagnostics,
//          structural validation, and the expression DSL.
// Dependencies: crate::{dsl, error, requirement, traits, validation}
// ============================================================================

//! ## Overview
//! `form-logic` evaluates boolean requirement trees whose leaves are
//! domain-specific predicates. Forms use it to express "all of these fields"
//! and "any one of these fields" rules without hard-coding them into the
//! state engine.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod dsl;
pub mod error;
pub mod requirement;
pub mod traits;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dsl::DslError;
pub use dsl::PredicateResolver;
pub use dsl::parse_requirement;
pub use error::RequirementError;
pub use error::RequirementResult;
pub use requirement::Requirement;
pub use traits::NoopTrace;
pub use traits::PredicateEval;
pub use traits::RequirementTrace;
pub use traits::UnsatisfiedTrace;
pub use validation::StructureError;
pub use validation::StructureLimits;
pub use validation::StructureValidator;

// ============================================================================
// SECTION: Convenience Constructors
// ============================================================================

/// Free-function constructors mirroring the DSL vocabulary.
pub mod convenience {
    use super::Requirement;

    /// Creates a requirement satisfied when every child is satisfied.
    #[must_use]
    pub fn all<P>(requirements: Vec<Requirement<P>>) -> Requirement<P> {
        Requirement::and(requirements)
    }

    /// Creates a requirement satisfied when any child is satisfied.
    #[must_use]
    pub fn any<P>(requirements: Vec<Requirement<P>>) -> Requirement<P> {
        Requirement::or(requirements)
    }

    /// Creates a requirement that inverts another requirement.
    #[must_use]
    pub fn not<P>(requirement: Requirement<P>) -> Requirement<P> {
        Requirement::negate(requirement)
    }

    /// Creates a requirement satisfied when at least `min` children are satisfied.
    #[must_use]
    pub fn at_least<P>(min: u8, requirements: Vec<Requirement<P>>) -> Requirement<P> {
        Requirement::require_group(min, requirements)
    }

    /// Creates a leaf requirement.
    #[must_use]
    pub const fn predicate<P>(predicate: P) -> Requirement<P> {
        Requirement::predicate(predicate)
    }
}
