// crates/form-logic/src/validation.rs
// ============================================================================
// Module: Requirement Structure Validation
// Description: Structural limits for authored requirement trees.
// Purpose: Reject trees that are too deep, too wide, or logically degenerate.
// Dependencies: crate::requirement, std::fmt
// ============================================================================

//! ## Overview
//! Requirement trees can come from configuration files, so they are checked
//! before use. Validation is purely structural; leaf meaning belongs to the
//! domain.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::requirement::Requirement;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural validation failures.
///
/// # Invariants
/// - None. Variants capture structured validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Tree exceeds the depth limit.
    TooDeep {
        /// Maximum supported depth.
        max_depth: usize,
        /// Depth encountered.
        actual_depth: usize,
    },
    /// A node has more children than allowed.
    TooWide {
        /// Maximum supported children per node.
        max_children: usize,
        /// Children encountered.
        actual_children: usize,
    },
    /// An `Or` node has no children and can never hold.
    EmptyOr,
    /// An `at_least` group asks for more members than it has.
    InvalidGroup {
        /// Minimum required members.
        min: u8,
        /// Members provided.
        total: usize,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooDeep {
                max_depth,
                actual_depth,
            } => write!(f, "requirement tree too deep: {actual_depth} levels (max {max_depth})"),
            Self::TooWide {
                max_children,
                actual_children,
            } => write!(
                f,
                "requirement node too wide: {actual_children} children (max {max_children})"
            ),
            Self::EmptyOr => write!(f, "empty `any` requirement can never be satisfied"),
            Self::InvalidGroup {
                min,
                total,
            } => write!(f, "invalid group requirement: min {min} exceeds total {total}"),
        }
    }
}

impl std::error::Error for StructureError {}

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Limits applied by [`StructureValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureLimits {
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Maximum children of a single node.
    pub max_children: usize,
}

impl Default for StructureLimits {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_children: 64,
        }
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Structural validator for requirement trees.
#[derive(Debug, Clone, Default)]
pub struct StructureValidator {
    /// Active limits.
    limits: StructureLimits,
}

impl StructureValidator {
    /// Creates a validator with explicit limits.
    #[must_use]
    pub const fn new(limits: StructureLimits) -> Self {
        Self {
            limits,
        }
    }

    /// Validates a requirement tree.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError`] for the first violation found.
    pub fn validate<P>(&self, requirement: &Requirement<P>) -> Result<(), StructureError> {
        self.validate_node(requirement, 0)
    }

    /// Validates one node and recurses into its children.
    fn validate_node<P>(
        &self,
        requirement: &Requirement<P>,
        depth: usize,
    ) -> Result<(), StructureError> {
        if depth > self.limits.max_depth {
            return Err(StructureError::TooDeep {
                max_depth: self.limits.max_depth,
                actual_depth: depth,
            });
        }

        match requirement {
            Requirement::Predicate(_) => Ok(()),
            Requirement::Not(inner) => self.validate_node(inner, depth + 1),
            Requirement::And(reqs) => {
                self.check_width(reqs.len())?;
                for req in reqs {
                    self.validate_node(req, depth + 1)?;
                }
                Ok(())
            }
            Requirement::Or(reqs) => {
                if reqs.is_empty() {
                    return Err(StructureError::EmptyOr);
                }
                self.check_width(reqs.len())?;
                for req in reqs {
                    self.validate_node(req, depth + 1)?;
                }
                Ok(())
            }
            Requirement::RequireGroup {
                min,
                reqs,
            } => {
                if usize::from(*min) > reqs.len() {
                    return Err(StructureError::InvalidGroup {
                        min: *min,
                        total: reqs.len(),
                    });
                }
                self.check_width(reqs.len())?;
                for req in reqs {
                    self.validate_node(req, depth + 1)?;
                }
                Ok(())
            }
        }
    }

    /// Enforces the per-node child limit.
    const fn check_width(&self, children: usize) -> Result<(), StructureError> {
        if children > self.limits.max_children {
            return Err(StructureError::TooWide {
                max_children: self.limits.max_children,
                actual_children: children,
            });
        }
        Ok(())
    }
}
