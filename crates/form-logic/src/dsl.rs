// crates/form-logic/src/dsl.rs
// ============================================================================
// Module: Requirement Expression Parser
// Description: Compact text syntax for requirement trees.
// Purpose: Let configuration files express field rules such as
//          `all(first_name, last_name)` or `phone || email`.
// Dependencies: crate::requirement, crate::validation
// ============================================================================

//! ## Overview
//! Expressions combine predicate names with boolean operators:
//!
//! - infix `a && b`, `a || b`, prefix `!a` (also `and`, `or`, `not`)
//! - calls `all(...)`, `any(...)`, `not(x)`, `at_least(n, ...)`
//! - parentheses for grouping
//!
//! Names are resolved through a [`PredicateResolver`]; unknown names are an
//! error. Parsed trees pass through
//! [`StructureValidator`](crate::validation::StructureValidator) before they
//! are returned.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use form_logic::Requirement;
//! use form_logic::parse_requirement;
//!
//! let mut names = BTreeMap::new();
//! names.insert("phone".to_string(), "phone");
//! names.insert("email".to_string(), "email");
//!
//! let parsed = parse_requirement("any(phone, email)", &names).ok();
//! assert_eq!(
//!     parsed,
//!     Some(Requirement::or(vec![
//!         Requirement::predicate("phone"),
//!         Requirement::predicate("email"),
//!     ]))
//! );
//! ```

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

use crate::requirement::Requirement;
use crate::validation::StructureValidator;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum expression length in bytes.
const MAX_EXPRESSION_BYTES: usize = 16 * 1024;
/// Maximum parenthesis / call nesting.
const MAX_NESTING: usize = 16;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Errors raised while parsing an expression.
///
/// # Invariants
/// - Positions are byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DslError {
    /// Input was empty or whitespace.
    EmptyInput,
    /// Input exceeded the expression size limit.
    InputTooLarge {
        /// Allowed bytes.
        max_bytes: usize,
        /// Actual bytes.
        actual_bytes: usize,
    },
    /// Nesting exceeded the depth limit.
    NestingTooDeep {
        /// Byte offset.
        position: usize,
    },
    /// A token appeared where it is not allowed.
    UnexpectedToken {
        /// What the parser wanted.
        expected: &'static str,
        /// What it saw.
        found: String,
        /// Byte offset.
        position: usize,
    },
    /// A name did not resolve to a predicate.
    UnknownPredicate {
        /// Unresolved name.
        name: String,
        /// Byte offset.
        position: usize,
    },
    /// A call used an unknown function name.
    UnknownFunction {
        /// Function name.
        name: String,
        /// Byte offset.
        position: usize,
    },
    /// A count literal did not fit in `u8`.
    InvalidNumber {
        /// Raw literal.
        raw: String,
        /// Byte offset.
        position: usize,
    },
    /// Parsed tree failed structural validation.
    Validation(String),
}

impl fmt::Display for DslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "expression is empty"),
            Self::InputTooLarge {
                max_bytes,
                actual_bytes,
            } => write!(f, "expression exceeds size limit: {actual_bytes} bytes (max {max_bytes})"),
            Self::NestingTooDeep {
                position,
            } => write!(f, "expression nesting exceeds {MAX_NESTING} at {position}"),
            Self::UnexpectedToken {
                expected,
                found,
                position,
            } => write!(f, "unexpected `{found}` at {position}, expected {expected}"),
            Self::UnknownPredicate {
                name,
                position,
            } => write!(f, "unknown name `{name}` at {position}"),
            Self::UnknownFunction {
                name,
                position,
            } => write!(f, "unknown function `{name}` at {position}"),
            Self::InvalidNumber {
                raw,
                position,
            } => write!(f, "invalid count `{raw}` at {position}"),
            Self::Validation(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for DslError {}

/// Maps names in an expression to predicate values.
pub trait PredicateResolver<P> {
    /// Returns the predicate for `name`, or `None` when unknown.
    fn resolve(&self, name: &str) -> Option<P>;
}

impl<P: Clone, S: BuildHasher> PredicateResolver<P> for HashMap<String, P, S> {
    fn resolve(&self, name: &str) -> Option<P> {
        self.get(name).cloned()
    }
}

impl<P: Clone> PredicateResolver<P> for BTreeMap<String, P> {
    fn resolve(&self, name: &str) -> Option<P> {
        self.get(name).cloned()
    }
}

impl<P, F> PredicateResolver<P> for F
where
    F: Fn(&str) -> Option<P>,
{
    fn resolve(&self, name: &str) -> Option<P> {
        self(name)
    }
}

/// Parses and validates an expression.
///
/// # Errors
///
/// Returns [`DslError`] for syntax errors, unresolved names, bad counts,
/// or structural validation failures.
pub fn parse_requirement<P, R>(input: &str, resolver: &R) -> Result<Requirement<P>, DslError>
where
    R: PredicateResolver<P>,
{
    if input.len() > MAX_EXPRESSION_BYTES {
        return Err(DslError::InputTooLarge {
            max_bytes: MAX_EXPRESSION_BYTES,
            actual_bytes: input.len(),
        });
    }
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        index: 0,
        depth: 0,
        resolver,
        _marker: std::marker::PhantomData,
    };
    let requirement = parser.expression()?;
    parser.finish()?;
    StructureValidator::default()
        .validate(&requirement)
        .map_err(|err| DslError::Validation(err.to_string()))?;
    Ok(requirement)
}

// ============================================================================
// SECTION: Tokens
// ============================================================================

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind<'a> {
    /// Name.
    Name(&'a str),
    /// Count literal.
    Count(&'a str),
    /// `&&` or `and`.
    And,
    /// `||` or `or`.
    Or,
    /// `!` or `not` used as prefix.
    Bang,
    /// `(`.
    Open,
    /// `)`.
    Close,
    /// `,`.
    Comma,
    /// End of input.
    End,
}

impl fmt::Display for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(text) | Self::Count(text) => f.write_str(text),
            Self::And => f.write_str("&&"),
            Self::Or => f.write_str("||"),
            Self::Bang => f.write_str("!"),
            Self::Open => f.write_str("("),
            Self::Close => f.write_str(")"),
            Self::Comma => f.write_str(","),
            Self::End => f.write_str("end of input"),
        }
    }
}

/// Token with its byte offset.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    /// Token kind.
    kind: Kind<'a>,
    /// Byte offset.
    position: usize,
}

/// Splits the input into tokens.
fn tokenize(input: &str) -> Result<Vec<Token<'_>>, DslError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut offset = 0;

    while let Some(&byte) = bytes.get(offset) {
        let start = offset;
        let kind = match byte {
            b' ' | b'\t' | b'\r' | b'\n' => {
                offset += 1;
                continue;
            }
            b'(' => Kind::Open,
            b')' => Kind::Close,
            b',' => Kind::Comma,
            b'!' => Kind::Bang,
            b'&' | b'|' => {
                if bytes.get(offset + 1) != Some(&byte) {
                    return Err(DslError::UnexpectedToken {
                        expected: if byte == b'&' { "&&" } else { "||" },
                        found: char::from(byte).to_string(),
                        position: offset,
                    });
                }
                offset += 1;
                if byte == b'&' { Kind::And } else { Kind::Or }
            }
            b'0' ..= b'9' => {
                while bytes.get(offset + 1).is_some_and(u8::is_ascii_digit) {
                    offset += 1;
                }
                Kind::Count(&input[start ..= offset])
            }
            b'a' ..= b'z' | b'A' ..= b'Z' | b'_' => {
                while bytes
                    .get(offset + 1)
                    .is_some_and(|next| next.is_ascii_alphanumeric() || *next == b'_')
                {
                    offset += 1;
                }
                match &input[start ..= offset] {
                    "and" => Kind::And,
                    "or" => Kind::Or,
                    "not" if bytes.get(offset + 1) != Some(&b'(') => Kind::Bang,
                    name => Kind::Name(name),
                }
            }
            other => {
                return Err(DslError::UnexpectedToken {
                    expected: "name, operator, or parenthesis",
                    found: char::from(other).to_string(),
                    position: offset,
                });
            }
        };
        tokens.push(Token {
            kind,
            position: start,
        });
        offset += 1;
    }

    if tokens.is_empty() {
        return Err(DslError::EmptyInput);
    }
    tokens.push(Token {
        kind: Kind::End,
        position: input.len(),
    });
    Ok(tokens)
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser; `||` binds loosest, then `&&`, then `!`.
struct Parser<'input, 'resolver, P, R> {
    /// Token stream ending with [`Kind::End`].
    tokens: Vec<Token<'input>>,
    /// Current token index.
    index: usize,
    /// Current nesting depth.
    depth: usize,
    /// Name resolver.
    resolver: &'resolver R,
    /// Predicate type marker.
    _marker: std::marker::PhantomData<P>,
}

impl<'input, P, R> Parser<'input, '_, P, R>
where
    R: PredicateResolver<P>,
{
    /// Parses an `||` chain.
    fn expression(&mut self) -> Result<Requirement<P>, DslError> {
        let mut parts = vec![self.conjunction()?];
        while self.eat(Kind::Or) {
            parts.push(self.conjunction()?);
        }
        Ok(collapse(parts, Requirement::or))
    }

    /// Parses an `&&` chain.
    fn conjunction(&mut self) -> Result<Requirement<P>, DslError> {
        let mut parts = vec![self.unary()?];
        while self.eat(Kind::And) {
            parts.push(self.unary()?);
        }
        Ok(collapse(parts, Requirement::and))
    }

    /// Parses prefix negation.
    fn unary(&mut self) -> Result<Requirement<P>, DslError> {
        let token = self.peek();
        if self.eat(Kind::Bang) {
            return self.nested(token.position, |parser| parser.unary().map(Requirement::negate));
        }
        self.primary()
    }

    /// Parses a name, call, or parenthesized expression.
    fn primary(&mut self) -> Result<Requirement<P>, DslError> {
        let token = self.peek();
        match token.kind {
            Kind::Name(name) => {
                self.index += 1;
                if self.eat(Kind::Open) {
                    self.nested(token.position, |parser| parser.call(name, token.position))
                } else {
                    self.resolver.resolve(name).map(Requirement::predicate).ok_or_else(|| {
                        DslError::UnknownPredicate {
                            name: name.to_string(),
                            position: token.position,
                        }
                    })
                }
            }
            Kind::Open => {
                self.index += 1;
                self.nested(token.position, |parser| {
                    let inner = parser.expression()?;
                    parser.expect(Kind::Close, "`)`")?;
                    Ok(inner)
                })
            }
            _ => Err(self.unexpected("name or `(`")),
        }
    }

    /// Parses the arguments of a call whose `(` has been consumed.
    fn call(&mut self, name: &str, position: usize) -> Result<Requirement<P>, DslError> {
        match name {
            "all" => Ok(Requirement::and(self.arguments()?)),
            "any" => Ok(Requirement::or(self.arguments()?)),
            "not" => {
                let mut args = self.arguments()?;
                match (args.pop(), args.is_empty()) {
                    (Some(inner), true) => Ok(Requirement::negate(inner)),
                    _ => Err(DslError::UnexpectedToken {
                        expected: "exactly one argument to `not(...)`",
                        found: "argument list".to_string(),
                        position,
                    }),
                }
            }
            "at_least" | "require_group" => {
                let min = self.count()?;
                self.expect(Kind::Comma, "`,` after the count")?;
                Ok(Requirement::require_group(min, self.arguments()?))
            }
            _ => Err(DslError::UnknownFunction {
                name: name.to_string(),
                position,
            }),
        }
    }

    /// Parses `expr, expr, ...)`; an immediate `)` yields no arguments.
    fn arguments(&mut self) -> Result<Vec<Requirement<P>>, DslError> {
        let mut args = Vec::new();
        if self.eat(Kind::Close) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if !self.eat(Kind::Comma) {
                break;
            }
        }
        self.expect(Kind::Close, "`,` or `)`")?;
        Ok(args)
    }

    /// Parses a `u8` count literal.
    fn count(&mut self) -> Result<u8, DslError> {
        let token = self.peek();
        let Kind::Count(raw) = token.kind else {
            return Err(self.unexpected("count"));
        };
        self.index += 1;
        raw.parse().map_err(|_| DslError::InvalidNumber {
            raw: raw.to_string(),
            position: token.position,
        })
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, DslError>,
    ) -> Result<T, DslError> {
        if self.depth >= MAX_NESTING {
            return Err(DslError::NestingTooDeep {
                position,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Requires the end of input.
    fn finish(&self) -> Result<(), DslError> {
        if self.peek().kind == Kind::End { Ok(()) } else { Err(self.unexpected("end of input")) }
    }

    /// Consumes `kind` or fails.
    fn expect(&mut self, kind: Kind<'_>, expected: &'static str) -> Result<(), DslError> {
        if self.eat(kind) { Ok(()) } else { Err(self.unexpected(expected)) }
    }

    /// Consumes the current token when it has the same kind as `kind`.
    fn eat(&mut self, kind: Kind<'_>) -> bool {
        if std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(&kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Returns the current token; the stream always ends with `End`.
    fn peek(&self) -> Token<'input> {
        self.tokens.get(self.index).or_else(|| self.tokens.last()).copied().unwrap_or(Token {
            kind: Kind::End,
            position: 0,
        })
    }

    /// Builds an error for the current token.
    fn unexpected(&self, expected: &'static str) -> DslError {
        let token = self.peek();
        DslError::UnexpectedToken {
            expected,
            found: token.kind.to_string(),
            position: token.position,
        }
    }
}

/// Returns the single part unchanged, or joins several with `join`.
fn collapse<P>(
    mut parts: Vec<Requirement<P>>,
    join: fn(Vec<Requirement<P>>) -> Requirement<P>,
) -> Requirement<P> {
    if parts.len() == 1
        && let Some(only) = parts.pop()
    {
        return only;
    }
    join(parts)
}
