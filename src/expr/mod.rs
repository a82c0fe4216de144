//! Expression pipeline: parse, validate, evaluate.
//!
//! A scalar field is described by an infix expression over `x`, `y`, `z`.
//! [`parse`] converts it to a postfix token sequence, [`Expression::validate`]
//! proves the sequence is stack-balanced, and [`Expression::evaluate`] runs it
//! on a fixed-depth float stack for a given point.
//!
//! Postfix over a tree IR keeps evaluation a tight loop over a contiguous
//! array, which matters: sampling calls the evaluator (N+1)³ times per
//! generation.

mod eval;
pub mod noise;
mod parser;
mod token;

pub use parser::parse;
pub use token::{Assoc, Token, TokenClass};

use thiserror::Error;

/// Capacity of the evaluation stack. A hard limit on expression complexity,
/// far above any normal usage; the validator rejects anything deeper.
pub const EVAL_STACK_SIZE: usize = 64;

/// Expression pipeline failure, recoverable and user-facing.
///
/// The `Display` output is the one-line diagnostic an integrator is expected
/// to show verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExprError {
  #[error("Error: Must enter an expression.")]
  EmptyExpression,
  #[error("Error: expression must not start with {0}.")]
  BadStartToken(TokenClass),
  #[error("Error: expression must not end with {0}.")]
  BadEndToken(TokenClass),
  #[error("Error: {prev} must not be followed by {curr}.")]
  BadTokenPair { prev: TokenClass, curr: TokenClass },
  #[error("Error: a function name must be followed by a left bracket.")]
  FunctionWithoutBracket,
  #[error("Error: mismatched brackets")]
  MismatchedBrackets,
  #[error("Error: invalid expression")]
  InvalidExpression,
}

/// A parsed expression in postfix form, terminated by [`Token::End`].
///
/// Immutable once produced. Obtain one from [`parse`], then run
/// [`Expression::validate`] before handing it to the evaluator or the mesh
/// generator.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
  tokens: Vec<Token>,
}

impl Expression {
  /// The postfix token stream, including the trailing End sentinel.
  pub fn tokens(&self) -> &[Token] {
    &self.tokens
  }

  /// Simulates stack depth over the postfix stream.
  ///
  /// Rejects sequences whose depth leaves `[0, EVAL_STACK_SIZE]` at any
  /// prefix, or does not end at exactly one value.
  pub fn validate(&self) -> Result<(), ExprError> {
    let mut depth: i32 = 0;
    for &token in &self.tokens {
      if matches!(token, Token::End) {
        break;
      }
      depth += token.stack_effect();
      if depth < 0 || depth > EVAL_STACK_SIZE as i32 {
        return Err(ExprError::InvalidExpression);
      }
    }
    if depth != 1 {
      return Err(ExprError::InvalidExpression);
    }
    Ok(())
  }
}
