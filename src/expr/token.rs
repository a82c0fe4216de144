//! Token model for the expression pipeline.
//!
//! Tokens are the atoms shared by the parser and the evaluator. They form a
//! closed set; only [`Token::Literal`] carries a payload. Every token belongs
//! to exactly one [`TokenClass`], which drives the parser's pair validation
//! and the shunting-yard placement rules.

use std::fmt;

/// A single expression token.
///
/// The postfix stream produced by the parser contains only Value, BinaryOp,
/// UnaryOp and Function tokens terminated by [`Token::End`]; brackets, commas
/// and the Start sentinel exist only during parsing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
  // Values
  Literal(f32),
  Pi,
  E,
  X,
  Y,
  Z,
  // Binary operators
  Add,
  Sub,
  Mul,
  Div,
  FloorDiv,
  Mod,
  Pow,
  // Unary operators
  Neg,
  // Functions
  Abs,
  Min,
  Max,
  Floor,
  Sin,
  Cos,
  Tan,
  ASin,
  ACos,
  ATan,
  ATan2,
  Ln,
  Log,
  Sqrt,
  NRoot,
  Noise,
  // Brackets
  LBracket,
  RBracket,
  // Delimiter
  Comma,
  // Stream sentinels
  Start,
  End,
}

/// Grammar class of a token, used for pair validation and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenClass {
  Value,
  BinaryOp,
  UnaryOp,
  Function,
  LBracket,
  RBracket,
  Delimiter,
  Start,
  End,
}

impl fmt::Display for TokenClass {
  /// Article-prefixed class names, as they appear in parser diagnostics.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      TokenClass::Value => "a value",
      TokenClass::BinaryOp => "an operator",
      TokenClass::UnaryOp => "an unary operator",
      TokenClass::Function => "a function name",
      TokenClass::LBracket => "a left bracket",
      TokenClass::RBracket => "a right bracket",
      TokenClass::Delimiter => "a comma",
      TokenClass::Start | TokenClass::End => "an invalid token",
    };
    f.write_str(name)
  }
}

/// Operator associativity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
  Left,
  Right,
}

impl Token {
  pub fn class(self) -> TokenClass {
    match self {
      Token::Literal(_) | Token::Pi | Token::E | Token::X | Token::Y | Token::Z => {
        TokenClass::Value
      }
      Token::Add
      | Token::Sub
      | Token::Mul
      | Token::Div
      | Token::FloorDiv
      | Token::Mod
      | Token::Pow => TokenClass::BinaryOp,
      Token::Neg => TokenClass::UnaryOp,
      Token::Abs
      | Token::Min
      | Token::Max
      | Token::Floor
      | Token::Sin
      | Token::Cos
      | Token::Tan
      | Token::ASin
      | Token::ACos
      | Token::ATan
      | Token::ATan2
      | Token::Ln
      | Token::Log
      | Token::Sqrt
      | Token::NRoot
      | Token::Noise => TokenClass::Function,
      Token::LBracket => TokenClass::LBracket,
      Token::RBracket => TokenClass::RBracket,
      Token::Comma => TokenClass::Delimiter,
      Token::Start => TokenClass::Start,
      Token::End => TokenClass::End,
    }
  }

  /// Binding strength for the shunting-yard pass.
  ///
  /// Negation sits at the same level as exponentiation (and shares its right
  /// associativity) so that `-x^-y` parses as `-(x^(-y))`.
  pub fn precedence(self) -> i32 {
    match self {
      Token::Add | Token::Sub => 1,
      Token::Mul | Token::Div | Token::FloorDiv | Token::Mod => 2,
      Token::Pow | Token::Neg => 3,
      _ => -1,
    }
  }

  pub fn assoc(self) -> Assoc {
    match self {
      Token::Pow | Token::Neg => Assoc::Right,
      _ => Assoc::Left,
    }
  }

  /// Net change in evaluation stack depth when this token executes.
  pub fn stack_effect(self) -> i32 {
    match self.class() {
      TokenClass::Value => 1,
      TokenClass::BinaryOp => -1,
      TokenClass::UnaryOp => 0,
      _ => match self {
        // Two-argument functions
        Token::Min | Token::Max | Token::ATan2 | Token::Log | Token::NRoot => -1,
        // Three-argument function
        Token::Noise => -2,
        _ => 0,
      },
    }
  }

  /// True when this token may directly precede a value, which is where a
  /// literal is attempted and where `-` reads as negation.
  pub fn starts_value(self) -> bool {
    matches!(
      self.class(),
      TokenClass::BinaryOp
        | TokenClass::UnaryOp
        | TokenClass::Start
        | TokenClass::LBracket
        | TokenClass::Delimiter
    )
  }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;
