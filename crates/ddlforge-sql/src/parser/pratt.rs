//! Pratt expression parser for operator precedence.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the PostgreSQL `::` cast, tighter than any infix operator.
pub const CAST_BINDING_POWER: u8 = 17;

/// Returns the prefix binding power for a unary operator token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        // Unary minus
        TokenKind::Minus => Some(15),
        // NOT keyword
        TokenKind::Keyword(Keyword::Not) => Some(3),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
/// - Right associative: left_bp > right_bp
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        // Logical AND
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        // Comparison operators
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => Some((5, 6)),

        // IS, IN, BETWEEN, LIKE
        TokenKind::Keyword(Keyword::Is | Keyword::In | Keyword::Between | Keyword::Like) => {
            Some((5, 6))
        }

        // Additive (string concat has same precedence as addition)
        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((11, 12)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((13, 14)),

        _ => None,
    }
}

/// Returns the postfix binding power for a token.
///
/// Returns `None` if the token is not a postfix operator.
#[must_use]
pub const fn postfix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::DoubleColon => Some(CAST_BINDING_POWER),
        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::Keyword(Keyword::Like) => Some(BinaryOp::Like),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        _ => None,
    }
}
