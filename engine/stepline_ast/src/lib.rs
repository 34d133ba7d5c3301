//! Stepline AST - syntax tree types for the Stepline interpreter.
//!
//! The interpreter does not parse source text itself: an external
//! acorn-style parser produces a node tree, and this crate defines the
//! typed, read-only shape of that tree:
//!
//! - `Span` for `start`/`end` character offsets
//! - `BinaryOp`/`UnaryOp`/`DeclKind` operator and keyword enums
//! - `Program`, `Stmt`, `Expr` and the per-type node structs
//!
//! Everything deserializes from the parser's JSON via serde.

mod node;
mod ops;
mod span;

pub use node::{
    BinaryExpression, Expr, ExpressionStatement, Identifier, Literal, LiteralValue,
    ObjectExpression, Placeholder, Program, Property, Stmt, UnaryExpression, VariableDeclaration,
    VariableDeclarator,
};
pub use ops::{BinaryOp, DeclKind, UnaryOp};
pub use span::{Span, Spanned};
