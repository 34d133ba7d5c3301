//! Node tree handed over by the external parser.
//!
//! The shape follows the standard expression/statement node layout: every
//! node carries a `type` discriminator plus integer `start`/`end` character
//! offsets, and type-specific children. The tree deserializes straight from
//! the JSON an acorn-style parser produces; unknown fields on known node
//! types are ignored.
//!
//! `Stmt` and `Expr` are closed enums, so adding a handler for one of the
//! currently unsupported constructs means replacing its placeholder variant
//! with a real node struct and covering the new arm in the evaluator —
//! the compiler points at every match that needs updating.

use serde::Deserialize;

use crate::ops::{BinaryOp, DeclKind, UnaryOp};
use crate::span::{Span, Spanned};

/// Root node of a parsed program.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Program {
    pub start: u32,
    pub end: u32,
    pub body: Vec<Stmt>,
}

/// Statement nodes.
///
/// Constructs the evaluator does not yet support still deserialize (span
/// only, children discarded) so a session fails at evaluation time with the
/// offending node's type and offsets, not at tree-loading time.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Stmt {
    VariableDeclaration(VariableDeclaration),
    ExpressionStatement(ExpressionStatement),
    IfStatement(Placeholder),
    BlockStatement(Placeholder),
    WhileStatement(Placeholder),
    ForStatement(Placeholder),
    FunctionDeclaration(Placeholder),
    ReturnStatement(Placeholder),
}

impl Stmt {
    /// The `type` discriminator string for this node.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::VariableDeclaration(_) => "VariableDeclaration",
            Self::ExpressionStatement(_) => "ExpressionStatement",
            Self::IfStatement(_) => "IfStatement",
            Self::BlockStatement(_) => "BlockStatement",
            Self::WhileStatement(_) => "WhileStatement",
            Self::ForStatement(_) => "ForStatement",
            Self::FunctionDeclaration(_) => "FunctionDeclaration",
            Self::ReturnStatement(_) => "ReturnStatement",
        }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        match self {
            Self::VariableDeclaration(n) => n.span(),
            Self::ExpressionStatement(n) => n.span(),
            Self::IfStatement(n)
            | Self::BlockStatement(n)
            | Self::WhileStatement(n)
            | Self::ForStatement(n)
            | Self::FunctionDeclaration(n)
            | Self::ReturnStatement(n) => n.span(),
        }
    }
}

/// Expression nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
    UnaryExpression(UnaryExpression),
    BinaryExpression(BinaryExpression),
    ObjectExpression(ObjectExpression),
    MemberExpression(Placeholder),
    AssignmentExpression(Placeholder),
    UpdateExpression(Placeholder),
    CallExpression(Placeholder),
    ArrayExpression(Placeholder),
    FunctionExpression(Placeholder),
}

impl Expr {
    /// The `type` discriminator string for this node.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "Literal",
            Self::Identifier(_) => "Identifier",
            Self::UnaryExpression(_) => "UnaryExpression",
            Self::BinaryExpression(_) => "BinaryExpression",
            Self::ObjectExpression(_) => "ObjectExpression",
            Self::MemberExpression(_) => "MemberExpression",
            Self::AssignmentExpression(_) => "AssignmentExpression",
            Self::UpdateExpression(_) => "UpdateExpression",
            Self::CallExpression(_) => "CallExpression",
            Self::ArrayExpression(_) => "ArrayExpression",
            Self::FunctionExpression(_) => "FunctionExpression",
        }
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Self::Literal(n) => n.span(),
            Self::Identifier(n) => n.span(),
            Self::UnaryExpression(n) => n.span(),
            Self::BinaryExpression(n) => n.span(),
            Self::ObjectExpression(n) => n.span(),
            Self::MemberExpression(n)
            | Self::AssignmentExpression(n)
            | Self::UpdateExpression(n)
            | Self::CallExpression(n)
            | Self::ArrayExpression(n)
            | Self::FunctionExpression(n) => n.span(),
        }
    }
}

/// `var`/`let`/`const` statement with one or more declarators.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclaration {
    pub start: u32,
    pub end: u32,
    pub kind: DeclKind,
    pub declarations: Vec<VariableDeclarator>,
}

/// A single `id = init` pair inside a declaration.
///
/// Destructuring patterns are not part of the supported subset, so `id`
/// is always a plain identifier.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclarator {
    pub start: u32,
    pub end: u32,
    pub id: Identifier,
    #[serde(default)]
    pub init: Option<Expr>,
}

/// A statement consisting of a single expression.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExpressionStatement {
    pub start: u32,
    pub end: u32,
    pub expression: Expr,
}

/// Literal value carried by a `Literal` node.
///
/// A missing `value` field (or JSON `null`) maps to `Undefined`.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    #[default]
    Undefined,
    Bool(bool),
    Number(f64),
    Str(String),
}

/// Literal node: `1`, `"hi"`, `true`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Literal {
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub value: LiteralValue,
}

/// Identifier node: a variable reference or object key.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Identifier {
    pub start: u32,
    pub end: u32,
    pub name: String,
}

/// Unary expression: `-x`, `!x`, `typeof x`, ...
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UnaryExpression {
    pub start: u32,
    pub end: u32,
    pub operator: UnaryOp,
    pub argument: Box<Expr>,
}

/// Binary expression: `a + b`, `a === b`, `"x" in o`, ...
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BinaryExpression {
    pub start: u32,
    pub end: u32,
    pub operator: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// Object literal: `{x: 1, "y": 2}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ObjectExpression {
    pub start: u32,
    pub end: u32,
    pub properties: Vec<Property>,
}

/// A single `key: value` entry of an object literal.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Property {
    pub start: u32,
    pub end: u32,
    pub key: Expr,
    pub value: Expr,
}

/// Span-only stand-in for node types the evaluator does not support yet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Placeholder {
    pub start: u32,
    pub end: u32,
}

macro_rules! impl_spanned {
    ($($ty:ty),+ $(,)?) => {
        $(impl Spanned for $ty {
            fn span(&self) -> Span {
                Span::new(self.start, self.end)
            }
        })+
    };
}

impl_spanned!(
    Program,
    VariableDeclaration,
    VariableDeclarator,
    ExpressionStatement,
    Literal,
    Identifier,
    UnaryExpression,
    BinaryExpression,
    ObjectExpression,
    Property,
    Placeholder,
);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserialize_variable_declaration() {
        // acorn output for `let a = 1;`, trimmed of loc/raw noise
        let tree = json!({
            "type": "Program",
            "start": 0,
            "end": 10,
            "sourceType": "script",
            "body": [{
                "type": "VariableDeclaration",
                "start": 0,
                "end": 10,
                "kind": "let",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "start": 4,
                    "end": 9,
                    "id": {"type": "Identifier", "start": 4, "end": 5, "name": "a"},
                    "init": {"type": "Literal", "start": 8, "end": 9, "value": 1, "raw": "1"}
                }]
            }]
        });
        let program: Program = serde_json::from_value(tree).unwrap();
        assert_eq!(program.body.len(), 1);
        let Stmt::VariableDeclaration(decl) = &program.body[0] else {
            panic!("expected VariableDeclaration");
        };
        assert_eq!(decl.kind, DeclKind::Let);
        assert_eq!(decl.declarations[0].id.name, "a");
        assert_eq!(
            decl.declarations[0].init,
            Some(Expr::Literal(Literal {
                start: 8,
                end: 9,
                value: LiteralValue::Number(1.0),
            }))
        );
    }

    #[test]
    fn deserialize_binary_expression() {
        let tree = json!({
            "type": "ExpressionStatement",
            "start": 0,
            "end": 6,
            "expression": {
                "type": "BinaryExpression",
                "start": 0,
                "end": 5,
                "operator": "+",
                "left": {"type": "Literal", "start": 0, "end": 1, "value": 1},
                "right": {"type": "Literal", "start": 4, "end": 5, "value": 2}
            }
        });
        let stmt: Stmt = serde_json::from_value(tree).unwrap();
        assert_eq!(stmt.kind_name(), "ExpressionStatement");
        assert_eq!(stmt.span(), Span::new(0, 6));
    }

    #[test]
    fn missing_literal_value_is_undefined() {
        let node = json!({"type": "Literal", "start": 0, "end": 9});
        let Expr::Literal(lit) = serde_json::from_value(node).unwrap() else {
            panic!("expected Literal");
        };
        assert_eq!(lit.value, LiteralValue::Undefined);
    }

    #[test]
    fn null_literal_value_is_undefined() {
        let node = json!({"type": "Literal", "start": 0, "end": 4, "value": null});
        let Expr::Literal(lit) = serde_json::from_value(node).unwrap() else {
            panic!("expected Literal");
        };
        assert_eq!(lit.value, LiteralValue::Undefined);
    }

    #[test]
    fn unsupported_statement_keeps_span_only() {
        let node = json!({
            "type": "IfStatement",
            "start": 3,
            "end": 40,
            "test": {"type": "Literal", "start": 7, "end": 11, "value": true},
            "consequent": {"type": "BlockStatement", "start": 13, "end": 40, "body": []}
        });
        let stmt: Stmt = serde_json::from_value(node).unwrap();
        assert_eq!(stmt.kind_name(), "IfStatement");
        assert_eq!(stmt.span(), Span::new(3, 40));
    }

    #[test]
    fn unknown_node_type_fails_to_deserialize() {
        let node = json!({"type": "WithStatement", "start": 0, "end": 5});
        let result: Result<Stmt, _> = serde_json::from_value(node);
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_object_expression() {
        let node = json!({
            "type": "ObjectExpression",
            "start": 1,
            "end": 7,
            "properties": [{
                "type": "Property",
                "start": 2,
                "end": 6,
                "method": false,
                "shorthand": false,
                "computed": false,
                "key": {"type": "Identifier", "start": 2, "end": 3, "name": "x"},
                "value": {"type": "Literal", "start": 5, "end": 6, "value": 1},
                "kind": "init"
            }]
        });
        let Expr::ObjectExpression(obj) = serde_json::from_value(node).unwrap() else {
            panic!("expected ObjectExpression");
        };
        assert_eq!(obj.properties.len(), 1);
        assert_eq!(obj.properties[0].span(), Span::new(2, 6));
    }
}
