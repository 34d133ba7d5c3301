//! Binary and unary operators, plus declaration kinds.
//!
//! Operators deserialize from the exact symbol strings the external parser
//! emits (`"+"`, `"==="`, `"typeof"`, ...), so a node tree serialized by an
//! acorn-style parser maps directly onto these enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum BinaryOp {
    // Comparison
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,

    // Bitwise
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = ">>>")]
    UShr,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&")]
    BitAnd,

    // Arithmetic
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Exp,

    // Relational keywords
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "**",
            Self::In => "in",
            Self::Instanceof => "instanceof",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "-")]
    Neg,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "typeof")]
    TypeOf,
}

impl UnaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::TypeOf => "typeof",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Declaration kinds for variable bindings.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl DeclKind {
    /// Returns the source-level keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }

    /// Whether re-declaring this kind in the same scope is an error.
    ///
    /// `var` re-declaration silently overwrites; `let`/`const` do not.
    pub const fn is_lexical(self) -> bool {
        matches!(self, Self::Let | Self::Const)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn binary_op_from_symbol() {
        let op: BinaryOp = serde_json::from_value(json!("===")).unwrap();
        assert_eq!(op, BinaryOp::StrictEq);
        let op: BinaryOp = serde_json::from_value(json!(">>>")).unwrap();
        assert_eq!(op, BinaryOp::UShr);
        let op: BinaryOp = serde_json::from_value(json!("in")).unwrap();
        assert_eq!(op, BinaryOp::In);
    }

    #[test]
    fn binary_op_unknown_symbol_fails() {
        let result: Result<BinaryOp, _> = serde_json::from_value(json!("??"));
        assert!(result.is_err());
    }

    #[test]
    fn unary_op_from_symbol() {
        let op: UnaryOp = serde_json::from_value(json!("typeof")).unwrap();
        assert_eq!(op, UnaryOp::TypeOf);
        let op: UnaryOp = serde_json::from_value(json!("~")).unwrap();
        assert_eq!(op, UnaryOp::BitNot);
    }

    #[test]
    fn symbols_round_trip() {
        assert_eq!(BinaryOp::Exp.as_symbol(), "**");
        assert_eq!(UnaryOp::Neg.to_string(), "-");
        assert_eq!(DeclKind::Const.to_string(), "const");
    }

    #[test]
    fn decl_kind_from_keyword() {
        let kind: DeclKind = serde_json::from_value(json!("let")).unwrap();
        assert_eq!(kind, DeclKind::Let);
        assert!(kind.is_lexical());
        let kind: DeclKind = serde_json::from_value(json!("var")).unwrap();
        assert!(!kind.is_lexical());
    }
}
