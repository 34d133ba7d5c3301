//! Error types for evaluation sessions.
//!
//! There is no partial-success mode: any error aborts the whole session,
//! carrying the failing node's type and source offsets so the caller can
//! report the offending span.

use std::fmt;

use stepline_ast::Span;

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed error category.
///
/// Factory functions (e.g. `undefined_variable`) are the public
/// construction API; the `Display` impl is the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Dispatch reached a node type without a handler.
    UnsupportedNode { kind: String },
    /// Object literal key of a kind the evaluator cannot resolve.
    UnsupportedPropertyKey { kind: String },
    /// Scope miss on get or set.
    UndefinedVariable { name: String },
    /// Assignment to a `const` binding.
    ConstAssignment { name: String },
    /// `let`/`const` re-declaration in the same scope.
    DuplicateDeclaration { name: String },
    /// `in` with a non-object right operand.
    InOperatorOnNonObject { type_name: &'static str },
    /// `instanceof` has no callable right operand in this subset.
    InstanceofNotCallable,
    /// Replay received steps out of recorded order.
    StepOutOfOrder { key: u32 },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedNode { kind } => {
                write!(f, "unsupported node type: {kind}")
            }
            Self::UnsupportedPropertyKey { kind } => {
                write!(f, "unsupported property key type: {kind}")
            }
            Self::UndefinedVariable { name } => write!(f, "{name} is not defined"),
            Self::ConstAssignment { name } => {
                write!(f, "assignment to constant variable: {name}")
            }
            Self::DuplicateDeclaration { name } => {
                write!(f, "identifier '{name}' has already been declared")
            }
            Self::InOperatorOnNonObject { type_name } => {
                write!(f, "cannot use 'in' operator on a {type_name}")
            }
            Self::InstanceofNotCallable => {
                write!(f, "right-hand side of 'instanceof' is not callable")
            }
            Self::StepOutOfOrder { key } => {
                write!(f, "step {key} replayed out of recorded order")
            }
        }
    }
}

/// An evaluation error with an optional source span.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self { kind, span: None }
    }

    /// Attach the failing node's span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(span) = self.span {
            write!(f, " (at {span})")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Factory constructors

pub fn unsupported_node(kind: impl Into<String>, span: Span) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedNode { kind: kind.into() }).with_span(span)
}

pub fn unsupported_property_key(kind: impl Into<String>, span: Span) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedPropertyKey { kind: kind.into() })
        .with_span(span)
}

pub fn undefined_variable(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable { name: name.into() })
}

pub fn const_assignment(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstAssignment { name: name.into() })
}

pub fn duplicate_declaration(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDeclaration { name: name.into() })
}

pub fn in_operator_on_non_object(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InOperatorOnNonObject { type_name })
}

pub fn instanceof_not_callable() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InstanceofNotCallable)
}

pub fn step_out_of_order(key: u32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StepOutOfOrder { key })
}
