//! Stepline Eval - the dual-scope, dual-output evaluator.
//!
//! Evaluating a program does two things at once:
//!
//! - it computes values and mutates the **live** environment eagerly, and
//! - it records a replayable timeline of tracks (visual segments) and
//!   steps (deferred mutations).
//!
//! Replaying the recorded steps against a fresh **mirror** environment via
//! [`replay`] reproduces the live environment's bindings exactly. That
//! equivalence is the contract a renderer relies on when it scrubs the
//! visual timeline independently of the state timeline.
//!
//! ```
//! use stepline_ast::Program;
//! use stepline_eval::{interpret, replay, Environment, ScopeId};
//!
//! let source = "let a = 1;";
//! let tree: Program = serde_json::from_str(
//!     r#"{"type":"Program","start":0,"end":10,"body":[{
//!         "type":"VariableDeclaration","start":0,"end":10,"kind":"let",
//!         "declarations":[{"type":"VariableDeclarator","start":4,"end":9,
//!             "id":{"type":"Identifier","start":4,"end":5,"name":"a"},
//!             "init":{"type":"Literal","start":8,"end":9,"value":1}}]}]}"#,
//! ).unwrap();
//!
//! let session = interpret(&tree, source).unwrap();
//! let mut mirror = Environment::new();
//! replay(&session.steps, &mut mirror).unwrap();
//! assert_eq!(
//!     mirror.bindings(ScopeId::ROOT),
//!     session.env.bindings(ScopeId::ROOT),
//! );
//! ```

mod environment;
mod interpreter;
mod operators;
mod replay;
mod unary_operators;

pub use environment::{Binding, Environment, ScopeId, ScopeKind};
pub use interpreter::{interpret, Completion, Evaluation, Interpreter};
pub use operators::evaluate_binary;
pub use replay::replay;
pub use unary_operators::evaluate_unary;
