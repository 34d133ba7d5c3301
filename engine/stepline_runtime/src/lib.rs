//! Stepline Runtime - values, coercions and error types.
//!
//! This crate holds everything the evaluator and the timeline recorder
//! share about runtime state:
//!
//! - `Value`: the JS-subset runtime value with JavaScript coercion rules
//! - `EvalError`/`EvalErrorKind`: the session error taxonomy with factory
//!   constructors

mod errors;
mod value;

pub use errors::{
    const_assignment, duplicate_declaration, in_operator_on_non_object, instanceof_not_callable,
    step_out_of_order, undefined_variable, unsupported_node, unsupported_property_key, EvalError,
    EvalErrorKind, EvalResult,
};
pub use value::{ObjectValue, Value};
