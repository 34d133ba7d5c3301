//! Unary operator evaluation.
//!
//! All unary operators in the subset are total over the value set, so this
//! returns a plain `Value`. The `typeof`-on-unbound-identifier case never
//! reaches this module; the interpreter resolves it before evaluating the
//! argument.

use stepline_ast::UnaryOp;
use stepline_runtime::Value;

/// Apply a unary operator to an evaluated operand.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> Value {
    match op {
        UnaryOp::Neg => Value::Number(-operand.to_number()),
        UnaryOp::Plus => Value::Number(operand.to_number()),
        UnaryOp::Not => Value::Bool(!operand.to_boolean()),
        UnaryOp::BitNot => Value::Number(f64::from(!operand.to_int32())),
        UnaryOp::TypeOf => Value::string(operand.type_of()),
    }
}
