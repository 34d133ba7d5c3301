//! Binary operator evaluation.
//!
//! One closed match over the operator enum; operands are already-evaluated
//! values, so this module is pure value-in/value-out. Coercion rules follow
//! JavaScript for the supported subset.

use stepline_ast::BinaryOp;
use stepline_runtime::{
    in_operator_on_non_object, instanceof_not_callable, EvalResult, Value,
};

/// Apply a binary operator to two evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult<Value> {
    let value = match op {
        BinaryOp::Add => {
            // String concatenation wins when either side is string-like
            if matches!(left, Value::Str(_) | Value::Object(_))
                || matches!(right, Value::Str(_) | Value::Object(_))
            {
                Value::Str(format!("{}{}", left.to_display(), right.to_display()))
            } else {
                Value::Number(left.to_number() + right.to_number())
            }
        }
        BinaryOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Div => Value::Number(left.to_number() / right.to_number()),
        BinaryOp::Mod => Value::Number(left.to_number() % right.to_number()),
        BinaryOp::Exp => Value::Number(left.to_number().powf(right.to_number())),

        BinaryOp::Eq => Value::Bool(loose_eq(left, right)),
        BinaryOp::NotEq => Value::Bool(!loose_eq(left, right)),
        BinaryOp::StrictEq => Value::Bool(strict_eq(left, right)),
        BinaryOp::StrictNotEq => Value::Bool(!strict_eq(left, right)),

        BinaryOp::Lt => compare(left, right, |o| o == std::cmp::Ordering::Less),
        BinaryOp::LtEq => compare(left, right, |o| o != std::cmp::Ordering::Greater),
        BinaryOp::Gt => compare(left, right, |o| o == std::cmp::Ordering::Greater),
        BinaryOp::GtEq => compare(left, right, |o| o != std::cmp::Ordering::Less),

        BinaryOp::Shl => {
            Value::Number(f64::from(left.to_int32().wrapping_shl(right.to_uint32() & 31)))
        }
        BinaryOp::Shr => {
            Value::Number(f64::from(left.to_int32().wrapping_shr(right.to_uint32() & 31)))
        }
        BinaryOp::UShr => {
            Value::Number(f64::from(left.to_uint32().wrapping_shr(right.to_uint32() & 31)))
        }
        BinaryOp::BitOr => Value::Number(f64::from(left.to_int32() | right.to_int32())),
        BinaryOp::BitXor => Value::Number(f64::from(left.to_int32() ^ right.to_int32())),
        BinaryOp::BitAnd => Value::Number(f64::from(left.to_int32() & right.to_int32())),

        BinaryOp::In => match right {
            Value::Object(object) => Value::Bool(object.contains_key(&left.to_display())),
            other => return Err(in_operator_on_non_object(other.type_of())),
        },
        // The subset has no callable values, so the right operand can
        // never be a valid constructor.
        BinaryOp::Instanceof => return Err(instanceof_not_callable()),
    };
    Ok(value)
}

/// Abstract (loose) equality for the supported value set.
fn loose_eq(left: &Value, right: &Value) -> bool {
    use Value::*;
    match (left, right) {
        (Undefined, Undefined) => true,
        (Bool(a), Bool(b)) => a == b,
        (Number(a), Number(b)) => a == b,
        (Str(a), Str(b)) => a == b,
        // Mixed primitives fall back to numeric comparison
        (Number(_), Str(_) | Bool(_))
        | (Str(_) | Bool(_), Number(_))
        | (Str(_), Bool(_))
        | (Bool(_), Str(_)) => {
            let (a, b) = (left.to_number(), right.to_number());
            a == b
        }
        // Objects compare structurally (no identity in this value model)
        (Object(a), Object(b)) => a == b,
        _ => false,
    }
}

/// Strict equality: same type, same value.
fn strict_eq(left: &Value, right: &Value) -> bool {
    use Value::*;
    match (left, right) {
        (Undefined, Undefined) => true,
        (Bool(a), Bool(b)) => a == b,
        (Number(a), Number(b)) => a == b,
        (Str(a), Str(b)) => a == b,
        (Object(a), Object(b)) => a == b,
        _ => false,
    }
}

/// Relational comparison: lexicographic when both sides are strings,
/// otherwise numeric. NaN on either side makes every relation false.
fn compare(left: &Value, right: &Value, accept: impl Fn(std::cmp::Ordering) -> bool) -> Value {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Value::Bool(accept(a.cmp(b)));
    }
    let (a, b) = (left.to_number(), right.to_number());
    match a.partial_cmp(&b) {
        Some(ordering) => Value::Bool(accept(ordering)),
        None => Value::Bool(false),
    }
}
