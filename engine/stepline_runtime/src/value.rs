//! Runtime values for the evaluated JavaScript subset.
//!
//! The value set is fixed (undefined, boolean, number, string, object), so
//! coercions and display logic use direct pattern matching rather than trait
//! objects. Coercion rules follow JavaScript for this subset.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use stepline_ast::LiteralValue;

/// A runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Bool(bool),
    Number(f64),
    Str(String),
    Object(ObjectValue),
}

/// An object literal's key/value table.
///
/// Entries keep insertion order; re-inserting an existing key replaces the
/// value in place, matching object literal evaluation order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ObjectValue {
    entries: Vec<(String, Value)>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = ObjectValue::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl Value {
    /// Convenience constructor for string values.
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Convenience constructor for number values.
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// The `typeof` string for this value.
    pub const fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
        }
    }

    /// ToBoolean: everything is truthy except `undefined`, `false`, `0`,
    /// `NaN` and the empty string.
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(*n == 0.0 || n.is_nan()),
            Value::Str(s) => !s.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// ToNumber coercion.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
            Value::Number(n) => *n,
            Value::Str(s) => str_to_number(s),
            Value::Object(_) => f64::NAN,
        }
    }

    /// ToInt32 coercion (modular wrap into the signed 32-bit range).
    pub fn to_int32(&self) -> i32 {
        self.to_uint32() as i32
    }

    /// ToUint32 coercion.
    pub fn to_uint32(&self) -> u32 {
        let n = self.to_number();
        if n.is_nan() || n.is_infinite() {
            return 0;
        }
        const TWO_32: f64 = 4_294_967_296.0;
        let m = n.trunc().rem_euclid(TWO_32);
        m as u32
    }

    /// ToString coercion, used for display values and string concatenation.
    pub fn to_display(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Str(s) => s.clone(),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Undefined => Value::Undefined,
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Object(o) => {
                let mut map = serializer.serialize_map(Some(o.len()))?;
                for (key, value) in o.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// String-to-number coercion.
///
/// Trimmed empty strings are `0`; the literal `Infinity` spellings are
/// infinities; Rust's own `inf`/`nan` spellings are *not* numbers here.
fn str_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => {
            let lower = trimmed.to_ascii_lowercase();
            if lower.contains("inf") || lower.contains("nan") {
                f64::NAN
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
    }
}

/// Number-to-string, without a trailing `.0` on integral values.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    // i64 covers every integral f64 the subset can realistically produce
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        return format!("{}", n as i64);
    }
    format!("{n}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn type_of_strings() {
        assert_eq!(Value::Undefined.type_of(), "undefined");
        assert_eq!(Value::Bool(true).type_of(), "boolean");
        assert_eq!(Value::number(1.5).type_of(), "number");
        assert_eq!(Value::string("x").type_of(), "string");
        assert_eq!(Value::Object(ObjectValue::new()).type_of(), "object");
    }

    #[test]
    fn to_boolean_falsy_values() {
        assert!(!Value::Undefined.to_boolean());
        assert!(!Value::Bool(false).to_boolean());
        assert!(!Value::number(0.0).to_boolean());
        assert!(!Value::number(f64::NAN).to_boolean());
        assert!(!Value::string("").to_boolean());
    }

    #[test]
    fn to_boolean_truthy_values() {
        assert!(Value::Bool(true).to_boolean());
        assert!(Value::number(-1.0).to_boolean());
        assert!(Value::string("0").to_boolean());
        assert!(Value::Object(ObjectValue::new()).to_boolean());
    }

    #[test]
    fn to_number_coercions() {
        assert!(Value::Undefined.to_number().is_nan());
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::string("  42 ").to_number(), 42.0);
        assert_eq!(Value::string("").to_number(), 0.0);
        assert_eq!(Value::string("-Infinity").to_number(), f64::NEG_INFINITY);
        assert!(Value::string("inf").to_number().is_nan());
        assert!(Value::string("12px").to_number().is_nan());
        assert!(Value::Object(ObjectValue::new()).to_number().is_nan());
    }

    #[test]
    fn to_int32_wraps() {
        assert_eq!(Value::number(1.0).to_int32(), 1);
        assert_eq!(Value::number(-1.5).to_int32(), -1);
        assert_eq!(Value::number(4_294_967_296.0).to_int32(), 0);
        assert_eq!(Value::number(2_147_483_648.0).to_int32(), -2_147_483_648);
        assert_eq!(Value::number(f64::NAN).to_int32(), 0);
        assert_eq!(Value::number(f64::INFINITY).to_int32(), 0);
    }

    #[test]
    fn to_uint32_wraps() {
        assert_eq!(Value::number(-1.0).to_uint32(), u32::MAX);
        assert_eq!(Value::number(4_294_967_297.0).to_uint32(), 1);
    }

    #[test]
    fn display_numbers() {
        assert_eq!(Value::number(1.0).to_display(), "1");
        assert_eq!(Value::number(-0.0).to_display(), "0");
        assert_eq!(Value::number(3.14).to_display(), "3.14");
        assert_eq!(Value::number(f64::NAN).to_display(), "NaN");
        assert_eq!(Value::number(f64::INFINITY).to_display(), "Infinity");
    }

    #[test]
    fn display_other_values() {
        assert_eq!(Value::Undefined.to_display(), "undefined");
        assert_eq!(Value::Bool(false).to_display(), "false");
        assert_eq!(Value::string("hi").to_display(), "hi");
        assert_eq!(
            Value::Object(ObjectValue::new()).to_display(),
            "[object Object]"
        );
    }

    #[test]
    fn object_insert_preserves_order_and_replaces() {
        let mut object = ObjectValue::new();
        object.insert("b", Value::number(1.0));
        object.insert("a", Value::number(2.0));
        object.insert("b", Value::number(3.0));
        let keys: Vec<&str> = object.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(object.get("b"), Some(&Value::number(3.0)));
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn from_literal_value() {
        assert_eq!(Value::from(&LiteralValue::Undefined), Value::Undefined);
        assert_eq!(Value::from(&LiteralValue::Number(2.0)), Value::number(2.0));
        assert_eq!(
            Value::from(&LiteralValue::Str("s".to_string())),
            Value::string("s")
        );
    }

    #[test]
    fn serialize_to_json() {
        let mut object = ObjectValue::new();
        object.insert("x", Value::number(1.0));
        object.insert("s", Value::string("hi"));
        object.insert("u", Value::Undefined);
        let json = serde_json::to_value(Value::Object(object)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"x": 1.0, "s": "hi", "u": null})
        );
    }
}
