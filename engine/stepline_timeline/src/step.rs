//! Step records: deferred state mutations.
//!
//! Steps carry their captured data as plain fields rather than closures,
//! so the replay log is inspectable and serializable. Replaying steps in
//! key order against a fresh mirror environment reconstructs the binding
//! state the live evaluation produced eagerly.

use serde::Serialize;

use stepline_ast::DeclKind;
use stepline_runtime::Value;

/// The deferred mutation a step performs on the mirror environment.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// No state change; holds a timeline slot for a purely visual moment.
    Noop,
    /// Declare a binding in the mirror scope.
    Declare {
        name: String,
        value: Value,
        kind: DeclKind,
    },
}

/// A recorded deferred mutation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Step {
    /// Step counter value at creation; steps form a single total order
    /// equal to program-evaluation order.
    pub key: u32,
    pub action: StepAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn declare_step_serializes_captured_fields() {
        let step = Step {
            key: 1,
            action: StepAction::Declare {
                name: "a".to_string(),
                value: Value::number(1.0),
                kind: DeclKind::Let,
            },
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key": 1,
                "action": {
                    "action": "declare",
                    "name": "a",
                    "value": 1.0,
                    "kind": "let"
                }
            })
        );
    }

    #[test]
    fn noop_step_serializes() {
        let step = Step {
            key: 0,
            action: StepAction::Noop,
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["action"]["action"], "noop");
    }
}
