//! The tree-walking evaluator.
//!
//! Evaluation is dual-output: every handler both computes a runtime value
//! (mutating the live environment eagerly) and records tracks/steps into
//! the session recorder. Handlers for statements own a local track/step
//! buffer, close all open tracks when the statement completes, and commit
//! the buffer to the recorder, so every sub-expression's visual lifetime
//! is bounded by its statement.
//!
//! Dispatch is a closed match over the node enums. A node the evaluator
//! does not support aborts the session with the node's type and offsets.

use tracing::debug;

use stepline_ast::{
    BinaryExpression, Expr, ObjectExpression, Program, Span, Spanned, Stmt, UnaryExpression,
    UnaryOp, VariableDeclaration,
};
use stepline_runtime::{
    unsupported_node, unsupported_property_key, EvalResult, ObjectValue, Value,
};
use stepline_timeline::{
    offsets_to_positions, EffectKind, Position, Recorder, Step, StepAction, Track,
};

use crate::environment::Environment;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;

/// The finished output of one evaluation session.
#[derive(Debug)]
pub struct Evaluation {
    /// Visual timeline, in creation order.
    pub tracks: Vec<Track>,
    /// Deferred mutations, in key order.
    pub steps: Vec<Step>,
    /// The live environment after all statements ran.
    pub env: Environment,
}

/// Evaluate a parsed program against a fresh environment.
pub fn interpret(program: &Program, source: &str) -> EvalResult<Evaluation> {
    Interpreter::new(source).run(program)
}

/// Where an evaluated expression surfaced in the source.
///
/// Move tracks flow a value from its producing expression's anchor to the
/// binding identifier, so every `Evaluated` carries one.
#[derive(Copy, Clone, Debug)]
struct Anchor {
    startpos: Position,
    endpos: Position,
}

/// An expression's runtime value plus its source anchor.
#[derive(Debug)]
struct Evaluated {
    value: Value,
    anchor: Anchor,
}

/// How a statement finished: normally, or by carrying a `return` value up
/// through enclosing constructs.
///
/// No current handler produces `Return` — `return` sits outside the
/// supported node set — but the variant keeps the statement dispatch
/// contract wide enough that return-carrying constructs slot in as new
/// match arms without touching existing handler signatures.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Normal,
    Return(Value),
}

/// One evaluation session: source text, recorder, live environment.
#[derive(Debug)]
pub struct Interpreter<'src> {
    source: &'src str,
    recorder: Recorder,
    env: Environment,
}

impl<'src> Interpreter<'src> {
    pub fn new(source: &'src str) -> Self {
        Interpreter {
            source,
            recorder: Recorder::new(),
            env: Environment::new(),
        }
    }

    /// Run the program to completion, consuming the session.
    pub fn run(mut self, program: &Program) -> EvalResult<Evaluation> {
        debug!(statements = program.body.len(), "starting evaluation session");
        self.recorder.reset();
        for stmt in &program.body {
            match self.eval_stmt(stmt)? {
                Completion::Normal => {}
                Completion::Return(value) => {
                    debug!(value = %value, "return reached top level; stopping");
                    break;
                }
            }
        }
        let (tracks, steps) = self.recorder.finish();
        debug!(
            tracks = tracks.len(),
            steps = steps.len(),
            "session finished"
        );
        Ok(Evaluation {
            tracks,
            steps,
            env: self.env,
        })
    }

    fn positions(&self, span: Span) -> (Position, Position) {
        offsets_to_positions(span, self.source)
    }

    fn anchor(&self, span: Span) -> Anchor {
        let (startpos, endpos) = self.positions(span);
        Anchor { startpos, endpos }
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult<Completion> {
        match stmt {
            Stmt::VariableDeclaration(node) => self.eval_variable_declaration(node),
            Stmt::ExpressionStatement(node) => {
                let mut tracks = Vec::new();
                self.eval_expr(&node.expression, &mut tracks)?;
                self.recorder.close_open(&mut tracks);
                self.recorder.commit(tracks, Vec::new());
                Ok(Completion::Normal)
            }
            other => {
                debug!(node = other.kind_name(), "no statement handler");
                Err(unsupported_node(other.kind_name(), other.span()))
            }
        }
    }

    /// `var`/`let`/`const`.
    ///
    /// Per declarator: an appear track for the identifier paired with a
    /// noop step, the initializer's own tracks, a move track flowing the
    /// initializer value to the identifier, and the declare step. The live
    /// environment is mutated immediately; the declare step repeats the
    /// mutation for the mirror at replay time.
    fn eval_variable_declaration(&mut self, node: &VariableDeclaration) -> EvalResult<Completion> {
        let mut tracks = Vec::new();
        let mut steps = Vec::new();
        for declarator in &node.declarations {
            let (id_start, id_end) = self.positions(declarator.id.span());
            tracks.push(self.recorder.begin_track(
                Value::string(&declarator.id.name),
                EffectKind::Appear,
                id_start,
                id_end,
            ));
            steps.push(self.recorder.record_step(StepAction::Noop));

            let evaluated = match &declarator.init {
                Some(init) => self.eval_expr(init, &mut tracks)?,
                // A missing initializer behaves like one that evaluated to
                // undefined, anchored at the identifier itself
                None => {
                    tracks.push(self.recorder.begin_track(
                        Value::string("undefined"),
                        EffectKind::Appear,
                        id_start,
                        id_end,
                    ));
                    Evaluated {
                        value: Value::Undefined,
                        anchor: Anchor {
                            startpos: id_start,
                            endpos: id_end,
                        },
                    }
                }
            };
            tracks.push(self.recorder.begin_track(
                track_value(&evaluated.value),
                EffectKind::Move,
                evaluated.anchor.startpos,
                id_start,
            ));
            let value = evaluated.value;

            self.env
                .declare(&declarator.id.name, value.clone(), node.kind)
                .map_err(|err| err.with_span(declarator.span()))?;
            steps.push(self.recorder.record_step(StepAction::Declare {
                name: declarator.id.name.clone(),
                value,
                kind: node.kind,
            }));
        }
        self.recorder.close_open(&mut tracks);
        self.recorder.commit(tracks, steps);
        Ok(Completion::Normal)
    }

    fn eval_expr(&mut self, expr: &Expr, tracks: &mut Vec<Track>) -> EvalResult<Evaluated> {
        match expr {
            Expr::Literal(node) => {
                let value = Value::from(&node.value);
                let anchor = self.anchor(node.span());
                tracks.push(self.recorder.begin_track(
                    track_value(&value),
                    EffectKind::Appear,
                    anchor.startpos,
                    anchor.endpos,
                ));
                Ok(Evaluated { value, anchor })
            }
            Expr::Identifier(node) => {
                let value = self
                    .env
                    .get(&node.name)
                    .map_err(|err| err.with_span(node.span()))?;
                let anchor = self.anchor(node.span());
                tracks.push(self.recorder.begin_track(
                    track_value(&value),
                    EffectKind::Appear,
                    anchor.startpos,
                    anchor.endpos,
                ));
                Ok(Evaluated { value, anchor })
            }
            Expr::UnaryExpression(node) => self.eval_unary(node, tracks),
            Expr::BinaryExpression(node) => self.eval_binary(node, tracks),
            Expr::ObjectExpression(node) => self.eval_object(node, tracks),
            other => {
                debug!(node = other.kind_name(), "no expression handler");
                Err(unsupported_node(other.kind_name(), other.span()))
            }
        }
    }

    /// Unary expressions, including the non-throwing `typeof` branch.
    ///
    /// `typeof` on an identifier with no binding short-circuits before the
    /// argument is evaluated, so the usual scope-miss error never fires.
    fn eval_unary(&mut self, node: &UnaryExpression, tracks: &mut Vec<Track>) -> EvalResult<Evaluated> {
        let anchor = self.anchor(node.span());
        if node.operator == UnaryOp::TypeOf {
            if let Expr::Identifier(id) = node.argument.as_ref() {
                if self.env.lookup(&id.name).is_none() {
                    let result = Value::string("undefined");
                    let (id_start, id_end) = self.positions(id.span());
                    tracks.push(self.recorder.begin_track(
                        result.clone(),
                        EffectKind::Appear,
                        id_start,
                        id_end,
                    ));
                    tracks.push(self.recorder.begin_track(
                        result.clone(),
                        EffectKind::Appear,
                        anchor.startpos,
                        anchor.endpos,
                    ));
                    return Ok(Evaluated { value: result, anchor });
                }
            }
        }
        let argument = self.eval_expr(&node.argument, tracks)?;
        let value = evaluate_unary(&argument.value, node.operator);
        tracks.push(self.recorder.begin_track(
            track_value(&value),
            EffectKind::Appear,
            anchor.startpos,
            anchor.endpos,
        ));
        Ok(Evaluated { value, anchor })
    }

    /// Binary expressions.
    ///
    /// Operands record right-then-left (the right value surfaces first on
    /// the timeline), then a compute track for the result spans the whole
    /// expression.
    fn eval_binary(&mut self, node: &BinaryExpression, tracks: &mut Vec<Track>) -> EvalResult<Evaluated> {
        let right = self.eval_expr(&node.right, tracks)?;
        let left = self.eval_expr(&node.left, tracks)?;
        let value = evaluate_binary(&left.value, &right.value, node.operator)
            .map_err(|err| err.with_span(node.span()))?;
        let anchor = self.anchor(node.span());
        tracks.push(self.recorder.begin_track(
            compute_value(&value),
            EffectKind::Compute,
            anchor.startpos,
            anchor.endpos,
        ));
        Ok(Evaluated { value, anchor })
    }

    /// Object literals.
    ///
    /// One block track covers the whole literal, then per property: the
    /// key's appear track, the value expression's tracks, and a block
    /// track rendering the finished `key: value` row at the property span.
    fn eval_object(&mut self, node: &ObjectExpression, tracks: &mut Vec<Track>) -> EvalResult<Evaluated> {
        let mut anchor = self.anchor(node.span());
        tracks.push(self.recorder.begin_track(
            Value::string(""),
            EffectKind::Block,
            anchor.startpos,
            anchor.endpos,
        ));
        let mut object = ObjectValue::new();
        for property in &node.properties {
            let key = match &property.key {
                Expr::Identifier(id) => {
                    let (key_start, key_end) = self.positions(id.span());
                    tracks.push(self.recorder.begin_track(
                        Value::string(&id.name),
                        EffectKind::Appear,
                        key_start,
                        key_end,
                    ));
                    id.name.clone()
                }
                Expr::Literal(_) => self.eval_expr(&property.key, tracks)?.value.to_display(),
                other => {
                    return Err(unsupported_property_key(other.kind_name(), other.span()))
                }
            };
            let value = self.eval_expr(&property.value, tracks)?.value;
            anchor = self.anchor(property.span());
            tracks.push(self.recorder.begin_track(
                Value::string(format!("{key}: {}\n", value.to_display())),
                EffectKind::Block,
                anchor.startpos,
                anchor.endpos,
            ));
            object.insert(key, value);
        }
        Ok(Evaluated {
            value: Value::Object(object),
            anchor,
        })
    }
}

/// Display form of a value for appear/move tracks.
///
/// `undefined` renders as the string `"undefined"`; every other value is
/// shown as itself.
fn track_value(value: &Value) -> Value {
    match value {
        Value::Undefined => Value::string("undefined"),
        other => other.clone(),
    }
}

/// Display form of a compute (binary result) track.
///
/// Compute tracks additionally normalize booleans to `"true"`/`"false"`
/// strings so comparison results render as text.
fn compute_value(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::string(if *b { "true" } else { "false" }),
        other => track_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use stepline_runtime::EvalErrorKind;

    fn program(tree: serde_json::Value) -> Program {
        serde_json::from_value(tree).unwrap()
    }

    #[test]
    fn declaration_without_initializer_binds_undefined() {
        // `let a;`
        let program = program(json!({
            "type": "Program", "start": 0, "end": 6,
            "body": [{
                "type": "VariableDeclaration", "start": 0, "end": 6, "kind": "let",
                "declarations": [{
                    "type": "VariableDeclarator", "start": 4, "end": 5,
                    "id": {"type": "Identifier", "start": 4, "end": 5, "name": "a"},
                    "init": null
                }]
            }]
        }));
        let result = interpret(&program, "let a;").unwrap();
        assert_eq!(result.env.get("a").unwrap(), Value::Undefined);
        // Same track shape as an initializer evaluating to undefined,
        // anchored at the identifier
        assert_eq!(result.tracks.len(), 3);
        assert_eq!(result.tracks[0].effect.value, Value::string("a"));
        assert_eq!(result.tracks[1].effect.value, Value::string("undefined"));
        assert_eq!(result.tracks[1].effect.startpos, result.tracks[0].effect.startpos);
        assert_eq!(result.tracks[2].effect.kind, EffectKind::Move);
        assert_eq!(result.tracks[2].effect.value, Value::string("undefined"));
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[0].action, StepAction::Noop);
        assert_eq!(
            result.steps[1].action,
            StepAction::Declare {
                name: "a".to_string(),
                value: Value::Undefined,
                kind: stepline_ast::DeclKind::Let,
            }
        );
    }

    #[test]
    fn statement_handlers_yield_normal_completion() {
        let declaration: Stmt = serde_json::from_value(json!({
            "type": "VariableDeclaration", "start": 0, "end": 10, "kind": "let",
            "declarations": [{
                "type": "VariableDeclarator", "start": 4, "end": 9,
                "id": {"type": "Identifier", "start": 4, "end": 5, "name": "a"},
                "init": {"type": "Literal", "start": 8, "end": 9, "value": 1}
            }]
        }))
        .unwrap();
        let expression: Stmt = serde_json::from_value(json!({
            "type": "ExpressionStatement", "start": 11, "end": 17,
            "expression": {
                "type": "BinaryExpression", "start": 11, "end": 16, "operator": "+",
                "left": {"type": "Literal", "start": 11, "end": 12, "value": 1},
                "right": {"type": "Literal", "start": 15, "end": 16, "value": 2}
            }
        }))
        .unwrap();
        let mut interpreter = Interpreter::new("let a = 1;\n1 + 2;");
        assert_eq!(interpreter.eval_stmt(&declaration).unwrap(), Completion::Normal);
        assert_eq!(interpreter.eval_stmt(&expression).unwrap(), Completion::Normal);
    }

    #[test]
    fn unsupported_statement_reports_kind_and_span() {
        let program = program(json!({
            "type": "Program", "start": 0, "end": 12,
            "body": [{"type": "WhileStatement", "start": 0, "end": 12}]
        }));
        let err = interpret(&program, "while (1) {}").unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::UnsupportedNode { ref kind } if kind == "WhileStatement"
        ));
        assert_eq!(err.span, Some(Span::new(0, 12)));
    }

    #[test]
    fn unsupported_expression_reports_kind_and_span() {
        // `a.b;` with `a` unbound never reaches the scope lookup: member
        // access has no handler
        let program = program(json!({
            "type": "Program", "start": 0, "end": 4,
            "body": [{
                "type": "ExpressionStatement", "start": 0, "end": 4,
                "expression": {"type": "MemberExpression", "start": 0, "end": 3}
            }]
        }));
        let err = interpret(&program, "a.b;").unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::UnsupportedNode { ref kind } if kind == "MemberExpression"
        ));
        assert_eq!(err.span, Some(Span::new(0, 3)));
    }

    #[test]
    fn undefined_variable_carries_identifier_span() {
        let program = program(json!({
            "type": "Program", "start": 0, "end": 2,
            "body": [{
                "type": "ExpressionStatement", "start": 0, "end": 2,
                "expression": {"type": "Identifier", "start": 0, "end": 1, "name": "b"}
            }]
        }));
        let err = interpret(&program, "b;").unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::UndefinedVariable { ref name } if name == "b"
        ));
        assert_eq!(err.span, Some(Span::new(0, 1)));
    }

    #[test]
    fn computed_property_key_is_unsupported() {
        // `({[k]: 1});` — a computed key arrives as a non-identifier,
        // non-literal key expression
        let program = program(json!({
            "type": "Program", "start": 0, "end": 11,
            "body": [{
                "type": "ExpressionStatement", "start": 0, "end": 11,
                "expression": {
                    "type": "ObjectExpression", "start": 1, "end": 9,
                    "properties": [{
                        "type": "Property", "start": 2, "end": 8,
                        "key": {"type": "MemberExpression", "start": 3, "end": 4},
                        "value": {"type": "Literal", "start": 7, "end": 8, "value": 1}
                    }]
                }
            }]
        }));
        let err = interpret(&program, "({[k]: 1});").unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::UnsupportedPropertyKey { ref kind } if kind == "MemberExpression"
        ));
    }

    #[test]
    fn string_literal_property_key_uses_its_value() {
        // `({"y": 2});`
        let program = program(json!({
            "type": "Program", "start": 0, "end": 11,
            "body": [{
                "type": "ExpressionStatement", "start": 0, "end": 11,
                "expression": {
                    "type": "ObjectExpression", "start": 1, "end": 9,
                    "properties": [{
                        "type": "Property", "start": 2, "end": 8,
                        "key": {"type": "Literal", "start": 2, "end": 5, "value": "y"},
                        "value": {"type": "Literal", "start": 7, "end": 8, "value": 2}
                    }]
                }
            }]
        }));
        let result = interpret(&program, "({\"y\": 2});").unwrap();
        let row = result
            .tracks
            .iter()
            .find(|t| t.effect.kind == EffectKind::Block && !t.effect.value.to_display().is_empty())
            .unwrap();
        assert_eq!(row.effect.value, Value::string("y: 2\n"));
    }

    #[test]
    fn duplicate_let_declaration_fails_with_declarator_span() {
        let program = program(json!({
            "type": "Program", "start": 0, "end": 21,
            "body": [
                {
                    "type": "VariableDeclaration", "start": 0, "end": 10, "kind": "let",
                    "declarations": [{
                        "type": "VariableDeclarator", "start": 4, "end": 9,
                        "id": {"type": "Identifier", "start": 4, "end": 5, "name": "a"},
                        "init": {"type": "Literal", "start": 8, "end": 9, "value": 1}
                    }]
                },
                {
                    "type": "VariableDeclaration", "start": 11, "end": 21, "kind": "let",
                    "declarations": [{
                        "type": "VariableDeclarator", "start": 15, "end": 20,
                        "id": {"type": "Identifier", "start": 15, "end": 16, "name": "a"},
                        "init": {"type": "Literal", "start": 19, "end": 20, "value": 2}
                    }]
                }
            ]
        }));
        let err = interpret(&program, "let a = 1;\nlet a = 2;").unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::DuplicateDeclaration { .. }));
        assert_eq!(err.span, Some(Span::new(15, 20)));
    }

    #[test]
    fn undefined_literal_tracks_render_as_string() {
        // `let a;` has no value track, so exercise via `let a = undefined`
        // parsed as an Identifier by acorn; use a bare Literal-with-null
        // instead, which the parser emits for `null`-less trees
        let program = program(json!({
            "type": "Program", "start": 0, "end": 10,
            "body": [{
                "type": "ExpressionStatement", "start": 0, "end": 10,
                "expression": {"type": "Literal", "start": 0, "end": 9, "value": null}
            }]
        }));
        let result = interpret(&program, "undefined;").unwrap();
        assert_eq!(result.tracks[0].effect.value, Value::string("undefined"));
        assert_eq!(result.tracks[0].effect.value_type, "string");
    }
}
