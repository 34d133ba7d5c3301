//! CLI command implementations.

use std::fs;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use stepline_ast::Program;
use stepline_eval::{interpret, replay, Environment, ScopeId};
use stepline_runtime::EvalError;
use stepline_timeline::{Step, Track};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid syntax tree: {0}")]
    Tree(#[from] serde_json::Error),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("mirror bindings diverged from live bindings after replay")]
    MirrorDivergence,
}

/// What `stepline run` prints: the full session as one JSON document.
#[derive(Serialize)]
struct SessionOutput {
    tracks: Vec<Track>,
    steps: Vec<Step>,
    bindings: serde_json::Map<String, serde_json::Value>,
}

fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

fn load_program(path: &str) -> Result<Program, CliError> {
    let text = read_file(path)?;
    let program = serde_json::from_str(&text)?;
    Ok(program)
}

fn bindings_json(env: &Environment) -> Result<serde_json::Map<String, serde_json::Value>, CliError> {
    let mut map = serde_json::Map::new();
    for (name, value, _kind) in env.bindings(ScopeId::ROOT) {
        map.insert(name, serde_json::to_value(value)?);
    }
    Ok(map)
}

/// Evaluate a parsed tree against its source and print the session.
pub fn run_session(tree_path: &str, source_path: &str) -> Result<(), CliError> {
    let program = load_program(tree_path)?;
    let source = read_file(source_path)?;
    debug!(tree = tree_path, source = source_path, "running session");
    let session = interpret(&program, &source)?;
    let output = SessionOutput {
        bindings: bindings_json(&session.env)?,
        tracks: session.tracks,
        steps: session.steps,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Validate that a tree file deserializes into the supported node set.
pub fn check_tree(tree_path: &str) -> Result<(), CliError> {
    let program = load_program(tree_path)?;
    println!("ok: {} top-level statement(s)", program.body.len());
    Ok(())
}

/// Evaluate, replay the steps against a mirror, and verify the mirror
/// ends up with the live bindings.
pub fn verify_replay(tree_path: &str, source_path: &str) -> Result<(), CliError> {
    let program = load_program(tree_path)?;
    let source = read_file(source_path)?;
    let session = interpret(&program, &source)?;
    let mut mirror = Environment::new();
    replay(&session.steps, &mut mirror)?;
    let live = session.env.bindings(ScopeId::ROOT);
    if mirror.bindings(ScopeId::ROOT) != live {
        return Err(CliError::MirrorDivergence);
    }
    println!(
        "replay ok: {} step(s), {} binding(s)",
        session.steps.len(),
        live.len()
    );
    Ok(())
}
