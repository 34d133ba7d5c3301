//! Binding environments for the interpreter.
//!
//! Scopes live in an arena indexed by `ScopeId`, with parent links stored
//! as indices. Two environments exist per session: the live one, mutated
//! eagerly during evaluation, and the mirror one, mutated only by step
//! replay. Both use the same type; nothing about an `Environment`
//! distinguishes live from mirror except who writes to it.

use rustc_hash::FxHashMap;

use stepline_ast::DeclKind;
use stepline_runtime::{
    const_assignment, duplicate_declaration, undefined_variable, EvalResult, Value,
};

/// Index of a scope in its environment's arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The root (program) scope of every environment.
    pub const ROOT: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of lexical construct a scope belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    Program,
    Block,
    Function,
}

/// A variable binding.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub value: Value,
    pub kind: DeclKind,
}

/// A single scope: its own bindings plus a parent link.
#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    bindings: FxHashMap<String, Binding>,
    parent: Option<ScopeId>,
}

/// An arena of scopes with a current-scope cursor.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Environment {
    /// Create an environment holding only the root program scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope {
                kind: ScopeKind::Program,
                bindings: FxHashMap::default(),
                parent: None,
            }],
            current: ScopeId::ROOT,
        }
    }

    /// The scope evaluation currently runs in.
    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Declare a binding in the current scope.
    ///
    /// `let`/`const` re-declaration in the same scope is an error; `var`
    /// re-declaration overwrites.
    pub fn declare(&mut self, name: &str, value: Value, kind: DeclKind) -> EvalResult<()> {
        let scope = &mut self.scopes[self.current.index()];
        if kind.is_lexical() && scope.bindings.contains_key(name) {
            return Err(duplicate_declaration(name));
        }
        scope.bindings.insert(name.to_string(), Binding { value, kind });
        Ok(())
    }

    /// Look up a binding's value, searching the parent chain outward.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        self.lookup(name).ok_or_else(|| undefined_variable(name))
    }

    /// Non-failing lookup, for the `typeof` branch.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            let entry = &self.scopes[id.index()];
            if let Some(binding) = entry.bindings.get(name) {
                return Some(binding.value.clone());
            }
            scope = entry.parent;
        }
        None
    }

    /// Mutate the nearest binding for `name` in place.
    pub fn assign(&mut self, name: &str, value: Value) -> EvalResult<()> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            let entry = &mut self.scopes[id.index()];
            if let Some(binding) = entry.bindings.get_mut(name) {
                if binding.kind == DeclKind::Const {
                    return Err(const_assignment(name));
                }
                binding.value = value;
                return Ok(());
            }
            scope = entry.parent;
        }
        Err(undefined_variable(name))
    }

    /// Allocate a child of the current scope.
    ///
    /// Not exercised by the currently supported node set; the call exists
    /// for block and function scoping.
    pub fn create_child(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind,
            bindings: FxHashMap::default(),
            parent: Some(self.current),
        });
        id
    }

    /// Move the cursor into a previously created scope.
    pub fn enter(&mut self, id: ScopeId) {
        debug_assert!(id.index() < self.scopes.len());
        self.current = id;
    }

    /// Move the cursor back to the current scope's parent. No-op at root.
    pub fn exit(&mut self) {
        if let Some(parent) = self.scopes[self.current.index()].parent {
            self.current = parent;
        }
    }

    /// The kind a scope was created with.
    pub fn kind(&self, id: ScopeId) -> ScopeKind {
        self.scopes[id.index()].kind
    }

    /// A scope's own bindings, sorted by name.
    ///
    /// Used for mirror-consistency checks and binding dumps.
    pub fn bindings(&self, id: ScopeId) -> Vec<(String, Value, DeclKind)> {
        let mut entries: Vec<_> = self.scopes[id.index()]
            .bindings
            .iter()
            .map(|(name, binding)| (name.clone(), binding.value.clone(), binding.kind))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
