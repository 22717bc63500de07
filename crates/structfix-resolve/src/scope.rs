//! Lexical scope stack.
//!
//! Maps names to declarations. Entering a function, block, statement or
//! clause pushes a frame and leaving pops it; lookups search from the
//! innermost frame outward.

use rustc_hash::FxHashMap;

use crate::DeclId;

pub(crate) struct ScopeStack {
    /// Index 0 is the package scope.
    scopes: Vec<FxHashMap<String, DeclId>>,
}

impl ScopeStack {
    /// A stack holding one empty package scope.
    pub(crate) fn new() -> Self {
        ScopeStack {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope. The package scope is never popped.
    pub(crate) fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "cannot pop the package scope");
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope, shadowing outer bindings.
    pub(crate) fn insert(&mut self, name: String, decl: DeclId) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, decl);
        }
    }

    /// Bind `name` in the package scope unless it is already bound there;
    /// the first declaration wins.
    pub(crate) fn insert_package(&mut self, name: String, decl: DeclId) {
        self.scopes[0].entry(name).or_insert(decl);
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<DeclId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    /// Look up `name` in the innermost scope only.
    pub(crate) fn lookup_local(&self, name: &str) -> Option<DeclId> {
        self.scopes.last().and_then(|scope| scope.get(name).copied())
    }

    pub(crate) fn depth(&self) -> usize {
        self.scopes.len()
    }
}
