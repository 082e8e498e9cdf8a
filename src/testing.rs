//! Test fixtures for script-backed constraints
//!
//! [`MockScriptEngine`] stands in for a real script sandbox: constraint
//! functions are plain Rust closures registered by name, and every library
//! URL loaded through any of its contexts is recorded so tests can assert
//! load ordering. Useful for unit tests here and for embedders testing
//! shape definitions without a JS runtime.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use oxrdf::{Literal, NamedNode, Term};

use crate::graph::GraphView;
use crate::script::{ScriptContext, ScriptEngine, ScriptValue};
use crate::{Result, ShaclJsError};

type ScriptFn = Arc<dyn Fn(&[ScriptValue]) -> Result<ScriptValue>>;

/// Script engine backed by named Rust closures
#[derive(Default)]
pub struct MockScriptEngine {
    functions: HashMap<String, ScriptFn>,
    loaded_libraries: RefCell<Vec<String>>,
}

impl MockScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under the name shapes refer to via
    /// `sh:jsFunctionName`.
    pub fn with_function(
        mut self,
        name: impl Into<String>,
        function: impl Fn(&[ScriptValue]) -> Result<ScriptValue> + 'static,
    ) -> Self {
        self.functions.insert(name.into(), Arc::new(function));
        self
    }

    /// Every library URL loaded so far, in load order, across all contexts.
    pub fn loaded_libraries(&self) -> Vec<String> {
        self.loaded_libraries.borrow().clone()
    }
}

impl ScriptEngine for MockScriptEngine {
    fn new_context<'a>(
        &'a self,
        _shapes_graph: &'a dyn GraphView,
        _data_graph: &'a dyn GraphView,
    ) -> Result<Box<dyn ScriptContext + 'a>> {
        Ok(Box::new(MockScriptContext { engine: self }))
    }
}

struct MockScriptContext<'a> {
    engine: &'a MockScriptEngine,
}

impl ScriptContext for MockScriptContext<'_> {
    fn load_library(&mut self, url: &str) -> Result<()> {
        self.engine
            .loaded_libraries
            .borrow_mut()
            .push(url.to_string());
        Ok(())
    }

    fn call_function(&mut self, name: &str, args: &[ScriptValue]) -> Result<ScriptValue> {
        match self.engine.functions.get(name) {
            Some(function) => function(args),
            None => Err(ShaclJsError::ScriptExecution(format!(
                "no function named {name} is defined in this context"
            ))),
        }
    }
}

/// Shorthand for an IRI term.
pub fn iri(value: &str) -> Term {
    Term::from(NamedNode::new_unchecked(value))
}

/// Shorthand for a simple string literal term.
pub fn lit(value: &str) -> Term {
    Term::from(Literal::new_simple_literal(value))
}
