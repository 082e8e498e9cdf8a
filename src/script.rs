//! Script-engine boundary
//!
//! The script execution sandbox (isolate creation, library fetching, call
//! marshalling) is an external collaborator behind the [`ScriptEngine`] and
//! [`ScriptContext`] traits. Values crossing that boundary are carried as
//! [`ScriptValue`], a tagged union covering everything a constraint
//! function may legally return; nothing in this crate inspects script
//! semantics beyond these tags.

use indexmap::IndexMap;
use oxrdf::{Literal, Term};

use crate::graph::GraphView;
use crate::Result;

/// A raw value produced by (or passed to) a script function
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScriptValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// An RDF term marshalled across the boundary
    Term(Term),
    /// A record with named fields (`value`, `path`, `message`, ...)
    Record(IndexMap<String, ScriptValue>),
    List(Vec<ScriptValue>),
    /// A solution sequence: one record per row, as produced by validators
    /// that report violations in tabular form
    Table(Vec<IndexMap<String, ScriptValue>>),
}

impl ScriptValue {
    /// Decode a JSON value marshalled back from a script engine.
    ///
    /// Objects become records and arrays become lists; RDF terms cannot be
    /// expressed in plain JSON and must be constructed directly by engines
    /// that marshal them.
    pub fn from_json(value: &serde_json::Value) -> ScriptValue {
        match value {
            serde_json::Value::Null => ScriptValue::Null,
            serde_json::Value::Bool(b) => ScriptValue::Boolean(*b),
            serde_json::Value::Number(n) => ScriptValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => ScriptValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                ScriptValue::List(items.iter().map(ScriptValue::from_json).collect())
            }
            serde_json::Value::Object(fields) => ScriptValue::Record(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), ScriptValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// This value as an RDF term, if it can stand for one.
    ///
    /// Strings decode to simple literals; anything that does not decode
    /// means "no override provided".
    pub fn as_term(&self) -> Option<Term> {
        match self {
            ScriptValue::Term(t) => Some(t.clone()),
            ScriptValue::String(s) => Some(Literal::new_simple_literal(s.as_str()).into()),
            _ => None,
        }
    }

    /// This value as a result message, if it can stand for one.
    pub fn as_message(&self) -> Option<String> {
        match self {
            ScriptValue::String(s) => Some(s.clone()),
            ScriptValue::Boolean(b) => Some(b.to_string()),
            ScriptValue::Number(n) => Some(n.to_string()),
            ScriptValue::Term(Term::Literal(lit)) => Some(lit.value().to_string()),
            _ => None,
        }
    }
}

/// One opened script execution context
///
/// A context is scoped to a (shapes graph, data graph) pair for the
/// duration of a single executable invocation. Whether a context caches
/// already-loaded libraries across invocations is an engine concern.
pub trait ScriptContext {
    /// Load a script library resource into this context.
    fn load_library(&mut self, url: &str) -> Result<()>;

    /// Invoke a named function with positional arguments and return its
    /// raw result.
    fn call_function(&mut self, name: &str, args: &[ScriptValue]) -> Result<ScriptValue>;
}

/// Factory for script execution contexts
pub trait ScriptEngine {
    /// Open a context scoped to the given shapes graph and data graph.
    fn new_context<'a>(
        &'a self,
        shapes_graph: &'a dyn GraphView,
        data_graph: &'a dyn GraphView,
    ) -> Result<Box<dyn ScriptContext + 'a>>;
}

/// Everything one evaluation run needs: the script engine plus the two
/// graphs in play. Passed down to every `evaluate` call.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub engine: &'a dyn ScriptEngine,
    pub shapes_graph: &'a dyn GraphView,
    pub data_graph: &'a dyn GraphView,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        engine: &'a dyn ScriptEngine,
        shapes_graph: &'a dyn GraphView,
        data_graph: &'a dyn GraphView,
    ) -> Self {
        Self {
            engine,
            shapes_graph,
            data_graph,
        }
    }
}
