//! # SHACL-JS Constraint Binding
//!
//! Script-backed constraint components for SHACL validation engines.
//!
//! SHACL-JS lets a shapes graph attach user-defined constraint logic to a
//! shape: a shape declares a *JS executable* (a named function plus zero or
//! more script libraries to load first), and the function decides, per focus
//! node and candidate value node, whether the data violates the shape. This
//! crate implements the constraint-binding and result-interpretation
//! protocol around that idea:
//!
//! - [`JsExecutable`]: parses an executable declaration (function name and
//!   transitively declared libraries) and drives invocation through a
//!   [`ScriptEngine`].
//! - [`JsConstraint`]: the shape-local `sh:js` constraint, evaluated once
//!   per (focus, value) pair with polymorphic result classification.
//! - [`JsConstraintComponent`]: the reusable constraint-component form,
//!   with validator selection, parameter binding and per-focus evaluation
//!   via [`BoundJsValidator`].
//!
//! The RDF storage layer, the script execution sandbox and the final
//! validation-report serialization are external collaborators, reached
//! through the narrow [`GraphView`], [`ShapeView`] and [`ScriptEngine`]
//! traits. Results are returned as [`ValidationResult`] records for the
//! surrounding engine to assemble into a report graph.
//!
//! ## Basic Usage
//!
//! ```rust
//! use shacl_js::{
//!     ConstraintComponent, JsConstraint, ScriptValue, ValidationContext,
//!     graph::{MemoryGraph, ShapeHandle},
//!     testing::MockScriptEngine,
//!     vocabulary::SHACL_JS_VOCAB,
//! };
//! use oxrdf::{Literal, NamedNode, Term};
//!
//! # fn main() -> shacl_js::Result<()> {
//! let shape_node = Term::from(NamedNode::new_unchecked("http://example.org/shape"));
//! let exe_node = Term::from(NamedNode::new_unchecked("http://example.org/exe"));
//!
//! let mut shapes = MemoryGraph::new();
//! shapes.insert(shape_node.clone(), SHACL_JS_VOCAB.js.clone(), exe_node.clone());
//! shapes.insert(
//!     exe_node,
//!     SHACL_JS_VOCAB.js_function_name.clone(),
//!     Term::from(Literal::new_simple_literal("checkValue")),
//! );
//!
//! let shape = ShapeHandle::node_shape(&shapes, shape_node);
//! let constraint = JsConstraint::parse(&shape)?;
//!
//! let engine = MockScriptEngine::new()
//!     .with_function("checkValue", |_args| Ok(ScriptValue::Boolean(true)));
//! let data = MemoryGraph::new();
//! let ctx = ValidationContext::new(&engine, &shapes, &data);
//!
//! let (conforms, reports) = constraint.evaluate(&ctx, &Default::default(), &[])?;
//! assert!(conforms);
//! assert!(reports.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod constraint;
pub mod custom_components;
pub mod executable;
pub mod graph;
pub mod interpret;
pub mod report;
pub mod script;
pub mod testing;
pub mod vocabulary;

pub use constraint::JsConstraint;
pub use custom_components::{
    BoundJsValidator, ComponentParameter, ComponentViolation, JsComponentValidator,
    JsConstraintComponent, ValidatorCache,
};
pub use executable::JsExecutable;
pub use graph::{GraphIdentity, GraphView, MemoryGraph, ShapeHandle, ShapeView};
pub use interpret::{interpret_constraint_result, FailureDetail};
pub use report::{ConstraintComponent, FocusValueMap, Severity, ValidationResult};
pub use script::{ScriptContext, ScriptEngine, ScriptValue, ValidationContext};

/// SHACL namespace IRI
pub static SHACL_NS: &str = "http://www.w3.org/ns/shacl#";

/// Core error type for SHACL-JS operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShaclJsError {
    /// Malformed shape, executable or validator declaration. Fatal to
    /// loading that component; carries a link to the relevant section of
    /// the SHACL / SHACL-JS specification.
    #[error("constraint load error: {message} (see {spec_ref})")]
    ConstraintLoad {
        message: String,
        spec_ref: &'static str,
    },

    /// Parameter-binding violation on a bound validator.
    #[error("reportable runtime error: {0}")]
    ReportableRuntime(String),

    /// Failure raised by a nested validator call; passed through unchanged.
    #[error("validation failure: {0}")]
    ValidationFailure(String),

    /// Error surfaced while loading a library or invoking a script
    /// function. Never converted into a pass or fail verdict.
    #[error("script execution error: {0}")]
    ScriptExecution(String),
}

impl ShaclJsError {
    pub fn constraint_load(message: impl Into<String>, spec_ref: &'static str) -> Self {
        ShaclJsError::ConstraintLoad {
            message: message.into(),
            spec_ref,
        }
    }
}

/// Result type alias for SHACL-JS operations
pub type Result<T> = std::result::Result<T, ShaclJsError>;
