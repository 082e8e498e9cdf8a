//! Validation results and the engine-facing component contract
//!
//! This crate never assembles a report graph; it hands [`ValidationResult`]
//! records back to the surrounding engine, which owns serialization.
//! [`ConstraintComponent`] is the uniform contract every constraint and
//! bound validator here implements.

use indexmap::IndexMap;
use oxrdf::{NamedNode, Term};

use crate::graph::GraphView;
use crate::script::ValidationContext;
use crate::Result;

/// Violation severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Info,
    Warning,
    #[default]
    Violation,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "Info"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Violation => write!(f, "Violation"),
        }
    }
}

/// Focus node → its candidate value nodes, in evaluation order
pub type FocusValueMap = IndexMap<Term, Vec<Term>>;

/// One validation result record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// The focus node the result is about
    pub focus_node: Term,

    /// The specific value that caused the result, when one applies
    pub value: Option<Term>,

    /// The result path, when one applies
    pub result_path: Option<Term>,

    /// The shape that produced the result
    pub source_shape: Term,

    /// The constraint component that produced the result
    pub source_constraint_component: Term,

    /// Severity of the result
    pub result_severity: Severity,

    /// Human-readable messages, in production order
    pub messages: Vec<String>,
}

/// The uniform contract between this crate and the validation engine
pub trait ConstraintComponent {
    /// The declaration predicates this component recognizes.
    fn constraint_parameters(&self) -> Vec<NamedNode>;

    /// Stable component name.
    fn constraint_name(&self) -> &'static str;

    /// The SHACL constraint class identifying this component in reports.
    fn shacl_constraint_class(&self) -> NamedNode;

    /// Fallback messages used when a script produced none.
    fn make_generic_messages(
        &self,
        data_graph: &dyn GraphView,
        focus: &Term,
        value: Option<&Term>,
    ) -> Vec<String>;

    /// Evaluate against every focus node and its candidate values.
    ///
    /// Returns whether the constraint conformed plus one result record per
    /// violation. Load, binding and script errors propagate; none are
    /// converted into report entries.
    fn evaluate(
        &self,
        ctx: &ValidationContext<'_>,
        focus_value_nodes: &FocusValueMap,
        evaluation_path: &[Term],
    ) -> Result<(bool, Vec<ValidationResult>)>;
}

/// Build one validation result record, applying the component's generic
/// messages when the script supplied none. The single choke point through
/// which every result in this crate is produced.
#[allow(clippy::too_many_arguments)]
pub(crate) fn make_v_result(
    component: &dyn ConstraintComponent,
    data_graph: &dyn GraphView,
    source_shape: &Term,
    source_constraint_component: Term,
    focus_node: &Term,
    value: Option<Term>,
    result_path: Option<Term>,
    extra_messages: Vec<String>,
) -> ValidationResult {
    let messages = if extra_messages.is_empty() {
        component.make_generic_messages(data_graph, focus_node, value.as_ref())
    } else {
        extra_messages
    };
    ValidationResult {
        focus_node: focus_node.clone(),
        value,
        result_path,
        source_shape: source_shape.clone(),
        source_constraint_component,
        result_severity: Severity::Violation,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use crate::testing::{iri, lit};
    use crate::vocabulary::SHACL_JS_VOCAB;

    struct StubComponent;

    impl ConstraintComponent for StubComponent {
        fn constraint_parameters(&self) -> Vec<NamedNode> {
            Vec::new()
        }

        fn constraint_name(&self) -> &'static str {
            "StubComponent"
        }

        fn shacl_constraint_class(&self) -> NamedNode {
            SHACL_JS_VOCAB.constraint_component.clone()
        }

        fn make_generic_messages(
            &self,
            _data_graph: &dyn GraphView,
            _focus: &Term,
            _value: Option<&Term>,
        ) -> Vec<String> {
            vec!["generic".to_string()]
        }

        fn evaluate(
            &self,
            _ctx: &ValidationContext<'_>,
            _focus_value_nodes: &FocusValueMap,
            _evaluation_path: &[Term],
        ) -> Result<(bool, Vec<ValidationResult>)> {
            Ok((true, Vec::new()))
        }
    }

    #[test]
    fn generic_messages_fill_in_only_when_none_supplied() {
        let data = MemoryGraph::new();
        let shape = iri("http://example.org/shape");
        let focus = iri("http://example.org/focus");

        let with_extra = make_v_result(
            &StubComponent,
            &data,
            &shape,
            SHACL_JS_VOCAB.js_constraint.clone().into(),
            &focus,
            Some(lit("bad")),
            None,
            vec!["from the script".to_string()],
        );
        assert_eq!(with_extra.messages, vec!["from the script".to_string()]);

        let without = make_v_result(
            &StubComponent,
            &data,
            &shape,
            SHACL_JS_VOCAB.js_constraint.clone().into(),
            &focus,
            None,
            None,
            Vec::new(),
        );
        assert_eq!(without.messages, vec!["generic".to_string()]);
        assert_eq!(without.result_severity, Severity::Violation);
        assert_eq!(without.focus_node, focus);
    }
}
