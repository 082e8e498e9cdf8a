//! Reusable JS constraint components
//!
//! A constraint component is declared once in a shapes graph and reused by
//! any number of shapes. It carries parameter declarations plus up to three
//! validator variants: generic (`sh:validator`), node-shape-scoped
//! (`sh:nodeValidator`) and property-shape-scoped (`sh:propertyValidator`).
//! Applying a component to a shape selects one variant by a fixed
//! precedence rule, binds the shape's parameter values, and yields a
//! [`BoundJsValidator`] that evaluates once per focus node.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use oxrdf::{NamedNode, Term};

use crate::executable::JsExecutable;
use crate::graph::{literal_boolean, literal_string, GraphIdentity, GraphView, ShapeView};
use crate::report::{make_v_result, ConstraintComponent, FocusValueMap, ValidationResult};
use crate::script::{ScriptValue, ValidationContext};
use crate::vocabulary::{
    SHACL_JS_VOCAB, SPEC_COMPONENT_VALIDATORS, SPEC_CONSTRAINT_COMPONENT,
};
use crate::{Result, ShaclJsError};

/// Parameter names reserved for the engine's own bindings
pub const INVALID_PARAMETER_NAMES: [&str; 6] =
    ["this", "shapesGraph", "currentShape", "path", "PATH", "value"];

/// One declared parameter of a constraint component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentParameter {
    /// The parameter declaration node
    pub node: Term,
    /// The predicate shapes use to supply a value
    pub path: NamedNode,
    /// Whether a shape may omit this parameter
    pub optional: bool,
}

impl ComponentParameter {
    pub fn new(node: Term, path: NamedNode, optional: bool) -> Self {
        Self {
            node,
            path,
            optional,
        }
    }

    /// Parse a parameter declaration from the shapes graph.
    pub fn parse(sg: &dyn GraphView, node: &Term) -> Result<Self> {
        let paths = sg.objects(node, &SHACL_JS_VOCAB.path);
        let path = match paths.into_iter().next() {
            Some(Term::NamedNode(path)) => path,
            _ => {
                return Err(ShaclJsError::constraint_load(
                    "A component parameter must have exactly one sh:path with an IRI value.",
                    SPEC_CONSTRAINT_COMPONENT,
                ))
            }
        };
        let optional = sg
            .objects(node, &SHACL_JS_VOCAB.optional)
            .first()
            .and_then(literal_boolean)
            .unwrap_or(false);
        Ok(Self::new(node.clone(), path, optional))
    }

    /// The local name of the parameter path, used as its binding name.
    pub fn local_name(&self) -> &str {
        let iri = self.path.as_str();
        iri.rsplit(['#', '/']).next().unwrap_or(iri)
    }
}

/// A reusable constraint component declaration
#[derive(Debug, Clone)]
pub struct JsConstraintComponent {
    /// The component node
    pub node: Term,
    /// Declared parameters, in declaration order
    pub parameters: Vec<ComponentParameter>,
    /// Generic validator variants
    pub validators: Vec<Term>,
    /// Node-shape-scoped validator variants
    pub node_validators: Vec<Term>,
    /// Property-shape-scoped validator variants
    pub property_validators: Vec<Term>,
}

impl JsConstraintComponent {
    pub fn new(
        node: Term,
        parameters: Vec<ComponentParameter>,
        validators: Vec<Term>,
        node_validators: Vec<Term>,
        property_validators: Vec<Term>,
    ) -> Self {
        Self {
            node,
            parameters,
            validators,
            node_validators,
            property_validators,
        }
    }

    /// Parse a component declaration from the shapes graph.
    pub fn parse(sg: &dyn GraphView, node: &Term) -> Result<Self> {
        let parameters = sg
            .objects(node, &SHACL_JS_VOCAB.parameter)
            .iter()
            .map(|p| ComponentParameter::parse(sg, p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(
            node.clone(),
            parameters,
            sg.objects(node, &SHACL_JS_VOCAB.validator),
            sg.objects(node, &SHACL_JS_VOCAB.node_validator),
            sg.objects(node, &SHACL_JS_VOCAB.property_validator),
        ))
    }

    /// Select and bind a validator for a concrete shape.
    ///
    /// Precedence: a property shape takes the first property-scoped
    /// variant; a node shape takes the first node-scoped variant; either
    /// falls back to the first generic variant; with no variant left the
    /// component cannot apply to the shape.
    pub fn make_validator_for_shape(
        &self,
        shape: &dyn ShapeView,
        cache: &mut ValidatorCache,
    ) -> Result<BoundJsValidator> {
        let validator_node = if shape.is_property_shape() && !self.property_validators.is_empty() {
            &self.property_validators[0]
        } else if !shape.is_property_shape() && !self.node_validators.is_empty() {
            &self.node_validators[0]
        } else if !self.validators.is_empty() {
            &self.validators[0]
        } else {
            return Err(ShaclJsError::constraint_load(
                "Cannot select a validator to use, according to the rules.",
                SPEC_COMPONENT_VALIDATORS,
            ));
        };
        let validator = cache.get_or_parse(shape.shapes_graph(), validator_node)?;
        BoundJsValidator::bind(self, shape, validator)
    }
}

/// Cache of parsed component validators
///
/// A validator definition may be referenced by many shapes; parsing its
/// executable and message set once per (shapes graph, validator node) pair
/// keeps one execution-context configuration per definition. The cache is
/// owned by the shapes-graph loading context and never evicts.
#[derive(Debug, Default)]
pub struct ValidatorCache {
    validators: HashMap<(GraphIdentity, String), Arc<JsComponentValidator>>,
}

impl ValidatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached validator for this (graph, node) pair, parsing it on
    /// first use.
    pub fn get_or_parse(
        &mut self,
        sg: &dyn GraphView,
        node: &Term,
    ) -> Result<Arc<JsComponentValidator>> {
        let key = (sg.identity(), node.to_string());
        if let Some(validator) = self.validators.get(&key) {
            return Ok(Arc::clone(validator));
        }
        tracing::debug!(validator = %node, "parsing JS component validator");
        let validator = Arc::new(JsComponentValidator::parse(sg, node)?);
        self.validators.insert(key, Arc::clone(&validator));
        Ok(validator)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// One violation reported by a component validator
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentViolation {
    /// Generic failure; the report value falls back to the default
    Generic,
    /// Overrides extracted from a solution row
    Detailed {
        this: Option<Term>,
        path: Option<Term>,
        value: Option<Term>,
    },
    /// A plain offending value node
    Value(Term),
}

/// A shared, parsed validator definition
#[derive(Debug)]
pub struct JsComponentValidator {
    /// The validator node
    pub node: Term,
    /// `sh:message` literals declared on the validator
    pub messages: Vec<String>,
    executable: JsExecutable,
}

impl JsComponentValidator {
    /// Parse a validator definition from the shapes graph.
    pub fn parse(sg: &dyn GraphView, node: &Term) -> Result<Self> {
        let mut messages = Vec::new();
        for message in sg.objects(node, &SHACL_JS_VOCAB.message) {
            let message = literal_string(&message).ok_or_else(|| {
                ShaclJsError::constraint_load(
                    "Validator sh:message must be an RDF literal of type xsd:string.",
                    SPEC_CONSTRAINT_COMPONENT,
                )
            })?;
            messages.push(message.to_string());
        }
        let executable = JsExecutable::parse(sg, node)?;
        Ok(Self {
            node: node.clone(),
            messages,
            executable,
        })
    }

    pub fn executable(&self) -> &JsExecutable {
        &self.executable
    }

    /// Run the validator for one focus node against its value-node set.
    ///
    /// Each value node is passed to the script function as the first
    /// argument, followed by the bound parameter values in parameter
    /// declaration order. A tabular result contributes one violation per
    /// row: a row carrying only a `value` column is the ordinary case and
    /// names the offending value node directly; a row with `this` or
    /// `path` columns carries overrides; a row with only a `failure`
    /// column is a generic violation. An empty or non-tabular result means
    /// no violation for that value.
    pub fn validate(
        &self,
        ctx: &ValidationContext<'_>,
        _focus: &Term,
        value_nodes: &[Term],
        bindings: &IndexMap<String, Term>,
    ) -> Result<Vec<ComponentViolation>> {
        let mut violations: Vec<ComponentViolation> = Vec::new();
        for value in value_nodes {
            let mut args = Vec::with_capacity(bindings.len() + 1);
            args.push(ScriptValue::Term(value.clone()));
            args.extend(bindings.values().map(|v| ScriptValue::Term(v.clone())));

            let rows = match self.executable.execute(ctx, &args)? {
                ScriptValue::Table(rows) => rows,
                _ => continue,
            };
            for row in &rows {
                let this = row.get("this").and_then(ScriptValue::as_term);
                let path = row.get("path").and_then(ScriptValue::as_term);
                let value = row.get("value").and_then(ScriptValue::as_term);
                let violation = match (this, path, value) {
                    (None, None, Some(value)) => ComponentViolation::Value(value),
                    (None, None, None) if row.contains_key("failure") => {
                        ComponentViolation::Generic
                    }
                    // a row with no recognized column contributes nothing
                    (None, None, None) => continue,
                    (this, path, value) => ComponentViolation::Detailed { this, path, value },
                };
                if !violations.contains(&violation) {
                    violations.push(violation);
                }
            }
        }
        Ok(violations)
    }
}

/// A component validator bound to one shape's parameter values
///
/// Evaluation runs once per focus node; the underlying validator consumes
/// the focus node's full value-node set at once.
#[derive(Debug)]
pub struct BoundJsValidator {
    component_node: Term,
    source_shape: Term,
    property_shape: bool,
    validator: Arc<JsComponentValidator>,
    bindings: IndexMap<String, Term>,
}

impl BoundJsValidator {
    /// Bind a component's parameters against a shape.
    ///
    /// Reserved parameter names and missing mandatory parameters are hard
    /// errors; optional parameters absent from the shape are skipped, and
    /// a multi-valued parameter binds its first value.
    pub fn bind(
        component: &JsConstraintComponent,
        shape: &dyn ShapeView,
        validator: Arc<JsComponentValidator>,
    ) -> Result<Self> {
        let mut bindings = IndexMap::new();
        for parameter in &component.parameters {
            let name = parameter.local_name();
            if INVALID_PARAMETER_NAMES.contains(&name) {
                return Err(ShaclJsError::ReportableRuntime(format!(
                    "Parameter name {name} cannot be used."
                )));
            }
            match shape.objects(&parameter.path).into_iter().next() {
                Some(value) => {
                    bindings.insert(name.to_string(), value);
                }
                None if parameter.optional => {}
                None => {
                    return Err(ShaclJsError::ReportableRuntime(format!(
                        "Shape does not have mandatory parameter {}.",
                        parameter.path
                    )))
                }
            }
        }
        Ok(Self {
            component_node: component.node.clone(),
            source_shape: shape.node().clone(),
            property_shape: shape.is_property_shape(),
            validator,
            bindings,
        })
    }

    /// The bound parameter values, in parameter declaration order.
    pub fn bindings(&self) -> &IndexMap<String, Term> {
        &self.bindings
    }

    /// The shared validator this binding wraps.
    pub fn validator(&self) -> &Arc<JsComponentValidator> {
        &self.validator
    }
}

impl ConstraintComponent for BoundJsValidator {
    fn constraint_parameters(&self) -> Vec<NamedNode> {
        Vec::new()
    }

    fn constraint_name(&self) -> &'static str {
        "ConstraintComponent"
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
        Vec::new()
    }

    fn evaluate(
        &self,
        ctx: &ValidationContext<'_>,
        focus_value_nodes: &FocusValueMap,
        _evaluation_path: &[Term],
    ) -> Result<(bool, Vec<ValidationResult>)> {
        let mut reports = Vec::new();
        let mut non_conformant = false;
        for (focus, value_nodes) in focus_value_nodes {
            let violations = self
                .validator
                .validate(ctx, focus, value_nodes, &self.bindings)?;
            // the default report value: the focus node for node shapes,
            // left to the violation itself for property shapes
            let default_value = if self.property_shape {
                None
            } else {
                Some(focus.clone())
            };
            for violation in violations {
                non_conformant = true;
                let report = match violation {
                    ComponentViolation::Generic => make_v_result(
                        self,
                        ctx.data_graph,
                        &self.source_shape,
                        self.component_node.clone(),
                        focus,
                        default_value.clone(),
                        None,
                        self.validator.messages.clone(),
                    ),
                    ComponentViolation::Detailed { this, path, value } => make_v_result(
                        self,
                        ctx.data_graph,
                        &self.source_shape,
                        self.component_node.clone(),
                        this.as_ref().unwrap_or(focus),
                        value.or_else(|| default_value.clone()),
                        path,
                        self.validator.messages.clone(),
                    ),
                    ComponentViolation::Value(value) => make_v_result(
                        self,
                        ctx.data_graph,
                        &self.source_shape,
                        self.component_node.clone(),
                        focus,
                        Some(value),
                        None,
                        self.validator.messages.clone(),
                    ),
                };
                reports.push(report);
            }
        }
        Ok((!non_conformant, reports))
    }
}
