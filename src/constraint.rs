//! The shape-local `sh:js` constraint
//!
//! A shape may carry one or more `sh:js` declarations, each pointing at a
//! JS executable. Evaluation runs every executable once per (focus, value)
//! pair and interprets the raw return value through
//! [`interpret_constraint_result`]; the shape is non-conformant if any
//! executable produced any failing element for any pair.

use oxrdf::{NamedNode, Term};

use crate::executable::JsExecutable;
use crate::graph::{GraphView, ShapeView};
use crate::interpret::interpret_constraint_result;
use crate::report::{make_v_result, ConstraintComponent, FocusValueMap, ValidationResult};
use crate::script::{ScriptValue, ValidationContext};
use crate::vocabulary::{SHACL_JS_VOCAB, SPEC_JS_CONSTRAINTS};
use crate::{Result, ShaclJsError};

/// Constraint attached to a shape via `sh:js`
#[derive(Debug, Clone)]
pub struct JsConstraint {
    source_shape: Term,
    property_shape: bool,
    js_exes: Vec<JsExecutable>,
}

impl JsConstraint {
    /// Parse the constraint from a shape's `sh:js` declarations.
    ///
    /// At least one declaration must be present; each is parsed into a
    /// [`JsExecutable`] at load time and reused for every evaluation.
    pub fn parse(shape: &dyn ShapeView) -> Result<Self> {
        let declarations = shape.objects(&SHACL_JS_VOCAB.js);
        if declarations.is_empty() {
            return Err(ShaclJsError::constraint_load(
                "JSConstraint must have at least one sh:js predicate.",
                SPEC_JS_CONSTRAINTS,
            ));
        }
        let js_exes = declarations
            .iter()
            .map(|node| JsExecutable::parse(shape.shapes_graph(), node))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            source_shape: shape.node().clone(),
            property_shape: shape.is_property_shape(),
            js_exes,
        })
    }

    /// The executables declared on the shape, in declaration order.
    pub fn executables(&self) -> &[JsExecutable] {
        &self.js_exes
    }

    fn evaluate_executable(
        &self,
        ctx: &ValidationContext<'_>,
        exe: &JsExecutable,
        focus_value_nodes: &FocusValueMap,
        reports: &mut Vec<ValidationResult>,
    ) -> Result<bool> {
        let mut non_conformant = false;
        for (focus, value_nodes) in focus_value_nodes {
            for value in value_nodes {
                let raw = exe.execute(
                    ctx,
                    &[
                        ScriptValue::Term(focus.clone()),
                        ScriptValue::Term(value.clone()),
                    ],
                )?;
                let details = interpret_constraint_result(&raw, self.property_shape);
                non_conformant = non_conformant || !details.is_empty();
                for detail in details {
                    reports.push(make_v_result(
                        self,
                        ctx.data_graph,
                        &self.source_shape,
                        self.shacl_constraint_class().into(),
                        focus,
                        Some(detail.value.unwrap_or_else(|| value.clone())),
                        detail.path,
                        detail.messages,
                    ));
                }
            }
        }
        Ok(non_conformant)
    }
}

impl ConstraintComponent for JsConstraint {
    fn constraint_parameters(&self) -> Vec<NamedNode> {
        vec![SHACL_JS_VOCAB.js.clone()]
    }

    fn constraint_name(&self) -> &'static str {
        "JSConstraint"
    }

    fn shacl_constraint_class(&self) -> NamedNode {
        SHACL_JS_VOCAB.js_constraint.clone()
    }

    fn make_generic_messages(
        &self,
        _data_graph: &dyn GraphView,
        _focus: &Term,
        _value: Option<&Term>,
    ) -> Vec<String> {
        vec!["Javascript Function generated constraint validation reports.".to_string()]
    }

    fn evaluate(
        &self,
        ctx: &ValidationContext<'_>,
        focus_value_nodes: &FocusValueMap,
        _evaluation_path: &[Term],
    ) -> Result<(bool, Vec<ValidationResult>)> {
        let mut reports = Vec::new();
        let mut non_conformant = false;
        for exe in &self.js_exes {
            let failed = self.evaluate_executable(ctx, exe, focus_value_nodes, &mut reports)?;
            non_conformant = non_conformant || failed;
        }
        Ok((!non_conformant, reports))
    }
}
