//! Interpretation of raw constraint return values
//!
//! A constraint function may answer with a boolean, a message string, a
//! record with `value`/`path`/`message` overrides, or a list mixing any of
//! those. Classification maps each of them onto zero or more
//! [`FailureDetail`]s; an empty classification means the pair conformed.

use oxrdf::Term;

use crate::script::ScriptValue;

/// One failing element extracted from a raw script result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FailureDetail {
    /// Replacement value node, when the script named one
    pub value: Option<Term>,
    /// Result path override; never honored for property shapes
    pub path: Option<Term>,
    /// Messages supplied by the script
    pub messages: Vec<String>,
}

/// Classify one raw return value for one (focus, value) pair.
///
/// Returns one detail per failing element; an empty vector is a pass. List
/// results are classified element by element with the scalar rules, each
/// element independent of its neighbors: a `true` entry contributes
/// nothing and never suppresses an unrelated failure.
pub fn interpret_constraint_result(
    result: &ScriptValue,
    property_shape: bool,
) -> Vec<FailureDetail> {
    match result {
        ScriptValue::List(items) => items
            .iter()
            .filter_map(|item| classify_scalar(item, property_shape))
            .collect(),
        scalar => classify_scalar(scalar, property_shape)
            .into_iter()
            .collect(),
    }
}

fn classify_scalar(result: &ScriptValue, property_shape: bool) -> Option<FailureDetail> {
    match result {
        ScriptValue::Boolean(false) => Some(FailureDetail::default()),
        ScriptValue::String(message) => Some(FailureDetail {
            messages: vec![message.clone()],
            ..Default::default()
        }),
        ScriptValue::Record(fields) => {
            let value = fields.get("value").and_then(ScriptValue::as_term);
            let path = if property_shape {
                None
            } else {
                fields.get("path").and_then(ScriptValue::as_term)
            };
            let messages = fields
                .get("message")
                .and_then(ScriptValue::as_message)
                .into_iter()
                .collect();
            Some(FailureDetail {
                value,
                path,
                messages,
            })
        }
        // true, and anything unrecognized, reaches no failure path
        _ => None,
    }
}
