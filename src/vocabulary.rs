//! SHACL and SHACL-JS vocabulary terms
//!
//! Predicates and classes used by the JS constraint binding, pre-built once
//! and shared through [`SHACL_JS_VOCAB`].

use once_cell::sync::Lazy;
use oxrdf::NamedNode;

use crate::SHACL_NS;

/// Specification link for JS executable declarations
pub const SPEC_JS_EXECUTABLES: &str = "https://www.w3.org/TR/shacl-js/#dfn-javascript-executables";

/// Specification link for shape-local JS constraints
pub const SPEC_JS_CONSTRAINTS: &str = "https://www.w3.org/TR/shacl-js/#js-constraints";

/// Specification link for constraint-component declarations
pub const SPEC_CONSTRAINT_COMPONENT: &str = "https://www.w3.org/TR/shacl/#ConstraintComponent";

/// Specification link for the validator selection rules
pub const SPEC_COMPONENT_VALIDATORS: &str =
    "https://www.w3.org/TR/shacl/#constraint-components-validators";

/// Vocabulary terms for the SHACL-JS binding
#[derive(Debug, Clone)]
pub struct ShaclJsVocabulary {
    /// `sh:js`: attaches a JS executable to a shape
    pub js: NamedNode,
    /// `sh:jsFunctionName`: the name of the script function to invoke
    pub js_function_name: NamedNode,
    /// `sh:jsLibrary`: a script library required by an executable
    pub js_library: NamedNode,
    /// `sh:jsLibraryURL`: a URL naming a script resource of a library
    pub js_library_url: NamedNode,
    /// `sh:message`: human-readable result message
    pub message: NamedNode,
    /// `sh:path`: the path of a component parameter
    pub path: NamedNode,
    /// `sh:optional`: marks a component parameter as optional
    pub optional: NamedNode,
    /// `sh:parameter`: a parameter declaration on a component
    pub parameter: NamedNode,
    /// `sh:validator`: a generic validator of a component
    pub validator: NamedNode,
    /// `sh:nodeValidator`: a node-shape-scoped validator
    pub node_validator: NamedNode,
    /// `sh:propertyValidator`: a property-shape-scoped validator
    pub property_validator: NamedNode,
    /// `sh:JSConstraint`: the constraint class of `sh:js`
    pub js_constraint: NamedNode,
    /// `sh:JSConstraintComponent`: the reusable component class
    pub js_constraint_component: NamedNode,
    /// `sh:ConstraintComponent`: the generic component class
    pub constraint_component: NamedNode,
}

impl ShaclJsVocabulary {
    pub fn new() -> Self {
        let term = |local: &str| NamedNode::new_unchecked(format!("{SHACL_NS}{local}"));
        Self {
            js: term("js"),
            js_function_name: term("jsFunctionName"),
            js_library: term("jsLibrary"),
            js_library_url: term("jsLibraryURL"),
            message: term("message"),
            path: term("path"),
            optional: term("optional"),
            parameter: term("parameter"),
            validator: term("validator"),
            node_validator: term("nodeValidator"),
            property_validator: term("propertyValidator"),
            js_constraint: term("JSConstraint"),
            js_constraint_component: term("JSConstraintComponent"),
            constraint_component: term("ConstraintComponent"),
        }
    }
}

impl Default for ShaclJsVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared vocabulary instance
pub static SHACL_JS_VOCAB: Lazy<ShaclJsVocabulary> = Lazy::new(ShaclJsVocabulary::new);
