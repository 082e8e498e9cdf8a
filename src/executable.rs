//! JS executable references
//!
//! A *JS executable* is an RDF node carrying exactly one
//! `sh:jsFunctionName` and any number of `sh:jsLibrary` references.
//! Libraries may themselves declare further libraries; collection follows
//! direct and one-level-indirect declarations only, deduplicated by node.
//! The descriptor is parsed once at shape load time and reused, unchanged,
//! across every evaluation.

use indexmap::IndexMap;
use oxrdf::Term;

use crate::graph::{literal_string, GraphView};
use crate::script::{ScriptValue, ValidationContext};
use crate::vocabulary::{SHACL_JS_VOCAB, SPEC_JS_EXECUTABLES};
use crate::{Result, ShaclJsError};

/// Immutable descriptor of a JS executable declaration
#[derive(Debug, Clone, PartialEq)]
pub struct JsExecutable {
    /// The source node of the declaration
    pub node: Term,
    /// The script function to invoke
    pub fn_name: String,
    /// Library node → its script URLs, in declaration order
    pub libraries: IndexMap<Term, Vec<String>>,
}

impl JsExecutable {
    /// Parse an executable declaration from the shapes graph.
    pub fn parse(sg: &dyn GraphView, node: &Term) -> Result<Self> {
        let fn_names = sg.objects(node, &SHACL_JS_VOCAB.js_function_name);
        if fn_names.is_empty() {
            return Err(ShaclJsError::constraint_load(
                "At least one sh:jsFunctionName must be present on a JS executable.",
                SPEC_JS_EXECUTABLES,
            ));
        }
        if fn_names.len() > 1 {
            return Err(ShaclJsError::constraint_load(
                "At most one sh:jsFunctionName can be present on a JS executable.",
                SPEC_JS_EXECUTABLES,
            ));
        }
        let fn_name = literal_string(&fn_names[0])
            .ok_or_else(|| {
                ShaclJsError::constraint_load(
                    "sh:jsFunctionName must be an RDF literal with type xsd:string.",
                    SPEC_JS_EXECUTABLES,
                )
            })?
            .to_string();

        let mut libraries = IndexMap::new();
        for library in sg.objects(node, &SHACL_JS_VOCAB.js_library) {
            if libraries.contains_key(&library) {
                continue;
            }
            collect_library(sg, &library, &mut libraries)?;
            for nested in sg.objects(&library, &SHACL_JS_VOCAB.js_library) {
                if libraries.contains_key(&nested) {
                    continue;
                }
                collect_library(sg, &nested, &mut libraries)?;
            }
        }

        Ok(Self {
            node: node.clone(),
            fn_name,
            libraries,
        })
    }

    /// Invoke the named function against the data graph.
    ///
    /// Opens a script context scoped to the shapes and data graphs, loads
    /// every collected library URL in collection order, then calls the
    /// function with the given positional arguments. The raw return value
    /// is passed back unconstrained; script errors propagate unchanged.
    pub fn execute(
        &self,
        ctx: &ValidationContext<'_>,
        args: &[ScriptValue],
    ) -> Result<ScriptValue> {
        let mut script_ctx = ctx.engine.new_context(ctx.shapes_graph, ctx.data_graph)?;
        for urls in self.libraries.values() {
            for url in urls {
                script_ctx.load_library(url)?;
            }
        }
        tracing::debug!(function = %self.fn_name, "invoking JS constraint function");
        script_ctx.call_function(&self.fn_name, args)
    }
}

fn collect_library(
    sg: &dyn GraphView,
    library: &Term,
    libraries: &mut IndexMap<Term, Vec<String>>,
) -> Result<()> {
    if matches!(library, Term::Literal(_)) {
        return Err(ShaclJsError::constraint_load(
            "sh:jsLibrary must not have a value that is a literal.",
            SPEC_JS_EXECUTABLES,
        ));
    }
    let mut urls = Vec::new();
    for url in sg.objects(library, &SHACL_JS_VOCAB.js_library_url) {
        let url = literal_string(&url).ok_or_else(|| {
            ShaclJsError::constraint_load(
                "sh:jsLibraryURL must have a value that is a literal.",
                SPEC_JS_EXECUTABLES,
            )
        })?;
        urls.push(url.to_string());
    }
    libraries.insert(library.clone(), urls);
    Ok(())
}
