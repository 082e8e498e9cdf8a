//! RDF graph and shape access interfaces
//!
//! The triple store backing shapes and data graphs is an external
//! collaborator. This module defines the narrow surface the JS constraint
//! binding needs from it: object lookup by (subject, predicate), a stable
//! per-graph identity for caching, and a shape view exposing the handful of
//! properties constraint loading relies on. [`MemoryGraph`] is a minimal
//! implementation for tests and small embedders.

use std::sync::atomic::{AtomicU64, Ordering};

use oxrdf::vocab::xsd;
use oxrdf::{NamedNode, Term};

/// Stable identity of a loaded graph, used as a cache key component.
///
/// Two graphs loaded independently must report distinct identities even
/// when their contents are equal; one graph must report the same identity
/// for the lifetime of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphIdentity(pub u64);

/// Read access to an RDF graph
pub trait GraphView {
    /// All objects of triples matching `(subject, predicate, ?)`, in a
    /// deterministic order for one loaded graph.
    fn objects(&self, subject: &Term, predicate: &NamedNode) -> Vec<Term>;

    /// Stable identity of this loaded graph.
    fn identity(&self) -> GraphIdentity;
}

/// Read access to a single shape in a shapes graph
pub trait ShapeView {
    /// The node identifying this shape.
    fn node(&self) -> &Term;

    /// Whether this shape is a property shape (as opposed to a node shape).
    fn is_property_shape(&self) -> bool;

    /// Values of `predicate` on the shape node.
    fn objects(&self, predicate: &NamedNode) -> Vec<Term>;

    /// The shapes graph this shape was loaded from.
    fn shapes_graph(&self) -> &dyn GraphView;
}

/// A shape view backed directly by a [`GraphView`]
#[derive(Clone)]
pub struct ShapeHandle<'a> {
    graph: &'a dyn GraphView,
    node: Term,
    property_shape: bool,
}

impl<'a> ShapeHandle<'a> {
    pub fn new(graph: &'a dyn GraphView, node: Term, property_shape: bool) -> Self {
        Self {
            graph,
            node,
            property_shape,
        }
    }

    pub fn node_shape(graph: &'a dyn GraphView, node: Term) -> Self {
        Self::new(graph, node, false)
    }

    pub fn property_shape(graph: &'a dyn GraphView, node: Term) -> Self {
        Self::new(graph, node, true)
    }
}

impl ShapeView for ShapeHandle<'_> {
    fn node(&self) -> &Term {
        &self.node
    }

    fn is_property_shape(&self) -> bool {
        self.property_shape
    }

    fn objects(&self, predicate: &NamedNode) -> Vec<Term> {
        self.graph.objects(&self.node, predicate)
    }

    fn shapes_graph(&self) -> &dyn GraphView {
        self.graph
    }
}

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Minimal in-memory graph, preserving triple insertion order
#[derive(Debug)]
pub struct MemoryGraph {
    id: GraphIdentity,
    triples: Vec<(Term, NamedNode, Term)>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self {
            id: GraphIdentity(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed)),
            triples: Vec::new(),
        }
    }

    /// Add a triple. An RDF graph is a set of triples, so inserting a
    /// triple already present is a no-op.
    pub fn insert(&mut self, subject: Term, predicate: NamedNode, object: Term) {
        let triple = (subject, predicate, object);
        if !self.triples.contains(&triple) {
            self.triples.push(triple);
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphView for MemoryGraph {
    fn objects(&self, subject: &Term, predicate: &NamedNode) -> Vec<Term> {
        self.triples
            .iter()
            .filter(|(s, p, _)| s == subject && p == predicate)
            .map(|(_, _, o)| o.clone())
            .collect()
    }

    fn identity(&self) -> GraphIdentity {
        self.id
    }
}

/// The string value of a string-typed literal, or `None` for any other term.
///
/// Language-tagged literals count as string-typed; IRIs, blank nodes and
/// literals of other datatypes do not.
pub fn literal_string(term: &Term) -> Option<&str> {
    match term {
        Term::Literal(lit) if lit.datatype() == xsd::STRING || lit.language().is_some() => {
            Some(lit.value())
        }
        _ => None,
    }
}

/// The boolean value of a boolean-typed literal, or `None`.
pub(crate) fn literal_boolean(term: &Term) -> Option<bool> {
    match term {
        Term::Literal(lit) if lit.datatype() == xsd::BOOLEAN || lit.datatype() == xsd::STRING => {
            match lit.value() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{BlankNode, Literal};

    fn iri(s: &str) -> NamedNode {
        NamedNode::new_unchecked(s)
    }

    #[test]
    fn objects_preserve_insertion_order() {
        let mut graph = MemoryGraph::new();
        let s = Term::from(iri("http://example.org/s"));
        let p = iri("http://example.org/p");
        graph.insert(s.clone(), p.clone(), Term::from(Literal::new_simple_literal("a")));
        graph.insert(s.clone(), p.clone(), Term::from(Literal::new_simple_literal("b")));
        graph.insert(
            s.clone(),
            iri("http://example.org/other"),
            Term::from(Literal::new_simple_literal("c")),
        );

        let objects = graph.objects(&s, &p);
        assert_eq!(objects.len(), 2);
        assert_eq!(literal_string(&objects[0]), Some("a"));
        assert_eq!(literal_string(&objects[1]), Some("b"));
    }

    #[test]
    fn inserting_the_same_triple_twice_keeps_one_copy() {
        let mut graph = MemoryGraph::new();
        let s = Term::from(iri("http://example.org/s"));
        let p = iri("http://example.org/p");
        let o = Term::from(Literal::new_simple_literal("a"));
        graph.insert(s.clone(), p.clone(), o.clone());
        graph.insert(s.clone(), p.clone(), o);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.objects(&s, &p).len(), 1);
    }

    #[test]
    fn independent_graphs_have_distinct_identities() {
        let g1 = MemoryGraph::new();
        let g2 = MemoryGraph::new();
        assert_ne!(g1.identity(), g2.identity());
        assert_eq!(g1.identity(), g1.identity());
    }

    #[test]
    fn literal_string_rejects_non_string_terms() {
        assert_eq!(
            literal_string(&Term::from(Literal::new_simple_literal("ok"))),
            Some("ok")
        );
        assert_eq!(
            literal_string(&Term::from(Literal::new_language_tagged_literal_unchecked(
                "bonjour", "fr"
            ))),
            Some("bonjour")
        );
        assert_eq!(literal_string(&Term::from(iri("http://example.org/x"))), None);
        assert_eq!(literal_string(&Term::from(BlankNode::default())), None);
        assert_eq!(
            literal_string(&Term::from(Literal::new_typed_literal("5", xsd::INTEGER))),
            None
        );
    }

    #[test]
    fn shape_handle_reads_through_to_graph() {
        let mut graph = MemoryGraph::new();
        let shape_node = Term::from(iri("http://example.org/shape"));
        let p = iri("http://example.org/p");
        graph.insert(
            shape_node.clone(),
            p.clone(),
            Term::from(Literal::new_simple_literal("v")),
        );

        let shape = ShapeHandle::property_shape(&graph, shape_node.clone());
        assert!(shape.is_property_shape());
        assert_eq!(shape.node(), &shape_node);
        assert_eq!(shape.objects(&p).len(), 1);
        assert_eq!(shape.shapes_graph().identity(), graph.identity());
    }
}
