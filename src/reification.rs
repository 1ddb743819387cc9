//! Statements about statements.
//!
//! Two shapes are produced. The classic one describes the triple with an
//! `rdf:Statement` node carrying `rdf:subject`, `rdf:predicate` and
//! `rdf:object`. The triple-term one points from the anchor through
//! `rdf:reifies` to an `rdf:TripleTerm` node carrying `rdf:ttSubject`,
//! `rdf:ttPredicate` and `rdf:ttObject`. Both anchors are blank nodes named
//! after the identity of the described statement (the quadruple's, when a
//! quadruple is reified), so reifying the same statement twice yields the
//! same triples while the same triple in two contexts gets two anchors.

use crate::error::{KeeperError, Result};
use crate::graph::Graph;
use crate::identity::{Identified, Identity};
use crate::store::MemoryStore;
use crate::term::{Resource, Term, BLANK_SCHEME};
use crate::triple::{Quadruple, Triple};
use crate::vocab::rdf;

/// An annotation on a reification anchor: predicate and object.
pub type Annotation = (Resource, Term);

fn anchor_for(identity: Identity) -> Resource {
    Resource::trusted(&format!("{BLANK_SCHEME}{identity}"))
}
fn triple_term_node_for(identity: Identity) -> Resource {
    Resource::trusted(&format!("{BLANK_SCHEME}tt{identity}"))
}

impl Triple {
    /// The blank node standing for this triple in its reifications.
    pub fn reification_anchor(&self) -> Resource {
        anchor_for(self.identity())
    }

    pub fn reify(&self, annotations: &[Annotation]) -> Result<Graph> {
        let mut graph = Graph::new();
        for triple in self.statement_shape(self.reification_anchor(), annotations)? {
            graph.insert(&triple);
        }
        Ok(graph)
    }

    pub fn reify_as_triple_term(&self, annotations: &[Annotation]) -> Result<Graph> {
        let mut graph = Graph::new();
        let node = triple_term_node_for(self.identity());
        for triple in self.triple_term_shape(self.reification_anchor(), node, annotations)? {
            graph.insert(&triple);
        }
        Ok(graph)
    }

    fn statement_shape(&self, anchor: Resource, annotations: &[Annotation]) -> Result<Vec<Triple>> {
        let mut shape = vec![
            Triple::assemble(
                anchor.clone(),
                Resource::trusted(rdf::TYPE),
                Resource::trusted(rdf::STATEMENT).into(),
            ),
            Triple::assemble(
                anchor.clone(),
                Resource::trusted(rdf::SUBJECT),
                self.subject().clone().into(),
            ),
            Triple::assemble(
                anchor.clone(),
                Resource::trusted(rdf::PREDICATE),
                self.predicate().clone().into(),
            ),
            Triple::assemble(
                anchor.clone(),
                Resource::trusted(rdf::OBJECT),
                self.object().clone(),
            ),
        ];
        shape.extend(annotate(&anchor, annotations)?);
        Ok(shape)
    }

    fn triple_term_shape(
        &self,
        anchor: Resource,
        node: Resource,
        annotations: &[Annotation],
    ) -> Result<Vec<Triple>> {
        let mut shape = vec![
            Triple::assemble(
                anchor.clone(),
                Resource::trusted(rdf::REIFIES),
                node.clone().into(),
            ),
            Triple::assemble(
                node.clone(),
                Resource::trusted(rdf::TYPE),
                Resource::trusted(rdf::TRIPLE_TERM).into(),
            ),
            Triple::assemble(
                node.clone(),
                Resource::trusted(rdf::TT_SUBJECT),
                self.subject().clone().into(),
            ),
            Triple::assemble(
                node.clone(),
                Resource::trusted(rdf::TT_PREDICATE),
                self.predicate().clone().into(),
            ),
            Triple::assemble(node, Resource::trusted(rdf::TT_OBJECT), self.object().clone()),
        ];
        shape.extend(annotate(&anchor, annotations)?);
        Ok(shape)
    }
}

fn annotate(anchor: &Resource, annotations: &[Annotation]) -> Result<Vec<Triple>> {
    annotations
        .iter()
        .map(|(predicate, object)| {
            if predicate.is_blank() {
                return Err(KeeperError::BlankPredicate(predicate.to_string()));
            }
            Ok(Triple::assemble(anchor.clone(), predicate.clone(), object.clone()))
        })
        .collect()
}

impl Quadruple {
    /// The blank node standing for this quadruple in its reifications. It
    /// differs from the anchor of the bare triple and between contexts.
    pub fn reification_anchor(&self) -> Resource {
        anchor_for(self.identity())
    }

    /// Reifies the triple, keeping the description in this quadruple's context.
    pub fn reify(&self, annotations: &[Annotation]) -> Result<MemoryStore> {
        let shape = self
            .triple()
            .statement_shape(self.reification_anchor(), annotations)?;
        Ok(self.contextualize(shape))
    }

    pub fn reify_as_triple_term(&self, annotations: &[Annotation]) -> Result<MemoryStore> {
        let node = triple_term_node_for(self.identity());
        let shape = self
            .triple()
            .triple_term_shape(self.reification_anchor(), node, annotations)?;
        Ok(self.contextualize(shape))
    }

    fn contextualize(&self, shape: Vec<Triple>) -> MemoryStore {
        let mut store = MemoryStore::new();
        for triple in shape {
            store.insert(&Quadruple::from_triple(self.context().clone(), triple));
        }
        store
    }
}

/// Rebuilds the triple described by an `rdf:Statement` node.
pub fn dereify_statement(graph: &Graph, anchor: &Resource) -> Option<Triple> {
    if !is_a(graph, anchor, rdf::STATEMENT) {
        return None;
    }
    describe(graph, anchor, rdf::SUBJECT, rdf::PREDICATE, rdf::OBJECT)
}

/// Rebuilds the triple an anchor `rdf:reifies`.
pub fn dereify_triple_term(graph: &Graph, anchor: &Resource) -> Option<Triple> {
    graph
        .objects(anchor, &Resource::trusted(rdf::REIFIES))
        .iter()
        .filter_map(Term::as_resource)
        .filter(|node| is_a(graph, node, rdf::TRIPLE_TERM))
        .find_map(|node| {
            describe(graph, node, rdf::TT_SUBJECT, rdf::TT_PREDICATE, rdf::TT_OBJECT)
        })
}

fn is_a(graph: &Graph, node: &Resource, class: &str) -> bool {
    graph
        .objects(node, &Resource::trusted(rdf::TYPE))
        .iter()
        .any(|object| object.as_resource().is_some_and(|r| r.iri() == class))
}

// Each position must be stated exactly once.
fn describe(
    graph: &Graph,
    node: &Resource,
    subject: &str,
    predicate: &str,
    object: &str,
) -> Option<Triple> {
    let single = |property: &str| -> Option<Term> {
        let mut objects = graph.objects(node, &Resource::trusted(property));
        if objects.len() == 1 { objects.pop() } else { None }
    };
    let subject = single(subject)?.as_resource()?.clone();
    let predicate = single(predicate)?.as_resource()?.clone();
    Triple::new(subject, predicate, single(object)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Context, PlainLiteral};

    fn sample() -> Triple {
        Triple::new(
            Resource::new("http://example.org/alice").unwrap(),
            Resource::new("http://xmlns.com/foaf/0.1/name").unwrap(),
            PlainLiteral::new("Alice"),
        )
        .unwrap()
    }

    #[test]
    fn anchors_are_named_after_the_triple() {
        let triple = sample();
        let anchor = triple.reification_anchor();
        assert!(anchor.is_blank());
        assert_eq!(anchor.iri(), format!("bnode:{}", triple.identity()));
        assert_eq!(triple.reify(&[]).unwrap(), triple.reify(&[]).unwrap());
    }

    #[test]
    fn blank_annotation_predicates_are_refused() {
        let annotations = [(Resource::blank(), Term::from(PlainLiteral::new("x")))];
        assert!(matches!(
            sample().reify(&annotations),
            Err(KeeperError::BlankPredicate(_))
        ));
    }

    #[test]
    fn quadruple_reification_stays_in_context() {
        let context = Context::new("http://example.org/g").unwrap();
        let quadruple = Quadruple::from_triple(context.clone(), sample());
        let store = quadruple.reify_as_triple_term(&[]).unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(store.contexts(), vec![context.clone()]);
        let anchor = quadruple.reification_anchor();
        assert_eq!(anchor.iri(), format!("bnode:{}", quadruple.identity()));
        assert_ne!(anchor, sample().reification_anchor());
        assert_eq!(store.select_quadruples_by_subject(&anchor).len(), 1);
    }

    #[test]
    fn one_triple_in_two_contexts_gets_two_anchors() {
        let first = Quadruple::from_triple(Context::new("http://example.org/g1").unwrap(), sample());
        let second = Quadruple::from_triple(Context::new("http://example.org/g2").unwrap(), sample());
        assert_ne!(first.reification_anchor(), second.reification_anchor());

        let mut merged = first.reify(&[]).unwrap();
        let other = second.reify(&[]).unwrap();
        merged = merged.union(Some(&other)).unwrap();
        assert_eq!(merged.len(), 8);
        let statement = Resource::trusted(rdf::STATEMENT);
        let typed = merged
            .select_quadruples(None, None, Some(&Resource::trusted(rdf::TYPE)), Some(&statement), None)
            .unwrap();
        assert_eq!(typed.len(), 2);

        for quadruple in [&first, &second] {
            let graph = merged.extract_graph(quadruple.context());
            assert_eq!(
                dereify_statement(&graph, &quadruple.reification_anchor()),
                Some(sample())
            );
        }
    }
}
