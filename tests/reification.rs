mod common;

use common::{ex, foaf, plain, spl, spo};
use rdfkeeper::vocab::{rdf, rdfs};
use rdfkeeper::{
    dereify_statement, dereify_triple_term, Context, Graph, Identified, Quadruple, Resource,
    Term, Triple,
};

fn vocab(iri: &str) -> Resource {
    Resource::new(iri).unwrap()
}

#[test]
fn statement_shape() {
    let triple = spo("alice", "knows", "bob");
    let annotations = [(vocab(rdfs::COMMENT), Term::from(plain("since 2020")))];
    let graph = triple.reify(&annotations).unwrap();
    assert_eq!(graph.len(), 5);
    let anchor = triple.reification_anchor();
    assert_eq!(anchor.iri(), format!("bnode:{}", triple.identity()));
    assert_eq!(graph.select_triples_by_subject(&anchor).len(), 5);
    assert_eq!(
        graph.objects(&anchor, &vocab(rdf::TYPE)),
        vec![Term::from(vocab(rdf::STATEMENT))]
    );
    assert_eq!(dereify_statement(&graph, &anchor), Some(triple));
}

#[test]
fn triple_term_shape() {
    let triple = spl("alice", "name", "Alice");
    let graph = triple.reify_as_triple_term(&[]).unwrap();
    assert_eq!(graph.len(), 5);
    let anchor = triple.reification_anchor();
    let node = Resource::new(&format!("bnode:tt{}", triple.identity())).unwrap();
    assert_eq!(graph.objects(&anchor, &vocab(rdf::REIFIES)), vec![Term::from(node.clone())]);
    assert_eq!(graph.select_triples_by_subject(&node).len(), 4);
    assert_eq!(dereify_triple_term(&graph, &anchor), Some(triple.clone()));
    // the classic reading does not apply
    assert_eq!(dereify_statement(&graph, &anchor), None);
}

#[test]
fn incomplete_descriptions_are_not_statements() {
    let triple = spo("alice", "knows", "bob");
    let mut graph = triple.reify(&[]).unwrap();
    let anchor = triple.reification_anchor();
    let object = Triple::new(anchor.clone(), vocab(rdf::OBJECT), ex("bob")).unwrap();
    assert!(graph.remove_triple(&object));
    assert_eq!(dereify_statement(&graph, &anchor), None);

    // two objects are as bad as none
    graph.add_triple(&object).unwrap();
    graph
        .add_triple(&Triple::new(anchor.clone(), vocab(rdf::OBJECT), ex("carol")).unwrap())
        .unwrap();
    assert_eq!(dereify_statement(&graph, &anchor), None);

    assert_eq!(dereify_statement(&Graph::new(), &anchor), None);
    assert_eq!(dereify_triple_term(&Graph::new(), &anchor), None);
}

#[test]
fn reifications_merge_into_the_source_graph() {
    let mut graph = common::people();
    let before = graph.len();
    let knows = spo("alice", "knows", "bob");
    graph = graph.union(Some(&knows.reify(&[]).unwrap())).unwrap();
    graph = graph.union(Some(&knows.reify(&[]).unwrap())).unwrap();
    assert_eq!(graph.len(), before + 4);
    assert_eq!(graph.select_triples_by_predicate(&foaf("knows")).len(), 5);
}

#[test]
fn quadruples_reify_in_their_context() {
    let context = Context::new("http://example.org/graphs/social").unwrap();
    let quadruple = Quadruple::from_triple(context.clone(), spo("alice", "knows", "bob"));
    let store = quadruple
        .reify(&[(vocab(rdfs::LABEL), Term::from(plain("friendship")))])
        .unwrap();
    assert_eq!(store.len(), 5);
    assert_eq!(store.contexts(), vec![context.clone()]);
    let graph = store.extract_graph(&context);
    let anchor = quadruple.reification_anchor();
    assert_eq!(anchor.iri(), format!("bnode:{}", quadruple.identity()));
    assert_eq!(dereify_statement(&graph, &anchor).as_ref(), Some(quadruple.triple()));
    assert_eq!(
        dereify_statement(&graph, &quadruple.triple().reification_anchor()),
        None
    );
}
