mod common;

use std::collections::HashSet;

use common::{ex, foaf, init, lookalikes, people, plain, spl, spo};
use rdfkeeper::{Graph, Identified, KeeperError, Literal, PlainLiteral, Resource, Triple, TypedLiteral};

#[test]
fn alice_and_bob() {
    init();
    let mut graph = Graph::new();
    let knows = spo("alice", "knows", "bob");
    let name = spl("bob", "name", "Bob");
    assert!(graph.add_triple(&knows).unwrap());
    assert!(graph.add_triple(&name).unwrap());
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.select_triples_by_subject(&ex("alice")).len(), 1);
    // adding again changes nothing
    assert!(!graph.add_triple(&knows).unwrap());
    assert_eq!(graph.len(), 2);
}

#[test]
fn add_contains_remove_round_trip() {
    let mut graph = people();
    let triple = spl("dave", "name", "Dave");
    assert!(!graph.contains_triple(&triple));
    graph.add_triple(&triple).unwrap();
    assert!(graph.contains_triple(&triple));
    assert!(graph.remove_triple(&triple));
    assert!(!graph.contains_triple(&triple));
    assert!(!graph.remove_triple(&triple));
    assert_eq!(graph, people());
}

#[test]
fn iteration_rebuilds_every_triple() {
    let graph = people();
    let rebuilt: Vec<Triple> = graph.iter().collect();
    assert_eq!(rebuilt.len(), graph.len());
    for triple in &rebuilt {
        assert!(graph.contains_triple(triple));
        assert_eq!(graph.triple(triple.key()).as_ref(), Some(triple));
    }
    // restartable
    assert_eq!(graph.iter().count(), graph.len());
    assert_eq!((&graph).into_iter().count(), graph.len());
}

#[test]
fn registers_follow_the_triples() {
    let mut graph = people();
    let bob = ex("bob");
    assert!(graph.index().resource(bob.key()).is_some());
    graph.remove_triples_by_subject(&bob);
    // still the object of alice's triple
    assert!(graph.index().resource(bob.key()).is_some());
    graph.remove_triples_by_object(&bob);
    assert!(graph.index().resource(bob.key()).is_none());
    // "Bob" is carol's nick too
    assert!(graph.index().literal(plain("Bob").key()).is_some());
    graph.remove_triples_by_literal(&plain("Bob"));
    assert!(graph.index().literal(plain("Bob").key()).is_none());

    // whatever is left is resolvable, nothing more
    for triple in graph.iter() {
        assert!(graph.index().resource(triple.subject().key()).is_some());
    }
    graph.clear();
    assert!(graph.is_empty());
    assert!(graph.index().resources().is_empty());
    assert!(graph.index().literals().is_empty());
    graph.clear();
    assert!(graph.is_empty());
}

#[test]
fn positional_removal_counts() {
    let mut graph = people();
    assert_eq!(graph.remove_triples_by_predicate(&foaf("knows")), 5);
    assert_eq!(graph.remove_triples_by_predicate(&foaf("knows")), 0);
    assert_eq!(
        graph
            .remove_triples(Some(&ex("alice")), Some(&foaf("name")), None, None)
            .unwrap(),
        1
    );
    assert_eq!(graph.len(), 5);
    assert_eq!(graph.remove_triples(None, None, None, None).unwrap(), 5);
    assert!(graph.is_empty());
}

#[test]
fn objects_of_subject_and_predicate() {
    let graph = people();
    let mut known: Vec<String> = graph
        .objects(&ex("alice"), &foaf("knows"))
        .iter()
        .map(|object| object.to_string())
        .collect();
    known.sort();
    assert_eq!(known, vec!["http://example.org/bob", "http://example.org/carol"]);
    assert!(graph.objects(&ex("nobody"), &foaf("knows")).is_empty());
}

#[test]
fn invalid_terms_never_reach_a_graph() {
    assert!(matches!(
        Resource::new("no scheme here"),
        Err(KeeperError::InvalidIri(_))
    ));
    assert!(matches!(
        Triple::new(ex("a"), Resource::blank(), ex("b")),
        Err(KeeperError::BlankPredicate(_))
    ));
    assert!(matches!(
        PlainLiteral::with_language("x", "12345678901"),
        Err(KeeperError::InvalidLanguageTag(_))
    ));
}

#[test]
fn blank_subjects_are_fine() {
    let mut graph = Graph::new();
    let blank = Resource::new("_:someone").unwrap();
    let triple = Triple::new(blank.clone(), foaf("name"), plain("Anon")).unwrap();
    graph.add_triple(&triple).unwrap();
    assert_eq!(graph.select_triples_by_subject(&blank).len(), 1);
    assert_eq!(
        graph.iter().next().unwrap().subject().iri(),
        "bnode:someone"
    );
}

#[test]
fn from_triples_deduplicates() {
    let triples = [spo("a", "knows", "b"), spo("a", "knows", "b"), spo("b", "knows", "a")];
    let graph = Graph::from_triples(&triples).unwrap();
    assert_eq!(graph.len(), 2);
}

#[test]
fn lookalike_terms_live_side_by_side() {
    init();
    let triples = lookalikes();
    let mut graph = Graph::new();
    for triple in &triples {
        assert!(graph.add_triple(triple).unwrap(), "refused {triple}");
    }
    assert_eq!(graph.len(), triples.len());
    for triple in &triples {
        assert!(graph.contains_triple(triple));
        assert_eq!(graph.triple(triple.key()).as_ref(), Some(triple));
    }

    let glued = plain("chat@fr");
    let tagged: Literal = PlainLiteral::with_language("chat", "fr").unwrap().into();
    assert_eq!(graph.select_triples_by_object(&ex("x")).len(), 1);
    assert_eq!(graph.select_triples_by_literal(&plain("http://example.org/x")).len(), 1);
    assert_eq!(graph.select_triples_by_literal(&glued).len(), 2);
    assert_eq!(graph.select_triples_by_literal(&tagged).len(), 2);
    assert_eq!(graph.select_triples_by_literal(&TypedLiteral::integer(42).into()).len(), 1);
    let nicks = graph
        .select_triples(Some(&ex("s")), Some(&foaf("nick")), None, Some(&tagged))
        .unwrap();
    assert_eq!(nicks.len(), 1);
    assert_eq!(nicks.iter().next().unwrap().object().as_literal(), Some(&tagged));

    // removing one of a pair leaves the other alone
    assert!(graph.remove_triple(&spl("a", "nick", "chat@fr")));
    assert!(graph.remove_triple(&spl("s", "nick", "chat@fr")));
    assert!(graph.index().literal(glued.key()).is_none());
    assert_eq!(graph.index().literal(tagged.key()), Some(&tagged));
    assert_eq!(graph.select_triples_by_literal(&tagged).len(), 2);
    assert_eq!(graph.len(), triples.len() - 2);
}

// Reference count every register entry should carry, computed from the model.
fn expected_references(model: &HashSet<Triple>, key: i64) -> usize {
    model
        .iter()
        .map(|t| {
            usize::from(t.subject().key() == key)
                + usize::from(t.predicate().key() == key)
                + usize::from(t.object().key() == key)
        })
        .sum()
}

fn assert_consistent(graph: &Graph, model: &HashSet<Triple>) {
    assert_eq!(graph.len(), model.len());
    for triple in model {
        assert!(graph.contains_triple(triple), "lost {triple}");
        assert_eq!(graph.triple(triple.key()).as_ref(), Some(triple));
        assert_eq!(graph.index().resource(triple.subject().key()), Some(triple.subject()));
        assert_eq!(graph.index().resource(triple.predicate().key()), Some(triple.predicate()));
    }
    for triple in graph.iter() {
        assert!(model.contains(&triple), "stray {triple}");
    }
    let index = graph.index();
    for resource in index.resources().iter() {
        let key = resource.key();
        let counted = index.select_by_subject(resource).len()
            + index.select_by_predicate(resource).len()
            + index.select_by_object(resource).len();
        assert!(counted > 0, "{resource} kept without a triple");
        assert_eq!(index.resources().references(key), counted);
        assert_eq!(counted, expected_references(model, key));
    }
    for literal in index.literals().iter() {
        let counted = index.select_by_literal(literal).len();
        assert!(counted > 0, "{literal} kept without a triple");
        assert_eq!(index.literals().references(literal.key()), counted);
    }
}

#[test]
fn registers_stay_consistent_through_mixed_edits() {
    let mut pool = vec![
        spo("alice", "knows", "bob"),
        spo("bob", "knows", "carol"),
        spo("carol", "knows", "alice"),
        spo("bob", "knows", "bob"),
        // a predicate used as subject and object
        Triple::new(foaf("knows"), foaf("knows"), ex("alice")).unwrap(),
        Triple::new(foaf("knows"), foaf("knows"), foaf("knows")).unwrap(),
        Triple::new(ex("alice"), foaf("name"), foaf("name")).unwrap(),
        spl("alice", "name", "Alice"),
        spl("carol", "nick", "Alice"),
        Triple::new(ex("bob"), foaf("age"), TypedLiteral::integer(34)).unwrap(),
        Triple::new(ex("carol"), foaf("age"), TypedLiteral::integer(34)).unwrap(),
    ];
    pool.extend(lookalikes());

    let mut graph = Graph::new();
    let mut model: HashSet<Triple> = HashSet::new();
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..600 {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let triple = &pool[((state >> 33) % pool.len() as u64) as usize];
        if (state >> 45) % 3 == 0 {
            assert_eq!(graph.remove_triple(triple), model.remove(triple));
        } else {
            assert_eq!(graph.add_triple(triple).unwrap(), model.insert(triple.clone()));
        }
        assert_consistent(&graph, &model);
    }

    for triple in &pool {
        assert_eq!(graph.remove_triple(triple), model.remove(triple));
        assert_consistent(&graph, &model);
    }
    assert!(graph.is_empty());
    assert!(graph.index().resources().is_empty());
    assert!(graph.index().literals().is_empty());
}
