mod common;

use common::{ex, foaf, people, spl, spo};
use rdfkeeper::{Graph, Identified};

fn left() -> Graph {
    Graph::from_triples(&[
        spo("alice", "knows", "bob"),
        spo("bob", "knows", "carol"),
        spl("alice", "name", "Alice"),
    ])
    .unwrap()
}

fn right() -> Graph {
    Graph::from_triples(&[
        spo("bob", "knows", "carol"),
        spl("alice", "name", "Alice"),
        spl("carol", "name", "Carol"),
        spl("dave", "name", "Dave"),
    ])
    .unwrap()
}

#[test]
fn union_is_commutative_and_idempotent() {
    let (a, b) = (left(), right());
    let ab = a.union(Some(&b)).unwrap();
    assert_eq!(ab.len(), 5);
    assert_eq!(ab, b.union(Some(&a)).unwrap());
    assert_eq!(a.union(Some(&a)).unwrap(), a);
    assert_eq!(a.union(None).unwrap(), a);
}

#[test]
fn intersect_is_commutative() {
    let (a, b) = (left(), right());
    let ab = a.intersect(Some(&b));
    assert_eq!(ab.len(), 2);
    assert_eq!(ab, b.intersect(Some(&a)));
    assert!(ab.contains_triple(&spo("bob", "knows", "carol")));
    assert!(a.intersect(None).is_empty());
}

#[test]
fn difference_laws() {
    let (a, b) = (left(), right());
    assert!(a.difference(Some(&a)).is_empty());
    assert_eq!(a.difference(None), a);
    let only_left = a.difference(Some(&b));
    assert_eq!(only_left.len(), 1);
    assert!(only_left.contains_triple(&spo("alice", "knows", "bob")));
    // (a - b) + (a & b) = a
    assert_eq!(only_left.union(Some(&a.intersect(Some(&b)))).unwrap(), a);
}

#[test]
fn results_are_independent_graphs() {
    let a = left();
    let mut copy = a.union(None).unwrap();
    copy.clear();
    assert_eq!(a.len(), 3);
    // registers of derived graphs only hold their own terms
    let everyone = people();
    let acquaintances = everyone.select_triples_by_predicate(&foaf("knows"));
    let rest = everyone.difference(Some(&acquaintances));
    assert_eq!(rest.len(), 6);
    assert!(rest.index().resource(foaf("knows").key()).is_none());
    assert!(acquaintances.index().literals().is_empty());
}

#[test]
fn equality_ignores_the_context_label() {
    let labeled = left().with_context(ex("graphs/left"));
    assert_eq!(labeled, left());
    assert_ne!(left(), right());
    assert_eq!(Graph::new(), Graph::default());
}
