#![allow(dead_code)]

use rdfkeeper::{Graph, Literal, PlainLiteral, Resource, Triple, TypedLiteral};

pub const EX: &str = "http://example.org/";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("rdfkeeper=debug")
        .with_test_writer()
        .try_init();
}

pub fn ex(local: &str) -> Resource {
    Resource::new(&format!("{EX}{local}")).expect("valid IRI")
}

pub fn foaf(local: &str) -> Resource {
    Resource::new(&format!("{FOAF}{local}")).expect("valid IRI")
}

pub fn plain(value: &str) -> Literal {
    PlainLiteral::new(value).into()
}

pub fn spo(s: &str, p: &str, o: &str) -> Triple {
    Triple::new(ex(s), foaf(p), ex(o)).expect("valid triple")
}

pub fn spl(s: &str, p: &str, l: &str) -> Triple {
    Triple::new(ex(s), foaf(p), plain(l)).expect("valid triple")
}

/// A small social graph: people who know each other, with names and ages.
pub fn people() -> Graph {
    let mut graph = Graph::new();
    let triples = [
        spo("alice", "knows", "bob"),
        spo("alice", "knows", "carol"),
        spo("bob", "knows", "carol"),
        spo("carol", "knows", "alice"),
        spo("bob", "knows", "bob"),
        spl("alice", "name", "Alice"),
        spl("bob", "name", "Bob"),
        spl("carol", "name", "Carol"),
        spl("carol", "nick", "Bob"),
        Triple::new(ex("alice"), foaf("age"), TypedLiteral::integer(34)).expect("valid triple"),
        Triple::new(ex("bob"), foaf("age"), TypedLiteral::integer(34)).expect("valid triple"),
    ];
    for triple in &triples {
        graph.add_triple(triple).expect("no collisions");
    }
    graph
}

/// Pairs of triples whose terms print the same but are different values:
/// an IRI and a string, a glued and a tagged string, a spelled-out and a
/// real typed literal.
pub fn lookalikes() -> Vec<Triple> {
    let see_also = Resource::new("http://www.w3.org/2000/01/rdf-schema#seeAlso").expect("valid IRI");
    let tagged = || PlainLiteral::with_language("chat", "fr").expect("valid tag");
    vec![
        Triple::new(ex("s"), see_also.clone(), ex("x")).expect("valid triple"),
        Triple::new(ex("s"), see_also, plain("http://example.org/x")).expect("valid triple"),
        spl("a", "nick", "chat@fr"),
        Triple::new(ex("b"), foaf("nick"), tagged()).expect("valid triple"),
        spl("s", "nick", "chat@fr"),
        Triple::new(ex("s"), foaf("nick"), tagged()).expect("valid triple"),
        spl("s", "age", "42^^http://www.w3.org/2001/XMLSchema#integer"),
        Triple::new(ex("s"), foaf("age"), TypedLiteral::integer(42)).expect("valid triple"),
    ]
}
