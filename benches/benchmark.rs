use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rdfkeeper::result_set::ResultSet;
use rdfkeeper::{Graph, PlainLiteral, Resource, Triple};

fn resource(iri: String) -> Resource {
    Resource::new(&iri).unwrap()
}

// 10k people, each knowing the next ten and carrying a name.
fn populate() -> Graph {
    let knows = Resource::new("http://xmlns.com/foaf/0.1/knows").unwrap();
    let name = Resource::new("http://xmlns.com/foaf/0.1/name").unwrap();
    let mut graph = Graph::new();
    for n in 0..10_000 {
        let person = resource(format!("http://example.org/person/{n}"));
        for k in 1..=10 {
            let other = resource(format!("http://example.org/person/{}", (n + k) % 10_000));
            graph
                .add_triple(&Triple::new(person.clone(), knows.clone(), other).unwrap())
                .unwrap();
        }
        graph
            .add_triple(
                &Triple::new(person, name.clone(), PlainLiteral::new(&format!("Person {n}")))
                    .unwrap(),
            )
            .unwrap();
    }
    graph
}

fn pattern_selection(c: &mut Criterion) {
    let graph = populate();
    let subject = resource("http://example.org/person/42".to_string());
    let object = resource("http://example.org/person/50".to_string());
    let knows = Resource::new("http://xmlns.com/foaf/0.1/knows").unwrap();
    c.bench_function("select by subject", |b| {
        b.iter(|| black_box(graph.select_triples_by_subject(&subject).len()))
    });
    c.bench_function("select subject+predicate+object", |b| {
        b.iter(|| {
            black_box(
                graph
                    .select_triples(Some(&subject), Some(&knows), Some(&object), None)
                    .unwrap()
                    .len(),
            )
        })
    });
    c.bench_function("select predicate+object", |b| {
        b.iter(|| {
            black_box(
                graph
                    .select_triples(None, Some(&knows), Some(&object), None)
                    .unwrap()
                    .len(),
            )
        })
    });
}

fn result_set_intersection(c: &mut Criterion) {
    let mut evens = ResultSet::new();
    let mut thirds = ResultSet::new();
    for n in 0..100_000i64 {
        if n % 2 == 0 {
            evens.push(n);
        }
        if n % 3 == 0 {
            thirds.push(n);
        }
    }
    c.bench_function("multi intersect multi", |b| {
        b.iter(|| {
            let mut r = evens.clone();
            r.intersect_with(black_box(&thirds));
            black_box(r.len())
        })
    });
    let single = ResultSet::Single(600);
    c.bench_function("multi intersect single", |b| {
        b.iter(|| {
            let mut r = evens.clone();
            r.intersect_with(black_box(&single));
            black_box(r.len())
        })
    });
}

criterion_group!(benches, pattern_selection, result_set_intersection);
criterion_main!(benches);
