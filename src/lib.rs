//! rdfkeeper – an in-memory keeper of RDF triples and quadruples.
//!
//! Everything revolves around *identities*: every term, triple and quadruple
//! carries a deterministic 64-bit identity computed from its canonical string
//! (see [`identity`]), plus a structural key of the same width that the
//! indexes use, since canonical strings can coincide for different values.
//! Keys make it cheap to:
//! * deduplicate statements on insertion,
//! * answer pattern selections by intersecting per-position identity sets,
//! * compare graphs and stores without rebuilding their triples.
//!
//! ## Modules
//! * [`identity`] – the MD5-based identity scheme and the [`identity::Identified`] trait.
//! * [`vocab`] – RDF, RDFS, XSD and OWL constants plus the [`vocab::NamespaceRegister`].
//! * [`datatype`] – lexical grammars for typed literals, kept in a [`datatype::DatatypeRegister`].
//! * [`term`] – [`Resource`], [`PlainLiteral`], [`TypedLiteral`], [`Literal`], [`Term`] and [`Context`],
//!   plus [`Render`] for unambiguous printing.
//! * [`triple`] – [`Triple`] and [`Quadruple`].
//! * [`index`] – positional lookups and reference-counted registers.
//! * [`result_set`] – candidate sets used while narrowing a pattern.
//! * [`graph`] – the triple façade, [`Graph`].
//! * [`store`] – the quadruple façade, [`MemoryStore`], and the [`QuadStore`] trait.
//! * [`collection`] / [`container`] – `rdf:List` collections and Bag/Seq/Alt containers.
//! * [`reification`] – statement and triple-term reification.
//! * [`settings`] – configuration loading and logging bootstrap.
//!
//! ## Patterns
//! Selections take an optional term per position; `None` is a wildcard. The
//! object position holds either a resource or a literal, so binding both is
//! refused with [`KeeperError::ObjectLiteralConflict`].
//!
//! ## Quick Start
//! ```
//! use rdfkeeper::{Graph, PlainLiteral, Resource, Triple};
//! let alice = Resource::new("http://example.org/alice").unwrap();
//! let knows = Resource::new("http://xmlns.com/foaf/0.1/knows").unwrap();
//! let name = Resource::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let bob = Resource::new("http://example.org/bob").unwrap();
//!
//! let mut graph = Graph::new();
//! graph.add_triple(&Triple::new(alice.clone(), knows.clone(), bob.clone()).unwrap()).unwrap();
//! graph.add_triple(&Triple::new(bob.clone(), name, PlainLiteral::new("Bob")).unwrap()).unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.select_triples_by_subject(&alice).len(), 1);
//! let known = graph.select_triples(Some(&alice), Some(&knows), None, None).unwrap();
//! assert_eq!(known.iter().next().unwrap().object().as_resource(), Some(&bob));
//! ```
//!
//! ## Concurrency
//! Graphs and stores are plain owned values with `&mut self` mutators. Share
//! them across threads by wrapping them, e.g. in `Arc<Mutex<_>>`.

pub mod collection;
pub mod container;
pub mod datatype;
pub mod error;
pub mod graph;
pub mod identity;
pub mod index;
pub mod reification;
pub mod result_set;
pub mod settings;
pub mod store;
pub mod term;
pub mod triple;
pub mod vocab;

pub use collection::{Collection, ItemType};
pub use container::{Container, ContainerKind};
pub use error::{KeeperError, Result};
pub use graph::Graph;
pub use identity::{Identified, Identity};
pub use reification::{dereify_statement, dereify_triple_term, Annotation};
pub use settings::{init_logging, Settings};
pub use store::{MemoryStore, QuadStore};
pub use term::{Context, Direction, Literal, PlainLiteral, Render, Resource, Term, TypedLiteral};
pub use triple::{Flavor, Quadruple, Triple};
