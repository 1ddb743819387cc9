//! `rdf:Bag`, `rdf:Seq` and `rdf:Alt` containers.

use std::fmt;

use tracing::debug;

use crate::collection::ItemType;
use crate::graph::Graph;
use crate::term::{Resource, Term};
use crate::triple::Triple;
use crate::vocab::rdf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Bag,
    Seq,
    Alt,
}

impl ContainerKind {
    pub fn type_iri(&self) -> &'static str {
        match self {
            ContainerKind::Bag => rdf::BAG,
            ContainerKind::Seq => rdf::SEQ,
            ContainerKind::Alt => rdf::ALT,
        }
    }
    pub fn from_type_iri(iri: &str) -> Option<Self> {
        match iri {
            rdf::BAG => Some(ContainerKind::Bag),
            rdf::SEQ => Some(ContainerKind::Seq),
            rdf::ALT => Some(ContainerKind::Alt),
            _ => None,
        }
    }
    /// Alternatives are distinct; bags and sequences may repeat.
    pub fn accepts_duplicates(&self) -> bool {
        !matches!(self, ContainerKind::Alt)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_iri())
    }
}

#[derive(Debug, Clone)]
pub struct Container {
    kind: ContainerKind,
    item_type: ItemType,
    items: Vec<Term>,
    subject: Resource,
}

impl Container {
    pub fn new(kind: ContainerKind, item_type: ItemType) -> Self {
        Self::with_subject(kind, item_type, Resource::blank())
    }
    pub fn with_subject(kind: ContainerKind, item_type: ItemType, subject: Resource) -> Self {
        Self {
            kind,
            item_type,
            items: Vec::new(),
            subject,
        }
    }
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }
    pub fn subject(&self) -> &Resource {
        &self.subject
    }
    pub fn items(&self) -> &[Term] {
        &self.items
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn add_item(&mut self, item: impl Into<Term>) -> bool {
        let item = item.into();
        if !self.item_type.admits(&item) {
            debug!(item = %item, kind = %self.kind, "ignored container item of the wrong kind");
            return false;
        }
        if !self.kind.accepts_duplicates() && self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }
    /// Removes every occurrence of the item.
    pub fn remove_item(&mut self, item: &Term) -> bool {
        let before = self.items.len();
        self.items.retain(|kept| kept != item);
        self.items.len() != before
    }
    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    pub fn reify(&self) -> Graph {
        let mut graph = Graph::new();
        graph.insert(&Triple::assemble(
            self.subject.clone(),
            Resource::trusted(rdf::TYPE),
            Resource::trusted(self.kind.type_iri()).into(),
        ));
        for (position, item) in self.items.iter().enumerate() {
            graph.insert(&Triple::assemble(
                self.subject.clone(),
                Resource::trusted(&rdf::member(position + 1)),
                item.clone(),
            ));
        }
        graph
    }

    /// Reads the container described at `subject`, or `None` if the subject
    /// is not typed as a bag, sequence or alternative. Members come back in
    /// `rdf:_N` order.
    pub fn from_graph(graph: &Graph, subject: &Resource, item_type: ItemType) -> Option<Container> {
        let kind = graph
            .objects(subject, &Resource::trusted(rdf::TYPE))
            .iter()
            .filter_map(Term::as_resource)
            .find_map(|class| ContainerKind::from_type_iri(class.iri()))?;
        let mut members: Vec<(usize, Term)> = graph
            .select_triples_by_subject(subject)
            .iter()
            .filter_map(|triple| {
                rdf::member_ordinal(triple.predicate().iri()).map(|n| (n, triple.object().clone()))
            })
            .collect();
        members.sort_by_key(|(n, _)| *n);
        let mut container = Container::with_subject(kind, item_type, subject.clone());
        for (_, item) in members {
            container.add_item(item);
        }
        Some(container)
    }
}
