//! `rdf:List` collections.
//!
//! A [`Collection`] is a builder of same-typed items that turns into the
//! usual `rdf:first`/`rdf:rest` chain when reified, and can be read back from
//! any graph that holds such a chain.

use std::collections::HashSet;

use tracing::debug;

use crate::graph::Graph;
use crate::identity::{Identified, Identity};
use crate::term::{Resource, Term};
use crate::triple::Triple;
use crate::vocab::rdf;

/// Which kind of term a collection or container holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Resource,
    Literal,
}

impl ItemType {
    pub fn admits(&self, item: &Term) -> bool {
        match self {
            ItemType::Resource => item.is_resource(),
            ItemType::Literal => item.is_literal(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    item_type: ItemType,
    items: Vec<Term>,
    accept_duplicates: bool,
    anchor: Resource,
}

impl Collection {
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            items: Vec::new(),
            accept_duplicates: false,
            anchor: Resource::blank(),
        }
    }
    /// A collection that keeps repeated items.
    pub fn accepting_duplicates(item_type: ItemType) -> Self {
        Self {
            accept_duplicates: true,
            ..Self::new(item_type)
        }
    }
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }
    pub fn accepts_duplicates(&self) -> bool {
        self.accept_duplicates
    }
    /// Appends the item. Returns false when it is of the wrong kind, or a
    /// duplicate in a collection that does not accept those.
    pub fn add_item(&mut self, item: impl Into<Term>) -> bool {
        let item = item.into();
        if !self.item_type.admits(&item) {
            debug!(item = %item, item_type = ?self.item_type, "ignored collection item of the wrong kind");
            return false;
        }
        if !self.accept_duplicates && self.items.contains(&item) {
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
    pub fn items(&self) -> &[Term] {
        &self.items
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    /// `rdf:nil` while empty, the head of the chain otherwise.
    pub fn reification_subject(&self) -> Resource {
        if self.items.is_empty() {
            Resource::trusted(rdf::NIL)
        } else {
            self.anchor.clone()
        }
    }

    pub fn reify(&self) -> Graph {
        let mut graph = Graph::new();
        let first = Resource::trusted(rdf::FIRST);
        let rest = Resource::trusted(rdf::REST);
        let mut anchor = self.anchor.clone();
        let mut items = self.items.iter().peekable();
        while let Some(item) = items.next() {
            graph.insert(&Triple::assemble(anchor.clone(), first.clone(), item.clone()));
            let next = if items.peek().is_some() {
                Resource::blank()
            } else {
                Resource::trusted(rdf::NIL)
            };
            graph.insert(&Triple::assemble(anchor, rest.clone(), next.clone().into()));
            anchor = next;
        }
        graph
    }

    /// Reads the list starting at `head`. Walking stops at `rdf:nil`, at a
    /// node without `rdf:rest`, or at a node already visited; whatever was
    /// collected up to that point is returned.
    pub fn from_graph(graph: &Graph, head: &Resource, item_type: ItemType) -> Collection {
        let mut collection = Collection::accepting_duplicates(item_type);
        let first = Resource::trusted(rdf::FIRST);
        let rest = Resource::trusted(rdf::REST);
        let nil = Resource::trusted(rdf::NIL);
        let mut visited: HashSet<Identity> = HashSet::new();
        let mut node = head.clone();
        while node != nil {
            if !visited.insert(node.key()) {
                debug!(node = %node, "cycle in rdf:List, stopping");
                break;
            }
            if let Some(item) = graph
                .objects(&node, &first)
                .into_iter()
                .find(|item| item.as_resource() != Some(&nil))
            {
                collection.add_item(item);
            }
            match graph
                .objects(&node, &rest)
                .into_iter()
                .find_map(|next| next.as_resource().cloned())
            {
                Some(next) => node = next,
                None => {
                    debug!(node = %node, "rdf:List node without rdf:rest, stopping");
                    break;
                }
            }
        }
        if !collection.is_empty() {
            collection.anchor = head.clone();
        }
        collection
    }
}
