//! The triple façade.
//!
//! A [`Graph`] keeps every triple once, under its key, in compact form (the
//! keys of its subject, predicate and object plus its flavor), and a
//! [`GraphIndex`] over the same triples. Full triples are rebuilt on the way
//! out by resolving the compact keys through the index registers.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{KeeperError, Result};
use crate::identity::{Identified, Identity, IdentityHasher};
use crate::index::{collision, GraphIndex, IdentitySet};
use crate::result_set::ResultSet;
use crate::settings::{Settings, DEFAULT_CONTEXT};
use crate::term::{Literal, Resource, Term};
use crate::triple::{Flavor, Triple};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CompactTriple {
    subject: Identity,
    predicate: Identity,
    object: Identity,
    flavor: Flavor,
}

impl CompactTriple {
    fn of(triple: &Triple) -> Self {
        Self {
            subject: triple.subject().key(),
            predicate: triple.predicate().key(),
            object: triple.object().key(),
            flavor: triple.flavor(),
        }
    }
}

// ------------- Graph -------------
#[derive(Debug, Clone)]
pub struct Graph {
    context: Resource, // display-only label, not part of equality
    kept: HashMap<Identity, CompactTriple, IdentityHasher>,
    index: GraphIndex,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            context: Resource::trusted(DEFAULT_CONTEXT),
            kept: HashMap::default(),
            index: GraphIndex::new(),
        }
    }
    pub fn with_settings(settings: &Settings) -> Result<Self> {
        let context = settings.default_context()?;
        let mut kept = HashMap::default();
        kept.reserve(settings.index_capacity);
        Ok(Self {
            context: context.resource().clone(),
            kept,
            index: GraphIndex::new(),
        })
    }
    pub fn with_context(mut self, context: Resource) -> Self {
        self.context = context;
        self
    }
    pub fn from_triples<'t>(triples: impl IntoIterator<Item = &'t Triple>) -> Result<Self> {
        let mut graph = Self::new();
        for triple in triples {
            graph.add_triple(triple)?;
        }
        Ok(graph)
    }
    pub fn context(&self) -> &Resource {
        &self.context
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    // ------------- Mutators -------------
    /// Keeps the triple unless it is already kept. Returns whether the graph
    /// changed. A triple whose key (or the key of one of its terms) is
    /// already taken by a different value is refused and the graph is left
    /// as it was.
    pub fn add_triple(&mut self, triple: &Triple) -> Result<bool> {
        self.index.check(triple)?;
        match self.kept.get(&triple.key()) {
            Some(existing) if *existing == CompactTriple::of(triple) => Ok(false),
            Some(_) => {
                let existing = self.triple(triple.key());
                Err(collision(triple.key(), existing.as_ref().unwrap_or(triple), triple))
            }
            None => Ok(self.insert(triple)),
        }
    }
    // For triples derived from already consistent graphs, where no collision can arise.
    pub(crate) fn insert(&mut self, triple: &Triple) -> bool {
        if self.kept.contains_key(&triple.key()) {
            return false;
        }
        self.kept.insert(triple.key(), CompactTriple::of(triple));
        self.index.add_index(triple);
        true
    }
    pub fn remove_triple(&mut self, triple: &Triple) -> bool {
        if !self.contains_triple(triple) {
            return false;
        }
        self.remove_key(triple.key())
    }
    fn remove_key(&mut self, key: Identity) -> bool {
        match self.kept.remove(&key) {
            Some(c) => {
                self.index
                    .unindex_statement(key, c.subject, c.predicate, c.object, c.flavor);
                true
            }
            None => false,
        }
    }
    pub fn remove_triples_by_subject(&mut self, subject: &Resource) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_subject(subject).iter().copied().collect();
        self.remove_all(doomed)
    }
    pub fn remove_triples_by_predicate(&mut self, predicate: &Resource) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_predicate(predicate).iter().copied().collect();
        self.remove_all(doomed)
    }
    pub fn remove_triples_by_object(&mut self, object: &Resource) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_object(object).iter().copied().collect();
        self.remove_all(doomed)
    }
    pub fn remove_triples_by_literal(&mut self, literal: &Literal) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_literal(literal).iter().copied().collect();
        self.remove_all(doomed)
    }
    /// Removes every triple matching the pattern; unbound positions are
    /// wildcards, so binding nothing clears the graph.
    pub fn remove_triples(
        &mut self,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<usize> {
        let doomed: Vec<Identity> = match self.candidates(subject, predicate, object, literal)? {
            Some(candidates) => candidates.iter().collect(),
            None => self.kept.keys().copied().collect(),
        };
        Ok(self.remove_all(doomed))
    }
    fn remove_all(&mut self, doomed: Vec<Identity>) -> usize {
        let removed = doomed
            .into_iter()
            .filter(|key| self.remove_key(*key))
            .count();
        if removed > 0 {
            debug!(removed, "removed triples");
        }
        removed
    }
    pub fn clear(&mut self) {
        self.kept.clear();
        self.index.clear_index();
    }

    // ------------- Queries -------------
    pub fn contains_triple(&self, triple: &Triple) -> bool {
        self.holds(triple.key(), &CompactTriple::of(triple)) && self.index.admits(triple)
    }
    fn holds(&self, key: Identity, compact: &CompactTriple) -> bool {
        self.kept.get(&key) == Some(compact)
    }
    /// Rebuilds the triple kept under the key (see [`Identified::key`]).
    pub fn triple(&self, key: Identity) -> Option<Triple> {
        let c = self.kept.get(&key)?;
        let object: Term = match c.flavor {
            Flavor::Spo => self.index.resource(c.object)?.clone().into(),
            Flavor::Spl => self.index.literal(c.object)?.clone().into(),
        };
        Some(Triple::assemble(
            self.index.resource(c.subject)?.clone(),
            self.index.resource(c.predicate)?.clone(),
            object,
        ))
    }
    /// Lazily rebuilds every kept triple. Calling it again restarts the walk.
    pub fn iter(&self) -> impl Iterator<Item = Triple> + '_ {
        self.kept.keys().filter_map(|key| self.triple(*key))
    }
    pub fn select_triples_by_subject(&self, subject: &Resource) -> Graph {
        self.project(self.index.select_by_subject(subject).iter().copied())
    }
    pub fn select_triples_by_predicate(&self, predicate: &Resource) -> Graph {
        self.project(self.index.select_by_predicate(predicate).iter().copied())
    }
    pub fn select_triples_by_object(&self, object: &Resource) -> Graph {
        self.project(self.index.select_by_object(object).iter().copied())
    }
    pub fn select_triples_by_literal(&self, literal: &Literal) -> Graph {
        self.project(self.index.select_by_literal(literal).iter().copied())
    }
    /// Selects the triples matching every bound position. Object and literal
    /// share the object slot and cannot both be bound.
    pub fn select_triples(
        &self,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<Graph> {
        Ok(match self.candidates(subject, predicate, object, literal)? {
            Some(candidates) => self.project(candidates.iter()),
            None => self.clone(),
        })
    }
    /// Objects of the triples with the given subject and predicate.
    pub fn objects(&self, subject: &Resource, predicate: &Resource) -> Vec<Term> {
        let mut candidates = ResultSet::from_identities(self.index.select_by_subject(subject));
        candidates.intersect_with_identities(self.index.select_by_predicate(predicate));
        candidates
            .iter()
            .filter_map(|key| self.triple(key))
            .map(|triple| triple.object().clone())
            .collect()
    }

    // None when nothing is bound, meaning every kept triple
    fn candidates(
        &self,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<Option<ResultSet>> {
        if object.is_some() && literal.is_some() {
            return Err(KeeperError::ObjectLiteralConflict);
        }
        let mut bound: Vec<&IdentitySet> = Vec::with_capacity(3);
        if let Some(subject) = subject {
            bound.push(self.index.select_by_subject(subject));
        }
        if let Some(predicate) = predicate {
            bound.push(self.index.select_by_predicate(predicate));
        }
        if let Some(object) = object {
            bound.push(self.index.select_by_object(object));
        }
        if let Some(literal) = literal {
            bound.push(self.index.select_by_literal(literal));
        }
        Ok(narrow(bound))
    }
    fn project(&self, keys: impl Iterator<Item = Identity>) -> Graph {
        let mut projection = Graph::new().with_context(self.context.clone());
        for triple in keys.filter_map(|key| self.triple(key)) {
            projection.insert(&triple);
        }
        projection
    }

    // ------------- Set algebra -------------
    /// Every triple of either graph. Refused if the two graphs disagree on
    /// what a key stands for; neither graph changes either way.
    pub fn union(&self, other: Option<&Graph>) -> Result<Graph> {
        let mut result = self.clone();
        if let Some(other) = other {
            for triple in other.iter() {
                result.add_triple(&triple)?;
            }
        }
        Ok(result)
    }
    /// Triples of this graph that are also in the other one; empty without one.
    pub fn intersect(&self, other: Option<&Graph>) -> Graph {
        match other {
            Some(other) => self.project(
                self.kept
                    .iter()
                    .filter(|(key, c)| other.holds(**key, c))
                    .map(|(key, _)| *key),
            ),
            None => Graph::new().with_context(self.context.clone()),
        }
    }
    /// Triples of this graph that are not in the other one; all of them without one.
    pub fn difference(&self, other: Option<&Graph>) -> Graph {
        match other {
            Some(other) => self.project(
                self.kept
                    .iter()
                    .filter(|(key, c)| !other.holds(**key, c))
                    .map(|(key, _)| *key),
            ),
            None => self.clone(),
        }
    }
}

// Intersects the bound candidate sets, smallest first.
pub(crate) fn narrow(mut bound: Vec<&IdentitySet>) -> Option<ResultSet> {
    bound.sort_by_key(|set| set.len());
    let mut sets = bound.into_iter();
    let mut candidates = ResultSet::from_identities(sets.next()?);
    for set in sets {
        if candidates.is_empty() {
            break;
        }
        candidates.intersect_with_identities(set);
    }
    Some(candidates)
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .kept
                .iter()
                .all(|(key, c)| other.holds(*key, c))
    }
}

impl<'g> IntoIterator for &'g Graph {
    type Item = Triple;
    type IntoIter = Box<dyn Iterator<Item = Triple> + 'g>;
    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
