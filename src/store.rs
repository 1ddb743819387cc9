//! The quadruple façade.
//!
//! [`MemoryStore`] mirrors [`Graph`] with the context as a fifth indexed
//! dimension. Triples added without a context land in the store's default
//! context.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{KeeperError, Result};
use crate::graph::{narrow, Graph};
use crate::identity::{Identified, Identity, IdentityHasher};
use crate::index::{collision, IdentitySet, StoreIndex};
use crate::result_set::ResultSet;
use crate::settings::{Settings, DEFAULT_CONTEXT};
use crate::term::{Context, Literal, Resource, Term};
use crate::triple::{Flavor, Quadruple, Triple};

/// The mutator and query contract of a quadruple store. Backends other
/// than [`MemoryStore`] (say, one keyed by identity in a database table)
/// implement this to be interchangeable with it.
pub trait QuadStore {
    fn add_quadruple(&mut self, quadruple: &Quadruple) -> Result<bool>;
    fn remove_quadruple(&mut self, quadruple: &Quadruple) -> bool;
    fn contains_quadruple(&self, quadruple: &Quadruple) -> bool;
    fn remove_quadruples(
        &mut self,
        context: Option<&Context>,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<usize>;
    fn select_quadruples(
        &self,
        context: Option<&Context>,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<Vec<Quadruple>>;
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CompactQuadruple {
    context: Identity,
    subject: Identity,
    predicate: Identity,
    object: Identity,
    flavor: Flavor,
}

impl CompactQuadruple {
    fn of(quadruple: &Quadruple) -> Self {
        Self {
            context: quadruple.context().key(),
            subject: quadruple.subject().key(),
            predicate: quadruple.predicate().key(),
            object: quadruple.object().key(),
            flavor: quadruple.flavor(),
        }
    }
}

// ------------- MemoryStore -------------
#[derive(Debug, Clone)]
pub struct MemoryStore {
    context: Context, // where context-less triples go
    kept: HashMap<Identity, CompactQuadruple, IdentityHasher>,
    index: StoreIndex,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            context: Context::trusted(DEFAULT_CONTEXT),
            kept: HashMap::default(),
            index: StoreIndex::new(),
        }
    }
    pub fn with_settings(settings: &Settings) -> Result<Self> {
        let mut kept = HashMap::default();
        kept.reserve(settings.index_capacity);
        Ok(Self {
            context: settings.default_context()?,
            kept,
            index: StoreIndex::new(),
        })
    }
    pub fn with_default_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }
    pub fn default_context(&self) -> &Context {
        &self.context
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    pub fn index(&self) -> &StoreIndex {
        &self.index
    }

    // ------------- Mutators -------------
    /// Keeps the quadruple unless it is already kept. Collisions are refused
    /// as in [`Graph::add_triple`].
    pub fn add_quadruple(&mut self, quadruple: &Quadruple) -> Result<bool> {
        if !self.admit(quadruple)? {
            return Ok(false);
        }
        Ok(self.insert(quadruple))
    }
    // Ok(false) for a quadruple already kept, Ok(true) for one that may be inserted.
    fn admit(&self, quadruple: &Quadruple) -> Result<bool> {
        self.index.check(quadruple)?;
        match self.kept.get(&quadruple.key()) {
            Some(existing) if *existing == CompactQuadruple::of(quadruple) => Ok(false),
            Some(_) => {
                let existing = self.quadruple(quadruple.key());
                Err(collision(
                    quadruple.key(),
                    existing.as_ref().unwrap_or(quadruple),
                    quadruple,
                ))
            }
            None => Ok(true),
        }
    }
    pub(crate) fn insert(&mut self, quadruple: &Quadruple) -> bool {
        if self.kept.contains_key(&quadruple.key()) {
            return false;
        }
        self.kept.insert(quadruple.key(), CompactQuadruple::of(quadruple));
        self.index.add_index(quadruple);
        true
    }
    /// Keeps the triple in the default context.
    pub fn add_triple(&mut self, triple: &Triple) -> Result<bool> {
        self.add_quadruple(&Quadruple::from_triple(self.context.clone(), triple.clone()))
    }
    /// Keeps every triple of the graph in the graph's context. Returns how
    /// many quadruples were new. All or nothing: if any triple collides, the
    /// store is left as it was.
    pub fn add_graph(&mut self, graph: &Graph) -> Result<usize> {
        let context = Context::from_resource(graph.context().clone())?;
        let mut fresh = Vec::with_capacity(graph.len());
        for triple in graph {
            let quadruple = Quadruple::from_triple(context.clone(), triple);
            if self.admit(&quadruple)? {
                fresh.push(quadruple);
            }
        }
        let added = fresh.iter().filter(|quadruple| self.insert(quadruple)).count();
        debug!(context = %context, added, "merged graph");
        Ok(added)
    }
    pub fn remove_quadruple(&mut self, quadruple: &Quadruple) -> bool {
        if !self.contains_quadruple(quadruple) {
            return false;
        }
        self.remove_key(quadruple.key())
    }
    fn remove_key(&mut self, key: Identity) -> bool {
        match self.kept.remove(&key) {
            Some(c) => {
                self.index.unindex_statement(
                    key,
                    c.context,
                    c.subject,
                    c.predicate,
                    c.object,
                    c.flavor,
                );
                true
            }
            None => false,
        }
    }
    pub fn remove_quadruples_by_context(&mut self, context: &Context) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_context(context).iter().copied().collect();
        self.remove_all(doomed)
    }
    pub fn remove_quadruples_by_subject(&mut self, subject: &Resource) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_subject(subject).iter().copied().collect();
        self.remove_all(doomed)
    }
    pub fn remove_quadruples_by_predicate(&mut self, predicate: &Resource) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_predicate(predicate).iter().copied().collect();
        self.remove_all(doomed)
    }
    pub fn remove_quadruples_by_object(&mut self, object: &Resource) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_object(object).iter().copied().collect();
        self.remove_all(doomed)
    }
    pub fn remove_quadruples_by_literal(&mut self, literal: &Literal) -> usize {
        let doomed: Vec<Identity> = self.index.select_by_literal(literal).iter().copied().collect();
        self.remove_all(doomed)
    }
    pub fn remove_quadruples(
        &mut self,
        context: Option<&Context>,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<usize> {
        let doomed: Vec<Identity> =
            match self.candidates(context, subject, predicate, object, literal)? {
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
            debug!(removed, "removed quadruples");
        }
        removed
    }
    pub fn clear(&mut self) {
        self.kept.clear();
        self.index.clear_index();
    }

    // ------------- Queries -------------
    pub fn contains_quadruple(&self, quadruple: &Quadruple) -> bool {
        self.holds(quadruple.key(), &CompactQuadruple::of(quadruple)) && self.index.admits(quadruple)
    }
    fn holds(&self, key: Identity, compact: &CompactQuadruple) -> bool {
        self.kept.get(&key) == Some(compact)
    }
    /// Rebuilds the quadruple kept under the key.
    pub fn quadruple(&self, key: Identity) -> Option<Quadruple> {
        let c = self.kept.get(&key)?;
        let object: Term = match c.flavor {
            Flavor::Spo => self.index.resource(c.object)?.clone().into(),
            Flavor::Spl => self.index.literal(c.object)?.clone().into(),
        };
        let triple = Triple::assemble(
            self.index.resource(c.subject)?.clone(),
            self.index.resource(c.predicate)?.clone(),
            object,
        );
        Some(Quadruple::from_triple(
            self.index.context(c.context)?.clone(),
            triple,
        ))
    }
    pub fn iter(&self) -> impl Iterator<Item = Quadruple> + '_ {
        self.kept.keys().filter_map(|key| self.quadruple(*key))
    }
    /// Distinct contexts that hold at least one quadruple.
    pub fn contexts(&self) -> Vec<Context> {
        let mut contexts: Vec<Context> = self.index.contexts().iter().cloned().collect();
        contexts.sort();
        contexts
    }
    pub fn select_quadruples_by_context(&self, context: &Context) -> MemoryStore {
        self.project(self.index.select_by_context(context).iter().copied())
    }
    pub fn select_quadruples_by_subject(&self, subject: &Resource) -> MemoryStore {
        self.project(self.index.select_by_subject(subject).iter().copied())
    }
    pub fn select_quadruples_by_predicate(&self, predicate: &Resource) -> MemoryStore {
        self.project(self.index.select_by_predicate(predicate).iter().copied())
    }
    pub fn select_quadruples_by_object(&self, object: &Resource) -> MemoryStore {
        self.project(self.index.select_by_object(object).iter().copied())
    }
    pub fn select_quadruples_by_literal(&self, literal: &Literal) -> MemoryStore {
        self.project(self.index.select_by_literal(literal).iter().copied())
    }
    pub fn select_quadruples(
        &self,
        context: Option<&Context>,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<MemoryStore> {
        Ok(
            match self.candidates(context, subject, predicate, object, literal)? {
                Some(candidates) => self.project(candidates.iter()),
                None => self.clone(),
            },
        )
    }
    /// The triples kept in one context, as a graph labeled with it.
    pub fn extract_graph(&self, context: &Context) -> Graph {
        let mut graph = Graph::new().with_context(context.resource().clone());
        for quadruple in self
            .index
            .select_by_context(context)
            .iter()
            .filter_map(|key| self.quadruple(*key))
        {
            graph.insert(quadruple.triple());
        }
        graph
    }
    /// One graph per context, ordered by context IRI.
    pub fn extract_graphs(&self) -> Vec<Graph> {
        self.contexts()
            .iter()
            .map(|context| self.extract_graph(context))
            .collect()
    }

    fn candidates(
        &self,
        context: Option<&Context>,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<Option<ResultSet>> {
        if object.is_some() && literal.is_some() {
            return Err(KeeperError::ObjectLiteralConflict);
        }
        let mut bound: Vec<&IdentitySet> = Vec::with_capacity(4);
        if let Some(context) = context {
            bound.push(self.index.select_by_context(context));
        }
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
    fn project(&self, keys: impl Iterator<Item = Identity>) -> MemoryStore {
        let mut projection = MemoryStore::new().with_default_context(self.context.clone());
        for quadruple in keys.filter_map(|key| self.quadruple(key)) {
            projection.insert(&quadruple);
        }
        projection
    }

    // ------------- Set algebra -------------
    pub fn union(&self, other: Option<&MemoryStore>) -> Result<MemoryStore> {
        let mut result = self.clone();
        if let Some(other) = other {
            for quadruple in other.iter() {
                result.add_quadruple(&quadruple)?;
            }
        }
        Ok(result)
    }
    pub fn intersect(&self, other: Option<&MemoryStore>) -> MemoryStore {
        match other {
            Some(other) => self.project(
                self.kept
                    .iter()
                    .filter(|(key, c)| other.holds(**key, c))
                    .map(|(key, _)| *key),
            ),
            None => MemoryStore::new().with_default_context(self.context.clone()),
        }
    }
    pub fn difference(&self, other: Option<&MemoryStore>) -> MemoryStore {
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

impl PartialEq for MemoryStore {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .kept
                .iter()
                .all(|(key, c)| other.holds(*key, c))
    }
}

impl<'s> IntoIterator for &'s MemoryStore {
    type Item = Quadruple;
    type IntoIter = Box<dyn Iterator<Item = Quadruple> + 's>;
    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl QuadStore for MemoryStore {
    fn add_quadruple(&mut self, quadruple: &Quadruple) -> Result<bool> {
        MemoryStore::add_quadruple(self, quadruple)
    }
    fn remove_quadruple(&mut self, quadruple: &Quadruple) -> bool {
        MemoryStore::remove_quadruple(self, quadruple)
    }
    fn contains_quadruple(&self, quadruple: &Quadruple) -> bool {
        MemoryStore::contains_quadruple(self, quadruple)
    }
    fn remove_quadruples(
        &mut self,
        context: Option<&Context>,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<usize> {
        MemoryStore::remove_quadruples(self, context, subject, predicate, object, literal)
    }
    fn select_quadruples(
        &self,
        context: Option<&Context>,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
        literal: Option<&Literal>,
    ) -> Result<Vec<Quadruple>> {
        Ok(MemoryStore::select_quadruples(self, context, subject, predicate, object, literal)?
            .iter()
            .collect())
    }
    fn clear(&mut self) {
        MemoryStore::clear(self)
    }
    fn len(&self) -> usize {
        MemoryStore::len(self)
    }
}
