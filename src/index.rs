//! Positional indexes over kept statements.
//!
//! A [`Lookup`] maps the key of a term to the keys of the statements
//! (triples or quadruples) that hold the term in one position. Keys are the
//! structural digests of [`Identified::key`], not the canonical identities,
//! so an IRI and a literal that print alike never share an entry.
//! A [`Register`] resolves a term key back to the term itself and counts
//! how many lookup entries reference it; the term is dropped from the
//! register when that count reaches zero, so a term shared by several
//! positions (say, the object of one triple and the subject of another) stays
//! resolvable until its last statement is gone.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use tracing::{trace, warn};

use crate::error::{KeeperError, Result};
use crate::identity::{Identified, Identity, IdentityHasher};
use crate::term::{Context, Literal, Render, Resource, Term};
use crate::triple::{Flavor, Quadruple, Triple};
use crate::vocab::NamespaceRegister;

pub type IdentitySet = HashSet<Identity, IdentityHasher>;

lazy_static! {
    // handed out on lookup misses so that a miss never allocates
    static ref EMPTY: IdentitySet = IdentitySet::default();
}

// ------------- Lookups -------------
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    index: HashMap<Identity, IdentitySet, IdentityHasher>,
}

impl Lookup {
    pub fn new() -> Self {
        Self {
            index: HashMap::default(),
        }
    }
    /// Returns whether the value was newly inserted under the key.
    pub fn insert(&mut self, key: Identity, value: Identity) -> bool {
        self.index.entry(key).or_default().insert(value)
    }
    /// Returns whether the value was present under the key. Emptied sets are dropped.
    pub fn remove(&mut self, key: Identity, value: Identity) -> bool {
        let Some(set) = self.index.get_mut(&key) else {
            return false;
        };
        let removed = set.remove(&value);
        if set.is_empty() {
            self.index.remove(&key);
        }
        removed
    }
    pub fn lookup(&self, key: Identity) -> &IdentitySet {
        self.index.get(&key).unwrap_or(&EMPTY)
    }
    pub fn contains_key(&self, key: Identity) -> bool {
        self.index.contains_key(&key)
    }
    pub fn len(&self) -> usize {
        self.index.len()
    }
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
    pub fn clear(&mut self) {
        self.index.clear();
    }
}

// ------------- Registers -------------
#[derive(Debug, Clone)]
pub struct Register<T> {
    kept: HashMap<Identity, (T, usize), IdentityHasher>,
}

impl<T> Default for Register<T> {
    fn default() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
}

impl<T: Identified + Clone + PartialEq + Render> Register<T> {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds one reference to the term. Returns whether it was previously kept.
    pub fn keep(&mut self, term: &T) -> bool {
        let entry = self
            .kept
            .entry(term.key())
            .or_insert_with(|| (term.clone(), 0));
        entry.1 += 1;
        entry.1 > 1
    }
    /// Drops one reference. Returns whether the term left the register.
    pub fn release(&mut self, key: Identity) -> bool {
        let Some(entry) = self.kept.get_mut(&key) else {
            return false;
        };
        entry.1 -= 1;
        if entry.1 == 0 {
            self.kept.remove(&key);
            return true;
        }
        false
    }
    /// The different term already kept under the same key, if any.
    pub fn conflict(&self, term: &T) -> Option<&T> {
        match self.kept.get(&term.key()) {
            Some((existing, _)) if existing != term => Some(existing),
            _ => None,
        }
    }
    /// Like [`Register::conflict`], but as an error, logged.
    pub fn check(&self, term: &T) -> Result<()> {
        match self.conflict(term) {
            Some(existing) => Err(collision(term.key(), existing, term)),
            None => Ok(()),
        }
    }
    pub fn get(&self, key: Identity) -> Option<&T> {
        self.kept.get(&key).map(|(term, _)| term)
    }
    pub fn references(&self, key: Identity) -> usize {
        self.kept.get(&key).map_or(0, |(_, count)| *count)
    }
    pub fn contains(&self, key: Identity) -> bool {
        self.kept.contains_key(&key)
    }
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.kept.values().map(|(term, _)| term)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    pub fn clear(&mut self) {
        self.kept.clear();
    }
}

/// Builds (and logs) the error for two different values under one key.
pub(crate) fn collision(key: Identity, existing: &impl Render, incoming: &impl Render) -> KeeperError {
    let namespaces = NamespaceRegister::shared();
    let existing = existing.render(namespaces);
    let incoming = incoming.render(namespaces);
    warn!(key, existing = %existing, incoming = %incoming, "identity collision");
    KeeperError::IdentityCollision {
        identity: key,
        existing,
        incoming,
    }
}

// ------------- GraphIndex -------------
/// Subject, predicate, object and literal lookups plus the resource and
/// literal registers.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    subjects: Lookup,
    predicates: Lookup,
    objects: Lookup,
    literals: Lookup,
    resource_register: Register<Resource>,
    literal_register: Register<Literal>,
}

impl GraphIndex {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_index(&mut self, triple: &Triple) {
        self.index_statement(triple.key(), triple.subject(), triple.predicate(), triple.object());
    }
    pub fn remove_index(&mut self, triple: &Triple) {
        self.unindex_statement(
            triple.key(),
            triple.subject().key(),
            triple.predicate().key(),
            triple.object().key(),
            triple.flavor(),
        );
    }
    /// Fails if any term of the triple collides with a different registered term.
    pub fn check(&self, triple: &Triple) -> Result<()> {
        self.check_terms(triple.subject(), triple.predicate(), triple.object())
    }
    /// Whether every term of the triple is free of collisions, without logging.
    pub fn admits(&self, triple: &Triple) -> bool {
        self.admits_terms(triple.subject(), triple.predicate(), triple.object())
    }
    pub fn select_by_subject(&self, subject: &Resource) -> &IdentitySet {
        self.subjects.lookup(subject.key())
    }
    pub fn select_by_predicate(&self, predicate: &Resource) -> &IdentitySet {
        self.predicates.lookup(predicate.key())
    }
    pub fn select_by_object(&self, object: &Resource) -> &IdentitySet {
        self.objects.lookup(object.key())
    }
    pub fn select_by_literal(&self, literal: &Literal) -> &IdentitySet {
        self.literals.lookup(literal.key())
    }
    pub fn resource(&self, key: Identity) -> Option<&Resource> {
        self.resource_register.get(key)
    }
    pub fn literal(&self, key: Identity) -> Option<&Literal> {
        self.literal_register.get(key)
    }
    pub fn resources(&self) -> &Register<Resource> {
        &self.resource_register
    }
    pub fn literals(&self) -> &Register<Literal> {
        &self.literal_register
    }
    pub fn clear_index(&mut self) {
        self.subjects.clear();
        self.predicates.clear();
        self.objects.clear();
        self.literals.clear();
        self.resource_register.clear();
        self.literal_register.clear();
    }

    pub(crate) fn check_terms(&self, subject: &Resource, predicate: &Resource, object: &Term) -> Result<()> {
        self.resource_register.check(subject)?;
        self.resource_register.check(predicate)?;
        match object {
            Term::Resource(resource) => self.resource_register.check(resource),
            Term::Literal(literal) => self.literal_register.check(literal),
        }
    }

    pub(crate) fn admits_terms(&self, subject: &Resource, predicate: &Resource, object: &Term) -> bool {
        self.resource_register.conflict(subject).is_none()
            && self.resource_register.conflict(predicate).is_none()
            && match object {
                Term::Resource(resource) => self.resource_register.conflict(resource).is_none(),
                Term::Literal(literal) => self.literal_register.conflict(literal).is_none(),
            }
    }

    pub(crate) fn index_statement(
        &mut self,
        statement: Identity,
        subject: &Resource,
        predicate: &Resource,
        object: &Term,
    ) {
        if self.subjects.insert(subject.key(), statement) {
            self.resource_register.keep(subject);
        }
        if self.predicates.insert(predicate.key(), statement) {
            self.resource_register.keep(predicate);
        }
        match object {
            Term::Resource(resource) => {
                if self.objects.insert(resource.key(), statement) {
                    self.resource_register.keep(resource);
                }
            }
            Term::Literal(literal) => {
                if self.literals.insert(literal.key(), statement) {
                    self.literal_register.keep(literal);
                }
            }
        }
        trace!(statement, "indexed");
    }

    pub(crate) fn unindex_statement(
        &mut self,
        statement: Identity,
        subject: Identity,
        predicate: Identity,
        object: Identity,
        flavor: Flavor,
    ) {
        if self.subjects.remove(subject, statement) {
            self.resource_register.release(subject);
        }
        if self.predicates.remove(predicate, statement) {
            self.resource_register.release(predicate);
        }
        match flavor {
            Flavor::Spo => {
                if self.objects.remove(object, statement) {
                    self.resource_register.release(object);
                }
            }
            Flavor::Spl => {
                if self.literals.remove(object, statement) {
                    self.literal_register.release(object);
                }
            }
        }
        trace!(statement, "unindexed");
    }
}

// ------------- StoreIndex -------------
/// A [`GraphIndex`] over quadruple keys plus the context lookup and register.
#[derive(Debug, Clone, Default)]
pub struct StoreIndex {
    statements: GraphIndex,
    contexts: Lookup,
    context_register: Register<Context>,
}

impl StoreIndex {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_index(&mut self, quadruple: &Quadruple) {
        let statement = quadruple.key();
        if self.contexts.insert(quadruple.context().key(), statement) {
            self.context_register.keep(quadruple.context());
        }
        self.statements.index_statement(
            statement,
            quadruple.subject(),
            quadruple.predicate(),
            quadruple.object(),
        );
    }
    pub fn remove_index(&mut self, quadruple: &Quadruple) {
        self.unindex_statement(
            quadruple.key(),
            quadruple.context().key(),
            quadruple.subject().key(),
            quadruple.predicate().key(),
            quadruple.object().key(),
            quadruple.flavor(),
        );
    }
    pub fn check(&self, quadruple: &Quadruple) -> Result<()> {
        self.context_register.check(quadruple.context())?;
        self.statements
            .check_terms(quadruple.subject(), quadruple.predicate(), quadruple.object())
    }
    pub fn admits(&self, quadruple: &Quadruple) -> bool {
        self.context_register.conflict(quadruple.context()).is_none()
            && self
                .statements
                .admits_terms(quadruple.subject(), quadruple.predicate(), quadruple.object())
    }
    pub fn select_by_context(&self, context: &Context) -> &IdentitySet {
        self.contexts.lookup(context.key())
    }
    pub fn select_by_subject(&self, subject: &Resource) -> &IdentitySet {
        self.statements.select_by_subject(subject)
    }
    pub fn select_by_predicate(&self, predicate: &Resource) -> &IdentitySet {
        self.statements.select_by_predicate(predicate)
    }
    pub fn select_by_object(&self, object: &Resource) -> &IdentitySet {
        self.statements.select_by_object(object)
    }
    pub fn select_by_literal(&self, literal: &Literal) -> &IdentitySet {
        self.statements.select_by_literal(literal)
    }
    pub fn context(&self, key: Identity) -> Option<&Context> {
        self.context_register.get(key)
    }
    pub fn resource(&self, key: Identity) -> Option<&Resource> {
        self.statements.resource(key)
    }
    pub fn literal(&self, key: Identity) -> Option<&Literal> {
        self.statements.literal(key)
    }
    pub fn contexts(&self) -> &Register<Context> {
        &self.context_register
    }
    pub fn resources(&self) -> &Register<Resource> {
        self.statements.resources()
    }
    pub fn literals(&self) -> &Register<Literal> {
        self.statements.literals()
    }
    pub fn clear_index(&mut self) {
        self.statements.clear_index();
        self.contexts.clear();
        self.context_register.clear();
    }

    pub(crate) fn unindex_statement(
        &mut self,
        statement: Identity,
        context: Identity,
        subject: Identity,
        predicate: Identity,
        object: Identity,
        flavor: Flavor,
    ) {
        if self.contexts.remove(context, statement) {
            self.context_register.release(context);
        }
        self.statements
            .unindex_statement(statement, subject, predicate, object, flavor);
    }
}
