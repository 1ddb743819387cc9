use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{KeeperError, Result};
use crate::identity::{hash, Identified, Identity};
use crate::term::{Context, Render, Resource, Term};
use crate::vocab::NamespaceRegister;

/// Whether the object position holds a resource (SPO) or a literal (SPL).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flavor {
    Spo,
    Spl,
}

// ------------- Triple -------------
#[derive(Clone, Debug)]
pub struct Triple {
    subject: Resource,
    predicate: Resource,
    object: Term,
    identity: Identity,
    key: Identity,
}

impl Triple {
    pub fn new(subject: Resource, predicate: Resource, object: impl Into<Term>) -> Result<Self> {
        if predicate.is_blank() {
            return Err(KeeperError::BlankPredicate(predicate.to_string()));
        }
        Ok(Self::assemble(subject, predicate, object.into()))
    }
    // Callers guarantee a non-blank predicate.
    pub(crate) fn assemble(subject: Resource, predicate: Resource, object: Term) -> Self {
        let identity = hash(&format!("{subject} {predicate} {object}"));
        let kind = if object.is_resource() { 'r' } else { 'l' };
        let key = hash(&format!(
            "{} {} {kind}{}",
            subject.key(),
            predicate.key(),
            object.key()
        ));
        Self {
            subject,
            predicate,
            object,
            identity,
            key,
        }
    }
    #[cfg(test)]
    pub(crate) fn forge_key(mut self, key: Identity) -> Self {
        self.key = key;
        self
    }
    pub fn subject(&self) -> &Resource {
        &self.subject
    }
    pub fn predicate(&self) -> &Resource {
        &self.predicate
    }
    pub fn object(&self) -> &Term {
        &self.object
    }
    pub fn flavor(&self) -> Flavor {
        match self.object {
            Term::Resource(_) => Flavor::Spo,
            Term::Literal(_) => Flavor::Spl,
        }
    }
}

impl Identified for Triple {
    fn identity(&self) -> Identity {
        self.identity
    }
    fn key(&self) -> Identity {
        self.key
    }
}
impl PartialEq for Triple {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
    }
}
impl Eq for Triple {}
impl Hash for Triple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
impl Render for Triple {
    fn render(&self, namespaces: &NamespaceRegister) -> String {
        format!(
            "{} {} {} .",
            self.subject.render(namespaces),
            self.predicate.render(namespaces),
            self.object.render(namespaces)
        )
    }
}
impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

// ------------- Quadruple -------------
#[derive(Clone, Debug)]
pub struct Quadruple {
    context: Context,
    triple: Triple,
    identity: Identity,
    key: Identity,
}

impl Quadruple {
    pub fn new(
        context: Context,
        subject: Resource,
        predicate: Resource,
        object: impl Into<Term>,
    ) -> Result<Self> {
        Ok(Self::from_triple(context, Triple::new(subject, predicate, object)?))
    }
    pub fn from_triple(context: Context, triple: Triple) -> Self {
        let identity = hash(&format!("{context} {triple}"));
        let key = hash(&format!("{} {}", context.key(), triple.key));
        Self {
            context,
            triple,
            identity,
            key,
        }
    }
    pub fn context(&self) -> &Context {
        &self.context
    }
    pub fn subject(&self) -> &Resource {
        &self.triple.subject
    }
    pub fn predicate(&self) -> &Resource {
        &self.triple.predicate
    }
    pub fn object(&self) -> &Term {
        &self.triple.object
    }
    pub fn flavor(&self) -> Flavor {
        self.triple.flavor()
    }
    pub fn triple(&self) -> &Triple {
        &self.triple
    }
    pub fn into_triple(self) -> Triple {
        self.triple
    }
}

impl Identified for Quadruple {
    fn identity(&self) -> Identity {
        self.identity
    }
    fn key(&self) -> Identity {
        self.key
    }
}
impl PartialEq for Quadruple {
    fn eq(&self, other: &Self) -> bool {
        self.context == other.context && self.triple == other.triple
    }
}
impl Eq for Quadruple {}
impl Hash for Quadruple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
impl Render for Quadruple {
    fn render(&self, namespaces: &NamespaceRegister) -> String {
        let triple = self.triple.render(namespaces);
        let statement = triple.strip_suffix(" .").unwrap_or(&triple);
        format!("{statement} {} .", self.context.render(namespaces))
    }
}
impl fmt::Display for Quadruple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.context, self.triple)
    }
}
