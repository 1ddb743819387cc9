//! Terms: resources, literals and contexts.
//!
//! Every term is an immutable value whose [`Identity`] is computed once, at
//! construction, from its canonical string:
//! * a [`Resource`] from its IRI (blank nodes use the internal `bnode:` scheme),
//! * a [`PlainLiteral`] from `value`, `value@lang` or `value@lang--dir`,
//! * a [`TypedLiteral`] from `value^^datatype`.
//!
//! Literals also carry a structural key (see [`Identified::key`]) that keeps
//! apart values whose canonical strings coincide, such as `"chat@fr"` and
//! `"chat"@fr`. A resource's key is its identity.
//!
//! Validation happens here and only here: a malformed IRI, a bad language
//! tag or a value outside its datatype's lexical space never makes it into a
//! triple.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::datatype::{DatatypeRegister, LANGUAGE_TAG};
use crate::error::{KeeperError, Result};
use crate::identity::{hash, Identified, Identity};
use crate::vocab::{rdf, xsd, NamespaceRegister};

/// Scheme used to encode blank nodes as IRIs.
pub const BLANK_SCHEME: &str = "bnode:";

lazy_static! {
    static ref ABSOLUTE_IRI: Regex =
        Regex::new(r#"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s<>"{}|\\^`]+$"#).unwrap();
    static ref BLANK_LABEL: Regex = Regex::new(r"^[^\s<>]+$").unwrap();
}

pub fn is_absolute_iri(iri: &str) -> bool {
    ABSOLUTE_IRI.is_match(iri)
}

/// N-Triples-like notation: `<iri>` or `prefix:local`, `_:label`, quoted
/// literals with their tag or datatype. Unlike `Display` it never prints two
/// different values the same way, so it is what errors and logs use.
pub trait Render {
    fn render(&self, namespaces: &NamespaceRegister) -> String;
}

fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render_iri(iri: &str, namespaces: &NamespaceRegister) -> String {
    namespaces
        .shorten(iri)
        .unwrap_or_else(|| format!("<{iri}>"))
}

// ------------- Resource -------------
#[derive(Clone, Debug)]
pub struct Resource {
    iri: Arc<str>,
    identity: Identity,
}

impl Resource {
    /// Creates a resource from an absolute IRI. `_:label` and `bnode:label`
    /// both denote blank nodes.
    pub fn new(iri: &str) -> Result<Self> {
        if let Some(label) = iri
            .strip_prefix("_:")
            .or_else(|| iri.strip_prefix(BLANK_SCHEME))
        {
            return Self::blank_named(label);
        }
        if !is_absolute_iri(iri) {
            return Err(KeeperError::InvalidIri(iri.to_string()));
        }
        Ok(Self::trusted(iri))
    }
    /// A fresh blank node with a generated name.
    pub fn blank() -> Self {
        Self::trusted(&format!("{}{}", BLANK_SCHEME, uuid::Uuid::new_v4().simple()))
    }
    pub fn blank_named(label: &str) -> Result<Self> {
        if !BLANK_LABEL.is_match(label) {
            return Err(KeeperError::InvalidIri(format!("_:{label}")));
        }
        Ok(Self::trusted(&format!("{BLANK_SCHEME}{label}")))
    }
    // Only for IRIs known to be valid: vocabulary constants and generated names.
    pub(crate) fn trusted(iri: &str) -> Self {
        Self {
            identity: hash(iri),
            iri: Arc::from(iri),
        }
    }
    // Lets tests stage two resources under one identity.
    #[cfg(test)]
    pub(crate) fn forged(iri: &str, identity: Identity) -> Self {
        Self {
            identity,
            iri: Arc::from(iri),
        }
    }
    pub fn iri(&self) -> &str {
        &self.iri
    }
    pub fn is_blank(&self) -> bool {
        self.iri.starts_with(BLANK_SCHEME)
    }
}

impl Render for Resource {
    fn render(&self, namespaces: &NamespaceRegister) -> String {
        match self.iri.strip_prefix(BLANK_SCHEME) {
            Some(label) => format!("_:{label}"),
            None => render_iri(&self.iri, namespaces),
        }
    }
}

impl Identified for Resource {
    fn identity(&self) -> Identity {
        self.identity
    }
    fn key(&self) -> Identity {
        self.identity
    }
}
impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.iri == other.iri
    }
}
impl Eq for Resource {}
impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}
impl Ord for Resource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iri.cmp(&other.iri)
    }
}
impl PartialOrd for Resource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iri)
    }
}

// ------------- Literals -------------
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl FromStr for Direction {
    type Err = KeeperError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            _ => Err(KeeperError::InvalidDirection(s.to_string())),
        }
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Ltr => write!(f, "ltr"),
            Direction::Rtl => write!(f, "rtl"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlainLiteral {
    value: Arc<str>,
    language: Option<Arc<str>>, // lowercased
    direction: Option<Direction>,
    identity: Identity,
    key: Identity,
}

impl PlainLiteral {
    pub fn new(value: &str) -> Self {
        Self::assemble(value, None, None)
    }
    pub fn with_language(value: &str, language: &str) -> Result<Self> {
        Ok(Self::assemble(value, Some(checked_language(language)?), None))
    }
    pub fn with_direction(value: &str, language: &str, direction: Direction) -> Result<Self> {
        Ok(Self::assemble(
            value,
            Some(checked_language(language)?),
            Some(direction),
        ))
    }
    fn assemble(value: &str, language: Option<String>, direction: Option<Direction>) -> Self {
        let mut canonical = value.to_string();
        let mut structural = format!("P{}:{value}", value.len());
        if let Some(language) = &language {
            let mut suffix = format!("@{language}");
            if let Some(direction) = direction {
                suffix.push_str("--");
                suffix.push_str(&direction.to_string());
            }
            canonical.push_str(&suffix);
            structural.push_str(&suffix);
        }
        Self {
            identity: hash(&canonical),
            key: hash(&structural),
            value: Arc::from(value),
            language: language.map(Arc::from),
            direction,
        }
    }
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

fn checked_language(language: &str) -> Result<String> {
    if LANGUAGE_TAG.is_match(language) {
        Ok(language.to_ascii_lowercase())
    } else {
        Err(KeeperError::InvalidLanguageTag(language.to_string()))
    }
}

impl PartialEq for PlainLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.language == other.language
            && self.direction == other.direction
    }
}
impl Eq for PlainLiteral {}
impl fmt::Display for PlainLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")?;
            if let Some(direction) = self.direction {
                write!(f, "--{direction}")?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct TypedLiteral {
    value: Arc<str>,
    datatype: Arc<str>,
    identity: Identity,
    key: Identity,
}

impl TypedLiteral {
    /// Creates a typed literal, validating `value` against the built-in
    /// datatype register.
    pub fn new(value: &str, datatype: &str) -> Result<Self> {
        Self::with_register(value, datatype, DatatypeRegister::shared())
    }
    pub fn with_register(value: &str, datatype: &str, register: &DatatypeRegister) -> Result<Self> {
        register.validate(value, datatype)?;
        Ok(Self::trusted(value, datatype))
    }
    pub fn integer(value: i64) -> Self {
        Self::trusted(&value.to_string(), xsd::INTEGER)
    }
    pub fn boolean(value: bool) -> Self {
        Self::trusted(if value { "true" } else { "false" }, xsd::BOOLEAN)
    }
    pub fn string(value: &str) -> Self {
        Self::trusted(value, xsd::STRING)
    }
    fn trusted(value: &str, datatype: &str) -> Self {
        Self {
            identity: hash(&format!("{value}^^{datatype}")),
            key: hash(&format!("T{}:{value}^^{datatype}", value.len())),
            value: Arc::from(value),
            datatype: Arc::from(datatype),
        }
    }
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn datatype(&self) -> &str {
        &self.datatype
    }
}

impl PartialEq for TypedLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.datatype == other.datatype
    }
}
impl Eq for TypedLiteral {}
impl fmt::Display for TypedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}^^{}", self.value, self.datatype)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Plain(PlainLiteral),
    Typed(TypedLiteral),
}

impl Literal {
    pub fn value(&self) -> &str {
        match self {
            Literal::Plain(plain) => plain.value(),
            Literal::Typed(typed) => typed.value(),
        }
    }
    /// The datatype IRI; plain literals report `rdf:langString`,
    /// `rdf:dirLangString` or `xsd:string`.
    pub fn datatype(&self) -> &str {
        match self {
            Literal::Typed(typed) => typed.datatype(),
            Literal::Plain(plain) => match (plain.language(), plain.direction()) {
                (Some(_), Some(_)) => rdf::DIR_LANG_STRING,
                (Some(_), None) => rdf::LANG_STRING,
                _ => xsd::STRING,
            },
        }
    }
}

impl Identified for PlainLiteral {
    fn identity(&self) -> Identity {
        self.identity
    }
    fn key(&self) -> Identity {
        self.key
    }
}
impl Identified for TypedLiteral {
    fn identity(&self) -> Identity {
        self.identity
    }
    fn key(&self) -> Identity {
        self.key
    }
}
impl Identified for Literal {
    fn identity(&self) -> Identity {
        match self {
            Literal::Plain(plain) => plain.identity,
            Literal::Typed(typed) => typed.identity,
        }
    }
    fn key(&self) -> Identity {
        match self {
            Literal::Plain(plain) => plain.key,
            Literal::Typed(typed) => typed.key,
        }
    }
}
impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
impl Render for Literal {
    fn render(&self, namespaces: &NamespaceRegister) -> String {
        match self {
            Literal::Plain(plain) => {
                let mut out = quoted(plain.value());
                if let Some(language) = plain.language() {
                    out.push('@');
                    out.push_str(language);
                    if let Some(direction) = plain.direction() {
                        out.push_str("--");
                        out.push_str(&direction.to_string());
                    }
                }
                out
            }
            Literal::Typed(typed) => format!(
                "{}^^{}",
                quoted(typed.value()),
                render_iri(typed.datatype(), namespaces)
            ),
        }
    }
}
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Plain(plain) => fmt::Display::fmt(plain, f),
            Literal::Typed(typed) => fmt::Display::fmt(typed, f),
        }
    }
}
impl From<PlainLiteral> for Literal {
    fn from(plain: PlainLiteral) -> Self {
        Literal::Plain(plain)
    }
}
impl From<TypedLiteral> for Literal {
    fn from(typed: TypedLiteral) -> Self {
        Literal::Typed(typed)
    }
}

// ------------- Term -------------
/// Anything that can occupy the object position of a triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Resource(Resource),
    Literal(Literal),
}

impl Term {
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Term::Resource(resource) => Some(resource),
            Term::Literal(_) => None,
        }
    }
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            Term::Resource(_) => None,
        }
    }
    pub fn is_resource(&self) -> bool {
        matches!(self, Term::Resource(_))
    }
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }
}

impl Identified for Term {
    fn identity(&self) -> Identity {
        match self {
            Term::Resource(resource) => resource.identity,
            Term::Literal(literal) => literal.identity(),
        }
    }
    fn key(&self) -> Identity {
        match self {
            Term::Resource(resource) => resource.identity,
            Term::Literal(literal) => literal.key(),
        }
    }
}
impl Render for Term {
    fn render(&self, namespaces: &NamespaceRegister) -> String {
        match self {
            Term::Resource(resource) => resource.render(namespaces),
            Term::Literal(literal) => literal.render(namespaces),
        }
    }
}
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Resource(resource) => fmt::Display::fmt(resource, f),
            Term::Literal(literal) => fmt::Display::fmt(literal, f),
        }
    }
}
impl From<Resource> for Term {
    fn from(resource: Resource) -> Self {
        Term::Resource(resource)
    }
}
impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}
impl From<PlainLiteral> for Term {
    fn from(plain: PlainLiteral) -> Self {
        Term::Literal(Literal::Plain(plain))
    }
}
impl From<TypedLiteral> for Term {
    fn from(typed: TypedLiteral) -> Self {
        Term::Literal(Literal::Typed(typed))
    }
}

// ------------- Context -------------
/// A named-graph marker: a non-blank resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Context(Resource);

impl Context {
    pub fn new(iri: &str) -> Result<Self> {
        Self::from_resource(Resource::new(iri)?)
    }
    pub fn from_resource(resource: Resource) -> Result<Self> {
        if resource.is_blank() {
            return Err(KeeperError::BlankContext(resource.to_string()));
        }
        Ok(Self(resource))
    }
    // Only for known non-blank IRIs.
    pub(crate) fn trusted(iri: &str) -> Self {
        Self(Resource::trusted(iri))
    }
    pub fn resource(&self) -> &Resource {
        &self.0
    }
    pub fn iri(&self) -> &str {
        self.0.iri()
    }
}

impl Identified for Context {
    fn identity(&self) -> Identity {
        self.0.identity
    }
    fn key(&self) -> Identity {
        self.0.identity
    }
}
impl Render for Context {
    fn render(&self, namespaces: &NamespaceRegister) -> String {
        self.0.render(namespaces)
    }
}
impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
