//! Vocabulary constants and the namespace register.
//!
//! Constants are grouped by vocabulary (`rdf`, `rdfs`, `xsd`, `owl`). The
//! [`NamespaceRegister`] maps prefixes to namespaces in both directions and is
//! passed explicitly wherever compact names are expanded or shortened, as
//! [`Render`](crate::term::Render) does when it prints terms for errors and
//! logs. The built-in register is an immutable static; callers that need more
//! prefixes clone it and add their own.

use bimap::BiMap;
use lazy_static::lazy_static;

use crate::error::{KeeperError, Result};
use crate::term::is_absolute_iri;

/// RDF vocabulary constants
pub mod rdf {
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:first IRI (RDF list head)
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

    /// rdf:rest IRI (RDF list tail)
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

    /// rdf:nil IRI (RDF list terminator)
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

    pub const BAG: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag";
    pub const SEQ: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq";
    pub const ALT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Alt";

    pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
    pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
    pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
    pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";

    pub const REIFIES: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#reifies";
    pub const TRIPLE_TERM: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#TripleTerm";
    pub const TT_SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ttSubject";
    pub const TT_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ttPredicate";
    pub const TT_OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ttObject";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:dirLangString IRI (language string with base direction)
    pub const DIR_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#dirLangString";

    /// rdf:JSON IRI
    pub const JSON: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON";

    pub const PLAIN_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral";
    pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";
    pub const HTML: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML";

    /// Container membership property `rdf:_n` (1-based).
    pub fn member(ordinal: usize) -> String {
        format!("{NAMESPACE}_{ordinal}")
    }

    /// The ordinal of a container membership property, if `iri` is one.
    pub fn member_ordinal(iri: &str) -> Option<usize> {
        let digits = iri.strip_prefix(NAMESPACE)?.strip_prefix('_')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<usize>().ok().filter(|n| *n > 0)
    }
}

/// RDFS vocabulary constants
pub mod rdfs {
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

    pub const LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
}

/// XSD vocabulary constants
pub mod xsd {
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
    pub const G_YEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";
    pub const G_YEAR_MONTH: &str = "http://www.w3.org/2001/XMLSchema#gYearMonth";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
    pub const LANGUAGE: &str = "http://www.w3.org/2001/XMLSchema#language";
    pub const HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
    pub const BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";
}

/// OWL namespace, preloaded in the built-in register.
pub mod owl {
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
}

// ------------- Namespaces -------------
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegister {
    kept: BiMap<String, String>, // prefix <-> namespace
}

lazy_static! {
    static ref BUILTIN_NAMESPACES: NamespaceRegister = NamespaceRegister::builtin();
}

impl NamespaceRegister {
    pub fn new() -> Self {
        Self { kept: BiMap::new() }
    }
    /// A register preloaded with the rdf, rdfs, xsd and owl prefixes.
    pub fn builtin() -> Self {
        let mut kept = BiMap::new();
        kept.insert("rdf".to_string(), rdf::NAMESPACE.to_string());
        kept.insert("rdfs".to_string(), rdfs::NAMESPACE.to_string());
        kept.insert("xsd".to_string(), xsd::NAMESPACE.to_string());
        kept.insert("owl".to_string(), owl::NAMESPACE.to_string());
        Self { kept }
    }
    /// Shared read-only instance of [`NamespaceRegister::builtin`].
    pub fn shared() -> &'static NamespaceRegister {
        &BUILTIN_NAMESPACES
    }
    /// Keeps a prefix mapping. Returns `false` if either the prefix or the
    /// namespace is already registered, in which case nothing changes.
    pub fn keep(&mut self, prefix: &str, namespace: &str) -> Result<bool> {
        if !is_absolute_iri(namespace) {
            return Err(KeeperError::InvalidIri(namespace.to_string()));
        }
        Ok(self
            .kept
            .insert_no_overwrite(prefix.to_string(), namespace.to_string())
            .is_ok())
    }
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.kept.get_by_left(prefix).map(String::as_str)
    }
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.kept.get_by_right(namespace).map(String::as_str)
    }
    /// Expands `prefix:local` into a full IRI.
    pub fn expand(&self, compact: &str) -> Option<String> {
        let (prefix, local) = compact.split_once(':')?;
        self.namespace(prefix).map(|ns| format!("{ns}{local}"))
    }
    /// Shortens a full IRI into `prefix:local` using the longest matching namespace.
    pub fn shorten(&self, iri: &str) -> Option<String> {
        self.kept
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{}:{}", prefix, &iri[ns.len()..]))
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_properties() {
        assert_eq!(rdf::member(3), "http://www.w3.org/1999/02/22-rdf-syntax-ns#_3");
        assert_eq!(rdf::member_ordinal(&rdf::member(12)), Some(12));
        assert_eq!(rdf::member_ordinal(rdf::TYPE), None);
        assert_eq!(rdf::member_ordinal("http://www.w3.org/1999/02/22-rdf-syntax-ns#_0"), None);
        assert_eq!(rdf::member_ordinal("http://www.w3.org/1999/02/22-rdf-syntax-ns#_"), None);
    }

    #[test]
    fn expand_and_shorten() {
        let register = NamespaceRegister::shared();
        assert_eq!(register.expand("rdf:type").as_deref(), Some(rdf::TYPE));
        assert_eq!(register.shorten(xsd::INTEGER).as_deref(), Some("xsd:integer"));
        assert_eq!(register.expand("foaf:knows"), None);
    }

    #[test]
    fn keep_refuses_overwrites() {
        let mut register = NamespaceRegister::builtin();
        assert!(register.keep("foaf", "http://xmlns.com/foaf/0.1/").unwrap());
        assert!(!register.keep("foaf", "http://example.org/other/").unwrap());
        assert!(!register.keep("rdf2", rdf::NAMESPACE).unwrap());
        assert_eq!(register.namespace("foaf"), Some("http://xmlns.com/foaf/0.1/"));
        assert!(register.keep("bad", "not an iri").is_err());
    }
}
