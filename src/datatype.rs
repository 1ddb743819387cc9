// used to validate the temporal lexical forms
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
// used to validate decimal numbers of arbitrary size
use bigdecimal::BigDecimal;
// so regular expressions don't have to be recompiled
use lazy_static::lazy_static;
use regex::Regex;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{KeeperError, Result};
use crate::vocab::{rdf, rdfs, xsd};

lazy_static! {
    static ref BOOLEAN: Regex = Regex::new(r"^(true|false|1|0)$").unwrap();
    static ref INTEGER: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").unwrap();
    static ref FLOATING: Regex =
        Regex::new(r"^([+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?|[+-]?INF|NaN)$").unwrap();
    static ref TIMEZONE: Regex = Regex::new(r"(Z|[+-]([01][0-9]|2[0-3]):[0-5][0-9])$").unwrap();
    static ref G_YEAR: Regex = Regex::new(r"^-?[0-9]{4,}$").unwrap();
    static ref G_YEAR_MONTH: Regex = Regex::new(r"^-?[0-9]{4,}-(0[1-9]|1[0-2])$").unwrap();
    pub(crate) static ref LANGUAGE_TAG: Regex =
        Regex::new(r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").unwrap();
    static ref HEX_BINARY: Regex = Regex::new(r"^([0-9a-fA-F]{2})*$").unwrap();
    static ref BASE64_BINARY: Regex =
        Regex::new(r"^([A-Za-z0-9+/]{4})*([A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$").unwrap();
    static ref BUILTIN_DATATYPES: DatatypeRegister = DatatypeRegister::builtin();
}

// ------------- Grammars -------------
/// The lexical space a typed literal's value must belong to.
#[derive(Debug, Clone)]
pub enum Grammar {
    Any,
    Boolean,
    Decimal,
    Integer { min: Option<i128>, max: Option<i128> },
    Floating,
    DateTime,
    Date,
    Time,
    GYear,
    GYearMonth,
    Language,
    AnyUri,
    HexBinary,
    Base64Binary,
    Json,
    Pattern(Regex),
}

impl Grammar {
    pub fn accepts(&self, lexical: &str) -> bool {
        match self {
            Grammar::Any => true,
            Grammar::Boolean => BOOLEAN.is_match(lexical),
            Grammar::Decimal => DECIMAL.is_match(lexical) && BigDecimal::from_str(lexical).is_ok(),
            Grammar::Integer { min, max } => {
                if !INTEGER.is_match(lexical) {
                    return false;
                }
                if min.is_none() && max.is_none() {
                    return true;
                }
                // bounded integer types all fit in an i128
                match lexical.parse::<i128>() {
                    Ok(n) => min.is_none_or(|m| n >= m) && max.is_none_or(|m| n <= m),
                    Err(_) => false,
                }
            }
            Grammar::Floating => FLOATING.is_match(lexical),
            Grammar::DateTime => {
                NaiveDateTime::parse_from_str(strip_timezone(lexical), "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            }
            Grammar::Date => NaiveDate::parse_from_str(strip_timezone(lexical), "%Y-%m-%d").is_ok(),
            Grammar::Time => NaiveTime::parse_from_str(strip_timezone(lexical), "%H:%M:%S%.f").is_ok(),
            Grammar::GYear => G_YEAR.is_match(strip_timezone(lexical)),
            Grammar::GYearMonth => G_YEAR_MONTH.is_match(strip_timezone(lexical)),
            Grammar::Language => LANGUAGE_TAG.is_match(lexical),
            Grammar::AnyUri => !lexical.chars().any(char::is_whitespace),
            Grammar::HexBinary => HEX_BINARY.is_match(lexical),
            Grammar::Base64Binary => {
                let compact: String = lexical.chars().filter(|c| !c.is_whitespace()).collect();
                BASE64_BINARY.is_match(&compact)
            }
            Grammar::Json => serde_json::from_str::<serde_json::Value>(lexical).is_ok(),
            Grammar::Pattern(pattern) => pattern.is_match(lexical),
        }
    }
}

fn strip_timezone(lexical: &str) -> &str {
    match TIMEZONE.find(lexical) {
        Some(tz) => &lexical[..tz.start()],
        None => lexical,
    }
}

// ------------- Datatype -------------
#[derive(Debug, Clone)]
pub struct Datatype {
    iri: String,
    grammar: Grammar,
}

impl Datatype {
    pub fn new(iri: &str, grammar: Grammar) -> Self {
        Self {
            iri: iri.to_string(),
            grammar,
        }
    }
    pub fn iri(&self) -> &str {
        &self.iri
    }
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }
    pub fn accepts(&self, lexical: &str) -> bool {
        self.grammar.accepts(lexical)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iri)
    }
}

// ------------- DatatypeRegister -------------
/// Datatypes known to literal validation, keyed by IRI.
///
/// [`DatatypeRegister::shared`] is the immutable built-in set used by
/// [`crate::term::TypedLiteral::new`]. Custom datatypes are kept in an owned
/// register and passed to [`crate::term::TypedLiteral::with_register`].
#[derive(Debug, Clone, Default)]
pub struct DatatypeRegister {
    kept: HashMap<String, Datatype>,
}

impl DatatypeRegister {
    pub fn new() -> Self {
        Self {
            kept: HashMap::new(),
        }
    }
    pub fn builtin() -> Self {
        let bounded = |min: i128, max: i128| Grammar::Integer {
            min: Some(min),
            max: Some(max),
        };
        let mut register = Self::new();
        for datatype in [
            Datatype::new(rdfs::LITERAL, Grammar::Any),
            Datatype::new(rdf::PLAIN_LITERAL, Grammar::Any),
            Datatype::new(rdf::XML_LITERAL, Grammar::Any),
            Datatype::new(rdf::HTML, Grammar::Any),
            Datatype::new(rdf::JSON, Grammar::Json),
            Datatype::new(xsd::STRING, Grammar::Any),
            Datatype::new(xsd::BOOLEAN, Grammar::Boolean),
            Datatype::new(xsd::DECIMAL, Grammar::Decimal),
            Datatype::new(xsd::INTEGER, Grammar::Integer { min: None, max: None }),
            Datatype::new(xsd::LONG, bounded(i64::MIN as i128, i64::MAX as i128)),
            Datatype::new(xsd::INT, bounded(i32::MIN as i128, i32::MAX as i128)),
            Datatype::new(xsd::SHORT, bounded(i16::MIN as i128, i16::MAX as i128)),
            Datatype::new(xsd::BYTE, bounded(i8::MIN as i128, i8::MAX as i128)),
            Datatype::new(xsd::UNSIGNED_LONG, bounded(0, u64::MAX as i128)),
            Datatype::new(xsd::UNSIGNED_INT, bounded(0, u32::MAX as i128)),
            Datatype::new(xsd::UNSIGNED_SHORT, bounded(0, u16::MAX as i128)),
            Datatype::new(xsd::UNSIGNED_BYTE, bounded(0, u8::MAX as i128)),
            Datatype::new(xsd::NON_NEGATIVE_INTEGER, Grammar::Integer { min: Some(0), max: None }),
            Datatype::new(xsd::POSITIVE_INTEGER, Grammar::Integer { min: Some(1), max: None }),
            Datatype::new(xsd::NON_POSITIVE_INTEGER, Grammar::Integer { min: None, max: Some(0) }),
            Datatype::new(xsd::NEGATIVE_INTEGER, Grammar::Integer { min: None, max: Some(-1) }),
            Datatype::new(xsd::FLOAT, Grammar::Floating),
            Datatype::new(xsd::DOUBLE, Grammar::Floating),
            Datatype::new(xsd::DATE_TIME, Grammar::DateTime),
            Datatype::new(xsd::DATE, Grammar::Date),
            Datatype::new(xsd::TIME, Grammar::Time),
            Datatype::new(xsd::G_YEAR, Grammar::GYear),
            Datatype::new(xsd::G_YEAR_MONTH, Grammar::GYearMonth),
            Datatype::new(xsd::ANY_URI, Grammar::AnyUri),
            Datatype::new(xsd::LANGUAGE, Grammar::Language),
            Datatype::new(xsd::HEX_BINARY, Grammar::HexBinary),
            Datatype::new(xsd::BASE64_BINARY, Grammar::Base64Binary),
        ] {
            register.keep(datatype);
        }
        register
    }
    pub fn shared() -> &'static DatatypeRegister {
        &BUILTIN_DATATYPES
    }
    /// Keeps a datatype, replacing any previous grammar for the same IRI.
    /// Returns whether the IRI was previously kept.
    pub fn keep(&mut self, datatype: Datatype) -> bool {
        self.kept.insert(datatype.iri.clone(), datatype).is_some()
    }
    pub fn get(&self, iri: &str) -> Option<&Datatype> {
        self.kept.get(iri)
    }
    pub fn validate(&self, lexical: &str, iri: &str) -> Result<()> {
        let datatype = self
            .get(iri)
            .ok_or_else(|| KeeperError::UnknownDatatype(iri.to_string()))?;
        if datatype.accepts(lexical) {
            Ok(())
        } else {
            Err(KeeperError::InvalidLiteral {
                value: lexical.to_string(),
                datatype: iri.to_string(),
            })
        }
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
