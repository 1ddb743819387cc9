use thiserror::Error;

use crate::identity::Identity;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeeperError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
    #[error("Predicate cannot be a blank node: {0}")]
    BlankPredicate(String),
    #[error("Context cannot be a blank node: {0}")]
    BlankContext(String),
    #[error("Invalid language tag: {0}")]
    InvalidLanguageTag(String),
    #[error("Invalid base direction: {0} (expected ltr or rtl)")]
    InvalidDirection(String),
    #[error("Literal value {value:?} is not valid for datatype {datatype}")]
    InvalidLiteral { value: String, datatype: String },
    #[error("Unknown datatype: {0}")]
    UnknownDatatype(String),
    #[error("Object and literal cannot both be bound in the same pattern")]
    ObjectLiteralConflict,
    #[error("Identity collision on {identity}: {existing} vs {incoming}")]
    IdentityCollision {
        identity: Identity,
        existing: String,
        incoming: String,
    },
}

pub type Result<T> = std::result::Result<T, KeeperError>;

// Helper conversions
impl From<config::ConfigError> for KeeperError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
