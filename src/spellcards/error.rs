use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardsError {
    #[error("Entry {id}: missing required field `{field}`")]
    MalformedEntry { id: String, field: &'static str },

    #[error("Entry {id}: {reason}")]
    InvalidEntry { id: String, reason: String },

    #[error("Entry {id}: unreadable markup ({reason})")]
    Markup { id: String, reason: String },

    #[error("Unknown entry: {0}")]
    UnknownEntry(String),

    #[error("Unknown facet group: {0}")]
    UnknownFacetGroup(String),

    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    #[error("Facet {facet} has no value {value}")]
    UnknownFacetValue { facet: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CardsError>;
