//! Engine error type.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are
//! configuration or programming mistakes surfaced at the API boundary; the
//! engine performs no I/O of its own, so nothing here is retryable.

use std::path::PathBuf;

/// Errors produced by the simulation core.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid level {level}: levels must be between 1 and 99")]
    InvalidLevel { level: i64 },

    #[error("invalid experience value {xp}: experience must be finite and non-negative")]
    InvalidExperience { xp: f64 },

    #[error("invalid combat stats: {0}")]
    InvalidStats(String),

    #[error("unknown {kind} '{id}'")]
    UnknownCatalogEntry { kind: &'static str, id: String },

    #[error("malformed mechanic '{mechanic}' on monster '{monster}': {reason}")]
    MalformedMechanicDefinition {
        monster: String,
        mechanic: String,
        reason: String,
    },

    #[error("malformed drop table on monster '{monster}': {reason}")]
    MalformedDropTable { monster: String, reason: String },

    #[error("{skill} level {level} is below the required level {required}")]
    RequirementNotMet {
        skill: String,
        required: u32,
        level: u32,
    },

    #[error("missing prerequisite: {0}")]
    MissingPrerequisite(String),

    #[error("invalid rules configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("failed to parse rules file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn unknown(kind: &'static str, id: impl Into<String>) -> Self {
        EngineError::UnknownCatalogEntry {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_message() {
        let err = EngineError::InvalidLevel { level: 120 };
        assert_eq!(
            err.to_string(),
            "invalid level 120: levels must be between 1 and 99"
        );
    }

    #[test]
    fn test_unknown_helper_builds_catalog_error() {
        let err = EngineError::unknown("monster", "Abyssal demon");
        assert!(matches!(
            err,
            EngineError::UnknownCatalogEntry { kind: "monster", ref id } if id == "Abyssal demon"
        ));
    }

    #[test]
    fn test_json_errors_convert() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::CatalogParse(_)));
    }
}
