//! Schema validation of mosaic config documents.

use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use super::MosaicConfig;
use crate::{Error, Result, Violation};

/// Subject used in validation errors for config documents.
pub const CONFIG_SUBJECT: &str = "mosaic config";

/// Validates decoded documents against the schema derived from the config types.
///
/// The schema is compiled once per validator; documents are validated
/// independently and nothing about them is retained.
pub struct SchemaValidator {
    schema: Value,
    validator: Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile the config schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the generated schema does not compile.
    pub fn new() -> Result<Self> {
        let schema = serde_json::to_value(schemars::schema_for!(MosaicConfig))
            .map_err(|e| Error::configuration(format!("Failed to serialize config schema: {e}")))?;
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| Error::configuration(format!("Failed to compile config schema: {e}")))?;

        Ok(Self { schema, validator })
    }

    /// The JSON Schema documents are validated against.
    #[must_use]
    pub const fn schema(&self) -> &Value {
        &self.schema
    }

    /// Parse TOML source and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for TOML syntax errors (reported at `/`)
    /// and for every schema violation.
    pub fn parse_toml(&self, source: &str) -> Result<MosaicConfig> {
        let document: toml::Table = toml::from_str(source).map_err(|e| {
            Error::validation(CONFIG_SUBJECT, vec![Violation::new("/", e.message())])
        })?;

        let document = serde_json::to_value(document).map_err(|e| {
            Error::validation(CONFIG_SUBJECT, vec![Violation::new("/", e.to_string())])
        })?;

        self.validate(&document)
    }

    /// Validate a decoded document and convert it into a [`MosaicConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] carrying every violation found.
    pub fn validate(&self, document: &Value) -> Result<MosaicConfig> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(document)
            .map(|error| Violation::new(error.instance_path.to_string(), error.to_string()))
            .collect();

        if !violations.is_empty() {
            debug!(count = violations.len(), "Config failed schema validation");
            return Err(Error::validation(CONFIG_SUBJECT, violations));
        }

        serde_path_to_error::deserialize(document).map_err(|e| {
            let path = e.path().to_string();
            let pointer = if path == "." {
                "/".to_string()
            } else {
                format!("/{}", path.replace('.', "/"))
            };
            Error::validation(
                CONFIG_SUBJECT,
                vec![Violation::new(pointer, e.inner().to_string())],
            )
        })
    }
}
