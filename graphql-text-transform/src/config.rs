//! Rewrite configuration.
use apollo_compiler::Name;
use displaydoc::Display;
use schemars::JsonSchema;
use schemars::schema::RootSchema;
use serde::Deserialize;
use thiserror::Error;

pub(crate) const DEFAULT_ENUM_NAME: &str = "TextTransform";
pub(crate) const DEFAULT_ARGUMENT_NAME: &str = "transform";

/// Configuration errors.
#[derive(Debug, Error, Display, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// could not read configuration: {0}
    InvalidConfiguration(String),

    /// '{value}' is not a valid GraphQL name for {option}
    InvalidName {
        /// The configuration option holding the name.
        option: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Text transform configuration
///
/// Example `text_transform.yaml`:
///
/// ```yaml
/// enabled: true
/// enum_name: TextTransform
/// argument_name: transform
/// ```
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Configuration {
    /// Enable the rewrite pass. When disabled the schema graph is left untouched.
    pub enabled: bool,

    /// Name of the enumeration registered into the schema
    pub enum_name: String,

    /// Name of the optional argument added to every text field
    pub argument_name: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enabled: true,
            enum_name: DEFAULT_ENUM_NAME.to_string(),
            argument_name: DEFAULT_ARGUMENT_NAME.to_string(),
        }
    }
}

impl Configuration {
    /// Parses a YAML document, filling omitted options with their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigurationError> {
        serde_yaml::from_str(yaml)
            .map_err(|error| ConfigurationError::InvalidConfiguration(error.to_string()))
    }

    /// JSON schema of the configuration, for editor support.
    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(Configuration)
    }

    pub(crate) fn enum_name(&self) -> Result<Name, ConfigurationError> {
        graphql_name("enum_name", &self.enum_name)
    }

    pub(crate) fn argument_name(&self) -> Result<Name, ConfigurationError> {
        graphql_name("argument_name", &self.argument_name)
    }
}

fn graphql_name(option: &'static str, value: &str) -> Result<Name, ConfigurationError> {
    Name::new(value).map_err(|_| ConfigurationError::InvalidName {
        option,
        value: value.to_string(),
    })
}
