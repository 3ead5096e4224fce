//! Text casing transformations applied to resolved field values.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::LazyLock;

use apollo_compiler::Name;
use apollo_compiler::name;
use displaydoc::Display;
use regex::Captures;
use regex::Regex;
use serde_json_bytes::Value;
use thiserror::Error;

use crate::error::FieldError;

pub(crate) mod builder;

pub use builder::build_transform;

#[allow(clippy::expect_used)] // constant pattern
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// The closed set of transformation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextCase {
    /// Converts the whole text to upper case
    Upper,
    /// Converts the whole text to lower case
    Lower,
    /// Capitalizes the first letter of every word and lower-cases the rest
    Title,
}

impl TextCase {
    pub const ALL: [TextCase; 3] = [TextCase::Upper, TextCase::Lower, TextCase::Title];

    /// The enum value name used in the schema.
    pub fn value_name(self) -> Name {
        match self {
            TextCase::Upper => name!("UPPERCASE"),
            TextCase::Lower => name!("LOWERCASE"),
            TextCase::Title => name!("TITLECASE"),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TextCase::Upper => "Converts the text to upper case",
            TextCase::Lower => "Converts the text to lower case",
            TextCase::Title => "Capitalizes the first letter of every word",
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            TextCase::Upper => text.to_uppercase(),
            TextCase::Lower => text.to_lowercase(),
            TextCase::Title => title_case(text),
        }
    }
}

impl fmt::Display for TextCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value_name().as_str())
    }
}

/// unknown text transform '{0}'
#[derive(Debug, Error, Display, Clone, PartialEq, Eq)]
pub struct UnknownTextCase(pub String);

impl FromStr for TextCase {
    type Err = UnknownTextCase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextCase::ALL
            .into_iter()
            .find(|case| case.value_name().as_str() == s)
            .ok_or_else(|| UnknownTextCase(s.to_string()))
    }
}

fn title_case(text: &str) -> String {
    WORD.replace_all(text, |word: &Captures| {
        let mut chars = word[0].chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    })
    .into_owned()
}

type TransformFn = dyn Fn(Value, Option<&Value>) -> Result<Value, FieldError> + Send + Sync;

/// A transformation shaped like one field's output type.
///
/// It takes the resolved value and the caller-supplied mode, if any.
#[derive(Clone)]
pub struct Transform {
    argument: Name,
    apply: Arc<TransformFn>,
}

impl Transform {
    /// Transforms a text value according to the mode.
    ///
    /// Values that are not strings, and any value when no mode is given, pass through unchanged.
    pub(crate) fn text(argument: Name) -> Self {
        let argument_name = argument.clone();
        Self::new(argument, move |value, mode| match (value, mode) {
            (Value::String(text), Some(mode)) => {
                let case = mode
                    .as_str()
                    .and_then(|mode| mode.parse::<TextCase>().ok())
                    .ok_or_else(|| FieldError::InvalidArgument {
                        argument: argument_name.to_string(),
                        value: mode.to_string(),
                    })?;
                Ok(Value::String(case.apply(text.as_str()).into()))
            }
            (value, _) => Ok(value),
        })
    }

    /// Applies `item` to every element of a list value.
    ///
    /// Values that are not lists, and any value when no mode is given, pass through unchanged.
    pub(crate) fn list(item: Transform) -> Self {
        Self::new(item.argument.clone(), move |value, mode| match (value, mode) {
            (Value::Array(items), Some(mode)) => items
                .into_iter()
                .map(|element| item.apply(element, Some(mode)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (value, _) => Ok(value),
        })
    }

    fn new(
        argument: Name,
        apply: impl Fn(Value, Option<&Value>) -> Result<Value, FieldError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            argument,
            apply: Arc::new(apply),
        }
    }

    pub fn apply(&self, value: Value, mode: Option<&Value>) -> Result<Value, FieldError> {
        (self.apply)(value, mode)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("argument", &self.argument)
            .finish_non_exhaustive()
    }
}
