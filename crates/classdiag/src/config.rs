//! Configuration types for classdiag rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file, and rendering options can also be set one at a time from
//! `key=value` strings.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration: output format and render options.
//! - [`RenderOptions`] - What to draw and how to label it.
//! - [`RenderOption`] / [`OptionValue`] - Keyed, type-checked option setting.
//!
//! # Example
//!
//! ```
//! # use classdiag::config::{AppConfig, RenderOption};
//! let mut config = AppConfig::default();
//! config.render_mut().set_str("private_members", "true").unwrap();
//! assert!(config.render().private_members());
//!
//! assert!(config.render_mut().set_str("fields", "maybe").is_err());
//! assert!("colour".parse::<RenderOption>().is_err());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::render::Format;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output format used when none is given explicitly.
    #[serde(default)]
    format: Format,

    /// Rendering options section.
    #[serde(default)]
    render: RenderOptions,
}

impl AppConfig {
    /// Creates a new [`AppConfig`].
    ///
    /// # Arguments
    ///
    /// * `format` - Default output format.
    /// * `render` - Rendering options.
    pub fn new(format: Format, render: RenderOptions) -> Self {
        Self { format, render }
    }

    /// Returns the output format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Overrides the output format.
    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    /// Returns the rendering options.
    pub fn render(&self) -> &RenderOptions {
        &self.render
    }

    /// Returns the rendering options for modification.
    pub fn render_mut(&mut self) -> &mut RenderOptions {
        &mut self.render
    }
}

/// Options controlling what a renderer emits.
///
/// Fields, methods, compositions, implementations and aliases are shown by
/// default; everything else is off or empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    fields: bool,
    methods: bool,
    private_members: bool,
    compositions: bool,
    aggregations: bool,
    implementations: bool,
    aliases: bool,
    aggregate_private_members: bool,
    connection_labels: bool,
    title: String,
    notes: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fields: true,
            methods: true,
            private_members: false,
            compositions: true,
            aggregations: false,
            implementations: true,
            aliases: true,
            aggregate_private_members: false,
            connection_labels: false,
            title: String::new(),
            notes: String::new(),
        }
    }
}

impl RenderOptions {
    pub fn fields(&self) -> bool {
        self.fields
    }

    pub fn methods(&self) -> bool {
        self.methods
    }

    /// Whether non-exported fields and methods are listed.
    pub fn private_members(&self) -> bool {
        self.private_members
    }

    pub fn compositions(&self) -> bool {
        self.compositions
    }

    pub fn aggregations(&self) -> bool {
        self.aggregations
    }

    pub fn implementations(&self) -> bool {
        self.implementations
    }

    pub fn aliases(&self) -> bool {
        self.aliases
    }

    /// Whether aggregation edges also come from non-exported fields.
    pub fn aggregate_private_members(&self) -> bool {
        self.aggregate_private_members
    }

    /// Whether edges carry a relationship label.
    pub fn connection_labels(&self) -> bool {
        self.connection_labels
    }

    /// Diagram title; empty means none.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form legend text; blank means none.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Sets one option.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::InvalidValue`] if `value` has the wrong type for
    /// `option`.
    pub fn set(&mut self, option: RenderOption, value: OptionValue) -> Result<(), OptionError> {
        match (option, value) {
            (RenderOption::Title, OptionValue::Text(text)) => self.title = text,
            (RenderOption::Notes, OptionValue::Text(text)) => self.notes = text,
            (_, OptionValue::Bool(flag)) => match self.flag_mut(option) {
                Some(slot) => *slot = flag,
                None => return Err(option.invalid(flag.to_string())),
            },
            (_, OptionValue::Text(text)) => return Err(option.invalid(text)),
        }
        Ok(())
    }

    /// Parses `key` and `value` and sets the option.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::UnknownOption`] for an unknown key and
    /// [`OptionError::InvalidValue`] for a value that does not fit the option.
    pub fn set_str(&mut self, key: &str, value: &str) -> Result<(), OptionError> {
        let option: RenderOption = key.parse()?;
        let value = OptionValue::parse_for(option, value)?;
        self.set(option, value)
    }

    fn flag_mut(&mut self, option: RenderOption) -> Option<&mut bool> {
        let slot = match option {
            RenderOption::Fields => &mut self.fields,
            RenderOption::Methods => &mut self.methods,
            RenderOption::PrivateMembers => &mut self.private_members,
            RenderOption::Compositions => &mut self.compositions,
            RenderOption::Aggregations => &mut self.aggregations,
            RenderOption::Implementations => &mut self.implementations,
            RenderOption::Aliases => &mut self.aliases,
            RenderOption::AggregatePrivateMembers => &mut self.aggregate_private_members,
            RenderOption::ConnectionLabels => &mut self.connection_labels,
            RenderOption::Title | RenderOption::Notes => return None,
        };
        Some(slot)
    }
}

/// A rendering option key.
///
/// The names match the configuration file keys (snake_case); kebab-case is
/// accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderOption {
    Fields,
    Methods,
    PrivateMembers,
    Compositions,
    Aggregations,
    Implementations,
    Aliases,
    AggregatePrivateMembers,
    ConnectionLabels,
    Title,
    Notes,
}

impl RenderOption {
    /// Whether the option takes text rather than a flag.
    pub fn is_text(&self) -> bool {
        matches!(self, RenderOption::Title | RenderOption::Notes)
    }

    fn invalid(self, value: String) -> OptionError {
        OptionError::InvalidValue {
            option: self,
            value,
            expected: if self.is_text() { "text" } else { "`true` or `false`" },
        }
    }
}

impl FromStr for RenderOption {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").as_str() {
            "fields" => Ok(Self::Fields),
            "methods" => Ok(Self::Methods),
            "private_members" => Ok(Self::PrivateMembers),
            "compositions" => Ok(Self::Compositions),
            "aggregations" => Ok(Self::Aggregations),
            "implementations" => Ok(Self::Implementations),
            "aliases" => Ok(Self::Aliases),
            "aggregate_private_members" => Ok(Self::AggregatePrivateMembers),
            "connection_labels" => Ok(Self::ConnectionLabels),
            "title" => Ok(Self::Title),
            "notes" => Ok(Self::Notes),
            _ => Err(OptionError::UnknownOption(s.to_string())),
        }
    }
}

impl From<RenderOption> for &'static str {
    fn from(val: RenderOption) -> Self {
        match val {
            RenderOption::Fields => "fields",
            RenderOption::Methods => "methods",
            RenderOption::PrivateMembers => "private_members",
            RenderOption::Compositions => "compositions",
            RenderOption::Aggregations => "aggregations",
            RenderOption::Implementations => "implementations",
            RenderOption::Aliases => "aliases",
            RenderOption::AggregatePrivateMembers => "aggregate_private_members",
            RenderOption::ConnectionLabels => "connection_labels",
            RenderOption::Title => "title",
            RenderOption::Notes => "notes",
        }
    }
}

impl fmt::Display for RenderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A value for a [`RenderOption`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
}

impl OptionValue {
    /// Parses `raw` into the value type `option` expects.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::InvalidValue`] when a flag option gets anything
    /// other than `true` or `false`.
    pub fn parse_for(option: RenderOption, raw: &str) -> Result<Self, OptionError> {
        if option.is_text() {
            return Ok(Self::Text(raw.to_string()));
        }
        match raw.trim() {
            "true" => Ok(Self::Bool(true)),
            "false" => Ok(Self::Bool(false)),
            _ => Err(option.invalid(raw.to_string())),
        }
    }
}

/// Errors raised while setting rendering options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown rendering option `{0}`")]
    UnknownOption(String),

    #[error("invalid value `{value}` for rendering option `{option}`: expected {expected}")]
    InvalidValue {
        option: RenderOption,
        value: String,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();

        assert!(options.fields());
        assert!(options.methods());
        assert!(options.compositions());
        assert!(options.implementations());
        assert!(options.aliases());
        assert!(!options.private_members());
        assert!(!options.aggregations());
        assert!(!options.aggregate_private_members());
        assert!(!options.connection_labels());
        assert!(options.title().is_empty());
        assert!(options.notes().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            format = "mermaid"

            [render]
            aggregations = true
            title = "Shop"
            "#,
        )
        .unwrap();

        assert_eq!(config.format(), Format::Mermaid);
        assert!(config.render().aggregations());
        assert!(config.render().fields());
        assert_eq!(config.render().title(), "Shop");
    }

    #[test]
    fn test_deserialize_rejects_unknown_render_key() {
        let result: Result<AppConfig, _> = toml::from_str("[render]\ncolour = true\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_set_str_flags_and_text() {
        let mut options = RenderOptions::default();

        options.set_str("connection-labels", "true").unwrap();
        options.set_str("fields", "false").unwrap();
        options.set_str("notes", "generated").unwrap();

        assert!(options.connection_labels());
        assert!(!options.fields());
        assert_eq!(options.notes(), "generated");
    }

    #[test]
    fn test_set_str_errors() {
        let mut options = RenderOptions::default();

        assert_eq!(
            options.set_str("colour", "true"),
            Err(OptionError::UnknownOption("colour".to_string()))
        );
        assert!(matches!(
            options.set_str("aliases", "yes"),
            Err(OptionError::InvalidValue {
                option: RenderOption::Aliases,
                ..
            })
        ));
    }

    #[test]
    fn test_set_rejects_mismatched_value_type() {
        let mut options = RenderOptions::default();

        assert!(options.set(RenderOption::Title, OptionValue::Bool(true)).is_err());
        assert!(
            options
                .set(RenderOption::Methods, OptionValue::Text("x".to_string()))
                .is_err()
        );
        assert!(options.methods());
        assert!(options.title().is_empty());
    }

    #[test]
    fn test_option_names_round_trip() {
        for option in [
            RenderOption::Fields,
            RenderOption::AggregatePrivateMembers,
            RenderOption::Notes,
        ] {
            assert_eq!(option.to_string().parse::<RenderOption>(), Ok(option));
        }
    }
}
