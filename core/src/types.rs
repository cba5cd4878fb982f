//! Parsed values produced by a single classification pass.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::Diagnostic;

/// Value held by a registered option.
///
/// Options start out [`Unset`](OptionValue::Unset) and only change when a
/// `name=value` token names them. It serializes as `false` when unset and
/// as the plain string otherwise.
///
/// # Examples
///
/// ```
/// use cmdline_input_core::OptionValue;
///
/// let unset = OptionValue::Unset;
/// assert!(!unset.is_set());
/// assert_eq!(unset.as_str(), None);
///
/// let set = OptionValue::from("2");
/// assert_eq!(set.as_str(), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OptionValue {
    /// Registered but never supplied.
    #[default]
    Unset,
    /// Value supplied on the command line.
    Set(String),
}

impl OptionValue {
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Set(value) => Some(value.as_str()),
            Self::Unset => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Set(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Set(value)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(value) => f.write_str(value),
            Self::Unset => f.write_str("false"),
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => serializer.serialize_str(value),
            Self::Unset => serializer.serialize_bool(false),
        }
    }
}

/// Immutable result of classifying a token sequence.
///
/// Produced by [`InputRegistry::parse`](crate::InputRegistry::parse). Flags
/// and options hold exactly the names that were registered; parameters are
/// addressed from 1 in the order they appeared.
///
/// # Examples
///
/// ```
/// use cmdline_input_core::{InputRegistry, OptionValue};
///
/// let parsed = InputRegistry::new(["prog", "makecoffee", "-v", "--sugars=2", "viennois"])
///     .add_flag("v")
///     .add_option("sugars")
///     .parse();
///
/// assert_eq!(parsed.parameter(1, ""), "makecoffee");
/// assert_eq!(parsed.parameter(2, ""), "viennois");
/// assert!(parsed.flag_value("v", false));
/// assert_eq!(parsed.option_str("sugars"), Some("2"));
/// assert_eq!(parsed.option_value("milk", &OptionValue::Unset), &OptionValue::Unset);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedInput {
    pub(crate) flags: BTreeMap<String, bool>,
    pub(crate) options: BTreeMap<String, OptionValue>,
    pub(crate) parameters: Vec<String>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl ParsedInput {
    /// Returns the flag's value if registered, otherwise `default`.
    pub fn flag_value(&self, name: &str, default: bool) -> bool {
        self.flag(name).unwrap_or(default)
    }

    /// Returns the option's value if registered, otherwise `default`.
    ///
    /// A registered option that never appeared yields
    /// [`OptionValue::Unset`], not `default`.
    pub fn option_value<'a>(&'a self, name: &str, default: &'a OptionValue) -> &'a OptionValue {
        self.option(name).unwrap_or(default)
    }

    /// Returns the parameter at the 1-based `index`, otherwise `default`.
    pub fn parameter<'a>(&'a self, index: usize, default: &'a str) -> &'a str {
        self.param(index).unwrap_or(default)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Supplied value of a registered option, `None` when unset or
    /// unregistered.
    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(OptionValue::as_str)
    }

    /// 1-based parameter lookup. Index 0 is never populated.
    pub fn param(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.parameters.get(i))
            .map(String::as_str)
    }

    /// Parameters in encounter order; `parameters()[0]` is parameter 1.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Names of flags that were switched on, sorted.
    pub fn enabled_flags(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    pub fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    pub fn options(&self) -> &BTreeMap<String, OptionValue> {
        &self.options
    }

    /// Every classification failure, in token order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
