//! Flag/option registration and the single classification pass.
//!
//! [`InputRegistry`] is the builder half of a two-phase lifecycle: names are
//! registered first, then [`InputRegistry::parse`] consumes the registry and
//! returns an immutable [`ParsedInput`]. Because `parse` takes `self`, a
//! registry can be parsed at most once.

use std::collections::BTreeMap;

use tracing::debug;

use crate::classify::{TokenShape, classify_token};
use crate::{Diagnostic, DiagnosticSink, OptionValue, ParsedInput};

/// Registered names plus the raw token sequence they will be matched against.
///
/// The first token (the program identifier) is dropped on construction.
///
/// # Examples
///
/// ```
/// use cmdline_input_core::{DiagnosticKind, InputRegistry};
///
/// let parsed = InputRegistry::new(["prog", "-vq", "file.txt"])
///     .add_flag("v")
///     .parse();
///
/// assert!(parsed.flag_value("v", false));
/// assert_eq!(parsed.flag("q"), None);
/// assert_eq!(parsed.param(1), Some("file.txt"));
/// assert_eq!(parsed.diagnostics()[0].kind(), DiagnosticKind::CombinedFlagNotFound);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputRegistry {
    tokens: Vec<String>,
    flags: BTreeMap<String, bool>,
    options: BTreeMap<String, OptionValue>,
}

impl InputRegistry {
    /// Creates a registry over a full invocation, program identifier first.
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: argv.into_iter().skip(1).map(Into::into).collect(),
            flags: BTreeMap::new(),
            options: BTreeMap::new(),
        }
    }

    /// Creates a registry over the current process arguments.
    ///
    /// Arguments that are not valid Unicode are converted lossily.
    pub fn from_env() -> Self {
        Self::new(std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// Registers a flag, initially `false`.
    #[must_use]
    pub fn add_flag(mut self, name: impl Into<String>) -> Self {
        self.flags.insert(name.into(), false);
        self
    }

    /// Registers an option, initially [`OptionValue::Unset`].
    #[must_use]
    pub fn add_option(mut self, name: impl Into<String>) -> Self {
        self.options.insert(name.into(), OptionValue::Unset);
        self
    }

    #[must_use]
    pub fn add_flags<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |registry, name| registry.add_flag(name))
    }

    #[must_use]
    pub fn add_options<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |registry, name| registry.add_option(name))
    }

    /// Tokens that will be classified, program identifier excluded.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_flag_registered(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn is_option_registered(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Classifies every token, keeping diagnostics on the result.
    pub fn parse(self) -> ParsedInput {
        self.parse_with_sink(())
    }

    /// Classifies every token, forwarding each diagnostic to `sink` as it
    /// is produced. The diagnostics are also kept on the result.
    pub fn parse_with_sink(self, sink: impl DiagnosticSink) -> ParsedInput {
        let Self {
            tokens,
            flags,
            options,
        } = self;
        Classifier::new(flags, options, sink).run(&tokens)
    }

    /// Same as [`parse_with_sink`](Self::parse_with_sink) without consuming
    /// the registry.
    pub(crate) fn parse_snapshot(&self, sink: impl DiagnosticSink) -> ParsedInput {
        Classifier::new(self.flags.clone(), self.options.clone(), sink).run(&self.tokens)
    }
}

struct Classifier<S> {
    sink: S,
    parsed: ParsedInput,
}

impl<S: DiagnosticSink> Classifier<S> {
    fn new(
        flags: BTreeMap<String, bool>,
        options: BTreeMap<String, OptionValue>,
        sink: S,
    ) -> Self {
        Self {
            sink,
            parsed: ParsedInput {
                flags,
                options,
                ..ParsedInput::default()
            },
        }
    }

    fn run(mut self, tokens: &[String]) -> ParsedInput {
        for token in tokens {
            let shape = classify_token(token);
            debug!(token = token.as_str(), shape = ?shape, "Classified token");
            self.apply(shape);
        }

        debug!(
            tokens = tokens.len(),
            parameters = self.parsed.parameters.len(),
            diagnostics = self.parsed.diagnostics.len(),
            "Finished classifying command line"
        );
        self.parsed
    }

    fn apply(&mut self, shape: TokenShape<'_>) {
        match shape {
            TokenShape::Parameter(value) => self.parsed.parameters.push(value.to_string()),
            TokenShape::LongOption { name, value } => {
                if !self.set_option(name, value) {
                    self.report(Diagnostic::LongOptionNotFound(name.to_string()));
                }
            }
            TokenShape::ShortOption { name, value } => {
                if !self.set_option(name, value) {
                    self.report(Diagnostic::ShortOptionNotFound(name.to_string()));
                }
            }
            TokenShape::LongFlag(name) => {
                if !self.set_flag(name) {
                    self.report(Diagnostic::LongFlagNotFound(name.to_string()));
                }
            }
            TokenShape::ShortFlag(name) => {
                if !self.set_flag(name) {
                    self.report(Diagnostic::FlagNotFound(name.to_string()));
                }
            }
            TokenShape::CombinedFlags(combined) => {
                let mut buf = [0u8; 4];
                for flag in combined.chars() {
                    if !self.set_flag(flag.encode_utf8(&mut buf)) {
                        self.report(Diagnostic::CombinedFlagNotFound {
                            flag,
                            combined: combined.to_string(),
                        });
                    }
                }
            }
            TokenShape::EmptyShort(rest) => {
                self.report(Diagnostic::UnknownShortOptionType(rest.to_string()));
            }
        }
    }

    /// Returns `false` when `name` is not a registered flag.
    fn set_flag(&mut self, name: &str) -> bool {
        match self.parsed.flags.get_mut(name) {
            Some(on) => {
                *on = true;
                true
            }
            None => false,
        }
    }

    /// Returns `false` when `name` is not a registered option.
    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match self.parsed.options.get_mut(name) {
            Some(slot) => {
                *slot = OptionValue::from(value);
                true
            }
            None => false,
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.sink.report(&diagnostic);
        self.parsed.diagnostics.push(diagnostic);
    }
}
