//! Accessor-driven facade that parses on first read.
//!
//! [`CommandLineInput`] keeps the register-then-query contract of a classic
//! argument object: names are registered through `&mut self`, and the first
//! call to any accessor runs the classification pass. The pass is guarded by
//! a [`OnceLock`], so it runs at most once even when accessors race on
//! several threads.

use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::warn;

use crate::{DiagnosticSink, InputRegistry, OptionValue, ParsedInput, TracingSink};

type BoxedSink = Box<dyn DiagnosticSink + Send>;

/// Lazily parsed command line.
///
/// Diagnostics go to a [`TracingSink`] unless another sink is installed
/// with [`with_sink`](Self::with_sink).
///
/// # Examples
///
/// ```
/// use cmdline_input_core::CommandLineInput;
///
/// let mut input = CommandLineInput::new(["prog", "makecoffee", "-v", "--sugars=2"]);
/// input.add_flag("v").add_option("sugars");
///
/// assert!(!input.is_prepared());
/// assert_eq!(input.parameter(1, ""), "makecoffee");
/// assert!(input.is_prepared());
/// assert!(input.flag_value("v", false));
/// ```
pub struct CommandLineInput {
    registry: InputRegistry,
    sink: Mutex<Option<BoxedSink>>,
    parsed: OnceLock<ParsedInput>,
}

impl CommandLineInput {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_registry(InputRegistry::new(argv))
    }

    pub fn from_env() -> Self {
        Self::from_registry(InputRegistry::from_env())
    }

    /// Wraps an already populated registry.
    pub fn from_registry(registry: InputRegistry) -> Self {
        Self {
            registry,
            sink: Mutex::new(Some(Box::new(TracingSink) as BoxedSink)),
            parsed: OnceLock::new(),
        }
    }

    /// Replaces the sink that receives diagnostics during the parse.
    #[must_use]
    pub fn with_sink(self, sink: impl DiagnosticSink + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Some(Box::new(sink) as BoxedSink)),
            ..self
        }
    }

    /// Registers a flag. Ignored once the command line has been parsed.
    pub fn add_flag(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self.is_prepared() {
            warn!(flag = name.as_str(), "Flag registered after parsing, ignoring");
            return self;
        }
        self.registry = std::mem::take(&mut self.registry).add_flag(name);
        self
    }

    /// Registers an option. Ignored once the command line has been parsed.
    pub fn add_option(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self.is_prepared() {
            warn!(option = name.as_str(), "Option registered after parsing, ignoring");
            return self;
        }
        self.registry = std::mem::take(&mut self.registry).add_option(name);
        self
    }

    pub fn is_prepared(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// Parses on first use and returns the shared result.
    pub fn parsed(&self) -> &ParsedInput {
        self.parsed.get_or_init(|| {
            let sink = self
                .sink
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            match sink {
                Some(sink) => self.registry.parse_snapshot(sink),
                None => self.registry.parse_snapshot(()),
            }
        })
    }

    pub fn flag_value(&self, name: &str, default: bool) -> bool {
        self.parsed().flag_value(name, default)
    }

    pub fn option_value<'a>(&'a self, name: &str, default: &'a OptionValue) -> &'a OptionValue {
        self.parsed().option_value(name, default)
    }

    pub fn parameter<'a>(&'a self, index: usize, default: &'a str) -> &'a str {
        self.parsed().parameter(index, default)
    }
}

impl std::fmt::Debug for CommandLineInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLineInput")
            .field("registry", &self.registry)
            .field("parsed", &self.parsed.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::Diagnostic;

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<Diagnostic>>>);

    impl DiagnosticSink for SharedSink {
        fn report(&mut self, diagnostic: &Diagnostic) {
            self.0.lock().unwrap().push(diagnostic.clone());
        }
    }

    #[test]
    fn test_any_accessor_populates_everything() {
        let mut input = CommandLineInput::new(["prog", "a", "-v", "--name=x"]);
        input.add_flag("v").add_option("name");

        assert!(input.flag_value("v", false));
        assert_eq!(input.parsed().param(1), Some("a"));
        assert_eq!(input.option_value("name", &OptionValue::Unset).as_str(), Some("x"));
    }

    #[test]
    fn test_parse_runs_once_across_repeated_calls() {
        let sink = SharedSink::default();
        let mut input = CommandLineInput::new(["prog", "--missing"]).with_sink(sink.clone());
        input.add_flag("v");

        for _ in 0..3 {
            assert!(!input.flag_value("v", true));
            assert_eq!(input.parameter(1, "none"), "none");
        }
        assert_eq!(sink.0.lock().unwrap().len(), 1);
        assert_eq!(input.parsed().diagnostics().len(), 1);
    }

    #[test]
    fn test_late_registration_has_no_effect() {
        let mut input = CommandLineInput::new(["prog", "-v"]);
        assert!(!input.flag_value("v", false));
        input.add_flag("v");
        assert_eq!(input.parsed().flag("v"), None);
        assert_eq!(input.parsed().diagnostics().len(), 1);
    }

    #[test]
    fn test_concurrent_accessors_parse_once() {
        let sink = SharedSink::default();
        let mut input = CommandLineInput::new(["prog", "p1", "-z"]).with_sink(sink.clone());
        input.add_flag("v");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(input.parameter(1, ""), "p1");
                    assert!(!input.flag_value("v", true));
                });
            }
        });
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }
}
