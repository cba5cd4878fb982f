//! Classification diagnostics and the sinks that receive them.
//!
//! Nothing the parser encounters is fatal. A token naming an unregistered
//! flag or option produces a [`Diagnostic`], is otherwise ignored, and
//! classification moves on to the next token. Every diagnostic is kept on
//! the [`ParsedInput`](crate::ParsedInput) and can additionally be forwarded
//! to a [`DiagnosticSink`] while parsing runs.
//!
//! # Examples
//!
//! ```
//! use cmdline_input_core::{Diagnostic, DiagnosticKind};
//!
//! let diag = Diagnostic::CombinedFlagNotFound {
//!     flag: 'q',
//!     combined: "vq".to_string(),
//! };
//! assert_eq!(diag.kind(), DiagnosticKind::CombinedFlagNotFound);
//! assert_eq!(diag.to_string(), "Flag not found: q (in combined flags -vq)");
//! ```

use std::fmt;
use std::io::Write;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A non-fatal classification failure.
///
/// The `Display` impl renders the human-readable line written by
/// [`WriterSink`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Unregistered single-character short flag (`-x`).
    #[error("Flag not found: {0}")]
    FlagNotFound(String),
    /// Unregistered character inside a combined short-flag token (`-xyz`).
    #[error("Flag not found: {flag} (in combined flags -{combined})")]
    CombinedFlagNotFound {
        /// The offending character.
        flag: char,
        /// The whole combined token with its dash stripped.
        combined: String,
    },
    /// A short-form token with nothing left after stripping dashes (`-`).
    #[error("Unknown short option type: -{0}")]
    UnknownShortOptionType(String),
    /// Unregistered long option used as `--name=value`.
    #[error("Long option not found: {0}")]
    LongOptionNotFound(String),
    /// Unregistered short option used as `-n=value`.
    #[error("Short option not found: {0}")]
    ShortOptionNotFound(String),
    /// Unregistered long flag (`--name`).
    #[error("Long flag not found: {0}")]
    LongFlagNotFound(String),
}

/// Data-free tag identifying a [`Diagnostic`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    FlagNotFound,
    CombinedFlagNotFound,
    UnknownShortOptionType,
    LongOptionNotFound,
    ShortOptionNotFound,
    LongFlagNotFound,
}

impl DiagnosticKind {
    /// Stable identifier, e.g. `"combinedFlagNotFound"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FlagNotFound => "flagNotFound",
            Self::CombinedFlagNotFound => "combinedFlagNotFound",
            Self::UnknownShortOptionType => "unknownShortOptionType",
            Self::LongOptionNotFound => "longOptionNotFound",
            Self::ShortOptionNotFound => "shortOptionNotFound",
            Self::LongFlagNotFound => "longFlagNotFound",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Diagnostic {
    /// Returns the variant tag.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::FlagNotFound(_) => DiagnosticKind::FlagNotFound,
            Self::CombinedFlagNotFound { .. } => DiagnosticKind::CombinedFlagNotFound,
            Self::UnknownShortOptionType(_) => DiagnosticKind::UnknownShortOptionType,
            Self::LongOptionNotFound(_) => DiagnosticKind::LongOptionNotFound,
            Self::ShortOptionNotFound(_) => DiagnosticKind::ShortOptionNotFound,
            Self::LongFlagNotFound(_) => DiagnosticKind::LongFlagNotFound,
        }
    }

    /// The name (or, for combined flags, the single character) that failed
    /// to resolve.
    pub fn name(&self) -> String {
        match self {
            Self::CombinedFlagNotFound { flag, .. } => flag.to_string(),
            Self::FlagNotFound(name)
            | Self::UnknownShortOptionType(name)
            | Self::LongOptionNotFound(name)
            | Self::ShortOptionNotFound(name)
            | Self::LongFlagNotFound(name) => name.clone(),
        }
    }

    /// The full combined token, only present for
    /// [`CombinedFlagNotFound`](Diagnostic::CombinedFlagNotFound).
    pub fn combined(&self) -> Option<&str> {
        match self {
            Self::CombinedFlagNotFound { combined, .. } => Some(combined.as_str()),
            _ => None,
        }
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 4)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("name", &self.name())?;
        state.serialize_field("combined", &self.combined())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Receives diagnostics as the parser produces them.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Discards everything.
impl DiagnosticSink for () {
    fn report(&mut self, _diagnostic: &Diagnostic) {}
}

/// Collects a copy of each diagnostic.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Emits each diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        tracing::warn!(kind = %diagnostic.kind(), "{diagnostic}");
    }
}

/// Writes one line per diagnostic to the wrapped writer.
///
/// Write failures are dropped; a diagnostic that cannot be displayed must
/// not interrupt classification.
///
/// ```
/// use cmdline_input_core::{Diagnostic, DiagnosticSink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.report(&Diagnostic::LongFlagNotFound("verbose".into()));
/// assert_eq!(sink.into_inner(), b"Long flag not found: verbose\n");
/// ```
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<std::io::Stderr> {
    /// Sink writing to standard error.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let _ = writeln!(self.writer, "{diagnostic}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_reason_token_format() {
        let cases = [
            (Diagnostic::FlagNotFound("x".into()), "Flag not found: x"),
            (
                Diagnostic::UnknownShortOptionType(String::new()),
                "Unknown short option type: -",
            ),
            (
                Diagnostic::LongOptionNotFound("color".into()),
                "Long option not found: color",
            ),
            (
                Diagnostic::ShortOptionNotFound("c".into()),
                "Short option not found: c",
            ),
            (
                Diagnostic::LongFlagNotFound("verbose".into()),
                "Long flag not found: verbose",
            ),
        ];
        for (diag, expected) in cases {
            assert_eq!(diag.to_string(), expected);
        }
    }

    #[test]
    fn test_combined_diagnostic_keeps_char_and_token() {
        let diag = Diagnostic::CombinedFlagNotFound {
            flag: 'z',
            combined: "xyz".into(),
        };
        assert_eq!(diag.name(), "z");
        assert_eq!(diag.combined(), Some("xyz"));
        assert_eq!(Diagnostic::FlagNotFound("z".into()).combined(), None);
    }

    #[test]
    fn test_kind_serializes_camel_case() {
        let json = serde_json::to_value(DiagnosticKind::UnknownShortOptionType).unwrap();
        assert_eq!(json, "unknownShortOptionType");
        assert_eq!(
            DiagnosticKind::LongFlagNotFound.to_string(),
            DiagnosticKind::LongFlagNotFound.as_str()
        );
    }

    #[test]
    fn test_diagnostic_serializes_kind_and_message() {
        let diag = Diagnostic::ShortOptionNotFound("o".into());
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["kind"], "shortOptionNotFound");
        assert_eq!(json["name"], "o");
        assert!(json["combined"].is_null());
        assert_eq!(json["message"], "Short option not found: o");
    }

    #[test]
    fn test_vec_sink_collects_through_mut_ref() {
        fn emit(mut sink: impl DiagnosticSink) {
            sink.report(&Diagnostic::FlagNotFound("a".into()));
            sink.report(&Diagnostic::FlagNotFound("b".into()));
        }

        let mut collected: Vec<Diagnostic> = Vec::new();
        emit(&mut collected);
        assert_eq!(collected.len(), 2);
    }
}
