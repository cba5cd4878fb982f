//! Registry-driven command-line token classification.
//!
//! This crate turns the raw tokens of a program invocation into three
//! mappings:
//!
//! - **flags** — registered boolean switches, `true` once seen (`-v`,
//!   `--verbose`, or one character of a combined `-vf`);
//! - **options** — registered names carrying a string value (`-o=out`,
//!   `--sugars=2`), [`OptionValue::Unset`] until supplied;
//! - **parameters** — every token not starting with `-`, addressed from 1 in
//!   encounter order.
//!
//! Names must be registered before parsing. A token naming something that
//! was never registered is not an error that stops the parse; it produces a
//! [`Diagnostic`] and classification continues.
//!
//! Two entry points share the same classification pass:
//!
//! - [`InputRegistry`] → [`InputRegistry::parse`] → [`ParsedInput`], an
//!   explicit builder/result pair;
//! - [`CommandLineInput`], which parses lazily on the first accessor call.
//!
//! Registrations can also be loaded from JSON or YAML ([`RegistrySpec`]).
//!
//! # Example
//!
//! ```
//! use cmdline_input_core::*;
//!
//! let parsed = InputRegistry::new(["prog", "makecoffee", "-v", "--sugars=2", "viennois"])
//!     .add_flag("v")
//!     .add_option("sugars")
//!     .parse();
//!
//! assert_eq!(parsed.parameter(1, ""), "makecoffee");
//! assert_eq!(parsed.parameter(2, ""), "viennois");
//! assert!(parsed.flag_value("v", false));
//! assert_eq!(parsed.option_str("sugars"), Some("2"));
//! assert!(!parsed.has_diagnostics());
//! ```

mod classify;
mod config;
mod diagnostics;
mod lazy;
mod registry;
mod types;

pub use classify::{TokenShape, classify_token};
pub use config::{ConfigError, RegistrySpec};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink, WriterSink};
pub use lazy::CommandLineInput;
pub use registry::InputRegistry;
pub use types::{OptionValue, ParsedInput};
