//! Lexical classification of a single command-line token.
//!
//! Classification looks only at the token's shape; whether the named flag or
//! option is actually registered is decided afterwards by
//! [`InputRegistry`](crate::InputRegistry).
//!
//! | Token            | Shape                                  |
//! |------------------|----------------------------------------|
//! | `name`           | [`TokenShape::Parameter`]              |
//! | `--name`         | [`TokenShape::LongFlag`]               |
//! | `--name=value`   | [`TokenShape::LongOption`]             |
//! | `-x`             | [`TokenShape::ShortFlag`]              |
//! | `-xyz`           | [`TokenShape::CombinedFlags`]          |
//! | `-x=value`       | [`TokenShape::ShortOption`]            |
//! | `-`              | [`TokenShape::EmptyShort`]             |

/// Shape of one raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenShape<'a> {
    Parameter(&'a str),
    LongOption { name: &'a str, value: &'a str },
    LongFlag(&'a str),
    ShortOption { name: &'a str, value: &'a str },
    ShortFlag(&'a str),
    /// Several one-character flags sharing a dash; holds the undashed token.
    CombinedFlags(&'a str),
    /// A short-form token with no name after its dashes.
    EmptyShort(&'a str),
}

/// Classifies `token` by its leading dashes and first `=`.
///
/// All leading dashes are stripped from a dash-prefixed token, so `---x`
/// is read as the long flag `x`. Only the first `=` separates name from
/// value.
///
/// # Examples
///
/// ```
/// use cmdline_input_core::{TokenShape, classify_token};
///
/// assert_eq!(classify_token("viennois"), TokenShape::Parameter("viennois"));
/// assert_eq!(
///     classify_token("--color=blue=green"),
///     TokenShape::LongOption { name: "color", value: "blue=green" }
/// );
/// assert_eq!(classify_token("-vf"), TokenShape::CombinedFlags("vf"));
/// ```
pub fn classify_token(token: &str) -> TokenShape<'_> {
    if !token.starts_with('-') {
        return TokenShape::Parameter(token);
    }

    let stripped = token.trim_start_matches('-');
    let split = stripped.split_once('=');

    if token.starts_with("--") {
        return match split {
            Some((name, value)) => TokenShape::LongOption { name, value },
            None => TokenShape::LongFlag(stripped),
        };
    }

    match split {
        Some((name, value)) => TokenShape::ShortOption { name, value },
        None => match stripped.chars().count() {
            0 => TokenShape::EmptyShort(stripped),
            1 => TokenShape::ShortFlag(stripped),
            _ => TokenShape::CombinedFlags(stripped),
        },
    }
}
