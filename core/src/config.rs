//! Registration files.
//!
//! A [`RegistrySpec`] lists the flag and option names a program accepts so
//! they can live in a file next to the program instead of in code. JSON and
//! YAML are supported, chosen by file extension.
//!
//! # Example YAML
//!
//! ```yaml
//! flags:
//!   - v
//!   - f
//!   - verbose
//! options:
//!   - sugars
//!   - color
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::InputRegistry;

/// Errors raised while loading or saving a [`RegistrySpec`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported registration file format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Serializable list of registered names.
///
/// # Examples
///
/// ```
/// use cmdline_input_core::RegistrySpec;
///
/// let spec = RegistrySpec::from_yaml_str("flags: [v]\noptions: [sugars]\n").unwrap();
/// let parsed = spec.registry(["prog", "-v", "--sugars=2"]).parse();
/// assert!(parsed.flag_value("v", false));
/// assert_eq!(parsed.option_str("sugars"), Some("2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySpec {
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

impl RegistrySpec {
    /// Loads a spec from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](ConfigError::UnsupportedFormat) for
    /// other extensions, [`IoError`](ConfigError::IoError) if the file
    /// cannot be read, and a JSON/YAML error if it does not deserialize.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SpecFormat::from_path(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);
        let spec = match format {
            SpecFormat::Json => serde_json::from_reader(reader)?,
            SpecFormat::Yaml => serde_yaml::from_reader(reader)?,
        };
        Ok(spec)
    }

    /// Writes the spec in the format implied by the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = SpecFormat::from_path(path)?;
        let writer = BufWriter::new(std::fs::File::create(path)?);
        match format {
            SpecFormat::Json => serde_json::to_writer_pretty(writer, self)?,
            SpecFormat::Yaml => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Appends names from `other`, skipping ones already listed.
    pub fn merge(&mut self, other: RegistrySpec) {
        for flag in other.flags {
            if !self.flags.contains(&flag) {
                self.flags.push(flag);
            }
        }
        for option in other.options {
            if !self.options.contains(&option) {
                self.options.push(option);
            }
        }
    }

    /// Builds a registry over `argv` with every listed name registered.
    pub fn registry<I, S>(&self, argv: I) -> InputRegistry
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputRegistry::new(argv)
            .add_flags(self.flags.iter().cloned())
            .add_options(self.options.iter().cloned())
    }
}
