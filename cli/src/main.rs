use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cmdline_input_core::{ParsedInput, RegistrySpec, TokenShape, WriterSink, classify_token};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "cmdline-input")]
#[command(about = "Classify command-line tokens into flags, options and parameters")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. warn, debug).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an invocation against registered flags and options.
    Parse(ParseArgs),
    /// Show the lexical shape of each token without a registry.
    Classify(ClassifyArgs),
    /// Write a registration file from --flags/--options.
    InitSpec(InitSpecArgs),
}

#[derive(Debug, Clone, Default, Args)]
struct RegistrationArgs {
    /// Comma-separated flag names (e.g. v,f,verbose).
    #[arg(long)]
    flags: Option<String>,
    /// Comma-separated option names (e.g. sugars,color).
    #[arg(long)]
    options: Option<String>,
    /// JSON or YAML registration file; merged with --flags/--options.
    #[arg(long)]
    spec: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    registration: RegistrationArgs,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
    /// Exit with an error when any token could not be classified.
    #[arg(long)]
    strict: bool,
    /// Do not echo diagnostics to stderr.
    #[arg(long)]
    quiet: bool,
    /// Invocation to parse, program identifier first (pass after `--`).
    #[arg(last = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    /// Output format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
    /// Tokens to classify (pass after `--`); no program identifier.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct InitSpecArgs {
    #[command(flatten)]
    registration: RegistrationArgs,
    /// Output path; the extension selects JSON or YAML.
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Classify(args) => run_classify(args),
        Command::InitSpec(args) => run_init_spec(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

/// Failure of a subcommand, mapped to the process exit status by `main`.
#[derive(Debug, Error)]
enum RunError {
    /// Configuration, I/O or serialization failure (exit 1).
    #[error("{0}")]
    Failed(String),
    /// `parse --strict` saw tokens that could not be classified (exit 2).
    #[error("{0} token(s) could not be classified")]
    Unclassified(usize),
}

impl RunError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Failed(_) => 1,
            Self::Unclassified(_) => 2,
        }
    }
}

impl From<String> for RunError {
    fn from(message: String) -> Self {
        Self::Failed(message)
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}

// ---------------------------------------------------------------------------
// parse command
// ---------------------------------------------------------------------------

fn run_parse(args: ParseArgs) -> Result<(), RunError> {
    let spec = load_registration(&args.registration)?;
    debug!(
        flags = spec.flags.len(),
        options = spec.options.len(),
        tokens = args.argv.len(),
        "Parsing invocation"
    );

    let registry = spec.registry(args.argv);
    let parsed = if args.quiet {
        registry.parse()
    } else {
        registry.parse_with_sink(WriterSink::stderr())
    };

    let output = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&parsed)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&parsed)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        CliOutputFormat::Text => render_parsed_text(&parsed),
    };
    println!("{}", output.trim_end());

    if args.strict && parsed.has_diagnostics() {
        return Err(RunError::Unclassified(parsed.diagnostics().len()));
    }
    Ok(())
}

fn render_parsed_text(parsed: &ParsedInput) -> String {
    let mut out = String::new();

    out.push_str("parameters:\n");
    for (i, value) in parsed.parameters().iter().enumerate() {
        let _ = writeln!(out, "  {}: {value}", i + 1);
    }
    out.push_str("flags:\n");
    for (name, on) in parsed.flags() {
        let _ = writeln!(out, "  {name}: {on}");
    }
    out.push_str("options:\n");
    for (name, value) in parsed.options() {
        let _ = writeln!(out, "  {name}: {value}");
    }
    if parsed.has_diagnostics() {
        out.push_str("diagnostics:\n");
        for diagnostic in parsed.diagnostics() {
            let _ = writeln!(out, "  [{}] {diagnostic}", diagnostic.kind());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// classify command
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ShapeRow<'a> {
    token: &'a str,
    shape: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
}

fn shape_row(token: &str) -> ShapeRow<'_> {
    let (shape, name, value) = match classify_token(token) {
        TokenShape::Parameter(value) => ("parameter", None, Some(value)),
        TokenShape::LongOption { name, value } => ("long-option", Some(name), Some(value)),
        TokenShape::LongFlag(name) => ("long-flag", Some(name), None),
        TokenShape::ShortOption { name, value } => ("short-option", Some(name), Some(value)),
        TokenShape::ShortFlag(name) => ("short-flag", Some(name), None),
        TokenShape::CombinedFlags(names) => ("combined-flags", Some(names), None),
        TokenShape::EmptyShort(_) => ("empty-short", None, None),
    };
    ShapeRow {
        token,
        shape,
        name,
        value,
    }
}

fn run_classify(args: ClassifyArgs) -> Result<(), RunError> {
    let rows: Vec<ShapeRow<'_>> = args.tokens.iter().map(|t| shape_row(t)).collect();

    match args.format {
        CliOutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        CliOutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&rows)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            print!("{yaml}");
        }
        CliOutputFormat::Text => {
            for row in &rows {
                let mut line = format!("{:<16} {}", row.shape, row.token);
                if let Some(name) = row.name {
                    let _ = write!(line, "  name={name}");
                }
                if let Some(value) = row.value {
                    let _ = write!(line, "  value={value}");
                }
                println!("{line}");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// init-spec command
// ---------------------------------------------------------------------------

fn run_init_spec(args: InitSpecArgs) -> Result<(), RunError> {
    let spec = load_registration(&args.registration)?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    spec.save(&args.output)
        .map_err(|e| format!("Failed to write '{}': {e}", args.output.display()))?;
    info!(path = %args.output.display(), "Wrote registration file");
    println!(
        "Wrote {} flag(s) and {} option(s) to '{}'.",
        spec.flags.len(),
        spec.options.len(),
        args.output.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

fn load_registration(args: &RegistrationArgs) -> Result<RegistrySpec, String> {
    let mut spec = match &args.spec {
        Some(path) => RegistrySpec::load(path)
            .map_err(|e| format!("Failed to load registration file '{}': {e}", path.display()))?,
        None => RegistrySpec::default(),
    };
    spec.merge(RegistrySpec {
        flags: parse_csv_list(args.flags.clone()),
        options: parse_csv_list(args.options.clone()),
    });
    Ok(spec)
}

fn parse_csv_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}
