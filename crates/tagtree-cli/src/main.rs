//! `tagtree` CLI — convert JSON and TOML documents into tag trees and inspect them.
//!
//! ## Usage
//!
//! ```sh
//! # Convert JSON (stdin → stdout), rendered as text
//! echo '{"name":"Alice","level":"7s"}' | tagtree convert
//!
//! # Convert a TOML file to indented simplified JSON
//! tagtree convert -i config.toml --format simplified
//!
//! # List top-level keys with their tag types
//! tagtree inspect -i data.json
//!
//! # Read one value through a coercing accessor
//! tagtree get owner.level --as double -i config.toml
//! ```
//!
//! Warnings (skipped values, depth limits) go to stderr. Set `RUST_LOG` to
//! change verbosity, e.g. `RUST_LOG=tagtree=debug`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::Path;
use tagtree::convert::DEFAULT_MAX_DEPTH;
use tagtree::{CompoundTag, ConvertOptions, Tag};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "tagtree",
    version,
    about = "Convert JSON and TOML documents into NBT-style tag trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document into a tag tree and print it
    Convert {
        #[command(flatten)]
        source: Source,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Rendering of the converted tree
        #[arg(long, value_enum, default_value_t = Rendering::Display)]
        format: Rendering,
    },
    /// List the top-level keys of the converted tree with their tag types
    Inspect {
        #[command(flatten)]
        source: Source,
    },
    /// Print the value at a dot-separated path
    Get {
        /// Dot-separated path, e.g. `owner.address.zip`
        path: String,
        #[command(flatten)]
        source: Source,
        /// Read the value through a coercing accessor
        #[arg(long = "as", value_enum)]
        accessor: Option<Accessor>,
    },
}

/// Where the document comes from and how it is converted.
#[derive(Args)]
struct Source {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Input format (defaults to the file extension, else JSON)
    #[arg(long, value_enum)]
    from: Option<InputFormat>,
    /// Keep `"<digits>s"` strings as strings instead of shorts
    #[arg(long)]
    no_short_suffix: bool,
    /// Deepest composite nesting to convert
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Json,
    Toml,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Rendering {
    /// Natural text form: `{key: value}`, `[1, 2, 3]`
    Display,
    /// Indented JSON-like form with quoted strings
    Simplified,
    /// Pretty-printed JSON
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Accessor {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagtree=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            source,
            output,
            format,
        } => {
            let tag = source.load()?;
            let rendered = match format {
                Rendering::Display => tag.to_string(),
                Rendering::Simplified => tag.to_json_simplified(),
                Rendering::Json => {
                    serde_json::to_string_pretty(&tag).context("Failed to serialize tag tree")?
                }
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Inspect { source } => {
            let tag = source.load()?;
            let report = match tag.as_compound() {
                Ok(root) => root
                    .iter()
                    .map(|(key, value)| describe(key, value))
                    .collect::<Vec<_>>()
                    .join("\n"),
                Err(_) => describe("<root>", &tag),
            };
            write_output(None, &report)?;
        }
        Commands::Get {
            path,
            source,
            accessor,
        } => {
            let tag = source.load()?;
            let root = tag
                .as_compound()
                .context("Document root is not a compound")?;
            let value = root
                .get_deep(&path)
                .with_context(|| format!("No value at path: {}", path))?;
            let rendered = match accessor {
                None => value.to_string(),
                Some(accessor) => read_as(value, accessor)
                    .with_context(|| format!("Cannot read {} as requested", path))?,
            };
            write_output(None, &rendered)?;
        }
    }

    Ok(())
}

impl Source {
    fn options(&self) -> ConvertOptions {
        ConvertOptions::default()
            .with_short_suffix(!self.no_short_suffix)
            .with_max_depth(self.max_depth)
    }

    /// Resolve the input format: explicit `--from`, then the file extension.
    fn format(&self) -> InputFormat {
        if let Some(format) = self.from {
            return format;
        }
        match self
            .input
            .as_deref()
            .and_then(|p| Path::new(p).extension())
            .and_then(|e| e.to_str())
        {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => InputFormat::Toml,
            _ => InputFormat::Json,
        }
    }

    /// Read, parse and convert the document.
    fn load(&self) -> Result<Tag> {
        let text = read_input(self.input.as_deref())?;
        let options = self.options();
        let format = self.format();
        debug!(input = ?self.input, ?format, "loading document");
        match format {
            InputFormat::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(&text).context("Failed to parse JSON input")?;
                tagtree::to_tag_with(&value, &options).context("Failed to convert JSON input")
            }
            InputFormat::Toml => {
                let table: toml::Table = text.parse().context("Failed to parse TOML input")?;
                Ok(Tag::Compound(tagtree::translate_section(
                    CompoundTag::new(),
                    &table,
                    &options,
                )))
            }
        }
    }
}

/// One `inspect` line: `key: Type (id)`, plus the length for composites.
fn describe(key: &str, value: &Tag) -> String {
    let ty = value.tag_type();
    match value {
        Tag::List(list) => format!("{}: {} ({}) [{}]", key, ty, ty.id(), list.len()),
        Tag::Compound(map) => format!("{}: {} ({}) [{}]", key, ty, ty.id(), map.len()),
        _ => format!("{}: {} ({})", key, ty, ty.id()),
    }
}

fn read_as(value: &Tag, accessor: Accessor) -> tagtree::error::Result<String> {
    Ok(match accessor {
        Accessor::Byte => value.as_byte()?.to_string(),
        Accessor::Short => value.as_short()?.to_string(),
        Accessor::Int => value.as_int()?.to_string(),
        Accessor::Long => value.as_long()?.to_string(),
        Accessor::Float => format!("{:?}", value.as_float()?),
        Accessor::Double => format!("{:?}", value.as_double()?),
        Accessor::String => value.as_string(),
    })
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
