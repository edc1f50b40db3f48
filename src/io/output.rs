use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::FormSchema;

use super::DocumentFormat;

/// Destination for an exported schema.
#[derive(Debug, Clone)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
    /// Write into a directory under the schema's export file name.
    Directory(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }

    pub fn directory(path: impl AsRef<Path>) -> Self {
        OutputDestination::Directory(path.as_ref().to_path_buf())
    }
}

/// Controls how a schema is serialized on export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl ExportOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn add_destination(mut self, destination: OutputDestination) -> Self {
        self.destinations.push(destination);
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// File name offered for a download of `name`: whitespace runs become `_`.
pub fn export_file_name(name: &str, format: DocumentFormat) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(ch);
            in_space = false;
        }
    }
    format!("{stem}.{}", format.extension())
}

pub fn serialize_schema(schema: &FormSchema, options: &ExportOptions) -> Result<String> {
    match options.format {
        DocumentFormat::Json => {
            if options.pretty {
                serde_json::to_string_pretty(schema).context("failed to serialize JSON")
            } else {
                serde_json::to_string(schema).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(schema).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if options.pretty {
                toml::to_string_pretty(schema).context("failed to serialize TOML")
            } else {
                toml::to_string(schema).context("failed to serialize TOML")
            }
        }
    }
}

/// Serialize `schema` and write it to every configured destination.
/// Returns the files that were written.
pub fn emit(schema: &FormSchema, options: &ExportOptions) -> Result<Vec<PathBuf>> {
    if options.destinations.is_empty() {
        return Ok(Vec::new());
    }
    let payload = serialize_schema(schema, options)?;
    let mut written = Vec::new();
    for destination in &options.destinations {
        let target = match destination {
            OutputDestination::Stdout => None,
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Directory(dir) => {
                Some(dir.join(export_file_name(&schema.name, options.format)))
            }
        };
        write_payload(target.as_deref(), &payload).with_context(|| match &target {
            None => "failed to write to stdout".to_string(),
            Some(path) => format!("failed to write to file {}", path.display()),
        })?;
        if let Some(path) = target {
            debug!(path = %path.display(), "exported schema");
            written.push(path);
        }
    }
    Ok(written)
}

fn write_payload(target: Option<&Path>, payload: &str) -> Result<()> {
    match target {
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(payload.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .context("failed to flush stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            let mut file = File::create(path)?;
            file.write_all(payload.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
            Ok(())
        }
    }
}
