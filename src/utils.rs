use std::fs;

use tracing::debug;

use crate::{
    builder::{build, Config},
    error::{Error, ErrorKind, Result},
    formatter::{FormatConfig, Formatter, JsonFormatter, OutlineFormatter},
    model::Forest,
    script::parse_script,
};

pub fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::with_message(ErrorKind::Io, format!("cannot read file {path}: {e}"))
    })
}

pub fn write_file(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        Error::with_message(ErrorKind::Io, format!("cannot write to file {path}: {e}"))
    })
}

/// Parse an event script and build its forest
pub fn build_script(content: &str, config: Config) -> Result<Forest> {
    let events = parse_script(content)?;
    build(&events, config)
}

/// Read an event script from disk and build its forest
pub fn build_file(path: &str, config: Config) -> Result<Forest> {
    debug!(path, "building from file");
    let content = read_file(path)?;
    build_script(&content, config)
}

pub fn format_json(forest: &Forest) -> String {
    JsonFormatter.format(forest, &FormatConfig::default())
}

pub fn format_outline(forest: &Forest) -> String {
    OutlineFormatter.format(forest, &FormatConfig::default())
}
