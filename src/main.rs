use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use evtree::{
    builder::Config,
    flatten,
    formatter::{FormatConfig, Formatter, JsonFormatter, OutlineFormatter},
    parse_script, write_script, TreeBuilder,
};

#[derive(Debug, Parser)]
#[command(
    name = "evtree",
    version,
    about = "Rebuild an element tree from a markup event script"
)]
struct Args {
    /// Event script (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Replace one-element child groups with the bare element
    #[arg(long)]
    collapse: bool,
    /// Keep children in document order instead of grouping by name
    #[arg(long)]
    positional: bool,
    /// Fail on malformed nesting instead of recovering
    #[arg(long)]
    strict: bool,
    /// Fail when no top-level element is produced
    #[arg(long)]
    require_root: bool,
    /// Maximum nesting depth, 0 for unlimited
    #[arg(long, default_value_t = 0)]
    max_depth: u16,
    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Outline,
    /// Flatten the built tree back into an event script
    Events,
}

impl Args {
    fn config(&self) -> Config {
        Config::new(self.max_depth)
            .with_collapse(self.collapse)
            .with_positional(self.positional)
            .with_strict(self.strict)
            .with_require_root(self.require_root)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let script = read_input(args.input.as_ref())?;
    let events = parse_script(&script).context("failed to read event script")?;
    info!(events = events.len(), "events loaded");

    let forest = TreeBuilder::with_config(&events, args.config())
        .build()
        .context("failed to build tree")?;

    let format_config = FormatConfig {
        indent_spaces: args.indent,
        ..FormatConfig::default()
    };
    let mut rendered = match args.format {
        OutputFormat::Json => JsonFormatter.format(&forest, &format_config),
        OutputFormat::Outline => OutlineFormatter.format(&forest, &format_config),
        OutputFormat::Events => write_script(&flatten(&forest)),
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    write_output(args.output.as_ref(), rendered.as_bytes())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
