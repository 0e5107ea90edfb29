//! # Tailwind Prism
//!
//! Paints the structure of utility class lists: variants, important markers,
//! arbitrary values and the utilities themselves.
//!
//! ## Quick Start
//!
//! ```bash
//! # Paint every class list in a file
//! cargo run -- src/Button.tsx
//!
//! # Only the class list under line 12, column 30
//! cargo run -- --mode cursor --cursor 12:30 src/Button.tsx
//!
//! # Machine-readable spans
//! cargo run -- --format json index.html
//! ```

mod terminal;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use prism_buffer::Position;
use prism_core::{PrismConfig, Session};
use prism_syntax::{HighlightMode, HighlightResult};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use terminal::{TerminalHost, render_spans};

/// Tailwind Prism - structural highlighting for utility classes
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to highlight
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Highlight everything, or only the region under the cursor
    #[arg(short, long, value_name = "full|cursor")]
    mode: Option<HighlightMode>,

    /// Cursor position, 1-based
    #[arg(short, long, value_name = "LINE:COL")]
    cursor: Option<Position>,

    /// Color preset (Clear, Soft, Calm, Contrast, Muted)
    #[arg(short, long)]
    preset: Option<String>,

    /// Config file to use instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ansi)]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// The file with 24-bit color escapes
    Ansi,
    /// One line per span
    Spans,
    /// The highlight result as JSON
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: String,
    mode: HighlightMode,
    preset: &'a str,
    highlights: &'a HighlightResult,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Tailwind Prism v{}", env!("CARGO_PKG_VERSION"));

    let output = run(&args)?;
    print!("{output}");

    Ok(())
}

/// Builds the effective config: the stored one, forced on, with CLI overrides.
fn load_config(args: &Args) -> anyhow::Result<PrismConfig> {
    let mut config = match &args.config {
        Some(path) => PrismConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PrismConfig::load(),
    };

    config.enabled = true;
    if let Some(mode) = args.mode {
        config.highlight_mode = mode;
    }
    if let Some(preset) = &args.preset {
        config.color_preset = preset.clone();
    }
    Ok(config)
}

/// Highlights the file and renders it in the requested format.
fn run(args: &Args) -> anyhow::Result<String> {
    let config = load_config(args)?;
    let mut session = Session::new(TerminalHost::new(), config);

    let id = session
        .open_file(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    if let Some(position) = args.cursor {
        let offset = session
            .document(id)
            .context("Document closed unexpectedly")?
            .buffer()
            .byte_offset_of(position)
            .with_context(|| format!("Cursor {position} is outside the file"))?;
        session.move_cursor(id, offset)?;
    }

    let result = session.rescan().context("Highlighting is disabled")?;
    let text = session
        .document(id)
        .context("Document closed unexpectedly")?
        .buffer()
        .text()
        .into_owned();

    let output = match args.format {
        OutputFormat::Ansi => session.host().render_ansi(&text),
        OutputFormat::Spans => render_spans(&text, &result),
        OutputFormat::Json => {
            let report = JsonReport {
                file: args.file.display().to_string(),
                mode: session.config().highlight_mode,
                preset: &session.config().color_preset,
                highlights: &result,
            };
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
    };

    session.shutdown();
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<div class=\"p-2 md:!m-1\"></div>\n<span class=\"w-[10px]\"></span>\n";

    fn write_page(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("page.html");
        std::fs::write(&path, PAGE).unwrap();
        path
    }

    fn args_for(path: &std::path::Path, extra: &[&str]) -> Args {
        let config = path.with_file_name("config.toml");
        let mut argv = vec![
            "prism".to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        argv.push(path.display().to_string());
        Args::parse_from(argv)
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["prism", "index.html"]);
        assert_eq!(args.file, PathBuf::from("index.html"));
        assert_eq!(args.format, OutputFormat::Ansi);
        assert!(args.mode.is_none());
        assert!(args.cursor.is_none());
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from([
            "prism", "-m", "cursor", "-c", "2:5", "-f", "json", "-vv", "a.tsx",
        ]);
        assert_eq!(args.mode, Some(HighlightMode::Cursor));
        assert_eq!(args.cursor, Some(Position::new(1, 4)));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_reject_bad_values() {
        assert!(Args::try_parse_from(["prism", "--mode", "partial", "a"]).is_err());
        assert!(Args::try_parse_from(["prism", "--cursor", "0:1", "a"]).is_err());
    }

    #[test]
    fn test_run_spans_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(&dir);
        std::fs::write(dir.path().join("config.toml"), "").unwrap();

        let output = run(&args_for(&path, &["--format", "spans"])).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "variant 16..19 \"md:\"",
                "important 19..20 \"!\"",
                "arbitrary 47..53 \"[10px]\"",
                "utility 12..15 \"p-2\"",
                "utility 16..23 \"md:!m-1\"",
                "utility 45..53 \"w-[10px]\"",
            ]
        );
    }

    #[test]
    fn test_run_cursor_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(&dir);
        std::fs::write(dir.path().join("config.toml"), "highlight_mode = \"cursor\"").unwrap();

        // Line 2, inside the span's class value.
        let output = run(&args_for(&path, &["--format", "spans", "--cursor", "2:16"])).unwrap();
        assert_eq!(
            output,
            "arbitrary 47..53 \"[10px]\"\nutility 45..53 \"w-[10px]\"\n"
        );

        // Cursor mode without a cursor position: the cursor sits at 1:1.
        let output = run(&args_for(&path, &["--format", "spans"])).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_run_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(&dir);
        std::fs::write(dir.path().join("config.toml"), "color_preset = \"Muted\"").unwrap();

        let output = run(&args_for(&path, &["--format", "json"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["mode"], "full");
        assert_eq!(value["preset"], "Muted");
        assert_eq!(value["highlights"]["utility"].as_array().unwrap().len(), 3);
        assert_eq!(value["highlights"]["important"][0]["start"], 19);
    }

    #[test]
    fn test_run_ansi_forces_highlighting_on() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(&dir);
        std::fs::write(dir.path().join("config.toml"), "enabled = false").unwrap();

        let output = run(&args_for(&path, &["--preset", "Clear"])).unwrap();
        assert!(output.contains("\x1b[38;2;31;41;55mp-2\x1b[0m"));
        assert!(output.ends_with("</span>\n"));
    }

    #[test]
    fn test_run_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        let err = run(&args_for(&dir.path().join("nope.html"), &[])).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn test_bad_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(&dir);
        std::fs::write(dir.path().join("config.toml"), "enabled = \"yes\"").unwrap();
        assert!(run(&args_for(&path, &[])).is_err());
    }
}
