//! Output formatting for CLI results.
//!
//! Routes and resolved waypoints are printed either as text or as JSON.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use navroute_lib::{RouteRenderMode, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Summary header followed by the long and short route strings.
    #[default]
    Text,
    /// Only the long route string (every hop).
    Long,
    /// Only the short route string (airways collapsed).
    Short,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Render a route summary to stdout.
    pub fn render_route_result(self, summary: &RouteSummary) -> Result<()> {
        let mut stdout = io::stdout().lock();
        write_route(&mut stdout, self, summary)
    }

    /// Render any serialisable value as JSON, or its text form otherwise.
    pub fn render_value<T: Serialize>(self, value: &T, text: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            OutputFormat::Json => write_json(&mut stdout, value),
            OutputFormat::Text | OutputFormat::Long | OutputFormat::Short => {
                stdout
                    .write_all(text.as_bytes())
                    .context("failed to write output")?;
                Ok(())
            }
        }
    }
}

/// Write a route summary in the given format.
pub fn write_route<W: Write>(
    out: &mut W,
    format: OutputFormat,
    summary: &RouteSummary,
) -> Result<()> {
    let mode = match format {
        OutputFormat::Json => return write_json(out, summary),
        OutputFormat::Text => RouteRenderMode::PlainText,
        OutputFormat::Long => RouteRenderMode::Long,
        OutputFormat::Short => RouteRenderMode::Short,
    };
    out.write_all(summary.render(mode).as_bytes())
        .context("failed to write route")?;
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialise output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}
