use crate::summary::{Report, Section};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, 4-space indent
    #[default]
    Json,
    /// Single-line JSON
    Compact,
    /// Human-readable tables
    Text,
}

pub fn write_report<W: Write>(report: &Report, format: OutputFormat, mut out: W) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
            report.serialize(&mut ser)?;
            out.write_all(b"\n")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut out, report)?;
            out.write_all(b"\n")?;
        }
        OutputFormat::Text => out.write_all(render_text(report).as_bytes())?,
    }

    out.flush()
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<16} {:>10} {:>8} {:>8} {:>8} {:>14} {:>16}\n",
        "bucket", "count", "min", "max", "avg", "sum", "bytes"
    ));
    out.push_str(&format!("{}\n", "-".repeat(86)));

    for (name, section) in report.sections() {
        if let Section::Stats(s) = section {
            out.push_str(&format!(
                "{:<16} {:>10} {:>8} {:>8} {:>8} {:>14} {:>16}\n",
                name, s.count, s.min, s.max, s.avg, s.sum, s.bytes
            ));
        }
    }

    for (name, section) in report.sections() {
        let Section::Top(entries) = section else {
            continue;
        };

        out.push_str(&format!("\n{name}:\n"));
        if entries.is_empty() {
            out.push_str("  <no samples>\n");
        }
        for (label, count) in entries {
            out.push_str(&format!("  {label:<40} {count:>10}\n"));
        }
    }

    out
}

/// Writes to `path`, or stdout when `None`.
pub fn open_output(path: Option<&std::path::Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(io::BufWriter::new(std::fs::File::create(path)?))),
        None => Ok(Box::new(io::BufWriter::new(io::stdout().lock()))),
    }
}
