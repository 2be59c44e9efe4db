use std::io::{self, Write};

use clap::ValueEnum;

use crate::data_models::ResultGroup;

const SEPARATOR_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Labeled, human-readable blocks.
    Text,
    /// One JSON object per address.
    Json,
}

/// Writes one group per successfully fetched address.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn report(&mut self, group: &ResultGroup) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "Results for address: {}", group.address)?;
                for entry in &group.results {
                    writeln!(self.out, "  Title: {}", entry.title)?;
                    writeln!(self.out, "  Link: {}", entry.link)?;
                }
                writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, group)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
