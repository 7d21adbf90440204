//! Markdown output formatter

use super::{OutputFormatter, OutputRecord};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs records as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    record_count: usize,
    segments: bool,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            record_count: 0,
            segments: false,
        }
    }

    /// Consume the formatter and return its writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn write_record(&mut self, record: &OutputRecord) -> Result<()> {
        self.record_count += 1;
        self.segments |= record.is_segment();

        // Continuation lines stay inside the list item
        let body = record.text.replace('\n', "\n   ");
        write!(self.writer, "{}. {}", self.record_count, body)?;

        if let (Some(cut), Some(delay)) = (record.cut, record.delay_ms) {
            let label = record.reason.map_or(cut.as_str(), |r| r.as_str());
            write!(self.writer, " _({label}, {delay} ms)_")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let noun = if self.segments { "segments" } else { "sentences" };
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total {noun}: {}*", self.record_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
