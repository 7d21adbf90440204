//! Plain text output formatter

use super::{OutputFormatter, OutputRecord};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - one sentence per line, segments separated by a blank line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter and return its writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn write_record(&mut self, record: &OutputRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.text)?;
        if record.is_segment() {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamcut_core::{CutKind, Segment};

    #[test]
    fn test_sentences_one_per_line() {
        let mut formatter = TextFormatter::new(Vec::new());
        for (i, text) in ["第一句。", "Second one."].iter().enumerate() {
            formatter
                .write_record(&OutputRecord::sentence(None, i, text.to_string()))
                .unwrap();
        }
        formatter.finish().unwrap();

        let out = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(out, "第一句。\nSecond one.\n");
    }

    #[test]
    fn test_segments_separated_by_blank_line() {
        let mut formatter = TextFormatter::new(Vec::new());
        let segment = Segment {
            index: 0,
            text: "# 标题".to_string(),
            cut: CutKind::Flush,
            reason: None,
            marker_type: None,
            delay_ms: 40,
        };
        formatter
            .write_record(&OutputRecord::segment(None, segment))
            .unwrap();

        let out = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(out, "# 标题\n\n");
    }
}
