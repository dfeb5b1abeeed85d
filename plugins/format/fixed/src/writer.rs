use std::io::Write;

use flatq_api::text::pad;
use flatq_api::{Alignment, EncodeError, Encoding, LineBreak, TextWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedField {
    pub contents: String,
    pub align: Alignment,
}

impl FixedField {
    pub fn new(contents: impl Into<String>, align: Alignment) -> Self {
        Self { contents: contents.into(), align }
    }
}

/// Writes records into columns ending at the given byte offsets.
pub struct FixedWriter<W: Write> {
    out: TextWriter<W>,
    widths: Vec<usize>,
    space_len: usize,
    /// Separate columns with one space (used for measured layouts).
    pub insert_space: bool,
}

impl<W: Write> FixedWriter<W> {
    pub fn new(
        out: W,
        positions: &[usize],
        line_break: LineBreak,
        encoding: Encoding,
    ) -> Result<Self, EncodeError> {
        let mut widths = Vec::with_capacity(positions.len());
        let mut start = 0;
        for &end in positions {
            if end < start {
                return Err(EncodeError::config(format!(
                    "invalid delimiter positions {positions:?}"
                )));
            }
            widths.push(end - start);
            start = end;
        }
        let space_len = encoding.byte_len(" ")?;
        if let Some(end) = positions.iter().find(|&&end| end % space_len != 0) {
            return Err(EncodeError::config(format!(
                "delimiter position {end} is not a multiple of {space_len} bytes required by {encoding:?}"
            )));
        }
        Ok(Self {
            out: TextWriter::new(out, line_break, encoding),
            widths,
            space_len,
            insert_space: false,
        })
    }

    pub fn write(&mut self, fields: &[FixedField]) -> Result<(), EncodeError> {
        if fields.len() > self.widths.len() {
            return Err(EncodeError::format_err(format!(
                "{} fields for {} delimiter positions",
                fields.len(),
                self.widths.len()
            )));
        }

        let encoding = self.out.encoding();
        let mut line = String::new();
        for (i, (field, &width)) in fields.iter().zip(&self.widths).enumerate() {
            let len = encoding.byte_len(&field.contents)?;
            if len > width {
                return Err(EncodeError::format_err(format!(
                    "value is too long: {:?} for {width} byte(s) length field",
                    field.contents
                )));
            }
            if i > 0 && self.insert_space {
                line.push(' ');
            }
            let units = len / self.space_len;
            line.push_str(&pad(&field.contents, units, width / self.space_len, field.align));
        }
        self.out.write_record(&line)
    }

    pub fn flush(&mut self) -> Result<(), EncodeError> {
        self.out.flush()
    }
}
