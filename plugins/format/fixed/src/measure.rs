use flatq_api::{EncodeError, Encoding};

use crate::writer::FixedField;

/// First pass of a fixed-width encode without explicit positions:
/// collects the widest encoded value of every column.
pub struct Measure {
    encoding: Encoding,
    widths: Vec<usize>,
}

impl Measure {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding, widths: Vec::new() }
    }

    pub fn measure(&mut self, fields: &[FixedField]) -> Result<(), EncodeError> {
        if self.widths.len() < fields.len() {
            self.widths.resize(fields.len(), 0);
        }
        for (i, f) in fields.iter().enumerate() {
            let len = self.encoding.byte_len(&f.contents)?;
            self.widths[i] = self.widths[i].max(len);
        }
        Ok(())
    }

    /// End offset of every column, in bytes.
    pub fn positions(&self) -> Vec<usize> {
        self.widths
            .iter()
            .scan(0, |end, w| {
                *end += w;
                Some(*end)
            })
            .collect()
    }
}
