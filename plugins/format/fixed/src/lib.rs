//! Fixed-width text encoder.
//!
//! With explicit delimiter positions the encode is a single streaming
//! pass. Without them every field is converted and buffered first so the
//! column widths can be measured, then the buffered rows are written.

mod measure;
mod writer;

use std::io::Write;

use flatq_api::{Alignment, EncodeError, Encoding, LineBreak, Value, ViewEncoder, convert_field_contents};

pub use measure::Measure;
pub use writer::{FixedField, FixedWriter};

#[derive(Debug, Clone, Default)]
pub struct FixedOptions {
    /// Column end offsets in bytes. `None` measures the data.
    pub positions: Option<Vec<usize>>,
    pub line_break: LineBreak,
    pub encoding: Encoding,
    pub without_header: bool,
}

pub struct FixedEncoder {
    options: FixedOptions,
}

impl FixedEncoder {
    pub fn new(options: FixedOptions) -> Self {
        Self { options }
    }

    fn header_fields(header: &[String]) -> Vec<FixedField> {
        header.iter().map(|h| FixedField::new(h.as_str(), Alignment::NotAligned)).collect()
    }

    fn record_fields(record: &[Value]) -> Vec<FixedField> {
        record
            .iter()
            .map(|v| {
                let c = convert_field_contents(v, false);
                FixedField::new(c.text, c.align)
            })
            .collect()
    }

    fn encode_measured(
        &self,
        out: &mut dyn Write,
        header: &[String],
        records: &[Vec<Value>],
    ) -> Result<(), EncodeError> {
        let opts = &self.options;
        let mut m = Measure::new(opts.encoding);

        let mut field_list = Vec::with_capacity(records.len() + 1);
        if !opts.without_header {
            let fields = Self::header_fields(header);
            m.measure(&fields)?;
            field_list.push(fields);
        }
        for record in records {
            let fields = Self::record_fields(record);
            m.measure(&fields)?;
            field_list.push(fields);
        }

        let positions = m.positions();
        let mut w = FixedWriter::new(out, &positions, opts.line_break, opts.encoding)?;
        w.insert_space = true;
        for fields in &field_list {
            w.write(fields)?;
        }
        w.flush()
    }

    fn encode_positioned(
        &self,
        out: &mut dyn Write,
        positions: &[usize],
        header: &[String],
        records: &[Vec<Value>],
    ) -> Result<(), EncodeError> {
        let opts = &self.options;
        let mut w = FixedWriter::new(out, positions, opts.line_break, opts.encoding)?;

        if !opts.without_header {
            w.write(&Self::header_fields(header))?;
        }
        for record in records {
            w.write(&Self::record_fields(record))?;
        }
        w.flush()
    }
}

impl ViewEncoder for FixedEncoder {
    fn encode(
        &self,
        out: &mut dyn Write,
        header: &[String],
        records: &[Vec<Value>],
    ) -> Result<(), EncodeError> {
        match &self.options.positions {
            Some(positions) => self.encode_positioned(out, positions, header, records),
            None => self.encode_measured(out, header, records),
        }
    }
}
