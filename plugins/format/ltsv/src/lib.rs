//! LTSV (labeled tab-separated values) encoder.

mod writer;

use std::io::Write;

use flatq_api::{EncodeError, Encoding, LineBreak, Value, ViewEncoder, convert_field_contents};

pub use writer::{LtsvWriter, validate_label};

#[derive(Debug, Clone, Default)]
pub struct LtsvOptions {
    pub line_break: LineBreak,
    pub encoding: Encoding,
}

pub struct LtsvEncoder {
    options: LtsvOptions,
}

impl LtsvEncoder {
    pub fn new(options: LtsvOptions) -> Self {
        Self { options }
    }
}

impl ViewEncoder for LtsvEncoder {
    fn encode(
        &self,
        out: &mut dyn Write,
        header: &[String],
        records: &[Vec<Value>],
    ) -> Result<(), EncodeError> {
        let mut w = LtsvWriter::new(out, header, self.options.line_break, self.options.encoding)?;

        let mut values = Vec::with_capacity(header.len());
        for record in records {
            values.clear();
            values.extend(record.iter().map(|v| convert_field_contents(v, false).text));
            w.write(&values)?;
        }
        w.flush()
    }
}
