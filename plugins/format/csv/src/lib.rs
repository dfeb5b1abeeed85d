//! Delimited text (CSV/TSV) encoder.

mod writer;

use std::io::Write;

use flatq_api::{
    EncodeError, Effect, Encoding, LineBreak, Value, ViewEncoder, convert_field_contents,
};

pub use writer::{CsvWriter, Field};

#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: char,
    pub line_break: LineBreak,
    pub encoding: Encoding,
    pub without_header: bool,
    /// Quote every header field and every string/datetime cell.
    pub enclose_all: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            line_break: LineBreak::Lf,
            encoding: Encoding::Utf8,
            without_header: false,
            enclose_all: false,
        }
    }
}

pub struct CsvEncoder {
    options: CsvOptions,
}

impl CsvEncoder {
    pub fn new(options: CsvOptions) -> Self {
        Self { options }
    }

    /// Tab-delimited variant; the delimiter is fixed to TAB.
    pub fn tsv(options: CsvOptions) -> Self {
        Self { options: CsvOptions { delimiter: '\t', ..options } }
    }
}

impl ViewEncoder for CsvEncoder {
    fn encode(
        &self,
        out: &mut dyn Write,
        header: &[String],
        records: &[Vec<Value>],
    ) -> Result<(), EncodeError> {
        let opts = &self.options;
        let mut w = CsvWriter::new(out, opts.delimiter, opts.line_break, opts.encoding);

        if !opts.without_header {
            let fields: Vec<Field> = header.iter().map(|h| Field::new(h.as_str(), opts.enclose_all)).collect();
            w.write(&fields)?;
        }

        let mut fields = Vec::with_capacity(header.len());
        for record in records {
            fields.clear();
            for value in record {
                let c = convert_field_contents(value, false);
                let quote = opts.enclose_all && matches!(c.effect, Effect::String | Effect::Datetime);
                fields.push(Field::new(c.text, quote));
            }
            w.write(&fields)?;
        }
        w.flush()
    }
}

/// Parse a configured delimiter. Accepts a single character or the
/// escaped forms `\t` and `\n`.
pub fn parse_delimiter(s: &str) -> Result<char, EncodeError> {
    let mut chars = s.chars();
    match (s, chars.next(), chars.next()) {
        ("\\t", _, _) => Ok('\t'),
        ("\\n", _, _) => Ok('\n'),
        (_, Some(c), None) => Ok(c),
        (other, _, _) => Err(EncodeError::config(format!(
            "CSV: delimiter must be a single character, got {other:?}"
        ))),
    }
}
