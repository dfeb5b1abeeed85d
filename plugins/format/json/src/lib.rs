//! JSON encoder: one object per record inside a top-level array.

mod encoder;
mod structure;

use std::io::Write;

use flatq_api::{EncodeError, Encoding, LineBreak, Palette, TextWriter, Value, ViewEncoder};

pub use encoder::{EscapeType, JsonWriter, escape_string};
pub use structure::{parse_path, table_to_json};

#[derive(Debug, Clone, Default)]
pub struct JsonOptions {
    pub escape: EscapeType,
    pub line_break: LineBreak,
    pub pretty_print: bool,
    /// Colours the pretty-printed form. Ignored in compact mode.
    pub palette: Option<Palette>,
}

pub struct JsonEncoder {
    options: JsonOptions,
}

impl JsonEncoder {
    pub fn new(options: JsonOptions) -> Self {
        Self { options }
    }
}

impl ViewEncoder for JsonEncoder {
    fn encode(
        &self,
        out: &mut dyn Write,
        header: &[String],
        records: &[Vec<Value>],
    ) -> Result<(), EncodeError> {
        let opts = &self.options;
        let doc = table_to_json(header, records)
            .map_err(|e| e.with_context("encoding to json failed"))?;

        let writer = JsonWriter {
            escape: opts.escape,
            line_break: opts.line_break,
            pretty: opts.pretty_print,
            palette: opts.palette.as_ref(),
        };
        let text = writer.encode(&doc);

        let mut w = TextWriter::new(out, opts.line_break, Encoding::Utf8);
        w.write_str(&text)?;
        w.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatq_api::ErrorKind;

    fn encode(options: JsonOptions, header: &[&str], rows: Vec<Vec<Value>>) -> Result<String, EncodeError> {
        let header: Vec<String> = header.iter().map(|s| s.to_string()).collect();
        let mut buf = Vec::new();
        JsonEncoder::new(options).encode(&mut buf, &header, &rows)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn single_line_array() {
        let out = encode(
            JsonOptions::default(),
            &["c1", "c2"],
            vec![vec![Value::Integer(1), Value::string("x")]],
        )
        .unwrap();
        assert_eq!(out, r#"[{"c1":1,"c2":"x"}]"#);
    }

    #[test]
    fn column_order_is_preserved() {
        let out = encode(
            JsonOptions::default(),
            &["z", "a", "m"],
            vec![vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]],
        )
        .unwrap();
        assert_eq!(out, r#"[{"z":1,"a":2,"m":3}]"#);
    }

    #[test]
    fn pretty_with_crlf() {
        let options = JsonOptions { pretty_print: true, line_break: LineBreak::CrLf, ..Default::default() };
        let out = encode(options, &["a"], vec![vec![Value::Boolean(true)]]).unwrap();
        assert_eq!(out, "[\r\n  {\r\n    \"a\": true\r\n  }\r\n]");
    }

    #[test]
    fn structural_errors_are_prefixed() {
        let err = encode(JsonOptions::default(), &["a", "a.b"], Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
        assert!(err.to_string().starts_with("encoding to json failed: "));
    }
}
