use std::io::Write;

use flatq_api::{EncodeError, Encoding, LineBreak, TextWriter};

// ═══════════════════════════════════════════════════════════════
//  Field
// ═══════════════════════════════════════════════════════════════

/// One delimited field and whether it must be enclosed in quotes
/// regardless of its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub contents: String,
    pub quote: bool,
}

impl Field {
    pub fn new(contents: impl Into<String>, quote: bool) -> Self {
        Self { contents: contents.into(), quote }
    }
}

/// RFC 4180 quoting: forced, or required by the content. Inner `"` is doubled.
fn push_field(line: &mut String, field: &Field, delimiter: char) {
    let s = field.contents.as_str();
    let needs_quote = field.quote
        || s.contains(delimiter)
        || s.contains('"')
        || s.contains('\n')
        || s.contains('\r');
    if needs_quote {
        line.push('"');
        line.push_str(&s.replace('"', "\"\""));
        line.push('"');
    } else {
        line.push_str(s);
    }
}

// ═══════════════════════════════════════════════════════════════
//  CsvWriter
// ═══════════════════════════════════════════════════════════════

pub struct CsvWriter<W: Write> {
    out: TextWriter<W>,
    delimiter: char,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W, delimiter: char, line_break: LineBreak, encoding: Encoding) -> Self {
        Self { out: TextWriter::new(out, line_break, encoding), delimiter }
    }

    pub fn write(&mut self, fields: &[Field]) -> Result<(), EncodeError> {
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(self.delimiter);
            }
            push_field(&mut line, field, self.delimiter);
        }
        self.out.write_record(&line)
    }

    pub fn flush(&mut self) -> Result<(), EncodeError> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(fields: &[Field], delimiter: char) -> String {
        let mut buf = Vec::new();
        let mut w = CsvWriter::new(&mut buf, delimiter, LineBreak::Lf, Encoding::Utf8);
        w.write(fields).unwrap();
        w.flush().unwrap();
        drop(w);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn quotes_only_when_needed_or_forced() {
        let fields = [
            Field::new("plain", false),
            Field::new("a,b", false),
            Field::new("say \"hi\"", false),
            Field::new("two\nlines", false),
            Field::new("forced", true),
            Field::new("", false),
        ];
        assert_eq!(
            line(&fields, ','),
            "plain,\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\",\"forced\","
        );
    }

    #[test]
    fn delimiter_inside_field_is_relative_to_writer() {
        let fields = [Field::new("a,b", false), Field::new("c\td", false)];
        assert_eq!(line(&fields, '\t'), "a,b\t\"c\td\"");
    }
}
