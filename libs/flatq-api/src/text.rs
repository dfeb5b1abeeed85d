//! Text primitives shared by every encoder: line breaks, target
//! encodings, alignment hints and the encoding stream writer.

use std::io::{BufWriter, Write};

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineBreak {
    #[default]
    Lf,
    Cr,
    #[serde(alias = "crlf")]
    CrLf,
}

impl LineBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::Cr => "\r",
            LineBreak::CrLf => "\r\n",
        }
    }
}

/// Target byte encoding of an output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Encoding {
    #[default]
    Utf8,
    /// UTF-8 with byte order mark.
    Utf8M,
    Utf16Be,
    Utf16Le,
    Utf16BeM,
    Utf16LeM,
    Sjis,
}

impl Encoding {
    fn bom(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8M => &[0xEF, 0xBB, 0xBF],
            Encoding::Utf16BeM => &[0xFE, 0xFF],
            Encoding::Utf16LeM => &[0xFF, 0xFE],
            Encoding::Utf8 | Encoding::Utf16Be | Encoding::Utf16Le | Encoding::Sjis => &[],
        }
    }

    /// Bytes of `s` in this encoding, without byte order mark.
    pub fn encode(&self, s: &str) -> Result<Vec<u8>, EncodeError> {
        match self {
            Encoding::Utf8 | Encoding::Utf8M => Ok(s.as_bytes().to_vec()),
            Encoding::Utf16Be | Encoding::Utf16BeM => {
                Ok(s.encode_utf16().flat_map(u16::to_be_bytes).collect())
            }
            Encoding::Utf16Le | Encoding::Utf16LeM => {
                Ok(s.encode_utf16().flat_map(u16::to_le_bytes).collect())
            }
            Encoding::Sjis => {
                let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(s);
                if had_errors {
                    return Err(EncodeError::format_err(format!(
                        "cannot encode {s:?} to SJIS"
                    )));
                }
                Ok(bytes.into_owned())
            }
        }
    }

    /// Length of `s` in bytes once encoded.
    pub fn byte_len(&self, s: &str) -> Result<usize, EncodeError> {
        match self {
            Encoding::Utf8 | Encoding::Utf8M => Ok(s.len()),
            Encoding::Utf16Be | Encoding::Utf16BeM | Encoding::Utf16Le | Encoding::Utf16LeM => {
                Ok(s.encode_utf16().count() * 2)
            }
            Encoding::Sjis => self.encode(s).map(|b| b.len()),
        }
    }
}

/// Alignment hint of a rendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    NotAligned,
    Left,
    Right,
    Centering,
}

/// Pad `s` (of display width `width`) to `target` columns.
/// `NotAligned` pads like `Left`.
pub fn pad(s: &str, width: usize, target: usize, align: Alignment) -> String {
    let padding = target.saturating_sub(width);
    match align {
        Alignment::NotAligned | Alignment::Left => format!("{s}{}", " ".repeat(padding)),
        Alignment::Right => format!("{}{s}", " ".repeat(padding)),
        Alignment::Centering => {
            let left = padding / 2;
            format!("{}{s}{}", " ".repeat(left), " ".repeat(padding - left))
        }
    }
}

/// Buffered writer that transcodes UTF-8 text into the target encoding
/// and separates records with the configured line break.
///
/// The byte order mark, if any, goes out with the first write. No line
/// break follows the last record. Call [`TextWriter::flush`] at the end.
pub struct TextWriter<W: Write> {
    inner: BufWriter<W>,
    encoding: Encoding,
    line_break: LineBreak,
    started: bool,
    first_record: bool,
}

impl<W: Write> TextWriter<W> {
    pub fn new(inner: W, line_break: LineBreak, encoding: Encoding) -> Self {
        Self {
            inner: BufWriter::new(inner),
            encoding,
            line_break,
            started: false,
            first_record: true,
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), EncodeError> {
        if !self.started {
            self.started = true;
            self.inner.write_all(self.encoding.bom())?;
        }
        if s.is_empty() {
            return Ok(());
        }
        let bytes = self.encoding.encode(s)?;
        self.inner.write_all(&bytes)?;
        Ok(())
    }

    /// Start a new record: emits the line break before every record but
    /// the first.
    pub fn begin_record(&mut self) -> Result<(), EncodeError> {
        if self.first_record {
            self.first_record = false;
            return Ok(());
        }
        let lb = self.line_break.as_str();
        self.write_str(lb)
    }

    /// Write `line` as one record.
    pub fn write_record(&mut self, line: &str) -> Result<(), EncodeError> {
        self.begin_record()?;
        self.write_str(line)
    }

    pub fn flush(&mut self) -> Result<(), EncodeError> {
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_separated_not_terminated() {
        let mut buf = Vec::new();
        {
            let mut w = TextWriter::new(&mut buf, LineBreak::CrLf, Encoding::Utf8);
            w.write_record("a").unwrap();
            w.write_record("b").unwrap();
            w.flush().unwrap();
        }
        assert_eq!(buf, b"a\r\nb");
    }

    #[test]
    fn bom_is_written_once() {
        let mut buf = Vec::new();
        {
            let mut w = TextWriter::new(&mut buf, LineBreak::Lf, Encoding::Utf8M);
            w.write_record("a").unwrap();
            w.write_record("b").unwrap();
            w.flush().unwrap();
        }
        assert_eq!(buf, b"\xEF\xBB\xBFa\nb");
    }

    #[test]
    fn utf16_and_sjis() {
        assert_eq!(Encoding::Utf16Be.encode("A").unwrap(), vec![0x00, 0x41]);
        assert_eq!(Encoding::Utf16Le.encode("A").unwrap(), vec![0x41, 0x00]);
        assert_eq!(Encoding::Sjis.encode("あ").unwrap(), vec![0x82, 0xA0]);
        assert_eq!(Encoding::Sjis.byte_len("aあ").unwrap(), 3);
        assert_eq!(Encoding::Utf8.byte_len("aあ").unwrap(), 4);
        assert!(Encoding::Sjis.encode("😀").is_err());
    }

    #[test]
    fn pad_alignments() {
        assert_eq!(pad("ab", 2, 5, Alignment::NotAligned), "ab   ");
        assert_eq!(pad("ab", 2, 5, Alignment::Right), "   ab");
        assert_eq!(pad("ab", 2, 5, Alignment::Centering), " ab  ");
        assert_eq!(pad("abcdef", 6, 3, Alignment::Right), "abcdef");
    }

    #[test]
    fn line_break_names() {
        #[derive(Deserialize)]
        struct Probe {
            lb: LineBreak,
            enc: Encoding,
        }
        let p: Probe = serde_json::from_str(r#"{"lb":"CRLF","enc":"SJIS"}"#).unwrap();
        assert_eq!(p.lb, LineBreak::CrLf);
        assert_eq!(p.enc, Encoding::Sjis);
    }
}
