use std::io::Write;

use flatq_api::{EncodeError, Encoding, LineBreak, TextWriter};

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Labels are one or more of `[0-9A-Za-z_.-]`.
pub fn validate_label(label: &str) -> Result<(), EncodeError> {
    if label.is_empty() || !label.chars().all(is_label_char) {
        return Err(EncodeError::format_err(format!("LTSV: invalid label {label:?}")));
    }
    Ok(())
}

fn validate_value(value: &str) -> Result<(), EncodeError> {
    if value.contains(['\t', '\r', '\n']) {
        return Err(EncodeError::format_err(format!(
            "LTSV: value {value:?} contains a tab or a line break"
        )));
    }
    Ok(())
}

/// Writes `label:value` pairs separated by tabs, one record per line.
pub struct LtsvWriter<W: Write> {
    out: TextWriter<W>,
    labels: Vec<String>,
}

impl<W: Write> LtsvWriter<W> {
    /// Fails before anything is written if a label is invalid.
    pub fn new(
        out: W,
        labels: &[String],
        line_break: LineBreak,
        encoding: Encoding,
    ) -> Result<Self, EncodeError> {
        for label in labels {
            validate_label(label)?;
        }
        Ok(Self { out: TextWriter::new(out, line_break, encoding), labels: labels.to_vec() })
    }

    pub fn write(&mut self, values: &[String]) -> Result<(), EncodeError> {
        if values.len() != self.labels.len() {
            return Err(EncodeError::structure(format!(
                "LTSV: {} values for {} labels",
                values.len(),
                self.labels.len()
            )));
        }

        let mut line = String::new();
        for (i, (label, value)) in self.labels.iter().zip(values).enumerate() {
            validate_value(value)?;
            if i > 0 {
                line.push('\t');
            }
            line.push_str(label);
            line.push(':');
            line.push_str(value);
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

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn label_rules() {
        assert!(validate_label("host.name-1_x").is_ok());
        assert!(validate_label("").is_err());
        assert!(validate_label("a b").is_err());
        assert!(validate_label("a:b").is_err());
        assert!(validate_label("名前").is_err());
    }

    #[test]
    fn invalid_label_fails_before_writing() {
        let mut buf = Vec::new();
        let res = LtsvWriter::new(&mut buf, &labels(&["ok", "not ok"]), LineBreak::Lf, Encoding::Utf8);
        assert!(res.is_err());
        drop(res);
        assert!(buf.is_empty());
    }

    #[test]
    fn pairs_and_rejections() {
        let mut buf = Vec::new();
        {
            let mut w =
                LtsvWriter::new(&mut buf, &labels(&["a", "b"]), LineBreak::Lf, Encoding::Utf8).unwrap();
            w.write(&labels(&["1", "x:y"])).unwrap();
            assert!(w.write(&labels(&["1\t2", ""])).is_err());
            assert!(w.write(&labels(&["1"])).is_err());
            w.flush().unwrap();
        }
        assert_eq!(buf, b"a:1\tb:x:y");
    }
}
