use serde::Deserialize;
use serde_json::{Number, Value as JsonValue};

use flatq_api::value::format_float;
use flatq_api::{Effect, LineBreak, Palette};

const INDENT: &str = "  ";

/// How characters that must (or may) be escaped are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeType {
    /// Short backslash sequences where JSON has them (`\n`, `\"`, ...).
    #[default]
    Backslash,
    /// Like `Backslash`, and HTML-unsafe `<`, `>`, `&`, `'` as `\uXXXX`.
    #[serde(alias = "hex_digits")]
    Hex,
    /// Every escaped character as `\uXXXX`.
    #[serde(alias = "all_with_hex_digits")]
    HexAll,
}

fn is_html_unsafe(c: char) -> bool {
    matches!(c, '<' | '>' | '&' | '\'')
}

fn push_hex(out: &mut String, c: char) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{unit:04x}"));
    }
}

pub fn escape_string(s: &str, escape: EscapeType) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        let short = match c {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            '\u{08}' => Some("\\b"),
            '\u{0c}' => Some("\\f"),
            _ => None,
        };
        let control = (c as u32) < 0x20;
        let html = escape != EscapeType::Backslash && is_html_unsafe(c);

        match (short, escape) {
            (Some(seq), EscapeType::Backslash | EscapeType::Hex) => out.push_str(seq),
            (Some(_), EscapeType::HexAll) => push_hex(&mut out, c),
            (None, _) if control || html => push_hex(&mut out, c),
            (None, _) => out.push(c),
        }
    }
    out.push('"');
    out
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_float).unwrap_or_else(|| n.to_string())
    }
}

/// Serializes a JSON document with a chosen escape strategy, optional
/// pretty printing, and optional colouring of the pretty form.
pub struct JsonWriter<'a> {
    pub escape: EscapeType,
    pub line_break: LineBreak,
    pub pretty: bool,
    pub palette: Option<&'a Palette>,
}

impl JsonWriter<'_> {
    pub fn encode(&self, value: &JsonValue) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, 0);
        out
    }

    fn styled(&self, effect: Effect, text: String) -> String {
        match self.palette {
            Some(p) if self.pretty => p.render(effect, &text),
            _ => text,
        }
    }

    fn newline(&self, out: &mut String, depth: usize) {
        out.push_str(self.line_break.as_str());
        for _ in 0..depth {
            out.push_str(INDENT);
        }
    }

    fn write_value(&self, out: &mut String, value: &JsonValue, depth: usize) {
        match value {
            JsonValue::Null => out.push_str(&self.styled(Effect::Null, "null".to_string())),
            JsonValue::Bool(b) => out.push_str(&self.styled(Effect::Boolean, b.to_string())),
            JsonValue::Number(n) => out.push_str(&self.styled(Effect::Number, number_text(n))),
            JsonValue::String(s) => {
                out.push_str(&self.styled(Effect::String, escape_string(s, self.escape)))
            }
            JsonValue::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    if self.pretty {
                        self.newline(out, depth + 1);
                    }
                    self.write_value(out, item, depth + 1);
                }
                if self.pretty && !items.is_empty() {
                    self.newline(out, depth);
                }
                out.push(']');
            }
            JsonValue::Object(map) => {
                out.push('{');
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    if self.pretty {
                        self.newline(out, depth + 1);
                    }
                    out.push_str(&self.styled(Effect::ObjectKey, escape_string(key, self.escape)));
                    out.push(':');
                    if self.pretty {
                        out.push(' ');
                    }
                    self.write_value(out, item, depth + 1);
                }
                if self.pretty && !map.is_empty() {
                    self.newline(out, depth);
                }
                out.push('}');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn writer(pretty: bool) -> JsonWriter<'static> {
        JsonWriter { escape: EscapeType::Backslash, line_break: LineBreak::Lf, pretty, palette: None }
    }

    #[test]
    fn escape_strategies() {
        let s = "a\"<b>\n&'\u{1}";
        assert_eq!(escape_string(s, EscapeType::Backslash), "\"a\\\"<b>\\n&'\\u0001\"");
        assert_eq!(
            escape_string(s, EscapeType::Hex),
            "\"a\\\"\\u003cb\\u003e\\n\\u0026\\u0027\\u0001\""
        );
        assert_eq!(
            escape_string(s, EscapeType::HexAll),
            "\"a\\u0022\\u003cb\\u003e\\u000a\\u0026\\u0027\\u0001\""
        );
        assert_eq!(escape_string("日本", EscapeType::HexAll), "\"日本\"");
    }

    #[test]
    fn compact_form() {
        let doc = json!([{"c1": 1, "c2": "x", "f": 2.0, "n": null, "o": {}}]);
        assert_eq!(writer(false).encode(&doc), r#"[{"c1":1,"c2":"x","f":2,"n":null,"o":{}}]"#);
        assert_eq!(writer(false).encode(&json!([])), "[]");
    }

    #[test]
    fn pretty_form() {
        let doc = json!([{"a": 1, "b": {"c": true}}]);
        let expect = "[\n  {\n    \"a\": 1,\n    \"b\": {\n      \"c\": true\n    }\n  }\n]";
        assert_eq!(writer(true).encode(&doc), expect);
        assert_eq!(writer(true).encode(&json!([])), "[]");
    }

    #[test]
    fn palette_applies_only_when_pretty() {
        let mut palette = Palette::new();
        palette.set(Effect::ObjectKey, &["blue"]).unwrap();
        palette.set(Effect::Number, &["magenta"]).unwrap();

        let doc = json!({"a": 1});
        let mut w = JsonWriter { palette: Some(&palette), ..writer(true) };
        assert_eq!(w.encode(&doc), "{\n  \x1b[34m\"a\"\x1b[0m: \x1b[35m1\x1b[0m\n}");

        w.pretty = false;
        assert_eq!(w.encode(&doc), "{\"a\":1}");
    }
}
