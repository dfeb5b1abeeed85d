use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use flatq_api::{Effect, Encoding, LineBreak, Palette};
use format_json::EscapeType;

use crate::error::EngineError;

/// Styles used when the configuration doesn't name one.
const DEFAULT_PALETTE: &[(Effect, &[&str])] = &[
    (Effect::String, &["green"]),
    (Effect::Number, &["magenta"]),
    (Effect::Boolean, &["yellow", "bold"]),
    (Effect::Ternary, &["blue", "bold"]),
    (Effect::Datetime, &["cyan"]),
    (Effect::Null, &["bright_black"]),
    (Effect::ObjectKey, &["blue", "bold"]),
];

/// Session-wide rendering flags. Parsed from TOML; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// Suppress warnings.
    pub quiet: bool,
    /// Colour the plain text table and pretty-printed JSON.
    pub color: bool,
    pub east_asian_encoding: bool,
    pub count_diacritical_sign: bool,
    pub count_format_code: bool,
    /// Effect name → style names, e.g. `number = ["bright_magenta", "bold"]`.
    pub palette: BTreeMap<String, Vec<String>>,
}

impl Flags {
    /// Load flags from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Parse flags from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Built-in styles overlaid by the configured ones. Enabled only
    /// when `color` is set.
    pub fn palette(&self) -> Result<Palette, EngineError> {
        let mut palette = Palette::default();
        for (effect, styles) in DEFAULT_PALETTE {
            palette.set(*effect, *styles)?;
        }
        for (name, styles) in &self.palette {
            let effect: Effect = name.parse().map_err(config_error)?;
            palette.set(effect, styles).map_err(config_error)?;
        }
        if self.color {
            palette.enable();
        }
        Ok(palette)
    }
}

fn config_error(e: flatq_api::EncodeError) -> EngineError {
    EngineError::Config(e.message().to_string())
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Tsv,
    Fixed,
    Json,
    Ltsv,
    Gfm,
    Org,
    /// Plain text table.
    #[default]
    Text,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Csv => "CSV",
            Format::Tsv => "TSV",
            Format::Fixed => "FIXED",
            Format::Json => "JSON",
            Format::Ltsv => "LTSV",
            Format::Gfm => "GFM",
            Format::Org => "ORG",
            Format::Text => "TEXT",
        };
        f.write_str(name)
    }
}

fn deserialize_delimiter<'de, D: Deserializer<'de>>(d: D) -> Result<char, D::Error> {
    let s = String::deserialize(d)?;
    format_csv::parse_delimiter(&s).map_err(serde::de::Error::custom)
}

fn default_delimiter() -> char {
    ','
}

/// Describes the file a view is written to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    pub format: Format,
    /// Delimited formats only. TSV always uses TAB.
    #[serde(deserialize_with = "deserialize_delimiter")]
    pub delimiter: char,
    /// Fixed-width end offsets in bytes. Measured from the data when absent.
    pub delimiter_positions: Option<Vec<usize>>,
    pub no_header: bool,
    pub encoding: Encoding,
    pub line_break: LineBreak,
    pub enclose_all: bool,
    pub json_escape: EscapeType,
    pub pretty_print: bool,
}

impl Default for FileInfo {
    fn default() -> Self {
        Self {
            format: Format::default(),
            delimiter: default_delimiter(),
            delimiter_positions: None,
            no_header: false,
            encoding: Encoding::Utf8,
            line_break: LineBreak::Lf,
            enclose_all: false,
            json_escape: EscapeType::Backslash,
            pretty_print: false,
        }
    }
}

impl FileInfo {
    pub fn new(format: Format) -> Self {
        Self { format, ..Default::default() }
    }

    /// Parse a file description from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let flags = Flags::parse("").unwrap();
        assert!(!flags.quiet);
        assert!(!flags.color);
        assert!(flags.palette.is_empty());

        let info = FileInfo::parse("").unwrap();
        assert_eq!(info, FileInfo::default());
        assert_eq!(info.format, Format::Text);
        assert_eq!(info.delimiter, ',');
    }

    #[test]
    fn file_info_fields() {
        let info = FileInfo::parse(
            r#"
format = "fixed"
delimiter = "\\t"
delimiter_positions = [4, 10]
no_header = true
encoding = "SJIS"
line_break = "CRLF"
json_escape = "hex_all"
pretty_print = true
"#,
        )
        .unwrap();
        assert_eq!(info.format, Format::Fixed);
        assert_eq!(info.delimiter, '\t');
        assert_eq!(info.delimiter_positions, Some(vec![4, 10]));
        assert!(info.no_header);
        assert_eq!(info.encoding, Encoding::Sjis);
        assert_eq!(info.line_break, LineBreak::CrLf);
        assert_eq!(info.json_escape, EscapeType::HexAll);
        assert!(info.pretty_print);
    }

    #[test]
    fn bad_delimiter_is_a_config_error() {
        let err = FileInfo::parse(r#"delimiter = ";;""#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn palette_overlay() {
        let flags = Flags::parse(
            r#"
color = true

[palette]
number = ["red", "underline"]
"#,
        )
        .unwrap();
        let palette = flags.palette().unwrap();
        assert!(palette.is_enabled());
        assert_eq!(palette.render(Effect::Number, "1"), "\x1b[31;4m1\x1b[0m");
        assert_eq!(palette.render(Effect::String, "s"), "\x1b[32ms\x1b[0m");
    }

    #[test]
    fn palette_disabled_without_color() {
        let palette = Flags::default().palette().unwrap();
        assert!(!palette.is_enabled());
        assert_eq!(palette.render(Effect::Number, "1"), "1");
    }

    #[test]
    fn unknown_palette_names() {
        let flags = Flags::parse("[palette]\nsparkle = [\"red\"]").unwrap();
        assert!(matches!(flags.palette(), Err(EngineError::Config(_))));

        let flags = Flags::parse("[palette]\nnull = [\"glitter\"]").unwrap();
        let err = flags.palette().unwrap_err();
        assert!(err.to_string().contains("glitter"));
    }
}
