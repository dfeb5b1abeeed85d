use std::collections::HashMap;
use std::str::FromStr;

use crate::error::EncodeError;

/// Semantic style class of a rendered value. Selects colour, never
/// alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    NoEffect,
    String,
    Number,
    Boolean,
    Ternary,
    Datetime,
    Null,
    /// Object keys in pretty-printed JSON.
    ObjectKey,
}

impl FromStr for Effect {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(Effect::String),
            "number" => Ok(Effect::Number),
            "boolean" => Ok(Effect::Boolean),
            "ternary" => Ok(Effect::Ternary),
            "datetime" => Ok(Effect::Datetime),
            "null" => Ok(Effect::Null),
            "object_key" => Ok(Effect::ObjectKey),
            other => Err(EncodeError::config(format!("unknown palette effect {other:?}"))),
        }
    }
}

fn sgr_code(name: &str) -> Option<u8> {
    let code = match name {
        "bold" => 1,
        "faint" => 2,
        "italic" => 3,
        "underline" => 4,
        "blink" => 5,
        "inverse" => 7,
        "black" => 30,
        "red" => 31,
        "green" => 32,
        "yellow" => 33,
        "blue" => 34,
        "magenta" => 35,
        "cyan" => 36,
        "white" => 37,
        "bright_black" => 90,
        "bright_red" => 91,
        "bright_green" => 92,
        "bright_yellow" => 93,
        "bright_blue" => 94,
        "bright_magenta" => 95,
        "bright_cyan" => 96,
        "bright_white" => 97,
        _ => return None,
    };
    Some(code)
}

/// Maps effects to ANSI SGR sequences.
///
/// Rendering only wraps text in escape sequences; the text itself is
/// never altered. A disabled palette renders text unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    sequences: HashMap<Effect, String>,
    enabled: bool,
}

impl Palette {
    pub fn new() -> Self {
        Self { sequences: HashMap::new(), enabled: true }
    }

    /// Set the style of `effect` from style names such as
    /// `["bright_green", "bold"]`.
    pub fn set(&mut self, effect: Effect, styles: &[impl AsRef<str>]) -> Result<(), EncodeError> {
        let mut codes = Vec::with_capacity(styles.len());
        for name in styles {
            let name = name.as_ref();
            let code = sgr_code(&name.to_ascii_lowercase())
                .ok_or_else(|| EncodeError::config(format!("unknown palette style {name:?}")))?;
            codes.push(code.to_string());
        }
        if codes.is_empty() {
            self.sequences.remove(&effect);
        } else {
            self.sequences.insert(effect, format!("\x1b[{}m", codes.join(";")));
        }
        Ok(())
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn render(&self, effect: Effect, text: &str) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        match self.sequences.get(&effect) {
            Some(seq) => format!("{seq}{text}\x1b[0m"),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_wraps_without_touching_text() {
        let mut p = Palette::new();
        p.set(Effect::Number, &["bright_magenta", "bold"]).unwrap();
        assert_eq!(p.render(Effect::Number, "12"), "\x1b[95;1m12\x1b[0m");
        assert_eq!(p.render(Effect::String, "ab"), "ab");
        assert_eq!(p.render(Effect::Number, ""), "");

        p.disable();
        assert_eq!(p.render(Effect::Number, "12"), "12");
    }

    #[test]
    fn unknown_names_are_config_errors() {
        let mut p = Palette::new();
        assert!(p.set(Effect::Null, &["purple"]).is_err());
        assert!("glitter".parse::<Effect>().is_err());
        assert_eq!("Object_Key".parse::<Effect>().unwrap(), Effect::ObjectKey);
    }

    #[test]
    fn default_palette_is_disabled() {
        assert!(!Palette::default().is_enabled());
        assert!(Palette::new().is_enabled());
    }
}
