use unicode_width::UnicodeWidthChar;

/// Display-width rules for text table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidthOptions {
    /// Ambiguous-width characters take two columns.
    pub east_asian_encoding: bool,
    /// Combining diacritical marks take one column instead of none.
    pub count_diacritical_sign: bool,
    /// Invisible format characters take one column instead of none.
    pub count_format_code: bool,
}

fn is_diacritical_sign(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

fn is_format_code(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

/// Greek and Cyrillic letters of East Asian Width class "Ambiguous".
/// `width_cjk` keeps these narrow; legacy East Asian fonts draw them wide.
fn is_ambiguous_letter(c: char) -> bool {
    matches!(
        c,
        '\u{0391}'..='\u{03A1}'
            | '\u{03A3}'..='\u{03A9}'
            | '\u{03B1}'..='\u{03C1}'
            | '\u{03C3}'..='\u{03C9}'
            | '\u{0401}'
            | '\u{0410}'..='\u{044F}'
            | '\u{0451}'
    )
}

impl WidthOptions {
    pub fn char_width(&self, c: char) -> usize {
        if is_format_code(c) {
            return usize::from(self.count_format_code);
        }
        if is_diacritical_sign(c) {
            return usize::from(self.count_diacritical_sign);
        }
        if self.east_asian_encoding && is_ambiguous_letter(c) {
            return 2;
        }
        let width = if self.east_asian_encoding { c.width_cjk() } else { c.width() };
        width.unwrap_or(0)
    }

    pub fn str_width(&self, s: &str) -> usize {
        s.chars().map(|c| self.char_width(c)).sum()
    }
}
