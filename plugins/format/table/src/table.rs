//! Text table layout for the plain, GFM and Org flavours.

use flatq_api::{Alignment, Effect, Palette, text::pad};

use crate::width::WidthOptions;

const GFM_MIN_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Box-drawn table with `+---+` borders.
    #[default]
    Plain,
    /// GitHub Flavored Markdown.
    Gfm,
    Org,
}

/// One cell before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableField {
    pub text: String,
    pub effect: Effect,
    pub align: Alignment,
}

impl TableField {
    pub fn new(text: impl Into<String>, effect: Effect, align: Alignment) -> Self {
        Self { text: text.into(), effect, align }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self::new(text, Effect::NoEffect, Alignment::Centering)
    }
}

/// Splits on `\r\n`, `\r` and `\n`.
fn split_lines(s: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&s[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&s[start..]);
    lines
}

struct Prepared {
    lines: Vec<String>,
    widths: Vec<usize>,
    effect: Effect,
    align: Alignment,
}

impl Prepared {
    fn width(&self) -> usize {
        self.widths.iter().copied().max().unwrap_or(0)
    }
}

fn gfm_marker(align: Alignment, width: usize) -> String {
    match align {
        Alignment::NotAligned => "-".repeat(width),
        Alignment::Left => format!(":{}", "-".repeat(width - 1)),
        Alignment::Right => format!("{}:", "-".repeat(width - 1)),
        Alignment::Centering => format!(":{}:", "-".repeat(width - 2)),
    }
}

pub struct Table {
    format: TableFormat,
    width: WidthOptions,
    header: Option<Vec<TableField>>,
    records: Vec<Vec<TableField>>,
    aligns: Vec<Alignment>,
}

impl Table {
    pub fn new(format: TableFormat, width: WidthOptions) -> Self {
        Self { format, width, header: None, records: Vec::new(), aligns: Vec::new() }
    }

    pub fn set_header(&mut self, fields: Vec<TableField>) {
        self.header = Some(fields);
    }

    pub fn push_record(&mut self, fields: Vec<TableField>) {
        self.records.push(fields);
    }

    /// Column alignments of the GFM marker row. Missing entries are
    /// not aligned.
    pub fn set_field_alignments(&mut self, aligns: Vec<Alignment>) {
        self.aligns = aligns;
    }

    fn prepare(&self, field: &TableField) -> Prepared {
        let lines: Vec<String> = match self.format {
            TableFormat::Plain => split_lines(&field.text).into_iter().map(str::to_string).collect(),
            TableFormat::Gfm => {
                vec![split_lines(&field.text.replace('|', "\\|")).join("<br />")]
            }
            TableFormat::Org => {
                vec![split_lines(&field.text.replace('|', "\\vert{}")).join(" ")]
            }
        };
        let widths = lines.iter().map(|l| self.width.str_width(l)).collect();
        Prepared { lines, widths, effect: field.effect, align: field.align }
    }

    fn render_row(&self, row: &[Prepared], widths: &[usize], palette: Option<&Palette>) -> Vec<String> {
        let height = row.iter().map(|c| c.lines.len()).max().unwrap_or(1).max(1);
        (0..height)
            .map(|k| {
                let cells: Vec<String> = row
                    .iter()
                    .zip(widths)
                    .map(|(cell, &target)| {
                        let (text, width) = match cell.lines.get(k) {
                            Some(line) => (line.as_str(), cell.widths[k]),
                            None => ("", 0),
                        };
                        let styled = match palette {
                            Some(p) => p.render(cell.effect, text),
                            None => text.to_string(),
                        };
                        format!(" {} ", pad(&styled, width, target, cell.align))
                    })
                    .collect();
                format!("|{}|", cells.join("|"))
            })
            .collect()
    }

    fn separator(&self, widths: &[usize]) -> String {
        let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        match self.format {
            TableFormat::Plain => format!("+{}+", dashes.join("+")),
            TableFormat::Org => format!("|{}|", dashes.join("+")),
            TableFormat::Gfm => {
                let markers: Vec<String> = widths
                    .iter()
                    .enumerate()
                    .map(|(i, &w)| gfm_marker(self.aligns.get(i).copied().unwrap_or_default(), w))
                    .collect();
                format!("| {} |", markers.join(" | "))
            }
        }
    }

    /// Lay the table out as physical lines, without line breaks.
    ///
    /// The palette styles each physical line of a cell separately and
    /// only the plain flavour is ever styled.
    pub fn render(&self, palette: Option<&Palette>) -> Vec<String> {
        let palette = palette.filter(|_| self.format == TableFormat::Plain);

        let header: Option<Vec<Prepared>> =
            self.header.as_ref().map(|h| h.iter().map(|f| self.prepare(f)).collect());
        let records: Vec<Vec<Prepared>> =
            self.records.iter().map(|r| r.iter().map(|f| self.prepare(f)).collect()).collect();

        let columns = header
            .as_ref()
            .map(Vec::len)
            .or_else(|| records.first().map(Vec::len))
            .unwrap_or(0);
        let min_width = if self.format == TableFormat::Gfm { GFM_MIN_WIDTH } else { 0 };
        let mut widths = vec![min_width; columns];
        for row in header.iter().chain(records.iter()) {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }

        let mut lines = Vec::new();
        if self.format == TableFormat::Plain {
            lines.push(self.separator(&widths));
        }
        if let Some(header) = &header {
            lines.extend(self.render_row(header, &widths, None));
            lines.push(self.separator(&widths));
        }
        for row in &records {
            lines.extend(self.render_row(row, &widths, palette));
        }
        if self.format == TableFormat::Plain {
            lines.push(self.separator(&widths));
        }
        lines
    }
}
