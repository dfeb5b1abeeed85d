//! Rendered text tables: plain, GitHub Flavored Markdown and Org.

mod table;
mod width;

use std::io::Write;

use flatq_api::{
    EncodeError, Encoding, LineBreak, Palette, TextWriter, Value, ViewEncoder,
    convert_field_contents,
};

pub use table::{Table, TableField, TableFormat};
pub use width::WidthOptions;

#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub format: TableFormat,
    pub line_break: LineBreak,
    pub encoding: Encoding,
    pub without_header: bool,
    pub width: WidthOptions,
    /// Styles data cells of the plain flavour.
    pub palette: Option<Palette>,
}

pub struct TableEncoder {
    options: TableOptions,
}

impl TableEncoder {
    pub fn new(options: TableOptions) -> Self {
        Self { options }
    }
}

impl ViewEncoder for TableEncoder {
    fn encode(
        &self,
        out: &mut dyn Write,
        header: &[String],
        records: &[Vec<Value>],
    ) -> Result<(), EncodeError> {
        let opts = &self.options;
        let plain = opts.format == TableFormat::Plain;

        let mut table = Table::new(opts.format, opts.width);
        if !opts.without_header {
            table.set_header(header.iter().map(TableField::header).collect());
        }

        let mut aligns = Vec::with_capacity(header.len());
        for (i, record) in records.iter().enumerate() {
            let fields: Vec<TableField> = record
                .iter()
                .map(|v| {
                    let c = convert_field_contents(v, plain);
                    TableField::new(c.text, c.effect, c.align)
                })
                .collect();
            if i == 0 {
                aligns.extend(fields.iter().map(|f| f.align));
            }
            table.push_record(fields);
        }
        if opts.format == TableFormat::Gfm {
            table.set_field_alignments(aligns);
        }

        let mut w = TextWriter::new(out, opts.line_break, opts.encoding);
        for line in table.render(opts.palette.as_ref()) {
            w.write_record(&line)?;
        }
        w.flush()
    }
}
