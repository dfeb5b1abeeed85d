use std::io::Write;

use flatq_api::{View, ViewEncoder};
use format_csv::{CsvEncoder, CsvOptions};
use format_fixed::{FixedEncoder, FixedOptions};
use format_json::{JsonEncoder, JsonOptions};
use format_ltsv::{LtsvEncoder, LtsvOptions};
use format_table::{TableEncoder, TableFormat, TableOptions, WidthOptions};

use crate::config::{FileInfo, Flags, Format};
use crate::error::EngineError;
use crate::logging::log_warn;

/// Build the encoder for `file_info.format`.
pub fn encoder_for(file_info: &FileInfo, flags: &Flags) -> Result<Box<dyn ViewEncoder>, EngineError> {
    let encoder: Box<dyn ViewEncoder> = match file_info.format {
        Format::Csv | Format::Tsv => {
            let options = CsvOptions {
                delimiter: file_info.delimiter,
                line_break: file_info.line_break,
                encoding: file_info.encoding,
                without_header: file_info.no_header,
                enclose_all: file_info.enclose_all,
            };
            if file_info.format == Format::Tsv {
                Box::new(CsvEncoder::tsv(options))
            } else {
                Box::new(CsvEncoder::new(options))
            }
        }
        Format::Fixed => Box::new(FixedEncoder::new(FixedOptions {
            positions: file_info.delimiter_positions.clone(),
            line_break: file_info.line_break,
            encoding: file_info.encoding,
            without_header: file_info.no_header,
        })),
        Format::Json => {
            let palette = if flags.color && file_info.pretty_print {
                Some(flags.palette()?)
            } else {
                None
            };
            Box::new(JsonEncoder::new(JsonOptions {
                escape: file_info.json_escape,
                line_break: file_info.line_break,
                pretty_print: file_info.pretty_print,
                palette,
            }))
        }
        Format::Ltsv => Box::new(LtsvEncoder::new(LtsvOptions {
            line_break: file_info.line_break,
            encoding: file_info.encoding,
        })),
        Format::Gfm | Format::Org | Format::Text => {
            let (format, palette) = match file_info.format {
                Format::Gfm => (TableFormat::Gfm, None),
                Format::Org => (TableFormat::Org, None),
                _ => (TableFormat::Plain, flags.color.then(|| flags.palette()).transpose()?),
            };
            Box::new(TableEncoder::new(TableOptions {
                format,
                line_break: file_info.line_break,
                encoding: file_info.encoding,
                without_header: file_info.no_header,
                width: WidthOptions {
                    east_asian_encoding: flags.east_asian_encoding,
                    count_diacritical_sign: flags.count_diacritical_sign,
                    count_format_code: flags.count_format_code,
                },
                palette,
            }))
        }
    };
    Ok(encoder)
}

/// Write `view` to `out` in the format `file_info` describes.
///
/// The plain text table refuses an empty header or an empty record set
/// with [`EngineError::EmptyResultSet`] before anything is written. Write
/// failures abort the encode; bytes already written stay written.
pub fn encode_view(
    out: &mut dyn Write,
    view: &View,
    file_info: &FileInfo,
    flags: &Flags,
) -> Result<(), EngineError> {
    let (header, records) = view.bare_values();
    tracing::debug!(
        format = %file_info.format,
        columns = header.len(),
        records = records.len(),
        "encoding view"
    );

    if file_info.format == Format::Text {
        if header.is_empty() {
            log_warn("Empty Fields", flags.quiet);
            return Err(EngineError::EmptyResultSet);
        }
        if records.is_empty() {
            log_warn("Empty RecordSet", flags.quiet);
            return Err(EngineError::EmptyResultSet);
        }
    }

    let encoder = encoder_for(file_info, flags)?;
    encoder.encode(out, &header, &records)?;
    Ok(())
}
