pub mod convert;
pub mod error;
pub mod expr;
pub mod format;
pub mod header;
pub mod palette;
pub mod text;
pub mod value;
pub mod view;

pub use convert::{FieldContents, convert_field_contents};
pub use error::{EncodeError, ErrorKind, Location, ResolveError};
pub use expr::{ColumnNumber, FieldReference, Identifier, QueryExpression, SourcePos};
pub use format::ViewEncoder;
pub use header::{Header, HeaderField, INTERNAL_ID_COLUMN};
pub use palette::{Effect, Palette};
pub use text::{Alignment, Encoding, LineBreak, TextWriter};
pub use value::{Ternary, Value};
pub use view::{ArityError, Cell, Record, View};
