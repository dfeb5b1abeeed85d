use std::io::Write;

use crate::error::EncodeError;
use crate::value::Value;

/// Output encoder for a flattened view.
///
/// - `header`: column names, in order.
/// - `records`: one row of values per record, same arity as `header`.
///
/// Writes go to `out` as they are produced; a failed write aborts the
/// encode and whatever was already written stays written. Implementations
/// flush before returning `Ok`.
pub trait ViewEncoder {
    fn encode(
        &self,
        out: &mut dyn Write,
        header: &[String],
        records: &[Vec<Value>],
    ) -> Result<(), EncodeError>;
}
