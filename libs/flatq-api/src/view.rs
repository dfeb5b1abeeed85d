use crate::header::Header;
use crate::value::Value;

/// One cell of a record. Holds a single value, or every value of the
/// group once the record set has been grouped; the first one represents
/// the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell(Vec<Value>);

impl Cell {
    pub fn new(value: Value) -> Self {
        Self(vec![value])
    }

    pub fn group(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Representative value. An empty group reads as `Null`.
    pub fn value(&self) -> &Value {
        const NULL: &Value = &Value::Null;
        self.0.first().unwrap_or(NULL)
    }

    pub fn group_len(&self) -> usize {
        self.0.len()
    }

    pub fn group_values(&self) -> &[Value] {
        &self.0
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Cell::new(value)
    }
}

pub type Record = Vec<Cell>;

/// Records whose arity doesn't match the header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {index} has {actual} fields, header has {expected}")]
pub struct ArityError {
    pub index: usize,
    pub actual: usize,
    pub expected: usize,
}

/// Result of a query: a header and the records it describes.
///
/// Every record has exactly `header.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    header: Header,
    record_set: Vec<Record>,
}

impl View {
    pub fn new(header: Header, record_set: Vec<Record>) -> Result<Self, ArityError> {
        if let Some((index, r)) = record_set
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != header.len())
        {
            return Err(ArityError { index, actual: r.len(), expected: header.len() });
        }
        Ok(Self { header, record_set })
    }

    /// Build from plain values, one cell per value.
    pub fn from_values(header: Header, rows: Vec<Vec<Value>>) -> Result<Self, ArityError> {
        let record_set = rows
            .into_iter()
            .map(|row| row.into_iter().map(Cell::new).collect())
            .collect();
        Self::new(header, record_set)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn record_set(&self) -> &[Record] {
        &self.record_set
    }

    pub fn field_len(&self) -> usize {
        self.header.len()
    }

    pub fn record_len(&self) -> usize {
        self.record_set.len()
    }

    /// Replace the header wholesale, e.g. with the result of
    /// [`Header::update`]. The field count must stay the same.
    pub fn with_header(self, header: Header) -> Result<Self, ArityError> {
        Self::new(header, self.record_set)
    }

    /// Column names and the representative value of every cell, in order.
    /// The internal id column is left out.
    pub fn bare_values(&self) -> (Vec<String>, Vec<Vec<Value>>) {
        let visible: Vec<usize> = (0..self.field_len())
            .filter(|&i| !self.header.fields()[i].is_internal_id())
            .collect();
        let names = visible.iter().map(|&i| self.header.fields()[i].column.clone()).collect();
        let rows = self
            .record_set
            .iter()
            .map(|record| visible.iter().map(|&i| record[i].value().clone()).collect())
            .collect();
        (names, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_is_enforced() {
        let header = Header::new("t", &["a", "b"]);
        let err = View::from_values(header, vec![vec![Value::Integer(1)]]).unwrap_err();
        assert_eq!(err, ArityError { index: 0, actual: 1, expected: 2 });
        assert_eq!(err.to_string(), "record 0 has 1 fields, header has 2");
    }

    #[test]
    fn bare_values_takes_group_representative() {
        let header = Header::new("t", &["a", "b"]);
        let view = View::new(
            header,
            vec![vec![
                Cell::group(vec![Value::Integer(1), Value::Integer(2)]),
                Cell::group(Vec::new()),
            ]],
        )
        .unwrap();

        assert_eq!(view.field_len(), 2);
        let cells = &view.record_set()[0];
        assert_eq!(cells[0].group_len(), 2);
        assert_eq!(cells[0].group_values(), &[Value::Integer(1), Value::Integer(2)]);
        assert_eq!(cells[1].group_len(), 0);

        let (names, rows) = view.bare_values();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(rows, vec![vec![Value::Integer(1), Value::Null]]);
    }

    #[test]
    fn bare_values_skips_internal_id() {
        let header = Header::with_id("t", &["c"]);
        let view = View::from_values(header, vec![vec![Value::Integer(7), Value::string("v")]]).unwrap();
        assert_eq!(view.field_len(), 2);

        let (names, rows) = view.bare_values();
        assert_eq!(names, vec!["c"]);
        assert_eq!(rows, vec![vec![Value::string("v")]]);
    }

    #[test]
    fn rebinding_header_keeps_records() {
        let view = View::from_values(Header::new("t", &["a"]), vec![vec![Value::string("x")]]).unwrap();
        let header = view.header().update("sub", None).unwrap();
        let view = view.with_header(header).unwrap();
        assert_eq!(view.header().fields()[0].view, "sub");
        assert_eq!(view.record_len(), 1);

        let err = view.with_header(Header::new("t", &["a", "b"])).unwrap_err();
        assert_eq!(err.expected, 2);
    }
}
