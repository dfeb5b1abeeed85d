use crate::error::{Location, ResolveError};
use crate::expr::{ColumnNumber, FieldReference, Identifier, QueryExpression};

/// Reserved leading column carrying row identity. Never user-addressable.
pub const INTERNAL_ID_COLUMN: &str = "@__internal_id";

/// Metadata of one result column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderField {
    /// Originating table or alias. Empty for anonymous/computed columns.
    pub view: String,
    /// Addressable name; may be generated expression text such as `count(*)`.
    pub column: String,
    pub aliases: Vec<String>,
    /// 1-based ordinal within the originating table. `0` = not addressable
    /// by number.
    pub number: usize,
    pub is_from_table: bool,
    /// Produced by a join; same-named join columns do not make a
    /// reference ambiguous.
    pub is_join_column: bool,
}

impl HeaderField {
    pub fn is_internal_id(&self) -> bool {
        self.column == INTERNAL_ID_COLUMN
    }

    fn answers_to(&self, name: &str) -> bool {
        self.column.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Ordered column catalog of a view. Order equals physical column order
/// in the record set.
///
/// Immutable: rebinding (`update`), joining (`merge`) and projection
/// (`add_computed_field`) return a new header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header(Vec<HeaderField>);

impl Header {
    /// Header of a freshly loaded table: columns numbered from 1.
    pub fn new(reference: &str, words: &[impl AsRef<str>]) -> Self {
        Self(Self::table_fields(reference, words).collect())
    }

    /// Same as [`Header::new`] with the internal id column in front.
    pub fn with_id(reference: &str, words: &[impl AsRef<str>]) -> Self {
        let id = HeaderField {
            view: reference.to_string(),
            column: INTERNAL_ID_COLUMN.to_string(),
            ..Default::default()
        };
        Self(std::iter::once(id).chain(Self::table_fields(reference, words)).collect())
    }

    fn table_fields<'a>(
        reference: &'a str,
        words: &'a [impl AsRef<str>],
    ) -> impl Iterator<Item = HeaderField> + 'a {
        words.iter().enumerate().map(move |(i, w)| HeaderField {
            view: reference.to_string(),
            column: w.as_ref().to_string(),
            number: i + 1,
            is_from_table: true,
            ..Default::default()
        })
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_fields(fields: Vec<HeaderField>) -> Self {
        Self(fields)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[HeaderField] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderField> {
        self.0.iter()
    }

    /// `column` of every field, in order.
    pub fn column_names(&self) -> Vec<String> {
        self.0.iter().map(|f| f.column.clone()).collect()
    }

    /// References that expand `SELECT *`: every table-originated column,
    /// qualified when its view is known.
    pub fn table_columns(&self) -> Vec<QueryExpression> {
        self.0
            .iter()
            .filter(|f| f.is_from_table)
            .map(|f| {
                let reference = if f.view.is_empty() {
                    FieldReference::new(f.column.as_str())
                } else {
                    FieldReference::qualified(f.view.as_str(), f.column.as_str())
                };
                QueryExpression::FieldReference(reference)
            })
            .collect()
    }

    pub fn table_column_names(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|f| f.is_from_table)
            .map(|f| f.column.clone())
            .collect()
    }

    /// Index of the internal id column belonging to `view`.
    pub fn contains_internal_id(&self, view: &str) -> Option<usize> {
        self.0
            .iter()
            .position(|f| f.view.eq_ignore_ascii_case(view) && f.is_internal_id())
    }

    // ═══════════════════════════════════════════════════════════
    //  Resolution
    // ═══════════════════════════════════════════════════════════

    /// Resolve any reference-shaped expression to a column index.
    ///
    /// Names go through [`Header::contains`], `view.N` through
    /// [`Header::contains_number`]. Anything else (aggregate calls, integer
    /// literals such as the `1` of `SELECT 1`) is matched by its text
    /// against the `column` of non-table fields. A bare integer here is a
    /// name match on its decimal text, not a lookup of `number`.
    pub fn contains_object(&self, expr: &QueryExpression) -> Result<usize, ResolveError> {
        match expr {
            QueryExpression::FieldReference(r) => self.contains(r),
            QueryExpression::ColumnNumber(n) => self.contains_number(n),
            other => {
                let column = other.field_identifier();
                let mut found = None;
                for (i, f) in self.0.iter().enumerate() {
                    if f.is_from_table || !f.column.eq_ignore_ascii_case(&column) {
                        continue;
                    }
                    if found.is_some() {
                        return Err(ResolveError::ambiguous(&column, other.pos()));
                    }
                    found = Some(i);
                }
                found.ok_or_else(|| ResolveError::not_exist(&column, other.pos()))
            }
        }
    }

    /// Resolve a name, optionally qualified by view.
    ///
    /// An unqualified name matching more than one field is ambiguous,
    /// except that a join column answering to the name wins outright.
    pub fn contains(&self, reference: &FieldReference) -> Result<usize, ResolveError> {
        let name = reference.column.literal.as_str();
        let view = reference
            .view
            .as_ref()
            .map(|v| v.literal.as_str())
            .filter(|v| !v.is_empty());

        let mut found = None;
        for (i, f) in self.0.iter().enumerate() {
            if f.is_internal_id() {
                continue;
            }
            match view {
                Some(view) => {
                    if !f.view.eq_ignore_ascii_case(view) || !f.answers_to(name) {
                        continue;
                    }
                }
                None => {
                    if f.is_join_column && f.column.eq_ignore_ascii_case(name) {
                        return Ok(i);
                    }
                    if !f.answers_to(name) {
                        continue;
                    }
                }
            }
            if found.is_some() {
                return Err(ResolveError::ambiguous(reference, reference.pos()));
            }
            found = Some(i);
        }
        found.ok_or_else(|| ResolveError::not_exist(reference, reference.pos()))
    }

    /// Resolve `view.N` against the per-table numbering.
    pub fn contains_number(&self, number: &ColumnNumber) -> Result<usize, ResolveError> {
        let not_exist = || ResolveError::not_exist(number, number.view.pos);
        let n = usize::try_from(number.number).map_err(|_| not_exist())?;
        if n < 1 {
            return Err(not_exist());
        }
        self.0
            .iter()
            .position(|f| f.view.eq_ignore_ascii_case(&number.view.literal) && f.number == n)
            .ok_or_else(not_exist)
    }

    // ═══════════════════════════════════════════════════════════
    //  Reconstruction
    // ═══════════════════════════════════════════════════════════

    /// Rebind every field to `reference`, as when a subquery result is
    /// given a table alias. Replacement names, when given, must match the
    /// field count and be unique. Aliases and numbering are dropped.
    pub fn update(
        &self,
        reference: &str,
        fields: Option<&[Identifier]>,
    ) -> Result<Header, ResolveError> {
        if let Some(fields) = fields {
            if fields.len() != self.0.len() {
                return Err(ResolveError::FieldLengthNotMatch {
                    location: Location(fields.first().and_then(|f| f.pos)),
                });
            }
            for (i, f) in fields.iter().enumerate() {
                if fields[..i].iter().any(|p| p.literal.eq_ignore_ascii_case(&f.literal)) {
                    return Err(ResolveError::DuplicateFieldName {
                        name: f.literal.clone(),
                        location: Location(f.pos),
                    });
                }
            }
        }

        let rebuilt = self
            .0
            .iter()
            .enumerate()
            .map(|(i, f)| HeaderField {
                view: reference.to_string(),
                column: match fields {
                    Some(fields) => fields[i].literal.clone(),
                    None => f.column.clone(),
                },
                aliases: Vec::new(),
                number: 0,
                is_from_table: f.is_from_table,
                is_join_column: f.is_join_column,
            })
            .collect();
        Ok(Header(rebuilt))
    }

    /// Concatenate two headers, left columns first, as a join does.
    pub fn merge(&self, other: &Header) -> Header {
        Header(self.0.iter().chain(other.0.iter()).cloned().collect())
    }

    /// Append a projected expression column: not from a table, not
    /// addressable by number.
    pub fn add_computed_field(&self, column: impl Into<String>, alias: Option<&str>) -> Header {
        let mut fields = self.0.clone();
        fields.push(HeaderField {
            column: column.into(),
            aliases: alias.map(|a| vec![a.to_string()]).unwrap_or_default(),
            ..Default::default()
        });
        Header(fields)
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = &'a HeaderField;
    type IntoIter = std::slice::Iter<'a, HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
