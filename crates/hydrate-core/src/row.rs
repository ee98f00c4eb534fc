use crate::{err, Result, Value};

use indexmap::IndexMap;
use std::collections::VecDeque;

/// One flat result row: column values in the order the query produced them.
///
/// Column names are matched bit-for-bit by [`Row::get`]; case-insensitive
/// matching is opted into by the materializer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column, replacing an earlier column of the same name.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Returns the raw value of `column`, or `None` if the row has no such
    /// column. A present column holding SQL `NULL` returns `Value::Null`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Like [`Row::get`] but compares column names ignoring ASCII case.
    pub fn get_ignore_ascii_case(&self, column: &str) -> Option<&Value> {
        self.get(column).or_else(|| {
            self.columns
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(column))
                .map(|(_, value)| value)
        })
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.columns.iter().map(|(name, value)| (&name[..], value))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

/// A forward-only, ordered source of already-executed query rows.
///
/// `next` is the only place a materialization pass may block; a cursor backed
/// by a live connection waits on I/O there.
pub trait RowCursor {
    /// Returns `true` if another row is available.
    fn has_next(&mut self) -> bool;

    /// Returns the next row.
    ///
    /// Calling `next` after `has_next` returned `false` is an error.
    fn next(&mut self) -> Result<Row>;
}

impl<C: RowCursor + ?Sized> RowCursor for &mut C {
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next(&mut self) -> Result<Row> {
        (**self).next()
    }
}

impl<C: RowCursor + ?Sized> RowCursor for Box<C> {
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next(&mut self) -> Result<Row> {
        (**self).next()
    }
}

/// An in-memory cursor over rows that are already buffered.
#[derive(Debug, Default, Clone)]
pub struct Rows {
    buffer: VecDeque<Row>,
}

impl Rows {
    pub fn from_vec(rows: Vec<Row>) -> Self {
        Self {
            buffer: rows.into(),
        }
    }

    /// Number of rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }
}

impl From<Vec<Row>> for Rows {
    fn from(rows: Vec<Row>) -> Self {
        Self::from_vec(rows)
    }
}

impl FromIterator<Row> for Rows {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            buffer: iter.into_iter().collect(),
        }
    }
}

impl RowCursor for Rows {
    fn has_next(&mut self) -> bool {
        !self.buffer.is_empty()
    }

    fn next(&mut self) -> Result<Row> {
        self.buffer
            .pop_front()
            .ok_or_else(|| err!("row cursor is exhausted"))
    }
}

/// Adapts a fallible row iterator, such as a driver's result stream, into a
/// [`RowCursor`].
pub struct IterCursor<I: Iterator> {
    iter: std::iter::Peekable<I>,
}

impl<I> IterCursor<I>
where
    I: Iterator<Item = Result<Row>>,
{
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter().peekable(),
        }
    }
}

impl<I> RowCursor for IterCursor<I>
where
    I: Iterator<Item = Result<Row>>,
{
    fn has_next(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn next(&mut self) -> Result<Row> {
        self.iter
            .next()
            .unwrap_or_else(|| Err(err!("row cursor is exhausted")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_case_sensitive() {
        let row = Row::new().with("Order_Id", 1i64);

        assert!(row.get("order_id").is_none());
        assert_eq!(row.get_ignore_ascii_case("order_id"), Some(&Value::I64(1)));
    }

    #[test]
    fn null_column_is_present() {
        let row = Row::new().with("customer_fk", Value::Null);

        assert!(row.contains("customer_fk"));
        assert_eq!(row.get("customer_fk"), Some(&Value::Null));
    }

    #[test]
    fn rows_cursor_drains_in_order() {
        let mut rows = Rows::from_vec(vec![Row::new().with("n", 1i32), Row::new().with("n", 2i32)]);

        assert!(rows.has_next());
        assert_eq!(rows.next().unwrap().get("n"), Some(&Value::I32(1)));
        assert_eq!(rows.next().unwrap().get("n"), Some(&Value::I32(2)));
        assert!(!rows.has_next());
        assert!(rows.next().is_err());
    }

    #[test]
    fn iter_cursor_surfaces_errors() {
        let mut cursor = IterCursor::new(vec![
            Ok(Row::new().with("n", 1i32)),
            Err(err!("connection reset")),
        ]);

        assert!(cursor.next().is_ok());
        assert!(cursor.has_next());
        assert_eq!(cursor.next().unwrap_err().to_string(), "connection reset");
        assert!(!cursor.has_next());
    }
}
