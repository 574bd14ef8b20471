use serde::{Deserialize, Serialize};

/// One row of text cells as found in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TableRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }
}

/// Anything that exposes tables of text rows in document order.
pub trait TabularDocument {
    fn tables(&self) -> &[Table];

    fn row_count(&self) -> usize {
        self.tables().iter().map(|t| t.rows.len()).sum()
    }
}

/// In-memory document produced by the readers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub tables: Vec<Table>,
}

impl Document {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Build a document from nested cell literals, mostly useful in tests.
    pub fn from_cells<T, R, C>(tables: T) -> Self
    where
        T: IntoIterator<Item = R>,
        R: IntoIterator<Item = Vec<C>>,
        C: Into<String>,
    {
        let tables = tables
            .into_iter()
            .map(|rows| Table::new(rows.into_iter().map(TableRow::from_iter).collect()))
            .collect();
        Self { tables }
    }
}

impl TabularDocument for Document {
    fn tables(&self) -> &[Table] {
        &self.tables
    }
}

impl TabularDocument for Vec<Table> {
    fn tables(&self) -> &[Table] {
        self
    }
}
