// src/table.rs

use ahash::AHashMap;
use std::fmt::Write as FmtWrite;

use crate::error::DuplicateKey;

/// A typed row that knows how to render its (non-index) columns as text.
pub trait TableRow {
    /// Values in the same order as the table's `columns()`.
    fn fields(&self) -> Vec<String>;
}

/// A row carrying a natural primary key (sequence ID, protein ID, target ID).
pub trait KeyedRow: TableRow {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone)]
struct Index {
    name: String,
    positions: AHashMap<String, usize>,
}

/// Named columns over typed rows, with an optional unique index.
///
/// The index column is not part of `columns()`; it is reported by
/// `index_name()` and written first by `to_tsv()`.
#[derive(Debug, Clone)]
pub struct Table<R> {
    columns: Vec<String>,
    rows: Vec<R>,
    index: Option<Index>,
}

impl<R: TableRow> Table<R> {
    /// A table without an index.
    pub fn new(columns: Vec<String>, rows: Vec<R>) -> Self {
        Table {
            columns,
            rows,
            index: None,
        }
    }

    /// A table indexed by each row's key. Fails on the first repeated key.
    pub fn indexed(index_name: &str, columns: Vec<String>, rows: Vec<R>) -> Result<Self, DuplicateKey>
    where
        R: KeyedRow,
    {
        let mut positions = AHashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if positions.insert(row.key().to_string(), i).is_some() {
                return Err(DuplicateKey {
                    column: index_name.to_string(),
                    key: row.key().to_string(),
                });
            }
        }

        Ok(Table {
            columns,
            rows,
            index: Some(Index {
                name: index_name.to_string(),
                positions,
            }),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index.as_ref().map(|idx| idx.name.as_str())
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks a row up by its index key. Always `None` for unindexed tables.
    pub fn get(&self, key: &str) -> Option<&R> {
        let idx = self.index.as_ref()?;
        idx.positions.get(key).map(|&i| &self.rows[i])
    }

    /// Renders the table as tab-separated text with a header line.
    pub fn to_tsv(&self) -> String {
        let mut output = String::new();

        let keys: Option<Vec<&str>> = self.index.as_ref().map(|idx| {
            let mut keys = vec![""; self.rows.len()];
            for (key, &i) in &idx.positions {
                keys[i] = key.as_str();
            }
            keys
        });

        let mut header: Vec<&str> = Vec::with_capacity(self.columns.len() + 1);
        if let Some(name) = self.index_name() {
            header.push(name);
        }
        header.extend(self.columns.iter().map(String::as_str));
        writeln!(output, "{}", header.join("\t")).unwrap();

        for (i, row) in self.rows.iter().enumerate() {
            let mut fields = row.fields();
            if let Some(keys) = &keys {
                fields.insert(0, keys[i].to_string());
            }
            writeln!(output, "{}", fields.join("\t")).unwrap();
        }
        output
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
