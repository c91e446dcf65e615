use crate::error::ScrapeError;

/// A small in-memory table: ordered column names plus string rows.
///
/// Every row holds exactly `headers.len()` cells; constructors and mutators
/// uphold that, so positional lookups never go out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row, truncating extra cells. The caller must supply at least
    /// `headers.len()` cells.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        debug_assert!(cells.len() >= self.headers.len());
        cells.truncate(self.headers.len());
        self.rows.push(cells);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell lookup by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    fn require_column(&self, name: &str) -> Result<usize, ScrapeError> {
        self.column_index(name).ok_or_else(|| ScrapeError::MissingColumn {
            column: name.to_string(),
        })
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, ScrapeError> {
        let col = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| r[col].as_str()).collect())
    }

    /// Pure projection: drops the named columns, keeping the order of the rest.
    /// Unknown names are ignored, matching a drop that was configured for a
    /// table variant where the column is absent.
    pub fn drop_columns(&self, names: &[&str]) -> Table {
        let keep: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !names.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect();
        Table {
            headers: keep.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| keep.iter().map(|&i| r[i].clone()).collect())
                .collect(),
        }
    }
}
