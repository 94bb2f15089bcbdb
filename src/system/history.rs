use crate::error::StatError;
use crate::format::truncate_unicode;

/// Widest row a history buffer keeps, in terminal columns.
pub const MAX_ROW_WIDTH: usize = 1023;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    text: String,
}

impl HistoryRow {
    pub fn new(text: impl Into<String>) -> Self {
        let text: String = text.into();
        HistoryRow {
            text: truncate_unicode(&text, MAX_ROW_WIDTH),
        }
    }

    pub fn with_graph(mut self, graph: &str) -> Self {
        self.text.push_str(graph);
        self.text = truncate_unicode(&self.text, MAX_ROW_WIDTH);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Append-only rows, one per tick, never more than `capacity`.
#[derive(Debug)]
pub struct HistoryBuffer {
    rows: Vec<HistoryRow>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: Vec::new(),
            capacity,
        }
    }

    /// Append the row for the next tick and return its index.
    pub fn push(&mut self, row: HistoryRow) -> Result<usize, StatError> {
        if self.rows.len() == self.capacity {
            return Err(StatError::HistoryFull {
                capacity: self.capacity,
            });
        }
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&HistoryRow> {
        self.rows.get(index)
    }

    /// Rows 0 through `index`, for the in-place redraw.
    pub fn rows_through(&self, index: usize) -> &[HistoryRow] {
        let end = (index + 1).min(self.rows.len());
        &self.rows[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_tick_index() {
        let mut buffer = HistoryBuffer::new(3);
        assert!(buffer.is_empty());
        assert_eq!(buffer.push(HistoryRow::new("a")).unwrap(), 0);
        assert_eq!(buffer.push(HistoryRow::new("b")).unwrap(), 1);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(1).unwrap().as_str(), "b");
    }

    #[test]
    fn push_past_capacity_fails() {
        let mut buffer = HistoryBuffer::new(1);
        buffer.push(HistoryRow::new("a")).unwrap();
        let err = buffer.push(HistoryRow::new("b")).unwrap_err();
        assert!(matches!(err, StatError::HistoryFull { capacity: 1 }));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.get(0).unwrap().as_str(), "a");
    }

    #[test]
    fn rows_through_is_inclusive_and_bounded() {
        let mut buffer = HistoryBuffer::new(4);
        for text in ["r0", "r1", "r2"] {
            buffer.push(HistoryRow::new(text)).unwrap();
        }
        let through_one: Vec<&str> = buffer.rows_through(1).iter().map(|r| r.as_str()).collect();
        assert_eq!(through_one, vec!["r0", "r1"]);
        assert_eq!(buffer.rows_through(10).len(), 3);
    }

    #[test]
    fn graph_suffix_is_appended() {
        let row = HistoryRow::new("8.00 GB").with_graph("\t|o 0.00 (8.00)");
        assert_eq!(row.as_str(), "8.00 GB\t|o 0.00 (8.00)");
    }

    #[test]
    fn rows_are_bounded() {
        let row = HistoryRow::new("x".repeat(2000));
        assert!(row.as_str().chars().count() <= MAX_ROW_WIDTH);
        let graphed = HistoryRow::new("y").with_graph(&"#".repeat(5000));
        assert!(graphed.as_str().chars().count() <= MAX_ROW_WIDTH);
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let mut buffer = HistoryBuffer::new(usize::MAX);
        assert_eq!(buffer.capacity(), usize::MAX);
        assert_eq!(buffer.push(HistoryRow::new("a")).unwrap(), 0);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut buffer = HistoryBuffer::new(0);
        assert!(buffer.push(HistoryRow::new("a")).is_err());
        assert!(buffer.rows_through(0).is_empty());
    }
}
