//! Append-only in-memory operation log and its paged reader.

use crate::domain::{LogError, Operation, OperationType};
use crate::ports::OperationLogReader;
use async_trait::async_trait;

/// Committed operations in commit order.
#[derive(Clone, Debug, Default)]
pub struct MemoryOperationLog {
    entries: Vec<Operation>,
}

impl MemoryOperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, op: Operation) {
        self.entries.push(op);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reader over entries of one type.
    pub fn reader_for(&self, op_type: OperationType, page_size: usize) -> PagedLogReader {
        PagedLogReader::new(
            self.entries
                .iter()
                .filter(|op| op.op_type == op_type)
                .cloned()
                .collect(),
            page_size,
        )
    }

    /// Reader over every entry.
    pub fn reader(&self, page_size: usize) -> PagedLogReader {
        PagedLogReader::new(self.entries.clone(), page_size)
    }
}

/// Forward-only reader yielding fixed-size pages of a log snapshot.
#[derive(Clone, Debug)]
pub struct PagedLogReader {
    entries: Vec<Operation>,
    cursor: usize,
    page_size: usize,
}

impl PagedLogReader {
    pub fn new(entries: Vec<Operation>, page_size: usize) -> Self {
        Self {
            entries,
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }
}

#[async_trait]
impl OperationLogReader for PagedLogReader {
    fn has_next(&self) -> bool {
        self.cursor < self.entries.len()
    }

    async fn read_next_page(&mut self) -> Result<Vec<Operation>, LogError> {
        if !self.has_next() {
            return Err(LogError::Exhausted);
        }
        let end = (self.cursor + self.page_size).min(self.entries.len());
        let page = self.entries[self.cursor..end].to_vec();
        self.cursor = end;
        Ok(page)
    }
}
