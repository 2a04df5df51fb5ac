//! Batch pagination over an in-memory list.

use std::ops::Range;

/// Cursor that reveals a list in fixed-size windows.
///
/// The pager holds no data; it only turns a list length into successive
/// index ranges. Past the end every further call yields an empty range,
/// so running out of records is a no-op rather than an error.
#[derive(Debug, Clone)]
pub struct BatchPager {
    batch_size: usize,
    current_batch: usize,
}

impl BatchPager {
    /// Create a pager revealing `batch_size` records per call.
    ///
    /// A zero batch size would never reveal anything; the configuration
    /// layer rejects it before a pager is built.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            current_batch: 0,
        }
    }

    /// Index range of the next batch for a list of `total` records,
    /// advancing the cursor. The final batch may be short.
    pub fn next_range(&mut self, total: usize) -> Range<usize> {
        let start = self.current_batch * self.batch_size;
        self.current_batch += 1;

        if start >= total {
            return total..total;
        }
        start..(start + self.batch_size).min(total)
    }

    /// True once every record of a list of `total` has been revealed.
    pub fn is_exhausted(&self, total: usize) -> bool {
        self.current_batch * self.batch_size >= total
    }

    /// Rewind to the first batch.
    pub fn reset(&mut self) {
        self.current_batch = 0;
    }
}
