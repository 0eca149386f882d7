#![forbid(unsafe_code)]

use serde::Serialize;

/// Inputs of the completion gate for one (employee, role, day).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompletionCounts {
    /// Catalog items for the role.
    pub total: u64,
    /// Items with a done response on the day.
    pub done: u64,
}

impl CompletionCounts {
    /// An empty catalog never blocks.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done >= self.total
    }

    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.done)
    }
}
