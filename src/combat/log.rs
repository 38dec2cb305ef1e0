//! Player-facing combat log
//!
//! A bounded ring of the most recent lines. Every line is mirrored to
//! `tracing` under the `combat` target.

use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone)]
pub struct CombatLog {
    lines: VecDeque<String>,
    capacity: usize,
    written: usize,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            written: 0,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(target: "combat", "{}", line);
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        self.written += 1;
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Does any retained line contain `needle`?
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total lines ever pushed, including evicted ones
    pub fn written(&self) -> usize {
        self.written
    }
}
