use crate::tools::ToolId;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub tool: ToolId,
    pub command: String,
    pub timestamp: DateTime<Local>,
}

/// Recently copied commands, newest first. Session-only.
#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Front-insert `command` unless it equals the current front entry.
    /// Returns whether an entry was added.
    pub fn record(&mut self, tool: ToolId, command: &str) -> bool {
        self.record_at(tool, command, Local::now())
    }

    pub fn record_at(&mut self, tool: ToolId, command: &str, timestamp: DateTime<Local>) -> bool {
        if self.entries.front().is_some_and(|e| e.command == command) {
            return false;
        }
        self.next_id += 1;
        self.entries.push_front(HistoryEntry {
            id: self.next_id,
            tool,
            command: command.to_string(),
            timestamp,
        });
        self.entries.truncate(HISTORY_LIMIT);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }
}
