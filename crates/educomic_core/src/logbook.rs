/// A single progress line. Immutable once appended; `sequence` is the
/// accumulator's sole ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub sequence: u64,
    pub message: String,
}

/// Append-only, time-ordered progress log for one pipeline invocation.
///
/// The book has no awareness of which stage appends to it; stage code logs
/// unconditionally and the reducer appends on receipt. `reset` is called
/// exactly once per accepted invocation, before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBook {
    entries: Vec<LogEntry>,
    next_sequence: u64,
}

impl LogBook {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Assigns the next sequence number, stores the entry, and returns the
    /// assigned sequence.
    pub fn append(&mut self, message: impl Into<String>) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(LogEntry {
            sequence,
            message: message.into(),
        });
        sequence
    }

    /// Lazy, finite, restartable pass over the entries in sequence order.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all entries; sequence numbering restarts at 1.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.next_sequence = 1;
    }
}

impl Default for LogBook {
    fn default() -> Self {
        Self::new()
    }
}
