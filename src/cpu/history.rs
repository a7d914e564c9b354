/*!
history.rs - Bounded ring of recently executed instructions.

Disabled by default; the facade records one entry per completed
instruction while enabled. The ring keeps the newest `HISTORY_CAP`
entries, overwriting the oldest. Toggling recording does not clear what
was already captured.
*/

use crate::cpu::addressing::AddrMode;

/// Ring capacity.
pub const HISTORY_CAP: usize = 64;

/// One executed instruction, as the dispatcher saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Address the opcode was fetched from.
    pub pc: u16,
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    /// Resolved operand (effective address or branch target; 0 when the
    /// mode carries none).
    pub arg: u16,
}

/// Fixed-capacity circular buffer of `HistoryEntry`.
pub struct History {
    entries: Vec<HistoryEntry>,
    head: usize,
    enabled: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(HISTORY_CAP),
            head: 0,
            enabled: false,
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable recording. Captured entries are retained.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.head = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record one entry if enabled, overwriting the oldest at capacity.
    pub fn record(&mut self, entry: HistoryEntry) {
        if !self.enabled {
            return;
        }
        if self.entries.len() < HISTORY_CAP {
            self.entries.push(entry);
        } else {
            self.entries[self.head] = entry;
            self.head = (self.head + 1) % HISTORY_CAP;
        }
    }

    /// Iterate oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        let (newer, older) = self.entries.split_at(self.head);
        older.iter().chain(newer.iter())
    }
}
