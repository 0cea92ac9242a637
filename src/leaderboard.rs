//! Ranked record of human victories. The engine only ever appends; nothing
//! here feeds back into gameplay.

use alloc::string::String;
use alloc::vec::Vec;

/// Most entries retained in the store.
pub const MAX_ENTRIES: usize = 50;
/// Most entries surfaced for display.
pub const DISPLAY_ENTRIES: usize = 20;

/// One finished, won game. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    /// Label of the opponent beaten (the strategy name).
    pub opponent: String,
    /// Human shots it took to win; fewer is better.
    pub shots: u32,
    /// Caller-supplied timestamp, seconds since the Unix epoch.
    pub timestamp: u64,
}

impl ShotRecord {
    pub fn new(opponent: &str, shots: u32, timestamp: u64) -> Self {
        ShotRecord {
            opponent: String::from(opponent),
            shots,
            timestamp,
        }
    }
}

/// In-memory ranked list, best (fewest shots) first, capped at
/// [`MAX_ENTRIES`].
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<ShotRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, keeping the list sorted ascending by shot count.
    /// Stable sort, so earlier records rank ahead of later equal scores.
    pub fn append(&mut self, record: ShotRecord) {
        self.entries.push(record);
        self.entries.sort_by_key(|r| r.shots);
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every retained record, ranked.
    pub fn entries(&self) -> &[ShotRecord] {
        &self.entries
    }

    /// The display slice: the top [`DISPLAY_ENTRIES`] records.
    pub fn display(&self) -> &[ShotRecord] {
        &self.entries[..self.entries.len().min(DISPLAY_ENTRIES)]
    }
}
