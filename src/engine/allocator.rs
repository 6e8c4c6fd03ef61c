//! Sequential extension numbers under a team prefix.
//!
//! Extensions are four characters long: the team id followed by a
//! zero-padded sequence number. The allocator owns the set of extensions
//! already in use and is the only place that grows it, so every extension it
//! hands out is distinct from the seed and from every earlier allocation.

use std::collections::HashSet;

/// Total length of a generated extension.
pub const EXTENSION_WIDTH: usize = 4;

/// Owns the set of extensions in use for one run.
#[derive(Debug, Clone, Default)]
pub struct ExtensionAllocator {
    used: HashSet<String>,
}

impl ExtensionAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator that treats every `existing` extension as taken.
    pub fn seeded<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            used: existing.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the next free extension under `prefix` and marks it used.
    ///
    /// A prefix of four or more characters leaves no room for a sequence and is
    /// returned truncated to four characters, without a uniqueness check and
    /// without being recorded. `None` means every sequence under the prefix is
    /// already taken.
    pub fn allocate(&mut self, prefix: &str) -> Option<String> {
        let prefix_len = prefix.chars().count();
        if prefix_len >= EXTENSION_WIDTH {
            return Some(prefix.chars().take(EXTENSION_WIDTH).collect());
        }

        let width = EXTENSION_WIDTH - prefix_len;
        let limit = 10u32.pow(width as u32);
        for seq in 1..limit {
            let candidate = format!("{prefix}{seq:0width$}");
            if !self.used.contains(&candidate) {
                self.used.insert(candidate.clone());
                return Some(candidate);
            }
        }
        None
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.used.contains(extension)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
