use std::collections::HashMap;

/// Assigns ranks to matches sharing a spectrum title, by order of appearance.
///
/// The first row carrying a title gets rank 1, the next one rank 2, and so on.
#[derive(Debug, Clone, Default)]
pub struct RankTracker {
    ranks: HashMap<String, u32>,
}

impl RankTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank for the next occurrence of `title`
    pub fn next_rank(&mut self, title: &str) -> u32 {
        if let Some(rank) = self.ranks.get_mut(title) {
            *rank += 1;
            return *rank;
        }
        self.ranks.insert(title.to_string(), 1);
        1
    }

    /// Highest rank assigned to `title` so far
    pub fn current_rank(&self, title: &str) -> Option<u32> {
        self.ranks.get(title).copied()
    }

    /// Number of distinct titles seen
    pub fn distinct_titles(&self) -> usize {
        self.ranks.len()
    }
}
