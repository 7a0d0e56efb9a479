use crate::types::MAX_LEVEL;

/// Tuning knobs for a [`SkipLog`](crate::SkipLog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of levels. Clamped to `1..=MAX_LEVEL`.
    pub max_level: usize,
    /// Seed for the default bit source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_level: MAX_LEVEL,
            seed: None,
        }
    }
}

impl Options {
    /// Set the level ceiling.
    #[must_use]
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Seed the default bit source for reproducible level assignment.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn effective_max_level(&self) -> usize {
        self.max_level.clamp(1, MAX_LEVEL)
    }
}
