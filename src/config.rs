use crate::error::{CompressError, Result};
use crate::symbol::SymbolAlphabet;
use std::fmt;

/// Minimum number of transactions an item or itemset must appear in.
///
/// Only constructible through [`MinSupport::new`], so every threshold that
/// reaches the miner is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinSupport(usize);

impl MinSupport {
    /// The threshold used when none is given: an itemset must repeat at least once.
    pub const DEFAULT: MinSupport = MinSupport(2);

    /// Admits every item that occurs at all.
    pub const ONE: MinSupport = MinSupport(1);

    /// Validates a threshold, rejecting 0.
    pub fn new(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(CompressError::InvalidSupportThreshold { value });
        }
        Ok(Self(value))
    }

    /// Returns the raw threshold.
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns true if `count` meets this threshold.
    #[inline]
    pub fn admits(self, count: usize) -> bool {
        count >= self.0
    }
}

impl Default for MinSupport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for MinSupport {
    type Error = CompressError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for MinSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings for a full mine-and-encode run.
#[derive(Debug, Clone, Default)]
pub struct CompressorConfig {
    /// Support threshold applied at every mining level
    pub min_support: MinSupport,
    /// Symbols handed out to discovered itemsets
    pub alphabet: SymbolAlphabet,
}

impl CompressorConfig {
    pub fn new(min_support: MinSupport, alphabet: SymbolAlphabet) -> Self {
        Self {
            min_support,
            alphabet,
        }
    }

    pub fn with_min_support(mut self, min_support: MinSupport) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_alphabet(mut self, alphabet: SymbolAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }
}
