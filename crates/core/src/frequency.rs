//! Symbol frequency counting with optional baseline alphabet merging.
//!
//! The map is ordered by symbol so that iterating it always yields the same
//! sequence; tree construction depends on that order to break ties.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Number of symbols in [`DEFAULT_BASELINE`].
pub const BASELINE_LEN: usize = 128;

/// The 128 ASCII code points, `'\0'` through `'\x7f'`.
pub const DEFAULT_BASELINE: [char; BASELINE_LEN] = ascii_baseline();

const fn ascii_baseline() -> [char; BASELINE_LEN] {
    let mut symbols = ['\0'; BASELINE_LEN];
    let mut i = 0;
    while i < BASELINE_LEN {
        symbols[i] = i as u8 as char;
        i += 1;
    }
    symbols
}

/// Which symbols must be present in a table regardless of the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Baseline {
    /// Merge [`DEFAULT_BASELINE`].
    #[default]
    Default,
    /// Merge the given symbols.
    Custom(Vec<char>),
    /// Count the input only.
    None,
}

impl Baseline {
    /// Build a custom baseline from every character of `alphabet`.
    ///
    /// An empty string means no baseline at all.
    pub fn from_alphabet(alphabet: &str) -> Self {
        if alphabet.is_empty() {
            Baseline::None
        } else {
            Baseline::Custom(alphabet.chars().collect())
        }
    }

    /// The symbols this baseline guarantees.
    pub fn symbols(&self) -> &[char] {
        match self {
            Baseline::Default => &DEFAULT_BASELINE,
            Baseline::Custom(symbols) => symbols,
            Baseline::None => &[],
        }
    }
}

/// Occurrence count per symbol, iterated in symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<char, u64>,
}

impl FrequencyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every symbol of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut map = Self::new();
        map.add_text(text);
        map
    }

    /// Read all of `reader` as UTF-8 text and count it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::from_text(&text))
    }

    /// Read the file at `path` and count it.
    ///
    /// # Errors
    /// `Error::NotFound` if the file does not exist, `Error::Io` otherwise.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
        Ok(Self::from_text(&text))
    }

    /// Build a map from explicit `(symbol, count)` pairs.
    ///
    /// Repeated symbols accumulate.
    pub fn from_counts<I: IntoIterator<Item = (char, u64)>>(counts: I) -> Self {
        let mut map = Self::new();
        for (symbol, count) in counts {
            *map.counts.entry(symbol).or_insert(0) += count;
        }
        map
    }

    /// Add every symbol of `text` to the counts.
    pub fn add_text(&mut self, text: &str) {
        for symbol in text.chars() {
            *self.counts.entry(symbol).or_insert(0) += 1;
        }
    }

    /// Ensure each baseline symbol is present with a count of at least 1.
    pub fn merge_baseline(&mut self, baseline: &Baseline) {
        let before = self.counts.len();
        for &symbol in baseline.symbols() {
            let count = self.counts.entry(symbol).or_insert(0);
            if *count == 0 {
                *count = 1;
            }
        }
        debug!(
            added = self.counts.len() - before,
            total = self.counts.len(),
            "merged baseline alphabet"
        );
    }

    /// Builder-style form of [`merge_baseline`](Self::merge_baseline).
    pub fn with_baseline(mut self, baseline: &Baseline) -> Self {
        self.merge_baseline(baseline);
        self
    }

    /// Count for `symbol` (0 if absent).
    pub fn count(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// True if `symbol` has an entry.
    pub fn contains(&self, symbol: char) -> bool {
        self.counts.contains_key(&symbol)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}
