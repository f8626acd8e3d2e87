//! Symbol to codeword mapping.
//!
//! A `CodeTable` maps each symbol to a non-empty string of '0'/'1': the path
//! from the tree root to the symbol's leaf (0 = left, 1 = right). Tables are
//! always prefix-free, whether generated from a tree or loaded from disk.
//!
//! # Canonical order
//!
//! For display and serialization, entries are ordered by reading each
//! codeword as a decimal number after substituting 0 -> 1 and 1 -> 2.
//! Substituted digits are never zero, so that is the same as ordering by
//! length and then lexically, which is how [`CodeTable::canonical_order`]
//! computes it. Short (frequent) codes come first.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyMap;
use crate::tree::{BuildNode, HuffmanTree};

/// Prefix-free mapping from symbol to codeword.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<char, String>")]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    /// Build a table from a frequency map (tree construction + code walk).
    pub fn from_frequencies(frequencies: &FrequencyMap) -> Result<Self> {
        let tree = HuffmanTree::build(frequencies)?;
        Ok(Self::from_tree(&tree))
    }

    /// Walk the tree depth-first, recording the path to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(&BuildNode, String)> = vec![(tree.root(), String::new())];

        while let Some((node, path)) = stack.pop() {
            if let Some(symbol) = node.symbol {
                codes.insert(symbol, path);
                continue;
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, format!("{path}1")));
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, format!("{path}0")));
            }
        }

        debug!(symbols = codes.len(), "generated code table");
        Self { codes }
    }

    /// Build a table from explicit `(symbol, codeword)` pairs.
    ///
    /// # Errors
    /// - `HuffmanError::InvalidCode` for an empty or non-binary codeword
    /// - `HuffmanError::PrefixCollision` if one codeword prefixes another
    pub fn from_codes<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let codes = pairs.into_iter().map(|(c, s)| (c, s.into())).collect();
        Self::validate(codes).map_err(Into::into)
    }

    fn validate(codes: BTreeMap<char, String>) -> std::result::Result<Self, HuffmanError> {
        for (&symbol, code) in &codes {
            if code.is_empty() || !code.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(HuffmanError::InvalidCode {
                    symbol,
                    code: code.clone(),
                });
            }
        }

        // In lexical order a prefix always sorts directly before some
        // codeword it prefixes, so adjacent pairs are enough
        let mut sorted: Vec<(&str, char)> = codes.iter().map(|(&s, c)| (c.as_str(), s)).collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            let (prefix, first) = pair[0];
            let (code, second) = pair[1];
            if code.starts_with(prefix) {
                return Err(HuffmanError::PrefixCollision {
                    first,
                    second,
                    prefix: prefix.to_string(),
                });
            }
        }

        Ok(Self { codes })
    }

    /// Codeword for `symbol`.
    pub fn code(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.codes.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, codeword)` in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c.as_str()))
    }

    /// Entries sorted into canonical order (see module docs).
    pub fn canonical_order(&self) -> Vec<(char, &str)> {
        let mut entries: Vec<(char, &str)> = self.iter().collect();
        entries.sort_by(|(_, a), (_, b)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        entries
    }

    /// Mean codeword length in bits, weighted by `frequencies`.
    ///
    /// Symbols missing from the table are ignored. Returns 0.0 when nothing
    /// is counted.
    pub fn average_code_length(&self, frequencies: &FrequencyMap) -> f64 {
        let mut bits = 0u64;
        let mut symbols = 0u64;
        for (symbol, count) in frequencies.iter() {
            if let Some(code) = self.code(symbol) {
                bits += count * code.len() as u64;
                symbols += count;
            }
        }
        if symbols == 0 {
            0.0
        } else {
            bits as f64 / symbols as f64
        }
    }
}

impl TryFrom<BTreeMap<char, String>> for CodeTable {
    type Error = HuffmanError;

    fn try_from(codes: BTreeMap<char, String>) -> std::result::Result<Self, Self::Error> {
        Self::validate(codes)
    }
}

impl Serialize for CodeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.canonical_order();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (symbol, code) in entries {
            map.serialize_entry(&symbol, code)?;
        }
        map.end()
    }
}

/// One `codeword<TAB>symbol` line per entry, in canonical order.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.canonical_order() {
            writeln!(f, "{code}\t{symbol:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Baseline;

    fn assert_prefix_free(table: &CodeTable) {
        let codes: Vec<&str> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_abc_codes() {
        let map = FrequencyMap::from_counts([('a', 5), ('b', 2), ('c', 1)]);
        let table = CodeTable::from_frequencies(&map).unwrap();

        assert_eq!(table.code('c'), Some("00"));
        assert_eq!(table.code('b'), Some("01"));
        assert_eq!(table.code('a'), Some("1"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let map = FrequencyMap::from_counts([('x', 4)]);
        let table = CodeTable::from_frequencies(&map).unwrap();
        assert_eq!(table.code('x'), Some("0"));
    }

    #[test]
    fn test_prefix_free_with_baseline() {
        let map = FrequencyMap::from_text("It was the best of times, it was the worst of times.")
            .with_baseline(&Baseline::Default);
        let table = CodeTable::from_frequencies(&map).unwrap();

        assert_eq!(table.len(), map.len());
        for (symbol, _) in map.iter() {
            assert!(table.contains(symbol), "{symbol:?} has no code");
        }
        assert_prefix_free(&table);
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let map = FrequencyMap::from_counts([('e', 100), ('t', 40), ('q', 1), ('z', 1)]);
        let table = CodeTable::from_frequencies(&map).unwrap();
        let e = table.code('e').unwrap().len();
        let q = table.code('q').unwrap().len();
        assert!(e < q);
    }

    #[test]
    fn test_canonical_order() {
        let table = CodeTable::from_codes([('a', "1"), ('b', "01"), ('c', "001"), ('d', "000")]).unwrap();
        let order: Vec<&str> = table.canonical_order().into_iter().map(|(_, c)| c).collect();
        assert_eq!(order, vec!["1", "01", "000", "001"]);
    }

    #[test]
    fn test_canonical_order_matches_digit_substitution() {
        let map = FrequencyMap::from_text("canonical ordering of a code table");
        let table = CodeTable::from_frequencies(&map).unwrap();

        let key = |code: &str| -> u128 {
            code.bytes()
                .fold(0u128, |acc, b| acc * 10 + if b == b'0' { 1 } else { 2 })
        };
        let keys: Vec<u128> = table.canonical_order().into_iter().map(|(_, c)| key(c)).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_codes_rejects_prefix() {
        let result = CodeTable::from_codes([('a', "0"), ('b', "01"), ('c', "11")]);
        assert!(matches!(
            result,
            Err(crate::error::Error::Huffman(HuffmanError::PrefixCollision { first: 'a', second: 'b', .. }))
        ));
    }

    #[test]
    fn test_from_codes_rejects_duplicate_codes() {
        let result = CodeTable::from_codes([('a', "10"), ('b', "10")]);
        assert!(matches!(
            result,
            Err(crate::error::Error::Huffman(HuffmanError::PrefixCollision { .. }))
        ));
    }

    #[test]
    fn test_from_codes_rejects_bad_codewords() {
        assert!(CodeTable::from_codes([('a', "")]).is_err());
        assert!(matches!(
            CodeTable::from_codes([('a', "012")]),
            Err(crate::error::Error::Huffman(HuffmanError::InvalidCode { symbol: 'a', .. }))
        ));
    }

    #[test]
    fn test_average_code_length() {
        let map = FrequencyMap::from_counts([('a', 5), ('b', 2), ('c', 1)]);
        let table = CodeTable::from_frequencies(&map).unwrap();
        // 5*1 + 2*2 + 1*2 = 11 bits over 8 symbols
        assert_eq!(table.average_code_length(&map), 11.0 / 8.0);
        assert_eq!(table.average_code_length(&FrequencyMap::new()), 0.0);
    }

    #[test]
    fn test_json_is_canonically_ordered() {
        let table = CodeTable::from_codes([('a', "00"), ('b', "01"), ('c', "1")]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"c":"1","a":"00","b":"01"}"#);

        let back: CodeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_json_rejects_invalid_table() {
        let result: std::result::Result<CodeTable, _> = serde_json::from_str(r#"{"a":"0","b":"0"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let table = CodeTable::from_codes([('a', "0"), ('\n', "1")]).unwrap();
        assert_eq!(table.to_string(), "0\t'a'\n1\t'\\n'\n");
    }
}
