use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One row of a frequency table, serialized as `word,count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Word to count mapping that remembers the order in which words were first seen.
///
/// A word with a zero count is never stored.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    rows: Vec<WordCount>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more occurrence of `word`.
    pub fn add(&mut self, word: &str) {
        self.add_count(word, 1);
    }

    /// Adds `count` occurrences of `word`. A zero count is ignored.
    pub fn add_count(&mut self, word: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.index.get(word) {
            Some(&pos) => {
                let row = &mut self.rows[pos];
                row.count = row.count.saturating_add(count);
            }
            None => {
                self.index.insert(word.to_string(), self.rows.len());
                self.rows.push(WordCount::new(word, count));
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.index.get(word).map(|&pos| self.rows[pos].count)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts, capped at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.rows
            .iter()
            .fold(0u64, |sum, row| sum.saturating_add(row.count))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordCount> {
        self.rows.iter()
    }

    /// The `limit` most frequent rows, highest count first. Ties keep table order.
    pub fn top(&self, limit: usize) -> Vec<&WordCount> {
        let mut sorted: Vec<&WordCount> = self.rows.iter().collect();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(limit);
        sorted
    }
}

impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for FrequencyTable {}

impl FromIterator<WordCount> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = WordCount>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for row in iter {
            table.add_count(&row.word, row.count);
        }
        table
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a WordCount;
    type IntoIter = std::slice::Iter<'a, WordCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub source: PathBuf,
    pub prepared_path: Option<PathBuf>,
    pub table_path: PathBuf,
    pub chart_path: Option<PathBuf>,
    pub table: FrequencyTable,
}
