use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::dataset;
use crate::patterns;
use crate::stats::{FrequencyTable, WordCount};

pub use crate::patterns::DELIMITERS;

pub const DEFAULT_MIN_LENGTH: usize = 1;

const HEADER: [&str; 2] = ["word", "count"];

/// Splits a whitespace token at every delimiter and lowercases the pieces.
fn normalize_token(token: &str) -> impl Iterator<Item = String> + '_ {
    token
        .split(patterns::is_delimiter)
        .filter(|piece| !piece.is_empty())
        .map(str::to_lowercase)
}

/// Tallies normalized words across `lines`.
///
/// Words shorter than `min_length` characters are dropped.
pub fn calculate_word_counts<S: AsRef<str>>(lines: &[S], min_length: usize) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    let mut skipped = 0usize;

    for line in lines {
        for token in line.as_ref().split_whitespace() {
            for word in normalize_token(token) {
                if word.chars().count() < min_length {
                    skipped += 1;
                    continue;
                }
                table.add(&word);
            }
        }
    }

    debug!(
        action = "count",
        component = "word_counter",
        line_count = lines.len(),
        unique_words = table.len(),
        total_words = table.total(),
        skipped_short = skipped,
        min_length,
        "Counted words"
    );
    table
}

/// Writes `table` as a `word,count` CSV in table order.
pub fn save_word_counts(path: &Path, table: &FrequencyTable) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create word count file {:?}", path))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    // The header is written by hand so an empty table still gets one.
    writer.write_record(HEADER)?;
    for row in table {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush word count file {:?}", path))?;

    info!(
        action = "save",
        component = "table_writer",
        file_path = ?path,
        row_count = table.len(),
        "Saved word counts"
    );
    Ok(())
}

/// Reads a `word,count` CSV back into a table.
pub fn load_word_counts(path: &Path) -> Result<FrequencyTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open word count file {:?}", path))?;

    let headers = reader.headers()?.clone();
    if headers.len() != HEADER.len() || headers.iter().zip(HEADER).any(|(a, b)| a != b) {
        anyhow::bail!(
            "Unexpected header in {:?}: expected 'word,count', found '{}'",
            path,
            headers.iter().collect::<Vec<_>>().join(",")
        );
    }

    let rows = reader
        .deserialize::<WordCount>()
        .collect::<csv::Result<Vec<WordCount>>>()
        .with_context(|| format!("Malformed row in {:?}", path))?;
    let table: FrequencyTable = rows.into_iter().collect();

    info!(
        action = "load",
        component = "table_reader",
        file_path = ?path,
        row_count = table.len(),
        "Loaded word counts"
    );
    Ok(table)
}

/// Counting stage: load `input`, count words and save the table to `output`.
pub fn word_count(input: &Path, output: &Path, min_length: usize) -> Result<FrequencyTable> {
    let start_time = Instant::now();
    info!(action = "start", component = "word_count", input = ?input, min_length, "Counting words");

    let lines = dataset::load_text(input)?;
    let table = calculate_word_counts(&lines, min_length);
    save_word_counts(output, &table)?;

    info!(
        action = "complete",
        component = "word_count",
        unique_words = table.len(),
        total_words = table.total(),
        duration_ms = start_time.elapsed().as_millis(),
        "Word count completed"
    );
    Ok(table)
}
