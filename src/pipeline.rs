use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::args::{CountArgs, PlotArgs, PrepareArgs, RunArgs};
use crate::config::ProjectPaths;
use crate::stats::{AnalysisResult, FrequencyTable};
use crate::utils::format_number;
use crate::{analysis, dataset, plots};

fn file_name(path: &Path) -> Result<&OsStr> {
    path.file_name()
        .with_context(|| format!("Input path {:?} has no file name", path))
}

fn file_stem(path: &Path) -> Result<&OsStr> {
    path.file_stem()
        .with_context(|| format!("Input path {:?} has no file name", path))
}

pub fn default_prepared_path(paths: &ProjectPaths, input: &Path) -> Result<PathBuf> {
    Ok(paths.processed_data_dir.join(file_name(input)?))
}

/// `<stem>.<extension>`, keeping any dots already in the stem.
fn with_new_extension(input: &Path, extension: &str) -> Result<OsString> {
    let mut name = file_stem(input)?.to_os_string();
    name.push(".");
    name.push(extension);
    Ok(name)
}

pub fn default_table_path(paths: &ProjectPaths, input: &Path) -> Result<PathBuf> {
    Ok(paths.analyzed_dir.join(with_new_extension(input, "csv")?))
}

pub fn default_chart_path(paths: &ProjectPaths, input: &Path) -> Result<PathBuf> {
    Ok(paths.result_dir.join(with_new_extension(input, "svg")?))
}

pub fn prepare(args: &PrepareArgs, paths: &ProjectPaths) -> Result<PathBuf> {
    let output = match &args.output {
        Some(output) => output.clone(),
        None => {
            paths.ensure_output_dirs()?;
            default_prepared_path(paths, &args.input)?
        }
    };
    dataset::prepare_dataset(&args.input, &output)?;
    Ok(output)
}

pub fn count(args: &CountArgs, paths: &ProjectPaths) -> Result<AnalysisResult> {
    let output = match &args.output {
        Some(output) => output.clone(),
        None => {
            paths.ensure_output_dirs()?;
            default_table_path(paths, &args.input)?
        }
    };
    let table = analysis::word_count(&args.input, &output, args.min_length)?;

    Ok(AnalysisResult {
        source: args.input.clone(),
        prepared_path: None,
        table_path: output,
        chart_path: None,
        table,
    })
}

pub fn plot(args: &PlotArgs, paths: &ProjectPaths) -> Result<PathBuf> {
    let output = match &args.output {
        Some(output) => output.clone(),
        None => {
            paths.ensure_output_dirs()?;
            default_chart_path(paths, &args.input)?
        }
    };
    let table = analysis::load_word_counts(&args.input)?;
    plots::plot_word_counts(&table, args.limit, &output)?;
    Ok(output)
}

/// Runs every stage with the default locations under `paths`.
pub fn run(args: &RunArgs, paths: &ProjectPaths) -> Result<AnalysisResult> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "pipeline", input = ?args.input, "Starting text analysis");

    paths.ensure_output_dirs()?;

    let (prepared_path, counted_input) = if args.no_strip {
        (None, args.input.clone())
    } else {
        let prepared = default_prepared_path(paths, &args.input)?;
        dataset::prepare_dataset(&args.input, &prepared)?;
        (Some(prepared.clone()), prepared)
    };

    let table_path = default_table_path(paths, &args.input)?;
    let table = analysis::word_count(&counted_input, &table_path, args.min_length)?;

    let chart_path = default_chart_path(paths, &args.input)?;
    plots::plot_word_counts(&table, args.limit, &chart_path)?;

    info!(
        action = "complete",
        component = "pipeline",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );

    Ok(AnalysisResult {
        source: args.input.clone(),
        prepared_path,
        table_path,
        chart_path: Some(chart_path),
        table,
    })
}

pub fn print_analysis_results(result: &AnalysisResult, top: Option<usize>) {
    println!("\n--- Word Count Analysis: {} ---", result.source.display());

    if let Some(prepared) = &result.prepared_path {
        println!("Stripped text: {}", prepared.display());
    }
    println!("Word counts: {}", result.table_path.display());
    if let Some(chart) = &result.chart_path {
        println!("Chart: {}", chart.display());
    }

    println!("Total words: {}", format_number(result.table.total()));
    println!(
        "Distinct words: {}",
        format_number(result.table.len() as u64)
    );

    if let Some(top_count) = top {
        print_top_words(&result.table, top_count);
    }
}

fn print_top_words(table: &FrequencyTable, top_count: usize) {
    let top = table.top(top_count);
    println!("\nTop {} most frequent words:", top.len());
    for row in top {
        println!("- {}: {}", row.word, format_number(row.count));
    }
}
