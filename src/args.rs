use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis::DEFAULT_MIN_LENGTH;
use crate::plots::DEFAULT_LIMIT;

#[derive(Parser, Debug)]
#[command(
    name = "gutentally",
    about = "Strip Project Gutenberg boilerplate, count words and chart the most frequent ones",
    version,
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root holding data/, analyzed/ and results/ (defaults to $GUTENTALLY_ROOT or the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Strip the Gutenberg header and footer from a raw text
    Prepare(PrepareArgs),
    /// Count words in a text and save them as CSV
    Count(CountArgs),
    /// Chart the most frequent words from a saved CSV
    Plot(PlotArgs),
    /// Prepare, count and plot in one go using the default locations
    Run(RunArgs),
}

#[derive(ClapArgs, Debug)]
pub struct PrepareArgs {
    /// Raw text file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination for the stripped text (defaults to data/processed/<file name>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct CountArgs {
    /// Text file to count
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination CSV (defaults to analyzed/<file stem>.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum word length in characters
    #[arg(short, long, default_value_t = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,

    /// Number of top words to print
    #[arg(short, long)]
    pub top: Option<usize>,
}

#[derive(ClapArgs, Debug)]
pub struct PlotArgs {
    /// Word count CSV with a word,count header
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination SVG (defaults to results/<file stem>.svg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of bars to draw
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

#[derive(ClapArgs, Debug)]
pub struct RunArgs {
    /// Raw text file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Minimum word length in characters
    #[arg(short, long, default_value_t = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,

    /// Number of bars to draw
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Number of top words to print
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Count the raw text as-is instead of stripping the Gutenberg wrapper first
    #[arg(long)]
    pub no_strip: bool,
}
