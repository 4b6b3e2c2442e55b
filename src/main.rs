use anyhow::Result;
use clap::Parser;
use tracing::error;

use gutentally::args::Command;
use gutentally::utils::{setup_logging, validate_args};
use gutentally::{config, pipeline, Args};

fn execute(args: &Args) -> Result<()> {
    let paths = config::init(args.root.as_deref())?;

    match &args.command {
        Command::Prepare(prepare) => {
            let output = pipeline::prepare(prepare, paths)?;
            println!("Stripped text saved to {}", output.display());
        }
        Command::Count(count) => {
            let result = pipeline::count(count, paths)?;
            pipeline::print_analysis_results(&result, count.top);
        }
        Command::Plot(plot) => {
            let output = pipeline::plot(plot, paths)?;
            println!("Chart saved to {}", output.display());
        }
        Command::Run(run) => {
            let result = pipeline::run(run, paths)?;
            pipeline::print_analysis_results(&result, run.top);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    validate_args(&args)?;

    match execute(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            let message = format!("{e:#}");
            error!(action = "abort", component = "main", error = %message, "Command failed");
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
    }
}
