use time::macros::format_description;
use tracing_subscriber::{fmt::time::LocalTime, EnvFilter};

use crate::args::{Args, Command};

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn validate_args(args: &Args) -> anyhow::Result<()> {
    let (limit, top) = match &args.command {
        Command::Prepare(_) => (None, None),
        Command::Count(count) => (None, count.top),
        Command::Plot(plot) => (Some(plot.limit), None),
        Command::Run(run) => (Some(run.limit), run.top),
    };

    if limit == Some(0) {
        anyhow::bail!("--limit must be greater than 0");
    }

    if top == Some(0) {
        anyhow::bail!("--top must be greater than 0");
    }

    Ok(())
}
