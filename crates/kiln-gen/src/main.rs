use std::fs;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use kiln_gen::{Job, generate};
use kiln_model::logging::{LoggingConfig, init_logging};

#[derive(Parser, Debug)]
#[command(name = "kiln-gen")]
#[command(about = "Generate typed element accessors for kiln markup documents")]
#[command(version)]
struct Cli {
    /// Markup file, optionally followed by `,OUTPUT` (default `<file name>.g.rs`)
    #[arg(value_name = "FILE[,OUTPUT]")]
    files: Vec<String>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::default().verbosity(cli.verbosity));
    if cli.files.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let mut failed = 0usize;
    for arg in &cli.files {
        let job = Job::parse(arg);
        if let Err(e) = run(&job) {
            log::error!("{e:#}");
            failed += 1;
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed", cli.files.len());
    }
    Ok(())
}

fn run(job: &Job) -> anyhow::Result<()> {
    let text = fs::read_to_string(&job.input)
        .with_context(|| format!("reading {}", job.input.display()))?;
    let source = generate(&text).with_context(|| format!("generating from {}", job.input.display()))?;
    fs::write(&job.output, &source).with_context(|| format!("writing {}", job.output.display()))?;
    if source.is_empty() {
        log::info!("{}: no x:Class, wrote empty {}", job.input.display(), job.output.display());
    } else {
        log::info!("{} -> {}", job.input.display(), job.output.display());
    }
    Ok(())
}
