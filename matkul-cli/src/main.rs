use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use matkul_core::{Command, Outcome, Session};

mod logging;
mod render;

#[derive(Parser)]
#[command(name = "matkul")]
#[command(about = "Course prerequisite graph driven by line commands", long_about = None)]
#[command(version)]
struct Cli {
    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Echo each command line before its output
    #[arg(long)]
    echo: bool,

    /// Render PRINT dumps as JSON
    #[arg(long)]
    json: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "MATKUL_LOG", default_value = "warn")]
    log_level: String,
}

/// Execute commands line by line until `EXIT` or end of input.
///
/// Returns the number of command lines read.
fn run(input: impl BufRead, out: &mut impl Write, options: &render::Options) -> Result<usize> {
    let mut session = Session::new();
    let mut count = 0;

    for line in input.lines() {
        let line = line.context("failed to read command line")?;
        count += 1;
        if options.echo {
            writeln!(out, "{}", line)?;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(err) => {
                debug!(line = %line, error = %err, "rejected command line");
                render::parse_error(out, &err)?;
                continue;
            }
        };

        match session.execute(command) {
            Ok(Outcome::Exit) => break,
            Ok(outcome) => render::outcome(out, &outcome, options)?,
            Err(err) => render::graph_error(out, &err)?,
        }
    }

    info!(lines = count, courses = session.graph().len(), "session finished");
    Ok(count)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let options = render::Options {
        echo: cli.echo,
        json: cli.json,
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            run(BufReader::new(file), &mut out, &options)?;
        }
        None => {
            run(io::stdin().lock(), &mut out, &options)?;
        }
    }

    out.flush()?;
    Ok(())
}
