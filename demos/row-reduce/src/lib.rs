//! Interactive parallel vs. sequential reduction demo.
//!
//! Reads the thread count and matrix dimensions from the command line, the
//! environment, or interactive prompts, generates a random matrix, and
//! reports the total sum and the minimum-sum row as computed by a worker
//! pool and by a linear scan, with timings for each.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::Parser;
use derive_builder::Builder;
use matrix_reduce::{Matrix, Report};

/// Parallel vs. sequential matrix reductions
#[derive(Parser, Debug, Default)]
#[command(name = "row-reduce", version, about)]
pub struct Cli {
    /// Number of worker threads (prompted for when omitted)
    #[arg(short, long, env = "ROW_REDUCE_THREADS")]
    pub threads: Option<usize>,

    /// Number of matrix rows (prompted for when omitted)
    #[arg(short, long, env = "ROW_REDUCE_ROWS")]
    pub rows: Option<usize>,

    /// Number of matrix columns (prompted for when omitted)
    #[arg(short, long, env = "ROW_REDUCE_COLS")]
    pub cols: Option<usize>,

    /// Do not print the generated matrix
    #[arg(long)]
    pub hide_matrix: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_pause: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Builder)]
pub struct Config {
    pub threads: usize,
    pub rows: usize,
    pub cols: usize,
    #[builder(default = "true")]
    pub show_matrix: bool,
    #[builder(default)]
    pub json: bool,
    /// Wait for Enter before exiting.
    #[builder(default)]
    pub pause: bool,
}

/// Write `message`, then read and parse one line from `input`.
pub fn prompt<T, R, W>(input: &mut R, output: &mut W, message: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("unexpected end of input");
    }
    let line = line.trim();
    line.parse()
        .with_context(|| format!("invalid number: {:?}", line))
}

/// Fill in everything the command line left out by prompting on `input`.
///
/// In JSON mode prompts go to stderr and there is no final pause, so
/// `output` carries nothing but the report.
pub fn resolve_config<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Config> {
    let mut prompted = false;
    let mut ask = |given: Option<usize>, message: &str| -> anyhow::Result<usize> {
        match given {
            Some(v) => Ok(v),
            None if cli.json => {
                prompted = true;
                prompt(input, &mut io::stderr(), message)
            }
            None => {
                prompted = true;
                prompt(input, output, message)
            }
        }
    };

    let threads = ask(cli.threads, "Enter the number of threads: ")?;
    let rows = ask(cli.rows, "Enter the number of rows: ")?;
    let cols = ask(cli.cols, "Enter the number of columns: ")?;

    if threads == 0 {
        log::warn!("thread count 0 is not valid, using 1");
    }

    ConfigBuilder::default()
        .threads(threads.max(1))
        .rows(rows)
        .cols(cols)
        .show_matrix(!cli.hide_matrix && !cli.json)
        .json(cli.json)
        .pause(prompted && !cli.no_pause && !cli.json)
        .build()
        .context("incomplete configuration")
}

/// Generate the matrix, run both reductions, and write the report.
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Report> {
    log::debug!(
        "[row-reduce] {}x{} matrix, {} threads",
        config.rows,
        config.cols,
        config.threads
    );

    let matrix = Matrix::random(config.rows, config.cols).context("generating matrix")?;
    run_on(&matrix, config, input, output)
}

/// Same as [`run`] for an already generated matrix.
pub fn run_on<R: BufRead, W: Write>(
    matrix: &Matrix,
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Report> {
    if config.show_matrix {
        writeln!(output, "\nGenerated matrix:")?;
        write!(output, "{}", matrix)?;
    }

    let report = Report::measure(matrix, config.threads).context("running reductions")?;

    if config.json {
        serde_json::to_writer_pretty(&mut *output, &report)?;
        writeln!(output)?;
    } else {
        writeln!(output)?;
        write!(output, "{}", report)?;
    }

    if config.pause {
        write!(output, "\nPress Enter to exit...")?;
        output.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
    }
    output.flush()?;

    Ok(report)
}
