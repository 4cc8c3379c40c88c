use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::debug;
use xword::dict::WordList;
use xword::fill::{Config, fill};
use xword::grid::Grid;

/// Fills a crossword grid by constraint satisfaction.
///
/// The grid uses '#' for black squares, '.' or '`' for empty squares,
/// letters for known squares, and the numerals 0 and 1 for "any
/// vowel" and "any consonant".
#[derive(Debug, Parser)]
#[command(name = "xword-fill")]
struct Opts {
    /// Grid file; standard input if omitted or "-".
    grid: Option<PathBuf>,

    /// Dictionary file, one word per line.
    #[arg(short, long, default_value = "xdict.txt")]
    dict: PathBuf,

    /// Send output to the given file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Limit output to the first N valid grids.
    #[arg(short = 'n', long, value_name = "N")]
    solutions: Option<usize>,

    /// Print only every Nth otherwise-acceptable solution.
    #[arg(long, default_value_t = 1, value_name = "N")]
    every: usize,

    /// Allow duplicate words in the output grid.
    #[arg(long)]
    allow_duplicate_words: bool,

    /// Give the matrix a slice for every cell instead of compressing
    /// known cells out.
    #[arg(long)]
    naive: bool,

    /// Dump debugging output to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    let level = if opts.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level),
    )
    .init();
    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Opts) -> Result<()> {
    if opts.every == 0 {
        bail!("option --every expects a positive integer");
    }
    if opts.solutions == Some(0) {
        bail!("option -n expects a positive integer");
    }

    let text = match &opts.grid {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).with_context(|| {
                format!("couldn't open grid file '{}'", path.display())
            })?
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let grid = Grid::parse(&text).context("couldn't parse the grid")?;

    // Echo the grid, so the user can see whether we got it right.
    println!("Grid ({}x{}):", grid.width(), grid.height());
    print!("{}", grid);

    let file = File::open(&opts.dict).with_context(|| {
        format!("error loading dictionary file '{}'", opts.dict.display())
    })?;
    let dict = WordList::from_reader(file)?;
    debug!("done loading dictionary file '{}'", opts.dict.display());

    let mut out: Box<dyn Write> = match &opts.output {
        Some(path) if path.as_os_str() != "-" => {
            Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("couldn't open file '{}' for output", path.display())
            })?))
        }
        _ => Box::new(io::stdout()),
    };

    let config = Config {
        allow_duplicate_words: opts.allow_duplicate_words,
        max_solutions: opts.solutions,
        every_nth: opts.every,
        naive_matrix: opts.naive,
    };

    println!("Solving...");
    let mut write_err = None;
    let printed = fill(&grid, &dict, &config, |solution| {
        if write_err.is_none() {
            write_err = writeln!(out, "{}", solution).err();
        }
    })?;
    if let Some(err) = write_err {
        return Err(err).context("error writing solutions");
    }
    out.flush()?;

    println!(
        "There w{} {} solution{} found.",
        if printed == 1 { "as" } else { "ere" },
        printed,
        if printed == 1 { "" } else { "s" },
    );
    Ok(())
}
