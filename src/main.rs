use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, Level};

use polysecret::interpolation::Method;
use polysecret::math::base;
use polysecret::reconstruct::{reconstruct, ReconstructOptions, SearchOutcome};
use polysecret::report::{self, CommandResult};
use polysecret::solve::{solve, SolveOptions};
use polysecret::storage::{load_record, FileStorage, Storage};

#[derive(Parser)]
#[command(name = "polysecret")]
#[command(about = "Recover the constant term of a polynomial from base-encoded shares", long_about = None)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpolate the first k points of each record and check the rest
    Solve {
        /// Record files (default: every *.json in --dir)
        files: Vec<PathBuf>,

        /// Directory scanned for records when no files are given
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Interpolation method; repeat to cross-check (default: all)
        #[arg(long)]
        method: Vec<Method>,

        /// Also fit a floating-point least-squares polynomial
        #[arg(long)]
        least_squares: bool,

        /// Print only the JSON result
        #[arg(long)]
        json: bool,
    },

    /// Search k-subsets for a polynomial that survives corrupted points
    Recover {
        /// Record files (default: every *.json in --dir)
        files: Vec<PathBuf>,

        /// Directory scanned for records when no files are given
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Interpolation method for each subset
        #[arg(long, default_value = "vandermonde")]
        method: Method,

        /// Give up after this many subsets
        #[arg(long)]
        max_subsets: Option<usize>,

        /// Require a polynomial that fits every point
        #[arg(long)]
        strict: bool,

        /// Print only the JSON result
        #[arg(long)]
        json: bool,
    },

    /// Decode one value from the given base
    Decode {
        /// Base between 2 and 36
        #[arg(long)]
        base: u32,

        /// Digits to decode
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Solve {
            files,
            dir,
            method,
            least_squares,
            json,
        } => {
            let options = SolveOptions {
                methods: if method.is_empty() {
                    Method::ALL.to_vec()
                } else {
                    method
                },
                least_squares,
            };
            let mut failed = 0;
            for (storage, key) in records(&files, &dir)? {
                let outcome = load_record(&storage, &key).and_then(|set| {
                    let report = solve(&set, &options)?;
                    let consistent = report.is_consistent();
                    Ok((report::render_solve(&key, &set, &report), consistent))
                });
                match outcome {
                    Ok((cmd_result, consistent)) => {
                        print_result(&cmd_result, json);
                        if !consistent {
                            failed += 1;
                        }
                    }
                    Err(e) => {
                        error!("{}: {:#}", key, e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{} record(s) could not be solved cleanly", failed);
            }
        }
        Commands::Recover {
            files,
            dir,
            method,
            max_subsets,
            strict,
            json,
        } => {
            let options = ReconstructOptions {
                method,
                max_subsets,
                strict,
            };
            let mut failed = 0;
            for (storage, key) in records(&files, &dir)? {
                match load_record(&storage, &key) {
                    Ok(set) => {
                        let outcome = reconstruct(&set, options.clone());
                        print_result(&report::render_recover(&key, &set, &outcome), json);
                        // A best-effort candidate that misses points is not a recovery
                        let recovered = match &outcome {
                            SearchOutcome::Found(r) => r.is_exact(),
                            SearchOutcome::Exhausted(_) => false,
                        };
                        if !recovered {
                            failed += 1;
                        }
                    }
                    Err(e) => {
                        error!("{}: {:#}", key, e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("no consistent polynomial for {} record(s)", failed);
            }
        }
        Commands::Decode { base: radix, value } => {
            let decoded = base::decode(value.trim(), radix)
                .with_context(|| format!("Failed to decode {:?}", value))?;
            print_result(&report::render_decode(&value, radix, &decoded), false);
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let collector = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(collector)
        .context("Failed to install the tracing subscriber")
}

/// Resolves the command line to (storage, key) pairs in processing order.
fn records(files: &[PathBuf], dir: &Path) -> Result<Vec<(FileStorage, String)>> {
    if files.is_empty() {
        let keys = FileStorage::new(dir)?.list()?;
        if keys.is_empty() {
            bail!("No *.json records found in {}", dir.display());
        }
        return keys
            .into_iter()
            .map(|key| -> Result<(FileStorage, String)> { Ok((FileStorage::new(dir)?, key)) })
            .collect();
    }

    files
        .iter()
        .map(|file| -> Result<(FileStorage, String)> {
            let key = file
                .file_name()
                .and_then(|name| name.to_str())
                .with_context(|| format!("{} is not a file name", file.display()))?
                .to_string();
            let parent = match file.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let storage = FileStorage::new(parent)?;
            if !storage.exists(&key) {
                bail!("Record {} does not exist", file.display());
            }
            Ok((storage, key))
        })
        .collect()
}

fn print_result(cmd_result: &CommandResult, json_only: bool) {
    if json_only {
        println!("{}", cmd_result.result);
        return;
    }
    println!("{}", cmd_result.output);
    println!("Result JSON:");
    println!("{}\n", cmd_result.result);
}
