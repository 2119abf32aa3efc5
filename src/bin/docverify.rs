//! Command-line front end: classify every file under a folder.
//!
//! # Usage
//!
//! ```sh
//! docverify /srv/archive --csv report.csv --count-docm-as-docx
//! ```
//!
//! Set `RUST_LOG=debug` to see why individual files were rejected.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use docverify::common::detection::{ClassifierConfig, CompoundFileSupport};
use docverify::report::write_csv;
use docverify::scan::{ScanOptions, scan};

/// List every file under a folder and check whether it really is a Word document
#[derive(Parser, Debug)]
#[command(
    name = "docverify",
    about = "List every file under a folder and check whether it is a real DOCX, regardless of extension",
    version
)]
struct Args {
    /// Folder to scan
    #[arg(value_name = "FOLDER")]
    folder: PathBuf,

    /// Write the results to this CSV file (UTF-8 with BOM)
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Only report files that are not DOCX
    #[arg(long)]
    not_docx_only: bool,

    /// Count macro-enabled DOCM packages as DOCX
    #[arg(long)]
    count_docm_as_docx: bool,

    /// Do not read compound files; report them as inconclusive
    #[arg(long)]
    no_ole: bool,

    /// Do not print one line per file
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            classifier: ClassifierConfig {
                count_docm_as_docx: self.count_docm_as_docx,
                compound_files: if self.no_ole {
                    CompoundFileSupport::Disabled
                } else {
                    CompoundFileSupport::Auto
                },
            },
            not_docx_only: self.not_docx_only,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    let report = match scan(&args.folder, &args.scan_options()) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        },
    };

    if !args.quiet {
        for row in &report.rows {
            println!("{row}");
        }
    }

    println!("\n=== Statistics ===");
    for (kind, count) in report.stats.iter() {
        println!("{kind:11}: {count}");
    }

    match &args.csv {
        Some(path) => {
            if let Err(err) = write_csv(path, &report.rows) {
                eprintln!("Error: cannot write {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
            println!("\nCSV written: {}", path.display());
        },
        None => println!("\n(no --csv given, results printed to the console only)"),
    }

    ExitCode::SUCCESS
}
