use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use archive_cleanup::ArchiveCleaner;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

/// Delete the files and directories an extracted archive left behind.
#[derive(Parser, Debug)]
#[command(name = "archive_cleaner", version, about, long_about = None)]
struct Args {
    /// Archive whose top-level entries should be removed
    archive_path: PathBuf,

    /// Directory to clean instead of the current one
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Program used to decompress .tar.xz archives
    #[arg(long = "xz", value_name = "PROGRAM", default_value = "xz")]
    xz_program: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("{}", Args::command().render_usage());
            return ExitCode::from(1);
        }
    };
    init_logging(args.verbose);

    let mut cleaner = ArchiveCleaner::new(&args.archive_path).with_xz_program(&args.xz_program);
    if let Some(dir) = args.dir {
        cleaner = cleaner.with_root(dir);
    }

    let stdin = io::stdin();
    match cleaner.clean(stdin.lock(), io::stdout().lock()) {
        Ok(outcome) => {
            tracing::info!(?outcome, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
