use clap::Parser;
use crib_core::search;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
mod report;

use config::Config;
use error::CliResult;

/// Recover XOR key and rotation of obfuscated RLE / LZ78 files using a known crib.
#[derive(Parser)]
#[clap(version)]
struct Args {
    /// Number of cases to process. Asked for interactively when omitted.
    #[clap(short = 'n', long)]
    cases: Option<u32>,

    /// Configuration file, created with defaults if missing
    #[clap(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory holding the case files, overriding the configuration
    #[clap(short, long)]
    dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(Some(env_logger::TimestampPrecision::Seconds))
        .init();

    let args = Args::parse();

    let mut config = Config::get(&args.config).unwrap_or_else(|err| {
        eprintln!("Could not get configuration: {err}");
        std::process::exit(1);
    });
    if let Some(dir) = args.dir {
        config.input.directory = dir;
    }

    if let Err(err) = run(&config, args.cases) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &Config, cases: Option<u32>) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let cases = match cases {
        Some(cases) if cases > 0 => Some(cases),
        Some(_) => None,
        None => report::prompt_case_count(&mut io::stdin().lock(), &mut out)?,
    };

    let Some(cases) = cases else {
        writeln!(out, "Invalid input.")?;
        return Ok(());
    };

    for case in 1..=cases {
        run_case(&mut out, config, case)?;
    }

    out.flush()?;
    Ok(())
}

/// Process one numbered case. Unreadable files and failed searches are
/// reported on `out` and do not stop the remaining cases.
fn run_case<W: Write>(out: &mut W, config: &Config, case: u32) -> CliResult<()> {
    let encrypted_path = config.input.encrypted_path(case);
    let obfuscated = match read_input(&encrypted_path) {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => {
            writeln!(out, "[Case {case}] could not read {}", encrypted_path.display())?;
            return Ok(());
        }
    };

    let crib_path = config.input.crib_path(case);
    let Some(crib) = read_input(&crib_path) else {
        writeln!(out, "[Case {case}] could not read {}", crib_path.display())?;
        return Ok(());
    };

    log::info!(
        "Case {case}: searching {} obfuscated bytes for a {} byte crib",
        obfuscated.len(),
        crib.len()
    );

    match search(&obfuscated, &crib) {
        Some(recovery) => {
            report::write_recovery(out, case, &recovery, config.output.line_width)?;
        }
        None => {
            writeln!(out, "[Case {case}] no valid parameters found.")?;
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Option<Vec<u8>> {
    std::fs::read(path)
        .map_err(|why| log::debug!("Reading {} failed: {why}", path.display()))
        .ok()
}
