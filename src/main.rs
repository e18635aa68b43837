mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{resolve, Args, Commands};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tinyimg::logger::{init_logging, TracingSink};
use tinyimg::{collect_candidates, compress_path_sync, Config};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.quiet, args.verbose);

    let result = match args.command {
        Commands::Compress {
            path,
            count,
            path_flag,
            count_flag,
            deep,
            timeout,
        } => run_compress(
            resolve(path_flag, path),
            resolve(count_flag, count),
            deep,
            timeout,
        ),
        Commands::List {
            path,
            path_flag,
            deep,
        } => run_list(resolve(path_flag, path), deep),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_compress(
    path: Option<PathBuf>,
    count: Option<u32>,
    deep: bool,
    timeout: Option<u64>,
) -> anyhow::Result<()> {
    let path = path.context("no path given")?;
    let mut config = Config::new(path, count, deep)?;
    if let Some(secs) = timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    compress_path_sync(config, TracingSink)?;
    Ok(())
}

fn run_list(path: Option<PathBuf>, deep: bool) -> anyhow::Result<()> {
    let path = path.context("no path given")?;
    let config = Config::new(path, None, deep)?;
    let (admitted, errors) = collect_candidates(&config)?;

    for error in &errors {
        tracing::error!("{}", error);
    }
    for candidate in &admitted {
        println!(
            "{}\t{}",
            tinyimg::format_kilobytes(candidate.size),
            candidate.path.display()
        );
    }
    println!("{} image(s) would be compressed", admitted.len());

    Ok(())
}
