use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tinyimg",
    about = "Compress images in place through the TinyPNG web endpoint",
    long_about = "tinyimg walks a file or directory, uploads every .jpg and .png file (up to 5MB) \
                  to TinyPNG, and overwrites each file with the optimized result. \
                  Files can be sent through the service several times in a row.",
    version,
    after_help = "EXAMPLES:\n  \
    tinyimg compress ./assets\n  \
    tinyimg compress ./assets 2 --deep\n  \
    tinyimg compress -p logo.png -c 3\n  \
    tinyimg list ./assets -d"
)]
pub struct Args {
    #[arg(short = 'q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Also print skipped files")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        visible_alias = "tinyimg",
        about = "Compress a file or every image in a directory",
        long_about = "Upload each admitted image, download the optimized bytes and overwrite \
                      the original file. With a count above 1 the optimized file is uploaded again."
    )]
    Compress {
        #[arg(
            value_name = "PATH",
            required_unless_present = "path_flag",
            help = "File or directory to compress"
        )]
        path: Option<PathBuf>,

        #[arg(value_name = "COUNT", help = "How many times to compress each file (default: 1)")]
        count: Option<u32>,

        #[arg(
            short = 'p',
            long = "path",
            value_name = "PATH",
            help = "File or directory to compress (overrides the positional path)"
        )]
        path_flag: Option<PathBuf>,

        #[arg(
            short = 'c',
            long = "count",
            value_name = "COUNT",
            help = "How many times to compress each file (overrides the positional count)"
        )]
        count_flag: Option<u32>,

        #[arg(short = 'd', long, help = "Descend into subdirectories")]
        deep: bool,

        #[arg(
            short = 't',
            long,
            value_name = "SECS",
            value_parser = clap::value_parser!(u64).range(1..),
            help = "Request timeout in seconds (default: 60)"
        )]
        timeout: Option<u64>,
    },

    #[command(about = "List the images that would be compressed, without uploading anything")]
    List {
        #[arg(value_name = "PATH", required_unless_present = "path_flag")]
        path: Option<PathBuf>,

        #[arg(short = 'p', long = "path", value_name = "PATH")]
        path_flag: Option<PathBuf>,

        #[arg(short = 'd', long, help = "Descend into subdirectories")]
        deep: bool,
    },
}

/// Picks the flag value when given, otherwise the positional one.
pub fn resolve<T>(flag: Option<T>, positional: Option<T>) -> Option<T> {
    flag.or(positional)
}
