use clap::Subcommand;
use std::path::PathBuf;

use crate::options::DecodeOptions;

pub mod inspect;
pub mod json;

#[derive(Subcommand)]
pub enum Commands {
    /// Decode ELU/ANI files and print a summary of each
    Inspect {
        /// Files to decode (.elu or .ani)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Fail on structural problems and signature mismatches
        #[arg(long)]
        strict: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the summary of a file as JSON
    Json {
        /// File to decode (.elu or .ani)
        path: PathBuf,

        /// Output JSON file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on structural problems and signature mismatches
        #[arg(long)]
        strict: bool,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect {
                files,
                strict,
                quiet,
            } => inspect::execute(files, &decode_options(*strict), *quiet),
            Commands::Json {
                path,
                output,
                strict,
            } => json::execute(path, output.as_deref(), &decode_options(*strict)),
        }
    }
}

fn decode_options(strict: bool) -> DecodeOptions {
    if strict {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    }
}
