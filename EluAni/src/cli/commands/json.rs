//! JSON export command

use std::path::Path;

use crate::cli::progress::{DISK, print_step};
use crate::inspect::inspect_file;
use crate::options::DecodeOptions;

/// Write the summary of a file as JSON, to `output` or stdout.
pub fn execute(path: &Path, output: Option<&Path>, options: &DecodeOptions) -> anyhow::Result<()> {
    let summary = inspect_file(path, options)?;
    let json = summary.to_json()?;

    match output {
        Some(out) => {
            std::fs::write(out, json)?;
            print_step(1, 1, DISK, &format!("Written to: {}", out.display()));
        }
        None => println!("{json}"),
    }
    Ok(())
}
