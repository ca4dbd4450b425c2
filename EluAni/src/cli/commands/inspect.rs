//! Inspect command
//!
//! Decodes every file in parallel, then prints the summaries in argument
//! order.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::progress::{LOOKING_GLASS, WARNING, file_bar, print_done, print_step};
use crate::inspect::{AniSummary, EluSummary, FileSummary, inspect_file};
use crate::options::DecodeOptions;

/// Decode files and display their structure.
pub fn execute(files: &[PathBuf], options: &DecodeOptions, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    if !quiet {
        print_step(1, 2, LOOKING_GLASS, &format!("Decoding {} file(s)...", files.len()));
    }

    let pb = file_bar(files.len() as u64, "Decoding", quiet);
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let result = inspect_file(path, options);
            pb.inc(1);
            (path, result)
        })
        .collect();
    pb.finish_and_clear();

    if !quiet {
        print_step(2, 2, LOOKING_GLASS, "Summaries");
    }

    let mut failures = 0usize;
    for (path, result) in results {
        println!();
        match result {
            Ok(summary) => print_summary(path, &summary),
            Err(e) => {
                failures += 1;
                println!("{}: failed to decode: {}", path.display(), e);
            }
        }
    }

    if !quiet {
        println!();
        print_done(start.elapsed());
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} file(s) failed to decode", files.len());
    }
    Ok(())
}

fn print_summary(path: &Path, summary: &FileSummary) {
    match summary {
        FileSummary::Elu(elu) => print_elu(path, elu),
        FileSummary::Ani(ani) => print_ani(path, ani),
    }
    if !summary.diagnostics().is_empty() {
        println!();
        println!("Diagnostics ({}):", summary.diagnostics().len());
        for diagnostic in summary.diagnostics() {
            println!("  {WARNING}{diagnostic}");
        }
    }
}

fn print_elu(path: &Path, summary: &EluSummary) {
    println!("ELU File: {}", path.display());
    println!("====================");
    println!("Version:     {}", summary.version);
    println!("File size:   {} bytes", summary.file_size);
    println!("Materials:   {}", summary.material_count);
    println!("Nodes:       {}", summary.nodes.len());
    println!("Points:      {}", summary.total_points());
    println!();
    println!("Nodes:");
    println!("------");
    for node in &summary.nodes {
        let mut tags = Vec::new();
        if node.dummy {
            tags.push("dummy");
        }
        if node.skinned {
            tags.push("skinned");
        }
        println!(
            "  - {} <- {} ({} points, {} polygons, {} bones){}",
            node.name,
            node.parent.as_deref().unwrap_or("(root)"),
            node.points,
            node.polygons,
            node.bones,
            if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            }
        );
    }
}

fn print_ani(path: &Path, summary: &AniSummary) {
    println!("ANI File: {}", path.display());
    println!("====================");
    println!("Version:     {}", summary.version);
    println!("Kind:        {}", summary.kind);
    println!("File size:   {} bytes", summary.file_size);
    println!("Max frame:   {}", summary.max_frame);
    println!("Root bone:   {}", summary.root.as_deref().unwrap_or("None"));
    println!();
    println!("Nodes ({}):", summary.nodes.len());
    println!("----------");
    for node in &summary.nodes {
        if node.vertex_frames > 0 {
            println!("  - {} ({} vertex frames)", node.name, node.vertex_frames);
        } else {
            println!(
                "  - {} (pos {}, rot {}, scale {}, vis {}){}",
                node.name,
                node.position_keys,
                node.rotation_keys,
                node.scale_keys,
                node.visibility_keys,
                if node.incomplete { " [incomplete]" } else { "" }
            );
        }
    }
}
