//! Man page generator for avrplan
//!
//! Writes `avrplan.1` plus one `avrplan-<command>.1` page per subcommand.
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::CommandFactory;
use std::fs;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
#[path = "../cli.rs"]
mod cli;

fn render(cmd: clap::Command, output_dir: &Path, file_name: &str) -> std::io::Result<PathBuf> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buffer)?;
    let path = output_dir.join(file_name);
    fs::write(&path, buffer)?;
    Ok(path)
}

fn main() -> std::io::Result<()> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));
    fs::create_dir_all(&output_dir)?;

    let cmd = cli::Cli::command();
    let mut pages = vec![render(cmd.clone(), &output_dir, "avrplan.1")?];

    for sub in cmd.get_subcommands() {
        let name = format!("avrplan-{}", sub.get_name());
        let sub = sub.clone().display_name(name.clone());
        pages.push(render(sub, &output_dir, &format!("{}.1", name))?);
    }

    for page in &pages {
        println!("Generated {}", page.display());
    }
    println!("\nTo view the main page:");
    println!("  man -l {}", output_dir.join("avrplan.1").display());

    Ok(())
}
