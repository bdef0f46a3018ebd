// src/bin/scoretree.rs
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use scoretree_core::cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    println!("{}", "SCORETREE COMPLIANCE REPORTER".bold());
    println!("{}", format!("v{}", env!("CARGO_PKG_VERSION")).dimmed());
    println!("{}", "----------------------".bold());

    scoretree_core::run::execute(&cli)?;
    Ok(())
}
