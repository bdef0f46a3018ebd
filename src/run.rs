// src/run.rs
//! Pipeline orchestration: configure, fetch, aggregate, write.

use std::sync::Mutex;
use std::time::Duration;

use chrono::Local;
use colored::Colorize;

use crate::cli::Cli;
use crate::config::{Config, Includes};
use crate::error::{ReportError, Result};
use crate::fetch::auth::AuthSession;
use crate::fetch::Fetcher;
use crate::forest;
use crate::order::reorder_by_key;
use crate::periods;
use crate::report;
use crate::runlog::RunLog;

/// Runs the whole extraction: login, list projects, fetch every summary
/// report, assemble the rolled-up forest, and write the report and run log.
///
/// # Errors
/// Propagates configuration, authentication, HTTP, aggregation, and I/O
/// failures; nothing is collapsed into a boolean.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    config.validate()?;
    let includes = match &cli.includes {
        Some(path) => Includes::load(path)?,
        None => Includes::default(),
    };

    let mut log = RunLog::new();
    let started = Local::now();
    println!("{}", format!("Started: {started}").green().bold());
    log.push(format!("Started: {started}"));

    let (timeline, granularity) = config.timeline();
    let windows =
        periods::history_windows(granularity, timeline, cli.current, Local::now().date_naive());

    let username = cli
        .username
        .clone()
        .or_else(|| config.username.clone())
        .ok_or_else(|| ReportError::Config("no username given (flag or config file)".to_string()))?;
    let password = cli
        .password
        .clone()
        .or_else(|| config.password.clone())
        .ok_or_else(|| ReportError::Config("no password given (flag or config file)".to_string()))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let auth = AuthSession::login(
        client.clone(),
        &config.auth_url,
        &config.client_id,
        &username,
        &password,
    )?;
    println!("{}", "Login successful. Accepted access token.".green().bold());
    log.push("Login successful. Accepted access token.");

    let fetcher = Fetcher::new(
        client,
        auth,
        &config.server_url,
        cli.requests,
        cli.milliseconds,
    );
    let projects = fetcher.list_projects()?;
    if projects.is_empty() {
        println!("{}", "Error: No projects assigned to the user.".red());
        log.push("Error: No projects assigned to the user.");
    }

    if includes.is_empty() {
        println!(
            "{}",
            "No includes file present, or empty, adding everything!"
                .yellow()
                .bold()
        );
        log.push("No includes file present, or empty, adding everything!");
    } else {
        println!("{}", "Includes file present!".green().bold());
        log.push("Includes file present!");
    }

    let mut targets = Vec::new();
    for project in projects {
        if includes.allows(&project.organization_name, &project.name) {
            log.push(format!("Added: {}/{}", project.organization_name, project.name));
            if cli.verbose {
                println!(
                    "{}",
                    format!("Added: {}/{}", project.organization_name, project.name)
                        .green()
                        .bold()
                );
            }
            targets.push(project);
        } else {
            log.push(format!("Skipped: {}/{}", project.organization_name, project.name));
            if cli.verbose {
                println!(
                    "{}",
                    format!("Skipped: {}/{}", project.organization_name, project.name).dimmed()
                );
            }
        }
    }

    let log = Mutex::new(log);
    let records = fetcher.fetch_records(&targets, &windows, &log)?;
    let mut log = log.into_inner().unwrap_or_else(|e| e.into_inner());

    // Alphabetical organization order in the report comes from sorting the
    // flat records; assembly itself preserves first-seen order.
    let records = reorder_by_key(records, |r| r.org_name.clone(), false);
    let forest = forest::assemble(&records, windows.len())?;

    println!(
        "{}",
        format!("Done! Generating report file...\nCompleted: {}", Local::now())
            .green()
            .bold()
    );
    log.push(format!("Done! Generating report file... Completed: {}", Local::now()));

    let location = report::write_report(&config, &forest, &mut log)?;
    let log_location = report::write_log(&log)?;

    println!("{}", "----------------------".bold());
    println!("Find your report in: {}", location.display());
    println!("Log generated in: {}", log_location.display());
    Ok(())
}
