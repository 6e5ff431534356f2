use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};

mod api;
mod config;
mod errors;
mod models;
mod report;

use crate::api::jira::{self, JiraClient};
use crate::config::settings::Settings;
use crate::models::issue::JiraIssue;
use crate::report::{classify, markdown, output};

#[derive(Parser)]
#[command(name = "standup")]
#[command(version = "0.1.0")]
#[command(about = "Write a standup report of your assigned Jira tasks", long_about = None)]
struct Cli {
    /// Print the JQL query and per-task details
    #[arg(short, long)]
    verbose: bool,

    /// Don't echo the report after writing it
    #[arg(long)]
    no_preview: bool,
}

/// Result of one successful run.
struct Report {
    issues: Vec<JiraIssue>,
    document: String,
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = handle_report(&cli).await {
        eprintln!("\n{}", e);
        std::process::exit(1);
    }
}

async fn handle_report(cli: &Cli) -> anyhow::Result<()> {
    run_report(
        cli,
        Settings::from_env,
        JiraClient::from_settings,
        Local::now().date_naive(),
    )
    .await
}

/// Settings are loaded and checked before a client exists, so a missing
/// credential never reaches the network.
async fn run_report(
    cli: &Cli,
    load_settings: impl FnOnce() -> errors::Result<Settings>,
    connect: impl FnOnce(&Settings) -> JiraClient,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let settings = load_settings()?;
    let jira = connect(&settings);

    println!("{}", "📋 Fetching Jira tasks...".cyan().bold());

    if cli.verbose {
        let jql = jira::assigned_issues_jql(jira::week_start(today));
        println!("{}", format!("  GET {}", jira.search_url()).dimmed());
        println!("{}", format!("  JQL: {}", jql).dimmed());
    }

    let report = generate_report(&jira, &settings.report.output_dir, today).await?;

    println!("📊 Found {} tasks", report.issues.len().to_string().bright_white());

    if cli.verbose {
        print_issue_details(&settings, &report.issues);
    }

    println!(
        "{} {}",
        "✅ Standup report generated:".green().bold(),
        report.path.display()
    );

    if settings.report.post_to_teams {
        println!(
            "{}",
            "  DO_POST_IN_TEAMS is set, but posting to Teams is not handled here".dimmed()
        );
    }

    if !cli.no_preview {
        println!("\n--- Preview ---");
        println!("{}", report.document);
    }

    Ok(())
}

/// Fetch, render and persist. Nothing is written unless the fetch succeeds.
async fn generate_report(
    jira: &JiraClient,
    output_dir: &Path,
    today: NaiveDate,
) -> errors::Result<Report> {
    let issues = jira.fetch_assigned_issues(jira::week_start(today)).await?;
    let document = markdown::render_report(&issues);
    let path = output::save_report(output_dir, today, &document)?;

    Ok(Report {
        issues,
        document,
        path,
    })
}

fn print_issue_details(settings: &Settings, issues: &[JiraIssue]) {
    println!();
    for issue in issues {
        let classification = classify::classify(issue.status_name(), issue.status_category_key());
        let (r, g, b) = classification.rgb();

        println!(
            "  {} {} [{}]  {}",
            classification.emoji,
            issue.key.bright_white().bold(),
            issue.status_name().truecolor(r, g, b),
            settings.browse_url(&issue.key).dimmed()
        );
    }
    println!();
}
