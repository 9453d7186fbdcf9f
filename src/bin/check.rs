//! stdblock-check: CLI tool for inspecting block rule files.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use stdblock::{BlockRule, BlockRuleSet};

#[derive(Parser)]
#[command(name = "stdblock-check")]
#[command(version = "0.1.0")]
#[command(about = "Inspect and match block rule files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a host or URL against a rule file
    Match {
        /// Rule file (JSON array of {"p", "s"} objects)
        #[arg(short, long)]
        rules: PathBuf,

        /// Host to match (e.g. www.example.com)
        #[arg(long, conflicts_with = "url")]
        host: Option<String>,

        /// URL to match (e.g. https://www.example.com/page)
        #[arg(long)]
        url: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate every rule in a rule file
    Validate {
        /// Rule file (JSON array of {"p", "s"} objects)
        #[arg(short, long)]
        rules: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            rules,
            host,
            url,
            verbose,
        } => {
            if let Err(e) = run_match(&rules, host.as_deref(), url.as_deref(), verbose) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { rules } => {
            if let Err(e) = run_validate(&rules) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_match(
    rules_path: &PathBuf,
    host: Option<&str>,
    url: Option<&str>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(rules_path)?;
    let ruleset = BlockRuleSet::from_json(&text)?;

    if verbose {
        println!("Loaded {} rules from {:?}", ruleset.len(), rules_path);
    }

    let query_host = match (host, url) {
        (Some(host), _) => host.to_string(),
        (None, Some(url)) => url::Url::parse(url)?
            .host_str()
            .ok_or("URL has no host component")?
            .to_string(),
        (None, None) => return Err("pass either --host or --url".into()),
    };

    if verbose {
        for pattern in ruleset.matching_patterns_for_host(&query_host) {
            println!("Matched pattern: {}", pattern);
        }
    }

    let blocked = ruleset.blocked_ids_for_host(&query_host);
    if blocked.is_empty() {
        println!("{}: no standards blocked", query_host);
    } else {
        let ids: Vec<String> = blocked.iter().map(|id| id.to_string()).collect();
        println!("{}: blocked standards [{}]", query_host, ids.join(", "));
    }

    Ok(())
}

fn run_validate(rules_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(rules_path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let items = value.as_array().ok_or("rule file must be a JSON array")?;

    let matcher = stdblock::PatternMatcher::new();
    let mut bad = 0usize;
    for (index, item) in items.iter().enumerate() {
        match BlockRule::from_data(item) {
            Ok(rule) => {
                // Surface patterns the regex engine would reject
                if let Err(e) = matcher.compile(rule.pattern()) {
                    println!("rule {}: {}", index, e);
                    bad += 1;
                }
            }
            Err(e) => {
                println!("rule {}: {}", index, e);
                bad += 1;
            }
        }
    }

    if bad > 0 {
        Err(format!("{} of {} rules are invalid", bad, items.len()).into())
    } else {
        println!("All {} rules are valid", items.len());
        Ok(())
    }
}
