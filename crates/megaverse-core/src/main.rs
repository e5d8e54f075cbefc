//! `megaverse` binary - fetch the goal map and replay it.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use megaverse_api::{MegaverseApi, RetryPolicy};
use megaverse_core::{parse_goal_map, Megaverse};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Command::new("megaverse")
        .version(megaverse_core::VERSION)
        .about("Recreate a megaverse goal map through the challenge service")
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .default_value("https://challenge.crossmint.io/api")
                .help("Megaverse service endpoint"),
        )
        .arg(
            Arg::new("candidate-id")
                .long("candidate-id")
                .required(true)
                .help("Candidate identity sent with every request"),
        )
        .arg(
            Arg::new("max-retries")
                .long("max-retries")
                .default_value("5")
                .value_parser(value_parser!(u32))
                .help("Attempts per request before giving up on rate limits"),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .default_value("30")
                .value_parser(value_parser!(u64))
                .help("Per-request timeout in seconds"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the creation plan without submitting anything"),
        );

    let matches = cli.get_matches();
    let base_url = matches.get_one::<String>("base-url").unwrap();
    let candidate_id = matches.get_one::<String>("candidate-id").unwrap();
    let max_retries = *matches.get_one::<u32>("max-retries").unwrap();
    let timeout_secs = *matches.get_one::<u64>("timeout-secs").unwrap();

    let policy = RetryPolicy::default().with_max_attempts(max_retries);
    let api = MegaverseApi::with_timeout(
        base_url,
        candidate_id,
        Duration::from_secs(timeout_secs),
    )
    .context("failed to build HTTP client")?
    .with_policy(policy);

    println!("Fetching goal map...");
    let goal = api
        .fetch_goal_map()
        .await
        .context("failed to fetch goal map")?;
    let commands = parse_goal_map(&goal);
    println!(
        "Goal map: {} rows, {} objects to create",
        goal.len(),
        commands.len()
    );

    if matches.get_flag("dry-run") {
        for command in &commands {
            println!("  ({}, {}) {}", command.row, command.column, command.object);
        }
        return Ok(());
    }

    Megaverse::new(api)
        .create(&commands)
        .await
        .context("failed to create megaverse")?;
    println!("Megaverse created successfully!");
    Ok(())
}
