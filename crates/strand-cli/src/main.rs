//! Strand CLI
//!
//! Connects to the providers named in the config file, then either answers a
//! single request (`--once`) or runs an interactive prompt.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use strand_core::config::{ConfigLevel, FileConfigProvider};
use strand_core::{ConsoleLogger, NoOpLogger, Orchestrator, Role, SharedLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "strand", version, about = "Route plain-language requests to stdio tool providers")]
struct Cli {
    /// Config file (defaults to ~/.config/strand/agent.yaml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Answer one request and exit
    #[arg(long, value_name = "REQUEST")]
    once: Option<String>,

    /// Print debug logs
    #[arg(short, long)]
    verbose: bool,

    /// No logs at all
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// A line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Help,
    History(usize),
    Clear,
    Request,
}

impl Command {
    fn parse(input: &str, history_limit: usize) -> Self {
        let lowered = input.trim().to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        match words.as_slice() {
            ["quit" | "exit" | "bye"] => Command::Quit,
            ["help" | "capabilities"] => Command::Help,
            ["clear"] => Command::Clear,
            ["history"] => Command::History(history_limit),
            ["history", n] => match n.parse() {
                Ok(n) => Command::History(n),
                Err(_) => Command::Request,
            },
            _ => Command::Request,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger: SharedLogger = if cli.quiet {
        Arc::new(NoOpLogger::new())
    } else {
        Arc::new(ConsoleLogger::new().verbose(cli.verbose))
    };

    let config = match &cli.config {
        Some(path) => FileConfigProvider::new(path, ConfigLevel::User),
        None => FileConfigProvider::user(),
    };
    if !config.exists() {
        bail!("No configuration found at {}", config.path().display());
    }
    // Fail on a malformed file rather than starting with no providers
    config.config()?;
    if cli.verbose {
        eprintln!(
            "Wire trace (STRAND_DEBUG=1): {}",
            strand_core::logging::log_file_path().display()
        );
    }

    let mut agent = Orchestrator::connect(&config, logger).await;
    if agent.registry().is_empty() {
        bail!(
            "No tools could be discovered. Check the providers in {}",
            config.path().display()
        );
    }

    if let Some(request) = cli.once {
        println!("{}", agent.process_request(&request).await);
        return Ok(());
    }

    run_interactive(&mut agent).await
}

async fn run_interactive(agent: &mut Orchestrator) -> Result<()> {
    print_welcome(agent);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!("\nGoodbye!");
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match Command::parse(input, agent.settings().history_limit) {
            Command::Quit => {
                println!("Goodbye!");
                break;
            }
            Command::Help => println!("\n{}", agent.capabilities()),
            Command::History(n) => print_history(agent, n),
            Command::Clear => {
                agent.clear_history();
                println!("Conversation history cleared.");
            }
            Command::Request => {
                let response = agent.process_request(input).await;
                println!("\nAgent: {}", response);
            }
        }
    }

    Ok(())
}

fn print_welcome(agent: &Orchestrator) {
    println!();
    println!("Strand Agent");
    println!("{}", "=".repeat(40));
    println!("Connected providers: {}", agent.provider_ids().join(", "));
    println!();
    println!("{}", agent.capabilities());
    println!("Commands:");
    println!("  help, capabilities  - Show available tools");
    println!("  history [N]         - Show the last N exchanges");
    println!("  clear               - Forget the conversation");
    println!("  quit, exit, bye     - Leave");
}

fn print_history(agent: &Orchestrator, n: usize) {
    let entries = agent.history().recent(n);
    if entries.is_empty() {
        println!("No conversation history yet.");
        return;
    }

    println!("\nRecent conversation:");
    for entry in entries {
        let who = match entry.role {
            Role::User => "You",
            Role::Agent => "Agent",
        };
        let first_line = entry.payload.lines().next().unwrap_or_default();
        let more = if entry.payload.lines().nth(1).is_some() { " ..." } else { "" };
        println!(
            "  [{}] {}: {}{}",
            entry.timestamp.format("%H:%M:%S"),
            who,
            first_line,
            more
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("quit", 10), Command::Quit);
        assert_eq!(Command::parse("  BYE ", 10), Command::Quit);
        assert_eq!(Command::parse("capabilities", 10), Command::Help);
        assert_eq!(Command::parse("clear", 10), Command::Clear);
        assert_eq!(Command::parse("history", 10), Command::History(10));
        assert_eq!(Command::parse("history 3", 10), Command::History(3));
    }

    #[test]
    fn test_everything_else_is_a_request() {
        assert_eq!(Command::parse("history of York", 10), Command::Request);
        assert_eq!(Command::parse("history lessons please", 10), Command::Request);
        assert_eq!(Command::parse("help me find a hotel", 10), Command::Request);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["strand", "--config", "agent.yaml", "--once", "Hello, my name is Alice"]);
        assert_eq!(cli.config, Some(PathBuf::from("agent.yaml")));
        assert_eq!(cli.once.as_deref(), Some("Hello, my name is Alice"));
        assert!(Cli::try_parse_from(["strand", "-v", "-q"]).is_err());
    }
}
