use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use repoforge::doctor::{print_doctor_results, run_doctor};
use repoforge::orchestrator::{self, RunOptions};

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(
    name = "repoforge",
    about = "One-shot repository provisioning — bootstrap, branch fan-out, PRs, storage buckets",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Repository owner (user or organization)
    #[arg(long, env = "REPOFORGE_OWNER")]
    owner: Option<String>,

    /// Repository name
    #[arg(long, env = "REPOFORGE_REPO")]
    repo: Option<String>,

    /// Storage REST endpoint, e.g. https://abc.supabase.co
    #[arg(long, env = "REPOFORGE_STORAGE_ENDPOINT")]
    storage_endpoint: Option<String>,

    /// Storage service role key (kept in memory only, never persisted)
    #[arg(long, env = "REPOFORGE_SERVICE_ROLE_KEY", hide_env_values = true)]
    storage_key: Option<String>,

    /// Answer every prompt with its default: continue degraded if gh is
    /// missing; decline opt-in stages unless their inputs were supplied
    #[arg(long, short = 'y')]
    yes: bool,

    /// Suppress progress output. Warnings are still printed.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(long, env = "REPOFORGE_LOG")]
    log: Option<String>,

    /// Working tree to provision (default: current directory)
    #[arg(long, short = 'C')]
    dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full provisioning sequence (default when no subcommand given).
    Run,
    /// Print the pre-flight tool checks and exit.
    Doctor,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = args.log.as_deref().unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    match args.command.as_ref().unwrap_or(&Command::Run) {
        Command::Doctor => {
            let (checks, avail) = run_doctor();
            print_doctor_results(&checks);
            if avail.missing_mandatory().is_some() {
                std::process::exit(1);
            }
        }
        Command::Run => {
            let work_dir = match args.dir.clone() {
                Some(d) => d,
                None => match std::env::current_dir() {
                    Ok(d) => d,
                    Err(e) => {
                        eprintln!("{RED}error:{RESET} cannot determine working directory: {e}");
                        std::process::exit(1);
                    }
                },
            };
            let opts = RunOptions {
                work_dir,
                owner: args.owner,
                repo: args.repo,
                storage_endpoint: args.storage_endpoint,
                storage_key: args.storage_key,
                assume_yes: args.yes,
                quiet: args.quiet,
            };
            if let Err(e) = orchestrator::run(opts).await {
                eprintln!("{RED}error:{RESET} {e:#}");
                std::process::exit(1);
            }
        }
    }
}
