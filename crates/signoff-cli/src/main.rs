use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use signoff_api::GhApi;
use signoff_vcs::GitCli;

mod commands;
mod completion;
mod output;

#[derive(Parser)]
#[command(name = "signoff", version)]
#[command(about = "Sign off on commits and require sign-off checks before merging")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    // Bare `signoff [contexts..]` is `signoff create [contexts..]`.
    #[command(flatten)]
    create: CreateArgs,
}

#[derive(Args)]
struct CreateArgs {
    /// Bypass the clean working tree requirement
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Context labels to sign off (defaults to the bare signoff context)
    contexts: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Post a success sign-off status for the current commit
    Create(CreateArgs),

    /// Require sign-off contexts on a branch via branch protection
    Install {
        /// Branch to protect (defaults to the repository default branch)
        #[arg(long)]
        branch: Option<String>,
        /// Context labels to require
        contexts: Vec<String>,
    },

    /// Remove branch protection from a branch
    Uninstall {
        /// Branch to unprotect (defaults to the repository default branch)
        #[arg(long)]
        branch: Option<String>,
        /// Accepted for symmetry with install; removal is wholesale
        contexts: Vec<String>,
    },

    /// Show whether sign-off contexts are required on a branch
    Check {
        /// Branch to inspect (defaults to the repository default branch)
        #[arg(long)]
        branch: Option<String>,
        /// Context labels to look up
        contexts: Vec<String>,
    },

    /// Report required and observed sign-off checks for the current commit
    Status {
        /// Branch whose protection applies (defaults to the repository default branch)
        #[arg(long)]
        branch: Option<String>,
    },

    /// Print the version
    Version,

    /// Print bash completion text
    Completion {
        /// Comma-separated context labels to offer as completions
        #[arg(long, value_delimiter = ',')]
        contexts: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("signoff: {err:#}");
        std::process::exit(1);
    }
}

/// Both external tools are required before any remote verb does work.
fn collaborators() -> Result<(GitCli, GhApi)> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let git = GitCli::probe(cwd)?;
    let api = GhApi::probe()?;
    Ok((git, api))
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        None => run_create(cli.create),
        Some(Command::Create(args)) => run_create(args),
        Some(Command::Install { branch, contexts }) => {
            let (_git, api) = collaborators()?;
            let (branch, installed) = commands::install(&api, branch.as_deref(), &contexts)?;
            let labels: Vec<&str> = installed.iter().map(|ctx| ctx.display_name()).collect();
            println!(
                "{} {} now required on {}",
                output::CHECK,
                labels.join(", "),
                branch
            );
            Ok(())
        }
        Some(Command::Uninstall { branch, .. }) => {
            let (_git, api) = collaborators()?;
            let branch = commands::uninstall(&api, branch.as_deref())?;
            println!("{} protection removed from {}", output::CHECK, branch);
            eprintln!(
                "note: this removed all branch protection on {branch}, not just sign-off checks"
            );
            Ok(())
        }
        Some(Command::Check { branch, contexts }) => {
            let (_git, api) = collaborators()?;
            for (ctx, required) in commands::check(&api, branch.as_deref(), &contexts)? {
                let glyph = if required {
                    output::CHECK
                } else {
                    output::CROSS
                };
                println!("{} {}", glyph, ctx.display_name());
            }
            Ok(())
        }
        Some(Command::Status { branch }) => {
            let (git, api) = collaborators()?;
            let report = commands::status(&git, &api, branch.as_deref())?;
            output::print_report(&report);
            Ok(())
        }
        Some(Command::Version) => {
            println!("signoff {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Completion { contexts }) => {
            print!("{}", completion::bash(&contexts));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_is_the_create_verb() {
        let cli = Cli::try_parse_from(["signoff", "tests", "lint"]).unwrap();
        assert!(cli.cmd.is_none());
        assert_eq!(cli.create.contexts, vec!["tests", "lint"]);
        assert!(!cli.create.force);
    }

    #[test]
    fn force_flag_works_without_a_verb() {
        let cli = Cli::try_parse_from(["signoff", "-f", "linux"]).unwrap();
        assert!(cli.cmd.is_none());
        assert!(cli.create.force);
        assert_eq!(cli.create.contexts, vec!["linux"]);
    }

    #[test]
    fn explicit_create_verb_parses_the_same_way() {
        let cli = Cli::try_parse_from(["signoff", "create", "tests"]).unwrap();
        match cli.cmd {
            Some(Command::Create(args)) => assert_eq!(args.contexts, vec!["tests"]),
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn unknown_flags_are_a_hard_error() {
        assert!(Cli::try_parse_from(["signoff", "--frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["signoff", "status", "--frobnicate"]).is_err());
    }

    #[test]
    fn status_takes_a_branch_flag_only() {
        let cli = Cli::try_parse_from(["signoff", "status", "--branch", "main"]).unwrap();
        match cli.cmd {
            Some(Command::Status { branch }) => assert_eq!(branch.as_deref(), Some("main")),
            _ => panic!("expected status"),
        }
        assert!(Cli::try_parse_from(["signoff", "status", "tests"]).is_err());
    }
}

fn run_create(args: CreateArgs) -> Result<()> {
    let (git, api) = collaborators()?;
    let report = commands::create(&git, &api, &args.contexts, args.force)?;
    for (ctx, result) in &report.entries {
        match result {
            Ok(()) => println!("{} {}", output::CHECK, ctx.display_name()),
            Err(err) => eprintln!("{} {}: {}", output::CROSS, ctx.display_name(), err),
        }
    }
    if !report.all_ok() {
        std::process::exit(1);
    }
    Ok(())
}
