use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use colored::Colorize;
use is_terminal::IsTerminal;
use lit::areas::repository::Repository;
use lit::errors::{LitError, lit_error};
use std::process::ExitCode;

const STRICT_ENV: &str = "LIT_STRICT";

#[derive(Parser)]
#[command(
    name = "lit",
    version = "0.1.0",
    about = "A small local version-control system",
    long_about = "lit keeps snapshots of the files in the current directory, \
    with a staging area, named branches and three-way merges. \
    Everything lives in a .lit directory next to your files.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = STRICT_ENV,
        value_parser = clap::builder::BoolishValueParser::new(),
        help = "Exit with a non-zero status when a command reports an error"
    )]
    strict: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates a .lit directory in the current directory \
        with a single initial commit on the master branch."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records every staged addition and removal \
        as a new commit on the active branch."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage a tracked file for removal"
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the active branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the head commit, \
        checkout <commit id> -- <file> restores it from the given commit, \
        and checkout <branch> switches to that branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when a file follows")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the head commit")]
    Branch {
        #[arg(index = 1, help = "The name of the new branch")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The name of the branch to delete")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the active branch to it"
    )]
    Reset {
        #[arg(index = 1, help = "The (possibly abbreviated) commit id")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge a branch into the active branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        branch: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return report_usage_error(error),
    };

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(&error, cli.strict),
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    if !matches!(cli.command, Commands::Init) {
        repository.ensure_initialized()?;
    }

    match &cli.command {
        Commands::Init => repository.init().await,
        Commands::Add { file } => repository.add(file).await,
        Commands::Commit { message } => {
            repository
                .commit(message.as_deref().unwrap_or_default())
                .await
        }
        Commands::Rm { file } => repository.rm(file).await,
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status().await,
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file_from_head(file),
            (Some(commit_id), Some(file)) => repository.checkout_file_from_commit(commit_id, file),
            (Some(branch), None) => repository.checkout_branch(branch).await,
            (None, None) => Err(LitError::Usage("Incorrect operands.".to_string()).into()),
        },
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit_id } => repository.reset(commit_id).await,
        Commands::Merge { branch } => repository.merge(branch).await,
    }
}

/// Print the message of a failed command
///
/// Domain errors print their message alone; anything else prints its whole
/// context chain.
fn report(error: &anyhow::Error, strict: bool) -> ExitCode {
    match lit_error(error) {
        Some(lit_error) => println!("{}", lit_error.to_string().red()),
        None => println!("{}", format!("{:#}", error).red()),
    }

    exit_code(strict)
}

fn report_usage_error(error: clap::Error) -> ExitCode {
    let message = match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            "Please enter a command."
        }
        ErrorKind::InvalidSubcommand => "No command with that name exists.",
        _ => "Incorrect operands.",
    };

    println!("{}", message.red());
    exit_code(strict_requested())
}

// the parsed flag is unavailable when parsing failed
fn strict_requested() -> bool {
    std::env::args().any(|arg| arg == "--strict")
        || std::env::var(STRICT_ENV)
            .map(|value| !matches!(value.trim(), "" | "0" | "n" | "no" | "f" | "false" | "off"))
            .unwrap_or(false)
}

fn exit_code(strict: bool) -> ExitCode {
    if strict {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
