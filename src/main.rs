use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::PagerWriter;
use twig::artifacts::core::error::TwigError;

/// Log filter directive, e.g. `TWIG_LOG=twig=debug`
const LOG_ENV: &str = "TWIG_LOG";

const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "twig keeps content-addressed snapshots of a working tree, \
    organises them into branches and merges divergent branches with a three-way merge. \
    Everything stays local: there are no remotes.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal",
        long_about = "Unstages a file staged for addition. If the current commit tracks the file, \
        its removal is staged and the file is deleted from the working tree."
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "`checkout <branch>` switches to a branch. \
        `checkout -- <file>` restores a file from the current commit and \
        `checkout <commit> -- <file>` restores it from any commit."
    )]
    Checkout {
        #[arg(help = "Branch to switch to, or commit to restore from")]
        target: Option<String>,
        #[arg(last = true, help = "File to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create or delete branches")]
    Branch {
        #[command(subcommand)]
        action: BranchAction,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to a commit",
        long_about = "Checks out every file of the given commit, removes tracked files it lacks, \
        and points the current branch at it. The commit may be abbreviated."
    )]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge another branch into the current one")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "log", about = "Show the history of the current commit")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the IDs of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes an object file and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
}

#[derive(Subcommand)]
enum BranchAction {
    #[command(name = "create", about = "Create a branch at the current commit")]
    Create {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "delete", about = "Delete a branch")]
    Delete {
        #[arg(index = 1)]
        name: String,
    },
}

fn main() -> ExitCode {
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(error: anyhow::Error) -> ExitCode {
    match error.downcast_ref::<TwigError>() {
        Some(twig_error) if twig_error.is_user_error() => {
            eprintln!("{}", twig_error);
            ExitCode::from(1)
        }
        _ => {
            eprintln!("fatal: {:#}", error);
            ExitCode::from(128)
        }
    }
}

fn open_repository(writer: Box<dyn Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::open(&pwd.to_string_lossy(), writer)
}

fn stdout() -> Box<dyn Write> {
    Box::new(std::io::stdout())
}

/// Run a history command through the pager when stdout is a terminal
fn paged(command: impl FnOnce(&Repository) -> Result<()>) -> Result<()> {
    if !std::io::stdout().is_terminal() || std::env::var_os(NO_PAGER_ENV).is_some() {
        return command(&open_repository(stdout())?);
    }

    let pager = Pager::new();
    let repository = open_repository(Box::new(PagerWriter::new(pager.clone())))?;
    command(&repository)?;
    minus::page_all(pager)?;

    Ok(())
}

fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, stdout())?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), stdout())?
                }
            };

            repository.init()
        }
        Commands::Add { file } => open_repository(stdout())?.add(file),
        Commands::Rm { file } => open_repository(stdout())?.rm(file),
        Commands::Commit { message } => open_repository(stdout())?.commit(message).map(|_| ()),
        Commands::Checkout { target, file } => {
            let mut repository = open_repository(stdout())?;

            match (target, file) {
                (target, Some(file)) => repository.checkout_file(target.as_deref(), file),
                (Some(branch), None) => repository.checkout_branch(branch),
                (None, None) => Err(TwigError::IncorrectOperands.into()),
            }
        }
        Commands::Branch { action } => {
            let mut repository = open_repository(stdout())?;

            match action {
                BranchAction::Create { name } => repository.create_branch(name),
                BranchAction::Delete { name } => repository.delete_branch(name),
            }
        }
        Commands::Reset { commit } => open_repository(stdout())?.reset(commit),
        Commands::Merge { branch } => open_repository(stdout())?.merge(branch).map(|_| ()),
        Commands::Log => paged(|repository| repository.log()),
        Commands::GlobalLog => paged(|repository| repository.global_log()),
        Commands::Find { message } => open_repository(stdout())?.find(message).map(|_| ()),
        Commands::Status => open_repository(stdout())?.status().map(|_| ()),
        Commands::CatFile { sha } => open_repository(stdout())?.cat_file(sha),
        Commands::HashObject { write, file } => open_repository(stdout())?
            .hash_object(file, *write)
            .map(|_| ()),
    }
}
