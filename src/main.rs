use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use pygit::Repository;
use pygit::commands::{add, branch, checkout, commit, init, log, status};
use pygit::repo::DEFAULT_AUTHOR;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pygit", about = "A minimal, local-only version-control engine")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an empty repository in the current directory.
    Init,
    /// Stage one or more files or directories.
    Add { paths: Vec<PathBuf> },
    /// Record a snapshot of the staged changes.
    Commit {
        #[arg(short = 'm', long)]
        message: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// Switch branches, restoring the working tree.
    Checkout {
        #[arg(short = 'b')]
        create: bool,
        branch: String,
    },
    /// List, create, or delete branches.
    Branch {
        name: Option<String>,
        #[arg(short = 'd', long)]
        delete: bool,
    },
    /// Show commit history on the current branch.
    Log {
        #[arg(short = 'n', long = "number", default_value_t = 10)]
        count: usize,
    },
    /// Show staged, unstaged, and untracked changes.
    Status,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    match args.command {
        Command::Init => {
            if init::run(&cwd)? {
                println!("Initialized empty repository in {}", cwd.join(".git").display());
            } else {
                println!("Repository already exists in {}", cwd.join(".git").display());
            }
        }
        Command::Add { paths } => {
            let repo = open(&cwd)?;
            add::run(&repo, &paths)?;
        }
        Command::Commit { message, author } => {
            let repo = open(&cwd)?;
            let author = author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
            match commit::run(&repo, &message, &author)? {
                commit::Outcome::Created(id) => {
                    let short = &id[..7.min(id.len())];
                    println!("[{short}] {message}");
                }
                commit::Outcome::NothingToCommit => {
                    println!("nothing to commit, working tree clean");
                }
            }
        }
        Command::Checkout { create, branch } => {
            let repo = open(&cwd)?;
            checkout::run(&repo, &branch, create)?;
            println!("Switched to branch '{branch}'");
        }
        Command::Branch { name, delete } => {
            let repo = open(&cwd)?;
            match (name, delete) {
                (None, _) => {
                    let (current, names) = branch::list(&repo)?;
                    for name in names {
                        if name == current {
                            println!("* {name}");
                        } else {
                            println!("  {name}");
                        }
                    }
                }
                (Some(name), true) => {
                    if branch::delete(&repo, &name)? {
                        println!("Deleted branch {name}");
                    } else {
                        return Err(anyhow!("branch '{name}' not found"));
                    }
                }
                (Some(name), false) => {
                    branch::create(&repo, &name)?;
                    println!("Created branch {name}");
                }
            }
        }
        Command::Log { count } => {
            let repo = open(&cwd)?;
            for entry in log::run(&repo, count)? {
                let date = chrono::DateTime::from_timestamp(entry.timestamp, 0)
                    .map(|dt| dt.format("%a %b %e %T %Y +0000").to_string())
                    .unwrap_or_else(|| entry.timestamp.to_string());
                println!("commit {}", entry.id);
                println!("Author: {}", entry.author);
                println!("Date:   {date}");
                println!();
                for line in entry.message.lines() {
                    println!("    {line}");
                }
                println!();
            }
        }
        Command::Status => {
            let repo = open(&cwd)?;
            let report = status::run(&repo)?;

            if !report.to_be_committed.is_empty() {
                println!("Changes to be committed:");
                for (path, kind) in &report.to_be_committed {
                    let label = match kind {
                        status::StagedChange::New => "new file",
                        status::StagedChange::Modified => "modified",
                    };
                    println!("  {label}:   {path}");
                }
                println!();
            }
            if !report.not_staged.is_empty() {
                println!("Changes not staged for commit:");
                for path in &report.not_staged {
                    println!("  modified:   {path}");
                }
                println!();
            }
            if !report.deleted.is_empty() {
                println!("Deleted:");
                for path in &report.deleted {
                    println!("  deleted:    {path}");
                }
                println!();
            }
            if !report.untracked.is_empty() {
                println!("Untracked files:");
                for path in &report.untracked {
                    println!("  {path}");
                }
                println!();
            }
        }
    }

    Ok(())
}

fn open(root: &std::path::Path) -> Result<Repository> {
    Repository::open(root).map_err(Into::into)
}
