use anyhow::{bail, Result};
use colored::Colorize;
use twig_core::{BranchOps, Commit, Repository, RepositoryOps};

use crate::display;

/// One line of the twig command language, as typed in the shell or read from
/// a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Branch {
        name: String,
        base: Option<String>,
        at: Option<usize>,
    },
    Commit {
        branch: String,
        name: String,
        description: String,
        files: Vec<String>,
    },
    Clone {
        source: String,
        new_name: String,
        at: Option<usize>,
    },
    Remove {
        name: String,
    },
    Join {
        source: String,
        destination: String,
    },
    Undo {
        branch: Option<String>,
    },
    Redo {
        branch: Option<String>,
    },
    Log {
        branch: Option<String>,
    },
    Branches,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Splits a line into words, honoring double quotes so descriptions can
/// contain spaces.
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut seen_any = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                seen_any = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if seen_any {
                    words.push(std::mem::take(&mut current));
                    seen_any = false;
                }
            }
            c => {
                current.push(c);
                seen_any = true;
            }
        }
    }
    if in_quotes {
        bail!("unterminated quote");
    }
    if seen_any {
        words.push(current);
    }

    Ok(words)
}

/// Parses a line into a [`Command`]. Blank lines and `#` comments yield
/// `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let words = split_words(trimmed)?;
    let (keyword, args) = words.split_first().expect("non-blank line has a word");

    let command = match keyword.as_str() {
        "branch" => match args {
            [name] => Command::Branch {
                name: name.clone(),
                base: None,
                at: None,
            },
            [name, base] => Command::Branch {
                name: name.clone(),
                base: Some(base.clone()),
                at: None,
            },
            [name, base, index] => Command::Branch {
                name: name.clone(),
                base: Some(base.clone()),
                at: Some(parse_index(index)?),
            },
            _ => bail!("usage: branch NAME [FROM [N]]"),
        },
        "commit" => match args {
            [branch, name, description, files @ ..] => Command::Commit {
                branch: branch.clone(),
                name: name.clone(),
                description: description.clone(),
                files: files.to_vec(),
            },
            _ => bail!("usage: commit BRANCH NAME DESC [FILES...]"),
        },
        "clone" => match args {
            [source, new_name] => Command::Clone {
                source: source.clone(),
                new_name: new_name.clone(),
                at: None,
            },
            [source, new_name, index] => Command::Clone {
                source: source.clone(),
                new_name: new_name.clone(),
                at: Some(parse_index(index)?),
            },
            _ => bail!("usage: clone SRC NEW [N]"),
        },
        "remove" => match args {
            [name] => Command::Remove { name: name.clone() },
            _ => bail!("usage: remove NAME"),
        },
        "join" => match args {
            [source, destination] => Command::Join {
                source: source.clone(),
                destination: destination.clone(),
            },
            _ => bail!("usage: join SRC DEST"),
        },
        "undo" => Command::Undo {
            branch: optional_name(args, "undo [BRANCH]")?,
        },
        "redo" => Command::Redo {
            branch: optional_name(args, "redo [BRANCH]")?,
        },
        "log" => Command::Log {
            branch: optional_name(args, "log [BRANCH]")?,
        },
        "branches" => Command::Branches,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };

    Ok(Some(command))
}

fn optional_name(args: &[String], usage: &str) -> Result<Option<String>> {
    match args {
        [] => Ok(None),
        [name] => Ok(Some(name.clone())),
        _ => bail!("usage: {usage}"),
    }
}

fn parse_index(word: &str) -> Result<usize> {
    let index: usize = word
        .parse()
        .map_err(|_| anyhow::anyhow!("'{word}' is not a commit number"))?;
    if index == 0 {
        bail!("commit numbers start at 1");
    }
    Ok(index)
}

/// Resolves a 1-based commit number on `branch` to the commit value itself.
fn commit_at(repo: &Repository, branch: &str, index: usize) -> Result<Commit> {
    let branch = repo
        .branch(branch)
        .ok_or_else(|| anyhow::anyhow!("no branch named '{branch}'"))?;
    branch
        .commits()
        .get(index - 1)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("branch '{}' has no commit {index}", branch.name()))
}

/// Applies one command to the repository, printing any human-facing output.
pub fn execute(repo: &mut Repository, command: Command) -> Result<Outcome> {
    match command {
        Command::Branch { name, base, at } => {
            let last_commit = match (&base, at) {
                (Some(base), Some(index)) => Some(commit_at(repo, base, index)?),
                _ => None,
            };
            repo.create_branch(&name, base.as_deref(), last_commit.as_ref())?;
            match repo.branch(&name) {
                Some(branch) => println!(
                    "Created branch {} with {} commit(s)",
                    branch.name().green(),
                    branch.commits().len()
                ),
                None => println!("{}", "Nothing created (unknown base branch)".yellow()),
            }
        }
        Command::Commit {
            branch,
            name,
            description,
            files,
        } => {
            let Some(target) = repo.branch_mut(&branch) else {
                bail!("no branch named '{branch}'");
            };
            target.add_commit(name.clone(), description, files);
            println!("Committed {} to {}", name.green(), branch.cyan());
        }
        Command::Clone {
            source,
            new_name,
            at,
        } => {
            let last_commit = match at {
                Some(index) => Some(commit_at(repo, &source, index)?),
                None => None,
            };
            repo.clone_branch(&source, &new_name, last_commit.as_ref())?;
            match repo.branch(&new_name) {
                Some(branch) => println!(
                    "Cloned {} into {} ({} commit(s))",
                    source.cyan(),
                    branch.name().green(),
                    branch.commits().len()
                ),
                None => println!("{}", "Nothing cloned (unknown source branch)".yellow()),
            }
        }
        Command::Remove { name } => {
            repo.remove_branch(&name);
            println!("Removed {}", name.red());
        }
        Command::Join {
            source,
            destination,
        } => {
            repo.join_branches(&source, &destination)?;
            println!("Joined {} into {}", source.cyan(), destination.green());
        }
        Command::Undo { branch } => match branch {
            Some(name) => {
                let Some(target) = repo.branch_mut(&name) else {
                    bail!("no branch named '{name}'");
                };
                target.undo();
                println!("Undid last commit on {}", name.cyan());
            }
            None => {
                repo.undo();
                println!("Undid last repository operation");
            }
        },
        Command::Redo { branch } => match branch {
            Some(name) => {
                let Some(target) = repo.branch_mut(&name) else {
                    bail!("no branch named '{name}'");
                };
                target.redo();
                println!("Redid last undone commit on {}", name.cyan());
            }
            None => {
                repo.redo();
                println!("Redid last undone repository operation");
            }
        },
        Command::Log { branch } => match branch {
            Some(name) => {
                let Some(target) = repo.branch(&name) else {
                    bail!("no branch named '{name}'");
                };
                display::print_branch(target);
            }
            None => display::print_repository(repo),
        },
        Command::Branches => {
            let mut names: Vec<&str> = repo.branches().iter().map(|b| b.name()).collect();
            names.sort_unstable();
            if names.is_empty() {
                println!("{}", "No branches".yellow());
            }
            for name in names {
                println!("  {}", name.cyan());
            }
        }
        Command::Help => display::print_help(),
        Command::Quit => return Ok(Outcome::Quit),
    }

    Ok(Outcome::Continue)
}
