use colored::Colorize;
use twig_core::{Branch, BranchOps, Repository, RepositoryOps};

pub fn print_branch(branch: &Branch) {
    println!(
        "{} {}",
        "branch".yellow().bold(),
        branch.name().yellow()
    );

    if branch.commits().is_empty() {
        println!("  {}", "no commits".dimmed());
        return;
    }

    for commit in branch.commits() {
        println!(
            "  {} {}",
            commit
                .created_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed(),
            commit.name.bold()
        );
        if !commit.description.is_empty() {
            println!("      {}", commit.description);
        }
        for file in &commit.files {
            println!("      • {}", file.dimmed());
        }
    }
}

pub fn print_repository(repo: &Repository) {
    println!(
        "{} {}",
        "Repository".bold().cyan(),
        repo.name().cyan()
    );

    let mut branches = repo.branches();
    if branches.is_empty() {
        println!("  {}", "no branches".yellow());
        return;
    }

    // Map iteration order is arbitrary; sort for stable output.
    branches.sort_by_key(|b| b.name().to_string());
    for branch in branches {
        println!();
        print_branch(branch);
    }
}

pub fn print_help() {
    println!("{}", "Commands".bold().cyan());
    println!("  {}  create a branch, empty or forked", "branch NAME [FROM [N]]".cyan());
    println!("  {}  add a commit to a branch", "commit BRANCH NAME DESC [FILES...]".cyan());
    println!("  {}  copy a branch, optionally up to commit N", "clone SRC NEW [N]".cyan());
    println!("  {}  delete a branch", "remove NAME".cyan());
    println!("  {}  merge SRC's commits into DEST", "join SRC DEST".cyan());
    println!("  {}  undo on a branch, or on the repository", "undo [BRANCH]".cyan());
    println!("  {}  redo on a branch, or on the repository", "redo [BRANCH]".cyan());
    println!("  {}  show one branch, or the whole repository", "log [BRANCH]".cyan());
    println!("  {}  list branch names", "branches".cyan());
    println!("  {}  leave the shell", "quit".cyan());
}
