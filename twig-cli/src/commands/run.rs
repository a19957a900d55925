use anyhow::{Context, Result};
use std::path::PathBuf;
use twig_core::Repository;

use crate::display;
use crate::exec::{self, Outcome};

pub fn run(script: PathBuf, repo_name: String, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(&script)
        .with_context(|| format!("failed to read {}", script.display()))?;

    let mut repo = Repository::new(repo_name);

    for (lineno, line) in text.lines().enumerate() {
        let parsed = exec::parse(line)
            .with_context(|| format!("{}:{}", script.display(), lineno + 1))?;
        let Some(command) = parsed else { continue };

        let outcome = exec::execute(&mut repo, command)
            .with_context(|| format!("{}:{}", script.display(), lineno + 1))?;
        if outcome == Outcome::Quit {
            break;
        }
    }

    println!();
    if json {
        println!("{}", serde_json::to_string_pretty(&repo)?);
    } else {
        display::print_repository(&repo);
    }

    Ok(())
}
