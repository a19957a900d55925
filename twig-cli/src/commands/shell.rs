use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use twig_core::Repository;

use crate::exec::{self, Outcome};

pub fn run(repo_name: String) -> Result<()> {
    let mut repo = Repository::new(repo_name);

    println!(
        "{}",
        format!("twig shell, repository '{}'", repo.name).bold().cyan()
    );
    println!(
        "Type {} for the command list, {} to leave",
        "help".cyan(),
        "quit".cyan()
    );

    loop {
        let line: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("twig")
            .allow_empty(true)
            .interact_text()?;

        match exec::parse(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match exec::execute(&mut repo, command) {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Quit) => break,
                Err(err) => println!("{} {err:#}", "error:".red().bold()),
            },
            Err(err) => println!("{} {err:#}", "error:".red().bold()),
        }
    }

    Ok(())
}
