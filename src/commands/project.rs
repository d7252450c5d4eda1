use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::core::taxonomy::TaxonomyManager;
use crate::core::vault::OsVault;

use super::LinePrompt;

pub fn run(vault_root: &Path, name: Option<&str>) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;
    let manager = TaxonomyManager::new(&vault);

    match manager.create_project(&settings, name, &LinePrompt)? {
        Some(project) => {
            println!(
                "{} Created project {} under {} and {}",
                "✓".green(),
                project.bold(),
                settings.task_folder,
                settings.outcome_folder
            );
        }
        None => println!("{}", "Cancelled.".yellow()),
    }
    Ok(())
}

pub fn run_defaults(vault_root: &Path) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;
    let manager = TaxonomyManager::new(&vault);

    let projects: Vec<&str> = settings
        .default_projects
        .lines()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if projects.is_empty() {
        println!("{}", "No default projects configured.".yellow());
        return Ok(());
    }

    manager.create_default_projects(&settings, &LinePrompt)?;
    println!(
        "{} Created {} default projects: {}",
        "✓".green(),
        projects.len(),
        projects.join(", ")
    );
    Ok(())
}
