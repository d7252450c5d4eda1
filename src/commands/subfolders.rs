use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::core::taxonomy::TaxonomyManager;
use crate::core::vault::OsVault;

pub fn run_input(vault_root: &Path) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;
    let manager = TaxonomyManager::new(&vault);

    manager.ensure_default_subfolders(
        &settings.input_folder,
        &settings.input_folder_default_sub_folders,
    )?;
    report(&settings.input_folder, &settings.input_folder_default_sub_folders);
    Ok(())
}

pub fn run_output(vault_root: &Path) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;
    let manager = TaxonomyManager::new(&vault);

    manager.ensure_default_subfolders(
        &settings.output_folder,
        &settings.output_folder_default_sub_folders,
    )?;
    report(&settings.output_folder, &settings.output_folder_default_sub_folders);
    Ok(())
}

fn report(base: &str, list: &str) {
    let count = list.lines().filter(|line| !line.trim().is_empty()).count();
    if count == 0 {
        println!("{}", format!("No subfolders configured for {}.", base).yellow());
    } else {
        println!("{} {} subfolders ensured under {}", "✓".green(), count, base);
    }
}
