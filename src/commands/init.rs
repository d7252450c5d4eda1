use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::core::hotkeys::{add_template_hotkeys, selector_hotkey_mappings, HotkeyMergeOutcome};
use crate::core::taxonomy::TaxonomyManager;
use crate::core::templater;
use crate::core::vault::OsVault;

use super::LinePrompt;

/// Full bootstrap: base folders, default subfolders, default projects,
/// selector hotkeys, template engine paths. Steps run in order and the
/// first failure aborts the rest.
pub fn run(vault_root: &Path) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;
    let manager = TaxonomyManager::new(&vault);

    println!("{}", "Vault Bootstrap".bold());
    println!("{}", "=".repeat(50));
    println!();

    manager.ensure_taxonomy(&settings)?;
    println!("{} Base folders", "✓".green());

    manager.ensure_default_subfolders(
        &settings.input_folder,
        &settings.input_folder_default_sub_folders,
    )?;
    println!("{} Input subfolders", "✓".green());

    manager.ensure_default_subfolders(
        &settings.output_folder,
        &settings.output_folder_default_sub_folders,
    )?;
    println!("{} Output subfolders", "✓".green());

    manager.create_default_projects(&settings, &LinePrompt)?;
    println!("{} Default projects", "✓".green());

    let template_paths: Vec<String> = selector_hotkey_mappings(&settings)
        .into_iter()
        .map(|mapping| mapping.template_path)
        .collect();
    match templater::enable_template_hotkeys(&vault, &settings, &template_paths)? {
        Some(added) => println!("{} Template engine hotkey list ({} added)", "✓".green(), added),
        None => println!(
            "{} Template engine not installed, hotkey list skipped",
            "-".yellow()
        ),
    }

    match add_template_hotkeys(&vault, &settings)? {
        HotkeyMergeOutcome::Added(added) => {
            println!("{} Selector hotkeys ({} added)", "✓".green(), added)
        }
        HotkeyMergeOutcome::MissingTemplate(path) => println!(
            "{} Selector hotkeys skipped, template missing: {}",
            "-".yellow(),
            path
        ),
    }

    if templater::register_paths(&vault, &settings)? {
        println!("{} Template engine paths", "✓".green());
    } else {
        println!(
            "{} Template engine not installed, paths skipped",
            "-".yellow()
        );
    }

    println!();
    println!("{}", "✓ Vault is ready!".green());
    Ok(())
}
