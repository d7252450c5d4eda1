use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::core::hotkeys::{add_template_hotkeys, selector_hotkey_mappings, HotkeyMergeOutcome};
use crate::core::templater;
use crate::core::vault::OsVault;

pub fn run(vault_root: &Path) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;

    let template_paths: Vec<String> = selector_hotkey_mappings(&settings)
        .into_iter()
        .map(|mapping| mapping.template_path)
        .collect();
    match templater::enable_template_hotkeys(&vault, &settings, &template_paths)? {
        Some(added) => println!(
            "{} Added {} templates to the engine hotkey list",
            "✓".green(),
            added
        ),
        None => println!("{}", "Template engine not installed, hotkey list skipped.".yellow()),
    }

    match add_template_hotkeys(&vault, &settings)? {
        HotkeyMergeOutcome::Added(added) => {
            println!("{} Added {} hotkeys to {}", "✓".green(), added, settings.hotkeys_file);
            Ok(())
        }
        HotkeyMergeOutcome::MissingTemplate(path) => {
            println!("{} Template does not exist: {}", "✗".red(), path.red());
            std::process::exit(1);
        }
    }
}

pub fn run_template_paths(vault_root: &Path) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;

    if templater::register_paths(&vault, &settings)? {
        println!("{} Template engine paths registered", "✓".green());
        Ok(())
    } else {
        println!("{}", "Template engine not installed.".red());
        std::process::exit(1);
    }
}
