use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::core::settings::{FolderKind, SelectorKind};
use crate::core::vault::OsVault;

pub fn run(vault_root: &Path, json: bool) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!("{}", "Effective Settings".bold());
    println!("{}", "=".repeat(50));
    println!();

    println!("{}", "Base folders".cyan());
    println!("{}", "-".repeat(30));
    for kind in FolderKind::ALL {
        println!("   {:<18} {}", kind.label(), settings.base_folder(kind));
    }
    println!();

    println!("{}", "Selectors".cyan());
    println!("{}", "-".repeat(30));
    for kind in SelectorKind::ALL {
        let options = settings.selector(kind);
        println!("   {}", kind.label().bold());
        println!("      template:    {}", options.folder_option_template);
        println!("      show order:  {}", options.show_option_order);
        println!("      base path:   {}", options.show_base_path);
        if options.excludes_paths.is_empty() {
            println!("      excludes:    (none)");
        } else {
            println!("      excludes:    {}", options.excludes_paths.replace('\n', ", "));
        }
    }
    println!();

    println!("{}", "Default lists".cyan());
    println!("{}", "-".repeat(30));
    print_list("Input subfolders", &settings.input_folder_default_sub_folders);
    print_list("Output subfolders", &settings.output_folder_default_sub_folders);
    print_list("Outcome project", &settings.outcome_project_default_sub_folders);
    print_list("Default projects", &settings.default_projects);
    println!();

    println!("{}", "Dependent config files".cyan());
    println!("{}", "-".repeat(30));
    for file in settings.dependent_config_files() {
        println!("   {}", file);
    }

    Ok(())
}

fn print_list(label: &str, list: &str) {
    let entries: Vec<&str> = list
        .lines()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();
    println!("   {:<18} {}", label, entries.join(", "));
}
