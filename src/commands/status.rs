use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::Local;
use colored::*;
use serde::Serialize;

use crate::core::paths::normalize_path;
use crate::core::settings::FolderKind;
use crate::core::vault::{OsVault, Vault};

#[derive(Serialize)]
struct VaultStatus {
    timestamp: String,
    vault: String,
    folders: Vec<FolderStatus>,
    missing: usize,
    projects: usize,
}

#[derive(Serialize)]
struct FolderStatus {
    kind: String,
    path: String,
    exists: bool,
}

pub fn run(vault_root: &Path, json: bool) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;

    let mut folders = Vec::new();
    let mut missing = 0;
    for kind in FolderKind::ALL {
        let path = normalize_path(settings.base_folder(kind));
        let exists = vault.exists(&path)?;
        if !exists {
            missing += 1;
        }
        folders.push(FolderStatus {
            kind: kind.label().to_string(),
            path,
            exists,
        });
    }

    let projects = count_subfolders(&vault_root.join(normalize_path(&settings.task_folder)));

    let status = VaultStatus {
        timestamp: Local::now().to_rfc3339(),
        vault: vault_root.display().to_string(),
        folders,
        missing,
        projects,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_status(&status);
    }

    if status.missing > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn count_subfolders(path: &Path) -> usize {
    if !path.exists() {
        return 0;
    }
    fs::read_dir(path)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .count()
        })
        .unwrap_or(0)
}

fn print_status(status: &VaultStatus) {
    println!("{}", "Vault Status".bold());
    println!("{}", "=".repeat(50));
    println!();
    println!("Vault: {}", status.vault);
    println!("Checked: {}", status.timestamp);
    println!();

    println!("{}", "Base folders".cyan());
    println!("{}", "-".repeat(30));
    for folder in &status.folders {
        if folder.exists {
            println!("{} {:<18} {}", "✓".green(), folder.kind, folder.path);
        } else {
            println!("{} {:<18} {}", "✗".red(), folder.kind, folder.path.red());
        }
    }
    println!();
    println!("Projects under task folder: {}", status.projects);
    println!();

    if status.missing == 0 {
        println!("{}", "✓ Taxonomy is complete!".green());
    } else {
        println!(
            "{} {} folders missing. Run {} to create them.",
            "✗".red(),
            status.missing,
            "create-folders".cyan()
        );
    }
}
