use std::path::Path;

use anyhow::{bail, Result};
use colored::*;

use crate::core::paths::normalize_path;
use crate::core::settings::{FolderKind, SettingsStore, VaultDataBackend};
use crate::core::taxonomy::TaxonomyManager;
use crate::core::vault::OsVault;

/// Renames a base folder in the settings, saves, then propagates the new
/// path into the dependent host config files. Steps run in that order on
/// every edit; the task dashboard is rebuilt last when the task folder
/// changed.
pub fn run(vault_root: &Path, kind: &str, new_path: &str) -> Result<()> {
    let Some(kind) = FolderKind::parse(kind) else {
        bail!(
            "unknown folder kind '{}' (expected: input | output | task | outcome | extra | framework)",
            kind
        );
    };

    let vault = OsVault::new(vault_root);
    let mut store = SettingsStore::new(VaultDataBackend::new(&vault));
    store.load()?;

    let old_path = store.get().base_folder(kind).to_string();
    let new_path = normalize_path(new_path);
    if new_path.is_empty() {
        bail!("new path must not be empty");
    }
    if new_path == old_path {
        println!("{}", format!("{} already is {}.", kind.label(), new_path).yellow());
        return Ok(());
    }

    store.update(|s| s.set_base_folder(kind, new_path.clone()));
    store.save()?;

    let manager = TaxonomyManager::new(&vault);
    let rewritten = manager.rename_base_folder(store.get(), &new_path, &old_path)?;

    println!(
        "{} {}: {} → {}",
        "✓".green(),
        kind.label(),
        old_path,
        new_path.bold()
    );
    println!("Rewrote {} dependent config files", rewritten);

    if kind == FolderKind::Task {
        manager.rebuild_task_dashboard(store.get(), &new_path)?;
        println!("{} Task dashboard updated", "✓".green());
    }

    println!();
    println!(
        "{}",
        "The folder itself is not moved; move it in your vault or run create-folders.".dimmed()
    );
    Ok(())
}
