use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::core::paths::normalize_path;
use crate::core::settings::FolderKind;
use crate::core::taxonomy::TaxonomyManager;
use crate::core::vault::{OsVault, Vault};

pub fn run(vault_root: &Path) -> Result<()> {
    let vault = OsVault::new(vault_root);
    let settings = super::load_settings(&vault)?;
    let manager = TaxonomyManager::new(&vault);

    println!("{}", "Base Folders".bold());
    println!("{}", "=".repeat(50));
    println!();

    let mut created = 0;
    for kind in FolderKind::ALL {
        let path = normalize_path(settings.base_folder(kind));
        let existed = vault.exists(&path)?;
        manager.ensure_folder(&path)?;
        if existed {
            println!("{} {} exists ({})", "✓".green(), path, kind.label());
        } else {
            created += 1;
            println!("{} Created {} ({})", "✓".green(), path, kind.label());
        }
    }

    println!();
    println!("Created: {} folders", created.to_string().green());
    Ok(())
}
