use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::paths::{join_path, normalize_path, CONFIG_DIR};
use super::settings::Settings;
use super::vault::Vault;

/// Command id prefix the template engine registers its insert commands
/// under; hotkeys are keyed by `{prefix}{template path}`.
pub const TEMPLATE_COMMAND_PREFIX: &str = "templater-obsidian:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub key: String,
}

impl Hotkey {
    fn new(modifiers: &[&str], key: &str) -> Self {
        Self {
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            key: key.to_string(),
        }
    }

    /// Same key and same modifier set, regardless of modifier order.
    fn same_binding(&self, other: &Hotkey) -> bool {
        if self.key != other.key {
            return false;
        }
        let mut mine = self.modifiers.clone();
        let mut theirs = other.modifiers.clone();
        mine.sort();
        theirs.sort();
        mine == theirs
    }
}

#[derive(Debug, Clone)]
pub struct HotkeyMapping {
    pub template_path: String,
    pub hotkey: Hotkey,
}

/// The host hotkeys registry: command id to bound hotkeys.
pub type HotkeyRegistry = BTreeMap<String, Vec<Hotkey>>;

/// Outcome of a registry merge. A missing template aborts the merge
/// without touching the registry; it is a notice, not a hard failure.
#[derive(Debug, PartialEq, Eq)]
pub enum HotkeyMergeOutcome {
    Added(usize),
    MissingTemplate(String),
}

/// The selector templates that get a hotkey, one per taxonomy category
/// plus the auxiliaries selector. Paths live under the framework folder.
pub fn selector_hotkey_mappings(settings: &Settings) -> Vec<HotkeyMapping> {
    let templates = join_path(&settings.framework_folder, "Templates/Templater");
    let entries: [(&str, &[&str], &str); 5] = [
        ("Selector-CreateInput.md", &["Alt"], "1"),
        ("Selector-CreateOutput.md", &["Alt"], "2"),
        ("Selector-CreateTask.md", &["Alt"], "3"),
        ("Selector-CreateOutcome.md", &["Alt"], "4"),
        ("Selector-Auxiliaries.md", &["Alt"], "5"),
    ];
    entries
        .iter()
        .map(|(note, modifiers, key)| HotkeyMapping {
            template_path: join_path(&templates, note),
            hotkey: Hotkey::new(modifiers, key),
        })
        .collect()
}

/// Merges the selector hotkeys into the host registry file. Existing
/// bindings (same command, same key, same modifiers) are left alone, and
/// everything else in the registry is preserved. The registry is only
/// written when something was actually added.
pub fn add_template_hotkeys(vault: &dyn Vault, settings: &Settings) -> Result<HotkeyMergeOutcome> {
    let mappings = selector_hotkey_mappings(settings);

    for mapping in &mappings {
        if !vault.exists(&normalize_path(&mapping.template_path))? {
            return Ok(HotkeyMergeOutcome::MissingTemplate(
                mapping.template_path.clone(),
            ));
        }
    }

    let registry_path = join_path(CONFIG_DIR, &settings.hotkeys_file);
    let mut registry: HotkeyRegistry = if vault.exists(&registry_path)? {
        let content = vault.read_text(&registry_path)?;
        if content.trim().is_empty() {
            HotkeyRegistry::new()
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("malformed hotkeys registry: {}", registry_path))?
        }
    } else {
        HotkeyRegistry::new()
    };

    let mut added = 0;
    for mapping in &mappings {
        let command_id = format!("{}{}", TEMPLATE_COMMAND_PREFIX, mapping.template_path);
        let bindings = registry.entry(command_id).or_default();
        if !bindings.iter().any(|b| b.same_binding(&mapping.hotkey)) {
            bindings.push(mapping.hotkey.clone());
            added += 1;
        }
    }

    if added > 0 {
        vault.write_text(&registry_path, &serde_json::to_string_pretty(&registry)?)?;
    }
    Ok(HotkeyMergeOutcome::Added(added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vault::testing::MemVault;

    fn vault_with_templates(settings: &Settings) -> MemVault {
        let vault = MemVault::new();
        for mapping in selector_hotkey_mappings(settings) {
            vault
                .write_text(&mapping.template_path, "template body")
                .expect("seed template");
        }
        vault.clear_ops();
        vault
    }

    #[test]
    fn test_merge_into_empty_registry() -> Result<()> {
        let settings = Settings::default();
        let vault = vault_with_templates(&settings);

        let outcome = add_template_hotkeys(&vault, &settings)?;
        assert_eq!(outcome, HotkeyMergeOutcome::Added(5));

        let registry: HotkeyRegistry =
            serde_json::from_str(&vault.file(".obsidian/hotkeys.json").expect("registry"))?;
        let bindings = registry
            .get("templater-obsidian:0-Extras/Vaultkit/Templates/Templater/Selector-CreateTask.md")
            .expect("task selector binding");
        assert_eq!(bindings, &vec![Hotkey::new(&["Alt"], "3")]);
        Ok(())
    }

    #[test]
    fn test_merge_is_idempotent() -> Result<()> {
        let settings = Settings::default();
        let vault = vault_with_templates(&settings);

        add_template_hotkeys(&vault, &settings)?;
        let first = vault.file(".obsidian/hotkeys.json").expect("registry");
        vault.clear_ops();

        let outcome = add_template_hotkeys(&vault, &settings)?;
        assert_eq!(outcome, HotkeyMergeOutcome::Added(0));
        assert_eq!(vault.mutating_ops(), 0);
        assert_eq!(vault.file(".obsidian/hotkeys.json").expect("registry"), first);
        Ok(())
    }

    #[test]
    fn test_same_binding_ignores_modifier_order() {
        let a = Hotkey::new(&["Alt", "Shift"], "A");
        let b = Hotkey::new(&["Shift", "Alt"], "A");
        let c = Hotkey::new(&["Shift", "Alt"], "B");
        assert!(a.same_binding(&b));
        assert!(!a.same_binding(&c));
    }

    #[test]
    fn test_existing_binding_is_not_duplicated() -> Result<()> {
        let settings = Settings::default();
        let vault = vault_with_templates(&settings);

        let mut seeded = HotkeyRegistry::new();
        let mapping = &selector_hotkey_mappings(&settings)[0];
        seeded.insert(
            format!("{}{}", TEMPLATE_COMMAND_PREFIX, mapping.template_path),
            vec![Hotkey::new(&["Alt"], "1")],
        );
        vault.write_text(".obsidian/hotkeys.json", &serde_json::to_string(&seeded)?)?;

        let outcome = add_template_hotkeys(&vault, &settings)?;
        assert_eq!(outcome, HotkeyMergeOutcome::Added(4));

        let registry: HotkeyRegistry =
            serde_json::from_str(&vault.file(".obsidian/hotkeys.json").expect("registry"))?;
        let bindings = registry
            .get(&format!("{}{}", TEMPLATE_COMMAND_PREFIX, mapping.template_path))
            .expect("seeded binding");
        assert_eq!(bindings.len(), 1);
        Ok(())
    }

    #[test]
    fn test_unrelated_bindings_survive_merge() -> Result<()> {
        let settings = Settings::default();
        let vault = vault_with_templates(&settings);
        vault.write_text(
            ".obsidian/hotkeys.json",
            "{\"editor:toggle-bold\":[{\"modifiers\":[\"Mod\"],\"key\":\"B\"}]}",
        )?;

        add_template_hotkeys(&vault, &settings)?;
        let registry: HotkeyRegistry =
            serde_json::from_str(&vault.file(".obsidian/hotkeys.json").expect("registry"))?;
        assert!(registry.contains_key("editor:toggle-bold"));
        assert_eq!(registry.len(), 6);
        Ok(())
    }

    #[test]
    fn test_missing_template_aborts_without_writing() -> Result<()> {
        let settings = Settings::default();
        let vault = MemVault::new();

        let outcome = add_template_hotkeys(&vault, &settings)?;
        assert!(matches!(outcome, HotkeyMergeOutcome::MissingTemplate(_)));
        assert_eq!(vault.mutating_ops(), 0);
        Ok(())
    }
}
