use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::paths::{join_path, CONFIG_DIR};
use super::vault::Vault;

/// Vault-relative location of the persisted settings record.
pub const SETTINGS_DATA_PATH: &str = ".obsidian/vaultkit/data.json";

/// How a project name is derived from its folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectNameFormat {
    LastDash,
    FirstDash,
    WholeFolderName,
}

/// The six user-configurable base folders of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderKind {
    Input,
    Output,
    Task,
    Outcome,
    Extra,
    Framework,
}

impl FolderKind {
    pub const ALL: [FolderKind; 6] = [
        FolderKind::Input,
        FolderKind::Output,
        FolderKind::Task,
        FolderKind::Outcome,
        FolderKind::Extra,
        FolderKind::Framework,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Some(FolderKind::Input),
            "output" => Some(FolderKind::Output),
            "task" => Some(FolderKind::Task),
            "outcome" => Some(FolderKind::Outcome),
            "extra" => Some(FolderKind::Extra),
            "framework" => Some(FolderKind::Framework),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FolderKind::Input => "Input folder",
            FolderKind::Output => "Output folder",
            FolderKind::Task => "Task folder",
            FolderKind::Outcome => "Outcome folder",
            FolderKind::Extra => "Extra folder",
            FolderKind::Framework => "Framework folder",
        }
    }
}

/// The four note categories that get a folder selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Input,
    Output,
    Task,
    Outcome,
}

impl SelectorKind {
    pub const ALL: [SelectorKind; 4] = [
        SelectorKind::Input,
        SelectorKind::Output,
        SelectorKind::Task,
        SelectorKind::Outcome,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SelectorKind::Input => "Input",
            SelectorKind::Output => "Output",
            SelectorKind::Task => "Task",
            SelectorKind::Outcome => "Outcome",
        }
    }
}

/// Per-category selector options, resolved from the flat settings record.
pub struct SelectorOptions<'a> {
    pub excludes_paths: &'a str,
    pub show_option_order: bool,
    pub show_base_path: bool,
    pub folder_option_template: &'a str,
}

/// The canonical settings record. Persisted as a flat camelCase JSON
/// object; fields missing from persisted data fall back to the defaults
/// below, unknown persisted keys are kept in `extra` and round-tripped on
/// save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub input_folder: String,
    pub output_folder: String,
    pub task_folder: String,
    pub outcome_folder: String,
    pub extra_folder: String,
    pub framework_folder: String,

    pub user_template_prefix: String,
    pub use_user_template: bool,
    pub input_section_heading: String,
    pub output_section_heading: String,
    pub outcome_section_heading: String,
    pub add_link_to_current_list: bool,
    pub default_list_date_format: String,
    pub default_list_heading_level: String,
    pub project_name_format: ProjectNameFormat,

    pub input_selector_excludes_paths: String,
    pub output_selector_excludes_paths: String,
    pub task_selector_excludes_paths: String,
    pub outcome_selector_excludes_paths: String,
    pub input_selector_show_option_order: bool,
    pub output_selector_show_option_order: bool,
    pub task_selector_show_option_order: bool,
    pub outcome_selector_show_option_order: bool,
    pub input_selector_show_base_path: bool,
    pub output_selector_show_base_path: bool,
    pub task_selector_show_base_path: bool,
    pub outcome_selector_show_base_path: bool,
    pub input_selector_folder_option_template: String,
    pub output_selector_folder_option_template: String,
    pub task_selector_folder_option_template: String,
    pub outcome_selector_folder_option_template: String,
    pub outcome_selector_include_parent_folder: bool,

    pub fleeting_note_prefix: String,
    pub fleeting_note_date_format: String,

    pub outcome_project_default_sub_folders: String,
    pub input_folder_default_sub_folders: String,
    pub output_folder_default_sub_folders: String,
    pub default_projects: String,

    pub templater_data_path: String,
    pub hotkeys_file: String,
    pub workspaces_file: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_folder: "1-Inputs".to_string(),
            output_folder: "2-Outputs".to_string(),
            task_folder: "3-Tasks".to_string(),
            outcome_folder: "4-Outcomes".to_string(),
            extra_folder: "0-Extras".to_string(),
            framework_folder: "0-Extras/Vaultkit".to_string(),

            user_template_prefix: "My".to_string(),
            use_user_template: true,
            input_section_heading: "Input (LEARN)".to_string(),
            output_section_heading: "Output (THINK)".to_string(),
            outcome_section_heading: "Outcome (DO)".to_string(),
            add_link_to_current_list: true,
            default_list_date_format: "YYYY-MM-DD".to_string(),
            default_list_heading_level: "##".to_string(),
            project_name_format: ProjectNameFormat::LastDash,

            input_selector_excludes_paths: String::new(),
            output_selector_excludes_paths: String::new(),
            task_selector_excludes_paths: String::new(),
            outcome_selector_excludes_paths: String::new(),
            input_selector_show_option_order: true,
            output_selector_show_option_order: true,
            task_selector_show_option_order: true,
            outcome_selector_show_option_order: true,
            input_selector_show_base_path: false,
            output_selector_show_base_path: false,
            task_selector_show_base_path: false,
            outcome_selector_show_base_path: false,
            input_selector_folder_option_template: "Create Input Notes In {{folder}}".to_string(),
            output_selector_folder_option_template: "Create Output Notes In {{folder}}".to_string(),
            task_selector_folder_option_template: "Create Task Lists In {{folder}}".to_string(),
            outcome_selector_folder_option_template: "Create Outcome Notes In {{folder}}"
                .to_string(),
            outcome_selector_include_parent_folder: true,

            fleeting_note_prefix: "Fleeting Notes".to_string(),
            fleeting_note_date_format: "YYYY-MM-DD".to_string(),

            outcome_project_default_sub_folders: "Articles\nSummary".to_string(),
            input_folder_default_sub_folders: "Resources\nQuickNotes".to_string(),
            output_folder_default_sub_folders: "FleetingNotes\nCardNotes".to_string(),
            default_projects: "LearnPKM\nLearnAI".to_string(),

            templater_data_path: "plugins/templater-obsidian/data.json".to_string(),
            hotkeys_file: "hotkeys.json".to_string(),
            workspaces_file: "workspaces.json".to_string(),

            extra: Map::new(),
        }
    }
}

impl Settings {
    pub fn base_folder(&self, kind: FolderKind) -> &str {
        match kind {
            FolderKind::Input => &self.input_folder,
            FolderKind::Output => &self.output_folder,
            FolderKind::Task => &self.task_folder,
            FolderKind::Outcome => &self.outcome_folder,
            FolderKind::Extra => &self.extra_folder,
            FolderKind::Framework => &self.framework_folder,
        }
    }

    pub fn set_base_folder(&mut self, kind: FolderKind, value: String) {
        let field = match kind {
            FolderKind::Input => &mut self.input_folder,
            FolderKind::Output => &mut self.output_folder,
            FolderKind::Task => &mut self.task_folder,
            FolderKind::Outcome => &mut self.outcome_folder,
            FolderKind::Extra => &mut self.extra_folder,
            FolderKind::Framework => &mut self.framework_folder,
        };
        *field = value;
    }

    pub fn selector(&self, kind: SelectorKind) -> SelectorOptions<'_> {
        match kind {
            SelectorKind::Input => SelectorOptions {
                excludes_paths: &self.input_selector_excludes_paths,
                show_option_order: self.input_selector_show_option_order,
                show_base_path: self.input_selector_show_base_path,
                folder_option_template: &self.input_selector_folder_option_template,
            },
            SelectorKind::Output => SelectorOptions {
                excludes_paths: &self.output_selector_excludes_paths,
                show_option_order: self.output_selector_show_option_order,
                show_base_path: self.output_selector_show_base_path,
                folder_option_template: &self.output_selector_folder_option_template,
            },
            SelectorKind::Task => SelectorOptions {
                excludes_paths: &self.task_selector_excludes_paths,
                show_option_order: self.task_selector_show_option_order,
                show_base_path: self.task_selector_show_base_path,
                folder_option_template: &self.task_selector_folder_option_template,
            },
            SelectorKind::Outcome => SelectorOptions {
                excludes_paths: &self.outcome_selector_excludes_paths,
                show_option_order: self.outcome_selector_show_option_order,
                show_base_path: self.outcome_selector_show_base_path,
                folder_option_template: &self.outcome_selector_folder_option_template,
            },
        }
    }

    /// Host config files that embed base-folder paths and get rewritten on
    /// a rename. Always reported in the same order: template engine data,
    /// hotkeys registry, workspace layout.
    pub fn dependent_config_files(&self) -> [String; 3] {
        [
            join_path(CONFIG_DIR, &self.templater_data_path),
            join_path(CONFIG_DIR, &self.hotkeys_file),
            join_path(CONFIG_DIR, &self.workspaces_file),
        ]
    }
}

/// Persistence capability for the settings record. `load` returns `None`
/// when nothing was ever saved; that is the normal first-run case.
pub trait SettingsBackend {
    fn load(&self) -> Result<Option<Value>>;
    fn save(&self, data: &Value) -> Result<()>;
}

/// Settings stored as a JSON file inside the vault config directory.
pub struct VaultDataBackend<'a> {
    vault: &'a dyn Vault,
    path: String,
}

impl<'a> VaultDataBackend<'a> {
    pub fn new(vault: &'a dyn Vault) -> Self {
        Self {
            vault,
            path: SETTINGS_DATA_PATH.to_string(),
        }
    }
}

impl SettingsBackend for VaultDataBackend<'_> {
    fn load(&self) -> Result<Option<Value>> {
        if !self.vault.exists(&self.path)? {
            return Ok(None);
        }
        let content = self.vault.read_text(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_str(&content)
            .with_context(|| format!("malformed settings data: {}", self.path))?;
        Ok(Some(value))
    }

    fn save(&self, data: &Value) -> Result<()> {
        self.vault
            .write_text(&self.path, &serde_json::to_string_pretty(data)?)
    }
}

/// Single source of truth for the live settings record.
pub struct SettingsStore<B: SettingsBackend> {
    backend: B,
    settings: Settings,
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            settings: Settings::default(),
        }
    }

    /// Merges persisted data over the defaults and makes the result the
    /// live record. Absent or empty persisted data is not an error.
    pub fn load(&mut self) -> Result<&Settings> {
        self.settings = match self.backend.load()? {
            Some(value) => {
                serde_json::from_value(value).context("persisted settings do not match schema")?
            }
            None => Settings::default(),
        };
        Ok(&self.settings)
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn update(&mut self, apply: impl FnOnce(&mut Settings)) {
        apply(&mut self.settings);
    }

    /// Writes the full current record through the backend. Safe to call
    /// repeatedly.
    pub fn save(&self) -> Result<()> {
        self.backend.save(&serde_json::to_value(&self.settings)?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;
    use crate::core::vault::testing::MemVault;

    struct MemBackend {
        data: RefCell<Option<Value>>,
    }

    impl MemBackend {
        fn new(data: Option<Value>) -> Self {
            Self {
                data: RefCell::new(data),
            }
        }

        fn saved(&self) -> Option<Value> {
            self.data.borrow().clone()
        }
    }

    impl SettingsBackend for MemBackend {
        fn load(&self) -> Result<Option<Value>> {
            Ok(self.data.borrow().clone())
        }

        fn save(&self, data: &Value) -> Result<()> {
            *self.data.borrow_mut() = Some(data.clone());
            Ok(())
        }
    }

    #[test]
    fn test_load_without_persisted_data_yields_defaults() -> Result<()> {
        let mut store = SettingsStore::new(MemBackend::new(None));
        let settings = store.load()?;
        assert_eq!(*settings, Settings::default());
        Ok(())
    }

    #[test]
    fn test_load_merges_partial_record_over_defaults() -> Result<()> {
        let persisted = json!({
            "taskFolder": "Projects",
            "useUserTemplate": false,
            "projectNameFormat": "firstDash",
            "defaultProjects": "Alpha\nBeta"
        });
        let mut store = SettingsStore::new(MemBackend::new(Some(persisted)));
        let settings = store.load()?;

        assert_eq!(settings.task_folder, "Projects");
        assert!(!settings.use_user_template);
        assert_eq!(settings.project_name_format, ProjectNameFormat::FirstDash);
        assert_eq!(settings.default_projects, "Alpha\nBeta");
        // Untouched keys come from the defaults.
        assert_eq!(settings.input_folder, "1-Inputs");
        assert_eq!(settings.hotkeys_file, "hotkeys.json");
        Ok(())
    }

    #[test]
    fn test_unknown_keys_survive_load_save_round_trip() -> Result<()> {
        let persisted = json!({
            "inputFolder": "In",
            "legacyColorTheme": "sepia"
        });
        let backend = MemBackend::new(Some(persisted));
        let mut store = SettingsStore::new(backend);
        store.load()?;
        store.save()?;

        let saved = store.backend.saved().expect("saved record");
        assert_eq!(saved["inputFolder"], "In");
        assert_eq!(saved["legacyColorTheme"], "sepia");
        // Defaults are materialized into the saved record.
        assert_eq!(saved["taskFolder"], "3-Tasks");
        Ok(())
    }

    #[test]
    fn test_update_then_save_persists_current_state() -> Result<()> {
        let mut store = SettingsStore::new(MemBackend::new(None));
        store.load()?;
        store.update(|s| s.task_folder = "3-Work".to_string());
        store.save()?;

        let saved = store.backend.saved().expect("saved record");
        assert_eq!(saved["taskFolder"], "3-Work");
        assert_eq!(store.get().task_folder, "3-Work");
        Ok(())
    }

    #[test]
    fn test_vault_backend_first_run_and_round_trip() -> Result<()> {
        let vault = MemVault::new();
        {
            let backend = VaultDataBackend::new(&vault);
            assert!(backend.load()?.is_none());

            let mut store = SettingsStore::new(backend);
            store.load()?;
            store.update(|s| s.outcome_folder = "Results".to_string());
            store.save()?;
        }

        let mut store = SettingsStore::new(VaultDataBackend::new(&vault));
        assert_eq!(store.load()?.outcome_folder, "Results");
        Ok(())
    }

    #[test]
    fn test_selector_table_covers_all_categories() {
        let settings = Settings::default();
        for kind in SelectorKind::ALL {
            let options = settings.selector(kind);
            assert!(options.folder_option_template.contains("{{folder}}"));
            assert!(options.show_option_order);
            assert!(!options.show_base_path);
            assert!(options.excludes_paths.is_empty());
        }
    }

    #[test]
    fn test_base_folder_accessors() {
        let mut settings = Settings::default();
        assert_eq!(settings.base_folder(FolderKind::Extra), "0-Extras");
        settings.set_base_folder(FolderKind::Extra, "9-Extras".to_string());
        assert_eq!(settings.base_folder(FolderKind::Extra), "9-Extras");
    }

    #[test]
    fn test_folder_kind_parse() {
        assert_eq!(FolderKind::parse("task"), Some(FolderKind::Task));
        assert_eq!(FolderKind::parse("Framework"), Some(FolderKind::Framework));
        assert_eq!(FolderKind::parse("nope"), None);
    }

    #[test]
    fn test_dependent_config_files_are_normalized() {
        let settings = Settings::default();
        let [templater, hotkeys, workspaces] = settings.dependent_config_files();
        assert_eq!(templater, ".obsidian/plugins/templater-obsidian/data.json");
        assert_eq!(hotkeys, ".obsidian/hotkeys.json");
        assert_eq!(workspaces, ".obsidian/workspaces.json");
    }
}
