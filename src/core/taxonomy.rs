use anyhow::Result;
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use super::paths::{join_path, normalize_path};
use super::settings::{FolderKind, Settings};
use super::vault::Vault;

lazy_static! {
    static ref QUERY_SOURCE_RE: Regex = Regex::new("from .+\"\n").unwrap();
}

/// Dashboard note holding the task query blocks, relative to the
/// framework folder.
const TASK_DASHBOARD_NOTE: &str = "Dashboard/Task-Dashboard.md";

/// Interactive text entry. `None` means the user cancelled.
pub trait NamePrompt {
    fn request_name(&self, prompt: &str) -> Result<Option<String>>;
}

/// Stateless folder scaffolding and config-rewrite operations over a
/// settings snapshot and the vault.
pub struct TaxonomyManager<'a> {
    vault: &'a dyn Vault,
}

impl<'a> TaxonomyManager<'a> {
    pub fn new(vault: &'a dyn Vault) -> Self {
        Self { vault }
    }

    /// Creates the folder (with intermediate segments) only if it does not
    /// exist yet. Safe to call again once it does.
    pub fn ensure_folder(&self, path: &str) -> Result<()> {
        let path = normalize_path(path);
        if !self.vault.exists(&path)? {
            self.vault.create_folder(&path)?;
        }
        Ok(())
    }

    /// Ensures all six base folders exist. Fail-fast: the first folder
    /// that cannot be created aborts the rest, nothing is rolled back.
    pub fn ensure_taxonomy(&self, settings: &Settings) -> Result<()> {
        for kind in FolderKind::ALL {
            self.ensure_folder(settings.base_folder(kind))?;
        }
        Ok(())
    }

    /// Creates one subfolder per non-empty trimmed line of `list` under
    /// `base`. An empty or whitespace-only list is a no-op.
    pub fn ensure_default_subfolders(&self, base: &str, list: &str) -> Result<()> {
        for entry in list_entries(list) {
            self.ensure_folder(&join_path(base, entry))?;
        }
        Ok(())
    }

    /// Creates the same-named project folder pair under the task and
    /// outcome folders, plus the configured outcome subfolders. A missing
    /// name is solicited through `prompt`; a cancelled or blank reply
    /// returns `Ok(None)` without touching the vault. Re-running with an
    /// existing name fills in whatever is still missing.
    pub fn create_project(
        &self,
        settings: &Settings,
        name: Option<&str>,
        prompt: &dyn NamePrompt,
    ) -> Result<Option<String>> {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(given) => given.to_string(),
            None => match prompt.request_name("Project name")? {
                Some(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
                _ => return Ok(None),
            },
        };

        self.ensure_folder(&join_path(&settings.task_folder, &name))?;
        let outcome_project = join_path(&settings.outcome_folder, &name);
        self.ensure_folder(&outcome_project)?;
        self.ensure_default_subfolders(
            &outcome_project,
            &settings.outcome_project_default_sub_folders,
        )?;

        Ok(Some(name))
    }

    /// One `create_project` per non-empty trimmed line of the configured
    /// default-projects list, in order. Fail-fast: a failing entry aborts
    /// the remaining ones.
    pub fn create_default_projects(
        &self,
        settings: &Settings,
        prompt: &dyn NamePrompt,
    ) -> Result<()> {
        for project in list_entries(&settings.default_projects) {
            self.create_project(settings, Some(project), prompt)?;
        }
        Ok(())
    }

    /// Rewrites every dependent config file that exists, replacing the
    /// anchored patterns `:{old}/` and `"{old}/` with the new folder.
    /// The rewrite is textual, not structural: the anchors are how the
    /// host's JSON-like configs embed vault paths, and any occurrence of
    /// the exact anchored substring is rewritten. No-op when `new_folder`
    /// is empty or the name did not change. Returns the number of files
    /// rewritten.
    pub fn rename_base_folder(
        &self,
        settings: &Settings,
        new_folder: &str,
        old_folder: &str,
    ) -> Result<usize> {
        if new_folder.is_empty() || new_folder == old_folder {
            return Ok(0);
        }

        let colon_old = format!(":{}/", old_folder);
        let colon_new = format!(":{}/", new_folder);
        let quote_old = format!("\"{}/", old_folder);
        let quote_new = format!("\"{}/", new_folder);

        let mut rewritten = 0;
        for file in settings.dependent_config_files() {
            if !self.vault.exists(&file)? {
                continue;
            }
            let content = self.vault.read_text(&file)?;
            let updated = content
                .replace(&colon_old, &colon_new)
                .replace(&quote_old, &quote_new);
            if updated != content {
                self.vault.write_text(&file, &updated)?;
                rewritten += 1;
            }
        }
        Ok(rewritten)
    }

    /// Points every `from "..."` query source in the task dashboard note
    /// at the new task folder. No-op when the dashboard does not exist.
    pub fn rebuild_task_dashboard(&self, settings: &Settings, task_folder: &str) -> Result<()> {
        let dashboard = join_path(&settings.framework_folder, TASK_DASHBOARD_NOTE);
        if !self.vault.exists(&dashboard)? {
            return Ok(());
        }

        let content = self.vault.read_text(&dashboard)?;
        let replacement = format!("from \"{}\"\n", task_folder);
        let updated = QUERY_SOURCE_RE
            .replace_all(&content, NoExpand(&replacement))
            .into_owned();
        if updated != content {
            self.vault.write_text(&dashboard, &updated)?;
        }
        Ok(())
    }
}

fn list_entries(list: &str) -> impl Iterator<Item = &str> {
    list.lines().map(str::trim).filter(|entry| !entry.is_empty())
}
