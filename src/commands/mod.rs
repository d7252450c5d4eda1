pub mod folders;
pub mod hotkeys_cmd;
pub mod init;
pub mod project;
pub mod rename;
pub mod settings_cmd;
pub mod status;
pub mod subfolders;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::core::settings::{Settings, SettingsStore, VaultDataBackend};
use crate::core::taxonomy::NamePrompt;
use crate::core::vault::Vault;

/// Terminal line prompt; Ctrl-C / Ctrl-D read as cancellation.
pub(crate) struct LinePrompt;

impl NamePrompt for LinePrompt {
    fn request_name(&self, prompt: &str) -> Result<Option<String>> {
        let mut editor = DefaultEditor::new()?;
        match editor.readline(&format!("{}: ", prompt)) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Effective settings for read-only commands: persisted data merged over
/// the defaults.
pub(crate) fn load_settings(vault: &dyn Vault) -> Result<Settings> {
    let mut store = SettingsStore::new(VaultDataBackend::new(vault));
    store.load()?;
    Ok(store.get().clone())
}
