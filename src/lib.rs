//! vaultkit library
//!
//! Second Brain vault scaffolding and configuration tools.
//!
//! # Modules
//!
//! - `core`: settings schema and store, folder taxonomy operations, and
//!   rewrites of the host config files that embed taxonomy paths

pub mod core;

// Re-exports for convenience
pub use crate::core::hotkeys::{add_template_hotkeys, selector_hotkey_mappings, HotkeyMergeOutcome};
pub use crate::core::paths::{join_path, normalize_path, CONFIG_DIR};
pub use crate::core::settings::{
    FolderKind, ProjectNameFormat, SelectorKind, Settings, SettingsBackend, SettingsStore,
    VaultDataBackend,
};
pub use crate::core::taxonomy::{NamePrompt, TaxonomyManager};
pub use crate::core::vault::{OsVault, Vault};
