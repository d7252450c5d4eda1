use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Host filesystem capability. All paths are vault-relative, normalized
/// strings; implementations resolve them against their own root.
pub trait Vault {
    fn exists(&self, path: &str) -> Result<bool>;
    /// Creates the folder and any missing intermediate segments.
    fn create_folder(&self, path: &str) -> Result<()>;
    fn read_text(&self, path: &str) -> Result<String>;
    /// Full overwrite. Missing parent folders are created.
    fn write_text(&self, path: &str, content: &str) -> Result<()>;
}

/// Vault rooted at a directory on the local filesystem.
pub struct OsVault {
    root: PathBuf,
}

impl OsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl Vault for OsVault {
    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path).exists())
    }

    fn create_folder(&self, path: &str) -> Result<()> {
        fs::create_dir_all(self.resolve(path))
            .with_context(|| format!("unable to create folder: {}", path))
    }

    fn read_text(&self, path: &str) -> Result<String> {
        fs::read_to_string(self.resolve(path)).with_context(|| format!("unable to read: {}", path))
    }

    fn write_text(&self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("unable to create folder for: {}", path))?;
        }
        fs::write(&full, content).with_context(|| format!("unable to write: {}", path))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};

    use anyhow::Result;

    use super::Vault;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum VaultOp {
        Exists(String),
        CreateFolder(String),
        Read(String),
        Write(String),
    }

    /// In-memory vault that records every host call, so tests can assert
    /// not just the end state but how many mutating calls produced it.
    #[derive(Default)]
    pub(crate) struct MemVault {
        folders: RefCell<BTreeSet<String>>,
        files: RefCell<BTreeMap<String, String>>,
        ops: RefCell<Vec<VaultOp>>,
    }

    impl MemVault {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .borrow_mut()
                .insert(path.to_string(), content.to_string());
            self
        }

        pub(crate) fn file(&self, path: &str) -> Option<String> {
            self.files.borrow().get(path).cloned()
        }

        pub(crate) fn ops(&self) -> Vec<VaultOp> {
            self.ops.borrow().clone()
        }

        pub(crate) fn created_folders(&self) -> Vec<String> {
            self.ops()
                .into_iter()
                .filter_map(|op| match op {
                    VaultOp::CreateFolder(path) => Some(path),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn mutating_ops(&self) -> usize {
            self.ops()
                .iter()
                .filter(|op| matches!(op, VaultOp::CreateFolder(_) | VaultOp::Write(_)))
                .count()
        }

        pub(crate) fn reads(&self) -> usize {
            self.ops()
                .iter()
                .filter(|op| matches!(op, VaultOp::Read(_)))
                .count()
        }

        pub(crate) fn clear_ops(&self) {
            self.ops.borrow_mut().clear();
        }
    }

    impl Vault for MemVault {
        fn exists(&self, path: &str) -> Result<bool> {
            self.ops
                .borrow_mut()
                .push(VaultOp::Exists(path.to_string()));
            Ok(path.is_empty()
                || self.folders.borrow().contains(path)
                || self.files.borrow().contains_key(path))
        }

        fn create_folder(&self, path: &str) -> Result<()> {
            self.ops
                .borrow_mut()
                .push(VaultOp::CreateFolder(path.to_string()));
            let mut folders = self.folders.borrow_mut();
            let mut current = String::new();
            for segment in path.split('/') {
                if !current.is_empty() {
                    current.push('/');
                }
                current.push_str(segment);
                folders.insert(current.clone());
            }
            Ok(())
        }

        fn read_text(&self, path: &str) -> Result<String> {
            self.ops.borrow_mut().push(VaultOp::Read(path.to_string()));
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("unable to read: {}", path))
        }

        fn write_text(&self, path: &str, content: &str) -> Result<()> {
            self.ops.borrow_mut().push(VaultOp::Write(path.to_string()));
            self.files
                .borrow_mut()
                .insert(path.to_string(), content.to_string());
            Ok(())
        }
    }
}
