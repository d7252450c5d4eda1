/// Vault config directory, relative to the vault root.
pub const CONFIG_DIR: &str = ".obsidian";

/// Normalizes a vault-relative path: backslashes become forward slashes,
/// runs of slashes collapse, leading/trailing slashes and whitespace are
/// dropped. Every path must pass through here before it is handed to the
/// vault, or the same folder can end up created twice under two spellings.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut prev_slash = false;

    for ch in path.trim().chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        normalized.push(ch);
    }

    normalized.trim_matches('/').to_string()
}

/// Joins two vault-relative segments and normalizes the result.
pub fn join_path(base: &str, rest: &str) -> String {
    normalize_path(&format!("{}/{}", base, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_path("a\\b\\c"), "a/b/c");
        assert_eq!(normalize_path("a//b///c"), "a/b/c");
    }

    #[test]
    fn test_normalize_edges() {
        assert_eq!(normalize_path("/a/b/"), "a/b");
        assert_eq!(normalize_path("  1-Inputs "), "1-Inputs");
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("///"), "");
    }

    #[test]
    fn test_join() {
        assert_eq!(join_path("3-Tasks", "Alpha"), "3-Tasks/Alpha");
        assert_eq!(join_path("3-Tasks/", "/Alpha"), "3-Tasks/Alpha");
        assert_eq!(join_path(".obsidian", "hotkeys.json"), ".obsidian/hotkeys.json");
    }
}
