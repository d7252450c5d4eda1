use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use super::paths::{join_path, CONFIG_DIR};
use super::settings::Settings;
use super::vault::Vault;

/// Vault-relative path of the template engine's data file.
pub fn data_file_path(settings: &Settings) -> String {
    join_path(CONFIG_DIR, &settings.templater_data_path)
}

/// Loads the template engine data file. `None` means the engine is not
/// installed; callers check once and report, they do not probe deeper.
pub fn load_data(vault: &dyn Vault, settings: &Settings) -> Result<Option<Map<String, Value>>> {
    let path = data_file_path(settings);
    if !vault.exists(&path)? {
        return Ok(None);
    }
    let content = vault.read_text(&path)?;
    if content.trim().is_empty() {
        return Ok(Some(Map::new()));
    }
    match serde_json::from_str(&content)
        .with_context(|| format!("malformed template engine data: {}", path))?
    {
        Value::Object(map) => Ok(Some(map)),
        _ => bail!("unexpected template engine data format: {}", path),
    }
}

fn save_data(vault: &dyn Vault, settings: &Settings, data: &Map<String, Value>) -> Result<()> {
    vault.write_text(
        &data_file_path(settings),
        &serde_json::to_string_pretty(&Value::Object(data.clone()))?,
    )
}

/// Points the engine's template and script folders at the framework
/// folder. Returns `false` when the engine is not installed.
pub fn register_paths(vault: &dyn Vault, settings: &Settings) -> Result<bool> {
    let Some(mut data) = load_data(vault, settings)? else {
        return Ok(false);
    };

    data.insert(
        "templates_folder".to_string(),
        Value::String(join_path(&settings.framework_folder, "Templates/Templater")),
    );
    data.insert(
        "user_scripts_folder".to_string(),
        Value::String(join_path(&settings.framework_folder, "Scripts")),
    );
    save_data(vault, settings, &data)?;
    Ok(true)
}

/// Appends the given template paths to the engine's hotkey-enabled list,
/// skipping entries already present. Returns the number of paths added,
/// or `None` when the engine is not installed. The data file is only
/// written when the list actually grew.
pub fn enable_template_hotkeys(
    vault: &dyn Vault,
    settings: &Settings,
    template_paths: &[String],
) -> Result<Option<usize>> {
    let Some(mut data) = load_data(vault, settings)? else {
        return Ok(None);
    };

    let mut enabled = match data.remove("enabled_templates_hotkeys") {
        Some(Value::Array(list)) => list,
        _ => Vec::new(),
    };

    let mut added = 0;
    for path in template_paths {
        if !enabled.iter().any(|v| v.as_str() == Some(path)) {
            enabled.push(Value::String(path.clone()));
            added += 1;
        }
    }
    data.insert(
        "enabled_templates_hotkeys".to_string(),
        Value::Array(enabled),
    );

    if added > 0 {
        save_data(vault, settings, &data)?;
    }
    Ok(Some(added))
}
