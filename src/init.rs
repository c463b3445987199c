use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use toml_edit::DocumentMut;

use crate::config::config_path;

#[derive(Debug, Clone, Copy)]
pub enum InitPreset {
    Permissive,
    Strict,
    Copyleft,
}

pub fn generate_config(preset: InitPreset) -> Result<()> {
    generate_config_at_path(config_path(), preset)
}

/// Write `preset` to `path`. An existing file keeps its formatting and any
/// settings the preset does not define.
pub fn generate_config_at_path<P: AsRef<Path>>(path: P, preset: InitPreset) -> Result<()> {
    let path = path.as_ref();
    let preset_content = get_preset_config(preset);

    if !path.exists() {
        fs::write(path, preset_content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(());
    }

    let existing_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut doc = existing_content
        .parse::<DocumentMut>()
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let preset_doc = preset_content
        .parse::<DocumentMut>()
        .context("Invalid preset config format")?;

    merge_preset(&mut doc, &preset_doc);

    fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn merge_preset(doc: &mut DocumentMut, preset: &DocumentMut) {
    let table = doc.as_table_mut();
    for (name, _) in preset.iter() {
        if let Some((key, item)) = preset.as_table().get_key_value(name) {
            table.remove(name);
            table.insert_formatted(key, item.clone());
        }
    }
}

fn get_preset_config(preset: InitPreset) -> &'static str {
    match preset {
        InitPreset::Permissive => include_str!("../presets/permissive.toml"),
        InitPreset::Strict => include_str!("../presets/strict.toml"),
        InitPreset::Copyleft => include_str!("../presets/copyleft.toml"),
    }
}
