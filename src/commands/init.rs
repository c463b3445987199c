use anyhow::Result;
use crate::cli::InitPreset;
use go_license_auditor::init;

pub fn handle_init(policy: InitPreset, quiet: bool) -> Result<()> {
    let init_preset = match policy {
        InitPreset::Permissive => init::InitPreset::Permissive,
        InitPreset::Strict => init::InitPreset::Strict,
        InitPreset::Copyleft => init::InitPreset::Copyleft,
    };

    let result = init::generate_config(init_preset);

    if result.is_ok() && !quiet {
        println!("✅ Configuration written to {}", go_license_auditor::config::CONFIG_FILE_NAME);
    }

    result
}
