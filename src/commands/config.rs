use anyhow::Result;
use go_license_auditor::config::load_config;

pub fn handle_config(show: bool, validate: bool, quiet: bool) -> Result<()> {
    if !show && !validate {
        if !quiet {
            eprintln!("Use --show or --validate");
        }
        std::process::exit(1);
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            if !quiet {
                eprintln!("❌ Error loading configuration: {:#}", e);
            }
            std::process::exit(1);
        }
    };

    if show && !quiet {
        println!("{}", toml::to_string_pretty(&config)?);
    }

    if validate {
        match config.validate() {
            Ok(()) => {
                if !quiet {
                    println!("✅ Configuration is valid");
                }
            }
            Err(e) => {
                if !quiet {
                    eprintln!("❌ Configuration validation failed: {:#}", e);
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
